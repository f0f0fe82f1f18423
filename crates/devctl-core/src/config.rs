use crate::error::{DevError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE: &str = "devctl.yaml";

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// One compose service the tool talks to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceConfig {
    /// Service name as declared in the compose file.
    pub name: String,
    /// Port published on localhost.
    pub port: u16,
    /// Shell used by the `*-bash` commands.
    pub shell: String,
}

impl ServiceConfig {
    fn new(name: &str, port: u16, shell: &str) -> Self {
        Self {
            name: name.to_string(),
            port,
            shell: shell.to_string(),
        }
    }
}

/// A service entry as written in `devctl.yaml`; unset fields keep the
/// defaults of the service it configures.
#[derive(Debug, Default, Deserialize)]
struct ServiceEntry {
    name: Option<String>,
    port: Option<u16>,
    shell: Option<String>,
}

impl ServiceEntry {
    fn over(self, base: ServiceConfig) -> ServiceConfig {
        ServiceConfig {
            name: self.name.unwrap_or(base.name),
            port: self.port.unwrap_or(base.port),
            shell: self.shell.unwrap_or(base.shell),
        }
    }
}

fn database_entry<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<ServiceConfig, D::Error> {
    Ok(ServiceEntry::deserialize(d)?.over(default_database_service()))
}

fn backend_entry<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<ServiceConfig, D::Error> {
    Ok(ServiceEntry::deserialize(d)?.over(default_backend_service()))
}

fn auth_entry<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<ServiceConfig, D::Error> {
    Ok(ServiceEntry::deserialize(d)?.over(default_auth_service()))
}

fn frontend_entry<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<ServiceConfig, D::Error> {
    Ok(ServiceEntry::deserialize(d)?.over(default_frontend_service()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Services {
    #[serde(default = "default_database_service", deserialize_with = "database_entry")]
    pub database: ServiceConfig,
    #[serde(default = "default_backend_service", deserialize_with = "backend_entry")]
    pub backend: ServiceConfig,
    #[serde(default = "default_auth_service", deserialize_with = "auth_entry")]
    pub auth: ServiceConfig,
    #[serde(default = "default_frontend_service", deserialize_with = "frontend_entry")]
    pub frontend: ServiceConfig,
}

fn default_database_service() -> ServiceConfig {
    ServiceConfig::new("db", 5432, "bash")
}

fn default_backend_service() -> ServiceConfig {
    ServiceConfig::new("backend", 8000, "bash")
}

fn default_auth_service() -> ServiceConfig {
    ServiceConfig::new("auth", 8001, "bash")
}

fn default_frontend_service() -> ServiceConfig {
    ServiceConfig::new("frontend", 3000, "sh")
}

impl Default for Services {
    fn default() -> Self {
        Self {
            database: default_database_service(),
            backend: default_backend_service(),
            auth: default_auth_service(),
            frontend: default_frontend_service(),
        }
    }
}

// ---------------------------------------------------------------------------
// DatabaseConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_user")]
    pub user: String,
    #[serde(default = "default_db_name")]
    pub name: String,
    /// Named volume holding the database files. Defaults to
    /// `<project>_postgres_data`, matching compose's volume naming.
    #[serde(default)]
    pub volume: Option<String>,
}

fn default_db_user() -> String {
    "postgres".to_string()
}

fn default_db_name() -> String {
    "lms".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            user: default_db_user(),
            name: default_db_name(),
            volume: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AuthConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL the tool itself uses to reach the auth service.
    #[serde(default = "default_auth_url")]
    pub url: String,
    #[serde(default = "default_create_user_path")]
    pub create_user_path: String,
    /// Auth service URL as seen from inside the compose network.
    #[serde(default = "default_internal_url")]
    pub internal_url: String,
    /// Auth service URL as seen from the browser.
    #[serde(default = "default_auth_url")]
    pub public_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_auth_url() -> String {
    "http://localhost:8001".to_string()
}

fn default_create_user_path() -> String {
    "/api/users/".to_string()
}

fn default_internal_url() -> String {
    "http://auth:8001".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            url: default_auth_url(),
            create_user_path: default_create_user_path(),
            internal_url: default_internal_url(),
            public_url: default_auth_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AuthConfig {
    pub fn create_user_endpoint(&self) -> String {
        format!(
            "{}{}",
            self.url.trim_end_matches('/'),
            self.create_user_path
        )
    }
}

// ---------------------------------------------------------------------------
// FrontendConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontendConfig {
    /// Frontend checkout, relative to the project root.
    #[serde(default = "default_frontend_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_env_file")]
    pub env_file: String,
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("frontend")
}

fn default_env_file() -> String {
    ".env.local".to_string()
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dir: default_frontend_dir(),
            env_file: default_env_file(),
        }
    }
}

// ---------------------------------------------------------------------------
// SuperuserConfig
// ---------------------------------------------------------------------------

/// The privileged account `seed-all` creates in both the backend and the
/// auth service.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperuserConfig {
    #[serde(default = "default_su_username")]
    pub username: String,
    #[serde(default = "default_su_email")]
    pub email: String,
    #[serde(default = "default_su_password")]
    pub password: String,
    #[serde(default = "default_su_first_name")]
    pub first_name: String,
    #[serde(default = "default_su_last_name")]
    pub last_name: String,
    #[serde(default = "default_su_role")]
    pub role: String,
}

fn default_su_username() -> String {
    "admin".to_string()
}

fn default_su_email() -> String {
    "admin@example.com".to_string()
}

fn default_su_password() -> String {
    "admin123".to_string()
}

fn default_su_first_name() -> String {
    "Admin".to_string()
}

fn default_su_last_name() -> String {
    "User".to_string()
}

fn default_su_role() -> String {
    "Admin".to_string()
}

impl Default for SuperuserConfig {
    fn default() -> Self {
        Self {
            username: default_su_username(),
            email: default_su_email(),
            password: default_su_password(),
            first_name: default_su_first_name(),
            last_name: default_su_last_name(),
            role: default_su_role(),
        }
    }
}

impl std::fmt::Debug for SuperuserConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuperuserConfig")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("role", &self.role)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// SeedConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Optional management commands run by `seed-all` when the backend lists them.
    #[serde(default = "default_demo_commands")]
    pub demo_commands: Vec<String>,
}

fn default_demo_commands() -> Vec<String> {
    vec!["seed_demo_data".to_string(), "seed_courses".to_string()]
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            demo_commands: default_demo_commands(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Container engine binary; `compose` is invoked as a subcommand of it.
    #[serde(default = "default_engine")]
    pub engine: String,
    #[serde(default)]
    pub compose_file: Option<PathBuf>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default = "default_readiness_delay_secs")]
    pub readiness_delay_secs: u64,
    #[serde(default)]
    pub services: Services,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
    #[serde(default)]
    pub superuser: SuperuserConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

fn default_engine() -> String {
    "docker".to_string()
}

fn default_readiness_delay_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            compose_file: None,
            project_name: None,
            readiness_delay_secs: default_readiness_delay_secs(),
            services: Services::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            frontend: FrontendConfig::default(),
            superuser: SuperuserConfig::default(),
            seed: SeedConfig::default(),
        }
    }
}

impl Config {
    pub fn path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Load `devctl.yaml` from `root`. A missing file yields the defaults.
    pub fn load(root: &Path) -> Result<Self> {
        let path = Self::path(root);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(&path)?;
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn readiness_delay(&self) -> Duration {
        Duration::from_secs(self.readiness_delay_secs)
    }

    /// Compose project name: explicit setting, else the root directory name.
    pub fn project(&self, root: &Path) -> String {
        if let Some(name) = &self.project_name {
            return name.clone();
        }
        root.file_name()
            .map(|n| compose_project_name(&n.to_string_lossy()))
            .unwrap_or_else(|| "devctl".to_string())
    }

    pub fn database_volume(&self, root: &Path) -> String {
        match &self.database.volume {
            Some(v) => v.clone(),
            None => format!("{}_postgres_data", self.project(root)),
        }
    }

    pub fn frontend_env_path(&self, root: &Path) -> PathBuf {
        root.join(&self.frontend.dir).join(&self.frontend.env_file)
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.engine.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "engine is empty".to_string(),
            });
        }

        let services = [
            ("database", &self.services.database),
            ("backend", &self.services.backend),
            ("auth", &self.services.auth),
            ("frontend", &self.services.frontend),
        ];
        for (role, svc) in services {
            if svc.name.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("services.{role}.name is empty"),
                });
            }
            if svc.port == 0 {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("services.{role}.port is 0"),
                });
            }
        }

        if !self.auth.create_user_path.starts_with('/') {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "auth.create_user_path '{}' should start with '/'",
                    self.auth.create_user_path
                ),
            });
        }

        warnings
    }

    /// Validate and turn the first error-level warning into an error.
    pub fn check(&self) -> Result<Vec<ConfigWarning>> {
        let warnings = self.validate();
        if let Some(err) = warnings.iter().find(|w| w.level == WarnLevel::Error) {
            return Err(DevError::InvalidConfig(err.message.clone()));
        }
        Ok(warnings)
    }
}

/// Compose normalises project names to lowercase alphanumerics, `-` and `_`,
/// and a name may not start with `-` or `_`.
fn compose_project_name(dir: &str) -> String {
    let name: String = dir
        .chars()
        .filter_map(|c| {
            let c = c.to_ascii_lowercase();
            (c.is_ascii_alphanumeric() || c == '-' || c == '_').then_some(c)
        })
        .collect();
    match name.trim_start_matches(['_', '-']) {
        "" => "devctl".to_string(),
        trimmed => trimmed.to_string(),
    }
}
