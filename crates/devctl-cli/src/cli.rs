use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "devctl",
    about = "Drive the local development stack: database, backend API, auth service, frontend",
    version
)]
pub struct Cli {
    /// Project root (default: auto-detect from devctl.yaml, a compose file, or .git/)
    #[arg(long, global = true, env = "DEVCTL_ROOT")]
    pub root: Option<PathBuf>,

    /// Container engine binary (overrides `engine` in devctl.yaml)
    #[arg(long, global = true, env = "DEVCTL_ENGINE")]
    pub engine: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// First-time setup: build, start, migrate, create a superuser, prepare the frontend
    Init,
    /// Build all images
    Build,
    /// Start all services in the background
    Up,
    /// Stop all services
    Down,
    /// Restart all services
    Restart,
    /// Remove containers, networks and volumes (asks for confirmation)
    Clean,

    /// Apply backend migrations
    Migrate,
    /// Generate backend migration files
    #[command(name = "makemigrations")]
    MakeMigrations,
    /// Create a backend superuser interactively
    #[command(name = "createsuperuser")]
    CreateSuperuser,
    /// Create the default admin in backend and auth service, plus optional demo data
    SeedAll,

    /// Print row counts for every database table
    DbSummary,
    /// Open a database client session
    #[command(name = "dbshell")]
    DbShell,
    /// Drop the database volume and re-run migrations (asks for confirmation)
    #[command(name = "resetdb")]
    ResetDb,

    /// Open the backend management shell
    Shell,
    /// Open a shell in the backend container
    Bash,
    /// Follow backend logs
    Logs,
    /// Run the backend test suite
    Test,

    /// Follow auth service logs
    AuthLogs,
    /// Open a shell in the auth service container
    AuthBash,
    /// Create a user in the auth service interactively
    CreateUser,

    /// Follow frontend logs
    FrontLogs,
    /// Open a shell in the frontend container
    FrontBash,

    /// List service containers
    Ps,
    /// List service containers and print service URLs
    Status,
    /// Follow logs of every service
    LogsAll,
}

/// The full command catalogue, as printed for `help`.
pub fn catalogue() -> String {
    Cli::command().render_help().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 25] = [
        "init",
        "build",
        "up",
        "down",
        "restart",
        "clean",
        "migrate",
        "makemigrations",
        "createsuperuser",
        "seed-all",
        "db-summary",
        "dbshell",
        "resetdb",
        "shell",
        "bash",
        "logs",
        "test",
        "auth-logs",
        "auth-bash",
        "create-user",
        "front-logs",
        "front-bash",
        "ps",
        "status",
        "logs-all",
    ];

    #[test]
    fn clap_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn every_command_name_parses() {
        for name in NAMES {
            let cli = Cli::try_parse_from(["devctl", name])
                .unwrap_or_else(|e| panic!("'{name}' did not parse: {e}"));
            assert!(cli.command.is_some(), "'{name}' parsed without a command");
        }
    }

    #[test]
    fn names_map_to_expected_variants() {
        let parse = |name: &str| Cli::try_parse_from(["devctl", name]).unwrap().command;
        assert_eq!(parse("makemigrations"), Some(Commands::MakeMigrations));
        assert_eq!(parse("seed-all"), Some(Commands::SeedAll));
        assert_eq!(parse("resetdb"), Some(Commands::ResetDb));
        assert_eq!(parse("logs-all"), Some(Commands::LogsAll));
    }

    #[test]
    fn no_argument_parses_to_none() {
        let cli = Cli::try_parse_from(["devctl"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn unknown_command_is_rejected() {
        let err = Cli::try_parse_from(["devctl", "deploy"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }

    #[test]
    fn help_alias_is_a_display_request() {
        for alias in ["help", "--help", "-h"] {
            let err = Cli::try_parse_from(["devctl", alias]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp, "{alias}");
        }
    }

    #[test]
    fn catalogue_lists_every_command() {
        let text = catalogue();
        for name in NAMES {
            assert!(text.contains(name), "catalogue is missing '{name}'");
        }
    }
}
