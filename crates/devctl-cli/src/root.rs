use std::path::{Path, PathBuf};

use devctl_core::config::CONFIG_FILE;

const COMPOSE_FILES: [&str; 4] = [
    "compose.yaml",
    "compose.yml",
    "docker-compose.yml",
    "docker-compose.yaml",
];

/// Resolve the project root.
///
/// Priority:
/// 1. `--root` flag / `DEVCTL_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `devctl.yaml`
/// 3. Walk upward from `cwd` looking for a compose file
/// 4. Walk upward from `cwd` looking for `.git/`
/// 5. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    find_root_from(&cwd)
}

fn find_root_from(start: &Path) -> PathBuf {
    if let Some(dir) = walk_up(start, |d| d.join(CONFIG_FILE).is_file()) {
        return dir;
    }
    if let Some(dir) = walk_up(start, |d| COMPOSE_FILES.iter().any(|f| d.join(f).is_file())) {
        return dir;
    }
    if let Some(dir) = walk_up(start, |d| d.join(".git").exists()) {
        return dir;
    }
    start.to_path_buf()
}

fn walk_up(start: &Path, found: impl Fn(&Path) -> bool) -> Option<PathBuf> {
    start.ancestors().find(|d| found(d)).map(Path::to_path_buf)
}
