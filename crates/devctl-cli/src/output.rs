use console::style;
use devctl_core::config::Config;

pub fn step(msg: &str) {
    println!("{} {msg}", style("==>").cyan().bold());
}

pub fn success(msg: &str) {
    println!("{} {msg}", style("ok:").green().bold());
}

pub fn warn(msg: &str) {
    eprintln!("{} {msg}", style("warning:").yellow().bold());
}

pub fn cancelled() {
    println!("Cancelled.");
}

/// The four service URL lines: frontend, backend, auth service, database.
/// The auth line shows `auth.public_url`, the address the browser uses.
pub fn service_urls(config: &Config) -> [String; 4] {
    let s = &config.services;
    [
        format!("  Frontend:      http://localhost:{}", s.frontend.port),
        format!("  Backend API:   http://localhost:{}", s.backend.port),
        format!(
            "  Auth service:  {}",
            config.auth.public_url.trim_end_matches('/')
        ),
        format!("  Database:      localhost:{}", s.database.port),
    ]
}

pub fn print_service_urls(config: &Config) {
    println!();
    println!("Services:");
    for line in service_urls(config) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_urls_follow_configured_ports() {
        let mut cfg = Config::default();
        cfg.services.backend.port = 9000;
        let lines = service_urls(&cfg);
        assert_eq!(lines[0], "  Frontend:      http://localhost:3000");
        assert_eq!(lines[1], "  Backend API:   http://localhost:9000");
        assert_eq!(lines[2], "  Auth service:  http://localhost:8001");
        assert_eq!(lines[3], "  Database:      localhost:5432");
    }

    #[test]
    fn auth_line_follows_public_url() {
        let mut cfg = Config::default();
        cfg.services.auth.port = 9999;
        cfg.auth.public_url = "https://auth.lms.test/".to_string();
        assert_eq!(service_urls(&cfg)[2], "  Auth service:  https://auth.lms.test");
    }
}
