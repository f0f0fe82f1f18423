use crate::config::Config;
use crate::error::{DevError, Result};
use crate::process::{Invocation, Runner};

/// Locate the container engine binary on `PATH`.
pub fn locate(config: &Config) -> Result<std::path::PathBuf> {
    which::which(&config.engine).map_err(|_| DevError::EngineNotFound(config.engine.clone()))
}

/// Ask the engine daemon for its status. Fails when the daemon cannot be
/// reached, carrying whatever the engine printed.
pub fn probe(config: &Config, runner: &dyn Runner) -> Result<()> {
    let inv = Invocation::new(&config.engine).arg("info");
    let out = runner.capture(&inv)?;
    if out.success {
        return Ok(());
    }
    let detail = out
        .stderr
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("engine info exited with an error")
        .to_string();
    Err(DevError::EngineUnreachable {
        engine: config.engine.clone(),
        detail,
    })
}

/// Both checks, in order. Run before any command touches the engine.
pub fn ensure(config: &Config, runner: &dyn Runner) -> Result<()> {
    let path = locate(config)?;
    tracing::debug!(engine = %path.display(), "container engine located");
    probe(config, runner)
}
