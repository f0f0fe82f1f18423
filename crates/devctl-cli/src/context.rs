use std::path::Path;

use devctl_core::auth::AuthApi;
use devctl_core::compose::Compose;
use devctl_core::config::Config;
use devctl_core::process::{Captured, Invocation, Runner};
use devctl_core::prompt::Prompter;
use devctl_core::{DevError, Result};

/// Everything a command handler may touch.
pub struct Context<'a> {
    pub root: &'a Path,
    pub config: &'a Config,
    pub runner: &'a dyn Runner,
    pub prompter: &'a dyn Prompter,
    pub auth: &'a dyn AuthApi,
}

impl<'a> Context<'a> {
    pub fn compose(&self) -> Compose<'a> {
        Compose::new(self.config, self.root)
    }

    pub fn run(&self, inv: Invocation) -> Result<()> {
        self.runner.run(&inv)
    }

    /// Capture output, treating a non-zero exit as failure. The tool's own
    /// stderr is forwarded before the error is returned.
    pub fn capture_ok(&self, inv: Invocation) -> Result<Captured> {
        let out = self.runner.capture(&inv)?;
        if !out.success {
            eprint!("{}", out.stderr);
            return Err(DevError::CommandFailed {
                command: inv.to_string(),
                code: out.code,
            });
        }
        Ok(out)
    }

    /// Fixed readiness delay after starting containers. No polling.
    pub fn wait_for_services(&self) {
        let delay = self.config.readiness_delay();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}
