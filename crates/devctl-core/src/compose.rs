//! Construction of `docker compose` invocations.
//!
//! Nothing here executes anything; every function returns an [`Invocation`]
//! for a [`Runner`](crate::process::Runner) to execute.

use std::path::Path;

use crate::config::{Config, ServiceConfig};
use crate::process::Invocation;

pub struct Compose<'a> {
    config: &'a Config,
    root: &'a Path,
}

impl<'a> Compose<'a> {
    pub fn new(config: &'a Config, root: &'a Path) -> Self {
        Self { config, root }
    }

    /// `<engine> [compose] [-f file] [-p project]`, run from the project root.
    fn base(&self) -> Invocation {
        let mut inv = Invocation::new(&self.config.engine)
            .arg("compose")
            .current_dir(self.root);
        if let Some(file) = &self.config.compose_file {
            inv = inv.arg("-f").arg(file.to_string_lossy());
        }
        if let Some(project) = &self.config.project_name {
            inv = inv.arg("-p").arg(project);
        }
        inv
    }

    pub fn build(&self) -> Invocation {
        self.base().arg("build")
    }

    pub fn up(&self) -> Invocation {
        self.base().args(["up", "-d"])
    }

    pub fn down(&self) -> Invocation {
        self.base().arg("down")
    }

    /// Tear down containers, named volumes and orphans.
    pub fn down_purge(&self) -> Invocation {
        self.base().args(["down", "-v", "--remove-orphans"])
    }

    pub fn restart(&self) -> Invocation {
        self.base().arg("restart")
    }

    pub fn ps(&self) -> Invocation {
        self.base().arg("ps")
    }

    /// Follow logs of one service, or of every service when `None`.
    pub fn logs(&self, service: Option<&ServiceConfig>) -> Invocation {
        let inv = self.base().args(["logs", "-f"]);
        match service {
            Some(svc) => inv.arg(&svc.name),
            None => inv,
        }
    }

    /// Interactive exec with a TTY.
    pub fn exec<S: AsRef<str>>(&self, service: &ServiceConfig, cmd: &[S]) -> Invocation {
        self.base()
            .arg("exec")
            .arg(&service.name)
            .args(cmd.iter().map(|s| s.as_ref().to_string()))
    }

    /// Non-interactive exec (`-T`) with extra environment for the container process.
    pub fn exec_batch<S: AsRef<str>>(
        &self,
        service: &ServiceConfig,
        env: &[(&str, &str)],
        cmd: &[S],
    ) -> Invocation {
        let mut inv = self.base().args(["exec", "-T"]);
        for (k, v) in env {
            inv = inv.arg("-e").arg(format!("{k}={v}"));
        }
        inv.arg(&service.name)
            .args(cmd.iter().map(|s| s.as_ref().to_string()))
    }

    /// Interactive management command inside the backend service.
    pub fn manage(&self, args: &[&str]) -> Invocation {
        self.exec(&self.config.services.backend, &manage_py(args))
    }

    /// Non-interactive management command inside the backend service.
    pub fn manage_batch(&self, env: &[(&str, &str)], args: &[&str]) -> Invocation {
        self.exec_batch(&self.config.services.backend, env, &manage_py(args))
    }

    /// Shell configured for `service`.
    pub fn shell(&self, service: &ServiceConfig) -> Invocation {
        self.exec(service, &[service.shell.as_str()])
    }

    /// Database client inside the database service. With `query`, the
    /// statement runs non-interactively.
    pub fn psql(&self, query: Option<&str>) -> Invocation {
        let db = &self.config.database;
        let client = [
            "psql",
            "-U",
            db.user.as_str(),
            "-d",
            db.name.as_str(),
        ];
        match query {
            Some(q) => {
                let mut cmd = client.to_vec();
                cmd.extend(["-c", q]);
                self.exec_batch(&self.config.services.database, &[], &cmd)
            }
            None => self.exec(&self.config.services.database, &client),
        }
    }

    /// `<engine> volume rm <name>`; not a compose subcommand.
    pub fn volume_rm(&self, name: &str) -> Invocation {
        Invocation::new(&self.config.engine)
            .args(["volume", "rm", name])
            .current_dir(self.root)
    }
}

fn manage_py(args: &[&str]) -> Vec<String> {
    let mut cmd = vec!["python".to_string(), "manage.py".to_string()];
    cmd.extend(args.iter().map(|s| s.to_string()));
    cmd
}
