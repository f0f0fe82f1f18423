//! In-memory stand-ins for the engine, the terminal and the auth service.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::PathBuf;

use devctl_core::auth::{AuthApi, NewUser};
use devctl_core::config::Config;
use devctl_core::process::{Captured, Invocation, Runner};
use devctl_core::prompt::Prompter;
use devctl_core::{DevError, Result};

use crate::context::Context;

/// Records every invocation. Captures answer with canned stdout; invocations
/// matching a failure rule exit with the given code.
#[derive(Default)]
pub struct FakeRunner {
    calls: RefCell<Vec<Invocation>>,
    replies: Vec<(Vec<String>, String)>,
    failures: Vec<(Vec<String>, i32)>,
}

fn owned(needle: &[&str]) -> Vec<String> {
    needle.iter().map(|s| s.to_string()).collect()
}

fn matches(inv: &Invocation, needle: &[String]) -> bool {
    let needle: Vec<&str> = needle.iter().map(String::as_str).collect();
    inv.has_args(&needle)
}

impl FakeRunner {
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn count(&self, needle: &[&str]) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|inv| inv.has_args(needle))
            .count()
    }

    fn failure(&self, inv: &Invocation) -> Option<i32> {
        self.failures
            .iter()
            .find(|(needle, _)| matches(inv, needle))
            .map(|(_, code)| *code)
    }
}

impl Runner for FakeRunner {
    fn run(&self, inv: &Invocation) -> Result<()> {
        self.calls.borrow_mut().push(inv.clone());
        match self.failure(inv) {
            Some(code) => Err(DevError::CommandFailed {
                command: inv.to_string(),
                code: Some(code),
            }),
            None => Ok(()),
        }
    }

    fn capture(&self, inv: &Invocation) -> Result<Captured> {
        self.calls.borrow_mut().push(inv.clone());
        if let Some(code) = self.failure(inv) {
            return Ok(Captured {
                success: false,
                code: Some(code),
                stdout: String::new(),
                stderr: "simulated failure\n".to_string(),
            });
        }
        let stdout = self
            .replies
            .iter()
            .find(|(needle, _)| matches(inv, needle))
            .map(|(_, out)| out.clone())
            .unwrap_or_default();
        Ok(Captured {
            success: true,
            code: Some(0),
            stdout,
            stderr: String::new(),
        })
    }
}

/// Answers prompts from a queue; an exhausted queue answers with blank lines.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    labels: RefCell<Vec<String>>,
    secret_labels: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn labels(&self) -> Vec<String> {
        self.labels.borrow().clone()
    }

    pub fn secret_labels(&self) -> Vec<String> {
        self.secret_labels.borrow().clone()
    }

    fn next(&self) -> String {
        self.answers.borrow_mut().pop_front().unwrap_or_default()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, label: &str) -> Result<String> {
        self.labels.borrow_mut().push(label.to_string());
        Ok(self.next())
    }

    fn secret(&self, label: &str) -> Result<String> {
        self.labels.borrow_mut().push(label.to_string());
        self.secret_labels.borrow_mut().push(label.to_string());
        Ok(self.next())
    }
}

/// Records requests and replies with a fixed body.
#[derive(Default)]
pub struct FakeAuth {
    requests: RefCell<Vec<NewUser>>,
    reply: String,
}

impl FakeAuth {
    pub fn requests(&self) -> Vec<NewUser> {
        self.requests.borrow().clone()
    }
}

impl AuthApi for FakeAuth {
    fn create_user(&self, user: &NewUser) -> Result<String> {
        self.requests.borrow_mut().push(user.clone());
        Ok(self.reply.clone())
    }
}

pub struct Harness {
    pub root: PathBuf,
    pub config: Config,
    pub runner: FakeRunner,
    pub prompter: ScriptedPrompter,
    pub auth: FakeAuth,
}

impl Harness {
    pub fn new() -> Self {
        let config = Config {
            readiness_delay_secs: 0,
            ..Config::default()
        };
        Self {
            root: PathBuf::from("/repo"),
            config,
            runner: FakeRunner::default(),
            prompter: ScriptedPrompter::default(),
            auth: FakeAuth {
                reply: r#"{"id": 1}"#.to_string(),
                ..FakeAuth::default()
            },
        }
    }

    pub fn root(mut self, root: PathBuf) -> Self {
        self.root = root;
        self
    }

    pub fn answers(self, answers: &[&str]) -> Self {
        self.prompter
            .answers
            .borrow_mut()
            .extend(answers.iter().map(|s| s.to_string()));
        self
    }

    pub fn reply(mut self, needle: &[&str], stdout: &str) -> Self {
        self.runner.replies.push((owned(needle), stdout.to_string()));
        self
    }

    pub fn fail_on(mut self, needle: &[&str], code: i32) -> Self {
        self.runner.failures.push((owned(needle), code));
        self
    }

    pub fn auth_reply(mut self, body: &str) -> Self {
        self.auth.reply = body.to_string();
        self
    }

    pub fn ctx(&self) -> Context<'_> {
        Context {
            root: &self.root,
            config: &self.config,
            runner: &self.runner,
            prompter: &self.prompter,
            auth: &self.auth,
        }
    }
}
