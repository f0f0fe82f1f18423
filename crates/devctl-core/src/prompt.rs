use console::Term;

use crate::error::Result;

/// Line-oriented questions to the person at the terminal.
pub trait Prompter {
    /// Ask for a line; the answer is echoed.
    fn input(&self, label: &str) -> Result<String>;
    /// Ask for a line without echoing it.
    fn secret(&self, label: &str) -> Result<String>;
}

/// Prompts on stdout and reads answers from the terminal. When stdout is not
/// a terminal, answers are read line by line from stdin.
pub struct TermPrompter {
    term: Term,
}

impl TermPrompter {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
        }
    }

    fn ask(&self, label: &str, hidden: bool) -> Result<String> {
        self.term.write_str(label)?;
        self.term.flush()?;
        if !self.term.is_term() {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)?;
            return Ok(line.trim_end_matches(&['\r', '\n'][..]).to_string());
        }
        if hidden {
            Ok(self.term.read_secure_line()?)
        } else {
            Ok(self.term.read_line()?)
        }
    }
}

impl Default for TermPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TermPrompter {
    fn input(&self, label: &str) -> Result<String> {
        self.ask(label, false)
    }

    fn secret(&self, label: &str) -> Result<String> {
        self.ask(label, true)
    }
}

/// True only when the answer is exactly `yes`.
pub fn confirm(prompter: &dyn Prompter, label: &str) -> Result<bool> {
    let answer = prompter.input(label)?;
    Ok(answer.trim_end_matches(&['\r', '\n'][..]) == "yes")
}

/// Ask for a value, falling back to `default` when the answer is blank.
pub fn input_or(prompter: &dyn Prompter, label: &str, default: &str) -> Result<String> {
    let answer = prompter.input(label)?;
    let answer = answer.trim();
    if answer.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(answer.to_string())
    }
}
