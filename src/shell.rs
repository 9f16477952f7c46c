//! Interactive session over a single in-memory store.
//!
//! Every line is parsed with the same clap commands as the one-shot CLI, so
//! `project delete p-001` followed by `tasks` shows the cascade. Lines are
//! handled one at a time; a mutation's simulated latency blocks the prompt.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use colored::*;
use rustyline::{DefaultEditor, error::ReadlineError};
use thiserror::Error;
use tracing::debug;

use crate::{
    commands::{DashboardCommand, execute},
    models::store::Store,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    #[error("Unterminated {0} quote")]
    UnterminatedQuote(char),
}

#[derive(Parser)]
#[command(no_binary_name = true, name = "pdash", disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: DashboardCommand,
}

pub struct Shell {
    editor: DefaultEditor,
    store: Store,
    latency: Duration,
    history_path: PathBuf,
}

impl Shell {
    pub fn new(store: Store, latency: Duration) -> Result<Self, ReadlineError> {
        let editor = DefaultEditor::new()?;

        let history_path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("pdash")
            .join("history");

        Ok(Self {
            editor,
            store,
            latency,
            history_path,
        })
    }

    fn load_history(&mut self) {
        if self.history_path.exists() {
            let _ = self.editor.load_history(&self.history_path);
        }
    }

    fn save_history(&mut self) {
        if let Some(parent) = self.history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        let _ = self.editor.save_history(&self.history_path);
    }

    pub fn run(&mut self) -> Result<(), ReadlineError> {
        self.load_history();

        println!("Type a command ('help' for the list, Ctrl+D or 'exit' to quit)");
        println!();

        loop {
            match self.editor.readline("pdash> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    self.editor.add_history_entry(trimmed)?;

                    if matches!(trimmed, "exit" | "quit") {
                        break;
                    }

                    self.handle_line(trimmed);
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => break,
                Err(err) => {
                    self.save_history();
                    return Err(err);
                }
            }
        }

        self.save_history();
        Ok(())
    }

    fn handle_line(&mut self, line: &str) {
        let words = match split_words(line) {
            Ok(words) => words,
            Err(e) => {
                eprintln!("{} {}", "Error:".red(), e);
                return;
            }
        };

        let parsed = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Also covers `help` and `--help`, which clap reports as errors
                let _ = e.print();
                return;
            }
        };

        debug!(command = ?parsed.command, "shell command");

        if let Err(e) = execute(&mut self.store, parsed.command, self.latency) {
            eprintln!("{} {}", "Error:".red(), e);
        }
    }
}

/// Splits a command line into words, honouring single and double quotes and
/// backslash escapes outside single quotes.
pub fn split_words(line: &str) -> Result<Vec<String>, SplitError> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match (quote, c) {
            (Some('\''), '\'') | (Some('"'), '"') => quote = None,
            (Some('"'), '\\') | (None, '\\') => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
                in_word = true;
            }
            (Some(_), c) => current.push(c),
            (None, '\'' | '"') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(q) = quote {
        return Err(SplitError::UnterminatedQuote(q));
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("tasks", vec!["tasks"])]
    #[case("  task   delete t-001 ", vec!["task", "delete", "t-001"])]
    #[case(r#"task new "Review PR" -p p-002"#, vec!["task", "new", "Review PR", "-p", "p-002"])]
    #[case("member new 'Ana \"La\" López'", vec!["member", "new", "Ana \"La\" López"])]
    #[case(r"project new Big\ Launch", vec!["project", "new", "Big Launch"])]
    #[case(r#"member new "" -e x@x.com"#, vec!["member", "new", "", "-e", "x@x.com"])]
    fn test_split_words(#[case] line: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_words(line).unwrap(), expected);
    }

    #[test]
    fn test_split_words_unterminated() {
        assert_eq!(
            split_words("task new \"Review"),
            Err(SplitError::UnterminatedQuote('"'))
        );
    }

    #[test]
    fn test_shell_line_parses_dashboard_commands() {
        let words = split_words("project delete p-001").unwrap();
        let parsed = ShellLine::try_parse_from(&words).unwrap();
        assert!(parsed.command.is_mutation());
    }
}
