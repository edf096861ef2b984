/*
 * engine/interactive.rs
 * Copyright (c) 2025 pandoc-exec contributors
 *
 * Persistent read-eval-print session execution.
 */

//! Interactive execution.
//!
//! The block's text is split into logical statements: a statement
//! begins at an unindented, non-blank line and continues over
//! indented-or-blank lines, mirroring a Python session's continuation
//! rules. Each statement is fed to a persistent session, and the final
//! text interleaves echoed statements (`>>> ` / `... ` prefixes) with
//! captured output lines that are not echoes of the input.
//!
//! Every block gets a fresh session; no state carries across blocks.
//! An unavailable session is a recoverable degradation: the block
//! produces no output and the rest of the document still processes.

use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use crate::error::Result;

/// Output delimiter printed after each statement. Anything a statement
/// writes arrives before this line.
const SENTINEL: &str = "--pandoc-exec-statement-done--";

/// A persistent REPL-like session.
pub trait ReplSession {
    /// Feed one logical statement and return its captured output.
    fn run_statement(&mut self, statement: &str) -> std::io::Result<String>;
}

/// Capability to open interactive sessions.
pub trait SessionSpawner: Send + Sync {
    /// Start a fresh session. Failure means the interactive capability
    /// is unavailable in this environment.
    fn spawn_session(&self) -> std::io::Result<Box<dyn ReplSession>>;
}

/// Spawns `python3 -i` sessions over pipes.
pub struct PythonSessionSpawner;

impl SessionSpawner for PythonSessionSpawner {
    fn spawn_session(&self) -> std::io::Result<Box<dyn ReplSession>> {
        let python = which::which("python3").map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::NotFound, format!("python3: {}", e))
        })?;

        let mut child = Command::new(python)
            .args(["-i", "-q", "-u"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            // Prompts go to stderr; they are noise here.
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child.stdin.take().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "no stdin pipe")
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "no stdout pipe")
        })?;

        Ok(Box::new(PythonSession {
            child,
            stdin,
            stdout: BufReader::new(stdout),
        }))
    }
}

struct PythonSession {
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
}

impl ReplSession for PythonSession {
    fn run_statement(&mut self, statement: &str) -> std::io::Result<String> {
        // The blank line closes a compound statement; the sentinel
        // print marks the end of whatever output it produced.
        writeln!(self.stdin, "{}", statement)?;
        writeln!(self.stdin)?;
        writeln!(self.stdin, "print(\"{}\")", SENTINEL)?;
        self.stdin.flush()?;

        let mut output = String::new();
        let mut line = String::new();
        loop {
            line.clear();
            if self.stdout.read_line(&mut line)? == 0 {
                // Session died; surface what we have.
                break;
            }
            if line.trim_end() == SENTINEL {
                break;
            }
            output.push_str(&line);
        }
        Ok(output)
    }
}

impl Drop for PythonSession {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Execute a transcript-style block through a fresh session.
pub fn execute_interactive(text: &str, spawner: &dyn SessionSpawner) -> Result<String> {
    let statements = split_statements(text);

    let mut session = match spawner.spawn_session() {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Cannot run interactive session, no output produced"
            );
            return Ok(String::new());
        }
    };

    let mut final_code: Vec<String> = Vec::new();
    for statement in &statements {
        let result = session.run_statement(&statement.join("\n"))?;
        let result = result.trim_end_matches(['\r', '\n']);

        for (i, line) in statement.iter().enumerate() {
            let prefix = if i == 0 { ">>> " } else { "... " };
            final_code.push(format!("{}{}", prefix, line));
        }
        if !result.is_empty() {
            final_code.extend(
                result
                    .split('\n')
                    .filter(|out| !statement.iter().any(|input| input == out.trim()))
                    .map(str::to_string),
            );
        }
    }

    Ok(final_code.join("\n"))
}

/// Strip prompt markers and group lines into logical statements.
fn split_statements(text: &str) -> Vec<Vec<String>> {
    let lines: Vec<String> = text.lines().map(strip_prompt).collect();

    let mut statements: Vec<Vec<String>> = Vec::new();
    for line in lines {
        let continues = line.starts_with(' ') || line.is_empty();
        match statements.last_mut() {
            Some(current) if continues => current.push(line),
            _ => statements.push(vec![line]),
        }
    }
    statements
}

fn strip_prompt(line: &str) -> String {
    if let Some(rest) = line.strip_prefix(">>> ").or_else(|| line.strip_prefix("... ")) {
        rest.to_string()
    } else if line == ">>>" || line == "..." {
        String::new()
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays scripted per-statement responses.
    struct FakeSession {
        responses: VecDeque<String>,
        seen: std::sync::Arc<Mutex<Vec<String>>>,
    }

    impl ReplSession for FakeSession {
        fn run_statement(&mut self, statement: &str) -> std::io::Result<String> {
            self.seen.lock().unwrap().push(statement.to_string());
            Ok(self.responses.pop_front().unwrap_or_default())
        }
    }

    struct FakeSpawner {
        responses: Vec<String>,
        seen: std::sync::Arc<Mutex<Vec<String>>>,
    }

    impl FakeSpawner {
        fn new(responses: &[&str]) -> Self {
            FakeSpawner {
                responses: responses.iter().map(|s| (*s).to_string()).collect(),
                seen: std::sync::Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl SessionSpawner for FakeSpawner {
        fn spawn_session(&self) -> std::io::Result<Box<dyn ReplSession>> {
            Ok(Box::new(FakeSession {
                responses: self.responses.iter().cloned().collect(),
                seen: self.seen.clone(),
            }))
        }
    }

    struct UnavailableSpawner;

    impl SessionSpawner for UnavailableSpawner {
        fn spawn_session(&self) -> std::io::Result<Box<dyn ReplSession>> {
            Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "python3 not installed",
            ))
        }
    }

    #[test]
    fn test_split_statements_continuation() {
        let statements = split_statements(">>> def f(x):\n...     return x\n>>> f(2)");
        assert_eq!(
            statements,
            vec![
                vec!["def f(x):".to_string(), "    return x".to_string()],
                vec!["f(2)".to_string()],
            ]
        );
    }

    #[test]
    fn test_split_statements_blank_line_continues() {
        let statements = split_statements("a = 1\n\nb = 2");
        assert_eq!(statements.len(), 2);
        assert_eq!(statements[0], vec!["a = 1".to_string(), String::new()]);
    }

    #[test]
    fn test_split_statements_without_prompts() {
        // `interactive`-classed blocks may be written without markers
        let statements = split_statements("x = 1\nx");
        assert_eq!(
            statements,
            vec![vec!["x = 1".to_string()], vec!["x".to_string()]]
        );
    }

    #[test]
    fn test_interactive_interleaves_output() {
        let spawner = FakeSpawner::new(&["", "2"]);
        let text = execute_interactive(">>> x = 1\n>>> x + 1", &spawner).unwrap();
        assert_eq!(text, ">>> x = 1\n>>> x + 1\n2");
    }

    #[test]
    fn test_interactive_echo_lines_filtered() {
        // A session echoing the input back must not duplicate it
        let spawner = FakeSpawner::new(&["x = 1", "2"]);
        let text = execute_interactive(">>> x = 1\n>>> x + 1", &spawner).unwrap();
        assert_eq!(text, ">>> x = 1\n>>> x + 1\n2");
    }

    #[test]
    fn test_interactive_continuation_prefixes() {
        let spawner = FakeSpawner::new(&["", "4"]);
        let text = execute_interactive(">>> def f(x):\n...     return x * 2\n>>> f(2)", &spawner)
            .unwrap();
        assert_eq!(
            text,
            ">>> def f(x):\n...     return x * 2\n>>> f(2)\n4"
        );
    }

    #[test]
    fn test_interactive_statements_run_in_order() {
        let spawner = FakeSpawner::new(&[]);
        execute_interactive(">>> a = 1\n>>> b = a\n>>> b", &spawner).unwrap();
        let seen = spawner.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &["a = 1", "b = a", "b"]);
    }

    #[test]
    fn test_interactive_unavailable_degrades() {
        let text = execute_interactive(">>> x = 1", &UnavailableSpawner).unwrap();
        assert_eq!(text, "");
    }
}
