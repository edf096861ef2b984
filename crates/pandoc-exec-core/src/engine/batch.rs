/*
 * engine/batch.rs
 * Copyright (c) 2025 pandoc-exec contributors
 *
 * One-shot subprocess execution.
 */

//! Batch execution: spawn, capture, wait.

use std::path::Path;
use std::process::Command;

use crate::error::{ExecError, Result};

/// One-shot external command invocation.
///
/// Implementations capture the merged output streams as one text
/// blob. The exit status is deliberately not part of the contract:
/// error text from the interpreter is as much "the result" as regular
/// output, and callers wanting failure detection inspect the text.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` in `cwd` (or the process's current
    /// directory) and return the captured output.
    fn run(&self, program: &str, args: &[String], cwd: Option<&Path>) -> std::io::Result<String>;
}

/// Production runner backed by [`std::process::Command`].
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String], cwd: Option<&Path>) -> std::io::Result<String> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output()?;

        // stdout first, then stderr. Cross-stream interleaving is not
        // reproducible through separate pipes.
        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

/// Execute `code` through the resolved `command`, appending the code
/// as the final argument and any `args`-attribute tokens after it.
pub fn execute_batch(
    command: &[String],
    code: &str,
    extra_args: &[String],
    cwd: Option<&Path>,
    runner: &dyn CommandRunner,
) -> Result<String> {
    let Some((program, leading)) = command.split_first() else {
        return Err(ExecError::other("empty executor command"));
    };

    let mut args: Vec<String> = leading.to_vec();
    args.push(code.to_string());
    args.extend(extra_args.iter().cloned());

    tracing::debug!(program = %program, cwd = ?cwd, "Executing code block");
    Ok(runner.run(program, &args, cwd)?)
}
