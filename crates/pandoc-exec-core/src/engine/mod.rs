/*
 * engine/mod.rs
 * Copyright (c) 2025 pandoc-exec contributors
 *
 * Code execution engines.
 */

//! Code execution engines.
//!
//! Two mutually exclusive strategies:
//!
//! - [`batch`] — one-shot subprocess invocation with the source passed
//!   as the final argument
//! - [`interactive`] — a persistent read-eval-print session fed one
//!   logical statement at a time
//!
//! Both are abstracted behind capability traits so the selection and
//! assembly logic is testable without spawning real processes.

mod batch;
mod interactive;

pub use batch::{CommandRunner, ProcessRunner, execute_batch};
pub use interactive::{
    PythonSessionSpawner, ReplSession, SessionSpawner, execute_interactive,
};

use pandoc_exec_types::CodeBlock;

/// Interactive prompt marker that starts a REPL transcript.
pub const PROMPT: &str = ">>> ";

/// A block runs interactively when it carries the `interactive` class
/// or its text reads like a session transcript.
pub fn is_interactive(block: &CodeBlock) -> bool {
    block.has_class("interactive") || block.text.starts_with(PROMPT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pandoc_exec_types::attr::attr_with_classes;

    #[test]
    fn test_interactive_by_class() {
        let block = CodeBlock::new(attr_with_classes(&["python", "exec", "interactive"]), "x");
        assert!(is_interactive(&block));
    }

    #[test]
    fn test_interactive_by_prompt() {
        let block = CodeBlock::new(attr_with_classes(&["python", "exec"]), ">>> 1 + 1");
        assert!(is_interactive(&block));
    }

    #[test]
    fn test_batch_otherwise() {
        let block = CodeBlock::new(attr_with_classes(&["python", "exec"]), "print(1)");
        assert!(!is_interactive(&block));
    }
}
