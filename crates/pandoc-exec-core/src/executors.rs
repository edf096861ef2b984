/*
 * executors.rs
 * Copyright (c) 2025 pandoc-exec contributors
 *
 * Executor resolution for code blocks.
 */

//! Executor resolution.
//!
//! A code block's attributes and classes select its executor in this
//! order (highest to lowest):
//!
//! - a `cmd` attribute, split on whitespace and used verbatim
//! - a `runas` attribute, looked up in the fixed executor table
//! - the block's first class (its language tag), looked up in the
//!   same table
//!
//! A key that is absent from the table is a fatal configuration error;
//! guessing an interpreter would execute code with the wrong runtime.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use pandoc_exec_types::CodeBlock;

use crate::error::{ExecError, Result};

/// Language key to interpreter invocation.
///
/// Each entry runs the code passed as the final command-line argument.
/// The `default` entry merely echoes its input.
static EXECUTORS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("default", "echo"),
        ("perl", "/usr/bin/env perl -e"),
        ("php", "/usr/bin/env php -r"),
        ("python", "/usr/bin/env python3 -c"),
        ("python2", "/usr/bin/env python2 -c"),
        ("python3", "/usr/bin/env python3 -c"),
        ("ruby", "/usr/bin/env ruby -e"),
    ])
});

/// Resolve a block to an executable command: the program plus its
/// leading fixed arguments, as an ordered token list.
pub fn resolve_executor(block: &CodeBlock) -> Result<Vec<String>> {
    if let Some(cmd) = block.attribute("cmd") {
        return Ok(split_command(cmd));
    }

    if let Some(runas) = block.attribute("runas") {
        return lookup(runas);
    }

    // The bare `exec` marker class carries no language; it falls back
    // to the echo entry.
    match block.language() {
        Some("exec") | None => lookup("default"),
        Some(language) => lookup(language),
    }
}

fn lookup(key: &str) -> Result<Vec<String>> {
    EXECUTORS
        .get(key)
        .map(|cmd| split_command(cmd))
        .ok_or_else(|| ExecError::unknown_executor(key))
}

fn split_command(cmd: &str) -> Vec<String> {
    cmd.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pandoc_exec_types::attr::attr_with_classes;

    fn block(classes: &[&str], kvs: &[(&str, &str)]) -> CodeBlock {
        let mut attr = attr_with_classes(classes);
        for (k, v) in kvs {
            attr.2.insert((*k).to_string(), (*v).to_string());
        }
        CodeBlock::new(attr, "")
    }

    #[test]
    fn test_first_class_lookup() {
        let cmd = resolve_executor(&block(&["python", "exec"], &[])).unwrap();
        assert_eq!(cmd, vec!["/usr/bin/env", "python3", "-c"]);
    }

    #[test]
    fn test_cmd_attribute_wins() {
        let cmd = resolve_executor(&block(
            &["python", "exec"],
            &[("cmd", "gnuplot -e"), ("runas", "ruby")],
        ))
        .unwrap();
        assert_eq!(cmd, vec!["gnuplot", "-e"]);
    }

    #[test]
    fn test_runas_beats_first_class() {
        let cmd = resolve_executor(&block(&["python", "exec"], &[("runas", "ruby")])).unwrap();
        assert_eq!(cmd, vec!["/usr/bin/env", "ruby", "-e"]);
    }

    #[test]
    fn test_exec_marker_falls_back_to_default() {
        let cmd = resolve_executor(&block(&["exec"], &[])).unwrap();
        assert_eq!(cmd, vec!["echo"]);
    }

    #[test]
    fn test_unknown_first_class_is_fatal() {
        let err = resolve_executor(&block(&["haskell", "exec"], &[])).unwrap_err();
        assert!(matches!(err, ExecError::UnknownExecutor { key } if key == "haskell"));
    }

    #[test]
    fn test_unknown_runas_is_fatal() {
        let err = resolve_executor(&block(&["python", "exec"], &[("runas", "cobol")])).unwrap_err();
        assert!(matches!(err, ExecError::UnknownExecutor { key } if key == "cobol"));
    }
}
