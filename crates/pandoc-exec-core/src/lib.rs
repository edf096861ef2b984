/*
 * lib.rs
 * Copyright (c) 2025 pandoc-exec contributors
 *
 * pandoc-exec-core: a pandoc filter that executes code blocks.
 *
 * Code blocks marked for execution are run through an executor
 * resolved from their attributes, and the captured output (plain text
 * or a tikz plot) is spliced back into the document alongside the
 * source. Blocks can load their text from files, filter the displayed
 * lines, and wrap themselves in captioned codelisting floats; the
 * supporting LaTeX preamble is added to the document metadata when
 * needed.
 */

pub mod engine;
pub mod error;
pub mod executors;
pub mod filter;
pub mod presentation;
pub mod source;

pub use engine::{CommandRunner, ProcessRunner, ReplSession, SessionSpawner};
pub use error::{ExecError, Result};
pub use filter::{FilterContext, SourceExecFilter};
