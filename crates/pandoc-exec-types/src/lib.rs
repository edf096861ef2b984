/*
 * lib.rs
 * Copyright (c) 2025 pandoc-exec contributors
 *
 * Minimal Pandoc AST type definitions for pandoc-exec.
 *
 * This crate provides the subset of the Pandoc AST that the filter
 * reads and writes: code blocks, the handful of node kinds the
 * presentation builder emits, and document metadata. Every node kind
 * the filter does not model is carried as opaque JSON so arbitrary
 * documents round-trip unchanged.
 */

pub mod attr;
pub mod block;
pub mod inline;
pub mod json;
pub mod meta;
pub mod pandoc;
pub mod walk;

// Re-export commonly used types at the crate root
pub use attr::{Attr, attr_with_classes, empty_attr, is_empty_attr};
pub use block::{Block, Blocks, CodeBlock, Div, Para, Plain, RawBlock};
pub use inline::{Code, Emph, Inline, Inlines, RawInline};
pub use json::JsonReadError;
pub use meta::{Meta, MetaValue};
pub use pandoc::Pandoc;
pub use walk::walk_code_blocks;
