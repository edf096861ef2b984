/*
 * inline.rs
 * Copyright (c) 2025 pandoc-exec contributors
 */

use crate::attr::Attr;

/// Inline nodes.
///
/// The filter only ever emits label text ("Output:", "File:"), inline
/// code for trimmed file paths, and raw tex; other inline kinds pass
/// through as [`Inline::Opaque`].
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Str(String),
    Space,
    Emph(Emph),
    Code(Code),
    RawInline(RawInline),
    /// An unmodeled inline, kept as its raw pandoc JSON.
    Opaque(serde_json::Value),
}

pub type Inlines = Vec<Inline>;

#[derive(Debug, Clone, PartialEq)]
pub struct Emph {
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Code {
    pub attr: Attr,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawInline {
    pub format: String,
    pub text: String,
}
