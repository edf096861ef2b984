/*
 * block.rs
 * Copyright (c) 2025 pandoc-exec contributors
 */

use crate::attr::Attr;
use crate::inline::{Inline, Inlines};

/// Block-level nodes.
///
/// Only the kinds the filter inspects or emits are modeled; everything
/// else is preserved verbatim as [`Block::Opaque`].
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    CodeBlock(CodeBlock),
    Para(Para),
    Plain(Plain),
    RawBlock(RawBlock),
    Div(Div),
    /// An unmodeled block, kept as its raw pandoc JSON.
    Opaque(serde_json::Value),
}

pub type Blocks = Vec<Block>;

/// A literal source-code block with classification metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    pub attr: Attr,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Para {
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Plain {
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawBlock {
    pub format: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Div {
    pub attr: Attr,
    pub content: Blocks,
}

impl CodeBlock {
    pub fn new(attr: Attr, text: impl Into<String>) -> Self {
        CodeBlock {
            attr,
            text: text.into(),
        }
    }

    /// The ordered class list.
    pub fn classes(&self) -> &[String] {
        &self.attr.1
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes().iter().any(|c| c == name)
    }

    /// The language tag is the first class, when present.
    pub fn language(&self) -> Option<&str> {
        self.classes().first().map(String::as_str)
    }

    /// Look up a key-value attribute.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attr.2.get(key).map(String::as_str)
    }
}

impl Block {
    /// A paragraph containing the given inlines.
    pub fn para(content: Inlines) -> Block {
        Block::Para(Para { content })
    }

    /// A raw passthrough block in the given format.
    pub fn raw(format: impl Into<String>, text: impl Into<String>) -> Block {
        Block::RawBlock(RawBlock {
            format: format.into(),
            text: text.into(),
        })
    }
}

impl Inline {
    pub fn str_(text: impl Into<String>) -> Inline {
        Inline::Str(text.into())
    }

    pub fn emph(content: Inlines) -> Inline {
        Inline::Emph(crate::inline::Emph { content })
    }
}
