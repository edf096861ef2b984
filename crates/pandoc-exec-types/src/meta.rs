/*
 * meta.rs
 * Copyright (c) 2025 pandoc-exec contributors
 */

use crate::block::Blocks;
use crate::inline::Inlines;
use hashlink::LinkedHashMap;

// Pandoc's MetaValue notably does not support numbers or nulls, so we don't either
// https://pandoc.org/lua-filters.html#type-metavalue
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    MetaString(String),
    MetaBool(bool),
    MetaInlines(Inlines),
    MetaBlocks(Blocks),
    MetaList(Vec<MetaValue>),
    MetaMap(LinkedHashMap<String, MetaValue>),
}

impl Default for MetaValue {
    fn default() -> Self {
        MetaValue::MetaMap(LinkedHashMap::new())
    }
}

pub type Meta = LinkedHashMap<String, MetaValue>;

impl MetaValue {
    /// Whether any string content anywhere inside this value contains
    /// `needle`. Used for idempotent header-include insertion.
    pub fn contains_text(&self, needle: &str) -> bool {
        match self {
            MetaValue::MetaString(s) => s.contains(needle),
            MetaValue::MetaBool(_) => false,
            MetaValue::MetaInlines(inlines) => inlines_contain(inlines, needle),
            MetaValue::MetaBlocks(blocks) => blocks_contain(blocks, needle),
            MetaValue::MetaList(items) => items.iter().any(|v| v.contains_text(needle)),
            MetaValue::MetaMap(map) => map.values().any(|v| v.contains_text(needle)),
        }
    }
}

fn inlines_contain(inlines: &Inlines, needle: &str) -> bool {
    use crate::inline::Inline;
    inlines.iter().any(|inline| match inline {
        Inline::Str(s) => s.contains(needle),
        Inline::Space => false,
        Inline::Emph(e) => inlines_contain(&e.content, needle),
        Inline::Code(c) => c.text.contains(needle),
        Inline::RawInline(r) => r.text.contains(needle),
        Inline::Opaque(v) => v.to_string().contains(needle),
    })
}

fn blocks_contain(blocks: &Blocks, needle: &str) -> bool {
    use crate::block::Block;
    blocks.iter().any(|block| match block {
        Block::CodeBlock(cb) => cb.text.contains(needle),
        Block::Para(p) => inlines_contain(&p.content, needle),
        Block::Plain(p) => inlines_contain(&p.content, needle),
        Block::RawBlock(r) => r.text.contains(needle),
        Block::Div(d) => blocks_contain(&d.content, needle),
        Block::Opaque(v) => v.to_string().contains(needle),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inline::{Inline, RawInline};

    #[test]
    fn test_contains_text_in_raw_inline() {
        let value = MetaValue::MetaList(vec![MetaValue::MetaInlines(vec![Inline::RawInline(
            RawInline {
                format: "tex".to_string(),
                text: "\\usepackage{pgfplots}".to_string(),
            },
        )])]);
        assert!(value.contains_text("usepackage{pgfplots}"));
        assert!(!value.contains_text("usepackage{caption}"));
    }

    #[test]
    fn test_contains_text_in_string() {
        let value = MetaValue::MetaString("header content".to_string());
        assert!(value.contains_text("header"));
    }
}
