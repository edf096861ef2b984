/*
 * pandoc.rs
 * Copyright (c) 2025 pandoc-exec contributors
 */

use crate::block::Blocks;
use crate::meta::Meta;

/*
 * A data structure that mimics Pandoc's `data Pandoc` type, restricted
 * to what a JSON filter needs: the API version (carried through
 * verbatim), document metadata, and the block list.
 */

#[derive(Debug, Clone, PartialEq)]
pub struct Pandoc {
    /// The `pandoc-api-version` the input document declared.
    pub api_version: Vec<u64>,
    /// Document metadata (frontmatter).
    pub meta: Meta,
    pub blocks: Blocks,
}

impl Default for Pandoc {
    fn default() -> Self {
        Pandoc {
            api_version: vec![1, 23, 1],
            meta: Meta::new(),
            blocks: Vec::new(),
        }
    }
}
