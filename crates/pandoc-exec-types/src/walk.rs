/*
 * walk.rs
 * Copyright (c) 2025 pandoc-exec contributors
 */

//! Single-pass code block traversal.
//!
//! The visitor receives each [`CodeBlock`] by value and returns the
//! contiguous list of blocks that replaces it. Every other block is
//! kept as-is; `Div` content is walked recursively.

use crate::block::{Block, Blocks, CodeBlock};

/// Visit every code block in document order, splicing each visitor
/// result into the parent sequence in place.
///
/// Stops at the first visitor error.
pub fn walk_code_blocks<E, F>(blocks: &mut Blocks, visitor: &mut F) -> Result<(), E>
where
    F: FnMut(CodeBlock) -> Result<Vec<Block>, E>,
{
    let old = std::mem::take(blocks);
    let mut out = Vec::with_capacity(old.len());

    for block in old {
        match block {
            Block::CodeBlock(cb) => out.extend(visitor(cb)?),
            Block::Div(mut div) => {
                walk_code_blocks(&mut div.content, visitor)?;
                out.push(Block::Div(div));
            }
            other => out.push(other),
        }
    }

    *blocks = out;
    Ok(())
}
