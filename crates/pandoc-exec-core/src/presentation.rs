/*
 * presentation.rs
 * Copyright (c) 2025 pandoc-exec contributors
 *
 * Output labels, plot centering, and codelisting wrappers.
 */

//! Builders for the blocks a processed code block expands into: the
//! `Output:`/`File:` label paragraphs, centered tikz pictures, and the
//! `codelisting` LaTeX float that carries caption and label.

use once_cell::sync::Lazy;
use regex::Regex;

use pandoc_exec_types::{Block, Code, Inline, attr_with_classes, empty_attr};

/// Last line matplotlib2tikz always emits before the picture itself.
static TIKZ_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(% .* matplotlib2tikz v.*)").unwrap());

/// `Para[Emph[Str "Output:"]]`, prepended before captured output.
pub fn output_label() -> Block {
    Block::para(vec![Inline::emph(vec![Inline::str_("Output:")])])
}

/// `Para[Emph[Str "File:"], Space, Code name]`, prepended before a
/// loaded-from-file listing that has no caption.
pub fn file_label(name: &str) -> Block {
    Block::para(vec![
        Inline::emph(vec![Inline::str_("File:")]),
        Inline::Space,
        Inline::Code(Code {
            attr: empty_attr(),
            text: name.to_string(),
        }),
    ])
}

/// Captured output presented as a plain code block.
pub fn changelog_block(text: &str) -> Block {
    Block::CodeBlock(pandoc_exec_types::CodeBlock::new(
        attr_with_classes(&["changelog"]),
        text,
    ))
}

/// Wrap a tikz picture in a center environment.
///
/// Detection keys on the marker comment matplotlib2tikz prints at the
/// top of its output; everything before it (interpreter noise, stray
/// prints) is discarded. Output without the marker passes through
/// untouched, so a requested plot that produced none degrades to its
/// raw text.
pub fn maybe_center_plot(result: &str) -> String {
    match TIKZ_HEADER.find(result) {
        Some(m) => format!("\\begin{{center}}\n{}\n\\end{{center}}", &result[m.end()..]),
        None => result.to_string(),
    }
}

/// Wrap blocks in a `codelisting` float.
///
/// Produces `\begin{codelisting}[hbtp]`, the caption raw block
/// (`\caption[short]{\label{label}caption}`) above or below the inner
/// blocks, and `\end{codelisting}`. An empty `shortcaption` falls back
/// to the caption.
pub fn make_codelisting(
    inner: Vec<Block>,
    caption: &str,
    label: &str,
    shortcaption: Option<&str>,
    above: bool,
) -> Vec<Block> {
    let shortcaption = match shortcaption {
        Some(s) if !s.is_empty() => s,
        _ => caption,
    };
    let begin = Block::raw("tex", r"\begin{codelisting}[hbtp]");
    let end = Block::raw("tex", r"\end{codelisting}");
    let caption_block = Block::raw(
        "tex",
        format!("\\caption[{}]{{\\label{{{}}}{}}}", shortcaption, label, caption),
    );

    let mut elems = vec![begin];
    if above {
        elems.push(caption_block);
        elems.extend(inner);
    } else {
        elems.extend(inner);
        elems.push(caption_block);
    }
    elems.push(end);
    elems
}

#[cfg(test)]
mod tests {
    use super::*;
    use pandoc_exec_types::RawBlock;

    fn raw_text(block: &Block) -> &str {
        match block {
            Block::RawBlock(RawBlock { text, .. }) => text,
            other => panic!("expected raw block, got {:?}", other),
        }
    }

    #[test]
    fn test_output_label_shape() {
        let Block::Para(para) = output_label() else {
            panic!("expected Para");
        };
        assert_eq!(para.content.len(), 1);
        let Inline::Emph(emph) = &para.content[0] else {
            panic!("expected Emph");
        };
        assert_eq!(emph.content, vec![Inline::Str("Output:".to_string())]);
    }

    #[test]
    fn test_file_label_carries_path() {
        let Block::Para(para) = file_label("src/lib.rs") else {
            panic!("expected Para");
        };
        assert_eq!(para.content.len(), 3);
        let Inline::Code(code) = &para.content[2] else {
            panic!("expected Code");
        };
        assert_eq!(code.text, "src/lib.rs");
    }

    #[test]
    fn test_changelog_block_class() {
        let Block::CodeBlock(cb) = changelog_block("done\n") else {
            panic!("expected CodeBlock");
        };
        assert!(cb.has_class("changelog"));
        assert_eq!(cb.text, "done\n");
    }

    #[test]
    fn test_center_plot_strips_preamble() {
        let result = "warming up\n% This file was created by matplotlib2tikz v0.6.\n\\begin{tikzpicture}\n\\end{tikzpicture}";
        let centered = maybe_center_plot(result);
        assert_eq!(
            centered,
            "\\begin{center}\n\n\\begin{tikzpicture}\n\\end{tikzpicture}\n\\end{center}"
        );
    }

    #[test]
    fn test_center_plot_without_marker_passes_through() {
        assert_eq!(maybe_center_plot("just text"), "just text");
    }

    #[test]
    fn test_codelisting_caption_above() {
        let inner = vec![changelog_block("x")];
        let elems = make_codelisting(inner, "A listing", "cl:1", None, true);
        assert_eq!(elems.len(), 4);
        assert_eq!(raw_text(&elems[0]), r"\begin{codelisting}[hbtp]");
        assert_eq!(
            raw_text(&elems[1]),
            "\\caption[A listing]{\\label{cl:1}A listing}"
        );
        assert_eq!(raw_text(&elems[3]), r"\end{codelisting}");
    }

    #[test]
    fn test_codelisting_caption_below() {
        let inner = vec![changelog_block("x")];
        let elems = make_codelisting(inner, "cap", "l", None, false);
        assert_eq!(raw_text(&elems[2]), "\\caption[cap]{\\label{l}cap}");
    }

    #[test]
    fn test_codelisting_shortcaption() {
        let elems = make_codelisting(Vec::new(), "long caption", "l", Some("short"), true);
        assert_eq!(
            raw_text(&elems[1]),
            "\\caption[short]{\\label{l}long caption}"
        );
    }
}
