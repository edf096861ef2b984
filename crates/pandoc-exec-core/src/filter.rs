/*
 * filter.rs
 * Copyright (c) 2025 pandoc-exec contributors
 *
 * The document pass: per-block pipeline and header-includes finalization.
 */

//! The filter itself.
//!
//! [`SourceExecFilter`] owns the execution capabilities (a batch
//! command runner and an interactive session spawner) and drives one
//! pass over the document: every code block runs through a fixed
//! pipeline, and the pass-wide [`FilterContext`] records what the
//! document will need at finalization (LaTeX preamble support for
//! plots and captioned listings).

use pandoc_exec_types::{
    Block, CodeBlock, Inline, MetaValue, Pandoc, RawInline, walk_code_blocks,
};

use crate::engine::{
    CommandRunner, ProcessRunner, PythonSessionSpawner, SessionSpawner, execute_batch,
    execute_interactive, is_interactive,
};
use crate::error::Result;
use crate::executors::resolve_executor;
use crate::presentation::{
    changelog_block, file_label, make_codelisting, maybe_center_plot, output_label,
};
use crate::source::{
    PlotDims, filter_lines, instrument_plot, read_file_pattern, remove_import_statements,
    trim_path,
};

// ============================================================================
// Pass-wide state
// ============================================================================

/// State accumulated over one document pass.
///
/// Created when the pass starts, read at finalization, then discarded.
#[derive(Debug, Default)]
pub struct FilterContext {
    /// Count of code blocks seen, for `cl:<n>` auto labels.
    pub listings: usize,
    /// A tikz plot was produced somewhere in the document.
    pub plot_found: bool,
    /// A codelisting caption was produced somewhere in the document.
    pub caption_found: bool,
}

// ============================================================================
// The filter
// ============================================================================

/// Code-block execution filter over a Pandoc document.
pub struct SourceExecFilter {
    runner: Box<dyn CommandRunner>,
    spawner: Box<dyn SessionSpawner>,
}

impl SourceExecFilter {
    /// Filter backed by real subprocesses and `python3 -i` sessions.
    pub fn new() -> SourceExecFilter {
        SourceExecFilter {
            runner: Box::new(ProcessRunner),
            spawner: Box::new(PythonSessionSpawner),
        }
    }

    /// Filter with injected capabilities, for tests and embedding.
    pub fn with_capabilities(
        runner: Box<dyn CommandRunner>,
        spawner: Box<dyn SessionSpawner>,
    ) -> SourceExecFilter {
        SourceExecFilter { runner, spawner }
    }

    /// Run one full pass over the document, in place.
    pub fn run(&self, doc: &mut Pandoc) -> Result<()> {
        let mut ctx = FilterContext::default();
        walk_code_blocks(&mut doc.blocks, &mut |block| {
            self.process_block(block, &mut ctx)
        })?;
        finalize(doc, &ctx);
        Ok(())
    }

    /// The per-block pipeline.
    ///
    /// Stages run in a fixed order: file substitution, execution,
    /// import hiding, line filtering, then caption/label presentation.
    /// Later stages see the text earlier stages produced, so a `lines`
    /// selection applies to file content and an executed block's
    /// displayed source reflects `hideimports`.
    fn process_block(&self, mut block: CodeBlock, ctx: &mut FilterContext) -> Result<Vec<Block>> {
        ctx.listings += 1;

        let mut filename = None;
        if let Some(pattern) = block.attribute("file").map(str::to_string) {
            let (text, matched) = read_file_pattern(&pattern);
            block.text = text;
            let display = match &matched {
                Some(path) => path.display().to_string(),
                None => pattern,
            };
            filename = Some(trim_path(&display, block.attribute("pathdepth"))?);
        }

        let mut output = None;
        if block.has_class("exec") {
            if is_interactive(&block) {
                block.text = execute_interactive(&block.text, self.spawner.as_ref())?;
            } else {
                output = Some(self.run_batch(&block, ctx)?);
                if block.has_class("hideimports") {
                    block.text = remove_import_statements(&block.text);
                }
            }
        }

        if let Some(spec) = block.attribute("lines").map(str::to_string) {
            block.text = filter_lines(&block.text, &spec)?;
        }

        self.present(block, filename, output, ctx)
    }

    /// Execute a non-interactive block and build its output block.
    fn run_batch(&self, block: &CodeBlock, ctx: &mut FilterContext) -> Result<Block> {
        let command = resolve_executor(block)?;

        let plot = block.attribute("plt").is_some() || block.has_class("plt");
        let code = if plot {
            let dims = PlotDims::from_block(block)?;
            instrument_plot(&block.text, &dims)
        } else {
            block.text.clone()
        };

        let extra_args: Vec<String> = block
            .attribute("args")
            .map(|args| args.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        let cwd = block.attribute("wd").map(std::path::Path::new);

        let result = execute_batch(&command, &code, &extra_args, cwd, self.runner.as_ref())?;

        if plot {
            ctx.plot_found = true;
            Ok(Block::raw("latex", maybe_center_plot(&result)))
        } else {
            Ok(changelog_block(&result))
        }
    }

    /// Assemble the final block list: source, labels, output, and the
    /// codelisting wrapper when a caption was requested.
    fn present(
        &self,
        block: CodeBlock,
        filename: Option<String>,
        output: Option<Block>,
        ctx: &mut FilterContext,
    ) -> Result<Vec<Block>> {
        let label = block
            .attribute("label")
            .map(str::to_string)
            .unwrap_or_else(|| format!("cl:{}", ctx.listings));
        let above = !block.has_class("capbelow");
        let caption_attr = block.attribute("caption").map(str::to_string);
        let shortcaption = block.attribute("shortcaption").map(str::to_string);
        let caption_class = block.has_class("caption");
        let hidden = block.has_class("hide");

        let mut elems = Vec::new();
        if !hidden {
            elems.push(Block::CodeBlock(block));
        }
        if let Some(output) = output {
            elems.push(output_label());
            elems.push(output);
        }

        if let Some(mut caption) = caption_attr {
            ctx.caption_found = true;
            // The list-of-listings entry stays path-free, so the
            // fallback is taken before the file path is appended.
            let shortcaption = shortcaption.unwrap_or_else(|| caption.clone());
            if let Some(name) = &filename {
                caption.push_str(&format!("~(\\texttt{{{}}})", name));
            }
            return Ok(make_codelisting(
                elems,
                &caption,
                &label,
                Some(&shortcaption),
                above,
            ));
        }
        if caption_class {
            ctx.caption_found = true;
            let caption = filename
                .map(|name| format!("\\texttt{{{}}}", name))
                .unwrap_or_default();
            return Ok(make_codelisting(elems, &caption, &label, None, above));
        }
        if let Some(name) = filename {
            elems.insert(0, file_label(&name));
        }
        Ok(elems)
    }
}

impl Default for SourceExecFilter {
    fn default() -> Self {
        SourceExecFilter::new()
    }
}

// ============================================================================
// Finalization
// ============================================================================

/// pgfplots preamble, needed once any tikz plot is in the document.
const PGFPLOTS_HEADER: &str = r"%
\makeatletter
\@ifpackageloaded{pgfplots}{}{\usepackage{pgfplots}}
\makeatother
\usepgfplotslibrary{groupplots}
";

/// Codelisting float preamble, needed once any caption is produced.
const CAPTION_HEADER: &str = r"%
\makeatletter
\@ifpackageloaded{caption}{}{\usepackage{caption}}
\@ifpackageloaded{cleveref}{}{\usepackage{cleveref}}
\@ifundefined{codelisting}{%
    \DeclareCaptionType{codelisting}[Code Listing][List of Code Listings]
    \crefname{codelisting}{code listing}{code listings}
    \Crefname{codelisting}{Code Listing}{Code Listings}
    \captionsetup[codelisting]{position=bottom}
}{}
\makeatother
";

fn finalize(doc: &mut Pandoc, ctx: &FilterContext) {
    if ctx.plot_found {
        ensure_header_include(doc, PGFPLOTS_HEADER, "usepackage{pgfplots}");
    }
    if ctx.caption_found {
        ensure_header_include(doc, CAPTION_HEADER, "DeclareCaptionType{codelisting}");
    }
}

/// Append a raw tex block to `header-includes` unless a block carrying
/// `signature` is already there. The signature omits the leading
/// backslash so it also matches inside opaque JSON text, where the
/// backslash is escaped.
fn ensure_header_include(doc: &mut Pandoc, tex: &str, signature: &str) {
    let entry = MetaValue::MetaInlines(vec![Inline::RawInline(RawInline {
        format: "tex".to_string(),
        text: tex.to_string(),
    })]);

    match doc.meta.get_mut("header-includes") {
        None => {
            doc.meta.insert(
                "header-includes".to_string(),
                MetaValue::MetaList(vec![entry]),
            );
        }
        Some(existing) => {
            if existing.contains_text(signature) {
                return;
            }
            match existing {
                MetaValue::MetaList(items) => items.push(entry),
                other => {
                    // Promote a scalar header-includes to a list.
                    let prior = std::mem::replace(other, MetaValue::MetaList(Vec::new()));
                    *other = MetaValue::MetaList(vec![prior, entry]);
                }
            }
        }
    }
}
