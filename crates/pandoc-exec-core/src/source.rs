/*
 * source.rs
 * Copyright (c) 2025 pandoc-exec contributors
 *
 * Pre- and post-execution source text rewrites.
 */

//! Source text transforms.
//!
//! Three independent rewrites, applied in this order when their
//! triggering attribute or class is present:
//!
//! 1. file substitution (`file`, `pathdepth`)
//! 2. plot instrumentation (`plt`, `width`, `height`)
//! 3. display filtering (`hideimports`, `lines`) — these change what
//!    is shown, never what was executed

use std::path::{Path, PathBuf};

use pandoc_exec_types::CodeBlock;

use crate::error::{ExecError, Result};

// ============================================================================
// File substitution
// ============================================================================

/// Load source text from the first file matching `pattern`, searched
/// recursively from the current working directory.
///
/// Zero matches yield an empty string; multiple matches select the
/// first. Both are diagnosed but never fatal.
pub fn read_file_pattern(pattern: &str) -> (String, Option<PathBuf>) {
    let recursive = if Path::new(pattern).is_absolute() {
        pattern.to_string()
    } else {
        format!("**/{}", pattern)
    };

    let hits: Vec<PathBuf> = match glob::glob(&recursive) {
        Ok(paths) => paths.filter_map(std::result::Result::ok).collect(),
        Err(e) => {
            tracing::warn!(pattern, error = %e, "Invalid file pattern");
            return (String::new(), None);
        }
    };

    let Some(first) = hits.first() else {
        tracing::warn!(pattern, "No file found");
        return (String::new(), None);
    };
    if hits.len() > 1 {
        tracing::warn!(pattern, using = %first.display(), "File pattern ambiguous, using first match");
    }

    match std::fs::read_to_string(first) {
        Ok(text) => (text, Some(first.clone())),
        Err(e) => {
            tracing::warn!(path = %first.display(), error = %e, "Failed to read file");
            (String::new(), None)
        }
    }
}

/// Trim a display path per the `pathdepth` attribute.
///
/// `full` keeps the whole path, a number keeps that many trailing
/// segments, absence keeps only the file name.
pub fn trim_path(path: &str, pathdepth: Option<&str>) -> Result<String> {
    match pathdepth {
        Some("full") => Ok(path.to_string()),
        Some(depth) => {
            let limit: usize = depth
                .parse()
                .map_err(|_| ExecError::InvalidPathDepth(depth.to_string()))?;
            let segments: Vec<&str> = Path::new(path)
                .iter()
                .filter_map(|s| s.to_str())
                .collect();
            let start = segments.len().saturating_sub(limit);
            Ok(segments[start..].join("/"))
        }
        None => Ok(Path::new(path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(path)
            .to_string()),
    }
}

// ============================================================================
// Plot instrumentation
// ============================================================================

/// Figure dimensions for plot capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlotDims {
    pub width: String,
    pub height: String,
}

impl PlotDims {
    /// Dimension precedence: a `plt=W,H` value beats separate
    /// `width`/`height` attributes, which beat the 6cm/4cm defaults.
    pub fn from_block(block: &CodeBlock) -> Result<PlotDims> {
        if let Some(value) = block.attribute("plt") {
            if !value.is_empty() {
                let (width, height) = value
                    .split_once(',')
                    .ok_or_else(|| ExecError::InvalidPlotSpec(value.to_string()))?;
                return Ok(PlotDims {
                    width: width.trim().to_string(),
                    height: height.trim().to_string(),
                });
            }
        }

        Ok(PlotDims {
            width: block.attribute("width").unwrap_or("6cm").to_string(),
            height: block.attribute("height").unwrap_or("4cm").to_string(),
        })
    }
}

/// Wrap plotting code so the session also prints a tikz rendition of
/// the figure to stdout.
///
/// The headless backend keeps the interpreter from trying to open a
/// display; the epilogue emits the vector-graphics code this filter
/// detects downstream.
pub fn instrument_plot(code: &str, dims: &PlotDims) -> String {
    format!(
        "import matplotlib\n\
         matplotlib.use('TkAgg')\n\
         {code}\n\
         from matplotlib2tikz import get_tikz_code\n\
         tikz = get_tikz_code(figureheight='{height}', figurewidth='{width}')\n\
         print(tikz)",
        code = code,
        height = dims.height,
        width = dims.width,
    )
}

// ============================================================================
// Display filtering
// ============================================================================

/// Keep only the 1-based lines selected by `line_spec`.
///
/// The spec is a comma-separated list of line numbers and inclusive
/// ranges, e.g. `1,2,5-12,15`. A range missing its start begins at
/// line 1; missing its end runs to the last line. Out-of-range line
/// numbers are silently ignored.
pub fn filter_lines(code: &str, line_spec: &str) -> Result<String> {
    let lines: Vec<&str> = code.lines().collect();
    let mut keep = std::collections::BTreeSet::new();

    for part in line_spec.split(',') {
        let part = part.trim();
        if let Some((begin, end)) = part.split_once('-') {
            let begin = parse_bound(begin, line_spec, 1)?;
            let end = parse_bound(end, line_spec, lines.len())?;
            keep.extend(begin..=end);
        } else {
            keep.insert(parse_bound(part, line_spec, 0)?);
        }
    }

    Ok(lines
        .iter()
        .enumerate()
        .filter(|(i, _)| keep.contains(&(i + 1)))
        .map(|(_, line)| *line)
        .collect::<Vec<&str>>()
        .join("\n"))
}

fn parse_bound(text: &str, spec: &str, default: usize) -> Result<usize> {
    if text.is_empty() && default > 0 {
        return Ok(default);
    }
    text.parse()
        .map_err(|_| ExecError::invalid_line_spec(spec, format!("'{}' is not a line number", text)))
}

/// Remove import-style lines from displayed code.
///
/// Drops every line whose left-trimmed text starts with `import ` or
/// `from `, then trims leading and trailing blank lines. Internal
/// blank lines stay.
pub fn remove_import_statements(code: &str) -> String {
    let kept: Vec<&str> = code
        .lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.starts_with("import ") && !trimmed.starts_with("from ")
        })
        .collect();

    let start = kept
        .iter()
        .position(|l| !l.is_empty())
        .unwrap_or(kept.len());
    let end = kept.iter().rposition(|l| !l.is_empty()).map_or(0, |i| i + 1);

    kept[start..end.max(start)].join("\n")
}
