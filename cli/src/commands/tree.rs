//! # treesh Tree Renderer (`tree`)
//!
//! File: cli/src/commands/tree.rs
//!
//! ## Overview
//!
//! Renders the working directory as indented text down to a bounded depth
//! (`tree [depth]`, default from the configuration, normally 2).
//!
//! At each level the subdirectories come first, each followed by its own
//! contents when the depth allows it, then the files. Entries directly under
//! the root are printed bare; deeper entries are indented by one unit per level
//! and carry the marker before their name:
//!
//! ```text
//! docs
//! \t└guide.md
//! src
//! \t└bin
//! \t\t└cli.rs
//! \t└lib.rs
//! Cargo.toml
//! ```
//!
//! `tree 0` lists only the names directly under the root.
//!
use crate::common::fs::walk::{Flow, Order, TreeWalker, Visitor};
use crate::common::ui::Response;
use crate::core::context::ShellContext;
use crate::core::error::{error_chain, Result, ShellError};
use std::path::Path;

/// Drawing parameters for [`render`].
#[derive(Debug, Clone, Copy)]
pub struct TreeStyle<'a> {
    pub indent: &'a str,
    pub marker: &'a str,
}

/// Rendered text plus the directories that could not be listed.
#[derive(Debug, Default)]
pub struct TreeText {
    pub text: String,
    pub failures: Vec<ShellError>,
}

struct TreeBuilder<'a> {
    style: TreeStyle<'a>,
    out: TreeText,
}

impl TreeBuilder<'_> {
    fn line(&mut self, path: &Path, depth: usize) {
        let level = depth.saturating_sub(1);
        self.out.text.push_str(&self.style.indent.repeat(level));
        if level > 0 {
            self.out.text.push_str(self.style.marker);
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        self.out.text.push_str(&name);
        self.out.text.push('\n');
    }
}

impl Visitor for TreeBuilder<'_> {
    fn visit_file(&mut self, path: &Path, depth: usize) -> Flow {
        self.line(path, depth);
        Flow::Continue
    }

    fn visit_dir(&mut self, path: &Path, depth: usize) -> Flow {
        self.line(path, depth);
        Flow::Continue
    }

    fn listing_failed(&mut self, error: ShellError) {
        self.out.failures.push(error);
    }
}

/// Renders the tree under `root`, descending at most `max_depth` levels below
/// the root's immediate entries.
pub fn render(root: &Path, max_depth: usize, style: TreeStyle<'_>) -> Result<TreeText> {
    let mut builder = TreeBuilder {
        style,
        out: TreeText::default(),
    };
    TreeWalker::new()
        .order(Order::DirsFirst)
        .max_depth(max_depth)
        .walk(root, &mut builder)?;
    Ok(builder.out)
}

/// Handles `tree [depth]`.
pub fn handle_tree(ctx: &ShellContext, args: &[String]) -> Result<Response> {
    let depth = match args.first() {
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            ShellError::usage(format!("Expected a non-negative depth, got '{}'", raw))
        })?,
        None => ctx.config.tree.default_depth,
    };
    let style = TreeStyle {
        indent: &ctx.config.tree.indent,
        marker: &ctx.config.tree.marker,
    };

    let tree = render(ctx.cwd(), depth, style)?;
    let mut response = Response::new();
    for line in tree.text.lines() {
        response.plain(line);
    }
    for failure in &tree.failures {
        response.error(error_chain(failure));
    }
    Ok(response)
}
