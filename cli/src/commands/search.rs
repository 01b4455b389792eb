//! # treesh Search (`find`, `findlike`)
//!
//! File: cli/src/commands/search.rs
//!
//! ## Overview
//!
//! Both searches walk the working directory depth-first, looking at every file of
//! a directory before descending into its subdirectories (files first, then
//! subdirectories in name order).
//!
//! - `find name [-r]` stops at the first file whose base name equals `name`
//!   exactly, so a shallower match always wins over a deeper one.
//! - `findlike fragment [-r]` collects every file whose full path contains
//!   `fragment` (case-sensitive, anywhere in the path string, not just the base
//!   name), in discovery order. The search root's own components count too, so
//!   a fragment that names the root matches every file below it.
//!
//! With `-r` matches are printed relative to the search root, otherwise as
//! absolute paths.
//!
use crate::common::fs::path;
use crate::common::fs::walk::{Flow, TreeWalker, Visitor};
use crate::common::ui::Response;
use crate::core::context::ShellContext;
use crate::core::error::{error_chain, Result, ShellError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How matches are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    Absolute,
    Relative,
}

impl PathStyle {
    /// `-r` among the arguments after the search term selects relative output.
    pub fn from_flags(flags: &[String]) -> Self {
        if flags.iter().any(|f| f == "-r") {
            PathStyle::Relative
        } else {
            PathStyle::Absolute
        }
    }

    pub fn format(self, root: &Path, found: &Path) -> String {
        match self {
            PathStyle::Absolute => found.display().to_string(),
            PathStyle::Relative => path::relative_to(root, found).display().to_string(),
        }
    }
}

/// Search result plus the subtrees that could not be searched.
#[derive(Debug, Default)]
pub struct SearchReport<T> {
    pub result: T,
    pub failures: Vec<ShellError>,
}

struct ExactName<'a> {
    name: &'a str,
    found: Option<PathBuf>,
    failures: Vec<ShellError>,
}

impl Visitor for ExactName<'_> {
    fn visit_file(&mut self, path: &Path, _depth: usize) -> Flow {
        if path.file_name().is_some_and(|n| n == self.name) {
            self.found = Some(path.to_path_buf());
            Flow::Stop
        } else {
            Flow::Continue
        }
    }

    fn listing_failed(&mut self, error: ShellError) {
        self.failures.push(error);
    }
}

struct Substring<'a> {
    fragment: &'a str,
    matches: Vec<PathBuf>,
    failures: Vec<ShellError>,
}

impl Visitor for Substring<'_> {
    fn visit_file(&mut self, path: &Path, _depth: usize) -> Flow {
        if path.to_string_lossy().contains(self.fragment) {
            self.matches.push(path.to_path_buf());
        }
        Flow::Continue
    }

    fn listing_failed(&mut self, error: ShellError) {
        self.failures.push(error);
    }
}

/// First file under `root` named exactly `name`, if any.
pub fn find_exact(root: &Path, name: &str) -> Result<SearchReport<Option<PathBuf>>> {
    let mut visitor = ExactName {
        name,
        found: None,
        failures: Vec::new(),
    };
    TreeWalker::new().walk(root, &mut visitor)?;
    debug!("find {:?} under {:?}: {:?}", name, root, visitor.found);
    Ok(SearchReport {
        result: visitor.found,
        failures: visitor.failures,
    })
}

/// Every file under `root` whose path contains `fragment`.
pub fn find_substring(root: &Path, fragment: &str) -> Result<SearchReport<Vec<PathBuf>>> {
    let mut visitor = Substring {
        fragment,
        matches: Vec::new(),
        failures: Vec::new(),
    };
    TreeWalker::new().walk(root, &mut visitor)?;
    debug!(
        "findlike {:?} under {:?}: {} matches",
        fragment,
        root,
        visitor.matches.len()
    );
    Ok(SearchReport {
        result: visitor.matches,
        failures: visitor.failures,
    })
}

fn write_failures(response: &mut Response, failures: &[ShellError]) {
    for failure in failures {
        response.error(error_chain(failure));
    }
}

/// Handles `find name [-r]`.
pub fn handle_find(ctx: &ShellContext, args: &[String]) -> Result<Response> {
    let Some((name, flags)) = args.split_first() else {
        anyhow::bail!(ShellError::usage("Expected filename"));
    };
    let style = PathStyle::from_flags(flags);
    let report = find_exact(ctx.cwd(), name)?;

    let mut response = Response::new();
    match &report.result {
        Some(found) => {
            response.plain(style.format(ctx.cwd(), found));
        }
        None => {
            response.error("File not found");
        }
    }
    write_failures(&mut response, &report.failures);
    Ok(response)
}

/// Handles `findlike fragment [-r]`.
pub fn handle_findlike(ctx: &ShellContext, args: &[String]) -> Result<Response> {
    let Some((fragment, flags)) = args.split_first() else {
        anyhow::bail!(ShellError::usage("Expected filename"));
    };
    let style = PathStyle::from_flags(flags);
    let report = find_substring(ctx.cwd(), fragment)?;

    let mut response = Response::new();
    response.info(format!("Found {} matches.", report.result.len()));
    for found in &report.result {
        response.plain(style.format(ctx.cwd(), found));
    }
    write_failures(&mut response, &report.failures);
    Ok(response)
}
