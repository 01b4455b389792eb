//! # treesh Tree Walker
//!
//! File: cli/src/common/fs/walk.rs
//!
//! ## Overview
//!
//! Depth-first traversal shared by `backup`, `empty`, `find`, `findlike` and
//! `tree`. The walker lists a directory, hands each file and subdirectory to a
//! [`Visitor`], and descends into subdirectories.
//!
//! ## Architecture
//!
//! - **Work-list, not recursion**: pending entries live on an explicit stack, so
//!   the depth of the walk is limited by memory and not by call-stack frames.
//!   Children are pushed in reverse so they pop in visiting order, which keeps
//!   the classic depth-first sequence.
//! - **Order**: [`Order::FilesFirst`] visits every file of a directory before its
//!   subdirectories (copy and search); [`Order::DirsFirst`] does the opposite
//!   (tree rendering).
//! - **Depth**: the root's immediate entries have depth 1. Every subdirectory is
//!   reported to the visitor, but it is only listed when its depth is within
//!   `max_depth`. `.max_depth(0)` therefore shows the root's entries only.
//! - **Failure isolation**: failing to list the root is returned to the caller.
//!   Failing to list anything below it is reported through
//!   [`Visitor::listing_failed`] and the walk carries on with the siblings.
//! - **Cycles**: symlinked directories are followed. Every pending directory
//!   carries the canonical paths of its ancestors; a directory whose canonical
//!   path is already among them is not listed and is reported to
//!   [`Visitor::listing_failed`] as `ShellError::Cycle`. Two links to the same
//!   directory from different places are both walked, since neither is an
//!   ancestor of the other.
//!
//! ```text
//! root/            walk order (FilesFirst)     walk order (DirsFirst)
//! ├── a.txt        a.txt                        sub/
//! ├── sub/         sub/                         sub/b.txt
//! │   └── b.txt    sub/b.txt                    a.txt
//! ```
//!
use crate::core::error::{Result, ShellError};
use std::{
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};
use tracing::{debug, warn};

/// Immediate contents of one directory at the moment it was listed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DirListing {
    pub files: Vec<PathBuf>,
    pub dirs: Vec<PathBuf>,
}

/// Which entries of a directory are visited first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    FilesFirst,
    DirsFirst,
}

/// What the walker should do after a visitor callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Do not list the directory just visited. Only meaningful from `visit_dir`.
    SkipSubtree,
    /// End the walk now.
    Stop,
}

/// Per-node policy plugged into [`TreeWalker::walk`].
pub trait Visitor {
    fn visit_file(&mut self, path: &Path, depth: usize) -> Flow;

    /// Called for every subdirectory, before it is listed.
    fn visit_dir(&mut self, _path: &Path, _depth: usize) -> Flow {
        Flow::Continue
    }

    /// A directory below the root could not be listed, or would close a symlink
    /// cycle; its subtree is skipped.
    fn listing_failed(&mut self, error: ShellError);
}

/// Canonical paths from the root down to one listed directory, innermost first.
struct Ancestry {
    dir: PathBuf,
    parent: Option<Rc<Ancestry>>,
}

impl Ancestry {
    fn find(&self, canonical: &Path) -> Option<&Path> {
        let mut node = Some(self);
        while let Some(a) = node {
            if a.dir == canonical {
                return Some(&a.dir);
            }
            node = a.parent.as_deref();
        }
        None
    }
}

enum Task {
    File {
        path: PathBuf,
        depth: usize,
    },
    Dir {
        path: PathBuf,
        depth: usize,
        parents: Rc<Ancestry>,
    },
}

#[derive(Debug, Clone)]
pub struct TreeWalker {
    order: Order,
    max_depth: Option<usize>,
}

impl Default for TreeWalker {
    fn default() -> Self {
        TreeWalker {
            order: Order::FilesFirst,
            max_depth: None,
        }
    }
}

impl TreeWalker {
    /// Unbounded, files-first walker.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Walks the tree under `root`, feeding every entry to `visitor`.
    ///
    /// # Errors
    ///
    /// Returns an `Err` only when `root` itself cannot be listed. Failures deeper
    /// in the tree go to [`Visitor::listing_failed`].
    pub fn walk<V: Visitor>(&self, root: &Path, visitor: &mut V) -> Result<()> {
        let listing = list_dir(root)?;
        let root_ancestry = Rc::new(Ancestry {
            dir: root.canonicalize().unwrap_or_else(|_| root.to_path_buf()),
            parent: None,
        });
        let mut stack = Vec::new();
        self.schedule(&mut stack, listing, 1, &root_ancestry);

        while let Some(task) = stack.pop() {
            match task {
                Task::File { path, depth } => {
                    if visitor.visit_file(&path, depth) == Flow::Stop {
                        debug!("Walk of {} stopped at {}", root.display(), path.display());
                        return Ok(());
                    }
                }
                Task::Dir {
                    path,
                    depth,
                    parents,
                } => {
                    match visitor.visit_dir(&path, depth) {
                        Flow::Stop => {
                            debug!("Walk of {} stopped at {}", root.display(), path.display());
                            return Ok(());
                        }
                        Flow::SkipSubtree => continue,
                        Flow::Continue => {}
                    }
                    if !self.may_descend(depth) {
                        continue;
                    }
                    match self.open(&path, &parents) {
                        Ok((listing, ancestry)) => {
                            self.schedule(&mut stack, listing, depth + 1, &ancestry)
                        }
                        Err(e) => {
                            warn!("{}", crate::core::error::error_chain(&e));
                            visitor.listing_failed(e);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Lists `dir` unless it is one of its own ancestors.
    fn open(
        &self,
        dir: &Path,
        parents: &Rc<Ancestry>,
    ) -> std::result::Result<(DirListing, Rc<Ancestry>), ShellError> {
        let canonical = dir
            .canonicalize()
            .map_err(|e| ShellError::io("list directory", dir, e))?;
        if let Some(ancestor) = parents.find(&canonical) {
            return Err(ShellError::Cycle {
                path: dir.to_path_buf(),
                ancestor: ancestor.to_path_buf(),
            });
        }
        let listing = list_dir(dir)?;
        let ancestry = Rc::new(Ancestry {
            dir: canonical,
            parent: Some(Rc::clone(parents)),
        });
        Ok((listing, ancestry))
    }

    fn may_descend(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }

    fn schedule(
        &self,
        stack: &mut Vec<Task>,
        listing: DirListing,
        depth: usize,
        parents: &Rc<Ancestry>,
    ) {
        let files = listing
            .files
            .into_iter()
            .map(|path| Task::File { path, depth });
        let dirs = listing.dirs.into_iter().map(|path| Task::Dir {
            path,
            depth,
            parents: Rc::clone(parents),
        });
        let ordered: Vec<Task> = match self.order {
            Order::FilesFirst => files.chain(dirs).collect(),
            Order::DirsFirst => dirs.chain(files).collect(),
        };
        // The stack pops from the back.
        stack.extend(ordered.into_iter().rev());
    }
}

/// Lists the immediate files and subdirectories of `dir`, each sorted by name.
///
/// Symlinks are classified by what they point to. Entries whose metadata cannot
/// be read are kept as files so they still show up.
pub fn list_dir(dir: &Path) -> std::result::Result<DirListing, ShellError> {
    let read_dir = fs::read_dir(dir).map_err(|e| ShellError::io("list directory", dir, e))?;

    let mut listing = DirListing::default();
    for entry_result in read_dir {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                warn!(
                    "Failed to process directory entry in '{}': {}. Skipping.",
                    dir.display(),
                    e
                );
                continue;
            }
        };
        let path = entry.path();
        match fs::metadata(&path) {
            Ok(md) if md.is_dir() => listing.dirs.push(path),
            Ok(_) => listing.files.push(path),
            Err(e) => {
                warn!(
                    "Could not get metadata for '{}': {}. Assuming file.",
                    path.display(),
                    e
                );
                listing.files.push(path);
            }
        }
    }

    listing.files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    listing.dirs.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(listing)
}
