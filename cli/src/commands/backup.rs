//! # treesh Copy Engine (`backup`, `empty`)
//!
//! File: cli/src/commands/backup.rs
//!
//! ## Overview
//!
//! Recursive copy of a directory into another directory, optionally deleting
//! each source file once its copy succeeded. Two commands are built on it:
//!
//! - `backup src [dst]`: copies `src` to `dst/<name of src>` (default `dst` is the
//!   working directory) and leaves the source untouched. A single file is copied
//!   the same way.
//! - `empty dir`: moves everything below `dir` up into the working directory,
//!   keeping the relative layout. The emptied directories stay behind as shells.
//!
//! ## Architecture
//!
//! `copy_tree` runs a files-first [`TreeWalker`] over the source with a
//! `CopyVisitor`:
//! 1. The destination root is created before the walk starts.
//! 2. Every file is copied to the same relative location under the destination,
//!    replacing an existing file. With `delete_source` the original is removed
//!    only after its copy succeeded.
//! 3. Every subdirectory gets its destination created before it is listed. If
//!    that fails, its subtree is skipped and the failure is recorded.
//!
//! Each file and directory yields one [`CopyEntry`]. A failure is recorded and
//! the walk goes on, so a single unreadable file never stops a backup.
//!
//! Copying a directory into itself (or below itself) is refused up front: the
//! walk would otherwise pick up its own output.
//!
use crate::common::fs::copy::{copy_file, Overwrite};
use crate::common::fs::walk::{Flow, TreeWalker, Visitor};
use crate::common::fs::{io, path};
use crate::common::ui::Response;
use crate::core::context::ShellContext;
use crate::core::error::{error_chain, Result, ShellError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// Outcome of copying one file or preparing one destination directory.
#[derive(Debug)]
pub struct CopyEntry {
    pub kind: EntryKind,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub status: std::result::Result<(), ShellError>,
}

/// Everything a `copy_tree` run did, in the order it happened.
#[derive(Debug, Default)]
pub struct CopyReport {
    pub entries: Vec<CopyEntry>,
    /// Directories below the source root that could not be listed.
    pub listing_failures: Vec<ShellError>,
}

impl CopyReport {
    /// Number of files copied successfully.
    pub fn files_copied(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.kind == EntryKind::File && e.status.is_ok())
            .count()
    }

    pub fn failure_count(&self) -> usize {
        self.entries.iter().filter(|e| e.status.is_err()).count() + self.listing_failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }

    /// Appends one progress line per entry, then the listing failures.
    pub fn write_to(&self, response: &mut Response, moving: bool) {
        let verb = if moving { "Moved" } else { "Copied" };
        for entry in &self.entries {
            match (&entry.status, entry.kind) {
                (Ok(()), EntryKind::File) => {
                    response.plain(format!(
                        "{} file '{}' to '{}'",
                        verb,
                        entry.source.display(),
                        entry.destination.display()
                    ));
                }
                (Ok(()), EntryKind::Directory) => {
                    response.plain(format!(
                        "Copying directory '{}' to '{}'",
                        entry.source.display(),
                        entry.destination.display()
                    ));
                }
                (Err(e), _) => {
                    response.error(error_chain(e));
                }
            }
        }
        for failure in &self.listing_failures {
            response.error(error_chain(failure));
        }
    }
}

struct CopyVisitor<'a> {
    source_root: &'a Path,
    destination_root: &'a Path,
    delete_source: bool,
    report: CopyReport,
}

impl CopyVisitor<'_> {
    fn target_for(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(self.source_root) {
            Ok(relative) => self.destination_root.join(relative),
            // Walker paths are always built from the root; keep the name at least.
            Err(_) => self
                .destination_root
                .join(path.file_name().unwrap_or(path.as_os_str())),
        }
    }

    fn transfer(&self, source: &Path, target: &Path) -> std::result::Result<(), ShellError> {
        copy_file(source, target, Overwrite::Replace)?;
        if self.delete_source {
            fs::remove_file(source).map_err(|e| ShellError::io("remove", source, e))?;
        }
        Ok(())
    }
}

impl Visitor for CopyVisitor<'_> {
    fn visit_file(&mut self, path: &Path, _depth: usize) -> Flow {
        let target = self.target_for(path);
        let status = self.transfer(path, &target);
        match &status {
            Ok(()) => debug!("Copied file {:?} to {:?}", path, target),
            Err(e) => warn!("{}", error_chain(e)),
        }
        self.report.entries.push(CopyEntry {
            kind: EntryKind::File,
            source: path.to_path_buf(),
            destination: target,
            status,
        });
        Flow::Continue
    }

    fn visit_dir(&mut self, path: &Path, _depth: usize) -> Flow {
        let target = self.target_for(path);
        let status = io::ensure_dir_exists(&target);
        let flow = if status.is_ok() {
            Flow::Continue
        } else {
            Flow::SkipSubtree
        };
        self.report.entries.push(CopyEntry {
            kind: EntryKind::Directory,
            source: path.to_path_buf(),
            destination: target,
            status,
        });
        flow
    }

    fn listing_failed(&mut self, error: ShellError) {
        self.report.listing_failures.push(error);
    }
}

/// Copies the contents of `source` into `destination`, recursively.
///
/// # Errors
///
/// Returns an `Err` before anything is copied when `source` is not a directory,
/// when `destination` lies inside `source`, or when `destination` or the listing
/// of `source` cannot be obtained. Failures after that are recorded in the
/// returned [`CopyReport`].
pub fn copy_tree(source: &Path, destination: &Path, delete_source: bool) -> Result<CopyReport> {
    if !source.is_dir() {
        anyhow::bail!(ShellError::not_found(source));
    }
    refuse_nested_destination(source, destination)?;
    io::ensure_dir_exists(destination)?;

    info!(
        "Copying tree {:?} -> {:?} (delete source: {})",
        source, destination, delete_source
    );
    let mut visitor = CopyVisitor {
        source_root: source,
        destination_root: destination,
        delete_source,
        report: CopyReport::default(),
    };
    TreeWalker::new().walk(source, &mut visitor)?;

    let report = visitor.report;
    info!(
        "Finished copying {:?}: {} files, {} failures",
        source,
        report.files_copied(),
        report.failure_count()
    );
    Ok(report)
}

fn refuse_nested_destination(source: &Path, destination: &Path) -> Result<()> {
    let source = source
        .canonicalize()
        .map_err(|e| ShellError::io("resolve", source, e))?;
    let destination = canonical_prefix(destination);
    if destination.starts_with(&source) {
        anyhow::bail!(ShellError::usage(format!(
            "Destination '{}' is inside the source '{}'",
            destination.display(),
            source.display()
        )));
    }
    Ok(())
}

/// Canonicalizes the longest existing ancestor of `path` and re-appends the rest,
/// so paths that do not exist yet can still be compared.
fn canonical_prefix(path: &Path) -> PathBuf {
    let normalized = path::normalize(path);
    let mut existing = normalized.as_path();
    let mut missing = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            return missing
                .iter()
                .rev()
                .fold(canonical, |acc: PathBuf, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return normalized,
        }
    }
}

/// Copies `source` (file or directory) into `destination_root`.
pub fn backup(source: &Path, destination_root: &Path) -> Result<Response> {
    let mut response = Response::new();

    if source.is_file() {
        let Some(name) = source.file_name() else {
            anyhow::bail!(ShellError::not_found(source));
        };
        io::ensure_dir_exists(destination_root)?;
        let target = destination_root.join(name);
        copy_file(source, &target, Overwrite::Replace)?;
        response.success(format!(
            "File '{}' backed up to '{}'",
            source.display(),
            target.display()
        ));
        return Ok(response);
    }

    if !source.is_dir() {
        anyhow::bail!(ShellError::usage(format!(
            "The path '{}' doesn't exist",
            source.display()
        )));
    }

    let canonical = source
        .canonicalize()
        .map_err(|e| ShellError::io("resolve", source, e))?;
    let Some(name) = canonical.file_name() else {
        anyhow::bail!(ShellError::usage("Cannot back up the filesystem root"));
    };
    let target = destination_root.join(name);
    let report = copy_tree(&canonical, &target, false)?;
    report.write_to(&mut response, false);

    if report.is_clean() {
        response.success(format!(
            "Directory '{}' backed up to '{}'",
            source.display(),
            target.display()
        ));
    } else {
        response.error(format!(
            "Directory '{}' backed up to '{}' with {} failure(s)",
            source.display(),
            target.display(),
            report.failure_count()
        ));
    }
    Ok(response)
}

/// Moves everything below `source` into `cwd`, leaving empty directories behind.
pub fn empty(source: &Path, cwd: &Path) -> Result<Response> {
    if !source.exists() {
        anyhow::bail!(ShellError::not_found(source));
    }
    if !source.is_dir() {
        anyhow::bail!(ShellError::usage(format!(
            "'{}' is not a directory",
            source.display()
        )));
    }

    let report = copy_tree(source, cwd, true)?;
    let mut response = Response::new();
    report.write_to(&mut response, true);
    if report.is_clean() {
        response.success("Finished emptying directory");
    } else {
        response.error(format!(
            "Finished emptying directory with {} failure(s)",
            report.failure_count()
        ));
    }
    Ok(response)
}

/// Handles `backup src [dst]`.
pub fn handle_backup(ctx: &ShellContext, args: &[String]) -> Result<Response> {
    let Some(source_arg) = args.first() else {
        anyhow::bail!(ShellError::usage("Expected source path"));
    };
    let source = path::resolve(ctx.cwd(), source_arg);
    let destination = match args.get(1) {
        Some(dst) => path::resolve(ctx.cwd(), dst),
        None => ctx.cwd().to_path_buf(),
    };
    backup(&source, &destination)
}

/// Handles `empty dir`.
pub fn handle_empty(ctx: &ShellContext, args: &[String]) -> Result<Response> {
    let Some(dir_arg) = args.first() else {
        anyhow::bail!(ShellError::usage("Expected a directory path"));
    };
    let source = path::resolve(ctx.cwd(), dir_arg);
    empty(&source, ctx.cwd())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;
    use walkdir::WalkDir;

    /// Relative path -> content for every file under `root`.
    fn snapshot(root: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
        WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| {
                let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
                let content = fs::read(e.path()).unwrap();
                (rel, content)
            })
            .collect()
    }

    fn file_count(root: &Path) -> usize {
        snapshot(root).len()
    }

    /// project/{readme.md, src/{main.rs, util/{mod.rs, empty_dir/}}, assets/logo.bin}
    fn sample_project(base: &Path) -> Result<PathBuf> {
        let root = base.join("project");
        fs::create_dir_all(root.join("src/util/empty_dir"))?;
        fs::create_dir_all(root.join("assets"))?;
        fs::write(root.join("readme.md"), "# project\n")?;
        fs::write(root.join("src/main.rs"), "fn main() {}\n")?;
        fs::write(root.join("src/util/mod.rs"), "pub fn util() {}\n")?;
        fs::write(root.join("assets/logo.bin"), [0u8, 159, 146, 150])?;
        Ok(root)
    }

    #[test]
    fn test_copy_tree_reproduces_tree() -> Result<()> {
        let base = tempdir()?;
        let source = sample_project(base.path())?;
        let before = snapshot(&source);
        let target = base.path().join("backups/project");

        let report = copy_tree(&source, &target, false)?;

        assert!(report.is_clean());
        assert_eq!(report.files_copied(), 4);
        assert_eq!(snapshot(&target), before);
        assert_eq!(snapshot(&source), before, "source must be unmodified");
        assert!(target.join("src/util/empty_dir").is_dir());
        Ok(())
    }

    #[test]
    fn test_copy_tree_overwrites_existing_files() -> Result<()> {
        let base = tempdir()?;
        let source = sample_project(base.path())?;
        let target = base.path().join("out");
        fs::create_dir_all(target.join("src"))?;
        fs::write(target.join("src/main.rs"), "stale")?;

        copy_tree(&source, &target, false)?;
        assert_eq!(fs::read_to_string(target.join("src/main.rs"))?, "fn main() {}\n");
        Ok(())
    }

    #[test]
    fn test_copy_tree_with_delete_moves_every_file() -> Result<()> {
        let base = tempdir()?;
        let source = sample_project(base.path())?;
        let before = snapshot(&source);
        let target = base.path().join("moved");

        let report = copy_tree(&source, &target, true)?;

        assert!(report.is_clean());
        assert_eq!(file_count(&source), 0, "no file may remain under the source");
        assert!(source.join("src/util").is_dir(), "directories stay behind");
        assert_eq!(snapshot(&target), before);
        Ok(())
    }

    #[test]
    fn test_copy_tree_refuses_destination_inside_source() -> Result<()> {
        let base = tempdir()?;
        let source = sample_project(base.path())?;
        let before = snapshot(&source);

        let result = copy_tree(&source, &source.join("src/backup"), false);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("is inside the source"));
        assert!(!source.join("src/backup").exists());
        assert_eq!(snapshot(&source), before);

        assert!(copy_tree(&source, &source, true).is_err());
        Ok(())
    }

    #[test]
    fn test_copy_tree_missing_source() -> Result<()> {
        let base = tempdir()?;
        let result = copy_tree(&base.path().join("ghost"), &base.path().join("out"), false);
        assert_eq!(result.unwrap_err().to_string(), "'ghost' does not exist");
        Ok(())
    }

    #[test]
    fn test_copy_tree_continues_after_directory_failure() -> Result<()> {
        let base = tempdir()?;
        let source = sample_project(base.path())?;
        let target = base.path().join("out");
        fs::create_dir_all(&target)?;
        // A file where the `src` directory should go blocks that subtree only.
        fs::write(target.join("src"), "in the way")?;

        let report = copy_tree(&source, &target, false)?;

        assert_eq!(report.failure_count(), 1);
        let failed = report
            .entries
            .iter()
            .find(|e| e.status.is_err())
            .expect("one failed entry");
        assert_eq!(failed.kind, EntryKind::Directory);
        assert!(target.join("readme.md").is_file());
        assert!(target.join("assets/logo.bin").is_file());
        assert!(!target.join("src/main.rs").exists());
        Ok(())
    }

    #[test]
    fn test_move_keeps_source_file_when_its_copy_fails() -> Result<()> {
        let base = tempdir()?;
        let source = base.path().join("inbox");
        fs::create_dir(&source)?;
        fs::write(source.join("a.txt"), "a")?;
        fs::write(source.join("b.txt"), "b")?;
        fs::write(source.join("c.txt"), "c")?;
        let target = base.path().join("out");
        // A directory named like the file makes copying `b.txt` fail.
        fs::create_dir_all(target.join("b.txt/occupied"))?;

        let report = copy_tree(&source, &target, true)?;

        assert_eq!(report.failure_count(), 1);
        let failed: Vec<&CopyEntry> = report.entries.iter().filter(|e| e.status.is_err()).collect();
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].kind, EntryKind::File);
        assert!(failed[0].source.ends_with("b.txt"));

        assert_eq!(fs::read_to_string(source.join("b.txt"))?, "b", "source survives a failed copy");
        assert!(target.join("b.txt/occupied").is_dir());
        assert!(!source.join("a.txt").exists());
        assert!(!source.join("c.txt").exists());
        assert_eq!(fs::read_to_string(target.join("a.txt"))?, "a");
        assert_eq!(fs::read_to_string(target.join("c.txt"))?, "c");
        Ok(())
    }

    #[test]
    fn test_copy_continues_after_file_failure() -> Result<()> {
        let base = tempdir()?;
        let source = sample_project(base.path())?;
        let target = base.path().join("out");
        fs::create_dir_all(target.join("readme.md"))?;

        let report = copy_tree(&source, &target, false)?;

        assert!(!report.is_clean());
        assert_eq!(report.failure_count(), 1);
        assert_eq!(report.files_copied(), 3);
        assert!(target.join("src/util/mod.rs").is_file());
        assert!(target.join("assets/logo.bin").is_file());

        let mut response = Response::new();
        report.write_to(&mut response, false);
        assert!(response.has_errors());
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_follows_every_link_to_a_shared_directory() -> Result<()> {
        use std::os::unix::fs::symlink;
        let base = tempdir()?;
        fs::create_dir(base.path().join("shared"))?;
        fs::write(base.path().join("shared/data.txt"), "data")?;
        let source = base.path().join("src");
        fs::create_dir(&source)?;
        symlink(base.path().join("shared"), source.join("a"))?;
        symlink(base.path().join("shared"), source.join("b"))?;
        let target = base.path().join("out");

        let report = copy_tree(&source, &target, false)?;

        assert!(report.is_clean());
        assert_eq!(fs::read_to_string(target.join("a/data.txt"))?, "data");
        assert_eq!(fs::read_to_string(target.join("b/data.txt"))?, "data");
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_backup_reports_symlink_cycle() -> Result<()> {
        use std::os::unix::fs::symlink;
        let base = tempdir()?;
        let source = base.path().join("loop");
        fs::create_dir_all(source.join("inner"))?;
        fs::write(source.join("inner/f.txt"), "f")?;
        symlink(&source, source.join("inner/again"))?;

        let response = backup(&source, &base.path().join("vault"))?;

        assert!(response.has_errors());
        let text = response.text();
        assert!(text.contains("leads back to"), "{text}");
        assert!(text.contains("with 1 failure(s)"), "{text}");
        assert!(base.path().join("vault/loop/inner/f.txt").is_file());
        Ok(())
    }

    #[test]
    fn test_backup_directory_into_named_subdirectory() -> Result<()> {
        let base = tempdir()?;
        let source = sample_project(base.path())?;
        let dest = base.path().join("vault");

        let response = backup(&source, &dest)?;

        assert!(!response.has_errors());
        assert_eq!(snapshot(&dest.join("project")), snapshot(&source));
        let text = response.text();
        assert!(text.contains("Copied file"));
        assert!(text.contains("backed up to"));
        Ok(())
    }

    #[test]
    fn test_backup_single_file() -> Result<()> {
        let base = tempdir()?;
        let file = base.path().join("notes.txt");
        fs::write(&file, "remember")?;
        let dest = base.path().join("copies");

        let response = backup(&file, &dest)?;
        assert_eq!(fs::read_to_string(dest.join("notes.txt"))?, "remember");
        assert!(response.text().starts_with("File '"));
        Ok(())
    }

    #[test]
    fn test_backup_missing_source() -> Result<()> {
        let base = tempdir()?;
        let result = backup(&base.path().join("nothing"), base.path());
        assert!(result.unwrap_err().to_string().contains("doesn't exist"));
        Ok(())
    }

    #[test]
    fn test_handle_backup_defaults_to_cwd() -> Result<()> {
        let base = tempdir()?;
        let work = base.path().join("work");
        fs::create_dir(&work)?;
        let outside = base.path().join("data");
        fs::create_dir(&outside)?;
        fs::write(outside.join("a.txt"), "a")?;
        let ctx = ShellContext::new(&work, Default::default())?;

        handle_backup(&ctx, &["../data".to_string()])?;
        assert_eq!(fs::read_to_string(work.join("data/a.txt"))?, "a");
        assert!(outside.join("a.txt").exists());
        Ok(())
    }

    #[test]
    fn test_handle_backup_requires_source() -> Result<()> {
        let base = tempdir()?;
        let ctx = ShellContext::new(base.path(), Default::default())?;
        let err = handle_backup(&ctx, &[]).unwrap_err();
        assert_eq!(err.to_string(), "Expected source path");
        Ok(())
    }

    #[test]
    fn test_empty_flattens_into_cwd() -> Result<()> {
        let base = tempdir()?;
        let cwd = base.path();
        fs::create_dir_all(cwd.join("box/inner/deeper"))?;
        fs::write(cwd.join("box/top.txt"), "top")?;
        fs::write(cwd.join("box/inner/mid.txt"), "mid")?;
        fs::write(cwd.join("box/inner/deeper/low.txt"), "low")?;
        let ctx = ShellContext::new(cwd, Default::default())?;

        let response = handle_empty(&ctx, &["box".to_string()])?;

        assert!(response.text().contains("Finished emptying directory"));
        assert_eq!(fs::read_to_string(cwd.join("top.txt"))?, "top");
        assert_eq!(fs::read_to_string(cwd.join("inner/mid.txt"))?, "mid");
        assert_eq!(fs::read_to_string(cwd.join("inner/deeper/low.txt"))?, "low");
        assert_eq!(file_count(&cwd.join("box")), 0);
        assert!(cwd.join("box/inner/deeper").is_dir(), "shells are left in place");
        Ok(())
    }

    #[test]
    fn test_empty_rejects_cwd_and_missing() -> Result<()> {
        let base = tempdir()?;
        fs::write(base.path().join("keep.txt"), "k")?;
        let ctx = ShellContext::new(base.path(), Default::default())?;

        assert!(handle_empty(&ctx, &[".".to_string()]).is_err());
        assert!(base.path().join("keep.txt").exists());

        let err = handle_empty(&ctx, &["nope".to_string()]).unwrap_err();
        assert_eq!(err.to_string(), "'nope' does not exist");

        let err = handle_empty(&ctx, &[]).unwrap_err();
        assert_eq!(err.to_string(), "Expected a directory path");
        Ok(())
    }
}
