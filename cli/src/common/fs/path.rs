//! # treesh Path Resolution
//!
//! File: cli/src/common/fs/path.rs
//!
//! ## Overview
//!
//! Joins the shell's working directory with path fragments typed at the prompt,
//! and computes relative paths for display.
//!
//! Resolution follows the operating system's join semantics: an absolute
//! fragment replaces the base, `..` components are kept as typed, and no
//! containment check is applied here. Callers that need one (deletion) use
//! [`is_base_or_ancestor_of`]. A leading `~` is expanded to the home directory
//! with `shellexpand`.
//!
use std::path::{Component, Path, PathBuf};

/// Joins `base` with the user-supplied `fragment`.
pub fn resolve(base: &Path, fragment: &str) -> PathBuf {
    let expanded = shellexpand::tilde(fragment);
    base.join(expanded.as_ref())
}

/// Joins the arguments with single spaces and resolves the result, so that
/// `rm my file.txt` addresses `my file.txt`.
pub fn resolve_joined(base: &Path, fragments: &[String]) -> PathBuf {
    resolve(base, &fragments.join(" "))
}

/// Path of `path` relative to `base`, for display.
///
/// Falls back to `path` unchanged when no relative form exists (for example a
/// relative `path` against an absolute `base`).
pub fn relative_to(base: &Path, path: &Path) -> PathBuf {
    pathdiff::diff_paths(path, base).unwrap_or_else(|| path.to_path_buf())
}

/// Lexically removes `.` and `..` components without touching the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root; on a relative path with
            // nothing left to pop it has to be kept.
            Component::ParentDir => {
                let last = normalized.components().next_back();
                let pops_normal = matches!(last, Some(Component::Normal(_)));
                let at_root = matches!(last, Some(Component::RootDir | Component::Prefix(_)));
                if pops_normal {
                    normalized.pop();
                } else if !at_root {
                    normalized.push("..");
                }
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// True when `candidate` is `base` itself or one of its ancestors, after
/// lexical normalization of both paths.
pub fn is_base_or_ancestor_of(candidate: &Path, base: &Path) -> bool {
    let candidate = normalize(candidate);
    let base = normalize(base);
    base.starts_with(&candidate)
}
