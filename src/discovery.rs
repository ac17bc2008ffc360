// src/discovery.rs
//! Loads submissions from disk.
//!
//! Every regular file under the root is one submission. A file inside a
//! first-level directory belongs to the submitter named by that directory
//! (`root/alice/lab1.py`); a file directly under the root belongs to the
//! submitter named by its stem (`root/alice.py`).

use crate::error::{CodematchError, Result};
use crate::similarity::Submission;
use std::fs;
use std::path::{Component, Path};
use walkdir::{DirEntry, WalkDir};

/// Walks `root` and loads every submission in path order.
///
/// # Errors
/// Returns error if the walk fails or `root` holds no readable submissions.
pub fn discover(root: &Path) -> Result<Vec<Submission>> {
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    let mut submissions = Vec::new();
    let mut skipped = 0usize;
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        match load_entry(root, entry.path()) {
            Ok(Some(submission)) => submissions.push(submission),
            Ok(None) => skipped += 1,
            Err(e) => return Err(e),
        }
    }

    if skipped > 0 {
        tracing::warn!(skipped, root = %root.display(), "skipped non UTF-8 files");
    }
    if submissions.is_empty() {
        return Err(CodematchError::EmptyCohort(root.to_path_buf()));
    }
    tracing::debug!(count = submissions.len(), "submissions discovered");
    Ok(submissions)
}

/// Loads one file as a submission owned by its stem.
///
/// # Errors
/// Returns error if the file cannot be read or is not UTF-8.
pub fn load_file(path: &Path) -> Result<Submission> {
    let code = read_source(path)?.ok_or_else(|| CodematchError::NonUtf8(path.to_path_buf()))?;
    let mut submission = Submission::new(path.display().to_string(), file_stem(path), code);
    submission.submitted_at = modified_time(path);
    Ok(submission)
}

fn load_entry(root: &Path, path: &Path) -> Result<Option<Submission>> {
    let Some(code) = read_source(path)? else {
        return Ok(None);
    };
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut submission = Submission::new(
        submission_id(relative),
        submitter_of(relative),
        code,
    );
    submission.submitted_at = modified_time(path);
    Ok(Some(submission))
}

/// Reads a file, returning `None` when it is not UTF-8.
fn read_source(path: &Path) -> Result<Option<String>> {
    let bytes = fs::read(path).map_err(|source| CodematchError::Io {
        source,
        path: path.to_path_buf(),
    })?;
    Ok(String::from_utf8(bytes).ok())
}

/// Submitter for a path relative to the root.
#[must_use]
pub fn submitter_of(relative: &Path) -> String {
    let mut components = relative.components().filter_map(|c| match c {
        Component::Normal(part) => Some(part),
        _ => None,
    });
    match (components.next(), components.next()) {
        (Some(dir), Some(_)) => dir.to_string_lossy().into_owned(),
        _ => file_stem(relative),
    }
}

/// Submission id: the relative path with `/` separators.
#[must_use]
pub fn submission_id(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

fn modified_time(path: &Path) -> Option<std::time::SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
