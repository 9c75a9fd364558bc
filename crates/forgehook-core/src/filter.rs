//! Change filter: decides whether a set of changed paths warrants a build.

/// Extensions that trigger a build. Leading dot included, matched against
/// the extension of the path's final segment.
pub const TRACKED_EXTENSIONS: &[&str] = &[".pyo", ".npy", ".py"];

/// File names that trigger a build. Matched verbatim against the path's
/// final segment; both capitalizations are deliberate literals, not a
/// case-insensitive match.
pub const TRACKED_FILE_NAMES: &[&str] = &["DockerFile", "Dockerfile"];

/// One changed file between two commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Repository-relative path after the change.
    pub path: String,
    /// Blob id of the file content after the change.
    pub blob_id: String,
}

/// True iff at least one changed path matches the tracked extensions or
/// file names. Pure and order-independent; the first match decides.
pub fn should_trigger_build(changes: &[FileChange]) -> bool {
    changes.iter().any(|change| matches_tracked(&change.path))
}

/// True if the path's extension or base name is on the allow-lists.
pub fn matches_tracked(path: &str) -> bool {
    let name = base_name(path);
    if TRACKED_FILE_NAMES.contains(&name) {
        return true;
    }
    match file_extension(name) {
        Some(ext) => TRACKED_EXTENSIONS.contains(&ext),
        None => false,
    }
}

/// Final path segment.
fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Extension of a file name: the final `.` and everything after it.
/// Leading dots are not extension separators, so `.bashrc` has none.
fn file_extension(name: &str) -> Option<&str> {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    name[stem_start..]
        .rfind('.')
        .map(|dot| &name[stem_start + dot..])
}
