//! Content digest of the working tree.
//!
//! Exclusion globs prune the walk; included files are hashed in sorted
//! relative-path order, each contributing its relative path bytes followed
//! by its content in 8 KiB chunks. Traversal order, creation order, and
//! mtimes never affect the digest. A rename does: the path is part of the
//! fingerprint.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::error::{io_err, SyncError};

const CHUNK: usize = 8 * 1024;

// ---------------------------------------------------------------------------
// Exclusion globs
// ---------------------------------------------------------------------------

/// Compiled exclusion globs, split at construction: a pattern ending in `/`
/// matches directory names and prunes the whole subtree; any other pattern
/// matches file names.
#[derive(Debug, Clone)]
pub struct ExcludeSet {
    dir_patterns: Vec<glob::Pattern>,
    file_patterns: Vec<glob::Pattern>,
}

impl ExcludeSet {
    pub fn new(patterns: &[String]) -> Result<Self, SyncError> {
        let mut dir_patterns = Vec::new();
        let mut file_patterns = Vec::new();
        for raw in patterns {
            if let Some(dir) = raw.strip_suffix('/') {
                dir_patterns.push(compile(raw, dir)?);
            } else {
                file_patterns.push(compile(raw, raw)?);
            }
        }
        Ok(ExcludeSet {
            dir_patterns,
            file_patterns,
        })
    }

    pub fn excludes_dir(&self, name: &str) -> bool {
        self.dir_patterns.iter().any(|p| p.matches(name))
    }

    pub fn excludes_file(&self, name: &str) -> bool {
        self.file_patterns.iter().any(|p| p.matches(name))
    }
}

fn compile(raw: &str, pattern: &str) -> Result<glob::Pattern, SyncError> {
    glob::Pattern::new(pattern).map_err(|e| SyncError::Pattern {
        pattern: raw.to_string(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Walk
// ---------------------------------------------------------------------------

/// Every included file under `root`, as sorted root-relative paths.
///
/// Symlinks are not followed; directories themselves are never listed.
pub fn included_files(root: &Path, excludes: &ExcludeSet) -> Result<Vec<PathBuf>, SyncError> {
    let walker = WalkDir::new(root).follow_links(false).into_iter();
    let mut files = Vec::new();
    for entry in walker.filter_entry(|e| {
        if e.depth() == 0 || !e.file_type().is_dir() {
            return true;
        }
        !excludes.excludes_dir(&e.file_name().to_string_lossy())
    }) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if excludes.excludes_file(&entry.file_name().to_string_lossy()) {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();
        files.push(rel);
    }
    files.sort();
    Ok(files)
}

// ---------------------------------------------------------------------------
// Digest
// ---------------------------------------------------------------------------

/// SHA-256 over every included file's relative path and content, hex-encoded.
pub fn tree_digest(root: &Path, excludes: &ExcludeSet) -> Result<String, SyncError> {
    let mut hasher = Sha256::new();
    for rel in included_files(root, excludes)? {
        // Forward slashes so the digest matches across platforms.
        let name = rel.to_string_lossy().replace('\\', "/");
        hasher.update(name.as_bytes());

        let path = root.join(&rel);
        let mut file = File::open(&path).map_err(|e| io_err(&path, e))?;
        let mut buf = [0u8; CHUNK];
        loop {
            let n = file.read(&mut buf).map_err(|e| io_err(&path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
    }
    Ok(hex::encode(hasher.finalize()))
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use shipwright_core::types::default_excludes;
    use tempfile::TempDir;

    fn excludes() -> ExcludeSet {
        ExcludeSet::new(&default_excludes()).expect("default excludes compile")
    }

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("mkdir");
        }
        std::fs::write(path, contents).expect("write");
    }

    #[rstest]
    #[case("*.keystore", "release.keystore", true)]
    #[case("*.keystore", "keystore.txt", false)]
    #[case("*.aab", "app-release.aab", true)]
    #[case(".env", ".env", true)]
    #[case(".env", ".env.sample", false)]
    fn file_patterns_match_file_names(
        #[case] pattern: &str,
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        let set = ExcludeSet::new(&[pattern.to_string()]).expect("compile");
        assert_eq!(set.excludes_file(name), expected);
        assert!(!set.excludes_dir(name), "file pattern must not prune dirs");
    }

    #[rstest]
    #[case("build/", "build", true)]
    #[case("build/", "built", false)]
    #[case(".git/", ".git", true)]
    #[case("node_*/", "node_modules", true)]
    fn dir_patterns_match_dir_names(
        #[case] pattern: &str,
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        let set = ExcludeSet::new(&[pattern.to_string()]).expect("compile");
        assert_eq!(set.excludes_dir(name), expected);
        assert!(!set.excludes_file(name), "dir pattern must not match files");
    }

    #[test]
    fn bad_pattern_reports_the_original_text() {
        let err = ExcludeSet::new(&["[".to_string()]).unwrap_err();
        match err {
            SyncError::Pattern { pattern, .. } => assert_eq!(pattern, "["),
            other => panic!("expected Pattern, got {other:?}"),
        }
    }

    #[test]
    fn digest_is_independent_of_creation_order() {
        let a = TempDir::new().expect("tempdir");
        write(a.path(), "src/main.rs", "fn main() {}");
        write(a.path(), "assets/logo.txt", "logo");
        write(a.path(), "zz.txt", "last");

        let b = TempDir::new().expect("tempdir");
        write(b.path(), "zz.txt", "last");
        write(b.path(), "assets/logo.txt", "logo");
        write(b.path(), "src/main.rs", "fn main() {}");

        let ex = excludes();
        assert_eq!(
            tree_digest(a.path(), &ex).unwrap(),
            tree_digest(b.path(), &ex).unwrap()
        );
    }

    #[test]
    fn digest_ignores_mtime_changes() {
        let root = TempDir::new().expect("tempdir");
        write(root.path(), "notes.txt", "unchanged");
        let ex = excludes();
        let before = tree_digest(root.path(), &ex).unwrap();

        filetime::set_file_mtime(
            root.path().join("notes.txt"),
            filetime::FileTime::from_unix_time(946_684_800, 0),
        )
        .expect("set mtime");

        assert_eq!(before, tree_digest(root.path(), &ex).unwrap());
    }

    #[test]
    fn digest_tracks_content_and_renames() {
        let root = TempDir::new().expect("tempdir");
        write(root.path(), "a.txt", "one");
        let ex = excludes();
        let original = tree_digest(root.path(), &ex).unwrap();

        write(root.path(), "a.txt", "two");
        let edited = tree_digest(root.path(), &ex).unwrap();
        assert_ne!(original, edited);

        std::fs::rename(root.path().join("a.txt"), root.path().join("b.txt"))
            .expect("rename");
        let renamed = tree_digest(root.path(), &ex).unwrap();
        assert_ne!(edited, renamed);
    }

    #[test]
    fn excluded_paths_never_reach_the_digest() {
        let root = TempDir::new().expect("tempdir");
        write(root.path(), "src/lib.rs", "pub fn f() {}");
        let ex = excludes();
        let baseline = tree_digest(root.path(), &ex).unwrap();

        write(root.path(), "build/out.bin", "artifact");
        write(root.path(), "release.keystore", "secret");
        write(root.path(), ".git/HEAD", "ref: refs/heads/main");
        write(root.path(), "app-release.aab", "zip bytes");

        assert_eq!(baseline, tree_digest(root.path(), &ex).unwrap());

        let listed = included_files(root.path(), &ex).unwrap();
        assert_eq!(listed, vec![PathBuf::from("src/lib.rs")]);
    }

    #[test]
    fn digest_of_empty_tree_is_stable() {
        let a = TempDir::new().expect("tempdir");
        let b = TempDir::new().expect("tempdir");
        let ex = excludes();
        assert_eq!(
            tree_digest(a.path(), &ex).unwrap(),
            tree_digest(b.path(), &ex).unwrap()
        );
    }
}
