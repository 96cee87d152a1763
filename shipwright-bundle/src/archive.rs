//! Zip packing.
//!
//! Entry names are forward-slash paths relative to the staging root, added
//! in sorted order and deflate-compressed. Directories are never written
//! as entries.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{io_err, BundleError};

/// Where an archive landed and what went into it.
#[derive(Debug, Clone)]
pub struct ArchiveSummary {
    pub path: PathBuf,
    /// Entry names in archive order (sorted).
    pub entries: Vec<String>,
    pub bytes: u64,
}

impl ArchiveSummary {
    /// Archive size in KB with one decimal, as reported to users.
    pub fn size_kb(&self) -> f64 {
        (self.bytes as f64 / 1024.0 * 10.0).round() / 10.0
    }
}

/// Pack every file under `staging` into a zip archive at `output`.
pub fn pack_dir(staging: &Path, output: &Path) -> Result<ArchiveSummary, BundleError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(staging).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            let rel = entry
                .path()
                .strip_prefix(staging)
                .unwrap_or(entry.path())
                .to_path_buf();
            files.push(rel);
        }
    }
    files.sort();

    let file = File::create(output).map_err(|e| io_err(output, e))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = Vec::with_capacity(files.len());
    for rel in &files {
        let name = rel.to_string_lossy().replace('\\', "/");
        zip.start_file(name.as_str(), options)?;
        let src = staging.join(rel);
        let mut reader = File::open(&src).map_err(|e| io_err(&src, e))?;
        io::copy(&mut reader, &mut zip).map_err(|e| io_err(&src, e))?;
        entries.push(name);
    }
    zip.finish()?;

    let bytes = std::fs::metadata(output).map_err(|e| io_err(output, e))?.len();
    Ok(ArchiveSummary {
        path: output.to_path_buf(),
        entries,
        bytes,
    })
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
