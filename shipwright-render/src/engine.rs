//! Tera rendering engine — [`DocKind`] enum and [`TemplateEngine`].
//!
//! # Document mapping
//!
//! | Document     | Template                     | Conventional file name |
//! |--------------|------------------------------|------------------------|
//! | Manifest     | `android/manifest.xml.tera`  | `AndroidManifest.xml`  |
//! | MirrorReadme | `mirror/readme.md.tera`      | `README.md`            |
//! | StoreListing | `store/listing.md.tera`      | `store_listing.md`     |
//! | VideoScript  | `store/video_script.txt.tera`| `video_script.txt`     |

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use crate::context::ReleaseContext;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Embedded templates — baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[
    (
        "android/manifest.xml.tera",
        include_str!("templates/manifest.xml.tera"),
    ),
    ("mirror/readme.md.tera", include_str!("templates/readme.md.tera")),
    ("store/listing.md.tera", include_str!("templates/listing.md.tera")),
    (
        "store/video_script.txt.tera",
        include_str!("templates/video_script.txt.tera"),
    ),
];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/").to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_override_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(override_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert(
            normalize_template_name(Path::new(name)),
            (*content).to_string(),
        );
    }
    if let Some(dir) = override_dir {
        for (name, content) in load_override_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// DocKind
// ---------------------------------------------------------------------------

/// All documents the toolkit renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocKind {
    Manifest,
    MirrorReadme,
    StoreListing,
    VideoScript,
}

impl DocKind {
    /// All document variants in a stable order.
    pub fn all() -> &'static [DocKind] {
        &[
            DocKind::Manifest,
            DocKind::MirrorReadme,
            DocKind::StoreListing,
            DocKind::VideoScript,
        ]
    }

    /// Template name to render for this document.
    pub fn template_name(&self) -> &'static str {
        match self {
            DocKind::Manifest => "android/manifest.xml.tera",
            DocKind::MirrorReadme => "mirror/readme.md.tera",
            DocKind::StoreListing => "store/listing.md.tera",
            DocKind::VideoScript => "store/video_script.txt.tera",
        }
    }

    /// File name the rendered document is conventionally written to.
    /// Callers choose the directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            DocKind::Manifest => "AndroidManifest.xml",
            DocKind::MirrorReadme => "README.md",
            DocKind::StoreListing => "store_listing.md",
            DocKind::VideoScript => "video_script.txt",
        }
    }
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering documents with optional overrides.
///
/// `override_dir` may contain `.tera` files that shadow embedded defaults.
/// Template names are normalised to lowercase relative paths, so an override
/// for the store listing lives at `<override_dir>/store/listing.md.tera`.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`], loading embedded templates plus
    /// any overrides found in `override_dir`.
    pub fn new(override_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(override_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Render one document using the supplied context.
    pub fn render(&self, kind: DocKind, ctx: &ReleaseContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        Ok(self.tera.render(kind.template_name(), &tera_ctx)?)
    }
}

/// Engine for a project: embedded templates plus overrides from
/// `render.templates_dir`, resolved against `root` when relative.
pub fn engine_for(
    root: &Path,
    config: &shipwright_core::types::ReleaseConfig,
) -> Result<TemplateEngine, RenderError> {
    let dir = config.render.templates_dir.as_ref().map(|d| {
        if d.is_absolute() {
            d.clone()
        } else {
            root.join(d)
        }
    });
    TemplateEngine::new(dir.as_deref())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
