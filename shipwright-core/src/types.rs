//! Configuration types.
//!
//! The original release scripts kept the remote URL, exclusion globs, and
//! palette as module-level constants. Here they are plain values: every
//! operation takes the section it needs by reference, and `shipwright.yaml`
//! is the single place they are edited.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// 1. Top-level config
// ---------------------------------------------------------------------------

/// Everything a shipwright project can configure, with usable defaults for
/// every field. Each section is owned by one subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReleaseConfig {
    pub sync: SyncConfig,
    pub app: AppConfig,
    pub bundle: PackagingConfig,
    pub media: MediaConfig,
    pub render: RenderConfig,
}

// ---------------------------------------------------------------------------
// 2. Sync
// ---------------------------------------------------------------------------

/// Remote, identity, and change-detection settings for tree sync.
///
/// Exclusion glob semantics: a pattern ending in `/` matches directory
/// names and prunes the whole subtree; any other pattern matches file
/// names (`*.apk`, `.env`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Push target, e.g. `git@github.com:acme/app-releases.git`.
    /// Empty means "not configured"; sync operations refuse to run.
    pub remote_url: String,
    pub branch: String,
    /// Tried once when a mirror push to `branch` is rejected.
    pub fallback_branch: String,
    /// Commit messages are `<subject> - <timestamp>`.
    pub commit_subject: String,
    pub author_name: String,
    pub author_email: String,
    pub exclude: Vec<String>,
    /// Polling interval for `shipwright watch`.
    pub interval_minutes: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            remote_url: String::new(),
            branch: "main".to_string(),
            fallback_branch: "master".to_string(),
            commit_subject: "Auto-sync release tree".to_string(),
            author_name: "shipwright".to_string(),
            author_email: "shipwright@localhost".to_string(),
            exclude: default_excludes(),
            interval_minutes: 5,
        }
    }
}

/// Globs excluded from digests, mirrors, and archives unless overridden.
pub fn default_excludes() -> Vec<String> {
    [
        "*.keystore",
        "*.jks",
        "*.apk",
        "*.aab",
        "build/",
        "target/",
        ".git/",
        ".shipwright/",
    ]
    .map(String::from)
    .to_vec()
}

// ---------------------------------------------------------------------------
// 3. App identity
// ---------------------------------------------------------------------------

/// Values substituted into the Android manifest and marketing copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub package: String,
    pub label: String,
    pub version_code: u32,
    pub version_name: String,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub permissions: Vec<String>,
}

impl AppConfig {
    /// First letter of the label, drawn on launcher icons. Falls back to
    /// `A` when the label starts with no alphanumeric character.
    pub fn monogram(&self) -> char {
        self.label
            .chars()
            .find(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('A')
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            package: "com.example.app".to_string(),
            label: "Example App".to_string(),
            version_code: 1,
            version_name: "1.0.0".to_string(),
            min_sdk: 24,
            target_sdk: 34,
            permissions: [
                "android.permission.INTERNET",
                "android.permission.ACCESS_NETWORK_STATE",
                "android.permission.CAMERA",
                "com.android.vending.BILLING",
            ]
            .map(String::from)
            .to_vec(),
        }
    }
}

// ---------------------------------------------------------------------------
// 4. Packaging
// ---------------------------------------------------------------------------

/// Staging and output locations for archive assembly. All paths are
/// relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagingConfig {
    /// Checked before assembling; signing happens downstream.
    pub keystore: PathBuf,
    pub staging_dir: PathBuf,
    pub aab_output: PathBuf,
    pub apk_output: PathBuf,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            keystore: PathBuf::from("release.keystore"),
            staging_dir: PathBuf::from("build"),
            aab_output: PathBuf::from("app-release.aab"),
            apk_output: PathBuf::from("app-debug.apk"),
        }
    }
}

// ---------------------------------------------------------------------------
// 5. Media
// ---------------------------------------------------------------------------

/// Palette, copy, and output locations for generated store assets.
/// Colors are `#rrggbb` hex strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Android resource root receiving mipmap/drawable icons.
    pub res_dir: PathBuf,
    /// Store listing material: screenshots, feature graphic, copy.
    pub assets_dir: PathBuf,
    pub background: String,
    pub foreground: String,
    pub accent: String,
    pub muted: String,
    pub tagline: String,
    pub features: Vec<String>,
    pub screenshots: Vec<ScreenshotSpec>,
}

impl Default for MediaConfig {
    fn default() -> Self {
        let features = [
            "Plan your week in seconds",
            "Smart shopping lists",
            "Works offline",
            "Fast and lightweight",
            "Private by default",
        ]
        .map(String::from)
        .to_vec();
        Self {
            res_dir: PathBuf::from("app/src/main/res"),
            assets_dir: PathBuf::from("store-assets"),
            background: "#2d4d3a".to_string(),
            foreground: "#f5f5dc".to_string(),
            accent: "#a8d5ba".to_string(),
            muted: "#d4d4aa".to_string(),
            tagline: "Plan, cook, and shop in one place".to_string(),
            screenshots: vec![
                ScreenshotSpec {
                    title: "Your week, sorted".to_string(),
                    subtitle: "Menus planned for you".to_string(),
                    features: features[..4].to_vec(),
                },
                ScreenshotSpec {
                    title: "Shop once, cook all week".to_string(),
                    subtitle: "Lists built from your plan".to_string(),
                    features: features[1..].to_vec(),
                },
            ],
            features,
        }
    }
}

/// One promotional screenshot: centered heading plus bullet rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScreenshotSpec {
    pub title: String,
    pub subtitle: String,
    pub features: Vec<String>,
}

// ---------------------------------------------------------------------------
// 6. Render
// ---------------------------------------------------------------------------

/// Template overrides. When `templates_dir` is set and exists, `.tera`
/// files inside it shadow the built-in templates by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RenderConfig {
    pub templates_dir: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
