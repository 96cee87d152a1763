//! Text rendering for release artifacts: the Android manifest written into
//! bundle staging trees, the README pushed with mirror snapshots, and the
//! store listing / video script marketing copy.
//!
//! - [`engine`] — [`DocKind`] enum and the Tera-backed [`TemplateEngine`]
//! - [`context`] — [`ReleaseContext`] built from the project config
//! - [`error`] — [`RenderError`]

pub mod context;
pub mod engine;
pub mod error;

pub use context::ReleaseContext;
pub use engine::{engine_for, DocKind, TemplateEngine};
pub use error::RenderError;
