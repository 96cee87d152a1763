//! Template context — serializable rendering payload built from [`ReleaseConfig`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shipwright_core::types::ReleaseConfig;

use crate::error::RenderError;

/// Everything the templates can reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseContext {
    /// App identity block (`{{ app.* }}`).
    pub app: AppCtx,
    /// Marketing copy block (`{{ store.* }}`).
    pub store: StoreCtx,
    /// Tool metadata block (`{{ meta.* }}`).
    pub meta: MetaCtx,
}

/// App identity context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppCtx {
    pub package: String,
    pub label: String,
    pub version_code: u32,
    pub version_name: String,
    pub min_sdk: u32,
    pub target_sdk: u32,
    pub permissions: Vec<String>,
}

/// Marketing copy context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreCtx {
    pub tagline: String,
    pub features: Vec<String>,
}

/// Tool metadata context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetaCtx {
    pub tool_version: String,
    pub generated_at: DateTime<Utc>,
}

impl ReleaseContext {
    /// Build a [`ReleaseContext`] from the project config, stamped with the
    /// current time.
    pub fn from_config(config: &ReleaseConfig) -> Self {
        ReleaseContext {
            app: AppCtx {
                package: config.app.package.clone(),
                label: config.app.label.clone(),
                version_code: config.app.version_code,
                version_name: config.app.version_name.clone(),
                min_sdk: config.app.min_sdk,
                target_sdk: config.app.target_sdk,
                permissions: config.app.permissions.clone(),
            },
            store: StoreCtx {
                tagline: config.media.tagline.clone(),
                features: config.media.features.clone(),
            },
            meta: MetaCtx {
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                generated_at: Utc::now(),
            },
        }
    }

    /// Convert into a [`tera::Context`] via JSON.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        let value = serde_json::to_value(self)?;
        Ok(tera::Context::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_mirrors_config_fields() {
        let mut config = ReleaseConfig::default();
        config.app.package = "com.acme.meals".to_string();
        config.media.tagline = "Dinner without the guesswork".to_string();

        let ctx = ReleaseContext::from_config(&config);
        assert_eq!(ctx.app.package, "com.acme.meals");
        assert_eq!(ctx.store.tagline, "Dinner without the guesswork");
        assert_eq!(ctx.app.permissions, config.app.permissions);
        assert!(!ctx.meta.tool_version.is_empty());
    }

    #[test]
    fn context_serializes_for_tera() {
        let ctx = ReleaseContext::from_config(&ReleaseConfig::default());
        let tera_ctx = ctx.to_tera_context().expect("to_tera_context");
        assert!(tera_ctx.contains_key("app"));
        assert!(tera_ctx.contains_key("store"));
        assert!(tera_ctx.contains_key("meta"));
    }
}
