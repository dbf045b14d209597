use crate::constants::{
    API_KEY_ENV, API_KEY_FALLBACK_ENV, DEFAULT_ANALYSIS_MODEL, DEFAULT_API_BASE,
    DEFAULT_RENDER_MODEL,
};
use crate::error::{RenderError, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    pub api_base: String,
    pub render_model: String,
    pub analysis_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            render_model: DEFAULT_RENDER_MODEL.to_string(),
            analysis_model: DEFAULT_ANALYSIS_MODEL.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source. Blank values count as unset,
    /// so an empty `API_KEY` still falls through to `GEMINI_API_KEY`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(key) = [API_KEY_ENV, API_KEY_FALLBACK_ENV]
            .iter()
            .find_map(|name| var(*name))
        {
            config = config.with_api_key(key.trim());
        }
        if let Some(base) = var("GEMINI_API_BASE") {
            config = config.with_api_base(base);
        }
        if let Some(model) = var("PRODSHOT_RENDER_MODEL") {
            config = config.with_render_model(model);
        }
        if let Some(model) = var("PRODSHOT_ANALYSIS_MODEL") {
            config = config.with_analysis_model(model);
        }
        config
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_render_model(mut self, model: impl Into<String>) -> Self {
        self.render_model = model.into();
        self
    }

    pub fn with_analysis_model(mut self, model: impl Into<String>) -> Self {
        self.analysis_model = model.into();
        self
    }

    /// Fails before anything touches the network when no key is configured.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            RenderError::Configuration(format!(
                "API key is missing. Please set the {} (or {}) environment variable.",
                API_KEY_ENV, API_KEY_FALLBACK_ENV
            ))
        })
    }
}
