//! Engine configuration.
//!
//! [`Config`] is plain data and deserializes with serde, so embedding
//! applications can load it from their own configuration files. Resolver
//! bindings are not part of it; those are injected when constructing the
//! renderer or extractor that needs them.

use serde::Deserialize;

/// Output mode selector.
///
/// Only the HTML renderers are implemented; `Email` and `Plain` are
/// declared as pass-through extension points and currently produce the
/// HTML rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RenderProfile {
    #[default]
    Html,
    Email,
    Plain,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render profile used by `convert` and the renderer constructors.
    pub profile: RenderProfile,
    /// Reading-speed divisor for the computed `readingTime` fact.
    pub words_per_minute: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: RenderProfile::default(),
            words_per_minute: 200,
        }
    }
}

#[derive(Default, Clone)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn profile(mut self, profile: RenderProfile) -> Self {
        self.config.profile = profile;
        self
    }

    pub fn words_per_minute(mut self, wpm: u32) -> Self {
        self.config.words_per_minute = wpm;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
