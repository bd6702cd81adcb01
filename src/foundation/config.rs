use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{LessonError, LessonResult};

/// What the viewer puts in place of an embed it cannot mount.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownEmbedPolicy {
    /// Render nothing at the marker position.
    #[default]
    Omit,
    /// Render a visible "unavailable" placeholder at the marker position.
    Placeholder,
}

/// Options for a single render pass.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Policy for unknown, untyped and faulted embeds.
    pub unknown_embeds: UnknownEmbedPolicy,
    /// Text shown inside placeholders when [`UnknownEmbedPolicy::Placeholder`] is active.
    pub placeholder_text: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            unknown_embeds: UnknownEmbedPolicy::Omit,
            placeholder_text: "This visualization is not available.".to_string(),
        }
    }
}

/// Options for authoring-side commands.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AuthoringOptions {
    /// Require inserted type keys to exist in the registry.
    ///
    /// Off by default: authoring and viewing builds are versioned independently and the
    /// viewer already degrades unknown keys to nothing.
    pub validate_keys: bool,
}

/// Top-level configuration file for the viewer and the authoring commands.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Render pass options.
    pub render: RenderOptions,
    /// Authoring command options.
    pub authoring: AuthoringOptions,
}

impl ViewerConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LessonResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| LessonError::validation(format!("parse viewer config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> LessonResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            LessonError::validation(format!("open viewer config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
