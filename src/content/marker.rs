//! The in-band embed marker convention.
//!
//! A marker is an ordinary HTML element, so any HTML parser can walk lesson content without
//! special-casing it. The shape is a wire contract shared with every stored lesson:
//!
//! ```html
//! <div class="visualization-embed" data-type="flexbox-visualizer"></div>
//! ```
//!
//! The discriminator is the `visualization-embed` class token (or a `role` attribute with the
//! same value). The registry key lives in `data-type`; a bare `type` attribute is read when
//! `data-type` is absent or blank. Every other attribute is cosmetic and is carried through verbatim.

use crate::content::dom::VOID_ELEMENTS;
use crate::foundation::error::{LessonError, LessonResult};

/// Discriminator value identifying an embed marker.
pub const EMBED_DISCRIMINATOR: &str = "visualization-embed";
/// Canonical attribute carrying the registry key.
pub const TYPE_ATTR: &str = "data-type";
/// Accepted alternative key carrier, read only when [`TYPE_ATTR`] is absent or blank.
pub const LEGACY_TYPE_ATTR: &str = "type";
/// Tag used when serializing a freshly inserted marker.
pub const MARKER_TAG: &str = "div";

/// An embed marker lifted out of lesson content.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmbedMarker {
    /// Registry key, exactly as stored (no trimming or case folding).
    pub type_key: String,
    /// Element tag the marker was stored with.
    pub tag: String,
    /// All attributes in source order, including the discriminator and the key.
    pub attrs: Vec<(String, String)>,
}

/// Result of inspecting one element against the marker convention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkerMatch {
    /// Ordinary content.
    NotMarker,
    /// Discriminator and a non-blank type key are both present.
    Marker(EmbedMarker),
    /// Discriminator present but the type key is missing or blank.
    Untyped,
}

impl EmbedMarker {
    /// Build a marker in canonical shape for `type_key`.
    pub fn canonical(type_key: impl Into<String>) -> LessonResult<Self> {
        let type_key = type_key.into();
        if type_key.trim().is_empty() {
            return Err(LessonError::marker("embed type key must be non-empty"));
        }
        Ok(Self {
            attrs: vec![
                ("class".to_string(), EMBED_DISCRIMINATOR.to_string()),
                (TYPE_ATTR.to_string(), type_key.clone()),
            ],
            tag: MARKER_TAG.to_string(),
            type_key,
        })
    }

    /// Serialize the marker back into HTML, preserving tag and attribute order.
    ///
    /// Markers are atomic: whatever scaffolding the editor placed inside is not written back.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        crate::content::dom::write_start_tag(&mut out, &self.tag, &self.attrs);
        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return out;
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
        out
    }
}

/// Check whether an element (by tag and attributes) is an embed marker.
pub fn classify<'a, I>(tag: &str, attrs: I) -> MarkerMatch
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let attrs: Vec<(&str, &str)> = attrs.into_iter().collect();
    if !has_discriminator(&attrs) {
        return MarkerMatch::NotMarker;
    }

    let non_blank = |name| attr(&attrs, name).filter(|k| !k.trim().is_empty());
    match non_blank(TYPE_ATTR).or_else(|| non_blank(LEGACY_TYPE_ATTR)) {
        Some(k) => MarkerMatch::Marker(EmbedMarker {
            type_key: k.to_string(),
            tag: tag.to_string(),
            attrs: attrs
                .iter()
                .map(|(n, v)| ((*n).to_string(), (*v).to_string()))
                .collect(),
        }),
        _ => MarkerMatch::Untyped,
    }
}

fn has_discriminator(attrs: &[(&str, &str)]) -> bool {
    let class_hit = attr(attrs, "class")
        .is_some_and(|c| c.split_ascii_whitespace().any(|t| t == EMBED_DISCRIMINATOR));
    class_hit || attr(attrs, "role").is_some_and(|r| r.trim() == EMBED_DISCRIMINATOR)
}

fn attr<'a>(attrs: &[(&'a str, &'a str)], name: &str) -> Option<&'a str> {
    attrs.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

#[cfg(test)]
#[path = "../../tests/unit/content/marker.rs"]
mod tests;
