use crate::foundation::error::{LessonError, LessonResult};

/// The stored HTML body of one lesson.
///
/// Opaque to everything except the rewriter; it is carried verbatim between the authoring tool,
/// the API and the viewer.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct LessonContent(String);

impl LessonContent {
    /// Wrap an HTML string.
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    /// Borrow the raw HTML.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Take the raw HTML.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for LessonContent {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LessonContent {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A lesson as returned by the lesson-fetch API.
///
/// Only `content` matters to rendering; the remaining fields are informational and default when
/// the API leaves them out.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Lesson {
    /// Lesson identifier.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// URL slug.
    #[serde(default)]
    pub slug: Option<String>,
    /// Position within its course part.
    #[serde(default)]
    pub order: Option<u32>,
    /// Stored HTML body.
    pub content: LessonContent,
}

impl Lesson {
    /// Parse a lesson-fetch API response body.
    pub fn from_json(s: &str) -> LessonResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| LessonError::validation(format!("parse lesson JSON: {e}")))
    }

    /// Parse a lesson-fetch API response from a reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> LessonResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| LessonError::validation(format!("parse lesson JSON: {e}")))
    }

    /// Encode the lesson back into pretty-printed JSON, e.g. after an authoring edit.
    pub fn to_json_pretty(&self) -> LessonResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| LessonError::serde(format!("encode lesson JSON: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/content/lesson.rs"]
mod tests;
