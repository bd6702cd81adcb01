use crate::authoring::document::{AuthoredDocument, Block};
use crate::content::marker::EmbedMarker;
use crate::foundation::config::AuthoringOptions;
use crate::foundation::error::{LessonError, LessonResult};
use crate::registry::table::VisualizationRegistry;

/// The editor's "insert visualization" command.
#[derive(Clone, Debug)]
pub struct EmbedInserter<'a> {
    registry: &'a VisualizationRegistry,
    opts: AuthoringOptions,
}

impl<'a> EmbedInserter<'a> {
    /// Inserter checking keys against `registry` when `opts.validate_keys` is set.
    pub fn new(registry: &'a VisualizationRegistry, opts: AuthoringOptions) -> Self {
        Self { registry, opts }
    }

    /// Insert a canonical marker for `type_key` at `cursor`.
    ///
    /// The key is trimmed and must be non-empty. Keys this build does not know are accepted
    /// unless validation is enabled; they render as missing embeds until a widget ships for
    /// them.
    #[tracing::instrument(skip(self, doc), fields(len = doc.len()))]
    pub fn insert(
        &self,
        doc: &mut AuthoredDocument,
        cursor: usize,
        type_key: &str,
    ) -> LessonResult<()> {
        let key = type_key.trim();
        if key.is_empty() {
            return Err(LessonError::validation(
                "visualization type must be non-empty",
            ));
        }
        if cursor > doc.len() {
            return Err(LessonError::validation(format!(
                "cursor {cursor} is past the end of the document ({} blocks)",
                doc.len()
            )));
        }
        if !self.registry.contains(key) {
            if self.opts.validate_keys {
                return Err(LessonError::validation(format!(
                    "unknown visualization type \"{key}\""
                )));
            }
            tracing::info!(type_key = key, "inserting a key with no registered widget");
        }

        doc.insert_block(cursor, Block::Embed(EmbedMarker::canonical(key)?));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/authoring/inserter.rs"]
mod tests;
