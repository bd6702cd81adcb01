use scraper::node::Node;
use scraper::{ElementRef, Html};

use crate::content::dom::escape_text;
use crate::content::marker::{EmbedMarker, MarkerMatch, classify};

/// One top-level block of an authored lesson.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Authored rich text, stored as HTML.
    Markup(String),
    /// An embed marker.
    Embed(EmbedMarker),
}

/// The editor's view of a lesson body: an ordered list of blocks.
///
/// Cursor positions are block boundaries: `0` is before the first block and `len()` after the
/// last one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthoredDocument {
    blocks: Vec<Block>,
}

impl AuthoredDocument {
    /// An empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load stored lesson content.
    ///
    /// Top-level markers become [`Block::Embed`] with their attributes kept in source order, so
    /// saving the document again writes them back in the same shape.
    pub fn from_html(html: &str) -> Self {
        let parsed = Html::parse_fragment(html);
        let mut doc = Self::new();
        for child in parsed.root_element().children() {
            match child.value() {
                Node::Element(e) => {
                    let Some(el) = ElementRef::wrap(child) else {
                        continue;
                    };
                    match classify(e.name(), e.attrs()) {
                        MarkerMatch::Marker(m) => doc.blocks.push(Block::Embed(m)),
                        MarkerMatch::NotMarker | MarkerMatch::Untyped => {
                            doc.blocks.push(Block::Markup(el.html()));
                        }
                    }
                }
                Node::Text(t) => {
                    let s: &str = &t.text;
                    doc.append_inline(&escape_text(s));
                }
                Node::Comment(c) => {
                    let s: &str = &c.comment;
                    doc.append_inline(&format!("<!--{s}-->"));
                }
                _ => {}
            }
        }
        doc
    }

    /// Inline leftovers (text, comments) stick to the preceding markup block.
    fn append_inline(&mut self, html: &str) {
        match self.blocks.last_mut() {
            Some(Block::Markup(prev)) => prev.push_str(html),
            _ => self.blocks.push(Block::Markup(html.to_string())),
        }
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Append a markup block.
    pub fn push_markup(&mut self, html: impl Into<String>) {
        self.blocks.push(Block::Markup(html.into()));
    }

    /// Top-level embed markers in document order.
    pub fn embeds(&self) -> impl Iterator<Item = &EmbedMarker> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Embed(m) => Some(m),
            Block::Markup(_) => None,
        })
    }

    pub(crate) fn insert_block(&mut self, cursor: usize, block: Block) {
        self.blocks.insert(cursor, block);
    }

    /// Serialize the document for storage.
    pub fn to_html(&self) -> String {
        self.blocks
            .iter()
            .map(|b| match b {
                Block::Markup(s) => s.clone(),
                Block::Embed(m) => m.to_html(),
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/authoring/document.rs"]
mod tests;
