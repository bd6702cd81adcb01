//! Lesson content rendering with embedded interactive visualizations.
//!
//! Lessons are stored as HTML. Authors drop embed markers into that HTML and the viewer swaps
//! each marker for a live teaching widget picked from a registry by its type key.
//!
//! # Pipeline overview
//!
//! 1. **Author**: [`AuthoredDocument`] + [`EmbedInserter`] place canonical markers in content.
//! 2. **Parse**: lesson HTML is parsed as a body fragment by an HTML5 parser (malformed input is
//!    repaired, never rejected).
//! 3. **Rewrite**: [`render`] walks the tree, mounts a widget for every marker whose key the
//!    [`VisualizationRegistry`] resolves, and drops the rest.
//! 4. **Interact**: hosts forward [`Interaction`]s and clock ticks to each
//!    [`MountedVisualization`] and unmount the tree when navigating away.
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Never fail a page**: unknown keys, missing keys and panicking widgets only remove their
//!   own embed; everything else renders.
//! - **Deterministic**: the same content and registry always produce the same tree.
//! - **Explicit time**: widgets never read a wall clock; hosts drive them with `tick`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod authoring;
mod content;
mod foundation;
mod registry;
mod render;
mod widget;
mod widgets;

pub use authoring::document::{AuthoredDocument, Block};
pub use authoring::inserter::EmbedInserter;
pub use content::dom::{
    ElementNode, INSTANCE_ATTR, MOUNT_ATTR, OutlineEntry, PLACEHOLDER_CLASS, Placeholder,
    RenderedNode, RenderedTree,
};
pub use content::lesson::{Lesson, LessonContent};
pub use content::marker::{
    EMBED_DISCRIMINATOR, EmbedMarker, LEGACY_TYPE_ATTR, MARKER_TAG, MarkerMatch, TYPE_ATTR,
    classify,
};
pub use foundation::config::{AuthoringOptions, RenderOptions, UnknownEmbedPolicy, ViewerConfig};
pub use foundation::error::{LessonError, LessonResult};
pub use registry::builtin::STANDARD_ENTRIES;
pub use registry::table::{ConceptFamily, RegistryBuilder, RegistryEntry, VisualizationRegistry};
pub use render::report::{FaultedEmbed, MountRecord, RenderReport, UnknownEmbed};
pub use render::rewriter::{RenderOutput, render};
pub use widget::contract::{
    Interaction, MountState, MountedVisualization, Visualization, WidgetFactory,
};
pub use widget::sequence::StagedSequence;
pub use widgets::box_model::{BoxModel, KEY as BOX_MODEL_KEY};
pub use widgets::css_intro::{CssIntro, KEY as CSS_INTRO_KEY};
pub use widgets::flexbox::{Flexbox, KEY as FLEXBOX_KEY};
pub use widgets::request_flow::{
    KEY as REQUEST_FLOW_KEY, PHASE_DELAY, RequestFlow, RequestPhase,
};
pub use widgets::specificity::{
    KEY as SPECIFICITY_KEY, MAX_SELECTOR_NESTING, Specificity, SpecificityCalculator,
    selector_list_specificity,
};
