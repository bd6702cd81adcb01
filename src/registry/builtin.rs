use std::sync::OnceLock;

use crate::registry::table::{ConceptFamily, RegistryEntry, VisualizationRegistry};
use crate::widgets::{box_model, css_intro, flexbox, request_flow, specificity};

/// The built-in vocabulary, shared with the authoring tool.
pub const STANDARD_ENTRIES: &[RegistryEntry] = &[
    RegistryEntry::new(
        css_intro::KEY,
        "Introduction to CSS",
        ConceptFamily::CssBasics,
        css_intro::CssIntro::create,
    ),
    RegistryEntry::new(
        specificity::KEY,
        "Selector Specificity",
        ConceptFamily::Selectors,
        specificity::SpecificityCalculator::create,
    ),
    RegistryEntry::new(
        box_model::KEY,
        "The CSS Box Model",
        ConceptFamily::BoxModel,
        box_model::BoxModel::create,
    ),
    RegistryEntry::new(
        flexbox::KEY,
        "Flexbox Visualizer",
        ConceptFamily::Layout,
        flexbox::Flexbox::create,
    ),
    RegistryEntry::new(
        request_flow::KEY,
        "How an HTTP Request Travels",
        ConceptFamily::Networking,
        request_flow::RequestFlow::create,
    ),
];

static STANDARD: OnceLock<VisualizationRegistry> = OnceLock::new();

impl VisualizationRegistry {
    /// The process-wide built-in registry, populated on first use and read-only afterwards.
    pub fn standard() -> &'static VisualizationRegistry {
        STANDARD.get_or_init(|| {
            match VisualizationRegistry::builder().register_all(STANDARD_ENTRIES.iter().copied()) {
                Ok(b) => b.build(),
                Err(e) => {
                    // Only reachable with a duplicate in STANDARD_ENTRIES, which tests reject.
                    tracing::error!(error = %e, "invalid built-in registry");
                    VisualizationRegistry::default()
                }
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/builtin.rs"]
mod tests;
