use super::*;
use std::collections::BTreeSet;

#[test]
fn standard_entries_have_unique_keys() {
    let keys: BTreeSet<_> = STANDARD_ENTRIES.iter().map(|e| e.key).collect();
    assert_eq!(keys.len(), STANDARD_ENTRIES.len());
    assert_eq!(VisualizationRegistry::standard().len(), STANDARD_ENTRIES.len());
}

#[test]
fn every_standard_widget_mounts_with_zero_props() {
    for entry in STANDARD_ENTRIES {
        let w = (entry.factory())();
        assert_eq!(w.key(), entry.key, "widget key must match its registry key");
        assert_eq!(w.title(), entry.title);
        assert!(w.view().is_object());
    }
}

#[test]
fn standard_registry_is_shared() {
    let a = VisualizationRegistry::standard() as *const _;
    let b = VisualizationRegistry::standard() as *const _;
    assert_eq!(a, b);
    assert!(VisualizationRegistry::standard().contains("css-intro-visualization"));
    assert!(VisualizationRegistry::standard().contains("flexbox-visualizer"));
}
