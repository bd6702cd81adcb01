use super::*;
use crate::foundation::error::LessonResult;
use crate::widget::contract::{Interaction, Visualization};

#[derive(Debug)]
struct Blank;

impl Visualization for Blank {
    fn key(&self) -> &'static str {
        "blank"
    }

    fn title(&self) -> &'static str {
        "Blank"
    }

    fn view(&self) -> serde_json::Value {
        serde_json::Value::Null
    }

    fn handle(&mut self, input: &Interaction) -> LessonResult<()> {
        Err(input.unsupported("blank"))
    }
}

fn blank() -> Box<dyn Visualization> {
    Box::new(Blank)
}

fn entry(key: &'static str) -> RegistryEntry {
    RegistryEntry::new(key, "Blank", ConceptFamily::CssBasics, blank)
}

#[test]
fn lookup_is_exact_and_case_sensitive() {
    let reg = VisualizationRegistry::builder()
        .register(entry("blank"))
        .unwrap()
        .build();
    assert!(reg.lookup("blank").is_some());
    assert!(reg.lookup("Blank").is_none());
    assert!(reg.lookup(" blank").is_none());
    assert!(reg.lookup("blan").is_none());
    assert!(reg.lookup("").is_none());
}

#[test]
fn duplicate_and_blank_keys_are_rejected() {
    let err = VisualizationRegistry::builder()
        .register(entry("a"))
        .unwrap()
        .register(entry("a"))
        .unwrap_err();
    assert!(err.to_string().contains("duplicate registry key 'a'"));

    assert!(VisualizationRegistry::builder().register(entry(" ")).is_err());
}

#[test]
fn keys_are_sorted_and_counted() {
    let reg = VisualizationRegistry::builder()
        .register_all([entry("zeta"), entry("alpha"), entry("mid")])
        .unwrap()
        .build();
    assert_eq!(reg.keys().collect::<Vec<_>>(), vec!["alpha", "mid", "zeta"]);
    assert_eq!(reg.len(), 3);
    assert!(reg.contains("mid"));
    assert!(!VisualizationRegistry::default().contains("mid"));
    assert!(VisualizationRegistry::default().is_empty());
}

#[test]
fn factory_builds_fresh_instances() {
    let reg = VisualizationRegistry::builder()
        .register(entry("blank"))
        .unwrap()
        .build();
    let f = reg.lookup("blank").unwrap().factory();
    let a = f();
    let b = f();
    assert_eq!(a.key(), "blank");
    assert_eq!(b.title(), "Blank");
}

#[test]
fn entries_serialize_without_factory() {
    let v = serde_json::to_value(entry("blank")).unwrap();
    assert_eq!(
        v,
        serde_json::json!({ "key": "blank", "title": "Blank", "family": "css_basics" })
    );
}

#[test]
fn family_display_matches_serialized_name() {
    for family in [
        ConceptFamily::CssBasics,
        ConceptFamily::Selectors,
        ConceptFamily::BoxModel,
        ConceptFamily::Layout,
        ConceptFamily::Networking,
    ] {
        assert_eq!(serde_json::json!(family), serde_json::json!(family.to_string()));
    }
}
