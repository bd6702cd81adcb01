use super::*;

#[test]
fn minimal_response_needs_only_content() {
    let lesson = Lesson::from_json(r#"{ "content": "<p>Hi</p>" }"#).unwrap();
    assert_eq!(lesson.content.as_str(), "<p>Hi</p>");
    assert!(lesson.title.is_empty());
    assert!(lesson.id.is_none());
}

#[test]
fn full_response_keeps_metadata() {
    let s = r#"{
        "id": 42,
        "title": "Flexbox",
        "slug": "flexbox",
        "order": 3,
        "content": "<div class=\"visualization-embed\" data-type=\"flexbox-visualizer\"></div>"
    }"#;
    let lesson = Lesson::from_json(s).unwrap();
    assert_eq!(lesson.id, Some(serde_json::json!(42)));
    assert_eq!(lesson.order, Some(3));
    assert!(lesson.content.as_str().contains("flexbox-visualizer"));
}

#[test]
fn missing_content_is_rejected() {
    let err = Lesson::from_json(r#"{ "title": "x" }"#).unwrap_err();
    assert!(err.to_string().contains("validation error:"));
}

#[test]
fn content_serializes_as_plain_string() {
    let v = serde_json::to_value(LessonContent::new("<p>x</p>")).unwrap();
    assert_eq!(v, serde_json::json!("<p>x</p>"));
}

#[test]
fn edited_lesson_encodes_back_to_json() {
    let mut lesson = Lesson::from_json(r#"{ "id": "a1", "title": "T", "content": "<p>x</p>" }"#).unwrap();
    lesson.content = LessonContent::new("<p>y</p>");
    let again = Lesson::from_json(&lesson.to_json_pretty().unwrap()).unwrap();
    assert_eq!(again, lesson);
}
