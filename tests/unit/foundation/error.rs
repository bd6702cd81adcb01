use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LessonError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(LessonError::marker("x").to_string().contains("marker error:"));
    assert!(
        LessonError::interaction("x")
            .to_string()
            .contains("interaction error:")
    );
    assert!(
        LessonError::sequence("x")
            .to_string()
            .contains("sequence error:")
    );
    assert!(
        LessonError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LessonError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
