use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CubeAnimError::config("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(
        CubeAnimError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CubeAnimError::evaluation("x")
            .to_string()
            .contains("evaluation error:")
    );
    assert!(
        CubeAnimError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CubeAnimError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
