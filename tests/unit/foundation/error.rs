use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WobbleError::config("x")
            .to_string()
            .contains("config error:")
    );
    assert!(
        WobbleError::document("x")
            .to_string()
            .contains("document error:")
    );
    assert!(
        WobbleError::schedule("x")
            .to_string()
            .contains("schedule error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WobbleError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
