use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        FxError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        FxError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(FxError::render("x").to_string().contains("render error:"));
    assert!(
        FxError::resource("x")
            .to_string()
            .contains("resource unavailable:")
    );
    assert!(
        FxError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = FxError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn only_resource_errors_are_resource_unavailable() {
    assert!(FxError::resource("no ctx").is_resource_unavailable());
    assert!(!FxError::render("x").is_resource_unavailable());
}
