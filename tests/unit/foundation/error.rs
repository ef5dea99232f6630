use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VecmeshError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(VecmeshError::import("x").to_string().contains("import error:"));
    assert!(
        VecmeshError::tessellation("x")
            .to_string()
            .contains("tessellation error:")
    );
    assert!(
        VecmeshError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VecmeshError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
