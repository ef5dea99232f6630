use super::*;

#[test]
fn missing_fields_take_defaults() {
    let s = MeshSettings::from_json_str(r#"{ "antialiasing": true }"#).unwrap();
    assert_eq!(
        s,
        MeshSettings {
            antialiasing: true,
            ..MeshSettings::default()
        }
    );
}

#[test]
fn color_format_uses_snake_case() {
    let s = MeshSettings::from_json_str(r#"{ "color_format": "float32" }"#).unwrap();
    assert_eq!(s.color_format, ColorFormat::Float32);
    let json = serde_json::to_string(&MeshSettings::default()).unwrap();
    assert!(json.contains(r#""color_format":"unorm8""#));
}

#[test]
fn unknown_fields_and_excess_depth_are_rejected() {
    assert!(matches!(
        MeshSettings::from_json_str(r#"{ "gradients": true }"#),
        Err(VecmeshError::Serde(_))
    ));
    assert!(matches!(
        MeshSettings::from_json_str(r#"{ "compression_depth": 24 }"#),
        Err(VecmeshError::Validation(_))
    ));
}

#[test]
fn from_path_reports_missing_file() {
    let err = MeshSettings::from_path("definitely/not/here.json").unwrap_err();
    assert!(err.to_string().contains("open mesh settings"));
}
