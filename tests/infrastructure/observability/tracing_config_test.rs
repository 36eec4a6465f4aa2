use docchat::infrastructure::observability::{LogFormat, TracingConfig};

#[test]
fn given_json_flag_or_variable_when_resolving_then_format_is_json() {
    assert_eq!(LogFormat::resolve(true, None), LogFormat::Json);
    assert_eq!(LogFormat::resolve(false, Some(" JSON ")), LogFormat::Json);
    assert_eq!(LogFormat::resolve(false, Some("pretty")), LogFormat::Pretty);
    assert_eq!(LogFormat::resolve(false, None), LogFormat::Pretty);
}

#[test]
fn given_configured_level_when_building_directive_then_scopes_it_to_the_crate() {
    let config = TracingConfig::new("Test", "DEBUG", true);

    assert_eq!(config.default_directive(), "warn,docchat=debug");
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "Test");
}
