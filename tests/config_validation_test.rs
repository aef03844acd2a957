use wp_timeline::config::{Config, TimelineConfig};
use wp_timeline::error::ConfigError;
use wp_timeline::timeline::MinimumUnit;

#[test]
fn test_timeline_validation_defaults() {
    assert!(TimelineConfig::default().validate().is_ok());
    assert!(Config::default().validate().is_ok());
}

#[test]
fn test_timeline_validation_no_status_fields() {
    let config = TimelineConfig {
        status_fields: vec![],
        ..TimelineConfig::default()
    };

    assert_eq!(config.validate(), Err(ConfigError::NoStatusFields));
}

#[test]
fn test_timeline_validation_blank_status_field() {
    let config = TimelineConfig {
        status_fields: vec!["status".to_string(), "   ".to_string()],
        ..TimelineConfig::default()
    };

    assert_eq!(config.validate(), Err(ConfigError::BlankStatusField));
}

#[test]
fn test_timeline_validation_blank_unknown_actor() {
    let config = TimelineConfig {
        unknown_actor: "".to_string(),
        ..TimelineConfig::default()
    };

    assert_eq!(config.validate(), Err(ConfigError::BlankUnknownActor));
}

#[test]
fn test_config_validation_wraps_section_errors() {
    let mut config = Config::default();
    config.timeline.status_fields.clear();

    let err = config.validate().unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Invalid [timeline] configuration"));
    assert!(message.contains("at least one field"));
}

#[test]
fn test_timeline_suffix_can_be_disabled() {
    let config = TimelineConfig {
        ongoing_suffix: None,
        minimum_unit: MinimumUnit::Second,
        ..TimelineConfig::default()
    };

    assert!(config.validate().is_ok());
    let options = config.to_options();
    assert_eq!(options.ongoing_format().suffix, None);
    assert_eq!(options.closed_format().minimum_unit, MinimumUnit::Second);
}
