// SPDX-FileCopyrightText: 2026 Switchyard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Switchyard configuration system.

use switchyard_config::diagnostic::{suggest_key, ConfigError};
use switchyard_config::model::SwitchyardConfig;
use switchyard_config::{load_and_validate_str, load_config_from_str, Backend};

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_config() {
    let toml = r#"
[general]
log_level = "debug"

[provider]
backend = "anthropic"

[bedrock]
region = "us-west-2"
profile = "research"

[anthropic]
api_key = "sk-ant-123"
api_version = "2023-06-01"

[routing]
classifier_model = "claude-3-5-haiku-latest"
compact_model = "claude-3-5-haiku-latest"
capable_model = "claude-sonnet-4-20250514"
compact_label = "Haiku"
capable_label = "Sonnet"

[transcript]
enabled = false
directory = "out"

[batch]
prompts_file = "my_prompts.toml"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.provider.backend, Backend::Anthropic);
    assert_eq!(config.bedrock.region, "us-west-2");
    assert_eq!(config.bedrock.profile.as_deref(), Some("research"));
    assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-ant-123"));
    assert_eq!(config.routing.classifier_model, "claude-3-5-haiku-latest");
    assert_eq!(config.routing.capable_model, "claude-sonnet-4-20250514");
    assert_eq!(config.routing.compact_label, "Haiku");
    assert!(!config.transcript.enabled);
    assert_eq!(config.transcript.directory, "out");
    assert_eq!(config.batch.prompts_file, "my_prompts.toml");
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.general.log_level, "info");
    assert_eq!(config.provider.backend, Backend::Bedrock);
    assert_eq!(config.bedrock.region, "us-east-1");
    assert!(config.bedrock.profile.is_none());
    assert!(config.anthropic.api_key.is_none());
    assert_eq!(config.routing.classifier_model, "us.amazon.nova-lite-v1:0");
    assert_eq!(
        config.routing.compact_model,
        "us.anthropic.claude-3-5-haiku-20241022-v1:0"
    );
    assert_eq!(
        config.routing.capable_model,
        "us.anthropic.claude-3-5-sonnet-20241022-v2:0"
    );
    assert!(config.transcript.enabled);
    assert_eq!(config.transcript.directory, "results");
    assert_eq!(config.batch.prompts_file, "prompts.toml");
}

/// Dotted overrides (what the env provider produces) land on the right field.
#[test]
fn dotted_override_sets_nested_key() {
    use figment::{providers::Serialized, Figment};

    let config: SwitchyardConfig = Figment::new()
        .merge(Serialized::defaults(SwitchyardConfig::default()))
        .merge(("routing.classifier_model", "from-env"))
        .extract()
        .expect("should set classifier_model via dot notation");

    assert_eq!(config.routing.classifier_model, "from-env");
}

/// Missing config files are silently skipped.
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        providers::{Format, Serialized, Toml},
        Figment,
    };

    let config: SwitchyardConfig = Figment::new()
        .merge(Serialized::defaults(SwitchyardConfig::default()))
        .merge(Toml::file("/nonexistent/path/switchyard.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.transcript.directory, "results");
}

/// Unknown field in [routing] is rejected by deny_unknown_fields.
#[test]
fn unknown_field_in_routing_produces_error() {
    let toml = r#"
[routing]
compcat_model = "x"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("compcat_model"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// The classifier prompt is not configurable.
#[test]
fn classifier_instruction_is_not_a_config_key() {
    let toml = r#"
[routing]
classifier_instruction = "reply with yes or no"
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// Unexpected top-level section is rejected.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[cache]
enabled = true
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("cache"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unknown key produces an UnknownKey diagnostic with suggestion and valid keys.
#[test]
fn diagnostic_error_includes_suggestion_and_valid_keys() {
    let toml = r#"
[routing]
compcat_model = "x"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "compcat_model"
                && suggestion.as_deref() == Some("compact_model")
                && valid_keys.contains("capable_model")
        })
    });
    assert!(found, "expected UnknownKey for compcat_model, got: {errors:?}");
}

#[test]
fn diagnostic_no_suggestion_for_distant_typo() {
    assert!(suggest_key("zzzzzz", &["enabled", "directory"]).is_none());
}

/// Invalid type (string where bool expected) produces a clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[transcript]
enabled = "sometimes"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("enabled"))),
        "expected InvalidType for transcript.enabled, got: {errors:?}"
    );
}

/// ConfigError renders through miette with its help text.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "compcat_model".to_string(),
        suggestion: Some("compact_model".to_string()),
        valid_keys: "classifier_model, compact_model".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `compact_model`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("compcat_model"));
}

/// Validation runs after a successful parse.
#[test]
fn validation_catches_empty_model() {
    let toml = r#"
[routing]
compact_model = ""
"#;

    let errors = load_and_validate_str(toml).expect_err("empty model should fail");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("compact_model"))
    ));
}

#[test]
fn load_and_validate_valid_toml() {
    let toml = r#"
[transcript]
directory = "transcripts"
"#;

    let config = load_and_validate_str(toml).expect("valid TOML should validate");
    assert_eq!(config.transcript.directory, "transcripts");
}

/// `SWITCHYARD_*` variables override file values through the public loader.
#[test]
fn env_overrides_apply_over_config_file() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "switchyard.toml",
            r#"
[general]
log_level = "warn"

[routing]
capable_model = "from-file"
"#,
        )?;
        jail.set_env("SWITCHYARD_GENERAL_LOG_LEVEL", "debug");
        jail.set_env("SWITCHYARD_ROUTING_CAPABLE_MODEL", "from-env");
        jail.set_env("SWITCHYARD_TRANSCRIPT_ENABLED", "false");

        let config = switchyard_config::load_and_validate_path(std::path::Path::new(
            "switchyard.toml",
        ))
        .map_err(|errors| format!("{errors:?}"))?;

        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.routing.capable_model, "from-env");
        assert!(!config.transcript.enabled);
        assert_eq!(config.routing.compact_label, "Claude 3.5 Haiku");
        Ok(())
    });
}

/// An env variable naming no known section is still rejected as an unknown key.
#[test]
fn env_override_for_unknown_section_is_rejected() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("switchyard.toml", "")?;
        jail.set_env("SWITCHYARD_CACHE_ENABLED", "true");

        let result = switchyard_config::load_config_from_path(std::path::Path::new(
            "switchyard.toml",
        ));
        assert!(result.is_err());
        Ok(())
    });
}
