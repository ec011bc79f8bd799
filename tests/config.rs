// ABOUTME: Integration tests for templating configuration loading.
// ABOUTME: Tests profile defaults, partial overrides, discovery, and validation.

use kegd::config::*;
use kegd::error::Error;
use std::fs;

mod defaults {
    use super::*;

    #[test]
    fn element_profile_uses_plain_delimiters() {
        let properties = KegdProperties::default();
        let syntax = &properties.element.templating.syntax;
        assert_eq!(syntax.block_start_string, "{%");
        assert_eq!(syntax.block_end_string, "%}");
        assert_eq!(syntax.variable_start_string, "{{");
        assert_eq!(syntax.variable_end_string, "}}");
    }

    #[test]
    fn strategy_profile_uses_bang_delimiters() {
        let properties = KegdProperties::default();
        let syntax = &properties.strategy.templating.syntax;
        assert_eq!(syntax.block_start_string, "!{%");
        assert_eq!(syntax.block_end_string, "%}!");
        assert_eq!(syntax.variable_start_string, "!{{");
        assert_eq!(syntax.variable_end_string, "}}!");
    }

    #[test]
    fn defaults_are_valid() {
        KegdProperties::default().validate().unwrap();
    }
}

mod parsing {
    use super::*;

    #[test]
    fn empty_map_keeps_defaults() {
        let properties = KegdProperties::from_yaml("{}").unwrap();
        assert_eq!(properties, KegdProperties::default());
    }

    #[test]
    fn partial_override_keeps_other_delimiters() {
        let yaml = r#"
strategy:
  templating:
    syntax:
      variable_start_string: "<<"
      variable_end_string: ">>"
"#;
        let properties = KegdProperties::from_yaml(yaml).unwrap();
        let strategy = &properties.strategy.templating.syntax;
        assert_eq!(strategy.variable_start_string, "<<");
        assert_eq!(strategy.variable_end_string, ">>");
        assert_eq!(strategy.block_start_string, "!{%");
        assert_eq!(
            properties.element.templating.syntax,
            TemplatingSyntax::element_default()
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let yaml = r#"
element:
  templating:
    syntax:
      comment_start_string: "{#"
"#;
        let err = KegdProperties::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("comment_start_string"));
    }

    #[test]
    fn identical_profiles_are_rejected() {
        let yaml = r#"
strategy:
  templating:
    syntax:
      block_start_string: "{%"
      block_end_string: "%}"
      variable_start_string: "{{"
      variable_end_string: "}}"
"#;
        let err = KegdProperties::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn empty_delimiter_is_rejected() {
        let yaml = r#"
element:
  templating:
    syntax:
      variable_end_string: ""
"#;
        let err = KegdProperties::from_yaml(yaml).unwrap_err();
        assert!(err.to_string().contains("variable_end_string"));
    }
}

mod discovery {
    use super::*;

    #[test]
    fn discovers_primary_filename() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            "element:\n  templating:\n    syntax:\n      block_start_string: '<%'\n",
        )
        .unwrap();

        let properties = KegdProperties::discover(dir.path()).unwrap();
        assert_eq!(properties.element.templating.syntax.block_start_string, "<%");
    }

    #[test]
    fn discovers_config_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(".kegd")).unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME_DIR), "{}").unwrap();

        assert!(KegdProperties::discover(dir.path()).is_ok());
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = KegdProperties::discover(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound(_)));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let properties = KegdProperties::discover_or_default(dir.path()).unwrap();
        assert_eq!(properties, KegdProperties::default());
    }
}
