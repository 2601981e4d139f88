use super::*;

#[test]
fn test_defaults_match_documented_values() {
    let config = PolicyConfig::default();

    assert!(config.monitor_only);
    assert!(!config.enable_private_to_public);
    assert_eq!(config.privatized_issue_title, "[CRITICAL] Public Repos Disabled");
    assert_eq!(
        config.privatized_issue_body,
        "NOTE: Public Repos are disabled for this organization! Repository was automatically converted to a Private Repo.\n\n"
    );
    assert_eq!(config.monitor_issue_title, "[CRITICAL] Public Repository Created");
    assert_eq!(
        config.monitor_issue_body,
        "Please note that this repository is publicly visible to the internet!\n\n"
    );
    assert_eq!(config.cc_list, "");
    assert!(config.exclude_repos.is_empty());
    assert!(config.extra.is_empty());
}

#[test]
fn test_empty_document_resolves_to_defaults() {
    assert_eq!(PolicyConfig::from_yaml_str("").unwrap(), PolicyConfig::default());
    assert_eq!(
        PolicyConfig::from_yaml_str("   \n\n").unwrap(),
        PolicyConfig::default()
    );
    assert_eq!(PolicyConfig::from_yaml_str("~").unwrap(), PolicyConfig::default());
}

#[test]
fn test_overlay_replaces_only_present_keys() {
    let config = PolicyConfig::from_yaml_str(
        r#"
        monitorOnly: false
        ccList: "@security"
        excludeRepos: ['test-pro1', test-pro]
        "#,
    )
    .unwrap();

    assert!(!config.monitor_only);
    assert_eq!(config.cc_list, "@security");
    assert!(config.is_excluded(&RepositoryName::new("test-pro").unwrap()));
    assert!(config.is_excluded(&RepositoryName::new("test-pro1").unwrap()));
    assert!(!config.is_excluded(&RepositoryName::new("test-pro2").unwrap()));

    // Untouched keys keep their defaults.
    assert!(!config.enable_private_to_public);
    assert_eq!(
        config.monitor_issue_title,
        PolicyConfig::default().monitor_issue_title
    );
}

#[test]
fn test_null_value_keeps_default() {
    let config = PolicyConfig::from_yaml_str("monitorOnly:\nccList: ~\n").unwrap();
    assert_eq!(config, PolicyConfig::default());
}

#[test]
fn test_unknown_keys_are_preserved() {
    let config = PolicyConfig::from_yaml_str("someOtherTool: 3\nmonitorOnly: true\n").unwrap();

    assert_eq!(config.extra.len(), 1);
    assert_eq!(
        config
            .extra
            .get("someOtherTool")
            .and_then(serde_yaml::Value::as_u64),
        Some(3)
    );
}

#[test]
fn test_malformed_yaml_is_a_parse_error() {
    let err = PolicyConfig::from_yaml_str("monitorOnly: [unterminated").unwrap_err();
    assert!(err.is_parse(), "unexpected error: {err:?}");
}

#[test]
fn test_top_level_sequence_is_rejected() {
    let err = PolicyConfig::from_yaml_str("- a\n- b\n").unwrap_err();
    assert!(matches!(err, ConfigError::NotAMapping { found: "sequence" }));
}

#[test]
fn test_wrong_value_type_names_the_key() {
    let err = PolicyConfig::from_yaml_str("monitorOnly: sometimes\n").unwrap_err();
    match err {
        ConfigError::InvalidValue { key, .. } => assert_eq!(key, "monitorOnly"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_config_location_defaults() {
    let location = ConfigLocation::default();
    assert_eq!(location.repository.as_str(), "org-settings");
    assert_eq!(location.path, ".github/prevent-public-repos.yml");
    assert_eq!(
        location.to_string(),
        "org-settings/.github/prevent-public-repos.yml"
    );
}

#[test]
fn test_config_location_blank_overrides_fall_back() {
    assert_eq!(
        ConfigLocation::with_overrides(Some(""), Some("  ")),
        ConfigLocation::default()
    );

    let location = ConfigLocation::with_overrides(Some(".github"), Some("policy/public.yml"));
    assert_eq!(location.repository.as_str(), ".github");
    assert_eq!(location.path, "policy/public.yml");
}
