use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn empty_document_uses_defaults() {
    let config = IdeasConfig::from_toml("").unwrap();
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.storage.backend, StorageBackend::Dynamodb);
    assert_eq!(config.storage.ideas_table, "ideas");
    assert_eq!(config.storage.tags_index, "ideaTags");
    assert_eq!(config.aws.region, "us-east-1");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn parses_all_sections() {
    let config = IdeasConfig::from_toml(
        r#"
        [server]
        host = "0.0.0.0"
        port = 3000

        [storage]
        backend = "memory"
        ideas_table = "ideas-dev"
        tags_table = "tags-dev"
        uploads_bucket = "uploads-dev"

        [aws]
        region = "eu-west-1"
        endpoint_url = "http://localhost:4566"

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.storage.backend, StorageBackend::Memory);
    assert_eq!(config.storage.ideas_table, "ideas-dev");
    assert_eq!(config.storage.uploads_bucket, "uploads-dev");
    assert_eq!(config.aws.region, "eu-west-1");
    assert_eq!(
        config.aws.endpoint_url.as_deref(),
        Some("http://localhost:4566")
    );
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn unknown_backend_is_rejected() {
    let result = IdeasConfig::from_toml("[storage]\nbackend = \"redis\"\n");
    assert!(matches!(result, Err(ServerError::Config(_))));
}

#[test]
fn environment_overrides_file() {
    let mut config = IdeasConfig::default();
    config.apply_env(env(&[
        ("IDEAS_TABLE_NAME", "prod-ideas"),
        ("TAGS_TABLE_NAME", "prod-tags"),
        ("USER_UPLOADS_BUCKET", "prod-uploads"),
        ("AWS_REGION", "eu-central-1"),
        ("AWS_ENDPOINT_URL", "http://localhost:8000"),
    ]));

    assert_eq!(config.storage.ideas_table, "prod-ideas");
    assert_eq!(config.storage.tags_table, "prod-tags");
    assert_eq!(config.storage.uploads_bucket, "prod-uploads");
    assert_eq!(config.aws.region, "eu-central-1");
    assert_eq!(
        config.aws.endpoint_url.as_deref(),
        Some("http://localhost:8000")
    );
}

#[test]
fn empty_environment_values_are_ignored() {
    let mut config = IdeasConfig::default();
    config.apply_env(env(&[("IDEAS_TABLE_NAME", ""), ("AWS_REGION", "  ")]));
    assert_eq!(config.storage.ideas_table, "ideas");
    assert_eq!(config.aws.region, "us-east-1");
}

#[test]
fn dynamodb_backend_requires_bucket() {
    let config = IdeasConfig::default();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("USER_UPLOADS_BUCKET"));

    let mut config = IdeasConfig::default();
    config.storage.uploads_bucket = "uploads".into();
    assert!(config.validate().is_ok());
}

#[test]
fn memory_backend_needs_no_bucket() {
    let mut config = IdeasConfig::default();
    config.storage.backend = StorageBackend::Memory;
    assert!(config.validate().is_ok());
}

#[test]
fn blank_table_name_is_rejected() {
    let mut config = IdeasConfig::default();
    config.storage.backend = StorageBackend::Memory;
    config.storage.tags_table = " ".into();
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("storage.tags_table"));
}

#[test]
fn load_missing_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join("ideas-config-does-not-exist.toml");
    let (config, found) = IdeasConfig::load(&path).unwrap();
    assert!(!found);
    assert_eq!(config.storage.ideas_table, "ideas");
}
