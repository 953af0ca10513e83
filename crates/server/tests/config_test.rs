//! # Configuration Tests
//!
//! Configuration loading reads process-wide environment variables, so every test
//! here runs serially and clears the variables it touches.

use dhonkbot_server::config::{get_config, ConfigError};
use serial_test::serial;
use std::{env, fs};
use tempfile::{tempdir, TempDir};

const VARS: &[&str] = &[
    "PORT",
    "DB_HOST",
    "DB_NAME",
    "DB_USER",
    "DB_PASSWORD",
    "DB_PORT",
    "OPENAI_API_KEY",
    "DHONKBOT_CHAT__MODEL_NAME",
    "DHONKBOT_SEARCH__THRESHOLD",
    "DHONKBOT_SEARCH__CACHE_EMBEDDINGS",
];

fn clear_env_vars() {
    for var in VARS {
        env::remove_var(var);
    }
}

/// Writes `content` to a `config.yml` inside a fresh temporary directory.
fn write_config(content: &str) -> (TempDir, String) {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.yml");
    fs::write(&path, content).expect("Failed to write config file");
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

#[test]
#[serial]
fn test_defaults_apply_to_an_empty_file() {
    clear_env_vars();
    let (_dir, path) = write_config("{}");

    let config = get_config(Some(&path)).expect("Configuration should load");

    assert_eq!(config.port, 5000);
    assert_eq!(config.db_port, 5432);
    assert!(config.openai_api_key.is_none());
    assert_eq!(config.chat.provider, "openai");
    assert_eq!(config.chat.model_name, "gpt-4o-mini");
    assert!((config.chat.temperature - 0.6).abs() < f32::EPSILON);
    assert_eq!(config.embedding.model_name, "text-embedding-3-small");
    assert_eq!(config.search.table, "dhonk_pages");
    assert_eq!(config.search.limit, 20);
    assert!((config.search.threshold - 0.75).abs() < f32::EPSILON);
    assert_eq!(config.search.excerpt_sentences, 3);
    assert!(!config.search.cache_embeddings);
}

#[test]
#[serial]
fn test_placeholders_are_substituted_and_key_is_shared() {
    clear_env_vars();
    env::set_var("OPENAI_API_KEY", "sk-from-env");
    let (_dir, path) = write_config(
        r#"
openai_api_key: "${OPENAI_API_KEY}"
db_name: "dhonk"
"#,
    );

    let config = get_config(Some(&path)).expect("Configuration should load");

    assert_eq!(config.openai_api_key.as_deref(), Some("sk-from-env"));
    assert_eq!(config.chat.api_key.as_deref(), Some("sk-from-env"));
    assert_eq!(config.embedding.api_key.as_deref(), Some("sk-from-env"));
    assert_eq!(config.db_name, "dhonk");
    clear_env_vars();
}

#[test]
#[serial]
fn test_unset_placeholder_leaves_key_unset() {
    clear_env_vars();
    let (_dir, path) = write_config(r#"openai_api_key: "${OPENAI_API_KEY}""#);

    let config = get_config(Some(&path)).expect("Configuration should load");

    assert!(config.openai_api_key.is_none());
    assert!(config.chat.api_key.is_none());
}

#[test]
#[serial]
fn test_section_key_wins_over_shared_key() {
    clear_env_vars();
    let (_dir, path) = write_config(
        r#"
openai_api_key: "sk-shared"
chat:
  api_key: "sk-chat"
"#,
    );

    let config = get_config(Some(&path)).expect("Configuration should load");

    assert_eq!(config.chat.api_key.as_deref(), Some("sk-chat"));
    assert_eq!(config.embedding.api_key.as_deref(), Some("sk-shared"));
}

#[test]
#[serial]
fn test_environment_overrides_file_values() {
    clear_env_vars();
    env::set_var("PORT", "7000");
    env::set_var("DB_HOST", "db.internal");
    env::set_var("DB_PORT", "6543");
    env::set_var("DB_USER", "support");
    env::set_var("DB_PASSWORD", "secret");
    env::set_var("DHONKBOT_CHAT__MODEL_NAME", "gpt-test");
    env::set_var("DHONKBOT_SEARCH__THRESHOLD", "0.5");
    env::set_var("DHONKBOT_SEARCH__CACHE_EMBEDDINGS", "true");
    let (_dir, path) = write_config(
        r#"
port: 8000
db_host: "localhost"
chat:
  model_name: "gpt-4o-mini"
"#,
    );

    let config = get_config(Some(&path)).expect("Configuration should load");

    assert_eq!(config.port, 7000);
    assert_eq!(config.db_host, "db.internal");
    assert_eq!(config.db_port, 6543);
    assert_eq!(config.db_user, "support");
    assert_eq!(config.db_password.as_deref(), Some("secret"));
    assert_eq!(config.chat.model_name, "gpt-test");
    assert!((config.search.threshold - 0.5).abs() < f32::EPSILON);
    assert!(config.search.cache_embeddings);

    // The password never reaches the debug output.
    assert!(!format!("{config:?}").contains("secret"));
    clear_env_vars();
}

#[test]
#[serial]
fn test_missing_explicit_file_is_an_error() {
    clear_env_vars();
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.yml");

    let result = get_config(Some(path.to_str().unwrap()));

    assert!(matches!(result, Err(ConfigError::NotFound(_))));
}

#[test]
#[serial]
fn test_prompt_overrides_are_optional() {
    clear_env_vars();
    let (_dir, path) = write_config(
        r#"
prompts:
  english: "Answer in one sentence."
"#,
    );

    let config = get_config(Some(&path)).expect("Configuration should load");

    assert_eq!(
        config.prompts.english.as_deref(),
        Some("Answer in one sentence.")
    );
    assert!(config.prompts.hindi.is_none());
}
