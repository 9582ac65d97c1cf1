//! Integration tests for configuration loading and validation
//!
//! Tests touching environment variables hold ENV_MUTEX.

use edi_inbound::config::load_config;
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn cleanup_env_vars() {
    for var in [
        "EDI_APPLICATION_LOG_LEVEL",
        "EDI_STORAGE_ROOT_PATH",
        "EDI_LEDGER_LOOP_DETECTION_THRESHOLD",
        "EDI_ACKNOWLEDGMENTS_ENABLED",
        "EDI_DELIVERY_WEBHOOK_API_KEY",
        "TEST_EDI_WEBHOOK_KEY",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

const MINIMAL: &str = r#"
[storage]
root_path = "/data/buckets"

[partnerships]
path = "/data/partnerships"

[ledger]
path = "/data/ledger"

[control_numbers]
path = "/data/control-numbers.json"
"#;

#[test]
fn test_load_complete_config() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(
        r#"
[application]
function_name = "inbound-prod"
log_level = "debug"

[storage]
root_path = "/data/buckets"

[partnerships]
path = "/data/partnerships"

[partners]
ACMEISA = "acme"
MYISAID = "this-is-me"

[[guides]]
id = "guide-850"
transaction_set = "850"
name = "Purchase order"

[delivery]
timeout_seconds = 10
webhook_api_key = "inline-key"

[ledger]
path = "/data/ledger"
loop_detection_threshold = 3

[control_numbers]
path = "/data/control-numbers.json"

[acknowledgments]
enabled = true
outbound_prefix = "outgoing"

[logging]
local_enabled = false
local_path = "/tmp/edi-logs"
local_rotation = "hourly"
"#,
    );

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.application.function_name, "inbound-prod");
    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.partners.get("ACMEISA").map(String::as_str), Some("acme"));
    assert_eq!(config.guides[0].name.as_deref(), Some("Purchase order"));
    assert_eq!(config.delivery.timeout_seconds, 10);
    assert_eq!(
        config
            .delivery
            .webhook_api_key
            .as_ref()
            .unwrap()
            .expose_secret()
            .as_ref(),
        "inline-key"
    );
    assert_eq!(config.ledger.loop_detection_threshold, 3);
    assert_eq!(config.acknowledgments.outbound_prefix, "outgoing");
    assert!(!config.logging.local_enabled);
    assert_eq!(config.logging.local_rotation, "hourly");
}

#[test]
fn test_load_minimal_config_with_defaults() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(MINIMAL);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.function_name, "edi-inbound");
    assert_eq!(config.delivery.timeout_seconds, 30);
    assert_eq!(config.ledger.loop_detection_threshold, 5);
    assert!(!config.acknowledgments.enabled);
    assert!(config.guides.is_empty());
}

#[test]
fn test_env_var_substitution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("TEST_EDI_WEBHOOK_KEY", "substituted-key");

    let file = write_config(&format!(
        "{MINIMAL}\n[delivery]\nwebhook_api_key = \"${{TEST_EDI_WEBHOOK_KEY}}\"\n"
    ));
    let config = load_config(file.path()).unwrap();
    assert_eq!(
        config
            .delivery
            .webhook_api_key
            .unwrap()
            .expose_secret()
            .as_ref(),
        "substituted-key"
    );

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(&format!(
        "{MINIMAL}\n[delivery]\nwebhook_api_key = \"${{TEST_EDI_WEBHOOK_KEY}}\"\n"
    ));
    let err = load_config(file.path()).unwrap_err();
    assert!(err
        .to_string()
        .contains("Missing required environment variables: TEST_EDI_WEBHOOK_KEY"));
}

#[test]
fn test_env_var_overrides() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();
    std::env::set_var("EDI_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("EDI_STORAGE_ROOT_PATH", "/override/buckets");
    std::env::set_var("EDI_LEDGER_LOOP_DETECTION_THRESHOLD", "9");
    std::env::set_var("EDI_ACKNOWLEDGMENTS_ENABLED", "true");
    std::env::set_var("EDI_DELIVERY_WEBHOOK_API_KEY", "env-key");

    let file = write_config(MINIMAL);
    let config = load_config(file.path()).unwrap();

    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.storage.root_path, "/override/buckets");
    assert_eq!(config.ledger.loop_detection_threshold, 9);
    assert!(config.acknowledgments.enabled);
    assert!(config.delivery.webhook_api_key.is_some());

    cleanup_env_vars();
}

#[test]
fn test_invalid_config_validation() {
    let _lock = ENV_MUTEX.lock().unwrap();
    cleanup_env_vars();

    let file = write_config(&format!("{MINIMAL}\n[delivery]\ntimeout_seconds = 0\n"));
    let err = load_config(file.path()).unwrap_err();
    assert!(err.to_string().contains("delivery.timeout_seconds"));

    let file = write_config(&format!("{MINIMAL}\n[[guides]]\nid = \"g\"\ntransaction_set = \" \"\n"));
    assert!(load_config(file.path()).is_err());
}
