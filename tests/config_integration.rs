mod common;

use serial_test::serial;

use societyreport::cli::Cli;
use societyreport::config::{Config, TlsMode};

use common::temp_config_file;

const CONFIG_YAML: &str = r#"
provider:
  type: ollama
  ollama:
    host: http://gpu-box:11434
    model: llama3.2:latest

email:
  smtp_host: smtp.example.com
  smtp_port: 465
  sender: reports@example.com
  recipient: team@example.com

report:
  export_path: reports/latest.xlsx
"#;

#[test]
#[serial]
fn test_load_from_file() {
    let (_dir, path) = temp_config_file(CONFIG_YAML);
    let config = Config::load(path.to_str().unwrap(), &Cli::default()).unwrap();

    assert_eq!(config.provider.provider_type, "ollama");
    assert_eq!(config.provider.ollama.host, "http://gpu-box:11434");
    assert_eq!(config.email.resolve_tls().unwrap(), TlsMode::Implicit);
    assert_eq!(config.report.export_path, "reports/latest.xlsx");
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_cli_provider_beats_file_and_env() {
    std::env::set_var("SOCIETYREPORT_PROVIDER", "ollama");
    let (_dir, path) = temp_config_file(CONFIG_YAML);
    let cli = Cli {
        provider: Some("openai".to_string()),
        ..Cli::default()
    };
    let config = Config::load(path.to_str().unwrap(), &cli).unwrap();
    std::env::remove_var("SOCIETYREPORT_PROVIDER");

    assert_eq!(config.provider.provider_type, "openai");
}

#[test]
#[serial]
fn test_smtp_password_only_from_env() {
    let (_dir, path) = temp_config_file(CONFIG_YAML);
    let config = Config::load(path.to_str().unwrap(), &Cli::default()).unwrap();
    assert!(config.email.password.is_none());

    std::env::set_var("SOCIETYREPORT_SMTP_PASSWORD", "app-password");
    let config = Config::load(path.to_str().unwrap(), &Cli::default()).unwrap();
    std::env::remove_var("SOCIETYREPORT_SMTP_PASSWORD");

    assert_eq!(config.email.password.as_deref(), Some("app-password"));
    assert!(config.email.ensure_sendable().is_ok());
}

#[test]
#[serial]
fn test_malformed_file_is_an_error() {
    let (_dir, path) = temp_config_file("provider: [not, a, map");
    assert!(Config::load(path.to_str().unwrap(), &Cli::default()).is_err());
}
