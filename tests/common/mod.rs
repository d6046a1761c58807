use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::MockServer;

use societyreport::config::{OllamaConfig, OpenAiConfig};

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// OpenAI settings pointing at a mock server with a test key
#[allow(dead_code)]
pub fn openai_config_for(server: &MockServer) -> OpenAiConfig {
    OpenAiConfig {
        api_base: format!("{}/v1", server.uri()),
        api_key: Some("sk-test".to_string()),
        timeout_seconds: 5,
        ..OpenAiConfig::default()
    }
}

/// Ollama settings pointing at a mock server
#[allow(dead_code)]
pub fn ollama_config_for(server: &MockServer) -> OllamaConfig {
    OllamaConfig {
        host: server.uri(),
        timeout_seconds: 5,
        ..OllamaConfig::default()
    }
}

/// Minimal chat completions body with one choice
#[allow(dead_code)]
pub fn completion_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 42, "completion_tokens": 7, "total_tokens": 49 }
    })
}
