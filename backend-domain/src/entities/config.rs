// Runtime configuration handed from infrastructure to the application layer

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub database_url: String,
    pub led_controller_url: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3341".to_string(),
            api_token: None,
            database_url: "sqlite://cellar.db".to_string(),
            led_controller_url: None,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}
