use std::time::Duration;

/// The hosted API this client was written against.
pub const DEFAULT_BASE_URL: &str = "https://hack-or-snooze-v3.herokuapp.com";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            request_timeout: Duration::from_secs(10),
        }
    }
}
