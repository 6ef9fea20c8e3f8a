use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Base URL of the image composition service, without a trailing slash.
    pub service_base_url: String,
    pub access_key: String,
    pub presets_path: Option<PathBuf>,
    pub prewarm_enabled: bool,
    pub prewarm_timeout_secs: u64,
    pub prewarm_user_agent: String,
    pub prewarm_max_retries: u32,
    pub prewarm_backoff_base_secs: u64,
    /// How long a successfully warmed key is remembered by the in-process cache.
    pub warm_ttl_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("service_base_url", &self.service_base_url)
            .field(
                "access_key",
                &if self.access_key.is_empty() {
                    ""
                } else {
                    "[redacted]"
                },
            )
            .field("presets_path", &self.presets_path)
            .field("prewarm_enabled", &self.prewarm_enabled)
            .field("prewarm_timeout_secs", &self.prewarm_timeout_secs)
            .field("prewarm_user_agent", &self.prewarm_user_agent)
            .field("prewarm_max_retries", &self.prewarm_max_retries)
            .field(
                "prewarm_backoff_base_secs",
                &self.prewarm_backoff_base_secs,
            )
            .field("warm_ttl_secs", &self.warm_ttl_secs)
            .finish()
    }
}
