use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReqsmithConfig {
    pub session: SessionConfig,
    pub upload: UploadConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Fixed-window TTL measured from session creation.
    pub ttl_minutes: i64,
    /// Interval for the optional periodic sweeper task.
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    pub max_file_size_mb: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ReqsmithConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig {
                ttl_minutes: 60,
                sweep_interval_secs: 300,
            },
            upload: UploadConfig { max_file_size_mb: 10 },
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8002,
            },
        }
    }
}
