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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    /// Backend REST base URL, e.g. `http://localhost:3000/api/v1`.
    pub api_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Geolocation acquisition timeout before the locator reports
    /// `GeoError::Timeout`.
    pub geo_timeout_ms: u64,
    /// Maximum acceptable age of a cached fix.
    pub geo_max_age_ms: u64,
    /// Where the file-backed favorites store keeps its id set.
    pub favorites_path: std::path::PathBuf,
    /// Fixed device coordinates, when the deployment has no live location
    /// capability (the CLI always runs this way).
    pub fixed_lat: Option<f64>,
    pub fixed_lng: Option<f64>,
}
