//! Dashboard configuration.

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub api_url: String,

    /// Path of the login endpoint relative to `api_url`. The production
    /// backend accepts login at the API root, so the default is empty.
    pub login_path: String,

    /// Path of the sign-up endpoint relative to `api_url`.
    pub register_path: String,
}

impl DashboardConfig {
    /// Environment variable that overrides [`api_url`](Self::api_url).
    pub const API_URL_VAR: &'static str = "STRIDE_API_URL";

    /// Defaults, with `api_url` taken from `STRIDE_API_URL` when it is set
    /// and non-empty.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(Self::API_URL_VAR) {
            let url = url.trim();
            if !url.is_empty() {
                config.api_url = url.trim_end_matches('/').to_string();
            }
        }
        config
    }

    /// Full URL of the login endpoint.
    pub fn login_url(&self) -> String {
        self.join(&self.login_path)
    }

    /// Full URL of the sign-up endpoint.
    pub fn register_url(&self) -> String {
        self.join(&self.register_path)
    }

    fn join(&self, path: &str) -> String {
        let base = self.api_url.trim_end_matches('/');
        let path = path.trim_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_url: "https://assessoria-api.onrender.com/api".to_string(),
            login_path: String::new(),
            register_path: "register".to_string(),
        }
    }
}
