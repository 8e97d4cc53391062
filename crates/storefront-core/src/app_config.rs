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

/// How the results view arranges its cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResultsLayout {
    #[default]
    Grid,
    List,
}

impl std::fmt::Display for ResultsLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResultsLayout::Grid => write!(f, "grid"),
            ResultsLayout::List => write!(f, "list"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub base_url: String,
    pub community_id: String,
    /// Raw account id as configured; resolve with
    /// [`crate::resolve_effective_account_id`] before use.
    pub effective_account_id: Option<String>,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub results_layout: ResultsLayout,
    pub comparison_cap: usize,
    pub landing_category_id: Option<String>,
    pub field_mapping_path: Option<PathBuf>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("base_url", &self.base_url)
            .field("community_id", &self.community_id)
            .field(
                "effective_account_id",
                &self.effective_account_id.as_ref().map(|_| "[redacted]"),
            )
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("results_layout", &self.results_layout)
            .field("comparison_cap", &self.comparison_cap)
            .field("landing_category_id", &self.landing_category_id)
            .field("field_mapping_path", &self.field_mapping_path)
            .finish()
    }
}
