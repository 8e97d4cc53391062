pub mod account;
pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod field_mapping;

use thiserror::Error;

pub use account::{resolve_effective_account_id, PLACEHOLDER_ACCOUNT_ID};
pub use app_config::{AppConfig, Environment, ResultsLayout};
pub use cart::{CartStatus, CartSummary};
pub use catalog::{
    parse_price, ComparisonProducts, Query, RawField, RawImage, RawPrices, RawProduct, Refinement,
    ResultPage, SearchRequest,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use field_mapping::{load_field_mapping, FieldMapping, MappedField};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read field mapping file {path}: {source}")]
    FieldMappingIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse field mapping file: {0}")]
    FieldMappingParse(#[from] serde_yaml::Error),

    #[error("field mapping validation failed: {0}")]
    Validation(String),
}
