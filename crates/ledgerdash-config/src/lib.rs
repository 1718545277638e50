//! Configuration management for ledgerdash
//!
//! This module handles loading, validation, and management of
//! ledgerdash configuration from YAML files, and owns the selector
//! enums (period, regime) that the dashboard defaults refer to.

pub mod error;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub use error::ConfigError;

// ==================== Selector Types ====================

/// Symbolic reporting period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "current-month", alias = "este_mes")]
    CurrentMonth,
    #[serde(rename = "previous-month", alias = "mes_passado")]
    PreviousMonth,
    #[serde(rename = "current-year", alias = "este_ano")]
    CurrentYear,
    #[serde(rename = "trailing-12-months", alias = "ultimos_12")]
    Trailing12Months,
    #[serde(rename = "all-time", alias = "tudo")]
    AllTime,
    /// Caller-supplied start and end dates
    #[serde(rename = "custom")]
    Custom,
}

impl Default for Period {
    fn default() -> Self {
        Period::CurrentMonth
    }
}

impl std::str::FromStr for Period {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "current-month" | "month" | "este_mes" => Ok(Period::CurrentMonth),
            "previous-month" | "mes_passado" => Ok(Period::PreviousMonth),
            "current-year" | "year" | "este_ano" => Ok(Period::CurrentYear),
            "trailing-12-months" | "ultimos_12" => Ok(Period::Trailing12Months),
            "all-time" | "all" | "tudo" => Ok(Period::AllTime),
            "custom" => Ok(Period::Custom),
            _ => Err(format!("Invalid period: {}", s)),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::CurrentMonth => write!(f, "current-month"),
            Period::PreviousMonth => write!(f, "previous-month"),
            Period::CurrentYear => write!(f, "current-year"),
            Period::Trailing12Months => write!(f, "trailing-12-months"),
            Period::AllTime => write!(f, "all-time"),
            Period::Custom => write!(f, "custom"),
        }
    }
}

/// Accounting regime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// Only settled transactions count
    #[serde(alias = "caixa")]
    Cash,
    /// Settled and pending transactions count
    #[serde(alias = "competencia")]
    Accrual,
}

impl Default for Regime {
    fn default() -> Self {
        Regime::Cash
    }
}

impl std::str::FromStr for Regime {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" | "caixa" => Ok(Regime::Cash),
            "accrual" | "competencia" | "competência" => Ok(Regime::Accrual),
            _ => Err(format!("Invalid regime: {}", s)),
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Regime::Cash => write!(f, "cash"),
            Regime::Accrual => write!(f, "accrual"),
        }
    }
}

// ==================== Configuration Types ====================

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8081
}

/// Data directory configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the ledger document
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// Ledger document file name
    #[serde(default = "default_data_file")]
    pub file: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            file: default_data_file(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("./data")
}

fn default_data_file() -> String {
    "ledger.json".to_string()
}

/// Outbound webhook for newly created transactions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Endpoint URL; delivery is disabled when absent
    #[serde(default)]
    pub url: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_webhook_timeout")]
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_webhook_timeout(),
        }
    }
}

fn default_webhook_timeout() -> u64 {
    10
}

/// Dashboard defaults used when a request omits a selector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// "consolidated" or a company id
    #[serde(default = "default_scope")]
    pub default_scope: String,
    #[serde(default)]
    pub default_period: Period,
    #[serde(default)]
    pub default_regime: Regime,
    /// Number of expense categories shown in the breakdown
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,
    /// Number of trailing months in the flow and stacked series
    #[serde(default = "default_series_months")]
    pub series_months: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_scope: default_scope(),
            default_period: Period::default(),
            default_regime: Regime::default(),
            top_categories: default_top_categories(),
            series_months: default_series_months(),
        }
    }
}

fn default_scope() -> String {
    "consolidated".to_string()
}

fn default_top_categories() -> usize {
    8
}

fn default_series_months() -> usize {
    6
}

/// Currency and number formatting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrencyConfig {
    #[serde(default = "default_currency_symbol")]
    pub symbol: String,
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
    #[serde(default = "default_thousands_sep")]
    pub thousands_separator: String,
    #[serde(default = "default_decimal_sep")]
    pub decimal_separator: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            symbol: default_currency_symbol(),
            decimal_places: default_decimal_places(),
            thousands_separator: default_thousands_sep(),
            decimal_separator: default_decimal_sep(),
        }
    }
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

fn default_decimal_places() -> u32 {
    2
}

fn default_thousands_sep() -> String {
    ".".to_string()
}

fn default_decimal_sep() -> String {
    ",".to_string()
}

/// A company the ledger can be scoped to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyConfig {
    pub id: String,
    pub name: String,
    /// Badge color used by the frontend
    #[serde(default = "default_accent")]
    pub display_accent: String,
}

fn default_accent() -> String {
    "gray".to_string()
}

fn default_companies() -> Vec<CompanyConfig> {
    vec![
        CompanyConfig {
            id: "ps".to_string(),
            name: "PS Investimentos".to_string(),
            display_accent: "blue".to_string(),
        },
        CompanyConfig {
            id: "matt".to_string(),
            name: "MATT DEV".to_string(),
            display_accent: "purple".to_string(),
        },
        CompanyConfig {
            id: "afm".to_string(),
            name: "AFM Tecnologia".to_string(),
            display_accent: "emerald".to_string(),
        },
    ]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub webhook: WebhookConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub currency: CurrencyConfig,
    #[serde(default = "default_companies")]
    pub companies: Vec<CompanyConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            data: DataConfig::default(),
            webhook: WebhookConfig::default(),
            dashboard: DashboardConfig::default(),
            currency: CurrencyConfig::default(),
            companies: default_companies(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        log::debug!(target: "ledgerdash::config", "Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Write the configuration as YAML, replacing the file atomically
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_yaml::to_string(self)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let temp = path.with_extension("yaml.tmp");
        std::fs::write(&temp, content)?;
        std::fs::rename(&temp, path)?;
        log::debug!(target: "ledgerdash::config", "Saved configuration to {}", path.display());
        Ok(())
    }

    /// Parse and validate configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::InvalidYaml { message: e.to_string() })?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if self.webhook.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "webhook.timeout_secs".to_string(),
                reason: "Timeout must be at least 1 second".to_string(),
            });
        }

        if let Some(url) = &self.webhook.url {
            if !is_http_url(url) {
                return Err(ConfigError::InvalidValue {
                    field: "webhook.url".to_string(),
                    reason: "Webhook URL must start with http:// or https://".to_string(),
                });
            }
        }

        if self.currency.decimal_places > 10 {
            return Err(ConfigError::InvalidValue {
                field: "currency.decimal_places".to_string(),
                reason: "Decimal places must be between 0 and 10".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for company in &self.companies {
            if company.id.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "companies.id".to_string(),
                    reason: "Company id must not be empty".to_string(),
                });
            }
            if is_consolidated_alias(&company.id) || !seen.insert(company.id.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "companies.id".to_string(),
                    reason: format!("Company id '{}' is reserved or duplicated", company.id),
                });
            }
        }

        if !is_consolidated_alias(&self.dashboard.default_scope)
            && !self.companies.iter().any(|c| c.id == self.dashboard.default_scope)
        {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.default_scope".to_string(),
                reason: "Default scope must be 'consolidated' or a configured company id".to_string(),
            });
        }

        if self.dashboard.top_categories == 0 || self.dashboard.series_months == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dashboard".to_string(),
                reason: "top_categories and series_months must be greater than 0".to_string(),
            });
        }

        if self.dashboard.default_period == Period::Custom {
            return Err(ConfigError::InvalidValue {
                field: "dashboard.default_period".to_string(),
                reason: "A custom period needs explicit dates and cannot be the default".to_string(),
            });
        }

        Ok(())
    }

    /// Generate a default configuration file
    pub fn generate_default() -> &'static str {
        include_str!("../templates/default_config.yaml")
    }

    /// Get the full path to the ledger document
    pub fn ledger_path(&self) -> PathBuf {
        self.data.path.join(&self.data.file)
    }
}

/// Scope names that select the consolidated view, matched case-insensitively
pub const CONSOLIDATED_ALIASES: [&str; 2] = ["consolidated", "consolidado"];

/// Whether `scope` names the consolidated view rather than a company
pub fn is_consolidated_alias(scope: &str) -> bool {
    let scope = scope.trim();
    CONSOLIDATED_ALIASES.iter().any(|alias| alias.eq_ignore_ascii_case(scope))
}

/// Check that a URL uses an HTTP scheme
pub fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

// ==================== Tests ====================
