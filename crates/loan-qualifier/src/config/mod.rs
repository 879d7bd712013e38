use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::scoring::{EligibilityConfig, DEFAULT_ANNUAL_RATE_PERCENT};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub lending: LendingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            lending: LendingConfig::from_env()?,
        })
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Pricing and eligibility dials.
#[derive(Debug, Clone, PartialEq)]
pub struct LendingConfig {
    pub annual_rate_percent: f64,
    pub eligibility: EligibilityConfig,
}

impl LendingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("LOAN_ANNUAL_RATE_PERCENT") {
            let rate = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidRate(raw.clone()))?;
            if !rate.is_finite() || rate < 0.0 {
                return Err(ConfigError::InvalidRate(raw));
            }
            config.annual_rate_percent = rate;
        }

        if let Ok(raw) = env::var("LOAN_MEDIUM_TIER_RATIO") {
            let ratio = raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidTierRatio(raw.clone()))?;
            if !(ratio.is_finite() && ratio > 0.0 && ratio <= 1.0) {
                return Err(ConfigError::InvalidTierRatio(raw));
            }
            config.eligibility.medium_tier_ratio = ratio;
        }

        Ok(config)
    }
}

impl Default for LendingConfig {
    fn default() -> Self {
        Self {
            annual_rate_percent: DEFAULT_ANNUAL_RATE_PERCENT,
            eligibility: EligibilityConfig::default(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRate(String),
    InvalidTierRatio(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRate(raw) => write!(
                f,
                "LOAN_ANNUAL_RATE_PERCENT must be a non-negative number (found '{raw}')"
            ),
            ConfigError::InvalidTierRatio(raw) => write!(
                f,
                "LOAN_MEDIUM_TIER_RATIO must be within (0, 1] (found '{raw}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidRate(_)
            | ConfigError::InvalidTierRatio(_) => None,
        }
    }
}
