//! Process-environment configuration, read once at startup.
//!
//! Everything the request handlers need is resolved and validated here,
//! before the server binds. A malformed value is a startup failure, not
//! a surprise inside a request handler.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "vitalview";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

const ENV_DATASET: &str = "VITALVIEW_DATASET";
const ENV_ADDR: &str = "VITALVIEW_ADDR";
const ENV_PDF_ENGINE: &str = "VITALVIEW_PDF_ENGINE";
const ENV_LLM_API_KEY: &str = "VITALVIEW_LLM_API_KEY";
const ENV_LLM_URL: &str = "VITALVIEW_LLM_URL";
const ENV_LLM_MODEL: &str = "VITALVIEW_LLM_MODEL";
const ENV_LLM_TIMEOUT: &str = "VITALVIEW_LLM_TIMEOUT_SECS";

const DEFAULT_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_PDF_ENGINE: &str = "wkhtmltopdf";
const DEFAULT_LLM_URL: &str = "https://api.openai.com";
const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;

/// Errors raised while resolving configuration. Startup-fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required but not set")]
    Missing(&'static str),
    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
    #[error("{0} is set but VITALVIEW_LLM_API_KEY is not")]
    DiagnosisWithoutKey(&'static str),
}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the vital-signs CSV dataset.
    pub dataset_path: PathBuf,
    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Executable that converts HTML on stdin to PDF on stdout.
    pub pdf_engine: PathBuf,
    /// Present only when the AI-assisted variant is configured.
    pub diagnosis: Option<DiagnosisConfig>,
}

/// Configuration for the external text-generation service.
#[derive(Debug, Clone)]
pub struct DiagnosisConfig {
    /// Base URL of the OpenAI-compatible API.
    pub base_url: String,
    /// Bearer key, supplied via the environment, never embedded in source.
    pub api_key: String,
    /// Fixed model identifier sent with every request.
    pub model: String,
    /// Per-request timeout bounding worst-case streaming latency.
    pub timeout_secs: u64,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary lookup. Tests inject maps
    /// here instead of mutating the process environment.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let dataset_path = get(ENV_DATASET)
            .map(PathBuf::from)
            .ok_or(ConfigError::Missing(ENV_DATASET))?;

        let addr_raw = get(ENV_ADDR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let bind_addr: SocketAddr = addr_raw.parse().map_err(|e| ConfigError::Invalid {
            name: ENV_ADDR,
            reason: format!("{e} (got {addr_raw:?})"),
        })?;

        let pdf_engine = get(ENV_PDF_ENGINE)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PDF_ENGINE));

        let diagnosis = Self::diagnosis_from_lookup(&get)?;

        Ok(Self {
            dataset_path,
            bind_addr,
            pdf_engine,
            diagnosis,
        })
    }

    /// The AI-assisted variant is enabled iff the API key is present.
    /// Other LLM variables set without a key indicate a misconfigured
    /// deployment and fail startup instead of failing the first request.
    fn diagnosis_from_lookup(
        get: &impl Fn(&str) -> Option<String>,
    ) -> Result<Option<DiagnosisConfig>, ConfigError> {
        let api_key = match get(ENV_LLM_API_KEY) {
            Some(key) if !key.trim().is_empty() => key,
            _ => {
                for name in [ENV_LLM_URL, ENV_LLM_MODEL, ENV_LLM_TIMEOUT] {
                    if get(name).is_some() {
                        return Err(ConfigError::DiagnosisWithoutKey(name));
                    }
                }
                return Ok(None);
            }
        };

        let base_url = get(ENV_LLM_URL)
            .unwrap_or_else(|| DEFAULT_LLM_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let model = get(ENV_LLM_MODEL).unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string());

        let timeout_secs = match get(ENV_LLM_TIMEOUT) {
            Some(raw) => raw.parse().map_err(|e| ConfigError::Invalid {
                name: ENV_LLM_TIMEOUT,
                reason: format!("{e} (got {raw:?})"),
            })?,
            None => DEFAULT_LLM_TIMEOUT_SECS,
        };

        Ok(Some(DiagnosisConfig {
            base_url,
            api_key,
            model,
            timeout_secs,
        }))
    }
}
