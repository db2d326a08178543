use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct InvoicingConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub database: DatabaseConfig,
    pub pdf: PdfConfig,
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PdfConfig {
    pub backend: PdfBackend,
    pub chrome_path: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PdfBackend {
    Chromium,
    Mock,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    pub provider: AiProvider,
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    Groq,
    Mock,
}

impl InvoicingConfig {
    pub fn load() -> Result<Self, AppError> {
        // Load common config (handles .env and APP__ prefix)
        let common_config = core_config::Config::load()?;

        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(InvoicingConfig {
            common: common_config,
            database: DatabaseConfig {
                url: get_env("DATABASE_URL", None, is_prod)?,
                max_connections: parse_env("DATABASE_MAX_CONNECTIONS", "10", is_prod)?,
                min_connections: parse_env("DATABASE_MIN_CONNECTIONS", "2", is_prod)?,
            },
            pdf: PdfConfig {
                backend: get_env("PDF_BACKEND", Some("chromium"), is_prod)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
                chrome_path: env::var("CHROME_PATH").ok(),
                timeout_secs: parse_env("PDF_TIMEOUT_SECS", "20", is_prod)?,
            },
            ai: AiConfig {
                provider: get_env("AI_PROVIDER", Some("groq"), is_prod)?
                    .parse()
                    .map_err(|e: String| AppError::ConfigError(anyhow::anyhow!(e)))?,
                // Only needed when the provider is groq; the mock runs without it.
                api_key: env::var("GROQ_API_KEY").unwrap_or_default(),
                model: get_env("GROQ_MODEL", Some("llama-3.3-70b-versatile"), is_prod)?,
                base_url: get_env(
                    "GROQ_BASE_URL",
                    Some("https://api.groq.com/openai/v1"),
                    is_prod,
                )?,
                timeout_secs: parse_env("AI_TIMEOUT_SECS", "30", is_prod)?,
            },
        })
    }
}

impl FromStr for PdfBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chromium" => Ok(PdfBackend::Chromium),
            "mock" => Ok(PdfBackend::Mock),
            _ => Err(format!("Invalid PDF backend: {}", s)),
        }
    }
}

impl FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "groq" => Ok(AiProvider::Groq),
            "mock" => Ok(AiProvider::Mock),
            _ => Err(format!("Invalid AI provider: {}", s)),
        }
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required in production but not set",
                    key
                ))))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(format!(
                    "{} is required but not set",
                    key
                ))))
            }
        }
    }
}

fn parse_env<T: FromStr>(key: &str, default: &str, is_prod: bool) -> Result<T, AppError> {
    get_env(key, Some(default), is_prod)?
        .parse()
        .map_err(|_| AppError::ConfigError(anyhow::anyhow!(format!("{} must be a number", key))))
}
