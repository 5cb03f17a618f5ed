//! Application configuration

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use moodsim_domain::{HistoryBuffer, Mood};
use url::{Host, Url};

use crate::infrastructure::chat_completions::{
    DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use crate::prompt_templates::PromptTemplates;
use crate::use_cases::mood::{ClassificationMode, MoodClassifierConfig};
use crate::use_cases::reply::ReplyGeneratorConfig;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Chat-completions connection
    pub llm: LlmConfig,
    /// Input, output and session settings
    pub simulation: SimulationConfig,
    /// Mood classification call settings
    pub classifier: MoodClassifierConfig,
    /// Reply generation call settings
    pub generator: ReplyGeneratorConfig,
    /// Resolved prompt templates
    pub prompts: PromptTemplates,
}

/// Chat-completions connection settings
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// API base URL, including the version segment
    pub base_url: String,
    /// Bearer token; `None` only for local servers
    pub api_key: Option<String>,
    /// Model identifier
    pub model: String,
    /// Transport timeout
    pub timeout_secs: u64,
}

/// Run settings
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    /// JSON array of player messages
    pub input_path: PathBuf,
    /// Line-delimited JSON log
    pub output_path: PathBuf,
    /// Utterances remembered per player
    pub history_capacity: usize,
    /// Mood of a freshly created session
    pub default_mood: Mood,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let base_url = var("LLM_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_key = var("LLM_API_KEY").or_else(|| var("GROQ_API_KEY"));
        if api_key.is_none() && !is_local_url(&base_url) {
            anyhow::bail!(
                "LLM_API_KEY (or GROQ_API_KEY) environment variable is required for {}",
                base_url
            );
        }

        let llm = LlmConfig {
            base_url,
            api_key,
            model: var("LLM_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout_secs: parse_var(&var, "LLM_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        };

        let simulation = SimulationConfig {
            input_path: var("MOODSIM_INPUT")
                .unwrap_or_else(|| "players.json".to_string())
                .into(),
            output_path: var("MOODSIM_OUTPUT")
                .unwrap_or_else(|| "npc_log.txt".to_string())
                .into(),
            history_capacity: parse_var(
                &var,
                "MOODSIM_HISTORY_CAPACITY",
                HistoryBuffer::DEFAULT_CAPACITY,
            )?,
            default_mood: parse_var(&var, "MOODSIM_DEFAULT_MOOD", Mood::default())?,
        };
        anyhow::ensure!(
            simulation.history_capacity >= 1,
            "MOODSIM_HISTORY_CAPACITY must be at least 1"
        );

        let classifier_defaults = MoodClassifierConfig::default();
        let classifier = MoodClassifierConfig {
            mode: parse_var(
                &var,
                "MOODSIM_CLASSIFICATION_MODE",
                ClassificationMode::default(),
            )?,
            temperature: parse_temperature(
                &var,
                "MOODSIM_CLASSIFICATION_TEMPERATURE",
                classifier_defaults.temperature,
            )?,
            max_tokens: parse_var(
                &var,
                "MOODSIM_CLASSIFICATION_MAX_TOKENS",
                classifier_defaults.max_tokens,
            )?,
        };

        let generator_defaults = ReplyGeneratorConfig::default();
        let generator = ReplyGeneratorConfig {
            temperature: parse_temperature(
                &var,
                "MOODSIM_GENERATION_TEMPERATURE",
                generator_defaults.temperature,
            )?,
            max_tokens: parse_var(
                &var,
                "MOODSIM_GENERATION_MAX_TOKENS",
                generator_defaults.max_tokens,
            )?,
        };

        Ok(Self {
            llm,
            simulation,
            classifier,
            generator,
            prompts: PromptTemplates::from_lookup(lookup),
        })
    }
}

fn parse_var<T, F>(var: &F, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("{} has an invalid value: '{}'", key, raw)),
        None => Ok(default),
    }
}

fn parse_temperature<F>(var: &F, key: &str, default: f32) -> Result<f32>
where
    F: Fn(&str) -> Option<String>,
{
    let temperature: f32 = parse_var(var, key, default)?;
    anyhow::ensure!(
        (0.0..=2.0).contains(&temperature),
        "{} must be between 0 and 2, got {}",
        key,
        temperature
    );
    Ok(temperature)
}

/// Servers on the loopback interface are allowed to run without a key.
fn is_local_url(base_url: &str) -> bool {
    let Ok(url) = Url::parse(base_url) else {
        return false;
    };
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback() || ip.is_unspecified(),
        Some(Host::Ipv6(ip)) => ip.is_loopback() || ip.is_unspecified(),
        None => false,
    }
}
