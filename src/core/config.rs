//! Loads the provider and chain settings from `~/.support-chain/config.toml`.

use llm::builder::{LLMBackend, LLMBuilder};
use llm::LLMProvider;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use super::categories::{CategoryPolicy, CategorySet, DEFAULT_CATEGORIES, DEFAULT_FALLBACK};
use super::details::{DetailsSentinel, SentinelMatch, DEFAULT_SENTINEL};

/// Errors raised while assembling the runtime configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Environment variable '{0}' is not set; the completion service needs a credential")]
    MissingCredential(String),

    #[error("Failed to build LLM provider: {0}")]
    Provider(#[from] llm::error::LLMError),
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    provider: ProviderSettings,
    #[serde(default)]
    chain: ChainFileSection,
}

/// Which completion service to talk to and how.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProviderSettings {
    pub backend: String,
    pub model: String,
    pub api_key_env: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: Option<u32>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            backend: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: None,
            base_url: None,
            max_tokens: None,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default, deny_unknown_fields)]
struct ChainFileSection {
    categories: Vec<String>,
    default_category: String,
    category_policy: CategoryPolicy,
    details_sentinel: String,
    sentinel_match: SentinelMatch,
    concurrency: usize,
}

impl Default for ChainFileSection {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
            default_category: DEFAULT_FALLBACK.to_string(),
            category_policy: CategoryPolicy::default(),
            details_sentinel: DEFAULT_SENTINEL.to_string(),
            sentinel_match: SentinelMatch::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Number of queries a batch runs at once unless configured otherwise.
pub const DEFAULT_CONCURRENCY: usize = 4;

/// Immutable settings the chain is constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainConfig {
    pub categories: CategorySet,
    pub policy: CategoryPolicy,
    pub sentinel: DetailsSentinel,
}

/// Everything read from the config file.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderSettings,
    pub chain: ChainConfig,
    pub concurrency: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderSettings::default(),
            chain: ChainConfig::default(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// `~/.support-chain/config.toml`, if `HOME` is known.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("HOME").map(|home| {
        PathBuf::from(home)
            .join(".support-chain")
            .join("config.toml")
    })
}

impl AppConfig {
    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used when present and built-in defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match default_config_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse { path, source },
            other => other,
        })
    }

    /// Parses a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            source,
        })?;

        let categories =
            CategorySet::new(file.chain.categories, &file.chain.default_category)
                .map_err(ConfigError::Invalid)?;
        if file.chain.details_sentinel.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "details_sentinel must not be empty".to_string(),
            ));
        }

        Ok(Self {
            provider: file.provider,
            chain: ChainConfig {
                categories,
                policy: file.chain.category_policy,
                sentinel: DetailsSentinel::new(
                    file.chain.details_sentinel.trim(),
                    file.chain.sentinel_match,
                ),
            },
            concurrency: file.chain.concurrency.max(1),
        })
    }
}

/// Default credential variable for a backend, `None` when it needs no key.
fn default_api_key_env(backend: &LLMBackend) -> Option<&'static str> {
    match backend {
        LLMBackend::OpenAI => Some("OPENAI_API_KEY"),
        LLMBackend::Anthropic => Some("ANTHROPIC_API_KEY"),
        LLMBackend::Google => Some("GOOGLE_API_KEY"),
        LLMBackend::Groq => Some("GROQ_API_KEY"),
        LLMBackend::XAI => Some("XAI_API_KEY"),
        LLMBackend::Cohere => Some("COHERE_API_KEY"),
        LLMBackend::DeepSeek => Some("DEEPSEEK_API_KEY"),
        LLMBackend::Mistral => Some("MISTRAL_API_KEY"),
        LLMBackend::Ollama => None,
        _ => Some("LLM_API_KEY"),
    }
}

impl ProviderSettings {
    fn parse_backend(&self) -> Result<LLMBackend, ConfigError> {
        LLMBackend::from_str(&self.backend)
            .map_err(|_| ConfigError::Invalid(format!("Unknown backend '{}'", self.backend)))
    }

    /// Name of the environment variable holding the credential, if one is needed.
    pub fn credential_var(&self) -> Result<Option<String>, ConfigError> {
        if let Some(var) = &self.api_key_env {
            return Ok(Some(var.clone()));
        }
        let backend = self.parse_backend()?;
        Ok(default_api_key_env(&backend).map(str::to_string))
    }

    /// Reads the credential from the environment.
    pub fn api_key(&self) -> Result<Option<String>, ConfigError> {
        let Some(var) = self.credential_var()? else {
            return Ok(None);
        };
        match env::var(&var) {
            Ok(key) if !key.trim().is_empty() => Ok(Some(key)),
            _ => Err(ConfigError::MissingCredential(var)),
        }
    }

    /// Builds the `llm` provider with deterministic sampling.
    pub fn build_provider(&self) -> Result<Box<dyn LLMProvider>, ConfigError> {
        let backend = self.parse_backend()?;
        let api_key = self.api_key()?;

        let mut builder = LLMBuilder::new()
            .backend(backend)
            .model(&self.model)
            .temperature(0.0);

        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(max_tokens) = self.max_tokens {
            builder = builder.max_tokens(max_tokens);
        }

        Ok(builder.build()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.provider, ProviderSettings::default());
        assert_eq!(cfg.chain, ChainConfig::default());
        assert_eq!(cfg.concurrency, DEFAULT_CONCURRENCY);
    }

    #[test]
    fn chain_section_overrides_defaults() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [provider]
            backend = "anthropic"
            model = "claude-3-5-haiku-latest"
            max_tokens = 256

            [chain]
            categories = ["Fraud", "Other"]
            default_category = "Other"
            category_policy = "strict"
            details_sentinel = "Nothing needed"
            sentinel_match = "contains"
            concurrency = 0
            "#,
        )
        .unwrap();

        assert_eq!(cfg.provider.backend, "anthropic");
        assert_eq!(cfg.provider.max_tokens, Some(256));
        assert_eq!(cfg.chain.categories.labels(), ["Fraud", "Other"]);
        assert_eq!(cfg.chain.policy, CategoryPolicy::Strict);
        assert_eq!(cfg.chain.sentinel.text, "Nothing needed");
        assert_eq!(cfg.chain.sentinel.mode, SentinelMatch::Contains);
        assert_eq!(cfg.concurrency, 1);
    }

    #[test]
    fn default_category_must_be_listed() {
        let err = AppConfig::from_toml_str(
            r#"
            [chain]
            categories = ["Fraud"]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AppConfig::from_toml_str("[chain]\ntemperature = 0.7\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn explicit_api_key_env_wins() {
        let settings = ProviderSettings {
            api_key_env: Some("MY_KEY".to_string()),
            ..ProviderSettings::default()
        };
        assert_eq!(settings.credential_var().unwrap().as_deref(), Some("MY_KEY"));
    }

    #[test]
    fn ollama_needs_no_credential() {
        let settings = ProviderSettings {
            backend: "ollama".to_string(),
            ..ProviderSettings::default()
        };
        assert_eq!(settings.credential_var().unwrap(), None);
        assert_eq!(settings.api_key().unwrap(), None);
    }

    #[test]
    fn missing_credential_is_fatal() {
        let settings = ProviderSettings {
            api_key_env: Some("SUPPORT_CHAIN_TEST_UNSET_KEY".to_string()),
            ..ProviderSettings::default()
        };
        match settings.api_key() {
            Err(ConfigError::MissingCredential(var)) => {
                assert_eq!(var, "SUPPORT_CHAIN_TEST_UNSET_KEY")
            }
            other => panic!("expected missing credential, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[provider]\nmodel = \"gpt-4o\"\n").unwrap();
        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.provider.model, "gpt-4o");
        assert_eq!(cfg.provider.backend, "openai");
    }
}
