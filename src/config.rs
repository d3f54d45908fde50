use serde::{Deserialize, Serialize};

pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://serpapi.com";
pub const DEFAULT_REGIONS_BASE_URL: &str = "https://emsifa.github.io/api-wilayah-indonesia/api";
pub const DEFAULT_CHAT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_VISION_MODEL: &str = "llama-3.2-11b-vision-preview";
/// Tracing filter used when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "agriloka=info";

/// Main configuration structure loaded from agriloka.toml and environment variables
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub system: SystemConfig,
    pub generation: GenerationConfig,
    /// Runtime configuration loaded from environment variables
    #[serde(skip)]
    pub runtime: RuntimeConfig,
}

/// Upstream endpoints and model identifiers
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SystemConfig {
    pub groq_base_url: String,
    pub search_base_url: String,
    pub regions_base_url: String,
    pub chat_model: String,
    pub vision_model: String,
}

/// Sampling parameters for one kind of completion
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct SamplingConfig {
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

/// Sampling parameters per call type
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    pub chat: SamplingConfig,
    pub vision: SamplingConfig,
    pub analysis: SamplingConfig,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            chat: SamplingConfig {
                temperature: 0.7,
                max_tokens: 1024,
                top_p: 1.0,
            },
            vision: SamplingConfig {
                temperature: 0.7,
                max_tokens: 1024,
                top_p: 1.0,
            },
            analysis: SamplingConfig {
                temperature: 0.7,
                max_tokens: 2000,
                top_p: 0.95,
            },
        }
    }
}

/// Runtime configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub groq_api_key: Option<String>,
    pub serpapi_key: Option<String>,
    pub request_timeout_ms: u64,
    /// Retries per external call; never more than one
    pub max_retries: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            groq_api_key: None,
            serpapi_key: None,
            request_timeout_ms: 20_000,
            max_retries: 1,
        }
    }
}

impl RuntimeConfig {
    /// Load runtime configuration from environment variables
    pub fn load_from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build runtime configuration from any key/value source. Blank values
    /// count as unset; unparseable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| non_empty(lookup(key));
        Self {
            groq_api_key: get("GROQ_API_KEY").or_else(|| get("NEXT_PUBLIC_GROQ_API_KEY")),
            serpapi_key: get("SERPAPI_KEY"),
            request_timeout_ms: get("AGRILOKA_REQUEST_TIMEOUT_MS")
                .and_then(|v| v.parse().ok())
                .filter(|&ms| ms > 0)
                .unwrap_or(defaults.request_timeout_ms),
            max_retries: get("AGRILOKA_MAX_RETRIES")
                .and_then(|v| v.parse::<u32>().ok())
                .map(|n| n.min(1))
                .unwrap_or(defaults.max_retries),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Populate the process environment from AGRILOKA_ENV_FILE if set,
/// otherwise ./.env. Missing files are ignored.
pub fn load_env_file() {
    if let Ok(env_path) = std::env::var("AGRILOKA_ENV_FILE") {
        let _ = dotenvy::from_path(env_path);
    } else {
        let _ = dotenvy::dotenv();
    }
}

impl Config {
    /// Load configuration from TOML file and environment variables
    /// Uses AGRILOKA_CONFIG environment variable or defaults to "agriloka.toml"
    pub fn load() -> anyhow::Result<Self> {
        load_env_file();

        let config_path =
            std::env::var("AGRILOKA_CONFIG").unwrap_or_else(|_| "agriloka.toml".to_string());

        let mut config: Config = if let Ok(content) = std::fs::read_to_string(&config_path) {
            Self::from_toml_str(&content)?
        } else {
            tracing::debug!("Config file {} not found, using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();
        config.runtime = RuntimeConfig::load_from_env();
        config.validate()?;

        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Replace endpoints and model names with any non-blank values from `lookup`
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let overrides: [(&str, &mut String); 5] = [
            ("AGRILOKA_GROQ_BASE_URL", &mut self.system.groq_base_url),
            ("AGRILOKA_SEARCH_BASE_URL", &mut self.system.search_base_url),
            ("AGRILOKA_REGIONS_BASE_URL", &mut self.system.regions_base_url),
            ("AGRILOKA_CHAT_MODEL", &mut self.system.chat_model),
            ("AGRILOKA_VISION_MODEL", &mut self.system.vision_model),
        ];
        for (key, slot) in overrides {
            if let Some(value) = non_empty(lookup(key)) {
                tracing::debug!("{} env override applied", key);
                *slot = value;
            }
        }
    }

    /// Validate endpoints and sampling ranges
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("groq_base_url", &self.system.groq_base_url),
            ("search_base_url", &self.system.search_base_url),
            ("regions_base_url", &self.system.regions_base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://, got '{}'", name, url);
            }
        }
        for (name, sampling) in [
            ("chat", &self.generation.chat),
            ("vision", &self.generation.vision),
            ("analysis", &self.generation.analysis),
        ] {
            if !(0.0..=2.0).contains(&sampling.temperature) {
                anyhow::bail!("generation.{}.temperature must be between 0.0 and 2.0", name);
            }
            if !(0.0..=1.0).contains(&sampling.top_p) {
                anyhow::bail!("generation.{}.top_p must be between 0.0 and 1.0", name);
            }
            if sampling.max_tokens == 0 {
                anyhow::bail!("generation.{}.max_tokens must be > 0", name);
            }
        }
        if self.runtime.groq_api_key.is_none() {
            tracing::warn!("GROQ_API_KEY not set; AI features will return a configuration notice");
        }
        if self.runtime.serpapi_key.is_none() {
            tracing::warn!("SERPAPI_KEY not set; search-backed features will fail");
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            system: SystemConfig {
                groq_base_url: DEFAULT_GROQ_BASE_URL.to_string(),
                search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
                regions_base_url: DEFAULT_REGIONS_BASE_URL.to_string(),
                chat_model: DEFAULT_CHAT_MODEL.to_string(),
                vision_model: DEFAULT_VISION_MODEL.to_string(),
            },
            generation: GenerationConfig::default(),
            runtime: RuntimeConfig::default(),
        }
    }
}
