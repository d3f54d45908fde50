//! AI service layer: chat, vision, search-enhanced answers and
//! location-aware crop analysis on top of injected providers.

use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info};

use crate::clients::{ChatProvider, ChatRequest, GroqClient, SearchProvider, SerpApiClient};
use crate::config::{Config, GenerationConfig};
use crate::error::{AgrilokaError, Result};
use crate::extractor::ResponseExtractor;
use crate::prompts;
use crate::schemas::{AiResponse, ChatMessage, CropAnalysis, LocationData, Snippet, VisionResponse};
use crate::utils::{CallPolicy, call_with_policy};

// Lines where the vision model echoes our own instructions back
static PROMPT_ECHO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(?:Analisis gambar|Berikan saran praktis|Format jawaban).*$").unwrap()
});

/// Models and sampling parameters the service uses
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub chat_model: String,
    pub vision_model: String,
    pub generation: GenerationConfig,
    pub policy: CallPolicy,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        let config = Config::default();
        Self::from(&config)
    }
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            chat_model: config.system.chat_model.clone(),
            vision_model: config.system.vision_model.clone(),
            generation: config.generation.clone(),
            policy: CallPolicy::new(
                Duration::from_millis(config.runtime.request_timeout_ms),
                config.runtime.max_retries,
            ),
        }
    }
}

pub struct AgriService {
    chat: Option<Arc<dyn ChatProvider>>,
    search: Arc<dyn SearchProvider>,
    extractor: ResponseExtractor,
    settings: ServiceSettings,
}

/// Search provider used when no SerpAPI key is configured
struct UnconfiguredSearch;

#[async_trait::async_trait]
impl SearchProvider for UnconfiguredSearch {
    async fn search(&self, _query: &str) -> Result<Vec<Snippet>> {
        Err(AgrilokaError::Config {
            message: "API key not configured: set SERPAPI_KEY".to_string(),
        })
    }
}

impl AgriService {
    /// `chat` is `None` when no language-model credential is available
    pub fn new(
        chat: Option<Arc<dyn ChatProvider>>,
        search: Arc<dyn SearchProvider>,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            chat,
            search,
            extractor: ResponseExtractor::new(),
            settings,
        }
    }

    /// Wire real Groq and SerpAPI clients from configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = Duration::from_millis(config.runtime.request_timeout_ms);

        let chat: Option<Arc<dyn ChatProvider>> = match &config.runtime.groq_api_key {
            Some(key) => Some(Arc::new(GroqClient::new(
                key.clone(),
                &config.system.groq_base_url,
                timeout,
            )?)),
            None => None,
        };
        let search: Arc<dyn SearchProvider> = match &config.runtime.serpapi_key {
            Some(key) => Arc::new(SerpApiClient::new(
                key.clone(),
                &config.system.search_base_url,
                timeout,
            )?),
            None => Arc::new(UnconfiguredSearch),
        };

        Ok(Self::new(chat, search, ServiceSettings::from(config)))
    }

    pub fn has_chat_provider(&self) -> bool {
        self.chat.is_some()
    }

    async fn complete(
        &self,
        operation: &str,
        chat: &Arc<dyn ChatProvider>,
        request: ChatRequest,
    ) -> Result<String> {
        call_with_policy(operation, self.settings.policy, || chat.complete(&request)).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Snippet>> {
        call_with_policy("search", self.settings.policy, || self.search.search(query)).await
    }

    /// Chat with the Agriloka system prompt prepended
    pub async fn chat_completion(&self, messages: Vec<ChatMessage>) -> Result<String> {
        let Some(chat) = &self.chat else {
            return Ok(prompts::MISSING_CREDENTIALS_NOTICE.to_string());
        };

        let mut all = Vec::with_capacity(messages.len() + 1);
        all.push(ChatMessage::system(prompts::SYSTEM_PROMPT));
        all.extend(messages);

        let request = ChatRequest::new(self.settings.chat_model.clone(), all)
            .with_sampling(self.settings.generation.chat);
        self.complete("chat completion", chat, request).await
    }

    /// Describe a field photo with planting advice
    pub async fn analyze_image(&self, image_base64: &str) -> Result<VisionResponse> {
        let Some(chat) = &self.chat else {
            return Ok(VisionResponse {
                description: prompts::MISSING_CREDENTIALS_NOTICE.to_string(),
                tags: vec![],
            });
        };

        let message = ChatMessage::user_with_image(prompts::VISION_PROMPT, image_base64);
        let request = ChatRequest::new(self.settings.vision_model.clone(), vec![message])
            .with_sampling(self.settings.generation.vision);
        let raw = self.complete("vision analysis", chat, request).await?;

        Ok(VisionResponse {
            description: strip_prompt_echo(&raw),
            tags: vec![],
        })
    }

    /// Answer `query` grounded in web search results
    pub async fn search_enhanced_response(&self, query: &str) -> Result<AiResponse> {
        let results = self.search(query).await?;
        if results.is_empty() {
            info!(query, "Search returned no results");
            return Ok(AiResponse {
                message: prompts::NO_SEARCH_RESULTS_MESSAGE.to_string(),
                sources: vec![],
            });
        }

        let prompt = prompts::search_enhanced_prompt(query, &results);
        let message = self
            .chat_completion(vec![ChatMessage::user(prompt)])
            .await?;

        Ok(AiResponse {
            message,
            sources: results
                .into_iter()
                .take(prompts::SEARCH_CONTEXT_LIMIT)
                .collect(),
        })
    }

    /// Analyse a field photo for `location` using live weather and
    /// agricultural search context
    pub async fn analyze_image_with_location(
        &self,
        image_base64: &str,
        location: &LocationData,
    ) -> Result<CropAnalysis> {
        let Some(chat) = &self.chat else {
            return Err(AgrilokaError::Config {
                message: "AI client not initialized".to_string(),
            });
        };

        let weather_query = prompts::weather_query(&location.name);
        let agriculture_query = prompts::agriculture_query(&location.name);
        let (weather, agriculture) = tokio::try_join!(
            self.search(&weather_query),
            self.search(&agriculture_query)
        )?;
        debug!(
            location = %location.name,
            weather = weather.len(),
            agriculture = agriculture.len(),
            "Collected search context"
        );

        let prompt = prompts::analysis_prompt(&location.name, &weather, &agriculture);
        let message = ChatMessage::user_with_image(prompt, image_base64);
        let request = ChatRequest::new(self.settings.vision_model.clone(), vec![message])
            .with_sampling(self.settings.generation.analysis);
        let narrative = self.complete("crop analysis", chat, request).await?;

        let analysis = self.extractor.extract(&narrative, &weather);
        info!(
            location = %location.name,
            success_rate = analysis.success_rate,
            temperature = analysis.weather_conditions.temperature,
            "Crop analysis complete"
        );
        Ok(analysis)
    }
}

/// Drop lines that repeat the vision prompt, then trim
pub fn strip_prompt_echo(text: &str) -> String {
    PROMPT_ECHO_RE.replace_all(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_echoed_instruction_lines() {
        let raw = "Analisis gambar ini dan identifikasi:\n1. Tanaman padi\nFormat jawaban rapi\nBerikan saran praktis untuk:\n- Pupuk NPK\n";
        assert_eq!(strip_prompt_echo(raw), "1. Tanaman padi\n\n\n- Pupuk NPK");
    }

    #[test]
    fn keeps_text_without_echo() {
        assert_eq!(strip_prompt_echo("  Daun menguning.  "), "Daun menguning.");
    }

    #[test]
    fn settings_follow_config() {
        let mut config = Config::default();
        config.runtime.request_timeout_ms = 1500;
        config.runtime.max_retries = 3;
        let settings = ServiceSettings::from(&config);
        assert_eq!(settings.policy.timeout, Duration::from_millis(1500));
        assert_eq!(settings.policy.max_retries, 1);
        assert_eq!(settings.chat_model, "llama-3.3-70b-versatile");
    }
}
