//! Crop-analysis extraction: turns a model's free-text narrative plus
//! supporting search snippets into a fully populated [`CropAnalysis`].
//!
//! Extraction is best-effort pattern matching. Every field has a documented
//! fallback, so [`ResponseExtractor::extract`] is total over its input.

pub mod defaults;
pub mod rules;

use tracing::debug;

use crate::schemas::{CropAnalysis, RecommendedCrop, Snippet, WeatherConditions};
use defaults::{
    DEFAULT_HUMIDITY_PCT, DEFAULT_RAINFALL_MM, DEFAULT_SUCCESS_RATE, DEFAULT_TEMPERATURE_C,
    RECOMMENDED_CROP_COUNT,
};

/// Heuristic extractor for crop-analysis narratives
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseExtractor;

impl ResponseExtractor {
    pub fn new() -> Self {
        ResponseExtractor
    }

    /// Build a [`CropAnalysis`] from `narrative`, using `snippets` as weather
    /// fallback and passing them through as sources
    pub fn extract(&self, narrative: &str, snippets: &[Snippet]) -> CropAnalysis {
        let success_rate = rules::success_rate(narrative).unwrap_or(DEFAULT_SUCCESS_RATE);
        let recommended_crops = self.recommended_crops(narrative);
        let weather_conditions = self.weather_conditions(narrative, snippets);

        CropAnalysis {
            suitable_crops: recommended_crops.iter().map(|c| c.name.clone()).collect(),
            recommended_crops,
            success_rate,
            tips: defaults::tips(),
            weather_conditions,
            sources: snippets.to_vec(),
            conclusion: defaults::conclusion(success_rate),
        }
    }

    fn recommended_crops(&self, narrative: &str) -> Vec<RecommendedCrop> {
        let names = rules::crop_names(narrative);
        if names.len() < RECOMMENDED_CROP_COUNT {
            debug!(
                found = names.len(),
                "Too few crop names in narrative, using default crop list"
            );
            return defaults::default_crops();
        }
        names
            .into_iter()
            .take(RECOMMENDED_CROP_COUNT)
            .map(defaults::crop_from_name)
            .collect()
    }

    fn weather_conditions(&self, narrative: &str, snippets: &[Snippet]) -> WeatherConditions {
        let temperature = rules::temperature(&rules::weather_text(snippets))
            .or_else(|| rules::temperature(narrative))
            .unwrap_or_else(|| {
                debug!("No plausible temperature found, using default");
                DEFAULT_TEMPERATURE_C
            });

        WeatherConditions {
            temperature,
            humidity: rules::humidity(narrative).unwrap_or(DEFAULT_HUMIDITY_PCT),
            rainfall: rules::rainfall(narrative).unwrap_or(DEFAULT_RAINFALL_MM),
        }
    }
}

/// Convenience wrapper around [`ResponseExtractor::extract`]
pub fn extract(narrative: &str, snippets: &[Snippet]) -> CropAnalysis {
    ResponseExtractor::new().extract(narrative, snippets)
}
