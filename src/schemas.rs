//! Data shapes shared by the extractor, the clients and the service layer.
//!
//! Field names serialize in camelCase to stay compatible with the JSON the
//! Agriloka web front-end consumes.

use serde::{Deserialize, Serialize};

/// One search-engine result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub snippet: String,
}

impl Snippet {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            snippet: snippet.into(),
        }
    }
}

/// A crop recommended for the analysed plot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedCrop {
    pub name: String,
    #[serde(rename = "yield")]
    pub yield_estimate: String,
    pub duration: String,
    /// Suitability percentage, 0-100
    pub suitability: u32,
    pub economic_value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherConditions {
    /// Degrees Celsius
    pub temperature: u32,
    /// Relative humidity, percent
    pub humidity: u32,
    /// Annual rainfall, millimetres
    pub rainfall: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conclusion {
    pub potential_success: String,
    pub economic_analysis: String,
    pub main_recommendations: String,
    pub action_plan: String,
    pub sustainability: String,
}

/// Structured result of a location-aware crop analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropAnalysis {
    pub suitable_crops: Vec<String>,
    pub recommended_crops: Vec<RecommendedCrop>,
    pub success_rate: u32,
    pub tips: Vec<String>,
    pub weather_conditions: WeatherConditions,
    pub sources: Vec<Snippet>,
    pub conclusion: Conclusion,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Piece of a multi-part message (OpenAI-compatible wire shape)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: MessageContent,
}

impl ChatMessage {
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(text.into()),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(text.into()),
        }
    }

    /// User message carrying a prompt and an inlined JPEG image
    pub fn user_with_image(text: impl Into<String>, image_base64: &str) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:image/jpeg;base64,{}", image_base64),
                    },
                },
            ]),
        }
    }
}

/// Search-enhanced chat answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiResponse {
    pub message: String,
    #[serde(default)]
    pub sources: Vec<Snippet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisionResponse {
    pub description: String,
    pub tags: Vec<String>,
}

/// Location picked for an analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationData {
    pub id: String,
    pub name: String,
}

/// Administrative region (province, regency or district)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn image_message_uses_openai_part_shape() {
        let msg = ChatMessage::user_with_image("lihat", "QUJD");
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "lihat"},
                    {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,QUJD"}}
                ]
            })
        );
    }

    #[test]
    fn recommended_crop_serializes_yield_key() {
        let crop = RecommendedCrop {
            name: "Jagung".into(),
            yield_estimate: "4-6 ton/ha".into(),
            duration: "3-4 bulan".into(),
            suitability: 80,
            economic_value: "Tinggi".into(),
        };
        let value = serde_json::to_value(&crop).unwrap();
        assert_eq!(value["yield"], "4-6 ton/ha");
        assert_eq!(value["economicValue"], "Tinggi");
    }

    #[test]
    fn snippet_tolerates_missing_fields() {
        let s: Snippet = serde_json::from_value(json!({"title": "BMKG"})).unwrap();
        assert_eq!(s.title, "BMKG");
        assert!(s.link.is_empty());
        assert!(s.snippet.is_empty());
    }
}
