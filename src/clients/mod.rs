pub mod groq;
pub mod regions;
pub mod serpapi;
pub mod traits;

pub use groq::GroqClient;
pub use regions::{RegionClient, RegionLevel};
pub use serpapi::SerpApiClient;
pub use traits::{ChatProvider, ChatRequest, SearchProvider};
