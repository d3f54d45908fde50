pub mod clients;
pub mod config;
pub mod error;
pub mod extractor;
pub mod prompts;
pub mod schemas;
pub mod service;
pub mod utils;

pub use error::{AgrilokaError, Result};
pub use extractor::{ResponseExtractor, extract};
pub use service::AgriService;

/// Install the global tracing subscriber, writing to stderr so command
/// output on stdout stays machine-readable
pub fn init_tracing(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
