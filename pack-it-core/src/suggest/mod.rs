//! AI packing suggestions.
//!
//! [`SuggestionGenerator`] asks a [`WeatherSource`] for a forecast, builds a
//! prompt, and writes the [`CompletionSource`] reply into the active list's
//! suggestions.

mod completion;
mod generator;
mod prompt;
mod weather;

use thiserror::Error;

pub use completion::{
    ChatCompletionClient, CompletionSource, DEFAULT_COMPLETION_MODEL, DEFAULT_COMPLETION_URL,
};
pub use generator::{SuggestionGenerator, SuggestionOutcome};
pub use prompt::{build_prompt, parse_suggestions, TripDetails};
pub use weather::{OpenWeatherClient, WeatherSource, DEFAULT_WEATHER_URL};

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("service returned HTTP {0}")]
    Status(u16),
}
