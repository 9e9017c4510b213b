use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use super::prompt::{build_prompt, parse_suggestions, TripDetails};
use super::{CompletionSource, WeatherSource};
use crate::models::{ListType, PackingItem};
use crate::store::PackingStore;

const NO_LOCATION_HINT: &str = "No weather data available";
const NO_FORECAST_HINT: &str = "No forecast";

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionOutcome {
    /// Weather text that went into the prompt
    pub weather_hint: String,
    /// Names written to the suggestions sub-list
    pub items: Vec<String>,
    /// Set when the completion call failed and suggestions were left untouched
    pub completion_error: Option<String>,
}

impl SuggestionOutcome {
    pub fn completion_failed(&self) -> bool {
        self.completion_error.is_some()
    }
}

/// Generates trip suggestions into the active list.
pub struct SuggestionGenerator {
    weather: Option<Arc<dyn WeatherSource>>,
    completion: Arc<dyn CompletionSource>,
}

impl SuggestionGenerator {
    pub fn new(completion: Arc<dyn CompletionSource>) -> Self {
        Self {
            weather: None,
            completion,
        }
    }

    pub fn with_weather(mut self, weather: Arc<dyn WeatherSource>) -> Self {
        self.weather = Some(weather);
        self
    }

    async fn weather_hint(&self, trip: &TripDetails) -> String {
        let Some(location) = trip.location() else {
            return NO_LOCATION_HINT.to_string();
        };
        let Some(weather) = &self.weather else {
            return NO_FORECAST_HINT.to_string();
        };

        match weather.forecast_summary(location).await {
            Ok(Some(summary)) => summary,
            Ok(None) => NO_FORECAST_HINT.to_string(),
            Err(e) => {
                warn!("Weather lookup failed for {}: {}", location, e);
                NO_FORECAST_HINT.to_string()
            }
        }
    }

    /// Asks for suggestions and replaces the active list's suggestions.
    ///
    /// Never fails: weather problems degrade the hint, completion problems
    /// keep the previous suggestions and are reported in the outcome.
    pub async fn generate(&self, store: &mut PackingStore, trip: &TripDetails) -> SuggestionOutcome {
        let weather_hint = self.weather_hint(trip).await;
        let prompt = build_prompt(trip, &weather_hint);
        debug!(weather = %weather_hint, "Requesting packing suggestions");

        let text = match self.completion.complete(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to generate suggestions: {}", e);
                return SuggestionOutcome {
                    weather_hint,
                    items: Vec::new(),
                    completion_error: Some(e.to_string()),
                };
            }
        };

        let items = parse_suggestions(&text, store.active_list());
        let timestamp = Utc::now().timestamp_millis();

        store.clear_list(ListType::Suggestions);
        for name in &items {
            store.add_item(
                ListType::Suggestions,
                PackingItem::with_id(format!("{}-{}", timestamp, name), name.as_str()),
            );
        }
        info!(count = items.len(), "Generated packing suggestions");

        SuggestionOutcome {
            weather_hint,
            items,
            completion_error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::suggest::SuggestError;

    struct FixedWeather(Result<Option<String>, u16>);

    #[async_trait]
    impl WeatherSource for FixedWeather {
        async fn forecast_summary(&self, _location: &str) -> Result<Option<String>, SuggestError> {
            self.0.clone().map_err(SuggestError::Status)
        }
    }

    /// Replies with canned text and remembers the prompt.
    struct ScriptedCompletion {
        reply: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedCompletion {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing(status: u16) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(status),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().cloned().unwrap_or_default()
        }
    }

    #[async_trait]
    impl CompletionSource for ScriptedCompletion {
        async fn complete(&self, prompt: &str) -> Result<String, SuggestError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone().map_err(SuggestError::Status)
        }
    }

    fn suggestion_names(store: &PackingStore) -> Vec<String> {
        store
            .active_list()
            .unwrap()
            .items(ListType::Suggestions)
            .iter()
            .map(|i| i.name.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_generate_replaces_suggestions() {
        let completion = ScriptedCompletion::replying("- Socks\n- Hat\n\n- Passport");
        let generator = SuggestionGenerator::new(completion.clone())
            .with_weather(Arc::new(FixedWeather(Ok(Some("clear sky".to_string())))));

        let mut store = PackingStore::in_memory();
        store.add_item(ListType::ToPack, PackingItem::with_id("1", "Passport"));
        store.add_item(ListType::Suggestions, PackingItem::with_id("old", "Umbrella"));

        let outcome = generator
            .generate(&mut store, &TripDetails::new("Lisbon"))
            .await;

        assert_eq!(outcome.items, vec!["Socks", "Hat"]);
        assert_eq!(outcome.weather_hint, "clear sky");
        assert!(!outcome.completion_failed());
        assert_eq!(suggestion_names(&store), vec!["Socks", "Hat"]);
        assert!(completion.last_prompt().contains("- Weather forecast: clear sky"));

        let ids: Vec<_> = store
            .active_list()
            .unwrap()
            .suggestions
            .iter()
            .map(|i| i.id.clone())
            .collect();
        assert!(ids[0].ends_with("-Socks"));
        assert!(ids[1].ends_with("-Hat"));
    }

    #[tokio::test]
    async fn test_generate_without_location() {
        let completion = ScriptedCompletion::replying("Socks");
        let generator = SuggestionGenerator::new(completion.clone())
            .with_weather(Arc::new(FixedWeather(Ok(Some("sunny".to_string())))));
        let mut store = PackingStore::in_memory();

        let outcome = generator.generate(&mut store, &TripDetails::default()).await;

        assert_eq!(outcome.weather_hint, "No weather data available");
        assert!(completion
            .last_prompt()
            .contains("- Weather forecast: No weather data available"));
        assert!(completion.last_prompt().contains("- Destination: Unknown"));
    }

    #[tokio::test]
    async fn test_weather_failure_degrades() {
        let generator = SuggestionGenerator::new(ScriptedCompletion::replying("Socks"))
            .with_weather(Arc::new(FixedWeather(Err(401))));
        let mut store = PackingStore::in_memory();

        let outcome = generator
            .generate(&mut store, &TripDetails::new("Oslo"))
            .await;
        assert_eq!(outcome.weather_hint, "No forecast");
        assert_eq!(outcome.items, vec!["Socks"]);

        let generator = SuggestionGenerator::new(ScriptedCompletion::replying("Socks"))
            .with_weather(Arc::new(FixedWeather(Ok(None))));
        let outcome = generator
            .generate(&mut store, &TripDetails::new("Oslo"))
            .await;
        assert_eq!(outcome.weather_hint, "No forecast");
    }

    #[tokio::test]
    async fn test_completion_failure_keeps_suggestions() {
        let generator = SuggestionGenerator::new(ScriptedCompletion::failing(500));
        let mut store = PackingStore::in_memory();
        store.add_item(ListType::Suggestions, PackingItem::with_id("old", "Umbrella"));

        let outcome = generator
            .generate(&mut store, &TripDetails::new("Oslo"))
            .await;

        assert!(outcome.completion_failed());
        assert!(outcome.items.is_empty());
        assert_eq!(suggestion_names(&store), vec!["Umbrella"]);
    }

    #[tokio::test]
    async fn test_empty_response_clears_suggestions() {
        let generator = SuggestionGenerator::new(ScriptedCompletion::replying(""));
        let mut store = PackingStore::in_memory();
        store.add_item(ListType::Suggestions, PackingItem::with_id("old", "Umbrella"));

        let outcome = generator
            .generate(&mut store, &TripDetails::new("Oslo"))
            .await;

        assert!(outcome.items.is_empty());
        assert!(suggestion_names(&store).is_empty());
    }
}
