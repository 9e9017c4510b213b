//! AI packing suggestions for the active list.

use std::sync::Arc;

use chrono::NaiveDate;
use clap::Args;

use pack_it_core::suggest::{ChatCompletionClient, OpenWeatherClient};
use pack_it_core::{SuggestionGenerator, TripDetails};

use crate::app::App;
use crate::config::Config;

/// Generate packing suggestions for a trip
#[derive(Args)]
pub struct SuggestCommand {
    /// Destination
    #[arg(long, short)]
    location: Option<String>,

    /// Start date (YYYY-MM-DD)
    #[arg(long, short)]
    start: Option<NaiveDate>,

    /// End date (YYYY-MM-DD)
    #[arg(long, short)]
    end: Option<NaiveDate>,

    /// Planned activities, e.g. "hiking, swimming"
    #[arg(long, short)]
    activities: Option<String>,
}

impl SuggestCommand {
    pub fn run(&self, app: &mut App) -> Result<(), Box<dyn std::error::Error>> {
        if let (Some(start), Some(end)) = (self.start, self.end) {
            if end < start {
                return Err("End date is before start date".into());
            }
        }

        let generator = build_generator(&app.config);
        let trip = TripDetails::new(self.location.clone().unwrap_or_default())
            .with_dates(self.start, self.end)
            .with_activities(self.activities.clone().unwrap_or_default());

        let rt = tokio::runtime::Runtime::new()?;
        println!("Generating suggestions...");
        let outcome = rt.block_on(generator.generate(&mut app.store, &trip));

        println!("Weather: {}", outcome.weather_hint);
        println!();

        if let Some(error) = &outcome.completion_error {
            eprintln!("Could not generate suggestions: {}", error);
            eprintln!("Existing suggestions were kept.");
            return Ok(());
        }

        if outcome.items.is_empty() {
            println!("No new suggestions.");
        } else {
            println!("Suggestions ({})", outcome.items.len());
            println!("{}", "-".repeat(44));
            for name in &outcome.items {
                println!("  {}", name);
            }
            println!();
            println!("Use 'packit item move <name> --from suggestions --to to-pack' to keep one.");
        }
        Ok(())
    }
}

fn build_generator(config: &Config) -> SuggestionGenerator {
    let mut completion = ChatCompletionClient::new(config.ai.api_key.clone().unwrap_or_default());
    if let Some(endpoint) = &config.ai.endpoint {
        completion = completion.with_endpoint(endpoint.clone());
    }
    if let Some(model) = &config.ai.model {
        completion = completion.with_model(model.clone());
    }

    let mut generator = SuggestionGenerator::new(Arc::new(completion));
    if let Some(key) = &config.weather.api_key {
        let mut weather = OpenWeatherClient::new(key.clone());
        if let Some(base_url) = &config.weather.base_url {
            weather = weather.with_base_url(base_url.clone());
        }
        generator = generator.with_weather(Arc::new(weather));
    }
    generator
}
