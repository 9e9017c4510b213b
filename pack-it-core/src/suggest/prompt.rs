//! Prompt construction and response parsing.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::models::{normalize_name, ListType, PackingListData};

/// What the user told us about the trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripDetails {
    pub location: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub activities: String,
}

impl TripDetails {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    pub fn with_dates(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_activities(mut self, activities: impl Into<String>) -> Self {
        self.activities = activities.into();
        self
    }

    /// Trimmed location, `None` when blank.
    pub fn location(&self) -> Option<&str> {
        let location = self.location.trim();
        (!location.is_empty()).then_some(location)
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%a %b %d %Y").to_string(),
        None => "Unknown".to_string(),
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// Builds the completion prompt for a trip.
pub fn build_prompt(trip: &TripDetails, weather: &str) -> String {
    format!(
        "I am preparing for a trip and need to create a packing list.\n\
         \n\
         Here are the trip details:\n\
         - Destination: {}\n\
         - Start Date: {}\n\
         - End Date: {}\n\
         - Activities: {}\n\
         - Weather forecast: {}\n\
         \n\
         Please provide a simple, plain list of packing items. One item per line. \
         Do not include categories, numbers, or extra formatting.\n",
        trip.location().unwrap_or("Unknown"),
        format_date(trip.start_date),
        format_date(trip.end_date),
        or_placeholder(&trip.activities, "None"),
        or_placeholder(weather, "No forecast"),
    )
}

/// Removes one leading bullet or enumeration marker.
fn strip_marker(line: &str) -> &str {
    for bullet in ['-', '*', '•'] {
        if let Some(rest) = line.strip_prefix(bullet) {
            return rest.trim_start();
        }
    }

    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        let rest = &line[digits..];
        if let Some(rest) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
            return rest.trim_start();
        }
    }
    line
}

/// Splits completion text into item names.
///
/// Names already in the list's "to buy" or "to pack" sub-lists are dropped,
/// as are repeats within the response. Both comparisons ignore case.
pub fn parse_suggestions(text: &str, list: Option<&PackingListData>) -> Vec<String> {
    let mut seen: HashSet<String> = list
        .map(|list| {
            list.items(ListType::ToBuy)
                .iter()
                .chain(list.items(ListType::ToPack))
                .map(|item| item.normalized_name())
                .collect()
        })
        .unwrap_or_default();

    text.lines()
        .map(|line| strip_marker(line.trim()).trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(normalize_name(name)))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PackingItem;

    #[test]
    fn test_build_prompt_with_everything() {
        let trip = TripDetails::new("Lisbon")
            .with_dates(
                NaiveDate::from_ymd_opt(2025, 6, 2),
                NaiveDate::from_ymd_opt(2025, 6, 9),
            )
            .with_activities("surfing");
        let prompt = build_prompt(&trip, "light rain");

        assert!(prompt.contains("- Destination: Lisbon\n"));
        assert!(prompt.contains("- Start Date: Mon Jun 02 2025\n"));
        assert!(prompt.contains("- End Date: Mon Jun 09 2025\n"));
        assert!(prompt.contains("- Activities: surfing\n"));
        assert!(prompt.contains("- Weather forecast: light rain\n"));
        assert!(prompt.contains("One item per line."));
    }

    #[test]
    fn test_build_prompt_placeholders() {
        let prompt = build_prompt(&TripDetails::new("  "), "");

        assert!(prompt.contains("- Destination: Unknown\n"));
        assert!(prompt.contains("- Start Date: Unknown\n"));
        assert!(prompt.contains("- End Date: Unknown\n"));
        assert!(prompt.contains("- Activities: None\n"));
        assert!(prompt.contains("- Weather forecast: No forecast\n"));
    }

    #[test]
    fn test_strip_marker() {
        assert_eq!(strip_marker("- Socks"), "Socks");
        assert_eq!(strip_marker("* Hat"), "Hat");
        assert_eq!(strip_marker("• Sunscreen"), "Sunscreen");
        assert_eq!(strip_marker("1. Passport"), "Passport");
        assert_eq!(strip_marker("12) Charger"), "Charger");
        assert_eq!(strip_marker("3 T-shirts"), "3 T-shirts");
        assert_eq!(strip_marker("Rain-jacket"), "Rain-jacket");
    }

    #[test]
    fn test_parse_suggestions() {
        let text = "Socks\n\n  - Hat  \n1. Sunscreen\n   \n";
        assert_eq!(parse_suggestions(text, None), vec!["Socks", "Hat", "Sunscreen"]);
    }

    #[test]
    fn test_parse_suggestions_filters_existing_names() {
        let mut list = PackingListData::new("Trip");
        list.to_pack.push(PackingItem::with_id("1", "Passport"));
        list.to_buy.push(PackingItem::with_id("2", "Sunscreen"));
        list.suggestions.push(PackingItem::with_id("3", "Hat"));

        let text = "passport\nSUNSCREEN\nHat\nSocks\nsocks";
        assert_eq!(parse_suggestions(text, Some(&list)), vec!["Hat", "Socks"]);
    }
}
