//! Packing items and the sub-lists that hold them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// A single entry in one of a packing list's sub-lists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackingItem {
    /// Unique item ID
    pub id: String,
    /// Display name as the user entered it
    pub name: String,
    /// Only meaningful inside the "to pack" sub-list
    #[serde(default)]
    pub packed: bool,
}

impl PackingItem {
    /// Create an unpacked item with a fresh random ID.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            packed: false,
        }
    }

    /// Create an unpacked item with an explicit ID.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            packed: false,
        }
    }

    /// The name as used for duplicate detection (trimmed, lowercased).
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }
}

impl fmt::Display for PackingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.packed { "[x]" } else { "[ ]" };
        write!(f, "{} {}", check, self.name)
    }
}

/// Normalize an item or list name for case-insensitive comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The three sub-lists of a packing list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListType {
    #[serde(rename = "toPack")]
    ToPack,
    #[serde(rename = "toBuy")]
    ToBuy,
    #[serde(rename = "suggestions")]
    Suggestions,
}

impl ListType {
    pub const ALL: [ListType; 3] = [ListType::ToPack, ListType::ToBuy, ListType::Suggestions];

    /// Key used in the persisted and remote representations.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListType::ToPack => "toPack",
            ListType::ToBuy => "toBuy",
            ListType::Suggestions => "suggestions",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            ListType::ToPack => "To pack",
            ListType::ToBuy => "To buy",
            ListType::Suggestions => "Suggestions",
        }
    }

    /// The sub-list checked alongside this one by the duplicate-item policy.
    ///
    /// Suggestions have no counterpart.
    pub fn counterpart(&self) -> Option<ListType> {
        match self {
            ListType::ToPack => Some(ListType::ToBuy),
            ListType::ToBuy => Some(ListType::ToPack),
            ListType::Suggestions => None,
        }
    }
}

impl fmt::Display for ListType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ListType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "topack" | "pack" => Ok(ListType::ToPack),
            "tobuy" | "buy" => Ok(ListType::ToBuy),
            "suggestions" | "suggestion" => Ok(ListType::Suggestions),
            _ => Err(format!("Unknown sub-list: {}", s)),
        }
    }
}
