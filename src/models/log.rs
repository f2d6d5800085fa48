use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::food::{FoodItem, Nutrition};

/// A consumed item and when it was logged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub item: FoodItem,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(item: FoodItem, timestamp: DateTime<Utc>) -> Self {
        Self { item, timestamp }
    }

    /// Log an item at the current time.
    pub fn now(item: FoodItem) -> Self {
        Self::new(item, Utc::now())
    }
}

/// Total nutrition consumed across a history.
pub fn consumed_totals(entries: &[LogEntry]) -> Nutrition {
    Nutrition::of_items(entries.iter().map(|e| &e.item))
}
