//! Contract with the optional external text-understanding service.
//!
//! The service itself lives outside this crate. What lives here is the
//! prompt it is given, the decoder for what it sends back, and the
//! fallback to the local normalizer when anything goes wrong.

use std::fs;
use std::path::PathBuf;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::menu::normalizer::normalize_menu;
use crate::models::{Category, FoodItem};

pub const DEFAULT_ITEM_NAME: &str = "Unknown Item";
pub const DEFAULT_SERVING_SIZE: &str = "1 serving";

/// Field that usually wraps the array when the reply is an object.
const CONTAINER_FIELD: &str = "items";

/// Something that can turn raw menu text into food items.
pub trait MenuExtractor {
    /// Short tag used as the id prefix of extracted items.
    fn source(&self) -> &str;

    fn extract(&self, text: &str) -> std::result::Result<Vec<FoodItem>, ExtractionError>;
}

/// Instruction text sent along with the menu.
pub fn build_extraction_prompt(menu_text: &str) -> String {
    let categories: Vec<&str> = Category::ALL
        .iter()
        .filter(|c| **c != Category::Other)
        .map(|c| c.label())
        .collect();

    format!(
        "Parse the following menu text and extract all food items with their nutritional information.\n\
         \n\
         INSTRUCTIONS:\n\
         1. Extract all food items from the text\n\
         2. Estimate calories, protein, carbs, and fats per item\n\
         3. Categorize each item by meal type\n\
         4. If an item says \"2 rotis\" or \"3 eggs\", calculate macros for the TOTAL quantity\n\
         5. If a line says \"Paneer bhurji + 2 rotis\", treat it as ONE meal and sum the macros\n\
         6. IGNORE noise like headers, prices, dates, or section titles\n\
         \n\
         MENU TEXT:\n\
         {menu_text}\n\
         \n\
         OUTPUT FORMAT (return ONLY a raw JSON array, no markdown):\n\
         [{{\"name\": string, \"calories\": number, \"protein\": number, \"carbs\": number, \
         \"fats\": number, \"category\": \"{}\", \"servingSize\": string}}]\n\
         \n\
         If NO food items are found, return an empty array: []",
        categories.join("|")
    )
}

/// Remove markdown code fences wrapped around a JSON reply.
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Locate the item array in a decoded reply.
fn item_array(value: Value) -> std::result::Result<Vec<Value>, ExtractionError> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove(CONTAINER_FIELD) {
                return Ok(items);
            }
            map.into_iter()
                .find_map(|(_, v)| match v {
                    Value::Array(items) => Some(items),
                    _ => None,
                })
                .ok_or_else(|| {
                    ExtractionError::MalformedResponse("object holds no item array".to_string())
                })
        }
        other => Err(ExtractionError::MalformedResponse(format!(
            "expected an array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Numeric field with lenient coercion: numbers and numeric strings are
/// accepted; anything absent, non-numeric or negative becomes 0.
fn number_field(fields: &Map<String, Value>, key: &str) -> f64 {
    let value = match fields.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite()).unwrap_or(0.0).max(0.0)
}

fn text_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Decode a service reply into food items.
///
/// Tolerates code-fence wrapping, an object wrapping the array, and missing
/// optional fields. Anything else is a [`ExtractionError::MalformedResponse`].
pub fn decode_extraction_response(
    raw: &str,
    source: &str,
) -> std::result::Result<Vec<FoodItem>, ExtractionError> {
    let cleaned = strip_code_fences(raw);
    if cleaned.is_empty() {
        return Err(ExtractionError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(&cleaned)
        .map_err(|e| ExtractionError::MalformedResponse(e.to_string()))?;

    item_array(value)?
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let fields = match element {
                Value::Object(fields) => fields,
                other => {
                    return Err(ExtractionError::MalformedResponse(format!(
                        "item {} is {}, expected an object",
                        index,
                        json_kind(&other)
                    )));
                }
            };

            Ok(FoodItem {
                id: format!("{}-{}", source, index),
                name: text_field(&fields, "name")
                    .unwrap_or(DEFAULT_ITEM_NAME)
                    .to_string(),
                calories: number_field(&fields, "calories"),
                protein: number_field(&fields, "protein"),
                carbs: number_field(&fields, "carbs"),
                fats: number_field(&fields, "fats"),
                category: text_field(&fields, "category")
                    .map(Category::from_label)
                    .unwrap_or(Category::Other),
                serving_size: Some(
                    text_field(&fields, "servingSize")
                        .unwrap_or(DEFAULT_SERVING_SIZE)
                        .to_string(),
                ),
            })
        })
        .collect()
}

/// Replays a service reply previously saved to disk.
#[derive(Debug, Clone)]
pub struct SavedResponseExtractor {
    path: PathBuf,
}

impl SavedResponseExtractor {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MenuExtractor for SavedResponseExtractor {
    fn source(&self) -> &str {
        "saved"
    }

    fn extract(&self, _text: &str) -> std::result::Result<Vec<FoodItem>, ExtractionError> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| ExtractionError::Transport(format!("{}: {}", self.path.display(), e)))?;
        decode_extraction_response(&raw, self.source())
    }
}

/// Which parser produced a batch of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    External,
    Local,
}

/// Items from one parse request plus what the user should be told.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub items: Vec<FoodItem>,
    pub parser: ParserKind,
    pub advisory: Option<String>,
}

pub const NO_ITEMS_HINT: &str = "No food items found in the text.";
pub const NO_ITEMS_LOCAL_HINT: &str =
    "No food items found in the text. Tip: pass a saved extraction reply with --extracted for better parsing.";

/// Parse menu text, trying the extractor once and falling back to the
/// local normalizer on any failure. Never retries.
pub fn parse_menu(text: &str, extractor: Option<&dyn MenuExtractor>) -> ParseOutcome {
    let Some(extractor) = extractor else {
        debug!("no extractor configured, using local parser");
        let items = normalize_menu(text);
        let advisory = items.is_empty().then(|| NO_ITEMS_LOCAL_HINT.to_string());
        return ParseOutcome {
            items,
            parser: ParserKind::Local,
            advisory,
        };
    };

    match extractor.extract(text) {
        Ok(items) => {
            info!(source = extractor.source(), count = items.len(), "extracted menu items");
            let advisory = items.is_empty().then(|| NO_ITEMS_HINT.to_string());
            ParseOutcome {
                items,
                parser: ParserKind::External,
                advisory,
            }
        }
        Err(err) => {
            warn!(
                source = extractor.source(),
                error = %err,
                "extraction failed, using local parser"
            );
            let items = normalize_menu(text);
            let advisory = if items.is_empty() {
                NO_ITEMS_HINT.to_string()
            } else {
                err.advisory().to_string()
            };
            ParseOutcome {
                items,
                parser: ParserKind::Local,
                advisory: Some(advisory),
            }
        }
    }
}
