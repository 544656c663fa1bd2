//! Request payload shapes at the API boundary.
//!
//! The original wire format is loose in two places: `images` may be a bare
//! string or an array of strings, and boolean flags arrive as the literal
//! string `"true"` (anything else means `false`). Both are resolved exactly
//! once here; downstream code only ever sees `Vec<String>` and `bool`.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// The `images` field had a shape other than string / array-of-strings.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("images must be a string or an array of strings")]
pub struct InvalidImages;

/// Closed discriminated form of the `images` request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagesInput {
    /// A single image, sent as a bare string.
    Single(String),
    /// An ordered sequence of images.
    Many(Vec<String>),
}

impl ImagesInput {
    /// Resolve the raw JSON value of the `images` field.
    ///
    /// Accepts a string or an array of strings; everything else (including
    /// a missing field, `null`, numbers, or arrays with non-string
    /// elements) is rejected.
    pub fn from_value(value: &Value) -> Result<Self, InvalidImages> {
        match value {
            Value::String(s) => Ok(Self::Single(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    _ => Err(InvalidImages),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self::Many),
            _ => Err(InvalidImages),
        }
    }

    /// Flatten into an ordered list of image payloads.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::Single(s) => vec![s],
            Self::Many(v) => v,
        }
    }
}

/// Normalize a request boolean flag: only the literal string `"true"`
/// turns the flag on; absent or any other value means `false`.
#[must_use]
pub fn flag_is_true(value: Option<&str>) -> bool {
    matches!(value, Some("true"))
}

/// Payload for creating a product.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub stock: Option<u32>,
    /// Raw `images` value; resolved via [`ImagesInput::from_value`].
    #[serde(default)]
    pub images: Value,
    #[serde(default)]
    pub is_verified: Option<String>,
    #[serde(default)]
    pub is_bulk: Option<String>,
}

/// Payload for a partial product update. Absent fields keep their
/// stored values; an absent `images` leaves the image set untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub images: Option<Value>,
    #[serde(default)]
    pub is_verified: Option<String>,
    #[serde(default)]
    pub is_bulk: Option<String>,
}

/// Payload for creating a sell listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateListing {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub images: Value,
    #[serde(default)]
    pub is_verified: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_string_resolves_to_single() {
        let input = ImagesInput::from_value(&json!("data:image/png;base64,xyz")).unwrap();
        assert_eq!(
            input.into_vec(),
            vec!["data:image/png;base64,xyz".to_owned()]
        );
    }

    #[test]
    fn array_resolves_in_order() {
        let input = ImagesInput::from_value(&json!(["a", "b", "c"])).unwrap();
        assert_eq!(input, ImagesInput::Many(vec!["a".into(), "b".into(), "c".into()]));
    }

    #[test]
    fn number_is_rejected() {
        assert_eq!(ImagesInput::from_value(&json!(42)), Err(InvalidImages));
    }

    #[test]
    fn null_and_missing_are_rejected() {
        assert_eq!(ImagesInput::from_value(&Value::Null), Err(InvalidImages));
    }

    #[test]
    fn array_with_non_string_element_is_rejected() {
        assert_eq!(
            ImagesInput::from_value(&json!(["a", 1])),
            Err(InvalidImages)
        );
    }

    #[test]
    fn only_literal_true_enables_flag() {
        assert!(flag_is_true(Some("true")));
        assert!(!flag_is_true(Some("True")));
        assert!(!flag_is_true(Some("yes")));
        assert!(!flag_is_true(None));
    }

    #[test]
    fn create_payload_accepts_missing_optional_fields() {
        let payload: CreateProduct = serde_json::from_value(json!({
            "name": "Lamp",
            "description": "A desk lamp",
            "price": 25.0,
            "category": "home",
            "images": "one-uri"
        }))
        .unwrap();
        assert!(payload.stock.is_none());
        assert!(payload.is_verified.is_none());
        assert_eq!(payload.images, json!("one-uri"));
    }
}
