//! Types embedded in several resources.
//!
//! These are not resources themselves (they have no paths of their own) but
//! appear nested inside shipments, batches, pickups and orders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A non-fatal diagnostic attached to a resource.
///
/// Carriers that cannot quote a shipment report it here rather than failing
/// the request. Messages are data: read them through each resource's
/// `messages()` accessor.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Message {
    /// The carrier that reported the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,

    /// The carrier account that reported the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_account_id: Option<String>,

    /// The message kind, e.g. `"rate_error"`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub message_type: Option<String>,

    /// The message text.
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: String,
}

/// A purchased shipping label.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PostageLabel {
    /// The label identifier (`pl_...`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// When the label was created.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// The date printed on the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_date: Option<DateTime<Utc>>,

    /// URL of the label in its primary format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_url: Option<String>,

    /// The primary file type, e.g. `"image/png"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_file_type: Option<String>,

    /// URL of the PDF rendition, once converted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_pdf_url: Option<String>,

    /// URL of the ZPL rendition, once converted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_zpl_url: Option<String>,

    /// URL of the EPL2 rendition, once converted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_epl2_url: Option<String>,

    /// Print resolution in DPI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_resolution: Option<u32>,

    /// Label dimensions, e.g. `"4x6"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_size: Option<String>,

    /// `"default"` or a carrier-specific variant.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_type: Option<String>,
}

/// Label file formats a purchased label can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelFormat {
    /// PNG image (the default on purchase).
    Png,
    /// PDF document.
    Pdf,
    /// Zebra Programming Language.
    Zpl,
    /// Eltron Programming Language.
    Epl2,
}

impl LabelFormat {
    /// Returns the value the API expects for `file_format`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Pdf => "PDF",
            Self::Zpl => "ZPL",
            Self::Epl2 => "EPL2",
        }
    }
}

impl std::fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts `true`/`false`, `1`/`0` and their string forms.
///
/// Some request echoes carry the integer flags a caller sent; the resolved
/// value is always surfaced as a boolean.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Some(true),
            "false" | "0" | "no" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

/// Accepts a string, or stringifies anything else.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Flag {
        #[serde(default, deserialize_with = "lenient_bool")]
        value: Option<bool>,
    }

    fn flag(value: Value) -> Option<bool> {
        serde_json::from_value::<Flag>(json!({ "value": value }))
            .unwrap()
            .value
    }

    #[test]
    fn test_lenient_bool_accepts_integer_flags() {
        assert_eq!(flag(json!(true)), Some(true));
        assert_eq!(flag(json!(1)), Some(true));
        assert_eq!(flag(json!(0)), Some(false));
        assert_eq!(flag(json!("true")), Some(true));
        assert_eq!(flag(json!("0")), Some(false));
        assert_eq!(flag(Value::Null), None);
    }

    #[test]
    fn test_lenient_bool_missing_field_is_none() {
        let parsed: Flag = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.value.is_none());
    }

    #[test]
    fn test_message_deserializes_type_field() {
        let message: Message = serde_json::from_value(json!({
            "carrier": "USPS",
            "carrier_account_id": "ca_123",
            "type": "rate_error",
            "message": "Unable to retrieve USPS rates for Pak."
        }))
        .unwrap();

        assert_eq!(message.carrier.as_deref(), Some("USPS"));
        assert_eq!(message.message_type.as_deref(), Some("rate_error"));
        assert!(message.message.contains("Pak"));
    }

    #[test]
    fn test_message_tolerates_structured_text() {
        let message: Message = serde_json::from_value(json!({
            "carrier": "UPS",
            "message": {"detail": "service unavailable"}
        }))
        .unwrap();
        assert!(message.message.contains("service unavailable"));
    }

    #[test]
    fn test_postage_label_ignores_unknown_fields() {
        let label: PostageLabel = serde_json::from_value(json!({
            "id": "pl_123",
            "object": "PostageLabel",
            "label_url": "https://example.com/label.png",
            "label_resolution": 300,
            "integrated_form": "none"
        }))
        .unwrap();

        assert_eq!(label.id.as_deref(), Some("pl_123"));
        assert_eq!(label.label_resolution, Some(300));
    }

    #[test]
    fn test_label_format_values() {
        assert_eq!(LabelFormat::Zpl.as_str(), "ZPL");
        assert_eq!(LabelFormat::Pdf.to_string(), "PDF");
    }
}
