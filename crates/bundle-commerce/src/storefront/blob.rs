//! Decoding the published offer blob as delivered in page markup.

use crate::error::OfferError;
use crate::offer::OfferGroup;
use std::borrow::Cow;

/// Undo one layer of HTML entity escaping.
///
/// `&amp;` is decoded last so `&amp;quot;` yields `&quot;`, not `"`.
pub fn html_unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    Cow::Owned(
        s.replace("&quot;", "\"")
            .replace("&#34;", "\"")
            .replace("&#39;", "'")
            .replace("&#x27;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&"),
    )
}

/// Parse a published blob into its offer groups.
///
/// Accepts the raw JSON array, its markup-escaped form, or the array
/// serialized once more as a JSON string.
pub fn parse_blob(raw: &str) -> Result<Vec<OfferGroup>, OfferError> {
    let decoded = html_unescape(raw.trim());
    if decoded.is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = serde_json::from_str(&decoded)
        .map_err(|e| OfferError::MalformedBlob(e.to_string()))?;

    let value = match value {
        serde_json::Value::String(inner) => serde_json::from_str(&inner)
            .map_err(|e| OfferError::MalformedBlob(e.to_string()))?,
        serde_json::Value::Null => return Ok(Vec::new()),
        other => other,
    };

    serde_json::from_value(value).map_err(|e| OfferError::MalformedBlob(e.to_string()))
}
