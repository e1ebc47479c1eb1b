//! Masking of credentials before requests are written to the request log.

use axum::http::HeaderMap;
use serde_json::{Map, Value as JsonValue};

pub const REPLACEMENT: &str = "*** REPLACED ***";

const MASKED_HEADERS: [&str; 2] = ["authorization", "cookie"];
const MASKED_FIELDS: [&str; 1] = ["password"];

/// Serializes headers as a JSON object with credential headers masked.
///
/// Repeated headers are joined with `, `.
pub fn mask_headers(headers: &HeaderMap) -> String {
    let mut map = Map::new();

    for name in headers.keys() {
        let value = if MASKED_HEADERS.contains(&name.as_str()) {
            REPLACEMENT.to_string()
        } else {
            headers
                .get_all(name)
                .iter()
                .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
                .collect::<Vec<_>>()
                .join(", ")
        };

        map.insert(name.as_str().to_string(), JsonValue::String(value));
    }

    JsonValue::Object(map).to_string()
}

/// Request body as stored in the log. JSON bodies have `password` values masked at
/// any depth; anything else is stored as lossy UTF-8.
pub fn mask_content(body: &[u8]) -> String {
    match serde_json::from_slice::<JsonValue>(body) {
        Ok(mut json) => {
            mask_json(&mut json);
            json.to_string()
        }
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

fn mask_json(value: &mut JsonValue) {
    match value {
        JsonValue::Object(map) => {
            for (key, value) in map.iter_mut() {
                if MASKED_FIELDS.contains(&key.to_ascii_lowercase().as_str()) {
                    *value = JsonValue::String(REPLACEMENT.to_string());
                } else {
                    mask_json(value);
                }
            }
        }
        JsonValue::Array(items) => items.iter_mut().for_each(mask_json),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde_json::json;

    #[test]
    fn masks_credential_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer secret"));
        headers.insert("cookie", HeaderValue::from_static("session=abc"));
        headers.insert("accept", HeaderValue::from_static("application/json"));

        let masked: JsonValue = serde_json::from_str(&mask_headers(&headers)).unwrap();

        assert_eq!(masked["authorization"], REPLACEMENT);
        assert_eq!(masked["cookie"], REPLACEMENT);
        assert_eq!(masked["accept"], "application/json");
    }

    #[test]
    fn masks_nested_passwords() {
        let body = json!({
            "username": "john",
            "password": "hunter22",
            "nested": [{"Password": "x"}]
        });

        let masked: JsonValue =
            serde_json::from_str(&mask_content(body.to_string().as_bytes())).unwrap();

        assert_eq!(masked["username"], "john");
        assert_eq!(masked["password"], REPLACEMENT);
        assert_eq!(masked["nested"][0]["Password"], REPLACEMENT);
    }

    #[test]
    fn keeps_non_json_body() {
        assert_eq!(mask_content(b"plain text"), "plain text");
        assert_eq!(mask_content(b""), "");
    }
}
