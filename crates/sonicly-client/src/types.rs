//! Wire types for the record store API.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Liveness check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Server status (e.g. "OK").
    pub status: String,
    /// Human-readable message.
    pub message: String,
}

/// Error body returned by the record store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorResponse {
    /// Error message.
    #[serde(default)]
    pub error: String,
}

/// Names of the fields mutating responses wrap their entity in.
pub mod envelope {
    /// Field holding a created or updated subscription.
    pub const SUBSCRIPTION: &str = "subscription";
    /// Field holding a created payment method.
    pub const PAYMENT: &str = "payment";
    /// Field holding a created billing record.
    pub const BILLING: &str = "billing";
    /// Field holding a saved user profile.
    pub const USER: &str = "user";
}

/// Decode `body[field]` when the wrapper is present, otherwise the raw body.
pub(crate) fn unwrap_envelope<T: DeserializeOwned>(
    mut body: Value,
    field: &str,
) -> Result<T, serde_json::Error> {
    if let Value::Object(map) = &mut body {
        if let Some(inner) = map.remove(field) {
            return serde_json::from_value(inner);
        }
    }
    serde_json::from_value(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Thing {
        id: String,
    }

    #[test]
    fn unwraps_named_field() {
        let body = json!({ "message": "ok", "subscription": { "id": "sub_1" } });
        let thing: Thing = unwrap_envelope(body, envelope::SUBSCRIPTION).unwrap();
        assert_eq!(thing, Thing { id: "sub_1".into() });
    }

    #[test]
    fn falls_back_to_raw_body() {
        let body = json!({ "id": "sub_1" });
        let thing: Thing = unwrap_envelope(body, envelope::SUBSCRIPTION).unwrap();
        assert_eq!(thing.id, "sub_1");
    }

    #[test]
    fn message_only_body_is_an_error() {
        let body = json!({ "message": "ok" });
        assert!(unwrap_envelope::<Thing>(body, envelope::SUBSCRIPTION).is_err());
    }
}
