//! Classification of decoded response bodies of unknown shape.
//!
//! Order is fixed: the resource's success predicate first, then the server
//! error envelope, then the internal fallback. A body that satisfies both
//! predicates resolves as success.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::state::{ErrorEnvelope, NormalizedError};

/// Object with a string `id` and a string `name`.
pub fn is_named_object(payload: &Value) -> bool {
    payload.get("id").is_some_and(Value::is_string)
        && payload.get("name").is_some_and(Value::is_string)
}

/// Array in which every element is an object carrying a string `id`.
///
/// An empty array qualifies.
pub fn is_id_list(payload: &Value) -> bool {
    payload.as_array().is_some_and(|items| {
        items
            .iter()
            .all(|item| item.is_object() && item.get("id").is_some_and(Value::is_string))
    })
}

/// Outcome of classifying one response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified<T> {
    /// The success predicate matched and the body decoded into `T`.
    Success(T),
    /// The body is a server error envelope.
    ServerError(NormalizedError),
    /// Neither predicate matched, or a matched body failed to decode.
    Unrecognized,
}

impl<T> Classified<T> {
    /// Collapse into the value consumers see; `Unrecognized` becomes the
    /// internal fallback.
    pub fn into_result(self) -> Result<T, NormalizedError> {
        match self {
            Classified::Success(data) => Ok(data),
            Classified::ServerError(error) => Err(error),
            Classified::Unrecognized => Err(NormalizedError::internal()),
        }
    }
}

/// Classify `payload` using the resource-specific `accepts` predicate.
pub fn classify<T: DeserializeOwned>(payload: Value, accepts: fn(&Value) -> bool) -> Classified<T> {
    if accepts(&payload) {
        return match serde_json::from_value(payload) {
            Ok(data) => Classified::Success(data),
            Err(_) => Classified::Unrecognized,
        };
    }
    match ErrorEnvelope::from_value(&payload) {
        Some(envelope) => Classified::ServerError(envelope.into()),
        None => Classified::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::GuildProfile;

    #[test]
    fn both_shapes_resolve_as_success() {
        let payload = json!({
            "id": "1",
            "name": "Hub",
            "statusCode": 401,
            "code": "UNAUTHORIZED",
            "error": "Unauthorized",
            "message": "login",
        });
        let classified: Classified<GuildProfile> = classify(payload, is_named_object);
        assert!(matches!(classified, Classified::Success(_)));
    }

    #[test]
    fn unrecognized_collapses_to_internal() {
        let classified: Classified<GuildProfile> = classify(json!(42), is_named_object);
        assert_eq!(classified, Classified::Unrecognized);
        assert_eq!(classified.into_result(), Err(NormalizedError::internal()));
    }
}
