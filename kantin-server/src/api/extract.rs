//! JSON request body extraction
//!
//! - empty body → `T::default()` (same as `{}`)
//! - malformed JSON (syntax error, truncated) → 500 "Internal server error"
//! - well-formed JSON of the wrong shape → 400 with the deserializer message

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use shared::error::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to read request body");
            AppError::internal()
        })?;
        parse_body(&bytes).map(JsonBody)
    }
}

pub fn parse_body<T>(bytes: &[u8]) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes).map_err(|e| match e.classify() {
        Category::Data => {
            tracing::debug!(error = %e, "Request body rejected");
            AppError::validation(e.to_string())
        }
        Category::Syntax | Category::Eof | Category::Io => {
            tracing::warn!(error = %e, "Malformed JSON body");
            AppError::internal()
        }
    })
}

/// Lenient scalar fields: accept numbers, numeric strings and null
pub mod lenient {
    use serde::de::{self, Deserializer};
    use serde::Deserialize;
    use serde_json::Value;

    fn number_from(value: Value) -> Result<Option<f64>, String> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => n
                .as_f64()
                .map(Some)
                .ok_or_else(|| format!("invalid number: {n}")),
            Value::String(s) if s.trim().is_empty() => Ok(None),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .map(Some)
                .map_err(|_| format!("invalid number: \"{s}\"")),
            other => Err(format!("invalid type: expected a number, found {other}")),
        }
    }

    pub fn f64_opt<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        number_from(value)
            .and_then(|n| match n {
                Some(f) if !f.is_finite() => Err(format!("invalid number: {f}")),
                other => Ok(other),
            })
            .map_err(de::Error::custom)
    }

    pub fn i64_opt<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if let Value::Number(n) = &value
            && let Some(i) = n.as_i64()
        {
            return Ok(Some(i));
        }
        match number_from(value).map_err(de::Error::custom)? {
            None => Ok(None),
            Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(Some(f as i64)),
            Some(f) => Err(de::Error::custom(format!("expected an integer, found {f}"))),
        }
    }
}
