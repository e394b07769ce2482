//! One function per remote action. Each builds a URL (and body, where the
//! endpoint takes one) and delegates to [`AtomGitClient::execute`](crate::client::AtomGitClient::execute).
//! Errors are never caught or rewritten here.

pub mod branches;
pub mod issues;
pub mod labels;
pub mod pulls;
pub mod repository;
pub mod users;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Decode a response into a declared shape and re-serialize it, dropping
/// fields the shape does not name.
pub(crate) fn conform<T>(value: Value, shape: &str) -> Result<Value>
where
    T: DeserializeOwned + Serialize,
{
    match serde_json::from_value::<T>(value.clone()) {
        Ok(typed) => Ok(serde_json::to_value(typed)?),
        Err(e) => Err(ApiError::Validation {
            message: format!("Response does not match the expected {} shape: {}", shape, e),
            body: value,
        }
        .into()),
    }
}
