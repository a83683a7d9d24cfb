//! Request and response envelopes
//!
//! Every request carries the authentication fields next to its
//! operation-specific parameters. Every response carries a status string,
//! a list of structured errors and the operation payload.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::filter::Filter;

/// Authentication fields of a request
///
/// Unset fields are filled from the client credentials before sending.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Auth {
    /// API auth token
    /// ⚠️ NEVER log this value
    #[serde(default)]
    pub auth_token: String,

    /// Account acting on behalf of (sub-account management)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub owner_account_id: String,
}

impl Auth {
    /// Explicit authentication for a single request
    pub fn new(auth_token: impl Into<String>, owner_account_id: impl Into<String>) -> Self {
        Self {
            auth_token: auth_token.into(),
            owner_account_id: owner_account_id.into(),
        }
    }

    /// Fill empty fields with the given defaults.
    ///
    /// Values the caller already set are kept, so applying this twice is a
    /// no-op.
    pub fn apply_defaults(&mut self, auth_token: &str, owner_account_id: &str) {
        if self.auth_token.is_empty() {
            self.auth_token = auth_token.to_string();
        }
        if self.owner_account_id.is_empty() {
            self.owner_account_id = owner_account_id.to_string();
        }
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("auth_token", &"<REDACTED>")
            .field("owner_account_id", &self.owner_account_id)
            .finish()
    }
}

/// A request envelope: authentication plus operation parameters
#[derive(Debug, Clone, Serialize)]
pub struct Request<P> {
    /// Authentication fields
    #[serde(flatten)]
    pub auth: Auth,

    /// Operation parameters
    #[serde(flatten)]
    pub params: P,
}

impl<P> Request<P> {
    /// Request with empty authentication, to be defaulted by the client
    pub fn new(params: P) -> Self {
        Self {
            auth: Auth::default(),
            params,
        }
    }

    /// Request with explicit authentication
    pub fn with_auth(auth: Auth, params: P) -> Self {
        Self { auth, params }
    }
}

/// Sort order for find calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sort {
    /// Field to sort by
    pub field: String,
    /// `ASC` or `DESC`
    pub order: String,
}

/// Parameters shared by every find endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindParams {
    /// Predicate selecting the entities
    pub filter: Filter,
    /// Page size
    pub limit: u32,
    /// One-based page number
    pub page: u32,
    /// Optional sort order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Sort>,
}

impl FindParams {
    /// First page of up to `limit` entities matching `filter`
    pub fn new(filter: Filter, limit: u32) -> Self {
        Self {
            filter,
            limit,
            page: 1,
            sort: None,
        }
    }

    /// Single entity lookup
    pub fn single(filter: Filter) -> Self {
        Self::new(filter, 1)
    }

    /// Select a page
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Select a sort order
    pub fn with_sort(mut self, field: impl Into<String>, order: impl Into<String>) -> Self {
        self.sort = Some(Sort {
            field: field.into(),
            order: order.into(),
        });
        self
    }
}

/// A structured error entry of a response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiError {
    /// Numeric error code
    pub code: i64,
    /// Object the error refers to
    pub context_object: String,
    /// Path of the offending field
    pub context_path: String,
    /// Additional details
    #[serde(deserialize_with = "null_as_default")]
    pub details: Vec<serde_json::Value>,
    /// Human readable message
    pub text: String,
    /// Offending value; `blocked` marks a locked resource
    pub value: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.text)?;
        if !self.context_path.is_empty() {
            write!(f, " at {}", self.context_path)?;
        }
        if !self.value.is_empty() {
            write!(f, " (value {:?})", self.value)?;
        }
        Ok(())
    }
}

/// Transaction identifiers echoed by the API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metadata {
    /// Client-chosen transaction ID
    pub client_transaction_id: String,
    /// Server-assigned transaction ID
    pub server_transaction_id: String,
}

/// Status and error access shared by every response envelope
pub trait ApiResponse {
    /// Status string (`success`, `pending`, `error`)
    fn status(&self) -> &str;

    /// Structured errors
    fn errors(&self) -> &[ApiError];
}

/// A response envelope with payload `T`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(
    rename_all = "camelCase",
    bound(deserialize = "T: Deserialize<'de> + Default")
)]
pub struct Envelope<T> {
    /// Status string
    #[serde(default)]
    pub status: String,

    /// Structured errors
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ApiError>,

    /// Warnings
    #[serde(default, deserialize_with = "null_as_default")]
    pub warnings: Vec<serde_json::Value>,

    /// Transaction metadata
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: Metadata,

    /// Operation payload
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: T,
}

impl<T> ApiResponse for Envelope<T> {
    fn status(&self) -> &str {
        &self.status
    }

    fn errors(&self) -> &[ApiError] {
        &self.errors
    }
}

/// Payload of a find endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", bound(deserialize = "T: Deserialize<'de>"))]
pub struct FindResult<T> {
    /// Matching entities
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<T>,
    /// Page size used
    #[serde(default)]
    pub limit: u32,
    /// Page returned
    #[serde(default)]
    pub page: u32,
    /// Total matches
    #[serde(default)]
    pub total_entries: u64,
    /// Total pages
    #[serde(default)]
    pub total_pages: u64,
    /// Entity type name
    #[serde(default, rename = "type")]
    pub entity_type: String,
}

impl<T> Default for FindResult<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            limit: 0,
            page: 0,
            total_entries: 0,
            total_pages: 0,
            entity_type: String::new(),
        }
    }
}

/// The API sends `null` for absent collections and objects
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_fill_empty_fields() {
        let mut auth = Auth::default();
        auth.apply_defaults("token", "account");
        assert_eq!(auth, Auth::new("token", "account"));
    }

    #[test]
    fn test_explicit_fields_take_precedence() {
        let mut auth = Auth::new("explicit-token", "explicit-account");
        auth.apply_defaults("token", "account");
        assert_eq!(auth, Auth::new("explicit-token", "explicit-account"));
    }

    #[test]
    fn test_defaulting_is_idempotent() {
        let mut once = Auth::new("", "explicit-account");
        once.apply_defaults("token", "account");
        let mut twice = once.clone();
        twice.apply_defaults("token", "account");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_auth_debug_redacts_token() {
        let auth = Auth::new("secret_token_12345", "acc");
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("secret_token_12345"));
        assert!(debug.contains("<REDACTED>"));
    }

    #[test]
    fn test_request_flattens_auth_and_params() {
        let mut request = Request::new(FindParams::single(Filter::zone_config_id("z1")));
        request.auth.apply_defaults("token", "");

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["authToken"], "token");
        assert!(value.get("ownerAccountId").is_none());
        assert_eq!(value["limit"], 1);
        assert_eq!(value["page"], 1);
        assert_eq!(value["filter"]["field"], "ZoneConfigId");
        assert!(value.get("sort").is_none());
    }

    #[test]
    fn test_envelope_tolerates_nulls() {
        let envelope: Envelope<FindResult<serde_json::Value>> = serde_json::from_value(json!({
            "status": "success",
            "errors": null,
            "warnings": null,
            "metadata": null,
            "response": {"data": null, "limit": 1, "page": 1}
        }))
        .unwrap();

        assert_eq!(envelope.status(), "success");
        assert!(envelope.errors().is_empty());
        assert!(envelope.response.data.is_empty());
    }

    #[test]
    fn test_api_error_display() {
        let error = ApiError {
            code: 10109,
            text: "Object is blocked".to_string(),
            value: "blocked".to_string(),
            ..ApiError::default()
        };
        assert_eq!(error.to_string(), "10109: Object is blocked (value \"blocked\")");
    }
}
