//! Path building infrastructure for REST resources.
//!
//! Every resource declares a static table of [`ResourcePath`]s, one per
//! operation it supports. The resource layer looks up the path for an
//! operation with [`get_path`] and interpolates identifiers with
//! [`build_path`].
//!
//! # Path Resolution
//!
//! Some operations can be reached through more than one path. The most
//! specific path whose identifiers are all available wins, so a nested path
//! such as `batches/{batch_id}/shipments/{id}` is preferred over
//! `shipments/{id}` when both ids are known.
//!
//! # Example
//!
//! ```rust
//! use easypost::rest::{ResourcePath, ResourceOperation, get_path, build_path};
//! use easypost::HttpMethod;
//! use std::collections::HashMap;
//!
//! const PATHS: &[ResourcePath] = &[
//!     ResourcePath::new(HttpMethod::Post, ResourceOperation::Create, &[], "shipments"),
//!     ResourcePath::new(HttpMethod::Get, ResourceOperation::Retrieve, &["id"], "shipments/{id}"),
//!     ResourcePath::new(HttpMethod::Post, ResourceOperation::Action("buy"), &["id"], "shipments/{id}/buy"),
//! ];
//!
//! let path = get_path(PATHS, ResourceOperation::Action("buy"), &["id"]).unwrap();
//!
//! let mut ids = HashMap::new();
//! ids.insert("id", "shp_123");
//! assert_eq!(build_path(path.template, &ids), "shipments/shp_123/buy");
//! ```

use crate::clients::HttpMethod;
use std::collections::HashMap;
use std::fmt::Display;

/// Operations that can be performed on a REST resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOperation {
    /// Create a new resource (POST /resources).
    Create,
    /// Fetch a single resource by ID (GET /resources/{id}).
    ///
    /// Used by both `retrieve` and `refresh`.
    Retrieve,
    /// A variant-specific action, e.g. `buy` or `cancel`
    /// (usually POST /resources/{id}/{action}).
    Action(&'static str),
}

impl ResourceOperation {
    /// Returns the default HTTP method for this operation.
    #[must_use]
    pub const fn default_http_method(&self) -> HttpMethod {
        match self {
            Self::Retrieve => HttpMethod::Get,
            Self::Create | Self::Action(_) => HttpMethod::Post,
        }
    }

    /// Returns the operation name as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Retrieve => "retrieve",
            Self::Action(name) => name,
        }
    }
}

/// A path configuration for a REST resource operation.
///
/// Templates use `{id_name}` placeholders for ID interpolation:
/// - `trackers/{id}` - Single ID
/// - `batches/{id}/add_shipments` - Action on a single resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourcePath {
    /// The HTTP method for this path.
    pub http_method: HttpMethod,
    /// The operation this path is used for.
    pub operation: ResourceOperation,
    /// Required ID parameters in order (e.g., `["id"]`).
    pub ids: &'static [&'static str],
    /// The URL template with `{id}` placeholders.
    pub template: &'static str,
}

impl ResourcePath {
    /// Creates a new `ResourcePath`.
    ///
    /// This is a `const fn` to allow paths to be defined as constants.
    #[must_use]
    pub const fn new(
        http_method: HttpMethod,
        operation: ResourceOperation,
        ids: &'static [&'static str],
        template: &'static str,
    ) -> Self {
        Self {
            http_method,
            operation,
            ids,
            template,
        }
    }

    /// Returns the number of required IDs for this path.
    #[must_use]
    pub const fn id_count(&self) -> usize {
        self.ids.len()
    }

    /// Checks if all required IDs are available.
    #[must_use]
    pub fn matches_ids(&self, available_ids: &[&str]) -> bool {
        self.ids.iter().all(|id| available_ids.contains(id))
    }
}

/// Selects the best matching path for an operation.
///
/// Filters by operation, then picks the path that has all of its required
/// IDs available and requires the most IDs.
///
/// # Returns
///
/// The most specific matching path, or `None` if no path matches.
#[must_use]
pub fn get_path<'a>(
    paths: &'a [ResourcePath],
    operation: ResourceOperation,
    available_ids: &[&str],
) -> Option<&'a ResourcePath> {
    paths
        .iter()
        .filter(|p| p.operation == operation)
        .filter(|p| p.matches_ids(available_ids))
        .max_by_key(|p| p.id_count())
}

/// Builds a URL from a template by interpolating IDs.
///
/// Values are percent-encoded, so an identifier can never introduce extra
/// path segments. Placeholders without a value are left untouched.
///
/// # Example
///
/// ```rust
/// use easypost::rest::build_path;
/// use std::collections::HashMap;
///
/// let mut ids = HashMap::new();
/// ids.insert("id", "batch_123");
///
/// assert_eq!(build_path("batches/{id}/buy", &ids), "batches/batch_123/buy");
/// ```
#[must_use]
#[allow(clippy::implicit_hasher)]
pub fn build_path<V: Display>(template: &str, ids: &HashMap<&str, V>) -> String {
    let mut result = template.to_string();

    for (key, value) in ids {
        let placeholder = format!("{{{key}}}");
        let encoded = urlencoding::encode(&value.to_string()).into_owned();
        result = result.replace(&placeholder, &encoded);
    }

    result
}

// Verify types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceOperation>();
    assert_send_sync::<ResourcePath>();
};
