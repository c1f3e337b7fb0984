//! EasyPost API version definitions.
//!
//! This module provides the [`ApiVersion`] enum selecting the URL prefix that
//! every request path is appended to.

use crate::error::ConfigError;
use std::fmt;
use std::str::FromStr;

/// EasyPost API version.
///
/// The stable API lives under `/v2`; a handful of endpoints are only served
/// under `/beta`. `Custom` covers versions this crate does not know about yet.
///
/// # Example
///
/// ```rust
/// use easypost::ApiVersion;
///
/// let version = ApiVersion::latest();
/// assert!(version.is_stable());
///
/// let version: ApiVersion = "beta".parse().unwrap();
/// assert_eq!(version, ApiVersion::Beta);
///
/// assert_eq!(format!("{}", ApiVersion::V2), "v2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum ApiVersion {
    /// The stable `v2` API.
    #[default]
    V2,
    /// The `beta` API.
    Beta,
    /// Custom version string, used verbatim as the path prefix.
    Custom(String),
}

impl ApiVersion {
    /// Returns the latest stable API version.
    #[must_use]
    pub const fn latest() -> Self {
        Self::V2
    }

    /// Returns `true` for the stable `v2` API.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        matches!(self, Self::V2)
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V2 => f.write_str("v2"),
            Self::Beta => f.write_str("beta"),
            Self::Custom(version) => f.write_str(version),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_matches('/');
        match s {
            "v2" => Ok(Self::V2),
            "beta" => Ok(Self::Beta),
            custom
                if custom.len() > 1
                    && custom.starts_with('v')
                    && custom.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') =>
            {
                Ok(Self::Custom(custom.to_string()))
            }
            _ => Err(ConfigError::InvalidApiVersion {
                version: s.to_string(),
            }),
        }
    }
}
