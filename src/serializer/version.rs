//! API version negotiation.

use std::fmt;
use std::str::FromStr;

// == Api Version ==
/// Representation version requested by a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub enum ApiVersion {
    #[default]
    V1,
    /// Adds `comment` to book representations
    V2,
}

impl ApiVersion {
    /// Reads the `version` media-type parameter out of an `Accept` header,
    /// e.g. `application/json; version=2.0`.
    ///
    /// Returns `None` when no parameter is present or it names an unknown
    /// version.
    pub fn from_accept(accept: &str) -> Option<Self> {
        accept
            .split(',')
            .flat_map(|media_range| media_range.split(';').skip(1))
            .filter_map(|param| param.split_once('='))
            .find(|(name, _)| name.trim().eq_ignore_ascii_case("version"))
            .and_then(|(_, value)| value.trim().trim_matches('"').parse().ok())
    }

    /// Picks the version from the `Accept` header, then the `version` query
    /// parameter, then `default`.
    pub fn negotiate(accept: Option<&str>, query: Option<&str>, default: ApiVersion) -> Self {
        accept
            .and_then(Self::from_accept)
            .or_else(|| query.and_then(|raw| raw.parse().ok()))
            .unwrap_or(default)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ApiVersion::V1 => "1.0",
            ApiVersion::V2 => "2.0",
        }
    }
}

impl FromStr for ApiVersion {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "1" | "1.0" => Ok(ApiVersion::V1),
            "2" | "2.0" => Ok(ApiVersion::V2),
            other => Err(format!("Unknown API version: {other}")),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
