//! The `Profile` record: one submitted company URL and its enrichment
//! outcome.
//!
//! Wire names are camelCase and timestamps are RFC 3339 so the stored
//! collection and exported backups stay byte-compatible with files written
//! by earlier releases of the tool.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::data::ProfileData;

/// Lifecycle state of a profile. `Processing` is the only initial state;
/// `Completed` and `Failed` are both terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    Processing,
    Completed,
    Failed,
}

impl ProfileStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProfileStatus::Processing => "processing",
            ProfileStatus::Completed => "completed",
            ProfileStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for ProfileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProfileStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "processing" => Ok(ProfileStatus::Processing),
            "completed" => Ok(ProfileStatus::Completed),
            "failed" => Ok(ProfileStatus::Failed),
            other => Err(format!(
                "unknown status '{other}' (expected processing, completed, or failed)"
            )),
        }
    }
}

/// One employer profile record.
///
/// `completed_at` and `error` are mutually exclusive over the record's
/// lifetime: exactly one terminal branch is ever reached. `data` is present
/// only on the completed branch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub url: String,
    pub status: ProfileStatus,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "timestamp::option"
    )]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ProfileData>,
}

impl Profile {
    /// Creates a new processing-state profile for an already-trimmed,
    /// non-empty URL. The id is unique for the session; `created_at` is
    /// stamped once and never changes.
    #[must_use]
    pub fn new(url: String) -> Self {
        Profile {
            id: Uuid::new_v4().to_string(),
            url,
            status: ProfileStatus::Processing,
            created_at: Utc::now(),
            completed_at: None,
            error: None,
            data: None,
        }
    }

    /// Display name: the provider-reported company name, falling back to
    /// the submitted URL.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|d| d.name.as_deref())
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.url)
    }

    /// Domain: the provider-reported domain, falling back to the host
    /// parsed out of the submitted URL.
    #[must_use]
    pub fn domain(&self) -> String {
        self.data
            .as_ref()
            .and_then(|d| d.domain.clone())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| host_from_url(&self.url))
    }
}

/// Extracts the hostname from a URL for display and sorting.
///
/// Falls back to the full input string if it does not look like a URL,
/// so malformed imported records still render something.
#[must_use]
pub fn host_from_url(url: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    rest.split('/')
        .next()
        .filter(|host| !host.is_empty())
        .unwrap_or(url)
        .to_owned()
}

/// Serde helpers for profile timestamps.
///
/// Serializes as RFC 3339. Deserialization is lenient: backups written by
/// earlier releases carry bare `YYYY-MM-DD` dates, which are read as
/// midnight UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Parses an RFC 3339 timestamp or a bare `YYYY-MM-DD` date.
    ///
    /// # Errors
    ///
    /// Returns a description of the failure when neither form matches.
    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(dt.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
            .map_err(|e| format!("invalid timestamp '{raw}': {e}"))
    }

    pub mod option {
        use chrono::{DateTime, SecondsFormat, Utc};
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            value: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => {
                    serializer.serialize_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true))
                }
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|s| super::parse(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

#[cfg(test)]
#[path = "profile_test.rs"]
mod tests;
