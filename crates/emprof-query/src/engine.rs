//! The filter/sort/search pipeline.
//!
//! Stage order is fixed: status filter → date-range filter → search →
//! sort. Each stage narrows the previous stage's output, and the sort is
//! stable, so equal-key records keep the order the search stage produced —
//! that stability is the de facto tie-break.

use std::cmp::Ordering;

use chrono::NaiveDate;
use emprof_core::{Profile, ProfileStatus};

/// Status stage: keep everything, or only one status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ProfileStatus),
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "all" {
            Ok(StatusFilter::All)
        } else {
            s.parse::<ProfileStatus>().map(StatusFilter::Only)
        }
    }
}

/// Inclusive creation-date window. `to` covers the whole day: a record
/// created at 23:59 on the `to` date is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    fn contains(&self, profile: &Profile) -> bool {
        let date = profile.created_at.date_naive();
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    CreatedAt,
    Name,
    Domain,
    Status,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" | "date" => Ok(SortKey::CreatedAt),
            "name" => Ok(SortKey::Name),
            "domain" => Ok(SortKey::Domain),
            "status" => Ok(SortKey::Status),
            other => Err(format!(
                "unknown sort key '{other}' (expected created, name, domain, or status)"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    /// Newest-first is the dashboard default.
    #[default]
    Descending,
}

/// The full view state a render needs.
#[derive(Debug, Clone, Default)]
pub struct ProfileQuery {
    pub status: StatusFilter,
    pub date_range: DateRange,
    pub search: Option<String>,
    pub sort: SortKey,
    pub direction: SortDirection,
}

/// Derives the visible subset and order from the full collection.
///
/// Deterministic and side-effect-free: given identical inputs the output
/// sequence is identical, which bulk-selection-by-visible-set relies on.
#[must_use]
pub fn run_query(profiles: &[Profile], query: &ProfileQuery) -> Vec<Profile> {
    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut rows: Vec<Profile> = profiles
        .iter()
        .filter(|p| match query.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => p.status == status,
        })
        .filter(|p| query.date_range.contains(p))
        .filter(|p| needle.as_deref().is_none_or(|needle| matches_search(p, needle)))
        .cloned()
        .collect();

    // Stable sort; descending flips the comparator rather than reversing
    // the vector so equal keys keep their pipeline order.
    rows.sort_by(|a, b| {
        let ord = compare(query.sort, a, b);
        match query.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    rows
}

/// Case-insensitive substring match over the searchable fields. Absent
/// payload fields are non-matches, never errors.
fn matches_search(profile: &Profile, needle: &str) -> bool {
    if profile.url.to_lowercase().contains(needle) {
        return true;
    }
    let Some(data) = &profile.data else {
        return false;
    };
    [data.name.as_deref(), data.domain.as_deref()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

fn compare(key: SortKey, a: &Profile, b: &Profile) -> Ordering {
    match key {
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::Name => a
            .display_name()
            .to_lowercase()
            .cmp(&b.display_name().to_lowercase()),
        SortKey::Domain => a.domain().to_lowercase().cmp(&b.domain().to_lowercase()),
        SortKey::Status => a.status.as_str().cmp(b.status.as_str()),
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
