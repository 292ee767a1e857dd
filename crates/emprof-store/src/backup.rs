//! Backup export and import.
//!
//! JSON exports are verbatim profile arrays, so an exported file is also a
//! valid import. CSV is a one-way projection onto a fixed column set for
//! spreadsheet use.

use emprof_core::Profile;

use crate::error::BackupError;

/// Fixed CSV column set, in order.
const CSV_COLUMNS: [&str; 11] = [
    "ID",
    "URL",
    "Domain",
    "Name",
    "Status",
    "Created",
    "Colors",
    "Logo Count",
    "Fonts",
    "Links",
    "Quality Score",
];

/// Serializes a sequence of profiles to a pretty JSON array.
///
/// # Errors
///
/// Returns [`BackupError::Serialize`] on serialization failure.
pub fn export_json(profiles: &[Profile]) -> Result<String, BackupError> {
    serde_json::to_string_pretty(profiles).map_err(BackupError::Serialize)
}

/// Serializes one profile to pretty JSON.
///
/// # Errors
///
/// Returns [`BackupError::Serialize`] on serialization failure.
pub fn export_profile_json(profile: &Profile) -> Result<String, BackupError> {
    serde_json::to_string_pretty(profile).map_err(BackupError::Serialize)
}

/// Renders one profile as plain text: URL, status, and the raw payload.
///
/// # Errors
///
/// Returns [`BackupError::Serialize`] on payload serialization failure.
pub fn export_profile_text(profile: &Profile) -> Result<String, BackupError> {
    let payload = match &profile.data {
        Some(data) => serde_json::to_string_pretty(data).map_err(BackupError::Serialize)?,
        None => String::new(),
    };
    Ok(format!(
        "URL: {}\nStatus: {}\n\n{}",
        profile.url, profile.status, payload
    ))
}

/// Projects profiles onto the fixed CSV column set.
///
/// Every field is quoted; embedded quotes are doubled. List fields are
/// joined with `"; "`; absent optional data renders as an empty field.
#[must_use]
pub fn export_csv(profiles: &[Profile]) -> String {
    let mut out = String::new();
    out.push_str(&csv_row(CSV_COLUMNS.iter().map(ToString::to_string)));
    for profile in profiles {
        out.push_str(&csv_row(csv_fields(profile)));
    }
    out
}

fn csv_fields(profile: &Profile) -> impl Iterator<Item = String> {
    let data = profile.data.as_ref();
    let colors = data.map_or_else(String::new, |d| {
        join(d.colors.iter().filter_map(|c| c.hex.as_deref()))
    });
    let logo_count = data.map_or(0, |d| d.logos.len());
    let fonts = data.map_or_else(String::new, |d| {
        join(d.fonts.iter().filter_map(|f| f.name.as_deref()))
    });
    let links = data.map_or_else(String::new, |d| {
        join(d.links.iter().filter_map(|l| l.url.as_deref()))
    });
    let quality_score =
        data.and_then(|d| d.quality_score)
            .map_or_else(String::new, |s| s.to_string());

    [
        profile.id.clone(),
        profile.url.clone(),
        profile.domain(),
        profile.display_name().to_owned(),
        profile.status.to_string(),
        profile.created_at.to_rfc3339(),
        colors,
        logo_count.to_string(),
        fonts,
        links,
        quality_score,
    ]
    .into_iter()
}

fn join<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    parts.collect::<Vec<_>>().join("; ")
}

fn csv_row(fields: impl Iterator<Item = String>) -> String {
    let quoted: Vec<String> = fields
        .map(|f| format!("\"{}\"", f.replace('"', "\"\"")))
        .collect();
    let mut row = quoted.join(",");
    row.push('\n');
    row
}

/// Parses a JSON backup document into profiles.
///
/// The document must be a JSON array of profile-shaped objects; anything
/// else is rejected so the live collection is never touched by a bad file.
/// The caller is responsible for the merge (imported records are prepended
/// ahead of existing ones, no deduplication).
///
/// # Errors
///
/// - [`BackupError::Parse`] — not valid JSON, or an element does not parse
///   as a profile.
/// - [`BackupError::NotAnArray`] — valid JSON that is not an array.
pub fn import_json(raw: &str) -> Result<Vec<Profile>, BackupError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(BackupError::Parse)?;
    if !value.is_array() {
        return Err(BackupError::NotAnArray);
    }
    serde_json::from_value(value).map_err(BackupError::Parse)
}

#[cfg(test)]
#[path = "backup_test.rs"]
mod tests;
