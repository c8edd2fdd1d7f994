use serde::Serialize;

use crate::constants::{LEGACY_MANAGER_EMAIL, LEGACY_MANAGER_NAME, LEGACY_MANAGER_PHONE};

/// Which source column feeds each semantic role. Every field is optional;
/// the mapper is best effort and an export with none of the expected
/// headers yields an empty mapping rather than an error.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    pub team_name: Option<String>,
    pub postal: Option<String>,
    pub club_name: Option<String>,

    // Manager/rep contact (preferred source for the primary contact)
    pub mgr_first: Option<String>,
    pub mgr_last: Option<String>,
    pub mgr_email: Option<String>,
    pub mgr_phone: Option<String>,

    // Coach contact (primary fallback, and the secondary contact group)
    pub coach_first: Option<String>,
    pub coach_last: Option<String>,
    pub coach_email: Option<String>,
    pub coach_phone: Option<String>,

    /// `mgr_first` holds the legacy full-name column and must be split into
    /// first/last per row.
    pub mgr_first_is_full_name: bool,
}

/// First header containing every `include_all` token and, when
/// `include_any` is non-empty, at least one of those. Matching is
/// case-insensitive substring matching; header order decides ties.
fn find_column<'a>(
    headers: &'a [String],
    include_all: &[&str],
    include_any: &[&str],
) -> Option<&'a str> {
    headers.iter().map(String::as_str).find(|header| {
        let lowered = header.to_lowercase();
        include_all.iter().all(|token| lowered.contains(token))
            && (include_any.is_empty() || include_any.iter().any(|token| lowered.contains(token)))
    })
}

/// First header whose entire lower-cased text equals one of the candidates,
/// checked in candidate priority order across all headers.
fn find_exact<'a>(headers: &'a [String], candidates: &[&str]) -> Option<&'a str> {
    for candidate in candidates {
        if let Some(header) = headers
            .iter()
            .map(String::as_str)
            .find(|h| h.to_lowercase() == *candidate)
        {
            return Some(header);
        }
    }
    None
}

/// Manager/rep detection tries the header prefixes in preference order:
/// "manager", then "team rep", then "rep".
fn find_rep_column<'a>(headers: &'a [String], field_token: &str) -> Option<&'a str> {
    for prefix in ["manager", "team rep", "rep"] {
        if let Some(header) = find_column(headers, &[prefix, field_token], &[]) {
            return Some(header);
        }
    }
    None
}

/// Phone columns have no fixed field token; any "phone" or "mobile" header
/// under the same prefixes qualifies.
fn find_rep_phone(headers: &[String]) -> Option<&str> {
    for prefix in ["manager", "team rep", "rep"] {
        if let Some(header) = find_column(headers, &[prefix], &["phone", "mobile"]) {
            return Some(header);
        }
    }
    None
}

/// Inspect the header record and assign source columns to roles. Header
/// text only; cell values are never consulted.
pub fn detect_mapping(headers: &[String]) -> ColumnMapping {
    let team_name = find_column(headers, &["team", "name"], &[])
        .or_else(|| find_column(headers, &["current", "team", "name"], &[]));

    let postal = find_exact(headers, &["zip", "postal code", "postal", "postcode"]);

    let club_name = find_column(headers, &["club", "name"], &[]);

    let mut mgr_first = find_rep_column(headers, "first");
    let mgr_last = find_rep_column(headers, "last");
    let mut mgr_email = find_rep_column(headers, "email");
    let mut mgr_phone = find_rep_phone(headers);

    let coach_first = find_column(headers, &["coach", "first"], &[]);
    let coach_last = find_column(headers, &["coach", "last"], &[]);
    let coach_email = find_column(headers, &["coach", "email"], &[]);
    let coach_phone = find_column(headers, &["coach"], &["phone", "mobile"]);

    // Older exports carry "Manager Name 1" (a full name) plus numbered
    // email/phone columns. Only consulted when the per-field detection
    // found nothing.
    let mut mgr_first_is_full_name = false;
    if mgr_first.is_none() && mgr_last.is_none() && mgr_email.is_none() && mgr_phone.is_none() {
        if headers.iter().any(|h| h == LEGACY_MANAGER_NAME) {
            mgr_first = Some(LEGACY_MANAGER_NAME);
            mgr_first_is_full_name = true;
        }
        mgr_email = headers
            .iter()
            .map(String::as_str)
            .find(|h| *h == LEGACY_MANAGER_EMAIL);
        mgr_phone = headers
            .iter()
            .map(String::as_str)
            .find(|h| *h == LEGACY_MANAGER_PHONE);
    }

    ColumnMapping {
        team_name: team_name.map(String::from),
        postal: postal.map(String::from),
        club_name: club_name.map(String::from),
        mgr_first: mgr_first.map(String::from),
        mgr_last: mgr_last.map(String::from),
        mgr_email: mgr_email.map(String::from),
        mgr_phone: mgr_phone.map(String::from),
        coach_first: coach_first.map(String::from),
        coach_last: coach_last.map(String::from),
        coach_email: coach_email.map(String::from),
        coach_phone: coach_phone.map(String::from),
        mgr_first_is_full_name,
    }
}

/// Display form of the mapping: every role present, absent roles as empty
/// strings. Shown to the reviewer so they can see how their columns were
/// interpreted.
#[derive(Debug, Clone, Serialize)]
pub struct MappingRecord {
    pub team_name: String,
    #[serde(rename = "zip/postal")]
    pub postal: String,
    pub club_name: String,
    pub mgr_first: String,
    pub mgr_last: String,
    pub mgr_email: String,
    pub mgr_phone: String,
    pub coach_first: String,
    pub coach_last: String,
    pub coach_email: String,
    pub coach_phone: String,
}

impl From<&ColumnMapping> for MappingRecord {
    fn from(mapping: &ColumnMapping) -> Self {
        let display = |col: &Option<String>| col.clone().unwrap_or_default();
        Self {
            team_name: display(&mapping.team_name),
            postal: display(&mapping.postal),
            club_name: display(&mapping.club_name),
            mgr_first: display(&mapping.mgr_first),
            mgr_last: display(&mapping.mgr_last),
            mgr_email: display(&mapping.mgr_email),
            mgr_phone: display(&mapping.mgr_phone),
            coach_first: display(&mapping.coach_first),
            coach_last: display(&mapping.coach_last),
            coach_email: display(&mapping.coach_email),
            coach_phone: display(&mapping.coach_phone),
        }
    }
}
