use serde::Serialize;
use tracing::info;

use crate::constants::{
    ENROLLED_BY_EMAIL, ENROLLED_BY_NAME, ENROLLED_BY_PHONE, PLACEHOLDER_EMAIL, PLACEHOLDER_FIRST,
    PLACEHOLDER_LAST, PLACEHOLDER_MOBILE, PLACEHOLDER_ZIP,
};
use crate::error::{FormatterError, Result};
use crate::pipeline::contact::{split_full_name, ContactQuad};
use crate::pipeline::mapping::{detect_mapping, ColumnMapping, MappingRecord};
use crate::pipeline::phone::{self, Country};
use crate::pipeline::postal;
use crate::table::RawTable;

/// One upload-ready row. Field order mirrors `constants::OUTPUT_COLUMNS`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DestinationRow {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile: String,
    pub team_name: String,
    pub postal_code: String,
    pub country: String,
    pub coach_first_name: String,
    pub coach_last_name: String,
    pub coach_email: String,
    pub coach_mobile: String,
    pub payment_amount: String,
    pub payment_memo: String,
    pub credit_amount: String,
    pub credit_memo: String,
    pub external_id: String,
    pub club_name: String,
    pub rate_id: String,
}

impl DestinationRow {
    /// Cell values in destination column order.
    pub fn values(&self) -> [&str; 18] {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.mobile,
            &self.team_name,
            &self.postal_code,
            &self.country,
            &self.coach_first_name,
            &self.coach_last_name,
            &self.coach_email,
            &self.coach_mobile,
            &self.payment_amount,
            &self.payment_memo,
            &self.credit_amount,
            &self.credit_memo,
            &self.external_id,
            &self.club_name,
            &self.rate_id,
        ]
    }
}

/// Aggregate counters for one conversion pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub placeholder_primary_rows: usize,
    pub coach_blanked_rows: usize,
    pub invalid_mobile_fixed_rows: usize,
}

/// Everything a caller gets back from one conversion pass.
#[derive(Debug, Clone)]
pub struct NormalizeOutput {
    pub rows: Vec<DestinationRow>,
    pub issues: Vec<String>,
    pub summary: Summary,
    pub mapping: MappingRecord,
}

/// Per-row outcomes; counters are summed from these after the pass so the
/// row logic itself carries no shared mutable state.
#[derive(Debug, Clone, Copy, Default)]
struct RowFlags {
    placeholder_primary: bool,
    invalid_mobile_fixed: bool,
    coach_blanked: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct QuadColumns {
    first: Option<usize>,
    last: Option<usize>,
    email: Option<usize>,
    phone: Option<usize>,
}

/// Column indices resolved once per table so the per-row pass never repeats
/// header lookups.
struct RowContext<'a> {
    table: &'a RawTable,
    team: Option<usize>,
    postal: Option<usize>,
    club: Option<usize>,
    manager: QuadColumns,
    coach: QuadColumns,
    enrolled_name: Option<usize>,
    enrolled_email: Option<usize>,
    enrolled_phone: Option<usize>,
    legacy_full_name: bool,
}

impl<'a> RowContext<'a> {
    fn new(table: &'a RawTable, mapping: &ColumnMapping) -> Self {
        let col = |name: &Option<String>| name.as_deref().and_then(|n| table.column_index(n));
        Self {
            table,
            team: col(&mapping.team_name),
            postal: col(&mapping.postal),
            club: col(&mapping.club_name),
            manager: QuadColumns {
                first: col(&mapping.mgr_first),
                last: col(&mapping.mgr_last),
                email: col(&mapping.mgr_email),
                phone: col(&mapping.mgr_phone),
            },
            coach: QuadColumns {
                first: col(&mapping.coach_first),
                last: col(&mapping.coach_last),
                email: col(&mapping.coach_email),
                phone: col(&mapping.coach_phone),
            },
            enrolled_name: table.column_index(ENROLLED_BY_NAME),
            enrolled_email: table.column_index(ENROLLED_BY_EMAIL),
            enrolled_phone: table.column_index(ENROLLED_BY_PHONE),
            legacy_full_name: mapping.mgr_first_is_full_name,
        }
    }

    fn text(&self, row: usize, col: Option<usize>) -> String {
        self.table.cell(row, col).trim().to_string()
    }

    fn lower(&self, row: usize, col: Option<usize>) -> String {
        self.table.cell(row, col).trim().to_lowercase()
    }

    fn digits(&self, row: usize, col: Option<usize>) -> String {
        phone::digits_only(self.table.cell(row, col))
    }

    /// Manager quad for one row. In legacy mode the mapped first-name column
    /// holds a full name and is split; a row whose manager quad is still
    /// fully empty after the split falls back to the Enrolled By columns.
    fn manager_quad(&self, row: usize) -> ContactQuad {
        let mut first = self.text(row, self.manager.first);
        let mut last = self.text(row, self.manager.last);
        let mut email = self.lower(row, self.manager.email);
        let mut phone = self.digits(row, self.manager.phone);

        if self.legacy_full_name {
            let (split_first, split_last) = split_full_name(&first);
            first = split_first;
            last = split_last;

            if first.is_empty() && last.is_empty() && email.is_empty() && phone.is_empty() {
                let enrolled_name = self.text(row, self.enrolled_name);
                let (enrolled_first, enrolled_last) = split_full_name(&enrolled_name);
                first = enrolled_first;
                last = enrolled_last;
                email = self.lower(row, self.enrolled_email);
                phone = self.digits(row, self.enrolled_phone);
            }
        }

        ContactQuad {
            first,
            last,
            email,
            phone,
        }
    }

    /// Coach quad for one row, straight from the mapped columns.
    fn coach_quad(&self, row: usize) -> ContactQuad {
        ContactQuad {
            first: self.text(row, self.coach.first),
            last: self.text(row, self.coach.last),
            email: self.lower(row, self.coach.email),
            phone: self.digits(row, self.coach.phone),
        }
    }
}

fn placeholder_quad() -> ContactQuad {
    ContactQuad {
        first: PLACEHOLDER_FIRST.to_string(),
        last: PLACEHOLDER_LAST.to_string(),
        email: PLACEHOLDER_EMAIL.to_string(),
        phone: PLACEHOLDER_MOBILE.to_string(),
    }
}

fn normalize_row(ctx: &RowContext<'_>, row: usize) -> (DestinationRow, Option<String>, RowFlags) {
    let mut flags = RowFlags::default();

    let manager = ctx.manager_quad(row);
    let coach_raw = ctx.coach_quad(row);

    // Primary contact: manager, else coach, else the fixed placeholder
    let mut primary = if manager.is_present() {
        manager
    } else if coach_raw.is_present() {
        coach_raw.clone()
    } else {
        flags.placeholder_primary = true;
        placeholder_quad()
    };

    // Field-wise defaults within the chosen source
    if primary.first.is_empty() {
        primary.first = PLACEHOLDER_FIRST.to_string();
    }
    if primary.last.is_empty() {
        primary.last = PLACEHOLDER_LAST.to_string();
    }
    if primary.email.is_empty() {
        primary.email = PLACEHOLDER_EMAIL.to_string();
    }
    if primary.phone.is_empty() {
        primary.phone = PLACEHOLDER_MOBILE.to_string();
    }

    // Anything that is not exactly ten digits gets the placeholder mobile
    if !phone::is_valid_mobile(&primary.phone) {
        primary.phone = PLACEHOLDER_MOBILE.to_string();
        flags.invalid_mobile_fixed = true;
    }

    let email = primary.email.to_lowercase();
    let country = phone::infer_country(&primary.phone);

    let zip_raw = ctx.text(row, ctx.postal);
    let postal_code = match country {
        Country::Ca => postal::format_ca_postal(&zip_raw, &primary.phone),
        Country::Us => postal::format_us_zip(&zip_raw, &primary.phone),
    };
    let postal_code = if postal_code.is_empty() {
        PLACEHOLDER_ZIP.to_string()
    } else {
        postal_code
    };

    // Coach group: default the mobile, then apply the suppression rules in
    // order against the current row state
    let mut coach = coach_raw.clone();
    if !coach.first.is_empty() && coach.phone.is_empty() {
        coach.phone = PLACEHOLDER_MOBILE.to_string();
    }
    if !coach.first.is_empty() && (coach.last.is_empty() || coach.email.is_empty()) {
        coach.clear();
    }
    if !coach.email.is_empty() && coach.email == email {
        coach.clear();
    }
    if !coach.email.is_empty()
        && coach.first == primary.first
        && coach.last == primary.last
        && coach.email == email
        && coach.phone == primary.phone
    {
        coach.clear();
    }
    // A leftover fragment without a first name cannot form a valid group
    // either; the output carries a full coach or none
    if coach.is_present() && !coach.is_complete() {
        coach.clear();
    }
    flags.coach_blanked = !coach_raw.first.is_empty() && coach.first.is_empty();

    let team_name = ctx.text(row, ctx.team);
    let issue = if team_name.is_empty() {
        // +2: spreadsheet rows are 1-based and the header occupies row 1
        Some(format!("Row {}: team_name is required but blank", row + 2))
    } else {
        None
    };

    let destination = DestinationRow {
        first_name: primary.first,
        last_name: primary.last,
        email,
        mobile: primary.phone,
        team_name,
        postal_code,
        country: country.as_str().to_string(),
        coach_first_name: coach.first,
        coach_last_name: coach.last,
        coach_email: coach.email,
        coach_mobile: coach.phone,
        club_name: ctx.text(row, ctx.club),
        ..DestinationRow::default()
    };

    (destination, issue, flags)
}

/// Run the full pass: detect the column mapping, normalize every row in
/// input order, and fold the per-row flags into the summary counters.
pub fn normalize(table: &RawTable) -> Result<NormalizeOutput> {
    if table.headers().is_empty() && !table.is_empty() {
        return Err(FormatterError::InvalidInput(
            "table has rows but no header record".to_string(),
        ));
    }

    let mapping = detect_mapping(table.headers());
    let ctx = RowContext::new(table, &mapping);

    info!(rows = table.len(), "normalizing registration export");

    let mut rows = Vec::with_capacity(table.len());
    let mut issues = Vec::new();
    let mut summary = Summary {
        rows: table.len(),
        ..Summary::default()
    };

    for index in 0..table.len() {
        let (row, issue, flags) = normalize_row(&ctx, index);
        rows.push(row);
        issues.extend(issue);
        summary.placeholder_primary_rows += flags.placeholder_primary as usize;
        summary.coach_blanked_rows += flags.coach_blanked as usize;
        summary.invalid_mobile_fixed_rows += flags.invalid_mobile_fixed as usize;
    }

    Ok(NormalizeOutput {
        rows,
        issues,
        summary,
        mapping: MappingRecord::from(&mapping),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
        .unwrap()
    }

    const MODERN_HEADERS: [&str; 10] = [
        "Team Name",
        "Zip",
        "Manager First Name",
        "Manager Last Name",
        "Manager Email",
        "Manager Phone",
        "Coach First Name",
        "Coach Last Name",
        "Coach Email",
        "Coach Phone",
    ];

    #[test]
    fn test_manager_preferred_over_coach() {
        let input = table(
            &MODERN_HEADERS,
            &[&[
                "Sharks",
                "98105",
                "Pat",
                "Lee",
                "Pat@Example.com",
                "(206) 555-0100",
                "Chris",
                "Park",
                "chris@example.com",
                "2065550199",
            ]],
        );
        let output = normalize(&input).unwrap();
        let row = &output.rows[0];

        assert_eq!(row.first_name, "Pat");
        assert_eq!(row.last_name, "Lee");
        assert_eq!(row.email, "pat@example.com");
        assert_eq!(row.mobile, "2065550100");
        assert_eq!(row.coach_first_name, "Chris");
        assert_eq!(output.summary.placeholder_primary_rows, 0);
    }

    #[test]
    fn test_coach_promoted_when_manager_absent() {
        let input = table(
            &MODERN_HEADERS,
            &[&[
                "Sharks",
                "98105",
                "",
                "",
                "",
                "",
                "Chris",
                "Park",
                "Chris@Example.com",
                "2065550199",
            ]],
        );
        let output = normalize(&input).unwrap();
        let row = &output.rows[0];

        assert_eq!(row.first_name, "Chris");
        assert_eq!(row.email, "chris@example.com");
        assert_eq!(row.mobile, "2065550199");
        // The promoted coach then duplicates the primary and is suppressed
        assert_eq!(row.coach_first_name, "");
        assert_eq!(row.coach_mobile, "");
        assert_eq!(output.summary.placeholder_primary_rows, 0);
        assert_eq!(output.summary.coach_blanked_rows, 1);
    }

    #[test]
    fn test_partial_manager_gets_field_defaults_not_placeholder_counter() {
        let input = table(
            &MODERN_HEADERS,
            &[&[
                "Sharks",
                "98105",
                "Pat",
                "",
                "",
                "2065550100",
                "",
                "",
                "",
                "",
            ]],
        );
        let output = normalize(&input).unwrap();
        let row = &output.rows[0];

        assert_eq!(row.first_name, "Pat");
        assert_eq!(row.last_name, PLACEHOLDER_LAST);
        assert_eq!(row.email, PLACEHOLDER_EMAIL.to_lowercase());
        assert_eq!(row.mobile, "2065550100");
        assert_eq!(output.summary.placeholder_primary_rows, 0);
    }

    #[test]
    fn test_coach_mobile_defaulted_before_completeness_check() {
        let input = table(
            &MODERN_HEADERS,
            &[&[
                "Sharks",
                "98105",
                "Pat",
                "Lee",
                "pat@example.com",
                "2065550100",
                "Chris",
                "Park",
                "chris@example.com",
                "",
            ]],
        );
        let output = normalize(&input).unwrap();
        let row = &output.rows[0];

        // Missing coach phone does not suppress the group; it defaults
        assert_eq!(row.coach_first_name, "Chris");
        assert_eq!(row.coach_mobile, PLACEHOLDER_MOBILE);
        assert_eq!(output.summary.coach_blanked_rows, 0);
    }

    #[test]
    fn test_incomplete_coach_group_is_blanked() {
        let input = table(
            &MODERN_HEADERS,
            &[&[
                "Sharks",
                "98105",
                "Pat",
                "Lee",
                "pat@example.com",
                "2065550100",
                "Chris",
                "Park",
                "",
                "2065550199",
            ]],
        );
        let output = normalize(&input).unwrap();
        let row = &output.rows[0];

        assert_eq!(row.coach_first_name, "");
        assert_eq!(row.coach_last_name, "");
        assert_eq!(row.coach_email, "");
        assert_eq!(row.coach_mobile, "");
        assert_eq!(output.summary.coach_blanked_rows, 1);
    }

    #[test]
    fn test_coach_without_any_data_is_not_counted_as_blanked() {
        let input = table(
            &MODERN_HEADERS,
            &[&[
                "Sharks",
                "98105",
                "Pat",
                "Lee",
                "pat@example.com",
                "2065550100",
                "",
                "",
                "",
                "",
            ]],
        );
        let output = normalize(&input).unwrap();
        assert_eq!(output.rows[0].coach_first_name, "");
        assert_eq!(output.summary.coach_blanked_rows, 0);
    }

    #[test]
    fn test_coach_fragment_without_first_name_is_cleared_but_not_counted() {
        let input = table(
            &MODERN_HEADERS,
            &[&[
                "Sharks",
                "98105",
                "Pat",
                "Lee",
                "pat@example.com",
                "2065550100",
                "",
                "Park",
                "",
                "",
            ]],
        );
        let output = normalize(&input).unwrap();
        let row = &output.rows[0];

        assert_eq!(row.coach_first_name, "");
        assert_eq!(row.coach_last_name, "");
        assert_eq!(row.coach_email, "");
        assert_eq!(row.coach_mobile, "");
        // The raw coach first name was already empty, so this is not a
        // suppression for counting purposes
        assert_eq!(output.summary.coach_blanked_rows, 0);
    }

    #[test]
    fn test_legacy_full_name_split_per_row() {
        let input = table(
            &["Team Name", "Zip", "Manager Name 1"],
            &[
                &["Sharks", "98105", "Pat Lee"],
                &["Orcas", "98106", "Cher"],
            ],
        );
        let output = normalize(&input).unwrap();

        assert_eq!(output.rows[0].first_name, "Pat");
        assert_eq!(output.rows[0].last_name, "Lee");
        assert_eq!(output.rows[1].first_name, "Cher");
        assert_eq!(output.rows[1].last_name, PLACEHOLDER_LAST);
        // Name-only rows still default the rest of the quad
        assert_eq!(output.rows[0].mobile, PLACEHOLDER_MOBILE);
        assert_eq!(output.rows[0].email, PLACEHOLDER_EMAIL.to_lowercase());
        assert_eq!(output.summary.placeholder_primary_rows, 0);
    }

    #[test]
    fn test_enrolled_by_fallback_is_per_row() {
        let input = table(
            &[
                "Team Name",
                "Zip",
                "Manager Name 1",
                "Enrolled By Name",
                "Enrolled By Email",
                "Enrolled By Phone",
            ],
            &[
                &[
                    "Sharks",
                    "98105",
                    "",
                    "Dana Cruz",
                    "Dana@Example.com",
                    "(206) 555-0111",
                ],
                &[
                    "Orcas",
                    "98106",
                    "Pat Lee",
                    "Dana Cruz",
                    "dana@example.com",
                    "2065550111",
                ],
            ],
        );
        let output = normalize(&input).unwrap();

        assert_eq!(output.rows[0].first_name, "Dana");
        assert_eq!(output.rows[0].last_name, "Cruz");
        assert_eq!(output.rows[0].email, "dana@example.com");
        assert_eq!(output.rows[0].mobile, "2065550111");
        // A row with manager signal never consults Enrolled By
        assert_eq!(output.rows[1].first_name, "Pat");
        assert_eq!(output.rows[1].last_name, "Lee");
    }

    #[test]
    fn test_team_name_issue_row_numbering() {
        let input = table(
            &MODERN_HEADERS,
            &[
                &["Sharks", "", "", "", "", "", "", "", "", ""],
                &["", "", "", "", "", "", "", "", "", ""],
            ],
        );
        let output = normalize(&input).unwrap();

        assert_eq!(output.issues.len(), 1);
        assert_eq!(output.issues[0], "Row 3: team_name is required but blank");
        // The flagged row is still emitted
        assert_eq!(output.rows.len(), 2);
    }

    #[test]
    fn test_empty_table() {
        let input = table(&MODERN_HEADERS, &[]);
        let output = normalize(&input).unwrap();
        assert!(output.rows.is_empty());
        assert!(output.issues.is_empty());
        assert_eq!(output.summary, Summary::default());
    }

    #[test]
    fn test_fixed_blanks_and_club_name() {
        let input = table(
            &["Team Name", "Club Name", "Zip"],
            &[&["Sharks", "Northshore FC", "98105"]],
        );
        let output = normalize(&input).unwrap();
        let row = &output.rows[0];

        assert_eq!(row.club_name, "Northshore FC");
        assert_eq!(row.external_id, "");
        assert_eq!(row.payment_amount, "");
        assert_eq!(row.payment_memo, "");
        assert_eq!(row.credit_amount, "");
        assert_eq!(row.credit_memo, "");
        assert_eq!(row.rate_id, "");
    }

    #[test]
    fn test_headerless_table_with_rows_is_an_error() {
        let input = RawTable::new(vec![], vec![]).unwrap();
        assert!(normalize(&input).is_ok());

        // Zero-width rows slip past the constructor; normalize still
        // refuses to iterate a table that has rows but no headers
        let bad = RawTable::new(vec![], vec![vec![]]).unwrap();
        assert!(normalize(&bad).is_err());
    }
}
