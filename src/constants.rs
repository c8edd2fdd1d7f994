/// Fixed values shared across the formatter: the destination schema, the
/// placeholder contact, and the legacy column names recognized by the mapper.

/// Destination columns, in the exact order the upload system expects.
pub const OUTPUT_COLUMNS: [&str; 18] = [
    "first_name",
    "last_name",
    "email",
    "mobile",
    "team_name",
    "postal_code",
    "country",
    "coach_first_name",
    "coach_last_name",
    "coach_email",
    "coach_mobile",
    "payment_amount",
    "payment_memo",
    "credit_amount",
    "credit_memo",
    "external_id",
    "club_name",
    "rate_id",
];

// Placeholder contact substituted when no real value is available
pub const PLACEHOLDER_FIRST: &str = "TEAM";
pub const PLACEHOLDER_LAST: &str = "MANAGER";
pub const PLACEHOLDER_EMAIL: &str = "Test@testerooo123.com";
pub const PLACEHOLDER_MOBILE: &str = "8888888888";
pub const PLACEHOLDER_ZIP: &str = "90210";

// Legacy export column names (exact header spellings)
pub const LEGACY_MANAGER_NAME: &str = "Manager Name 1";
pub const LEGACY_MANAGER_EMAIL: &str = "Manager Email 1";
pub const LEGACY_MANAGER_PHONE: &str = "Manager Phone 1";
pub const ENROLLED_BY_NAME: &str = "Enrolled By Name";
pub const ENROLLED_BY_EMAIL: &str = "Enrolled By Email";
pub const ENROLLED_BY_PHONE: &str = "Enrolled By Phone";

/// Area codes assigned to Canada; anything else on a 10-digit number is
/// treated as US.
pub const CANADIAN_AREA_CODES: [&str; 42] = [
    "204", "226", "249", "250", "289", "306", "343", "365", "387", "403", "416", "418", "431",
    "437", "438", "450", "506", "514", "519", "548", "579", "581", "587", "600", "604", "613",
    "639", "647", "672", "705", "709", "742", "778", "780", "782", "807", "819", "825", "867",
    "873", "902", "905",
];

pub fn is_canadian_area_code(area: &str) -> bool {
    CANADIAN_AREA_CODES.contains(&area)
}
