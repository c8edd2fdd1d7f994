use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{is_canadian_area_code, PLACEHOLDER_MOBILE};

static NON_DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\D").unwrap());
static TEN_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());

/// Strip everything that is not a digit.
pub fn digits_only(raw: &str) -> String {
    NON_DIGIT.replace_all(raw.trim(), "").into_owned()
}

/// Upload-ready mobiles are exactly ten digits.
pub fn is_valid_mobile(phone: &str) -> bool {
    TEN_DIGITS.is_match(phone)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Country {
    Us,
    Ca,
}

impl Country {
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::Us => "US",
            Country::Ca => "CA",
        }
    }
}

/// Area code of a ten-digit-or-longer number: the third-to-last through
/// seventh-to-last digits. Empty when the number is shorter.
pub fn area_code(phone: &str) -> &str {
    if phone.len() >= 10 {
        &phone[phone.len() - 10..phone.len() - 7]
    } else {
        ""
    }
}

/// Infer the country from a cleaned mobile. The placeholder mobile is
/// pinned to US; otherwise the area code decides.
pub fn infer_country(phone: &str) -> Country {
    if phone == PLACEHOLDER_MOBILE {
        return Country::Us;
    }
    if is_canadian_area_code(area_code(phone)) {
        Country::Ca
    } else {
        Country::Us
    }
}
