use crate::constants::{PLACEHOLDER_MOBILE, PLACEHOLDER_ZIP};
use crate::pipeline::phone::{area_code, digits_only};

/// 0 maps to A, 9 maps to J; anything else falls back to A.
fn digit_to_letter(digit: char) -> char {
    match digit.to_digit(10) {
        Some(d) => (b'A' + d as u8) as char,
        None => 'A',
    }
}

/// US zip: first five digits of the source value, zero-left-padded. With no
/// usable source value the leading five digits of the phone stand in. Rows
/// carrying the placeholder mobile are pinned to the placeholder zip.
pub fn format_us_zip(zip_raw: &str, phone: &str) -> String {
    if phone == PLACEHOLDER_MOBILE {
        return PLACEHOLDER_ZIP.to_string();
    }
    let digits = digits_only(zip_raw);
    if !digits.is_empty() {
        let head: String = digits.chars().take(5).collect();
        return format!("{:0>5}", head);
    }
    if phone.len() >= 10 {
        return phone[phone.len() - 10..phone.len() - 5].to_string();
    }
    PLACEHOLDER_ZIP.to_string()
}

/// Canadian postal: six-plus characters become `AAA BBB`. Shorter values
/// are synthesized from the area code (letter, digit, letter, fixed `1A1`
/// suffix) so the output still looks like a postal code. Rows carrying the
/// placeholder mobile are pinned to the placeholder zip.
pub fn format_ca_postal(zip_raw: &str, phone: &str) -> String {
    if phone == PLACEHOLDER_MOBILE {
        return PLACEHOLDER_ZIP.to_string();
    }
    let compact: Vec<char> = zip_raw
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if compact.len() >= 6 {
        let head: String = compact[..3].iter().collect();
        let tail: String = compact[3..6].iter().collect();
        return format!("{} {}", head, tail);
    }
    let area = area_code(phone);
    if !area.is_empty() {
        let mut digits = area.chars();
        let l1 = digit_to_letter(digits.next().unwrap_or('0'));
        let d1 = digits.next().unwrap_or('1');
        let l2 = digit_to_letter(digits.next().unwrap_or('0'));
        return format!("{}{}{} 1A1", l1, d1, l2);
    }
    PLACEHOLDER_ZIP.to_string()
}
