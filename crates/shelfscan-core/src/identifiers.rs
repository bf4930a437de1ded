//! ISBN extraction from recognized text frames

use crate::domain::DetectedTextFrame;

const ISBN_13_MARKER: &str = "ISBN-13";
const ISBN_10_MARKER: &str = "ISBN-10";

/// Extract a candidate ISBN from one recognition frame.
///
/// Each block is reduced to its decimal digits (after stripping the literal
/// `ISBN-13`/`ISBN-10` markers, whose digits would otherwise pollute the
/// candidate). The first block in frame order that yields exactly 10 or 13
/// digits with a verifying checksum wins. Purely per-frame: no memory is
/// kept across frames.
pub fn extract_isbn(frame: &DetectedTextFrame) -> Option<String> {
    frame
        .blocks
        .iter()
        .map(|block| filter_isbn(block))
        .find(|candidate| {
            matches!(candidate.len(), 10 | 13) && is_valid_isbn_checksum(candidate)
        })
}

/// Strip marker tokens and retain only decimal digits.
fn filter_isbn(block: &str) -> String {
    block
        .replace(ISBN_13_MARKER, "")
        .replace(ISBN_10_MARKER, "")
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect()
}

/// Validate an ISBN-10 (mod 11) or ISBN-13 (mod 10) checksum.
///
/// Operates on digit-only candidates; an ISBN-10 with an `X` check
/// character never reaches this point because extraction drops non-digits.
pub fn is_valid_isbn_checksum(isbn: &str) -> bool {
    let digits: Vec<u32> = isbn.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != isbn.len() {
        return false;
    }

    match digits.len() {
        10 => {
            let sum: u32 = digits
                .iter()
                .enumerate()
                .map(|(i, &d)| d * (10 - i as u32))
                .sum();
            sum % 11 == 0
        }
        13 => {
            let sum: u32 = digits
                .iter()
                .enumerate()
                .map(|(i, &d)| if i % 2 == 0 { d } else { d * 3 })
                .sum();
            sum % 10 == 0
        }
        _ => false,
    }
}
