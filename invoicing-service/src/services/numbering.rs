//! Document number formatting and parsing.
//!
//! Numbers look like `INV-0001`: the prefix, a dash, and the sequence
//! zero-padded to four digits. Sequences keep growing past 9999 without
//! truncation. Allocation itself happens in the database service, inside
//! the same transaction that inserts the invoice.

/// Prefix on every invoice document number.
pub const DOCUMENT_PREFIX: &str = "INV";

/// Render a sequence value as a document number.
pub fn format_document_number(seq: i64) -> String {
    format!("{}-{:04}", DOCUMENT_PREFIX, seq)
}

/// Extract the sequence from an existing document number.
///
/// Matches `INV-` followed by a digit run anywhere in the string, case
/// insensitively. Returns `None` when nothing parseable is present, which
/// callers treat as sequence zero when seeding a counter.
pub fn parse_sequence(document_number: &str) -> Option<i64> {
    let lower = document_number.to_ascii_lowercase();
    for (idx, _) in lower.match_indices("inv-") {
        let digits: String = lower[idx + 4..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            continue;
        }
        if let Ok(seq) = digits.parse::<i64>() {
            return Some(seq);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_four_digit_padding() {
        assert_eq!(format_document_number(1), "INV-0001");
        assert_eq!(format_document_number(42), "INV-0042");
        assert_eq!(format_document_number(9999), "INV-9999");
    }

    #[test]
    fn grows_past_four_digits() {
        assert_eq!(format_document_number(10000), "INV-10000");
        assert_eq!(format_document_number(123456), "INV-123456");
    }

    #[test]
    fn parses_standard_numbers() {
        assert_eq!(parse_sequence("INV-0007"), Some(7));
        assert_eq!(parse_sequence("INV-9999"), Some(9999));
        assert_eq!(parse_sequence("INV-10000"), Some(10000));
    }

    #[test]
    fn parse_is_case_insensitive_and_positional() {
        assert_eq!(parse_sequence("inv-0012"), Some(12));
        assert_eq!(parse_sequence("2024/Inv-0034/final"), Some(34));
    }

    #[test]
    fn parse_skips_prefix_without_digits() {
        assert_eq!(parse_sequence("INV-draft INV-0005"), Some(5));
    }

    #[test]
    fn unparseable_numbers_yield_none() {
        assert_eq!(parse_sequence("DRAFT-0001"), None);
        assert_eq!(parse_sequence("INV-"), None);
        assert_eq!(parse_sequence(""), None);
        // Overflowing digit runs count as unparseable.
        assert_eq!(parse_sequence("INV-99999999999999999999"), None);
    }

    #[test]
    fn format_parse_round_trip() {
        for seq in [1, 7, 9999, 10000] {
            assert_eq!(parse_sequence(&format_document_number(seq)), Some(seq));
        }
    }
}
