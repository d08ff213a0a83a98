//! Folio reference parsing for books cited as 1a, 1b, 2a...
//!
//! Each folio leaf has two sides; side `a` of folio N is internal page
//! `2N - 1` and side `b` is page `2N`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Folio number with an optional side letter.
static FOLIO_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*([ab])?$").unwrap());

/// Which side of a folio leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolioSide {
    A,
    B,
}

impl FolioSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }
}

/// A parsed folio reference and its internal page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FolioRef {
    pub folio: u32,
    pub side: FolioSide,
    /// Equivalent internal page number.
    pub page: u32,
}

impl fmt::Display for FolioRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.folio, self.side.as_str())
    }
}

/// Parse a folio reference like `12a` or `12b` (side defaults to `a`).
///
/// Returns `None` for zero, non-numeric, out-of-range, or otherwise
/// malformed input — the CLI treats that as a user input problem, not a
/// data error.
pub fn parse_folio(value: &str) -> Option<FolioRef> {
    let normalized = value.trim().to_lowercase();
    let captures = FOLIO_PATTERN.captures(&normalized)?;
    let folio: u32 = captures.get(1)?.as_str().parse().ok()?;
    if folio == 0 {
        return None;
    }
    let side = match captures.get(2).map(|m| m.as_str()) {
        Some("b") => FolioSide::B,
        _ => FolioSide::A,
    };
    // Folio numbers big enough to overflow the page space are garbage
    let doubled = folio.checked_mul(2)?;
    let page = match side {
        FolioSide::A => doubled - 1,
        FolioSide::B => doubled,
    };
    Some(FolioRef { folio, side, page })
}

/// Format an internal page number back as a folio reference.
pub fn format_folio(page: u32) -> Option<String> {
    if page == 0 {
        return None;
    }
    let folio = page.div_ceil(2);
    let side = if page % 2 == 1 { FolioSide::A } else { FolioSide::B };
    Some(format!("{}{}", folio, side.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_sides() {
        let a = parse_folio("12a").unwrap();
        assert_eq!((a.folio, a.side, a.page), (12, FolioSide::A, 23));
        let b = parse_folio("12b").unwrap();
        assert_eq!((b.folio, b.side, b.page), (12, FolioSide::B, 24));
    }

    #[test]
    fn test_side_defaults_to_a() {
        let r = parse_folio("7").unwrap();
        assert_eq!((r.side, r.page), (FolioSide::A, 13));
    }

    #[test]
    fn test_whitespace_and_case_tolerant() {
        assert_eq!(parse_folio(" 3B ").unwrap().page, 6);
        assert_eq!(parse_folio("3 b").unwrap().page, 6);
    }

    #[test]
    fn test_rejects_malformed_input() {
        for bad in ["", "0a", "abc", "12c", "1.5a", "-3a"] {
            assert!(parse_folio(bad).is_none(), "{bad:?}");
        }
    }

    #[test]
    fn test_rejects_folio_numbers_that_overflow_the_page_space() {
        // 2^31 and beyond cannot be doubled into a u32 page number
        for huge in ["2147483648", "2147483648a", "4294967295b", "99999999999"] {
            assert!(parse_folio(huge).is_none(), "{huge:?}");
        }
        // The largest representable folio still parses
        let max = parse_folio("2147483647b").unwrap();
        assert_eq!(max.page, u32::MAX - 1);
    }

    #[test]
    fn test_format_round_trip() {
        for input in ["1a", "1b", "12a", "12b", "100a"] {
            let parsed = parse_folio(input).unwrap();
            assert_eq!(format_folio(parsed.page).as_deref(), Some(input));
        }
        assert_eq!(format_folio(0), None);
    }

    #[test]
    fn test_display_matches_input() {
        assert_eq!(parse_folio("12b").unwrap().to_string(), "12b");
    }
}
