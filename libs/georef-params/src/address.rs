//! Street name + door number extraction from free-form address text.
//!
//! Real-world input mixes building aliases, neighbourhoods and cross streets:
//! "Corrientes 1234 (esq. Callao) B° San Nicolás". The text is cut into
//! segments and the first segment ending in `<name> <digits>` with a positive
//! number wins, scanning left to right.

use crate::value::StreetAddress;
use once_cell::sync::Lazy;
use regex::Regex;

// Parenthesized asides and "N°" style number markers.
static NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(.*?\)|[nN]\s?[°º]").unwrap());

// Segment separators: dash, comma and "B°" neighbourhood markers.
static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-|,|[bB][°º]").unwrap());

static NAME_AND_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s+([0-9]+)$").unwrap());

/// Returns `None` when no segment carries a street name followed by a
/// positive door number. The number keeps its digits as written, leading
/// zeros included, and has no upper bound.
pub fn parse_address(text: &str) -> Option<StreetAddress> {
    let cleaned = NOISE.replace_all(text.trim(), "");

    SEPARATORS
        .split(&cleaned)
        .map(|part| part.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|part| !part.is_empty())
        .find_map(|part| {
            let caps = NAME_AND_NUMBER.captures(&part)?;
            let digits = &caps[2];
            digits.bytes().any(|b| b != b'0').then(|| StreetAddress {
                street: caps[1].to_string(),
                number: digits.to_string(),
            })
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(text: &str) -> Option<(String, String)> {
        parse_address(text).map(|a| (a.street, a.number))
    }

    #[test]
    fn plain_address() {
        assert_eq!(parsed("Corrientes 1234"), Some(("Corrientes".into(), "1234".into())));
    }

    #[test]
    fn drops_parenthesized_aside_and_neighbourhood() {
        let (street, number) = parsed("Calle Falsa 123 (esq. Siempreviva) B° Centro").unwrap();
        assert!(street.contains("Calle Falsa"));
        assert_eq!(number, "123");
    }

    #[test]
    fn removes_number_markers() {
        assert_eq!(parsed("Av. Santa Fe N° 850"), Some(("Av. Santa Fe".into(), "850".into())));
        assert_eq!(parsed("Av. Santa Fe nº 850"), Some(("Av. Santa Fe".into(), "850".into())));
        assert_eq!(parsed("Av. Santa Fe N º 850"), Some(("Av. Santa Fe".into(), "850".into())));
    }

    #[test]
    fn collapses_inner_whitespace() {
        assert_eq!(
            parsed("  Avenida    de Mayo   575 "),
            Some(("Avenida de Mayo".into(), "575".into()))
        );
    }

    #[test]
    fn missing_number_fails() {
        assert_eq!(parsed("Avenida Sin Número"), None);
        assert_eq!(parsed(""), None);
        assert_eq!(parsed("1234"), None);
    }

    #[test]
    fn first_positive_candidate_wins() {
        assert_eq!(parsed("Ruta 5 km 3 -5"), Some(("Ruta 5 km".into(), "3".into())));
        assert_eq!(
            parsed("Calle Cero 0, Otra Calle 12"),
            Some(("Otra Calle".into(), "12".into()))
        );
        assert_eq!(
            parsed("Mitre 100 - Belgrano 200"),
            Some(("Mitre".into(), "100".into()))
        );
    }

    #[test]
    fn zero_only_fails() {
        assert_eq!(parsed("Calle 0 - Pasaje 000"), None);
    }

    #[test]
    fn leading_zeros_are_kept() {
        assert_eq!(parsed("Sarmiento 0042"), Some(("Sarmiento".into(), "0042".into())));
    }

    #[test]
    fn numbers_beyond_machine_integers_are_accepted() {
        assert_eq!(
            parsed("Ruta Nacional 40 4294967296"),
            Some(("Ruta Nacional 40".into(), "4294967296".into()))
        );
        assert_eq!(
            parsed("Ruta 3 184467440737095516160"),
            Some(("Ruta 3".into(), "184467440737095516160".into()))
        );
    }
}
