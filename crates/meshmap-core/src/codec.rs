//! Identifier codec — dotted address `A.B` ↔ compact network number.
//!
//! Encoding appends the low two digits of `B` (zero-padded to width 2) to
//! `A`. Decoding splits the compact decimal form by digit count.
//!
//! The mapping is deliberately **not** a bijection when the second octet has
//! three digits: encoding keeps only its low two digits, so `10.107` encodes
//! to `1007`, which decodes back to `10.7`. Historical behavior across every
//! deployment of this codec; kept as-is rather than guessed at.

use crate::node::NetworkNumber;

/// Malformed codec input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
}

/// Encode a dotted address `A.B` into its compact network number.
///
/// `A` may have 1–2 digits, `B` 1–3 digits; anything else (extra dots,
/// non-digit characters, empty octets) is an error.
pub fn encode(address: &str) -> Result<NetworkNumber, CodecError> {
    let invalid = || CodecError::InvalidIdentifier(address.to_owned());

    let (hi, lo) = address.split_once('.').ok_or_else(invalid)?;
    if !is_digits(hi) || !is_digits(lo) || hi.len() > 2 || lo.len() > 3 {
        return Err(invalid());
    }

    // Only the low two digits of the second octet survive encoding.
    let lo = if lo.len() == 3 { &lo[1..] } else { lo };
    let compact = format!("{hi}{lo:0>2}");
    compact.parse::<u32>().map(NetworkNumber).map_err(|_| invalid())
}

/// Decode a compact network number back into its dotted address form.
///
/// Split depends on the digit count of the decimal rendering:
/// - 4 digits → both halves re-parsed numerically (leading zeros dropped);
/// - 3 digits → first digit, then the last two digits **verbatim**
///   (`307` decodes to `"3.07"`, not `"3.7"`);
/// - 1–2 digits → `0.` followed by the digits as-is.
///
/// Anything longer than 4 digits has no address form.
pub fn decode(nn: NetworkNumber) -> Result<String, CodecError> {
    let compact = nn.to_string();
    match compact.len() {
        4 => Ok(format!("{}.{}", nn.0 / 100, nn.0 % 100)),
        3 => Ok(format!("{}.{}", &compact[..1], &compact[1..])),
        1 | 2 => Ok(format!("0.{compact}")),
        _ => Err(CodecError::InvalidIdentifier(compact)),
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_pads_short_second_octet() {
        assert_eq!(encode("27.3").unwrap(), NetworkNumber(2703));
        assert_eq!(encode("7.13").unwrap(), NetworkNumber(713));
        assert_eq!(encode("0.42").unwrap(), NetworkNumber(42));
    }

    #[test]
    fn encode_drops_leading_digit_of_three_digit_octet() {
        // 10.107 → low two digits "07" → 1007
        assert_eq!(encode("10.107").unwrap(), NetworkNumber(1007));
        assert_eq!(encode("2.155").unwrap(), NetworkNumber(255));
    }

    #[test]
    fn decode_four_digits_parses_both_halves() {
        assert_eq!(decode(NetworkNumber(2703)).unwrap(), "27.3");
        assert_eq!(decode(NetworkNumber(1007)).unwrap(), "10.7");
    }

    #[test]
    fn decode_three_digits_keeps_low_octet_verbatim() {
        assert_eq!(decode(NetworkNumber(307)).unwrap(), "3.07");
        assert_eq!(decode(NetworkNumber(713)).unwrap(), "7.13");
    }

    #[test]
    fn decode_short_forms_get_zero_prefix() {
        assert_eq!(decode(NetworkNumber(7)).unwrap(), "0.7");
        assert_eq!(decode(NetworkNumber(70)).unwrap(), "0.70");
    }

    #[test]
    fn round_trip_holds_below_one_hundred() {
        for addr in ["0.7", "3.17", "27.3", "10.7", "99.99"] {
            let nn = encode(addr).unwrap();
            assert_eq!(decode(nn).unwrap(), addr, "round trip of {addr}");
        }
    }

    #[test]
    fn three_digit_octet_is_documented_lossy() {
        // For 100 <= B <= 199 the decoded form is A.(B-100) — asserted as
        // documented behavior, not silently corrected.
        let nn = encode("10.107").unwrap();
        assert_eq!(decode(nn).unwrap(), "10.7");
        let nn = encode("5.199").unwrap();
        assert_eq!(decode(nn).unwrap(), "5.99");
    }

    #[test]
    fn malformed_addresses_are_rejected() {
        for bad in ["", "10", "10.", ".7", "10.7.3", "1a.7", "10.7b", "107.5", "10.1234"] {
            assert!(encode(bad).is_err(), "expected {bad:?} to be rejected");
        }
    }

    #[test]
    fn five_digit_numbers_have_no_address_form() {
        assert!(decode(NetworkNumber(12345)).is_err());
    }
}
