//! 128-bit UUID text to on-air bytes.
//!
//! `const` so the advertising payload and the config constants can be
//! derived from the canonical strings at compile time.

/// Parse `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx` into on-air (little-endian)
/// byte order.
pub const fn uuid128_le(uuid: &str) -> Option<[u8; 16]> {
    let text = uuid.as_bytes();
    if text.len() != 36 {
        return None;
    }

    let mut out = [0u8; 16];
    let mut n = 0;
    let mut pos = 0;
    while pos < text.len() {
        if matches!(pos, 8 | 13 | 18 | 23) {
            if text[pos] != b'-' {
                return None;
            }
            pos += 1;
            continue;
        }

        let (hi, lo) = match (nibble(text[pos]), nibble(text[pos + 1])) {
            (Some(hi), Some(lo)) => (hi, lo),
            _ => return None,
        };
        // Big-endian text, little-endian output.
        out[15 - n] = (hi << 4) | lo;
        n += 1;
        pos += 2;
    }
    Some(out)
}

const fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE: &str = "12345678-1234-1234-1234-123456789abc";

    #[test]
    fn uuid_is_reversed_for_air() {
        let le = uuid128_le(SERVICE).unwrap();
        assert_eq!(
            le,
            [
                0xbc, 0x9a, 0x78, 0x56, 0x34, 0x12, 0x34, 0x12, 0x34, 0x12, 0x34, 0x12, 0x78,
                0x56, 0x34, 0x12
            ]
        );
    }

    #[test]
    fn uuid_accepts_upper_case() {
        assert_eq!(
            uuid128_le("87654321-4321-4321-4321-CBA987654321"),
            uuid128_le("87654321-4321-4321-4321-cba987654321")
        );
    }

    #[test]
    fn uuid_rejects_malformed() {
        assert!(uuid128_le("").is_none());
        assert!(uuid128_le("12345678123412341234123456789abc").is_none());
        assert!(uuid128_le("12345678-1234-1234-1234-123456789ab").is_none());
        assert!(uuid128_le("12345678-1234-1234-1234-123456789abcd").is_none());
        assert!(uuid128_le("1234567-81234-1234-1234-123456789abc").is_none());
        assert!(uuid128_le("12345678-1234-1234-1234-123456789abg").is_none());
    }

    #[test]
    fn usable_in_const_context() {
        const PARSED: Option<[u8; 16]> = uuid128_le(SERVICE);
        assert_eq!(PARSED.map(|b| b[15]), Some(0x12));
    }
}
