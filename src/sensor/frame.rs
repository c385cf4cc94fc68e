//! Torque wire frame.
//!
//! Layout (4 bytes, no header, no checksum):
//! ```text
//! Byte 0: bits 0-7   of the reading (i32, two's complement)
//! Byte 1: bits 8-15
//! Byte 2: bits 16-23
//! Byte 3: bits 24-31
//! ```
//! The length is implicit; centrals read or receive exactly one frame per
//! characteristic value.

use core::fmt;

use super::Reading;
use crate::error::FrameError;

/// Frame size in bytes.
pub const FRAME_SIZE: usize = 4;

/// Encoded characteristic value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WireFrame(pub [u8; FRAME_SIZE]);

impl WireFrame {
    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.0
    }
}

/// Encode a reading, little-endian.
pub fn encode(reading: Reading) -> WireFrame {
    WireFrame(reading.0.to_le_bytes())
}

/// Decode a characteristic value back into a reading.
pub fn decode(data: &[u8]) -> Result<Reading, FrameError> {
    let bytes: [u8; FRAME_SIZE] = data.try_into().map_err(|_| FrameError::Length {
        expected: FRAME_SIZE,
        actual: data.len(),
    })?;
    Ok(Reading(i32::from_le_bytes(bytes)))
}

/// Hex dump used by the transmission log: `[0x2D, 0x00, 0x00, 0x00]`.
impl fmt::Display for WireFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, b) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "0x{b:02X}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_little_endian() {
        assert_eq!(encode(Reading(45)).0, [0x2D, 0x00, 0x00, 0x00]);
        assert_eq!(encode(Reading(85)).0, [0x55, 0x00, 0x00, 0x00]);
        assert_eq!(encode(Reading(120)).0, [0x78, 0x00, 0x00, 0x00]);
        assert_eq!(encode(Reading(0x0102_0304)).0, [0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn negative_readings_use_twos_complement() {
        assert_eq!(encode(Reading(-1)).0, [0xFF; 4]);
        assert_eq!(encode(Reading(i32::MIN)).0, [0x00, 0x00, 0x00, 0x80]);
        assert_eq!(decode(&[0xFE, 0xFF, 0xFF, 0xFF]), Ok(Reading(-2)));
    }

    #[test]
    fn decode_rejects_wrong_length() {
        assert_eq!(
            decode(&[0x2D, 0x00, 0x00]),
            Err(FrameError::Length {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            decode(&[0; 5]),
            Err(FrameError::Length {
                expected: 4,
                actual: 5
            })
        );
        assert!(decode(&[]).is_err());
    }

    #[test]
    fn decode_inverts_encode_at_extremes() {
        for r in [i32::MIN, -1, 0, 1, i32::MAX] {
            let frame = encode(Reading(r));
            assert_eq!(decode(frame.as_bytes()), Ok(Reading(r)));
        }
    }

    #[test]
    fn display_is_hex_dump() {
        assert_eq!(
            format!("{}", encode(Reading(200))),
            "[0xC8, 0x00, 0x00, 0x00]"
        );
        assert_eq!(
            format!("{}", encode(Reading(-16))),
            "[0xF0, 0xFF, 0xFF, 0xFF]"
        );
    }
}
