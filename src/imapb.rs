//! IMAPB floating point mapping (MISB ST 1201)
//!
//! Maps a real value in `[min, max]` onto an unsigned big-endian integer of
//! `len` bytes. The scale factors are powers of two so that the worked examples
//! of MISB ST 0903.5 and ST 1201 decode exactly:
//!
//! ```rust
//! use misb_klv::ImapB;
//!
//! let fov = ImapB::new(0.0, 180.0, 2).unwrap();
//! assert_eq!(fov.decode(&[0x06, 0x40]).unwrap(), 12.5);
//! ```

use crate::error::{DecodeError, KlvError, Result};

/// Largest supported encoded width (one `u64`)
pub const MAX_IMAPB_LEN: usize = 8;

/// IMAPB codec for one (min, max, length) triple
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImapB {
    min: f64,
    max: f64,
    len: usize,
    /// Forward scale, 2^(dPow - bPow)
    s_f: f64,
    /// Reverse scale, 2^(bPow - dPow)
    s_r: f64,
    /// Offset that makes zero land on an integer code
    z_off: f64,
}

impl ImapB {
    /// Create a codec for values in `[min, max]` encoded on `len` bytes
    pub fn new(min: f64, max: f64, len: usize) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(KlvError::InvalidParameter(format!(
                "IMAPB bounds must be finite, got [{}, {}]",
                min, max
            )));
        }
        if min >= max {
            return Err(KlvError::InvalidParameter(format!(
                "IMAPB min ({}) must be lower than max ({})",
                min, max
            )));
        }
        if len == 0 || len > MAX_IMAPB_LEN {
            return Err(KlvError::InvalidParameter(format!(
                "IMAPB length must be within 1..={}, got {}",
                MAX_IMAPB_LEN, len
            )));
        }

        let b_pow = (max - min).log2().ceil() as i32;
        let d_pow = 8 * len as i32 - 1;
        let s_f = 2f64.powi(d_pow - b_pow);
        let s_r = 2f64.powi(b_pow - d_pow);
        let z_off = if min < 0.0 && max > 0.0 {
            s_f * min - (s_f * min).floor()
        } else {
            0.0
        };

        Ok(Self {
            min,
            max,
            len,
            s_f,
            s_r,
            z_off,
        })
    }

    /// Lower bound of the mapped interval
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the mapped interval
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Encoded length in bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false, a codec encodes at least one byte
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Quantization step: the real-valued width of one integer code
    pub fn precision(&self) -> f64 {
        self.s_r
    }

    /// Same bounds, different encoded length
    pub fn with_len(&self, len: usize) -> Result<Self> {
        Self::new(self.min, self.max, len)
    }

    /// Decode `len` big-endian bytes into a real value
    ///
    /// Codes with the most significant bit set are the ST 1201 special values
    /// (infinities, NaN and user defined) and decode as `f64::NAN`.
    pub fn decode(&self, bytes: &[u8]) -> Result<f64> {
        if bytes.len() != self.len {
            return Err(DecodeError::malformed(
                0,
                format!(
                    "IMAPB value is {} bytes, expected {}",
                    bytes.len(),
                    self.len
                ),
            )
            .into());
        }

        let code = bytes.iter().fold(0u64, |acc, &b| (acc << 8) | b as u64);
        if code >> (8 * self.len - 1) != 0 {
            return Ok(f64::NAN);
        }
        Ok(self.s_r * (code as f64 - self.z_off) + self.min)
    }

    /// Encode a real value; out of range input is clamped, NaN encodes as `min`
    pub fn encode(&self, value: f64) -> Vec<u8> {
        let x = if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        };

        // the most significant bit is reserved for special values
        let code_max = (1u64 << (8 * self.len - 1)) - 1;
        let y = (self.s_f * (x - self.min) + self.z_off).trunc();
        let y = (y as u64).min(code_max);

        y.to_be_bytes()[MAX_IMAPB_LEN - self.len..].to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_st0903_worked_examples() {
        let fov = ImapB::new(0.0, 180.0, 2).unwrap();
        assert_abs_diff_eq!(fov.decode(&[0x06, 0x40]).unwrap(), 12.5, epsilon = 1e-8);

        let offset = ImapB::new(-19.2, 19.2, 3).unwrap();
        assert_abs_diff_eq!(
            offset.decode(&[0x3A, 0x66, 0x67]).unwrap(),
            10.0,
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(
            offset.decode(&[0x3E, 0x66, 0x67]).unwrap(),
            12.0,
            epsilon = 1e-8
        );

        let hae = ImapB::new(-900.0, 19000.0, 2).unwrap();
        assert_abs_diff_eq!(hae.decode(&[0x2A, 0x94]).unwrap(), 10000.0, epsilon = 1e-8);
    }

    #[test]
    fn test_worked_examples_encode() {
        let fov = ImapB::new(0.0, 180.0, 2).unwrap();
        assert_eq!(fov.encode(12.5), vec![0x06, 0x40]);

        let hae = ImapB::new(-900.0, 19000.0, 2).unwrap();
        assert_eq!(hae.encode(10000.0), vec![0x2A, 0x94]);

        let offset = ImapB::new(-19.2, 19.2, 3).unwrap();
        assert_eq!(offset.encode(10.0), vec![0x3A, 0x66, 0x67]);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(matches!(
            ImapB::new(10.0, 10.0, 2),
            Err(KlvError::InvalidParameter(_))
        ));
        assert!(matches!(
            ImapB::new(5.0, -5.0, 2),
            Err(KlvError::InvalidParameter(_))
        ));
        assert!(matches!(
            ImapB::new(0.0, 1.0, 0),
            Err(KlvError::InvalidParameter(_))
        ));
        assert!(ImapB::new(0.0, 1.0, 9).is_err());
        assert!(ImapB::new(f64::NEG_INFINITY, 1.0, 2).is_err());
    }

    #[test]
    fn test_clamps_out_of_range() {
        let codec = ImapB::new(0.0, 100.0, 2).unwrap();
        assert_eq!(codec.encode(-5.0), codec.encode(0.0));
        assert_eq!(codec.encode(250.0), codec.encode(100.0));
        assert_eq!(codec.encode(f64::NAN), codec.encode(0.0));

        let top = codec.decode(&codec.encode(100.0)).unwrap();
        assert!((top - 100.0).abs() <= codec.precision());
    }

    #[test]
    fn test_zero_is_exact_for_signed_ranges() {
        let codec = ImapB::new(-19.2, 19.2, 3).unwrap();
        let zero = codec.decode(&codec.encode(0.0)).unwrap();
        assert_abs_diff_eq!(zero, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let codec = ImapB::new(0.0, 180.0, 2).unwrap();
        assert!(codec.decode(&[0x06]).is_err());
        assert!(codec.decode(&[0x00, 0x06, 0x40]).is_err());
    }

    #[test]
    fn test_precision_shrinks_with_length() {
        let short = ImapB::new(-900.0, 40000.0, 2).unwrap();
        let long = short.with_len(4).unwrap();
        assert!(long.precision() < short.precision());
        assert_eq!(long.len(), 4);
        assert_eq!(long.encode(1234.5).len(), 4);
    }

    #[test]
    fn test_reserved_codes_decode_as_nan() {
        let fov = ImapB::new(0.0, 180.0, 2).unwrap();
        assert!(fov.decode(&[0xFF, 0xFF]).unwrap().is_nan());
        assert!(fov.decode(&[0x80, 0x00]).unwrap().is_nan());
        assert_abs_diff_eq!(fov.decode(&[0x7F, 0xFF]).unwrap(), 256.0, epsilon = 0.01);

        let zoom = ImapB::new(0.0, 100.0, 1).unwrap();
        assert!(zoom.decode(&[0xC8]).unwrap().is_nan());
    }

    #[test]
    fn test_power_of_two_range_never_sets_reserved_bit() {
        let codec = ImapB::new(0.0, 256.0, 2).unwrap();
        let top = codec.encode(256.0);
        assert_eq!(top, vec![0x7F, 0xFF]);
        assert_abs_diff_eq!(codec.decode(&top).unwrap(), 256.0, epsilon = codec.precision());
    }

    #[test]
    fn test_eight_byte_codes() {
        let codec = ImapB::new(0.0, 1.0, 8).unwrap();
        let bytes = codec.encode(1.0);
        assert_eq!(bytes.len(), 8);
        assert_abs_diff_eq!(codec.decode(&bytes).unwrap(), 1.0, epsilon = 1e-9);
    }
}
