//! The 64-bit fingerprint value and its canonical text form.
//!
//! Bit order is part of the wire contract: bit index 0 is the most
//! significant bit of the first byte, so the hex form reads cells in the
//! order they were produced.

use super::traits::PerceptualHash;
use crate::error::FingerprintParseError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of hex digits in the canonical text form
pub const HEX_LEN: usize = 16;

/// A fixed 64-bit perceptual fingerprint
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Fingerprint([u8; 8]);

impl Fingerprint {
    /// Width of every fingerprint in bits
    pub const BITS: u32 = 64;

    /// The fingerprint with every bit clear
    pub const ZERO: Fingerprint = Fingerprint([0; 8]);

    pub const fn from_u64(value: u64) -> Self {
        Self(value.to_be_bytes())
    }

    pub const fn to_u64(&self) -> u64 {
        u64::from_be_bytes(self.0)
    }

    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Pack bits MSB-first: the first bit yielded lands at index 0.
    ///
    /// Bits beyond the 64th are ignored; missing bits stay clear.
    pub fn from_bits<I: IntoIterator<Item = bool>>(bits: I) -> Self {
        let value = bits
            .into_iter()
            .take(Self::BITS as usize)
            .enumerate()
            .filter(|(_, bit)| *bit)
            .fold(0u64, |acc, (index, _)| acc | (1 << (63 - index)));
        Self::from_u64(value)
    }

    /// Bit at `index` (0 = most significant), or `None` past the end
    pub fn bit(&self, index: usize) -> Option<bool> {
        (index < Self::BITS as usize).then(|| (self.to_u64() >> (63 - index)) & 1 == 1)
    }

    /// Number of set bits
    pub fn count_ones(&self) -> u32 {
        self.to_u64().count_ones()
    }

    /// Hamming distance, in `[0, 64]`
    pub fn distance(&self, other: &Fingerprint) -> u32 {
        (self.to_u64() ^ other.to_u64()).count_ones()
    }

    /// Parse the canonical 16-digit hex form (either case)
    pub fn parse(text: &str) -> Result<Self, FingerprintParseError> {
        let length = text.chars().count();
        if length != HEX_LEN {
            return Err(FingerprintParseError::InvalidLength(length));
        }

        let mut value = 0u64;
        for (position, digit) in text.chars().enumerate() {
            let nibble = digit
                .to_digit(16)
                .ok_or(FingerprintParseError::InvalidDigit { digit, position })?;
            value = (value << 4) | nibble as u64;
        }

        Ok(Self::from_u64(value))
    }
}

impl PerceptualHash for Fingerprint {
    fn distance(&self, other: &Self) -> u32 {
        (self.to_u64() ^ other.to_u64()).count_ones()
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.to_u64())
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({})", self)
    }
}

impl FromStr for Fingerprint {
    type Err = FingerprintParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for Fingerprint {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl From<Fingerprint> for u64 {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.to_u64()
    }
}

impl Serialize for Fingerprint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Fingerprint {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Fingerprint::parse(&text).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_sixteen_lowercase_digits() {
        let fingerprint = Fingerprint::from_u64(0xDEAD_BEEF);
        assert_eq!(fingerprint.to_string(), "00000000deadbeef");
        assert_eq!(fingerprint.to_hex(), "00000000deadbeef");
    }

    #[test]
    fn parse_accepts_either_case() {
        let lower = Fingerprint::parse("00ff00ff00ff00ff").unwrap();
        let upper = Fingerprint::parse("00FF00FF00FF00FF").unwrap();
        assert_eq!(lower, upper);
        assert_eq!(lower.to_u64(), 0x00FF_00FF_00FF_00FF);
    }

    #[test]
    fn text_form_round_trips() {
        let samples = [
            0,
            u64::MAX,
            1,
            1 << 63,
            0x0123_4567_89AB_CDEF,
            0xF0F0_F0F0_0F0F_0F0F,
        ];
        for value in samples
            .into_iter()
            .chain((0..64).map(|shift| 0x9E37_79B9_7F4A_7C15u64.rotate_left(shift)))
        {
            let fingerprint = Fingerprint::from_u64(value);
            assert_eq!(fingerprint.to_string().parse::<Fingerprint>(), Ok(fingerprint));
        }
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert_eq!(
            Fingerprint::parse("abc"),
            Err(FingerprintParseError::InvalidLength(3))
        );
        assert_eq!(
            Fingerprint::parse("0x0000000000000000"),
            Err(FingerprintParseError::InvalidLength(18))
        );
    }

    #[test]
    fn parse_rejects_non_hex() {
        assert_eq!(
            Fingerprint::parse("000000000000000g"),
            Err(FingerprintParseError::InvalidDigit {
                digit: 'g',
                position: 15
            })
        );
    }

    #[test]
    fn from_bits_is_msb_first() {
        let fingerprint = Fingerprint::from_bits([true, false, true]);
        assert_eq!(fingerprint.to_u64(), 0b101 << 61);
        assert_eq!(fingerprint.bit(0), Some(true));
        assert_eq!(fingerprint.bit(1), Some(false));
        assert_eq!(fingerprint.bit(2), Some(true));
        assert_eq!(fingerprint.bit(64), None);
    }

    #[test]
    fn distance_counts_differing_bits() {
        let a = Fingerprint::from_u64(0);
        let b = Fingerprint::from_u64(u64::MAX);
        assert_eq!(a.distance(&a), 0);
        assert_eq!(a.distance(&b), 64);
        assert_eq!(b.distance(&a), 64);
        assert_eq!(a.similarity(&b), 0.0);
        assert_eq!(a.similarity(&a), 100.0);
    }

    #[test]
    fn serde_uses_hex_string() {
        let fingerprint = Fingerprint::from_u64(0xCAFE);
        let json = serde_json::to_string(&fingerprint).unwrap();
        assert_eq!(json, "\"000000000000cafe\"");

        let restored: Fingerprint = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, fingerprint);
        assert!(serde_json::from_str::<Fingerprint>("\"nope\"").is_err());
    }
}
