#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, str};

use fstr::FStr;

/// Length of the binary representation of a UUID in bytes.
pub const LENGTH_BINARY: usize = 16;

/// Length of the NUL-terminated string representation written by [`Uuid::format_into()`].
pub const LENGTH_STRING: usize = 37;

/// Number of 100-nanosecond intervals between the UUID epoch (1582-10-15T00:00:00Z) and the Unix
/// epoch (1970-01-01T00:00:00Z).
pub const UUID_EPOCH_OFFSET: u64 = 0x01B2_1DD2_1381_4000;

/// Represents a Universally Unique IDentifier.
///
/// The value is a single 16-byte array in RFC4122 binary (network) order. The structured fields
/// of RFC4122 are exposed through accessors that read from fixed offsets into the array.
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                          time_low                             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |       time_mid                |         time_hi_and_version   |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |clk_seq_hi_res |  clk_seq_low  |         node (0-1)            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         node (2-5)                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Name space for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_DNS: Self = Self([
        0x6b, 0xa7, 0xb8, 0x10, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Name space for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_URL: Self = Self([
        0x6b, 0xa7, 0xb8, 0x11, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Name space for ISO OIDs (6ba7b812-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_OID: Self = Self([
        0x6b, 0xa7, 0xb8, 0x12, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Name space for X.500 DNs (6ba7b814-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_X500: Self = Self([
        0x6b, 0xa7, 0xb8, 0x14, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4, 0x30,
        0xc8,
    ]);

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8; 16] {
        &mut self.0
    }

    /// Creates a UUID from the RFC4122 structured field values.
    ///
    /// No version or variant bits are applied; the fields are copied as given.
    pub const fn from_fields(
        time_low: u32,
        time_mid: u16,
        time_hi_and_version: u16,
        clock_seq_hi_and_reserved: u8,
        clock_seq_low: u8,
        node: [u8; 6],
    ) -> Self {
        Self([
            (time_low >> 24) as u8,
            (time_low >> 16) as u8,
            (time_low >> 8) as u8,
            time_low as u8,
            (time_mid >> 8) as u8,
            time_mid as u8,
            (time_hi_and_version >> 8) as u8,
            time_hi_and_version as u8,
            clock_seq_hi_and_reserved,
            clock_seq_low,
            node[0],
            node[1],
            node[2],
            node[3],
            node[4],
            node[5],
        ])
    }

    /// Returns the `time_low` field (bytes 0-3).
    pub const fn time_low(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Returns the `time_mid` field (bytes 4-5).
    pub const fn time_mid(&self) -> u16 {
        u16::from_be_bytes([self.0[4], self.0[5]])
    }

    /// Returns the `time_hi_and_version` field (bytes 6-7).
    pub const fn time_hi_and_version(&self) -> u16 {
        u16::from_be_bytes([self.0[6], self.0[7]])
    }

    /// Returns the `clock_seq_hi_and_reserved` field (byte 8).
    pub const fn clock_seq_hi_and_reserved(&self) -> u8 {
        self.0[8]
    }

    /// Returns the `clock_seq_low` field (byte 9).
    pub const fn clock_seq_low(&self) -> u8 {
        self.0[9]
    }

    /// Returns the `node` field (bytes 10-15).
    pub const fn node(&self) -> [u8; 6] {
        [
            self.0[10], self.0[11], self.0[12], self.0[13], self.0[14], self.0[15],
        ]
    }

    pub(crate) fn set_node(&mut self, node: &[u8; 6]) {
        self.0[10..].copy_from_slice(node);
    }

    pub(crate) fn set_clock_seq(&mut self, hi_and_reserved: u8, low: u8) {
        self.0[8] = hi_and_reserved;
        self.0[9] = low;
    }

    /// Sets all 16 bytes to zero.
    pub fn clear(&mut self) {
        self.0 = [0; 16];
    }

    /// Applies the RFC4122 variant (`10`) and the `version` nibble.
    ///
    /// Every generator calls this exactly once, after all other bytes are written.
    pub(crate) fn stamp(&mut self, version: u8) {
        debug_assert!(version < 16);
        self.0[8] = (self.0[8] & 0x3f) | 0x80;
        self.0[6] = (self.0[6] & 0x0f) | (version << 4);
    }

    /// Reports the variant field value of the UUID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use embedded_uuid::{Uuid, Variant};
    ///
    /// assert_eq!(Uuid::NIL.variant(), Variant::Nil);
    /// assert_eq!(Uuid::NAMESPACE_DNS.variant(), Variant::Var10);
    /// ```
    pub const fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 => {
                if u128::from_be_bytes(self.0) == 0 {
                    Variant::Nil
                } else {
                    Variant::Var0
                }
            }
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            _ => {
                if u128::from_be_bytes(self.0) == u128::MAX {
                    Variant::Max
                } else {
                    Variant::Var111
                }
            }
        }
    }

    /// Returns the version field value of the UUID or `None` if the UUID does not have the
    /// variant field value of `10`.
    pub const fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }

    /// Decodes the 60-bit count of 100-nanosecond intervals since the UUID epoch from a version 1
    /// or version 6 UUID, or returns `None` for any other version.
    pub const fn timestamp(&self) -> Option<u64> {
        let b = &self.0;
        match self.version() {
            Some(1) => Some(
                ((self.time_hi_and_version() as u64 & 0x0fff) << 48)
                    | ((self.time_mid() as u64) << 32)
                    | self.time_low() as u64,
            ),
            Some(6) => Some(
                ((b[0] as u64) << 52)
                    | ((b[1] as u64) << 44)
                    | ((b[2] as u64) << 36)
                    | ((b[3] as u64) << 28)
                    | ((b[4] as u64) << 20)
                    | ((b[5] as u64) << 12)
                    | (((b[6] & 0x0f) as u64) << 8)
                    | b[7] as u64,
            ),
            _ => None,
        }
    }

    /// Writes the 8-4-4-4-12 lowercase hexadecimal representation followed by a NUL terminator.
    ///
    /// The buffer type fixes its size at [`LENGTH_STRING`] bytes, which is the amount needed
    /// for the 36 characters and the terminator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use embedded_uuid::{Uuid, LENGTH_STRING};
    ///
    /// let mut buf = [0xffu8; LENGTH_STRING];
    /// Uuid::NAMESPACE_URL.format_into(&mut buf);
    /// assert_eq!(&buf[..36], b"6ba7b811-9dad-11d1-80b4-00c04fd430c8");
    /// assert_eq!(buf[36], 0);
    /// ```
    pub fn format_into(&self, buf: &mut [u8; LENGTH_STRING]) {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut pos = 0;
        for (i, e) in self.0.iter().enumerate() {
            buf[pos] = DIGITS[(e >> 4) as usize];
            buf[pos + 1] = DIGITS[(e & 15) as usize];
            pos += 2;
            if i == 3 || i == 5 || i == 7 || i == 9 {
                buf[pos] = b'-';
                pos += 1;
            }
        }
        buf[pos] = 0;
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string-like type that can be handled like [`String`](std::string::String) through common
    /// traits.
    ///
    /// This method is primarily for `no_std` environments where heap-allocated string types are
    /// not readily available. Use the [`fmt::Display`] trait usually to get the 8-4-4-4-12
    /// canonical hexadecimal string representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use embedded_uuid::Uuid;
    ///
    /// let x = "2ed6657d-e927-568b-95e1-2665a8aea6a2".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "2ed6657d-e927-568b-95e1-2665a8aea6a2");
    /// assert!(y.eq_ignore_ascii_case("2ED6657D-E927-568B-95E1-2665A8AEA6A2"));
    /// # Ok::<(), embedded_uuid::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        let mut buffer = [0u8; LENGTH_STRING];
        self.format_into(&mut buffer);
        let mut text = [0u8; 36];
        text.copy_from_slice(&buffer[..36]);
        debug_assert!(text.is_ascii());
        // SAFETY: `format_into` writes ASCII hex digits and hyphens only.
        unsafe { FStr::from_inner_unchecked(text) }
    }
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        const ERR: ParseError = ParseError {};
        let mut dst = [0u8; 16];
        let mut iter = src.chars();
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            let lo = iter.next().ok_or(ERR)?.to_digit(16).ok_or(ERR)? as u8;
            *e = (hi << 4) | lo;
            if (i == 3 || i == 5 || i == 7 || i == 9) && iter.next().ok_or(ERR)? != '-' {
                return Err(ERR);
            }
        }
        if iter.next().is_none() {
            Ok(Self(dst))
        } else {
            Err(ERR)
        }
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

/// The reserved variants of UUIDs.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Variant {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    Nil,
    /// The variant field value of `0xx` (reserved, NCS backward compatibility)
    Var0,
    /// The variant field value of `10` specified by RFC4122
    Var10,
    /// The variant field value of `110` (reserved, Microsoft backward compatibility)
    Var110,
    /// The variant field value of `111` (reserved for future definition)
    Var111,
    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    Max,
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation")
    }
}

#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
mod std_ext {
    use super::{ParseError, Uuid};

    impl From<Uuid> for String {
        fn from(src: Uuid) -> Self {
            src.to_string()
        }
    }

    impl TryFrom<String> for Uuid {
        type Error = ParseError;

        fn try_from(src: String) -> Result<Self, Self::Error> {
            src.parse()
        }
    }

    impl std::error::Error for ParseError {}
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::Uuid;
        use serde_test::{assert_tokens, Configure, Token};

        /// Serializes and deserializes prepared cases correctly
        #[test]
        fn serializes_and_deserializes_prepared_cases_correctly() {
            let cases = [
                ("00000000-0000-0000-0000-000000000000", &[0u8; 16]),
                (
                    "6ba7b810-9dad-11d1-80b4-00c04fd430c8",
                    &[
                        107, 167, 184, 16, 157, 173, 17, 209, 128, 180, 0, 192, 79, 212, 48, 200,
                    ],
                ),
                (
                    "5df41881-3aed-3515-88a7-2f4a814cf09e",
                    &[
                        93, 244, 24, 129, 58, 237, 53, 21, 136, 167, 47, 74, 129, 76, 240, 158,
                    ],
                ),
                (
                    "12345678-9abc-6def-9234-a1b1c2d3e4f5",
                    &[
                        18, 52, 86, 120, 154, 188, 109, 239, 146, 52, 161, 177, 194, 211, 228, 245,
                    ],
                ),
            ];

            for (text, bytes) in cases {
                let e = text.parse::<Uuid>().unwrap();
                assert_tokens(&e.readable(), &[Token::String(text)]);
                assert_tokens(&e.compact(), &[Token::Bytes(bytes)]);
            }
        }
    }
}
