use binrw::binrw;
use num_bigint_dig::BigUint;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use super::Bytes;

/// A `mpint` as defined in the SSH protocol.
///
/// The value zero is represented as an empty payload, and a positive
/// integer whose most-significant bit is set is prefixed with a single
/// zero byte so it is never misread as negative.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4251#section-5>.
#[binrw]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
pub struct MpInt<'b>(Bytes<'b>);

impl<'b> MpInt<'b> {
    /// Create a [`MpInt`] from _bytes_, trusted to already be in wire form.
    pub fn from_bytes(bytes: impl Into<Bytes<'b>>) -> Self {
        Self(bytes.into())
    }

    /// Create a [`MpInt`] from a big-endian _magnitude_, stripping leading
    /// zeroes and copying if necessary to ensure it is represented as positive.
    pub fn positive(value: &'b [u8]) -> Self {
        let value = &value[value.iter().take_while(|&&byte| byte == 0).count()..];

        match value.first() {
            Some(byte) if *byte >= 0x80 => {
                let mut buffer = vec![0u8; value.len() + 1];
                buffer[1..].copy_from_slice(value);

                Self(Bytes::owned(buffer))
            }
            _ => Self(Bytes::borrowed(value)),
        }
    }

    /// Create a [`MpInt`] from a [`BigUint`], in canonical wire form.
    pub fn from_uint(value: &BigUint) -> MpInt<'static> {
        let bytes = value.to_bytes_be();

        // `to_bytes_be` encodes zero as a single `0x00` byte,
        // while the wire form of zero is an empty payload
        match bytes[..] {
            [0] => MpInt(Bytes::owned(Vec::new())),
            [byte, ..] if byte >= 0x80 => {
                let mut buffer = vec![0u8; bytes.len() + 1];
                buffer[1..].copy_from_slice(&bytes);

                MpInt(Bytes::owned(buffer))
            }
            _ => MpInt(Bytes::owned(bytes)),
        }
    }

    /// Interpret the [`MpInt`] as an unsigned [`BigUint`].
    pub fn to_uint(&self) -> BigUint {
        BigUint::from_bytes_be(self.as_ref())
    }
}

impl AsRef<[u8]> for MpInt<'_> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use binrw::{BinRead, BinWrite};
    use hex_literal::hex;
    use rstest::rstest;

    use super::*;

    // Test vectors from RFC 4251 section 5.
    #[rstest]
    #[case(&hex!("00"), &hex!("00000000"))]
    #[case(&hex!("09 a3 78 f9 b2 e3 32 a7"), &hex!("00000008 09 a3 78 f9 b2 e3 32 a7"))]
    #[case(&hex!("80"), &hex!("00000002 00 80"))]
    #[case(&hex!("00 00 80"), &hex!("00000002 00 80"))]
    fn it_canonicalizes_magnitudes(#[case] magnitude: &[u8], #[case] expected: &[u8]) {
        let mpint = MpInt::positive(magnitude);

        let mut cursor = std::io::Cursor::new(Vec::new());
        mpint.write_be(&mut cursor).unwrap();

        assert_eq!(cursor.into_inner(), expected);
    }

    #[rstest]
    #[case(0u32)]
    #[case(0x80u32)]
    #[case(0x9a378f9bu32)]
    fn it_round_trips_through_biguint(#[case] value: u32) {
        let value = BigUint::from(value);
        let mpint = MpInt::from_uint(&value);

        let mut cursor = std::io::Cursor::new(Vec::new());
        mpint.write_be(&mut cursor).unwrap();
        cursor.set_position(0);

        let read = MpInt::read_be(&mut cursor).unwrap();

        assert_eq!(read.to_uint(), value);
        assert_eq!(read, mpint);
    }

    #[test]
    fn it_prefixes_high_bit_values_once() {
        let mpint = MpInt::from_uint(&BigUint::from(0xff00ff00u32));

        assert_eq!(mpint.as_ref(), &hex!("00 ff 00 ff 00"));
    }
}
