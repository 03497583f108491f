use binrw::binrw;

/// A `boolean` as defined in the SSH protocol.
///
/// Encoders always emit `0x01` for `true`, while any
/// non-zero byte is accepted as `true` when decoding.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4251#section-5>.
#[binrw]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[brw(big)]
pub struct Bool(
    #[br(map = |n: u8| n > 0)]
    #[bw(map = |b| u8::from(*b))]
    bool,
);

impl std::ops::Not for Bool {
    type Output = Self;

    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl std::ops::Deref for Bool {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::convert::From<bool> for Bool {
    fn from(value: bool) -> Self {
        Self(value)
    }
}

impl std::convert::From<Bool> for bool {
    fn from(value: Bool) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use binrw::{BinRead, BinWrite};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(&[0x00], false)]
    #[case(&[0x01], true)]
    #[case(&[0x2a], true)]
    fn it_accepts_any_non_zero_byte(#[case] wire: &[u8], #[case] expected: bool) {
        let read = Bool::read_be(&mut std::io::Cursor::new(wire)).unwrap();

        assert_eq!(bool::from(read), expected);
    }

    #[rstest]
    #[case(false, &[0x00])]
    #[case(true, &[0x01])]
    fn it_normalizes_on_write(#[case] value: bool, #[case] expected: &[u8]) {
        let mut cursor = std::io::Cursor::new(Vec::new());
        Bool::from(value).write_be(&mut cursor).unwrap();

        assert_eq!(cursor.into_inner(), expected);
    }
}
