use binrw::{BinRead, BinWrite};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

#[derive(Debug, Clone)]
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
enum Inner<'b> {
    Owned(Vec<u8>),

    #[cfg_attr(feature = "zeroize", zeroize(skip))]
    Borrowed(&'b [u8]),
}

/// A `string` as defined in the SSH protocol,
/// prefixed with it's `size` as a [`u32`].
///
/// see <https://datatracker.ietf.org/doc/html/rfc4251#section-5>.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
pub struct Bytes<'b> {
    inner: Inner<'b>,
}

impl<'b> Bytes<'b> {
    /// Create [`Bytes`] from a _vector_.
    pub fn owned(value: Vec<u8>) -> Self {
        Self {
            inner: Inner::Owned(value),
        }
    }

    /// Create [`Bytes`] from a _slice_.
    pub fn borrowed(value: &'b [u8]) -> Self {
        Self {
            inner: Inner::Borrowed(value),
        }
    }

    /// Extract the buffer into a [`Vec`].
    pub fn into_vec(self) -> Vec<u8> {
        match self.inner {
            Inner::Owned(vec) => vec,
            Inner::Borrowed(slice) => slice.to_vec(),
        }
    }
}

impl Default for Bytes<'_> {
    fn default() -> Self {
        Self::owned(Default::default())
    }
}

impl AsRef<[u8]> for Bytes<'_> {
    fn as_ref(&self) -> &[u8] {
        match &self.inner {
            Inner::Owned(vec) => vec,
            Inner::Borrowed(slice) => slice,
        }
    }
}

impl PartialEq for Bytes<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.as_ref() == other.as_ref()
    }
}

impl Eq for Bytes<'_> {}

impl From<Vec<u8>> for Bytes<'_> {
    fn from(value: Vec<u8>) -> Self {
        Self::owned(value)
    }
}

impl<'b> From<&'b [u8]> for Bytes<'b> {
    fn from(value: &'b [u8]) -> Self {
        Self::borrowed(value)
    }
}

impl BinRead for Bytes<'_> {
    type Args<'a> = ();

    fn read_options<R: std::io::Read + std::io::Seek>(
        reader: &mut R,
        endian: binrw::Endian,
        args: Self::Args<'_>,
    ) -> binrw::BinResult<Self> {
        let size = u32::read_be(reader)?;

        if size as usize > crate::STRING_MAX_SIZE {
            return Err(binrw::Error::AssertFail {
                pos: reader.stream_position()?,
                message: format!(
                    "String is too long ({size} > {})",
                    crate::STRING_MAX_SIZE
                ),
            });
        }

        BinRead::read_options(
            reader,
            endian,
            binrw::VecArgs {
                count: size as usize,
                inner: args,
            },
        )
        .map(Self::owned)
    }
}

impl BinWrite for Bytes<'_> {
    type Args<'a> = ();

    fn write_options<W: std::io::Write + std::io::Seek>(
        &self,
        writer: &mut W,
        endian: binrw::Endian,
        args: Self::Args<'_>,
    ) -> binrw::BinResult<()> {
        let buf = self.as_ref();
        let size = buf.len() as u32;

        size.write_be(writer)?;
        buf.write_options(writer, endian, args)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use binrw::{BinRead, BinWrite};
    use rstest::rstest;

    use super::*;
    use crate::Error;

    #[rstest]
    #[case(&[], b"\x00\x00\x00\x00")]
    #[case(b"testing", b"\x00\x00\x00\x07testing")]
    fn it_writes_the_size_prefix(#[case] payload: &[u8], #[case] expected: &[u8]) {
        let mut cursor = std::io::Cursor::new(Vec::new());
        Bytes::borrowed(payload).write_be(&mut cursor).unwrap();

        assert_eq!(cursor.into_inner(), expected);
    }

    #[rstest]
    #[case(b"\x00\x00\x00\x00", &[])]
    #[case(b"\x00\x00\x00\x07testing", b"testing")]
    fn it_reads_consistently(#[case] wire: &[u8], #[case] expected: &[u8]) {
        let bytes = Bytes::read_be(&mut std::io::Cursor::new(wire)).unwrap();

        assert_eq!(bytes.as_ref(), expected);
    }

    #[test]
    fn it_rejects_a_size_overrunning_the_input() {
        let err = Bytes::read_be(&mut std::io::Cursor::new(b"\x00\x00\x00\x10oops"))
            .map_err(Error::from)
            .unwrap_err();

        assert!(matches!(err, Error::NeedMore), "{err:?}");
    }

    #[test]
    fn it_rejects_a_size_above_the_maximum() {
        let err = Bytes::read_be(&mut std::io::Cursor::new(b"\xff\xff\xff\xff"))
            .map_err(Error::from)
            .unwrap_err();

        assert!(
            matches!(&err, Error::Malformed(message) if message.starts_with("String is too long")),
            "{err:?}"
        );
    }
}
