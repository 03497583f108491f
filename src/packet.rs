//! Conversions between wire structures and their binary form.

use binrw::{
    meta::{ReadEndian, WriteEndian},
    BinRead, BinWrite,
};

use crate::Error;

/// A structure that can be converted from and to it's binary wire format.
pub trait Packet:
    Sized + for<'r> BinRead<Args<'r> = ()> + ReadEndian + for<'w> BinWrite<Args<'w> = ()> + WriteEndian
{
    /// Decode `Self` from the start of `bytes`, also
    /// returning the amount of bytes consumed doing so.
    fn from_bytes(bytes: &[u8]) -> Result<(Self, usize), Error> {
        let mut cursor = std::io::Cursor::new(bytes);
        let value = Self::read(&mut cursor)?;

        Ok((value, cursor.position() as usize))
    }

    /// Encode `self` to it's binary wire format.
    ///
    /// # Panics
    ///
    /// Serialization of a locally-built structure can only fail on a
    /// programmer error, in which case this method panics.
    fn to_bytes(&self) -> Vec<u8> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        self.write(&mut cursor).unwrap_or_else(|err| {
            panic!(
                "failed to serialize `{}`: {err}",
                std::any::type_name::<Self>()
            )
        });

        cursor.into_inner()
    }
}

impl<T> Packet for T where
    T: Sized
        + for<'r> BinRead<Args<'r> = ()>
        + ReadEndian
        + for<'w> BinWrite<Args<'w> = ()>
        + WriteEndian
{
}
