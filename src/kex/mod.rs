//! Key-exchange facilities: the Diffie-Hellman groups, the _exchange
//! hash_ and the session-key derivation, as defined in
//! [RFC 4253 section 7 and 8](https://datatracker.ietf.org/doc/html/rfc4253#section-7).

use binrw::binwrite;

use crate::arch;

mod dh;
pub use dh::{Ephemeral, Group};

mod keys;
pub use keys::{CipherKey, Keys, MacKey};

/// The exchange hash for the Diffie-Hellman `kex` methods, computed
/// as the hash of the concatenation of the following.
///
/// The `i_c` and `i_s` payloads must be the byte-exact captures of the
/// `SSH_MSG_KEXINIT` messages as they appeared on the wire, message ID
/// included, never re-encodings of the parsed structures.
///
/// The hash of the first completed exchange also
/// becomes the connection's `session id`.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4253#section-8>.
#[binwrite]
#[derive(Debug)]
#[bw(big)]
pub struct Exchange<'b> {
    /// Client's identification string (`\r` and `\n` excluded).
    pub v_c: arch::Bytes<'b>,

    /// Server's identification string (`\r` and `\n` excluded).
    pub v_s: arch::Bytes<'b>,

    /// Payload of the client's `SSH_MSG_KEXINIT` message.
    pub i_c: arch::Bytes<'b>,

    /// Payload of the server's `SSH_MSG_KEXINIT` message.
    pub i_s: arch::Bytes<'b>,

    /// Server's public host key blob.
    pub k_s: arch::Bytes<'b>,

    /// Exchange value sent by the client.
    pub e: arch::MpInt<'b>,

    /// Exchange value sent by the server.
    pub f: arch::MpInt<'b>,

    /// Computed shared secret.
    pub k: arch::MpInt<'b>,
}

impl Exchange<'_> {
    /// Produce the exchange hash with the specified digest algorithm.
    pub fn hash<D: digest::Digest>(&self) -> digest::Output<D> {
        use binrw::BinWrite;

        let mut buffer = Vec::new();
        self.write(&mut std::io::Cursor::new(&mut buffer))
            .expect("The binrw structure serialization failed");

        D::digest(&buffer)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use sha1::{Digest, Sha1};

    use super::*;

    #[test]
    fn it_hashes_the_length_prefixed_concatenation() {
        let exchange = Exchange {
            v_c: arch::Bytes::borrowed(b"SSH-2.0-client"),
            v_s: arch::Bytes::borrowed(b"SSH-2.0-server"),
            i_c: arch::Bytes::borrowed(b"\x14client-kexinit"),
            i_s: arch::Bytes::borrowed(b"\x14server-kexinit"),
            k_s: arch::Bytes::borrowed(b"host-key-blob"),
            e: arch::MpInt::positive(&[0x12, 0x34]),
            f: arch::MpInt::positive(&[0xff, 0x00]),
            k: arch::MpInt::positive(&[0x7f]),
        };

        // hand-rolled concatenation of the same fields, per RFC 4253 section 8
        let mut expected = Sha1::new();
        for string in [
            &b"SSH-2.0-client"[..],
            b"SSH-2.0-server",
            b"\x14client-kexinit",
            b"\x14server-kexinit",
            b"host-key-blob",
            b"\x12\x34",          // e
            b"\x00\xff\x00",      // f, high bit padded
            b"\x7f",              // k
        ] {
            expected.update((string.len() as u32).to_be_bytes());
            expected.update(string);
        }

        assert_eq!(
            exchange.hash::<Sha1>().as_slice(),
            expected.finalize().as_slice()
        );
    }
}
