use binrw::BinWrite;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

use crate::{
    algorithm::{Cipher, Mac},
    arch::MpInt,
    Negotiation,
};

/// The keying material for one direction of the transport, to be handed
/// over to the packet layer when `SSH_MSG_NEWKEYS` takes effect.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
pub struct Keys {
    /// The initialization vector.
    pub iv: Vec<u8>,

    /// The encryption key, tagged with it's cipher.
    pub cipher: CipherKey,

    /// The integrity key, tagged with it's MAC algorithm.
    pub mac: MacKey,
}

/// An encryption key, tagged with it's cipher.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
pub struct CipherKey {
    /// The negotiated cipher.
    #[cfg_attr(feature = "zeroize", zeroize(skip))]
    pub algorithm: Cipher,

    /// The raw key material.
    pub key: Vec<u8>,
}

/// An integrity key, tagged with it's MAC algorithm.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "zeroize", derive(Zeroize))]
pub struct MacKey {
    /// The negotiated MAC algorithm.
    #[cfg_attr(feature = "zeroize", zeroize(skip))]
    pub algorithm: Mac,

    /// The raw key material.
    pub key: Vec<u8>,

    /// The packet sequence number, zero when the keys take effect.
    #[cfg_attr(feature = "zeroize", zeroize(skip))]
    pub seq: u32,
}

impl Keys {
    /// Keys for the unprotected pre-negotiation phase,
    /// where payloads travel in the clear.
    pub fn plaintext() -> Self {
        Self {
            iv: Vec::new(),
            cipher: CipherKey {
                algorithm: Cipher::Plaintext,
                key: Vec::new(),
            },
            mac: MacKey {
                algorithm: Mac::Plaintext,
                key: Vec::new(),
                seq: 0,
            },
        }
    }

    /// Derive both directions of keying material from the shared secret
    /// `k`, the exchange hash `h` and the connection's `session_id` (the
    /// hash of the very first exchange), per
    /// [RFC 4253 section 7.2](https://datatracker.ietf.org/doc/html/rfc4253#section-7.2).
    ///
    /// Returns the `(client to server, server to client)` pair.
    pub fn derive<D: digest::Digest>(
        negotiation: &Negotiation,
        k: &MpInt,
        h: &[u8],
        session_id: &[u8],
    ) -> (Self, Self) {
        log::debug!(
            "deriving session keys for {:?}/{:?} + {:?}/{:?}",
            negotiation.encryption_client_to_server,
            negotiation.mac_client_to_server,
            negotiation.encryption_server_to_client,
            negotiation.mac_server_to_client,
        );

        let client_to_server = Self {
            iv: expand::<D>(
                k,
                h,
                session_id,
                b'A',
                negotiation.encryption_client_to_server.iv_size(),
            ),
            cipher: CipherKey {
                algorithm: negotiation.encryption_client_to_server,
                key: expand::<D>(
                    k,
                    h,
                    session_id,
                    b'C',
                    negotiation.encryption_client_to_server.key_size(),
                ),
            },
            mac: MacKey {
                algorithm: negotiation.mac_client_to_server,
                key: expand::<D>(
                    k,
                    h,
                    session_id,
                    b'E',
                    negotiation.mac_client_to_server.key_size(),
                ),
                seq: 0,
            },
        };

        let server_to_client = Self {
            iv: expand::<D>(
                k,
                h,
                session_id,
                b'B',
                negotiation.encryption_server_to_client.iv_size(),
            ),
            cipher: CipherKey {
                algorithm: negotiation.encryption_server_to_client,
                key: expand::<D>(
                    k,
                    h,
                    session_id,
                    b'D',
                    negotiation.encryption_server_to_client.key_size(),
                ),
            },
            mac: MacKey {
                algorithm: negotiation.mac_server_to_client,
                key: expand::<D>(
                    k,
                    h,
                    session_id,
                    b'F',
                    negotiation.mac_server_to_client.key_size(),
                ),
                seq: 0,
            },
        };

        (client_to_server, server_to_client)
    }
}

/// Expand `need` bytes of key material for the given `letter`:
///
/// ```text
/// K1 = HASH(mpint(K) || H || letter || session_id)
/// Kn = HASH(mpint(K) || H || K1 || .. || Kn-1)
/// ```
fn expand<D: digest::Digest>(
    k: &MpInt,
    h: &[u8],
    session_id: &[u8],
    letter: u8,
    need: usize,
) -> Vec<u8> {
    let k = {
        let mut cursor = std::io::Cursor::new(Vec::new());
        k.write_be(&mut cursor)
            .expect("The binrw structure serialization failed");

        cursor.into_inner()
    };

    let mut material: Vec<u8> = Vec::new();
    while material.len() < need {
        let mut digest = D::new();
        digest.update(&k);
        digest.update(h);

        if material.is_empty() {
            digest.update([letter]);
            digest.update(session_id);
        } else {
            digest.update(&material);
        }

        material.extend_from_slice(&digest.finalize());
    }

    material.truncate(need);
    material
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use sha1::{Digest, Sha1};

    use super::*;
    use crate::algorithm::{Compression, HostKey, Kex};

    fn negotiation() -> Negotiation {
        Negotiation {
            kex: Kex::DiffieHellmanGroup14Sha1,
            host_key: HostKey::SshRsa,
            encryption_client_to_server: Cipher::Aes128Ctr,
            encryption_server_to_client: Cipher::Aes128Ctr,
            mac_client_to_server: Mac::HmacSha1,
            mac_server_to_client: Mac::HmacSha1,
            compression_client_to_server: Compression::None,
            compression_server_to_client: Compression::None,
        }
    }

    #[test]
    fn it_derives_the_negotiated_lengths() {
        let k = MpInt::positive(&[0x42; 32]);
        let (c2s, s2c) = Keys::derive::<Sha1>(&negotiation(), &k, &[0xaa; 20], &[0xaa; 20]);

        for keys in [&c2s, &s2c] {
            assert_eq!(keys.iv.len(), 16);
            assert_eq!(keys.cipher.key.len(), 16);
            assert_eq!(keys.mac.key.len(), 20);
            assert_eq!(keys.mac.seq, 0);
        }

        // directions use distinct letters, the material must differ
        assert_ne!(c2s.iv, s2c.iv);
        assert_ne!(c2s.cipher.key, s2c.cipher.key);
        assert_ne!(c2s.mac.key, s2c.mac.key);
    }

    #[test]
    fn it_computes_the_first_block_per_the_rfc() {
        let k = MpInt::positive(&[0x42; 32]);
        let h = [0xaa; 20];
        let session_id = [0xbb; 20];

        let material = expand::<Sha1>(&k, &h, &session_id, b'A', 16);

        // K1 = HASH(mpint(K) || H || "A" || session_id), truncated to `need`
        let mut expected = Sha1::new();
        expected.update((32u32).to_be_bytes());
        expected.update([0x42; 32]);
        expected.update(h);
        expected.update(*b"A");
        expected.update(session_id);

        assert_eq!(material, expected.finalize()[..16]);
    }

    #[test]
    fn it_extends_the_material_by_prefix() {
        let k = MpInt::positive(&[0x13; 16]);
        let h = [0x01; 20];
        let session_id = [0x02; 20];

        let short = expand::<Sha1>(&k, &h, &session_id, b'C', 20);
        let long = expand::<Sha1>(&k, &h, &session_id, b'C', 32);

        assert_eq!(short, long[..20]);
    }

    #[test]
    fn it_produces_empty_plaintext_material() {
        let keys = Keys::plaintext();

        assert_eq!(keys.cipher.algorithm, Cipher::Plaintext);
        assert_eq!(keys.mac.algorithm, Mac::Plaintext);
        assert!(keys.iv.is_empty());
        assert!(keys.cipher.key.is_empty());
        assert!(keys.mac.key.is_empty());
        assert_eq!(keys.mac.seq, 0);
    }

    #[test]
    fn it_feeds_a_real_cipher_end_to_end() {
        use aes::cipher::{KeyIvInit, StreamCipher};
        use hmac::{Hmac, Mac as _};

        type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;

        let k = MpInt::positive(&[0x37; 128]);
        let h = Sha1::digest(b"an exchange hash").to_vec();

        let (c2s, _) = Keys::derive::<Sha1>(&negotiation(), &k, &h, &h);

        let plaintext = b"arbitrary packet payload".to_vec();

        let mut sealed = plaintext.clone();
        Aes128Ctr::new_from_slices(&c2s.cipher.key, &c2s.iv)
            .unwrap()
            .apply_keystream(&mut sealed);
        assert_ne!(sealed, plaintext);

        let mut opened = sealed.clone();
        Aes128Ctr::new_from_slices(&c2s.cipher.key, &c2s.iv)
            .unwrap()
            .apply_keystream(&mut opened);
        assert_eq!(opened, plaintext);

        // the integrity key authenticates on one side and verifies on the other
        let tag = Hmac::<Sha1>::new_from_slice(&c2s.mac.key)
            .unwrap()
            .chain_update(&plaintext)
            .finalize()
            .into_bytes();

        Hmac::<Sha1>::new_from_slice(&c2s.mac.key)
            .unwrap()
            .chain_update(&plaintext)
            .verify_slice(&tag)
            .unwrap();
    }
}
