//! The server's `ssh-rsa` host key: the public key blob fed into the
//! exchange hash and the signature blob proving it's possession,
//! as defined in [RFC 4253 section 6.6](https://datatracker.ietf.org/doc/html/rfc4253#section-6.6).

use base64::{engine::general_purpose::STANDARD, Engine};
use binrw::binrw;
use rsa::{traits::PublicKeyParts, Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha1::{Digest, Sha1};

use crate::{arch, Error, Packet};

/// The `ssh-rsa` public key blob,
/// `string "ssh-rsa" || mpint e || mpint n`.
///
/// This is the `K_S` field of the `SSH_MSG_KEXDH_REPLY` message, and
/// the form that gets base64-encoded in `authorized_keys` entries.
#[binrw]
#[derive(Debug, Clone)]
#[brw(big, magic = b"\x00\x00\x00\x07ssh-rsa")]
pub struct PublicKeyBlob<'b> {
    /// RSA public exponent.
    pub e: arch::MpInt<'b>,

    /// RSA modulus.
    pub n: arch::MpInt<'b>,
}

impl PublicKeyBlob<'_> {
    /// Build the blob from an [`RsaPublicKey`].
    pub fn from_public(key: &RsaPublicKey) -> PublicKeyBlob<'static> {
        PublicKeyBlob {
            e: arch::MpInt::from_uint(key.e()),
            n: arch::MpInt::from_uint(key.n()),
        }
    }

    /// Interpret the blob as an [`RsaPublicKey`].
    pub fn to_public(&self) -> Result<RsaPublicKey, Error> {
        RsaPublicKey::new(self.n.to_uint(), self.e.to_uint())
            .map_err(|err| Error::Malformed(format!("Bad RSA host key: {err}")))
    }

    /// The human-readable `authorized_keys`-style
    /// rendition, `ssh-rsa <base64 of the blob>`.
    pub fn openssh(&self) -> String {
        format!("ssh-rsa {}", STANDARD.encode(self.to_bytes()))
    }
}

/// The signature blob over the exchange hash,
/// `string "ssh-rsa" || string raw_signature`.
///
/// The raw signature is `RSASSA-PKCS1-v1_5` over `SHA1(message)`, the
/// digest being prefixed with the `id-sha1` DER identifier before the
/// padding, as RFC 3447 section 9.2 requires.
#[binrw]
#[derive(Debug, Clone)]
#[brw(big, magic = b"\x00\x00\x00\x07ssh-rsa")]
pub struct Signature<'b> {
    /// The raw `RSASSA-PKCS1-v1_5` signature bytes.
    pub blob: arch::Bytes<'b>,
}

impl Signature<'_> {
    /// Sign `message` (usually the exchange hash `H`) with the local host key.
    ///
    /// # Panics
    ///
    /// Panics if the provided key is unfit for signing a
    /// SHA-1 digest, which is a local configuration bug.
    pub fn sign(key: &RsaPrivateKey, message: &[u8]) -> Signature<'static> {
        let digest = Sha1::digest(message);
        let blob = key
            .sign(Pkcs1v15Sign::new::<Sha1>(), &digest)
            .expect("RSA signing of a SHA-1 digest failed");

        Signature {
            blob: arch::Bytes::owned(blob),
        }
    }

    /// Verify the signature over `message` against the peer's public key.
    pub fn verify(&self, key: &RsaPublicKey, message: &[u8]) -> Result<(), Error> {
        let digest = Sha1::digest(message);

        key.verify(Pkcs1v15Sign::new::<Sha1>(), &digest, self.blob.as_ref())
            .map_err(|_| Error::Protocol("Host key signature verification failed".into()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use num_bigint_dig::BigUint;

    use super::*;

    fn keypair() -> (RsaPrivateKey, RsaPublicKey) {
        let private = RsaPrivateKey::new(&mut rand::thread_rng(), 1024).unwrap();
        let public = RsaPublicKey::from(&private);

        (private, public)
    }

    #[test]
    fn it_round_trips_the_blob() {
        let (_, public) = keypair();

        let blob = PublicKeyBlob::from_public(&public);
        let encoded = blob.to_bytes();

        let (decoded, size) = PublicKeyBlob::from_bytes(&encoded).unwrap();

        assert_eq!(size, encoded.len());
        assert_eq!(decoded.to_public().unwrap(), public);
    }

    #[test]
    fn it_renders_an_openssh_line() {
        let blob = PublicKeyBlob {
            e: arch::MpInt::from_uint(&BigUint::from(65537u32)),
            n: arch::MpInt::from_uint(&BigUint::from(0xc0ffeeu32)),
        };

        let line = blob.openssh();

        assert!(line.starts_with("ssh-rsa "), "{line}");
        assert_eq!(
            STANDARD.decode(line.split_once(' ').unwrap().1).unwrap(),
            blob.to_bytes()
        );
    }

    #[test]
    fn it_signs_and_verifies_an_exchange_hash() {
        let (private, public) = keypair();
        let hash = Sha1::digest(b"the exchange hash").to_vec();

        let signature = Signature::sign(&private, &hash);
        signature.verify(&public, &hash).unwrap();
    }

    #[test]
    fn it_rejects_a_signature_over_another_message() {
        let (private, public) = keypair();

        let signature = Signature::sign(&private, b"one message");
        let err = signature.verify(&public, b"another message").unwrap_err();

        assert!(matches!(err, Error::Protocol(_)), "{err:?}");
    }

    #[test]
    fn it_round_trips_the_signature_blob() {
        let (private, _) = keypair();

        let signature = Signature::sign(&private, b"payload");
        let encoded = signature.to_bytes();

        let (decoded, size) = Signature::from_bytes(&encoded).unwrap();

        assert_eq!(size, encoded.len());
        assert_eq!(decoded.blob, signature.blob);
    }
}
