use hex_literal::hex;
use num_bigint_dig::{BigUint, RandBigInt};

use crate::{arch::MpInt, Error};

/// The Oakley Group 2 prime, 1024 bits.
///
/// see <https://datatracker.ietf.org/doc/html/rfc2409#section-6.2>.
const GROUP2_P: [u8; 128] = hex!(
    "FFFFFFFF FFFFFFFF C90FDAA2 2168C234 C4C6628B 80DC1CD1"
    "29024E08 8A67CC74 020BBEA6 3B139B22 514A0879 8E3404DD"
    "EF9519B3 CD3A431B 302B0A6D F25F1437 4FE1356D 6D51C245"
    "E485B576 625E7EC6 F44C42E9 A637ED6B 0BFF5CB6 F406B7ED"
    "EE386BFB 5A899FA5 AE9F2411 7C4B1FE6 49286651 ECE65381"
    "FFFFFFFF FFFFFFFF"
);

/// The Oakley Group 14 prime, 2048 bits.
///
/// see <https://datatracker.ietf.org/doc/html/rfc3526#section-3>.
const GROUP14_P: [u8; 256] = hex!(
    "FFFFFFFF FFFFFFFF C90FDAA2 2168C234 C4C6628B 80DC1CD1"
    "29024E08 8A67CC74 020BBEA6 3B139B22 514A0879 8E3404DD"
    "EF9519B3 CD3A431B 302B0A6D F25F1437 4FE1356D 6D51C245"
    "E485B576 625E7EC6 F44C42E9 A637ED6B 0BFF5CB6 F406B7ED"
    "EE386BFB 5A899FA5 AE9F2411 7C4B1FE6 49286651 ECE45B3D"
    "C2007CB8 A163BF05 98DA4836 1C55D39A 69163FA8 FD24CF5F"
    "83655D23 DCA3AD96 1C62F356 208552BB 9ED52907 7096966D"
    "670C354E 4ABC9804 F1746C08 CA18217C 32905E46 2E36CE3B"
    "E39E772C 180E8603 9B2783A2 EC07A28F B5C55DF0 6F4C52C9"
    "DE2BCBF6 95581718 3995497C EA956AE5 15D22618 98FA0510"
    "15728E5A 8AACAA68 FFFFFFFF FFFFFFFF"
);

/// A multiplicative group of integers modulo the safe prime `p`,
/// with `2` as it's generator.
#[derive(Debug, Clone)]
pub struct Group {
    p: BigUint,
    g: BigUint,
}

impl Group {
    /// The Oakley Group 2 (`oakley-2`), used by `diffie-hellman-group1-sha1`.
    pub fn group2() -> Self {
        Self {
            p: BigUint::from_bytes_be(&GROUP2_P),
            g: BigUint::from(2u32),
        }
    }

    /// The Oakley Group 14 (`oakley-14`), used by `diffie-hellman-group14-sha1`.
    pub fn group14() -> Self {
        Self {
            p: BigUint::from_bytes_be(&GROUP14_P),
            g: BigUint::from(2u32),
        }
    }

    /// Generate an [`Ephemeral`] secret with a random private exponent.
    pub fn ephemeral(&self) -> Ephemeral {
        let two = BigUint::from(2u32);
        let x = rand::thread_rng().gen_biguint_range(&two, &(&self.p - &two));

        self.ephemeral_from(x)
    }

    /// Build an [`Ephemeral`] secret from the provided private exponent,
    /// computing it's public value `g^x mod p`.
    pub fn ephemeral_from(&self, x: BigUint) -> Ephemeral {
        let public = MpInt::from_uint(&self.g.modpow(&x, &self.p));

        Ephemeral { x, public }
    }

    /// Compute the shared secret `K = y^x mod p` from the peer's public
    /// value `y`, after checking it lies in the group's valid range.
    pub fn shared_secret(&self, ephemeral: &Ephemeral, peer: &MpInt) -> Result<MpInt<'static>, Error> {
        let y = peer.to_uint();

        let one = BigUint::from(1u32);
        if y <= one || y >= &self.p - &one {
            return Err(Error::Malformed("Can't compute shared secret".into()));
        }

        Ok(MpInt::from_uint(&y.modpow(&ephemeral.x, &self.p)))
    }
}

/// An ephemeral Diffie-Hellman secret, with it's public value.
#[derive(Debug)]
pub struct Ephemeral {
    x: BigUint,

    /// The public value `g^x mod p`, to be sent to the peer.
    pub public: MpInt<'static>,
}
