//! Closed registries of the negotiable algorithm names, with
//! their string form and the sizes the key schedule relies on.

use std::str::FromStr;

use thiserror::Error;

use crate::kex::Group;

/// The error raised when an algorithm name is not part of it's registry.
#[derive(Debug, Error)]
#[error("Unknown algorithm name `{0}`")]
pub struct UnknownAlgorithm(String);

/// The `kex` algorithms defined in the SSH protocol.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4253#section-8>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kex {
    /// The `diffie-hellman-group14-sha1` method.
    DiffieHellmanGroup14Sha1,

    /// The `diffie-hellman-group1-sha1` method.
    DiffieHellmanGroup1Sha1,
}

impl Kex {
    const DIFFIE_HELLMAN_GROUP14_SHA1: &'static str = "diffie-hellman-group14-sha1";
    const DIFFIE_HELLMAN_GROUP1_SHA1: &'static str = "diffie-hellman-group1-sha1";

    /// The methods offered in a locally-built `SSH_MSG_KEXINIT`, in preference order.
    pub const PREFERRED: &'static [Self] =
        &[Self::DiffieHellmanGroup14Sha1, Self::DiffieHellmanGroup1Sha1];

    /// Get the [`Kex`]'s SSH identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DiffieHellmanGroup14Sha1 => Self::DIFFIE_HELLMAN_GROUP14_SHA1,
            Self::DiffieHellmanGroup1Sha1 => Self::DIFFIE_HELLMAN_GROUP1_SHA1,
        }
    }

    /// The Diffie-Hellman group the method operates in.
    pub fn group(&self) -> Group {
        match self {
            Self::DiffieHellmanGroup14Sha1 => Group::group14(),
            Self::DiffieHellmanGroup1Sha1 => Group::group2(),
        }
    }
}

impl FromStr for Kex {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::DIFFIE_HELLMAN_GROUP14_SHA1 => Ok(Self::DiffieHellmanGroup14Sha1),
            Self::DIFFIE_HELLMAN_GROUP1_SHA1 => Ok(Self::DiffieHellmanGroup1Sha1),
            _ => Err(UnknownAlgorithm(s.into())),
        }
    }
}

/// The `server host key` algorithms defined in the SSH protocol.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4253#section-6.6>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostKey {
    /// The `ssh-rsa` algorithm.
    SshRsa,

    /// A sentinel for when the peer offered no algorithm we recognize.
    ///
    /// It has no wire name and must never be serialized.
    Unknown,
}

impl HostKey {
    const SSH_RSA: &'static str = "ssh-rsa";

    /// The algorithms offered in a locally-built `SSH_MSG_KEXINIT`, in preference order.
    pub const PREFERRED: &'static [Self] = &[Self::SshRsa];

    /// Get the [`HostKey`]'s SSH identifier.
    ///
    /// # Panics
    ///
    /// Panics on [`HostKey::Unknown`], which has no wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SshRsa => Self::SSH_RSA,
            Self::Unknown => panic!("the `Unknown` host key sentinel has no wire name"),
        }
    }
}

impl FromStr for HostKey {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::SSH_RSA => Ok(Self::SshRsa),
            _ => Err(UnknownAlgorithm(s.into())),
        }
    }
}

/// The `encryption` algorithms defined in the SSH protocol.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4253#section-6.3>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cipher {
    /// The `aes128-ctr` cipher.
    Aes128Ctr,

    /// The `aes192-ctr` cipher.
    Aes192Ctr,

    /// The `aes256-ctr` cipher.
    Aes256Ctr,

    /// The `aes128-cbc` cipher.
    Aes128Cbc,

    /// The `aes192-cbc` cipher.
    Aes192Cbc,

    /// The `aes256-cbc` cipher.
    Aes256Cbc,

    /// A sentinel for the unprotected pre-negotiation phase.
    ///
    /// It has no wire name and must never be serialized.
    Plaintext,
}

impl Cipher {
    const AES128_CTR: &'static str = "aes128-ctr";
    const AES192_CTR: &'static str = "aes192-ctr";
    const AES256_CTR: &'static str = "aes256-ctr";
    const AES128_CBC: &'static str = "aes128-cbc";
    const AES192_CBC: &'static str = "aes192-cbc";
    const AES256_CBC: &'static str = "aes256-cbc";

    /// The ciphers offered in a locally-built `SSH_MSG_KEXINIT`, in preference order.
    pub const PREFERRED: &'static [Self] = &[
        Self::Aes256Ctr,
        Self::Aes192Ctr,
        Self::Aes128Ctr,
        Self::Aes256Cbc,
        Self::Aes192Cbc,
        Self::Aes128Cbc,
    ];

    /// Get the [`Cipher`]'s SSH identifier.
    ///
    /// # Panics
    ///
    /// Panics on [`Cipher::Plaintext`], which has no wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aes128Ctr => Self::AES128_CTR,
            Self::Aes192Ctr => Self::AES192_CTR,
            Self::Aes256Ctr => Self::AES256_CTR,
            Self::Aes128Cbc => Self::AES128_CBC,
            Self::Aes192Cbc => Self::AES192_CBC,
            Self::Aes256Cbc => Self::AES256_CBC,
            Self::Plaintext => panic!("the `Plaintext` cipher sentinel has no wire name"),
        }
    }

    /// The cipher's key size, in bytes.
    pub fn key_size(&self) -> usize {
        match self {
            Self::Aes128Ctr | Self::Aes128Cbc => 16,
            Self::Aes192Ctr | Self::Aes192Cbc => 24,
            Self::Aes256Ctr | Self::Aes256Cbc => 32,
            Self::Plaintext => 0,
        }
    }

    /// The cipher's initialization vector size, in bytes.
    pub fn iv_size(&self) -> usize {
        match self {
            Self::Plaintext => 0,
            _ => 16,
        }
    }

    /// The cipher's block size, in bytes.
    ///
    /// [`Cipher::Plaintext`] reports `8`, the minimum
    /// padding alignment of the unencrypted phase.
    pub fn block_size(&self) -> usize {
        match self {
            Self::Plaintext => 8,
            _ => 16,
        }
    }
}

impl FromStr for Cipher {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::AES128_CTR => Ok(Self::Aes128Ctr),
            Self::AES192_CTR => Ok(Self::Aes192Ctr),
            Self::AES256_CTR => Ok(Self::Aes256Ctr),
            Self::AES128_CBC => Ok(Self::Aes128Cbc),
            Self::AES192_CBC => Ok(Self::Aes192Cbc),
            Self::AES256_CBC => Ok(Self::Aes256Cbc),
            _ => Err(UnknownAlgorithm(s.into())),
        }
    }
}

/// The `mac` algorithms defined in the SSH protocol.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4253#section-6.4>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mac {
    /// The `hmac-md5` algorithm.
    HmacMd5,

    /// The `hmac-md5-96` algorithm, truncated to 96 bits.
    HmacMd5_96,

    /// The `hmac-sha1` algorithm.
    HmacSha1,

    /// The `hmac-sha1-96` algorithm, truncated to 96 bits.
    HmacSha1_96,

    /// The `hmac-sha2-256` algorithm.
    HmacSha2_256,

    /// The `hmac-sha2-512` algorithm.
    HmacSha2_512,

    /// A sentinel for the unprotected pre-negotiation phase.
    ///
    /// It has no wire name and must never be serialized.
    Plaintext,
}

impl Mac {
    const HMAC_MD5: &'static str = "hmac-md5";
    const HMAC_MD5_96: &'static str = "hmac-md5-96";
    const HMAC_SHA1: &'static str = "hmac-sha1";
    const HMAC_SHA1_96: &'static str = "hmac-sha1-96";
    const HMAC_SHA2_256: &'static str = "hmac-sha2-256";
    const HMAC_SHA2_512: &'static str = "hmac-sha2-512";

    /// The algorithms offered in a locally-built `SSH_MSG_KEXINIT`, in preference order.
    pub const PREFERRED: &'static [Self] = &[
        Self::HmacSha2_256,
        Self::HmacSha2_512,
        Self::HmacSha1,
        Self::HmacSha1_96,
        Self::HmacMd5,
        Self::HmacMd5_96,
    ];

    /// Get the [`Mac`]'s SSH identifier.
    ///
    /// # Panics
    ///
    /// Panics on [`Mac::Plaintext`], which has no wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HmacMd5 => Self::HMAC_MD5,
            Self::HmacMd5_96 => Self::HMAC_MD5_96,
            Self::HmacSha1 => Self::HMAC_SHA1,
            Self::HmacSha1_96 => Self::HMAC_SHA1_96,
            Self::HmacSha2_256 => Self::HMAC_SHA2_256,
            Self::HmacSha2_512 => Self::HMAC_SHA2_512,
            Self::Plaintext => panic!("the `Plaintext` MAC sentinel has no wire name"),
        }
    }

    /// The integrity key size, in bytes.
    pub fn key_size(&self) -> usize {
        match self {
            Self::HmacMd5 | Self::HmacMd5_96 => 16,
            Self::HmacSha1 | Self::HmacSha1_96 => 20,
            Self::HmacSha2_256 => 32,
            Self::HmacSha2_512 => 64,
            Self::Plaintext => 0,
        }
    }

    /// The size of the produced authentication code, in bytes.
    pub fn size(&self) -> usize {
        match self {
            Self::HmacMd5 => 16,
            Self::HmacSha1 => 20,
            Self::HmacMd5_96 | Self::HmacSha1_96 => 12,
            Self::HmacSha2_256 => 32,
            Self::HmacSha2_512 => 64,
            Self::Plaintext => 0,
        }
    }
}

impl FromStr for Mac {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::HMAC_MD5 => Ok(Self::HmacMd5),
            Self::HMAC_MD5_96 => Ok(Self::HmacMd5_96),
            Self::HMAC_SHA1 => Ok(Self::HmacSha1),
            Self::HMAC_SHA1_96 => Ok(Self::HmacSha1_96),
            Self::HMAC_SHA2_256 => Ok(Self::HmacSha2_256),
            Self::HMAC_SHA2_512 => Ok(Self::HmacSha2_512),
            _ => Err(UnknownAlgorithm(s.into())),
        }
    }
}

/// The `compression` algorithms defined in the SSH protocol.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4253#section-6.2>.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    /// The `none` algorithm, transporting payloads verbatim.
    None,
}

impl Compression {
    const NONE: &'static str = "none";

    /// The algorithms offered in a locally-built `SSH_MSG_KEXINIT`, in preference order.
    pub const PREFERRED: &'static [Self] = &[Self::None];

    /// Get the [`Compression`]'s SSH identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => Self::NONE,
        }
    }
}

impl FromStr for Compression {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::NONE => Ok(Self::None),
            _ => Err(UnknownAlgorithm(s.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use rstest::rstest;

    use super::*;

    #[test]
    fn it_keeps_the_name_bijections() {
        for kex in Kex::PREFERRED {
            assert_eq!(kex.as_str().parse::<Kex>().unwrap(), *kex);
        }
        for key in HostKey::PREFERRED {
            assert_eq!(key.as_str().parse::<HostKey>().unwrap(), *key);
        }
        for cipher in Cipher::PREFERRED {
            assert_eq!(cipher.as_str().parse::<Cipher>().unwrap(), *cipher);
        }
        for mac in Mac::PREFERRED {
            assert_eq!(mac.as_str().parse::<Mac>().unwrap(), *mac);
        }
        for compression in Compression::PREFERRED {
            assert_eq!(
                compression.as_str().parse::<Compression>().unwrap(),
                *compression
            );
        }
    }

    #[rstest]
    #[case(Cipher::Aes128Ctr, 16)]
    #[case(Cipher::Aes192Cbc, 24)]
    #[case(Cipher::Aes256Ctr, 32)]
    fn it_reports_aes_key_sizes(#[case] cipher: Cipher, #[case] size: usize) {
        assert_eq!(cipher.key_size(), size);
        assert_eq!(cipher.iv_size(), 16);
        assert_eq!(cipher.block_size(), 16);
    }

    #[rstest]
    #[case(Mac::HmacSha1, 20, 20)]
    #[case(Mac::HmacSha1_96, 20, 12)]
    #[case(Mac::HmacMd5_96, 16, 12)]
    #[case(Mac::HmacSha2_512, 64, 64)]
    fn it_reports_mac_sizes(#[case] mac: Mac, #[case] key: usize, #[case] tag: usize) {
        assert_eq!(mac.key_size(), key);
        assert_eq!(mac.size(), tag);
    }

    #[test]
    fn it_links_each_kex_to_a_group() {
        use num_bigint_dig::BigUint;

        for kex in Kex::PREFERRED {
            let ephemeral = kex.group().ephemeral_from(BigUint::from(1u32));

            assert_eq!(ephemeral.public.to_uint(), BigUint::from(2u32));
        }
    }

    #[test]
    fn it_rejects_unknown_names() {
        assert!("curve25519-sha256".parse::<Kex>().is_err());
        assert!("ssh-ed25519".parse::<HostKey>().is_err());
        assert!("chacha20-poly1305@openssh.com".parse::<Cipher>().is_err());
        assert!("aead-aes-128-gcm".parse::<Mac>().is_err());
        assert!("zlib".parse::<Compression>().is_err());
    }
}
