//! Algorithm negotiation over the two `SSH_MSG_KEXINIT` messages,
//! as defined in [RFC 4253 section 7.1](https://datatracker.ietf.org/doc/html/rfc4253#section-7.1).

use std::str::FromStr;

use log::debug;

use crate::{
    algorithm::{Cipher, Compression, HostKey, Kex, Mac},
    arch::NameList,
    message::trans::KexInit,
    Error,
};

/// The set of algorithms retained for the session, one per negotiable slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Negotiation {
    /// The retained kex algorithm.
    pub kex: Kex,

    /// The retained server host key algorithm.
    pub host_key: HostKey,

    /// The retained client -> server encryption algorithm.
    pub encryption_client_to_server: Cipher,

    /// The retained server -> client encryption algorithm.
    pub encryption_server_to_client: Cipher,

    /// The retained client -> server MAC algorithm.
    pub mac_client_to_server: Mac,

    /// The retained server -> client MAC algorithm.
    pub mac_server_to_client: Mac,

    /// The retained client -> server compression algorithm.
    pub compression_client_to_server: Compression,

    /// The retained server -> client compression algorithm.
    pub compression_server_to_client: Compression,
}

impl Negotiation {
    /// Intersect the `client`'s and the `server`'s `SSH_MSG_KEXINIT`:
    /// for each slot, the first name in the client's list that is also
    /// present in the server's list is retained.
    ///
    /// Slots are examined in the protocol's fixed order, and the first
    /// empty intersection reports an [`Error::NegotiationFailure`] naming it.
    pub fn negotiate(client: &KexInit, server: &KexInit) -> Result<Self, Error> {
        Ok(Self {
            kex: select(
                &client.kex_algorithms,
                &server.kex_algorithms,
                "kex algorithm",
            )?,
            host_key: select(
                &client.server_host_key_algorithms,
                &server.server_host_key_algorithms,
                "server host key algorithm",
            )?,
            encryption_client_to_server: select(
                &client.encryption_algorithms_client_to_server,
                &server.encryption_algorithms_client_to_server,
                "encryption algorithm client to server",
            )?,
            encryption_server_to_client: select(
                &client.encryption_algorithms_server_to_client,
                &server.encryption_algorithms_server_to_client,
                "encryption algorithm server to client",
            )?,
            mac_client_to_server: select(
                &client.mac_algorithms_client_to_server,
                &server.mac_algorithms_client_to_server,
                "mac algorithm client to server",
            )?,
            mac_server_to_client: select(
                &client.mac_algorithms_server_to_client,
                &server.mac_algorithms_server_to_client,
                "mac algorithm server to client",
            )?,
            compression_client_to_server: select(
                &client.compression_algorithms_client_to_server,
                &server.compression_algorithms_client_to_server,
                "compression algorithm client to server",
            )?,
            compression_server_to_client: select(
                &client.compression_algorithms_server_to_client,
                &server.compression_algorithms_server_to_client,
                "compression algorithm server to client",
            )?,
        })
    }
}

/// Select the client-preferred common name in the two lists and coerce
/// it to it's registry variant, an unknown name failing the slot even
/// though both sides offered it.
fn select<T: FromStr>(client: &NameList, server: &NameList, slot: &str) -> Result<T, Error> {
    client
        .preferred_in(server)
        .and_then(|name| name.parse().ok())
        .ok_or_else(|| {
            debug!(
                "no agreement on the {slot}: client offered `{}`, server offered `{}`",
                client.0, server.0,
            );

            Error::NegotiationFailure(format!("Can't agree on {slot}"))
        })
}

impl KexInit<'_> {
    /// Build the local `SSH_MSG_KEXINIT` from the preferred
    /// algorithm lists, with a fresh random cookie.
    pub fn preferred() -> KexInit<'static> {
        KexInit {
            cookie: rand::random(),
            kex_algorithms: Kex::PREFERRED.iter().map(Kex::as_str).collect(),
            server_host_key_algorithms: HostKey::PREFERRED.iter().map(HostKey::as_str).collect(),
            encryption_algorithms_client_to_server: Cipher::PREFERRED
                .iter()
                .map(Cipher::as_str)
                .collect(),
            encryption_algorithms_server_to_client: Cipher::PREFERRED
                .iter()
                .map(Cipher::as_str)
                .collect(),
            mac_algorithms_client_to_server: Mac::PREFERRED.iter().map(Mac::as_str).collect(),
            mac_algorithms_server_to_client: Mac::PREFERRED.iter().map(Mac::as_str).collect(),
            compression_algorithms_client_to_server: Compression::PREFERRED
                .iter()
                .map(Compression::as_str)
                .collect(),
            compression_algorithms_server_to_client: Compression::PREFERRED
                .iter()
                .map(Compression::as_str)
                .collect(),
            languages_client_to_server: NameList::default(),
            languages_server_to_client: NameList::default(),
            first_kex_packet_follows: false.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use rstest::rstest;

    use super::*;

    fn kexinit_with(kex: &[&str]) -> KexInit<'static> {
        KexInit {
            kex_algorithms: kex.iter().collect(),
            ..KexInit::preferred()
        }
    }

    #[test]
    fn it_negotiates_the_preferred_lists() {
        let negotiation =
            Negotiation::negotiate(&KexInit::preferred(), &KexInit::preferred()).unwrap();

        assert_eq!(
            negotiation,
            Negotiation {
                kex: Kex::DiffieHellmanGroup14Sha1,
                host_key: HostKey::SshRsa,
                encryption_client_to_server: Cipher::Aes256Ctr,
                encryption_server_to_client: Cipher::Aes256Ctr,
                mac_client_to_server: Mac::HmacSha2_256,
                mac_server_to_client: Mac::HmacSha2_256,
                compression_client_to_server: Compression::None,
                compression_server_to_client: Compression::None,
            }
        );
    }

    #[test]
    fn it_lets_the_client_preference_win() {
        let client = kexinit_with(&[
            "diffie-hellman-group1-sha1",
            "diffie-hellman-group14-sha1",
        ]);
        let server = kexinit_with(&[
            "diffie-hellman-group14-sha1",
            "diffie-hellman-group1-sha1",
        ]);

        let negotiation = Negotiation::negotiate(&client, &server).unwrap();

        assert_eq!(negotiation.kex, Kex::DiffieHellmanGroup1Sha1);
    }

    #[rstest]
    #[case(&["curve25519-sha256"], &["diffie-hellman-group14-sha1"])] // disjoint
    #[case(&["curve25519-sha256"], &["curve25519-sha256"])] // common, yet unknown
    fn it_fails_on_the_kex_slot(#[case] client: &[&str], #[case] server: &[&str]) {
        let err = Negotiation::negotiate(&kexinit_with(client), &kexinit_with(server)).unwrap_err();

        assert!(
            matches!(&err, Error::NegotiationFailure(slot) if slot == "Can't agree on kex algorithm"),
            "{err:?}"
        );
    }

    #[test]
    fn it_fails_on_a_directional_mac_slot() {
        let client = KexInit {
            mac_algorithms_client_to_server: ["hmac-sha1"].iter().collect(),
            ..KexInit::preferred()
        };
        let server = KexInit {
            mac_algorithms_client_to_server: ["hmac-md5"].iter().collect(),
            ..KexInit::preferred()
        };

        let err = Negotiation::negotiate(&client, &server).unwrap_err();

        assert!(
            matches!(
                &err,
                Error::NegotiationFailure(slot) if slot == "Can't agree on mac algorithm client to server"
            ),
            "{err:?}"
        );
    }
}
