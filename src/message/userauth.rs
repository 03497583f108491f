//! Messages involved in the SSH's **authentication** (`SSH-USERAUTH`) part of the protocol,
//! as defined in the [RFC 4252](https://datatracker.ietf.org/doc/html/rfc4252).

use binrw::binrw;

use crate::arch;

/// The `SSH_MSG_USERAUTH_REQUEST` message.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4252#section-5>.
#[binrw]
#[derive(Debug, Clone)]
#[brw(big, magic = 50_u8)]
pub struct Request<'b> {
    /// Username for the auth request.
    pub username: arch::Utf8<'b>,

    /// Service name to query.
    pub service_name: arch::Ascii<'b>,

    #[bw(calc = arch::Ascii::new(method.as_str()))]
    auth_method: arch::Ascii<'b>,

    /// Authentication method used.
    #[br(args(&auth_method))]
    pub method: Method<'b>,
}

/// The authentication method in the `SSH_MSG_USERAUTH_REQUEST` message.
#[binrw]
#[derive(Debug, Clone)]
#[br(import(method: &str))]
pub enum Method<'b> {
    /// Authenticate using the `none` method,
    /// as defined in [RFC4252 section 5.2](https://datatracker.ietf.org/doc/html/rfc4252#section-5.2).
    #[br(pre_assert(method == Method::NONE))]
    None,

    /// Authenticate using the `publickey` method,
    /// as defined in [RFC4252 section 7](https://datatracker.ietf.org/doc/html/rfc4252#section-7).
    #[br(pre_assert(method == Method::PUBLICKEY))]
    Publickey {
        #[bw(calc = arch::Bool::from(signature.is_some()))]
        signed: arch::Bool,

        /// Public key algorithm's name.
        algorithm: arch::Bytes<'b>,

        /// Public key blob.
        blob: arch::Bytes<'b>,

        /// The optional signature of the authentication packet,
        /// signed with the according private key.
        #[br(if(*signed))]
        signature: Option<arch::Bytes<'b>>,
    },

    /// Authenticate using the `password` method,
    /// as defined in [RFC4252 section 8](https://datatracker.ietf.org/doc/html/rfc4252#section-8).
    #[br(pre_assert(method == Method::PASSWORD))]
    Password {
        #[bw(calc = arch::Bool::from(new.is_some()))]
        change: arch::Bool,

        /// Plaintext password, or the password to be changed
        /// when this is a change request.
        password: arch::Utf8<'b>,

        /// In the case of a password change request,
        /// the new password to be set in place of the old one.
        #[br(if(*change))]
        new: Option<arch::Utf8<'b>>,
    },

    /// Authenticate using the `hostbased` method,
    /// as defined in [RFC4252 section 9](https://datatracker.ietf.org/doc/html/rfc4252#section-9).
    #[br(pre_assert(method == Method::HOSTBASED))]
    Hostbased {
        /// Public key algorithm for the host key.
        algorithm: arch::Bytes<'b>,

        /// Public host key and certificates for client host.
        host_key: arch::Bytes<'b>,

        /// Client host name expressed as the FQDN.
        client_fqdn: arch::Ascii<'b>,

        /// User name on the client host.
        username: arch::Utf8<'b>,

        /// The signature of the authentication packet.
        signature: arch::Bytes<'b>,
    },
}

impl Method<'_> {
    /// The SSH `none` authentication method.
    pub const NONE: &'static str = "none";

    /// The SSH `publickey` authentication method.
    pub const PUBLICKEY: &'static str = "publickey";

    /// The SSH `password` authentication method.
    pub const PASSWORD: &'static str = "password";

    /// The SSH `hostbased` authentication method.
    pub const HOSTBASED: &'static str = "hostbased";

    /// Get the [`Method`]'s SSH identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None { .. } => Self::NONE,
            Self::Publickey { .. } => Self::PUBLICKEY,
            Self::Password { .. } => Self::PASSWORD,
            Self::Hostbased { .. } => Self::HOSTBASED,
        }
    }
}

/// The `SSH_MSG_USERAUTH_FAILURE` message.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4252#section-5.1>.
#[binrw]
#[derive(Debug, Default, Clone)]
#[brw(big, magic = 51_u8)]
pub struct Failure<'b> {
    /// Authentications that can continue.
    pub continue_with: arch::NameList<'b>,

    /// Partial success.
    pub partial_success: arch::Bool,
}

/// The `SSH_MSG_USERAUTH_SUCCESS` message.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4252#section-5.1>.
#[binrw]
#[derive(Debug, Default, Clone)]
#[brw(big, magic = 52_u8)]
pub struct Success;

/// The `SSH_MSG_USERAUTH_BANNER` message.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4252#section-5.4>.
#[binrw]
#[derive(Debug, Default, Clone)]
#[brw(big, magic = 53_u8)]
pub struct Banner<'b> {
    /// The auth banner message.
    pub message: arch::Utf8<'b>,

    /// Language tag.
    pub language: arch::Ascii<'b>,
}

/// The `SSH_MSG_USERAUTH_PK_OK` message.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4252#section-7>.
#[binrw]
#[derive(Debug, Clone)]
#[brw(big, magic = 60_u8)]
pub struct PkOk<'b> {
    /// Public key algorithm name from the request.
    pub algorithm: arch::Bytes<'b>,

    /// Public key blob from the request.
    pub blob: arch::Bytes<'b>,
}
