//! The SSH message family in it's decrypted, decompressed form.

use binrw::binrw;

use crate::{Error, Packet};

pub mod connect;
pub mod trans;
pub mod userauth;

/// The purpose of this macro is to automatically document variants
/// and link to the underlying item documentation.
macro_rules! message {
    ($lt:lifetime => $( $name:ident($path:ty) ),+ $(,)?) => {
        /// A SSH 2.0 message in it's decrypted form.
        ///
        /// # Caveats
        ///
        /// The `SSH_MSG_USERAUTH_PASSWD_CHANGEREQ` message is not included in this
        /// enum because it shares it's `magic` byte with [`userauth::PkOk`].
        #[non_exhaustive]
        #[binrw]
        #[derive(Debug, Clone)]
        #[brw(big)]
        pub enum Message<$lt> {
            $(
                #[doc = concat!("See [`", stringify!($path), "`] for more details.")]
                $name($path)
            ),+
        }
    };
}

message! { 'b =>
    Disconnect(trans::Disconnect<'b>),
    Ignore(trans::Ignore<'b>),
    Unimplemented(trans::Unimplemented),
    Debug(trans::Debug<'b>),
    ServiceRequest(trans::ServiceRequest<'b>),
    ServiceAccept(trans::ServiceAccept<'b>),
    KexInit(trans::KexInit<'b>),
    NewKeys(trans::NewKeys),
    KexdhInit(trans::KexdhInit<'b>),
    KexdhReply(trans::KexdhReply<'b>),

    AuthRequest(userauth::Request<'b>),
    AuthFailure(userauth::Failure<'b>),
    AuthSuccess(userauth::Success),
    AuthBanner(userauth::Banner<'b>),
    AuthPkOk(userauth::PkOk<'b>),

    RequestSuccess(connect::RequestSuccess),
    RequestFailure(connect::RequestFailure),
    ChannelOpenConfirmation(connect::ChannelOpenConfirmation),
    ChannelOpenFailure(connect::ChannelOpenFailure<'b>),
    ChannelWindowAdjust(connect::ChannelWindowAdjust),
    ChannelEof(connect::ChannelEof),
    ChannelClose(connect::ChannelClose),
    ChannelSuccess(connect::ChannelSuccess),
    ChannelFailure(connect::ChannelFailure),
}

impl Message<'_> {
    /// The message ID, the first byte of the encoded form.
    pub fn id(&self) -> u8 {
        match self {
            Self::Disconnect(_) => 1,
            Self::Ignore(_) => 2,
            Self::Unimplemented(_) => 3,
            Self::Debug(_) => 4,
            Self::ServiceRequest(_) => 5,
            Self::ServiceAccept(_) => 6,
            Self::KexInit(_) => 20,
            Self::NewKeys(_) => 21,
            Self::KexdhInit(_) => 30,
            Self::KexdhReply(_) => 31,
            Self::AuthRequest(_) => 50,
            Self::AuthFailure(_) => 51,
            Self::AuthSuccess(_) => 52,
            Self::AuthBanner(_) => 53,
            Self::AuthPkOk(_) => 60,
            Self::RequestSuccess(_) => 81,
            Self::RequestFailure(_) => 82,
            Self::ChannelOpenConfirmation(_) => 91,
            Self::ChannelOpenFailure(_) => 92,
            Self::ChannelWindowAdjust(_) => 93,
            Self::ChannelEof(_) => 96,
            Self::ChannelClose(_) => 97,
            Self::ChannelSuccess(_) => 99,
            Self::ChannelFailure(_) => 100,
        }
    }

    /// Whether the message ID has a variant in [`Message`].
    ///
    /// `SSH_MSG_GLOBAL_REQUEST`, `SSH_MSG_CHANNEL_OPEN`, `SSH_MSG_CHANNEL_DATA`,
    /// `SSH_MSG_CHANNEL_EXTENDED_DATA` and `SSH_MSG_CHANNEL_REQUEST` are
    /// identified but left undecoded, like any unknown ID.
    fn handled(id: u8) -> bool {
        matches!(
            id,
            1..=6 | 20 | 21 | 30 | 31 | 50..=53 | 60 | 81 | 82 | 91..=93 | 96 | 97 | 99 | 100
        )
    }

    /// Decode a single [`Message`] from the start of `bytes`, also
    /// returning the amount of bytes consumed doing so.
    ///
    /// IDs outside of the handled set surface [`Error::Unimplemented`],
    /// so the caller can answer with an `SSH_MSG_UNIMPLEMENTED`.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize), Error> {
        match bytes.first() {
            None => Err(Error::NeedMore),
            Some(&id) if Self::handled(id) => Self::from_bytes(bytes),
            Some(&id) => Err(Error::Unimplemented(id)),
        }
    }

    /// Decode a [`Message`] from one complete `payload`, as handed over
    /// by the packet layer, rejecting leftover trailing bytes.
    pub fn from_payload(payload: &[u8]) -> Result<Self, Error> {
        let (message, size) = Self::decode(payload).map_err(|err| match err {
            // The payload is complete, running out of
            // bytes means the message itself is broken
            Error::NeedMore => Error::Malformed("Truncated message".into()),
            err => err,
        })?;

        if size != payload.len() {
            return Err(Error::Malformed(format!(
                "{} trailing bytes after the message",
                payload.len() - size
            )));
        }

        Ok(message)
    }
}
