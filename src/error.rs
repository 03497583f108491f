use thiserror::Error;

/// The error type used in the library.
#[derive(Debug, Error)]
pub enum Error {
    /// The input stopped mid-value, more data is needed to proceed.
    ///
    /// This is not a hard failure: the caller should read more
    /// bytes from the transport and retry.
    #[error("More data is needed to proceed")]
    NeedMore,

    /// The received bytes did not conform to the wire format.
    #[error("Malformed wire data: {0}")]
    Malformed(String),

    /// A well-formed message arrived outside of the state expecting it.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The two sides share no algorithm for one of the negotiated slots.
    #[error("{0}")]
    NegotiationFailure(String),

    /// The message ID is valid but not handled by this implementation,
    /// the peer should be answered with an `SSH_MSG_UNIMPLEMENTED`.
    #[error("Unimplemented message ID `{0}`")]
    Unimplemented(u8),

    /// An error occured while performing I/O operations.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// `BadMagic` carries the found value as an opaque `Box<dyn Any>`,
// so the mapping keeps a fixed reason string for it.
const BAD_MAGIC: &str = "Unexpected message ID";

impl From<binrw::Error> for Error {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Io(err) if err.kind() == std::io::ErrorKind::UnexpectedEof => {
                Self::NeedMore
            }
            binrw::Error::Io(err) => Self::Malformed(err.to_string()),
            binrw::Error::AssertFail { message, .. } => Self::Malformed(message),
            binrw::Error::BadMagic { .. } => Self::Malformed(BAD_MAGIC.into()),
            binrw::Error::Backtrace(backtrace) => Self::from(*backtrace.error),
            binrw::Error::EnumErrors { variant_errors, .. } => variant_errors
                .into_iter()
                .map(|(_, err)| Self::from(err))
                .find(|err| !matches!(err, Self::Malformed(message) if message == BAD_MAGIC))
                .unwrap_or_else(|| Self::Malformed(BAD_MAGIC.into())),
            err => Self::Malformed(err.to_string()),
        }
    }
}
