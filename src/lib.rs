#![doc = include_str!("../README.md")]
//!
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    clippy::todo,
    clippy::unwrap_used,
    clippy::unimplemented,
    clippy::undocumented_unsafe_blocks
)]
#![forbid(unsafe_code)]

pub use ::binrw;

/// Maximum size for a single `string`, `name-list` or `mpint`, in bytes.
///
/// Declared lengths above this are rejected before any allocation happens,
/// to bound memory growth against a hostile peer.
pub const STRING_MAX_SIZE: usize = 256 * 1024;

/// Maximum amount of data scanned while looking for the peer's
/// identification string, as pre-banner lines are allowed to precede it.
pub const ID_MAX_SIZE: usize = 64 * 1024;

mod error;
pub use error::Error;

mod packet;
pub use packet::Packet;

mod id;
pub use id::Id;

pub mod arch;

pub mod message;
pub use message::Message;

pub mod algorithm;

mod negotiate;
pub use negotiate::Negotiation;

pub mod kex;

pub mod hostkey;

mod session;
pub use session::{Handshake, Side};

pub mod sig;
