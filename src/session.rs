//! Tracking of the handshake message ordering, from the identification
//! exchange up to the activation of the first session keys.

use log::trace;

use crate::{Error, Message};

/// The side of the connection the state machine drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The connecting side.
    Client,

    /// The listening side.
    Server,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingBanner,
    AwaitingKexInit,
    AwaitingKexDh,
    AwaitingNewKeys,
    Established,
}

/// The handshake sequence of a single connection, driven exclusively by
/// decoded messages and rejecting any message out of it's expected state.
#[derive(Debug)]
pub struct Handshake {
    side: Side,
    state: State,
}

impl Handshake {
    /// Start tracking a fresh connection for the provided [`Side`].
    pub fn new(side: Side) -> Self {
        Self {
            side,
            state: State::AwaitingBanner,
        }
    }

    /// Whether the handshake reached the established state.
    pub fn is_established(&self) -> bool {
        self.state == State::Established
    }

    /// Record the receipt of the peer's identification string,
    /// which precedes any binary message.
    pub fn banner(&mut self) -> Result<(), Error> {
        match self.state {
            State::AwaitingBanner => {
                self.state = State::AwaitingKexInit;

                Ok(())
            }
            _ => Err(Error::Protocol(
                "Unexpected identification string mid-connection".into(),
            )),
        }
    }

    /// Feed a decoded inbound message to the state machine.
    pub fn update(&mut self, message: &Message) -> Result<(), Error> {
        let state = match (self.state, message) {
            // RFC 4253 section 11 messages may appear at any point
            // of the connection, without affecting the handshake
            (
                state,
                Message::Ignore(_)
                | Message::Debug(_)
                | Message::Unimplemented(_)
                | Message::Disconnect(_),
            ) => state,

            (State::AwaitingKexInit, Message::KexInit(_)) => State::AwaitingKexDh,

            (State::AwaitingKexDh, Message::KexdhInit(_)) if self.side == Side::Server => {
                State::AwaitingNewKeys
            }
            (State::AwaitingKexDh, Message::KexdhReply(_)) if self.side == Side::Client => {
                State::AwaitingNewKeys
            }

            (State::AwaitingNewKeys, Message::NewKeys(_)) => State::Established,

            // once established, service, auth and channel messages flow
            // freely; a re-keying `SSH_MSG_KEXINIT` is tolerated but it's
            // follow-up is the caller's concern
            (State::Established, _) => State::Established,

            (state, message) => {
                return Err(Error::Protocol(format!(
                    "Unexpected message ID `{}` in state `{state:?}`",
                    message.id()
                )))
            }
        };

        if state != self.state {
            trace!("handshake {:?}: {:?} -> {state:?}", self.side, self.state);
        }

        self.state = state;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use rstest::rstest;

    use super::*;
    use crate::{arch, message::trans};

    fn kexdh_init() -> Message<'static> {
        Message::KexdhInit(trans::KexdhInit {
            e: arch::MpInt::positive(&[0x42]),
        })
    }

    fn kexdh_reply() -> Message<'static> {
        Message::KexdhReply(trans::KexdhReply {
            k_s: arch::Bytes::owned(vec![1]),
            f: arch::MpInt::positive(&[0x17]),
            signature: arch::Bytes::owned(vec![2]),
        })
    }

    #[test]
    fn it_walks_the_client_handshake() {
        let mut handshake = Handshake::new(Side::Client);

        handshake.banner().unwrap();
        handshake
            .update(&Message::KexInit(trans::KexInit::preferred()))
            .unwrap();
        handshake.update(&kexdh_reply()).unwrap();
        handshake.update(&Message::NewKeys(trans::NewKeys)).unwrap();

        assert!(handshake.is_established());
    }

    #[test]
    fn it_walks_the_server_handshake() {
        let mut handshake = Handshake::new(Side::Server);

        handshake.banner().unwrap();
        handshake
            .update(&Message::KexInit(trans::KexInit::preferred()))
            .unwrap();
        handshake.update(&kexdh_init()).unwrap();
        handshake.update(&Message::NewKeys(trans::NewKeys)).unwrap();

        assert!(handshake.is_established());
    }

    #[test]
    fn it_rejects_the_wrong_kexdh_direction() {
        let mut handshake = Handshake::new(Side::Client);

        handshake.banner().unwrap();
        handshake
            .update(&Message::KexInit(trans::KexInit::preferred()))
            .unwrap();

        let err = handshake.update(&kexdh_init()).unwrap_err();

        assert!(matches!(err, Error::Protocol(_)), "{err:?}");
    }

    #[rstest]
    #[case(Message::NewKeys(trans::NewKeys))]
    #[case(kexdh_reply())]
    #[case(Message::AuthSuccess(crate::message::userauth::Success))]
    fn it_rejects_messages_ahead_of_the_kexinit(#[case] message: Message<'static>) {
        let mut handshake = Handshake::new(Side::Client);
        handshake.banner().unwrap();

        let err = handshake.update(&message).unwrap_err();

        assert!(matches!(err, Error::Protocol(_)), "{err:?}");
    }

    #[test]
    fn it_lets_transport_chatter_through() {
        let mut handshake = Handshake::new(Side::Server);
        handshake.banner().unwrap();

        handshake
            .update(&Message::Ignore(trans::Ignore {
                data: arch::Bytes::owned(vec![0x00]),
            }))
            .unwrap();
        handshake
            .update(&Message::Debug(trans::Debug {
                always_display: false.into(),
                message: "hello".into(),
                language: arch::Ascii::new(""),
            }))
            .unwrap();

        assert!(!handshake.is_established());
    }

    #[test]
    fn it_rejects_a_second_banner() {
        let mut handshake = Handshake::new(Side::Client);

        handshake.banner().unwrap();
        let err = handshake.banner().unwrap_err();

        assert!(matches!(err, Error::Protocol(_)), "{err:?}");
    }
}
