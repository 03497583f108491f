use crate::Error;

const VERSION: &str = "2.0";

/// The SSH identification string as defined in the SSH protocol.
///
/// The format must match the following pattern:
/// `SSH-<protoversion>-<softwareversion>[ <comments>]`.
///
/// see <https://datatracker.ietf.org/doc/html/rfc4253#section-4.2>.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id {
    /// The SSH's protocol version, should be `2.0` in our case.
    pub protoversion: String,

    /// A string identifying the software curently used, in example `billsSSH_3.6.3q3`.
    pub softwareversion: String,

    /// Optional comments with additionnal informations about the software.
    pub comments: Option<String>,
}

impl Id {
    /// Convenience method to create an `SSH-2.0` identifier string.
    pub fn v2(softwareversion: impl Into<String>, comments: Option<impl Into<String>>) -> Self {
        Self {
            protoversion: VERSION.into(),
            softwareversion: softwareversion.into(),
            comments: comments.map(Into::into),
        }
    }

    /// Locate and parse the peer's identification string in a (possibly
    /// partial) incoming `buf`, returning it alongside the remainder of
    /// the buffer, which belongs to the binary packet protocol.
    ///
    /// Lines not beginning with `SSH-` are permitted ahead of the
    /// identification string and skipped, though an [`Error::Malformed`]
    /// is reported if none is found within [`crate::ID_MAX_SIZE`] bytes,
    /// while [`Error::NeedMore`] signals an incomplete line.
    pub fn scan(buf: &[u8]) -> Result<(Self, &[u8]), Error> {
        let mut offset = 0;

        loop {
            let Some(end) = buf[offset..]
                .windows(2)
                .position(|window| window == b"\r\n")
            else {
                break if buf.len() > crate::ID_MAX_SIZE {
                    Err(Error::Malformed("Buffer is too big".into()))
                } else {
                    Err(Error::NeedMore)
                };
            };

            let line = &buf[offset..offset + end];
            let remainder = &buf[offset + end + 2..];

            if line.starts_with(b"SSH-") {
                let text = std::str::from_utf8(line)
                    .map_err(|_| Error::Malformed("Identification string is not UTF-8".into()))?;

                let id: Self = text.parse()?;
                if id.protoversion != VERSION {
                    return Err(Error::Malformed(format!("Bad version {}", id.protoversion)));
                }

                return Ok((id, remainder));
            }

            offset += end + 2;
        }
    }

    /// Read an [`Id`], discarding any _extra lines_ sent by the server
    /// from the provided `reader`.
    pub fn from_reader<R>(reader: &mut R) -> Result<Self, Error>
    where
        R: std::io::BufRead,
    {
        let text = std::io::BufRead::lines(reader)
            // Skip extra lines the server can send before identifying
            .find(|line| {
                line.as_deref()
                    .map(|line| line.starts_with("SSH-"))
                    .unwrap_or(true)
            })
            .ok_or(Error::NeedMore)??;

        text.parse()
    }

    /// Read an [`Id`], discarding any _extra lines_ sent by the server
    /// from the provided asynchronous `reader`.
    #[cfg(feature = "futures")]
    #[cfg_attr(docsrs, doc(cfg(feature = "futures")))]
    pub async fn from_async_reader<R>(reader: &mut R) -> Result<Self, Error>
    where
        R: futures::io::AsyncBufRead + Unpin,
    {
        use futures::TryStreamExt;

        let text = futures::io::AsyncBufReadExt::lines(reader)
            // Skip extra lines the server can send before identifying
            .try_skip_while(|line| futures::future::ok(!line.starts_with("SSH-")))
            .try_next()
            .await?
            .ok_or(Error::NeedMore)?;

        text.parse()
    }

    /// Write the [`Id`] to the provided `writer`.
    pub fn to_writer<W>(&self, writer: &mut W) -> Result<(), Error>
    where
        W: std::io::Write,
    {
        writer.write_all(self.to_string().as_bytes())?;
        writer.write_all(b"\r\n")?;

        Ok(())
    }

    /// Write the [`Id`] to the provided asynchronous `writer`.
    #[cfg(feature = "futures")]
    #[cfg_attr(docsrs, doc(cfg(feature = "futures")))]
    pub async fn to_async_writer<W>(&self, writer: &mut W) -> Result<(), Error>
    where
        W: futures::io::AsyncWrite + Unpin,
    {
        use futures::io::AsyncWriteExt;

        writer.write_all(self.to_string().as_bytes()).await?;
        writer.write_all(b"\r\n").await?;

        Ok(())
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SSH-{}-{}", self.protoversion, self.softwareversion)?;

        if let Some(comments) = &self.comments {
            write!(f, " {comments}")?;
        }

        Ok(())
    }
}

impl std::str::FromStr for Id {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, comments) = s
            .split_once(' ')
            .map_or_else(|| (s, None), |(id, comments)| (id, Some(comments)));

        match id.splitn(3, '-').collect::<Vec<_>>()[..] {
            ["SSH", protoversion, softwareversion]
                if !protoversion.is_empty() && !softwareversion.is_empty() =>
            {
                Ok(Self {
                    protoversion: protoversion.to_string(),
                    softwareversion: softwareversion.to_string(),
                    comments: comments.map(str::to_string),
                })
            }
            _ => Err(Error::Malformed(format!("Bad identification string `{s}`"))),
        }
    }
}
