//!
//! IPP document payload
//!
use std::io::{self, Read};

use bytes::Bytes;

#[cfg(feature = "async")]
use {
    futures_util::io::{AllowStdIo, AsyncRead, AsyncReadExt},
    std::{
        pin::Pin,
        task::{Context, Poll},
    },
};

enum PayloadKind {
    #[cfg(feature = "async")]
    Async(Box<dyn AsyncRead + Send + Sync + Unpin>),
    Sync(Box<dyn Read + Send + Sync>),
    Buffered(io::Cursor<Bytes>),
    Empty,
}

/// Trailing document payload of a request. Either buffered in memory (the
/// parser default) or an unread handle over the remaining byte source
/// (streaming mode, for payloads too large to hold).
pub struct IppPayload {
    inner: PayloadKind,
}

impl IppPayload {
    /// Create empty payload
    pub fn empty() -> Self {
        IppPayload {
            inner: PayloadKind::Empty,
        }
    }

    /// Create a payload over bytes already read into memory
    pub fn buffered(data: Bytes) -> Self {
        IppPayload {
            inner: PayloadKind::Buffered(io::Cursor::new(data)),
        }
    }

    #[cfg(feature = "async")]
    /// Create an async payload from the AsyncRead object
    pub fn new_async<R>(r: R) -> Self
    where
        R: 'static + AsyncRead + Send + Sync + Unpin,
    {
        IppPayload {
            inner: PayloadKind::Async(Box::new(r)),
        }
    }

    /// Create a sync payload from the Read object
    pub fn new<R>(r: R) -> Self
    where
        R: 'static + Read + Send + Sync,
    {
        IppPayload {
            inner: PayloadKind::Sync(Box::new(r)),
        }
    }

    /// Buffered payload bytes, `None` for streamed payloads
    pub fn data(&self) -> Option<&Bytes> {
        match self.inner {
            PayloadKind::Buffered(ref cursor) => Some(cursor.get_ref()),
            _ => None,
        }
    }

    /// True when no payload followed the attributes
    pub fn is_empty(&self) -> bool {
        match self.inner {
            PayloadKind::Empty => true,
            PayloadKind::Buffered(ref cursor) => cursor.get_ref().is_empty(),
            _ => false,
        }
    }
}

impl Default for IppPayload {
    fn default() -> Self {
        Self {
            inner: PayloadKind::Empty,
        }
    }
}

impl From<Bytes> for IppPayload {
    fn from(data: Bytes) -> Self {
        IppPayload::buffered(data)
    }
}

#[cfg(feature = "async")]
impl AsyncRead for IppPayload {
    fn poll_read(mut self: Pin<&mut Self>, cx: &mut Context, buf: &mut [u8]) -> Poll<io::Result<usize>> {
        match self.inner {
            PayloadKind::Async(ref mut inner) => Pin::new(&mut *inner).poll_read(cx, buf),
            PayloadKind::Sync(ref mut inner) => Pin::new(&mut AllowStdIo::new(inner)).poll_read(cx, buf),
            PayloadKind::Buffered(ref mut cursor) => Poll::Ready(cursor.read(buf)),
            PayloadKind::Empty => Poll::Ready(Ok(0)),
        }
    }
}

impl Read for IppPayload {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner {
            #[cfg(feature = "async")]
            PayloadKind::Async(ref mut inner) => futures_executor::block_on(inner.read(buf)),
            PayloadKind::Sync(ref mut inner) => inner.read(buf),
            PayloadKind::Buffered(ref mut cursor) => cursor.read(buf),
            PayloadKind::Empty => Ok(0),
        }
    }
}
