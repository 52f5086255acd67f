//! File transports over the standard I/O traits.
//!
//! Generic over [`std::io::Write`]/[`std::io::Read`], so the same transports
//! cover real files, in-memory cursors, and anything else that speaks the
//! standard traits.

use std::io;

use crate::{Direction, Transport, TransportError};

/// Appends each transfer to an underlying writer.
#[derive(Debug)]
pub struct FileWrite<W: io::Write> {
    writer: W,
}

impl<W: io::Write> FileWrite<W> {
    /// Creates a write transport over `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the transport and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: io::Write> Transport for FileWrite<W> {
    const DIRECTION: Direction = Direction::Outbound;

    fn move_bytes(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
        self.writer.write_all(buf).map_err(TransportError::Io)
    }
}

/// Fills each transfer from an underlying reader.
#[derive(Debug)]
pub struct FileRead<R: io::Read> {
    reader: R,
}

impl<R: io::Read> FileRead<R> {
    /// Creates a read transport over `reader`.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Consumes the transport and returns the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: io::Read> Transport for FileRead<R> {
    const DIRECTION: Direction = Direction::Inbound;

    fn move_bytes(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
        self.reader.read_exact(buf).map_err(TransportError::Io)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_file_write_then_read_round_trips_bytes() {
        let mut w = FileWrite::new(Vec::new());
        w.move_bytes(&mut [1, 2, 3]).unwrap();
        w.move_bytes(&mut [4]).unwrap();
        let stored = w.into_inner();
        assert_eq!(stored, vec![1, 2, 3, 4]);

        let mut r = FileRead::new(Cursor::new(stored));
        let mut buf = [0u8; 4];
        r.move_bytes(&mut buf).unwrap();
        assert_eq!(buf, [1, 2, 3, 4]);
    }

    #[test]
    fn test_file_read_past_end_is_an_error() {
        let mut r = FileRead::new(Cursor::new(vec![1u8, 2]));
        let mut buf = [0u8; 3];
        assert!(matches!(
            r.move_bytes(&mut buf),
            Err(TransportError::Io(_))
        ));
    }
}
