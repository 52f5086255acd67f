//! In-memory buffer transports and the no-op size-accounting transport.

use crate::{Direction, Transport, TransportError};

/// Writes successive transfers into one contiguous byte region.
///
/// The region's length is the transport's fixed capacity. A transfer that
/// would overrun it fails with [`TransportError::CapacityExceeded`]; the
/// region is never silently truncated.
#[derive(Debug)]
pub struct BufferWrite<'a> {
    region: &'a mut [u8],
    offset: usize,
}

impl<'a> BufferWrite<'a> {
    /// Creates a write transport over `region`.
    pub fn new(region: &'a mut [u8]) -> Self {
        Self { region, offset: 0 }
    }

    /// Bytes staged so far.
    pub fn written(&self) -> usize {
        self.offset
    }
}

impl Transport for BufferWrite<'_> {
    const DIRECTION: Direction = Direction::Outbound;

    fn move_bytes(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
        let end = checked_end(self.offset, buf.len(), self.region.len())?;
        self.region[self.offset..end].copy_from_slice(buf);
        self.offset = end;
        Ok(())
    }
}

/// Reads successive transfers out of one contiguous byte region.
#[derive(Debug)]
pub struct BufferRead<'a> {
    region: &'a [u8],
    offset: usize,
}

impl<'a> BufferRead<'a> {
    /// Creates a read transport over `region`.
    pub fn new(region: &'a [u8]) -> Self {
        Self { region, offset: 0 }
    }
}

impl Transport for BufferRead<'_> {
    const DIRECTION: Direction = Direction::Inbound;

    fn move_bytes(&mut self, buf: &mut [u8]) -> Result<(), TransportError> {
        let end = checked_end(self.offset, buf.len(), self.region.len())?;
        buf.copy_from_slice(&self.region[self.offset..end]);
        self.offset = end;
        Ok(())
    }
}

fn checked_end(
    offset: usize,
    requested: usize,
    capacity: usize,
) -> Result<usize, TransportError> {
    let end = offset
        .checked_add(requested)
        .filter(|end| *end <= capacity)
        .ok_or(TransportError::CapacityExceeded {
            offset,
            requested,
            capacity,
        })?;
    Ok(end)
}

/// Moves nothing.
///
/// Outbound so traversals run in write mode, but `move_bytes` is a pure
/// no-op. Sessions bound to it still accumulate their byte offset, which is
/// how exact serialized sizes are computed without touching a medium.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOp;

impl Transport for NoOp {
    const DIRECTION: Direction = Direction::Outbound;

    fn move_bytes(&mut self, _buf: &mut [u8]) -> Result<(), TransportError> {
        Ok(())
    }
}
