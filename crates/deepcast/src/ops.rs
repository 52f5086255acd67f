//! High-level operation entry points.
//!
//! Each entry point opens exactly one [`Session`] against the transport the
//! operation names, invokes the root pack, and returns the bytes moved.
//! Buffered variants open two sessions in sequence: one against a buffer
//! transport to stage or consume a single contiguous region, then one
//! against the real medium that moves a length header plus the whole region
//! in one physical call.
//!
//! The `*_with` variants take a caller-supplied packing routine instead of
//! relying on the value's [`Pack`] implementation; `broadcast_with` takes
//! one routine per role, and the buffered routine variants take an explicit
//! staging capacity (use [`crate::serialized_size_with`] to compute one).

use std::io;

use deepcast_session::{Pack, Result, Session};
use deepcast_transport::{
    BroadcastFollower, BroadcastRoot, BufferRead, BufferWrite, Channel,
    FileRead, FileWrite, PeerRecv, PeerSend, Rank, Tag,
};

use crate::serialized_size;

// ---------------------------------------------------------------------------
// Peer send / receive
// ---------------------------------------------------------------------------

/// Deep-sends `value` to `dest` under `tag`.
pub fn send<V, C>(
    value: &mut V,
    dest: Rank,
    tag: Tag,
    channel: &C,
) -> Result<usize>
where
    V: Pack,
    C: Channel,
{
    let mut session = Session::new(PeerSend::new(dest, tag, channel));
    value.pack(&mut session)?;
    let bytes = session.finish();
    tracing::debug!(bytes, %dest, %tag, "deep send complete");
    Ok(bytes)
}

/// Deep-receives into `value` from `source` under `tag`.
pub fn recv<V, C>(
    value: &mut V,
    source: Rank,
    tag: Tag,
    channel: &C,
) -> Result<usize>
where
    V: Pack,
    C: Channel,
{
    let mut session = Session::new(PeerRecv::new(source, tag, channel));
    value.pack(&mut session)?;
    let bytes = session.finish();
    tracing::debug!(bytes, %source, %tag, "deep receive complete");
    Ok(bytes)
}

/// [`send`] with a caller-supplied packing routine.
pub fn send_with<'c, V, C, F>(
    value: &mut V,
    dest: Rank,
    tag: Tag,
    channel: &'c C,
    mut pack_value: F,
) -> Result<usize>
where
    C: Channel,
    F: FnMut(&mut V, &mut Session<PeerSend<'c, C>>) -> Result<()>,
{
    let mut session = Session::new(PeerSend::new(dest, tag, channel));
    pack_value(value, &mut session)?;
    Ok(session.finish())
}

/// [`recv`] with a caller-supplied packing routine.
pub fn recv_with<'c, V, C, F>(
    value: &mut V,
    source: Rank,
    tag: Tag,
    channel: &'c C,
    mut pack_value: F,
) -> Result<usize>
where
    C: Channel,
    F: FnMut(&mut V, &mut Session<PeerRecv<'c, C>>) -> Result<()>,
{
    let mut session = Session::new(PeerRecv::new(source, tag, channel));
    pack_value(value, &mut session)?;
    Ok(session.finish())
}

// ---------------------------------------------------------------------------
// Broadcast
// ---------------------------------------------------------------------------

/// Deep-broadcasts `value` from `root` to every rank in the group.
///
/// The role is inferred from the channel's current rank; only the transport
/// variant differs between the two roles — the packing call is identical,
/// so the root traverses in write mode and every follower replays the same
/// traversal in read mode.
pub fn broadcast<V, C>(value: &mut V, root: Rank, channel: &C) -> Result<usize>
where
    V: Pack,
    C: Channel,
{
    let bytes = if channel.current_rank() == root {
        let mut session = Session::new(BroadcastRoot::new(root, channel));
        value.pack(&mut session)?;
        session.finish()
    } else {
        let mut session = Session::new(BroadcastFollower::new(root, channel));
        value.pack(&mut session)?;
        session.finish()
    };
    tracing::debug!(bytes, %root, rank = %channel.current_rank(), "deep broadcast complete");
    Ok(bytes)
}

/// [`broadcast`] with caller-supplied packing routines, one per role.
pub fn broadcast_with<'c, V, C, FR, FF>(
    value: &mut V,
    root: Rank,
    channel: &'c C,
    mut pack_as_root: FR,
    mut pack_as_follower: FF,
) -> Result<usize>
where
    C: Channel,
    FR: FnMut(&mut V, &mut Session<BroadcastRoot<'c, C>>) -> Result<()>,
    FF: FnMut(&mut V, &mut Session<BroadcastFollower<'c, C>>) -> Result<()>,
{
    if channel.current_rank() == root {
        let mut session = Session::new(BroadcastRoot::new(root, channel));
        pack_as_root(value, &mut session)?;
        Ok(session.finish())
    } else {
        let mut session = Session::new(BroadcastFollower::new(root, channel));
        pack_as_follower(value, &mut session)?;
        Ok(session.finish())
    }
}

// ---------------------------------------------------------------------------
// File write / read
// ---------------------------------------------------------------------------

/// Deep-writes `value` to `writer`.
pub fn file_write<V, W>(value: &mut V, writer: W) -> Result<usize>
where
    V: Pack,
    W: io::Write,
{
    let mut session = Session::new(FileWrite::new(writer));
    value.pack(&mut session)?;
    let bytes = session.finish();
    tracing::debug!(bytes, "deep file write complete");
    Ok(bytes)
}

/// Deep-reads into `value` from `reader`.
pub fn file_read<V, R>(value: &mut V, reader: R) -> Result<usize>
where
    V: Pack,
    R: io::Read,
{
    let mut session = Session::new(FileRead::new(reader));
    value.pack(&mut session)?;
    let bytes = session.finish();
    tracing::debug!(bytes, "deep file read complete");
    Ok(bytes)
}

/// [`file_write`] with a caller-supplied packing routine.
pub fn file_write_with<V, W, F>(
    value: &mut V,
    writer: W,
    mut pack_value: F,
) -> Result<usize>
where
    W: io::Write,
    F: FnMut(&mut V, &mut Session<FileWrite<W>>) -> Result<()>,
{
    let mut session = Session::new(FileWrite::new(writer));
    pack_value(value, &mut session)?;
    Ok(session.finish())
}

/// [`file_read`] with a caller-supplied packing routine.
pub fn file_read_with<V, R, F>(
    value: &mut V,
    reader: R,
    mut pack_value: F,
) -> Result<usize>
where
    R: io::Read,
    F: FnMut(&mut V, &mut Session<FileRead<R>>) -> Result<()>,
{
    let mut session = Session::new(FileRead::new(reader));
    pack_value(value, &mut session)?;
    Ok(session.finish())
}

// ---------------------------------------------------------------------------
// Buffered variants
// ---------------------------------------------------------------------------

/// Stages `value` into one sized heap region, then sends the region in one
/// physical transfer (after an 8-byte length header).
///
/// Returns the bytes moved by the physical transport.
pub fn buffered_send<V, C>(
    value: &mut V,
    dest: Rank,
    tag: Tag,
    channel: &C,
) -> Result<usize>
where
    V: Pack,
    C: Channel,
{
    let capacity = serialized_size(value)?;
    let mut staging = vec![0u8; capacity];
    let mut stage = Session::new(BufferWrite::new(&mut staging));
    value.pack(&mut stage)?;
    let staged = stage.finish();

    tracing::debug!(staged, %dest, %tag, "staged region, issuing one send");
    let mut ship = Session::new(PeerSend::new(dest, tag, channel));
    ship.pack_len(staged)?;
    ship.pack_plain_slice(&mut staging[..staged])?;
    Ok(ship.finish())
}

/// Receives one staged region in one physical transfer, then reconstructs
/// `value` from it.
pub fn buffered_recv<V, C>(
    value: &mut V,
    source: Rank,
    tag: Tag,
    channel: &C,
) -> Result<usize>
where
    V: Pack,
    C: Channel,
{
    let mut fetch = Session::new(PeerRecv::new(source, tag, channel));
    let staged = fetch.pack_len(0)?;
    let mut staging = vec![0u8; staged];
    fetch.pack_plain_slice(&mut staging[..])?;
    let bytes = fetch.finish();

    let mut consume = Session::new(BufferRead::new(&staging));
    value.pack(&mut consume)?;
    Ok(bytes)
}

/// Buffered collective broadcast: the root stages and broadcasts one
/// region; every follower receives it whole and reconstructs from it.
pub fn buffered_broadcast<V, C>(
    value: &mut V,
    root: Rank,
    channel: &C,
) -> Result<usize>
where
    V: Pack,
    C: Channel,
{
    if channel.current_rank() == root {
        let capacity = serialized_size(value)?;
        let mut staging = vec![0u8; capacity];
        let mut stage = Session::new(BufferWrite::new(&mut staging));
        value.pack(&mut stage)?;
        let staged = stage.finish();

        tracing::debug!(staged, %root, "staged region, issuing one broadcast");
        let mut ship = Session::new(BroadcastRoot::new(root, channel));
        ship.pack_len(staged)?;
        ship.pack_plain_slice(&mut staging[..staged])?;
        Ok(ship.finish())
    } else {
        let mut fetch = Session::new(BroadcastFollower::new(root, channel));
        let staged = fetch.pack_len(0)?;
        let mut staging = vec![0u8; staged];
        fetch.pack_plain_slice(&mut staging[..])?;
        let bytes = fetch.finish();

        let mut consume = Session::new(BufferRead::new(&staging));
        value.pack(&mut consume)?;
        Ok(bytes)
    }
}

/// Stages `value` into one sized heap region, then writes the region in one
/// physical transfer (after an 8-byte length header).
pub fn buffered_file_write<V, W>(value: &mut V, writer: W) -> Result<usize>
where
    V: Pack,
    W: io::Write,
{
    let capacity = serialized_size(value)?;
    let mut staging = vec![0u8; capacity];
    let mut stage = Session::new(BufferWrite::new(&mut staging));
    value.pack(&mut stage)?;
    let staged = stage.finish();

    let mut ship = Session::new(FileWrite::new(writer));
    ship.pack_len(staged)?;
    ship.pack_plain_slice(&mut staging[..staged])?;
    Ok(ship.finish())
}

/// Reads one staged region in one physical transfer, then reconstructs
/// `value` from it.
pub fn buffered_file_read<V, R>(value: &mut V, reader: R) -> Result<usize>
where
    V: Pack,
    R: io::Read,
{
    let mut fetch = Session::new(FileRead::new(reader));
    let staged = fetch.pack_len(0)?;
    let mut staging = vec![0u8; staged];
    fetch.pack_plain_slice(&mut staging[..])?;
    let bytes = fetch.finish();

    let mut consume = Session::new(BufferRead::new(&staging));
    value.pack(&mut consume)?;
    Ok(bytes)
}

/// [`buffered_send`] with a caller-supplied packing routine and an explicit
/// staging capacity.
pub fn buffered_send_with<V, C, F>(
    value: &mut V,
    dest: Rank,
    tag: Tag,
    channel: &C,
    capacity: usize,
    mut pack_value: F,
) -> Result<usize>
where
    C: Channel,
    F: FnMut(&mut V, &mut Session<BufferWrite<'_>>) -> Result<()>,
{
    let mut staging = vec![0u8; capacity];
    let mut stage = Session::new(BufferWrite::new(&mut staging));
    pack_value(value, &mut stage)?;
    let staged = stage.finish();

    let mut ship = Session::new(PeerSend::new(dest, tag, channel));
    ship.pack_len(staged)?;
    ship.pack_plain_slice(&mut staging[..staged])?;
    Ok(ship.finish())
}

/// [`buffered_recv`] with a caller-supplied packing routine.
pub fn buffered_recv_with<V, C, F>(
    value: &mut V,
    source: Rank,
    tag: Tag,
    channel: &C,
    mut pack_value: F,
) -> Result<usize>
where
    C: Channel,
    F: FnMut(&mut V, &mut Session<BufferRead<'_>>) -> Result<()>,
{
    let mut fetch = Session::new(PeerRecv::new(source, tag, channel));
    let staged = fetch.pack_len(0)?;
    let mut staging = vec![0u8; staged];
    fetch.pack_plain_slice(&mut staging[..])?;
    let bytes = fetch.finish();

    let mut consume = Session::new(BufferRead::new(&staging));
    pack_value(value, &mut consume)?;
    Ok(bytes)
}

/// [`buffered_broadcast`] with caller-supplied packing routines (staging
/// side and consuming side) and an explicit staging capacity for the root.
pub fn buffered_broadcast_with<V, C, FW, FR>(
    value: &mut V,
    root: Rank,
    channel: &C,
    capacity: usize,
    mut pack_staged: FW,
    mut pack_consumed: FR,
) -> Result<usize>
where
    C: Channel,
    FW: FnMut(&mut V, &mut Session<BufferWrite<'_>>) -> Result<()>,
    FR: FnMut(&mut V, &mut Session<BufferRead<'_>>) -> Result<()>,
{
    if channel.current_rank() == root {
        let mut staging = vec![0u8; capacity];
        let mut stage = Session::new(BufferWrite::new(&mut staging));
        pack_staged(value, &mut stage)?;
        let staged = stage.finish();

        let mut ship = Session::new(BroadcastRoot::new(root, channel));
        ship.pack_len(staged)?;
        ship.pack_plain_slice(&mut staging[..staged])?;
        Ok(ship.finish())
    } else {
        let mut fetch = Session::new(BroadcastFollower::new(root, channel));
        let staged = fetch.pack_len(0)?;
        let mut staging = vec![0u8; staged];
        fetch.pack_plain_slice(&mut staging[..])?;
        let bytes = fetch.finish();

        let mut consume = Session::new(BufferRead::new(&staging));
        pack_consumed(value, &mut consume)?;
        Ok(bytes)
    }
}

/// [`buffered_file_write`] with a caller-supplied packing routine and an
/// explicit staging capacity.
pub fn buffered_file_write_with<V, W, F>(
    value: &mut V,
    writer: W,
    capacity: usize,
    mut pack_value: F,
) -> Result<usize>
where
    W: io::Write,
    F: FnMut(&mut V, &mut Session<BufferWrite<'_>>) -> Result<()>,
{
    let mut staging = vec![0u8; capacity];
    let mut stage = Session::new(BufferWrite::new(&mut staging));
    pack_value(value, &mut stage)?;
    let staged = stage.finish();

    let mut ship = Session::new(FileWrite::new(writer));
    ship.pack_len(staged)?;
    ship.pack_plain_slice(&mut staging[..staged])?;
    Ok(ship.finish())
}

/// [`buffered_file_read`] with a caller-supplied packing routine.
pub fn buffered_file_read_with<V, R, F>(
    value: &mut V,
    reader: R,
    mut pack_value: F,
) -> Result<usize>
where
    R: io::Read,
    F: FnMut(&mut V, &mut Session<BufferRead<'_>>) -> Result<()>,
{
    let mut fetch = Session::new(FileRead::new(reader));
    let staged = fetch.pack_len(0)?;
    let mut staging = vec![0u8; staged];
    fetch.pack_plain_slice(&mut staging[..])?;
    let bytes = fetch.finish();

    let mut consume = Session::new(BufferRead::new(&staging));
    pack_value(value, &mut consume)?;
    Ok(bytes)
}
