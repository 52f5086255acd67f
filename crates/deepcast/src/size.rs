//! Exact serialized-size computation via the no-op transport.

use deepcast_session::{Pack, Result, Session};
use deepcast_transport::NoOp;

/// Computes the exact number of bytes a matching outbound transport will
/// move for `value`, without moving any.
///
/// The traversal is the same one the real transports run, so the count
/// includes every length and identity word and reflects alias
/// deduplication: a node reachable twice through shared pointers is counted
/// once. The value is not modified, and repeated calls return the same
/// count.
pub fn serialized_size<V: Pack>(value: &mut V) -> Result<usize> {
    let mut session = Session::new(NoOp);
    value.pack(&mut session)?;
    Ok(session.finish())
}

/// [`serialized_size`] with a caller-supplied packing routine.
pub fn serialized_size_with<V, F>(
    value: &mut V,
    mut pack_value: F,
) -> Result<usize>
where
    F: FnMut(&mut V, &mut Session<NoOp>) -> Result<()>,
{
    let mut session = Session::new(NoOp);
    pack_value(value, &mut session)?;
    Ok(session.finish())
}
