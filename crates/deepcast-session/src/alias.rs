//! The per-session identity/alias table used to deduplicate shared nodes.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;

/// An opaque correlation token identifying one source-graph allocation
/// within one session.
///
/// On the outbound side tokens are derived from allocation addresses; on the
/// inbound side they are whatever the stream carried. A token is only
/// meaningful inside the session that produced it — it is never a portable
/// identity and its numeric value is never preserved across runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AliasToken(u64);

impl AliasToken {
    /// The token reserved for the absent pointer.
    pub const NULL: AliasToken = AliasToken(0);

    /// Wraps a raw token value read from the stream.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Derives a token from a live allocation's address.
    pub fn of_ptr<V>(ptr: *const V) -> Self {
        Self(ptr as usize as u64)
    }

    /// Whether this is the absent-pointer token.
    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns the raw token value for transport.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for AliasToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alias-{:#x}", self.0)
    }
}

/// Maps source-graph identity to destination identity for one session.
///
/// One entry per distinct token. Outbound sessions only record that a token
/// was seen (the destination value is `()`); inbound sessions record the
/// reconstructed handle so later occurrences of the same token resolve to
/// the same allocation. The map lives exactly as long as its session and is
/// never shared across operations.
#[derive(Default)]
pub struct AliasMap {
    entries: HashMap<AliasToken, Box<dyn Any>>,
}

impl AliasMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `token` has been seen in this session.
    pub fn contains(&self, token: AliasToken) -> bool {
        self.entries.contains_key(&token)
    }

    /// Looks up the destination handle recorded for `token`.
    ///
    /// Returns a clone of the handle (for `Rc` destinations, a new strong
    /// reference to the same allocation), or `None` if the token is unseen
    /// or was recorded under a different destination type.
    pub fn find<V: Any + Clone>(&self, token: AliasToken) -> Option<V> {
        self.entries.get(&token)?.downcast_ref::<V>().cloned()
    }

    /// Records the destination decision for `token`.
    pub fn insert<V: Any>(&mut self, token: AliasToken, destination: V) {
        self.entries.insert(token, Box::new(destination));
    }

    /// Number of distinct identities seen so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no identity has been seen yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for AliasMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AliasMap")
            .field("entries", &self.entries.len())
            .finish()
    }
}
