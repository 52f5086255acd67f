//! The traversal engine: one session per logical operation.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use deepcast_transport::{Direction, Transport};
use zerocopy::IntoBytes;

use crate::alias::{AliasMap, AliasToken};
use crate::error::{PackError, Result};
use crate::pack::{Pack, Plain};

/// One bound traversal: a transport, an alias map, and a byte offset.
///
/// A session is opened for exactly one operation and consumed by it. Every
/// pack operation behaves in write mode or read mode depending solely on the
/// bound transport's [`Direction`] — the calling code is identical in both,
/// which is what lets a single declared shape per type drive serialization,
/// reconstruction, and size computation.
///
/// Sessions are deliberately not `Clone`: the offset and alias map must
/// stay consistent with the transport's progress through the stream.
pub struct Session<T: Transport> {
    offset: usize,
    transport: T,
    aliases: AliasMap,
}

impl<T: Transport> Session<T> {
    /// Opens a session over `transport`.
    pub fn new(transport: T) -> Self {
        Self {
            offset: 0,
            transport,
            aliases: AliasMap::new(),
        }
    }

    /// The direction of the bound transport.
    pub fn direction(&self) -> Direction {
        T::DIRECTION
    }

    /// Whether this session writes to (rather than reads from) its medium.
    pub fn is_outbound(&self) -> bool {
        T::DIRECTION == Direction::Outbound
    }

    /// Bytes moved so far, including every length and identity word.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Closes the session and returns the total bytes moved.
    pub fn finish(self) -> usize {
        self.offset
    }

    /// The one primitive everything else is built on: moves `bytes.len()`
    /// bytes through the transport and advances the offset. The no-op
    /// transport moves nothing but the offset still advances, which is how
    /// sizes are computed.
    fn move_bytes(&mut self, bytes: &mut [u8]) -> Result<()> {
        self.transport.move_bytes(bytes)?;
        self.offset += bytes.len();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Leaf operations
    // -----------------------------------------------------------------------

    /// Packs a value by its declared shape.
    ///
    /// Equivalent to `value.pack(self)`; exists so entry points and custom
    /// routines read uniformly.
    pub fn pack_value<V: Pack>(&mut self, value: &mut V) -> Result<()> {
        value.pack(self)
    }

    /// Moves a plain value's native byte image in one block.
    pub fn pack_plain<V: Plain>(&mut self, value: &mut V) -> Result<()> {
        self.move_bytes(value.as_mut_bytes())
    }

    /// Moves a contiguous slice of plain values as one block.
    pub fn pack_plain_slice<V: Plain>(
        &mut self,
        values: &mut [V],
    ) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }
        self.move_bytes(values.as_mut_bytes())
    }

    /// Moves a length word. Outbound: writes `len` and returns it.
    /// Inbound: ignores `len` and returns what the stream carried.
    pub fn pack_len(&mut self, len: usize) -> Result<usize> {
        let mut word = len as u64;
        self.pack_plain(&mut word)?;
        Ok(word as usize)
    }

    /// Moves an identity word, same convention as [`Session::pack_len`].
    pub fn pack_token(&mut self, token: AliasToken) -> Result<AliasToken> {
        let mut word = token.into_inner();
        self.pack_plain(&mut word)?;
        Ok(AliasToken::new(word))
    }

    // -----------------------------------------------------------------------
    // Owned pointers
    // -----------------------------------------------------------------------

    /// Packs an owned, nullable pointer. Not deduplicated: repeated calls
    /// with clones of the same value repeat the full payload.
    ///
    /// Wire shape: a length word (0 = absent, 1 = present), then the
    /// payload by its declared shape.
    pub fn pack_boxed<V: Pack>(
        &mut self,
        slot: &mut Option<Box<V>>,
    ) -> Result<()> {
        match T::DIRECTION {
            Direction::Outbound => {
                self.pack_len(slot.is_some() as usize)?;
                if let Some(value) = slot {
                    value.pack(self)?;
                }
            }
            Direction::Inbound => {
                let len = self.pack_len(0)?;
                *slot = match len {
                    0 => None,
                    1 => {
                        let mut value = V::default();
                        value.pack(self)?;
                        Some(Box::new(value))
                    }
                    actual => {
                        return Err(PackError::LengthMismatch {
                            expected: 1,
                            actual,
                        });
                    }
                };
            }
        }
        Ok(())
    }

    /// Packs an owned, nullable array of `V`.
    ///
    /// `declared` is the caller's expected element count; a present payload
    /// whose transported length disagrees fails with
    /// [`PackError::LengthMismatch`] before any element is unpacked. An
    /// absent pointer is accepted regardless of the declared length, and a
    /// transported length of zero reconstructs as `None`.
    pub fn pack_boxed_slice<V: Pack>(
        &mut self,
        slot: &mut Option<Box<[V]>>,
        declared: Option<usize>,
    ) -> Result<()> {
        match T::DIRECTION {
            Direction::Outbound => {
                let actual = slot.as_ref().map_or(0, |values| values.len());
                if let Some(expected) = declared {
                    if slot.is_some() && expected != actual {
                        return Err(PackError::LengthMismatch {
                            expected,
                            actual,
                        });
                    }
                }
                self.pack_len(actual)?;
                if let Some(values) = slot {
                    for value in values.iter_mut() {
                        value.pack(self)?;
                    }
                }
            }
            Direction::Inbound => {
                let actual = self.pack_len(0)?;
                if let Some(expected) = declared {
                    if actual != 0 && expected != actual {
                        return Err(PackError::LengthMismatch {
                            expected,
                            actual,
                        });
                    }
                }
                *slot = if actual == 0 {
                    None
                } else {
                    let mut values: Vec<V> = Vec::new();
                    values.resize_with(actual, V::default);
                    for value in values.iter_mut() {
                        value.pack(self)?;
                    }
                    Some(values.into_boxed_slice())
                };
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Shared pointers
    // -----------------------------------------------------------------------

    /// Packs a shared, nullable pointer with alias deduplication.
    ///
    /// The node's identity token always moves on the wire. The first
    /// occurrence of a token in a session also moves the payload and records
    /// the destination in the alias map; every later occurrence moves
    /// nothing further and resolves to the recorded destination, so sharing
    /// in the source graph is sharing in the reconstructed graph
    /// (`Rc::ptr_eq` holds on the far side exactly where it held here).
    ///
    /// The mapping is recorded before the payload is walked, so a node
    /// referenced again from inside its own payload resolves to itself.
    pub fn pack_shared<V>(
        &mut self,
        slot: &mut Option<Rc<RefCell<V>>>,
    ) -> Result<()>
    where
        V: Pack + 'static,
    {
        match T::DIRECTION {
            Direction::Outbound => {
                let token = slot
                    .as_ref()
                    .map_or(AliasToken::NULL, |node| {
                        AliasToken::of_ptr(Rc::as_ptr(node))
                    });
                self.pack_token(token)?;
                let Some(node) = slot else {
                    return Ok(());
                };
                if self.aliases.contains(token) {
                    tracing::trace!(%token, "alias hit, payload skipped");
                    return Ok(());
                }
                self.aliases.insert(token, ());
                self.pack_len(1)?;
                node.borrow_mut().pack(self)?;
            }
            Direction::Inbound => {
                let token = self.pack_token(AliasToken::NULL)?;
                if token.is_null() {
                    *slot = None;
                    return Ok(());
                }
                if let Some(seen) =
                    self.aliases.find::<Rc<RefCell<V>>>(token)
                {
                    tracing::trace!(%token, "alias hit, reusing node");
                    *slot = Some(seen);
                    return Ok(());
                }
                let actual = self.pack_len(0)?;
                if actual != 1 {
                    return Err(PackError::LengthMismatch {
                        expected: 1,
                        actual,
                    });
                }
                let node = Rc::new(RefCell::new(V::default()));
                self.aliases.insert(token, Rc::clone(&node));
                node.borrow_mut().pack(self)?;
                *slot = Some(node);
            }
        }
        Ok(())
    }

    /// Packs a shared, nullable array with alias deduplication and the same
    /// declared-length cross-check as [`Session::pack_boxed_slice`].
    pub fn pack_shared_slice<V>(
        &mut self,
        slot: &mut Option<Rc<RefCell<Vec<V>>>>,
        declared: Option<usize>,
    ) -> Result<()>
    where
        V: Pack + 'static,
    {
        match T::DIRECTION {
            Direction::Outbound => {
                let token = slot
                    .as_ref()
                    .map_or(AliasToken::NULL, |node| {
                        AliasToken::of_ptr(Rc::as_ptr(node))
                    });
                self.pack_token(token)?;
                let Some(node) = slot else {
                    return Ok(());
                };
                if self.aliases.contains(token) {
                    tracing::trace!(%token, "alias hit, payload skipped");
                    return Ok(());
                }
                self.aliases.insert(token, ());
                let mut values = node.borrow_mut();
                let actual = values.len();
                if let Some(expected) = declared {
                    if expected != actual {
                        return Err(PackError::LengthMismatch {
                            expected,
                            actual,
                        });
                    }
                }
                self.pack_len(actual)?;
                for value in values.iter_mut() {
                    value.pack(self)?;
                }
            }
            Direction::Inbound => {
                let token = self.pack_token(AliasToken::NULL)?;
                if token.is_null() {
                    *slot = None;
                    return Ok(());
                }
                if let Some(seen) =
                    self.aliases.find::<Rc<RefCell<Vec<V>>>>(token)
                {
                    *slot = Some(seen);
                    return Ok(());
                }
                let actual = self.pack_len(0)?;
                if let Some(expected) = declared {
                    if expected != actual {
                        return Err(PackError::LengthMismatch {
                            expected,
                            actual,
                        });
                    }
                }
                let node = Rc::new(RefCell::new(Vec::new()));
                self.aliases.insert(token, Rc::clone(&node));
                {
                    let mut values = node.borrow_mut();
                    values.resize_with(actual, V::default);
                    for value in values.iter_mut() {
                        value.pack(self)?;
                    }
                }
                *slot = Some(node);
            }
        }
        Ok(())
    }

    /// Packs the top-level shared entity of an operation.
    ///
    /// Used at the root of a traversal, where the entity's identity must be
    /// established even though no parent field references it. In this wire
    /// format every shared operation moves its identity token explicitly,
    /// so the root operation shares the interior implementation; entry
    /// points call it so the traversal's top level reads as what it is.
    pub fn pack_root_shared<V>(
        &mut self,
        slot: &mut Option<Rc<RefCell<V>>>,
    ) -> Result<()>
    where
        V: Pack + 'static,
    {
        self.pack_shared(slot)
    }

    /// Array form of [`Session::pack_root_shared`].
    pub fn pack_root_shared_slice<V>(
        &mut self,
        slot: &mut Option<Rc<RefCell<Vec<V>>>>,
        declared: Option<usize>,
    ) -> Result<()>
    where
        V: Pack + 'static,
    {
        self.pack_shared_slice(slot, declared)
    }

    // -----------------------------------------------------------------------
    // Containers
    // -----------------------------------------------------------------------

    /// Packs a dynamic sequence: a length word, then each element in order
    /// by its own declared shape. Inbound, the container is resized to the
    /// transported length before filling.
    pub fn pack_vec<V: Pack>(&mut self, values: &mut Vec<V>) -> Result<()> {
        match T::DIRECTION {
            Direction::Outbound => {
                self.pack_len(values.len())?;
            }
            Direction::Inbound => {
                let len = self.pack_len(0)?;
                values.clear();
                values.resize_with(len, V::default);
            }
        }
        for value in values.iter_mut() {
            value.pack(self)?;
        }
        Ok(())
    }

    /// Packs a dynamic sequence with a caller-supplied element routine,
    /// for element types without an intrinsic declared shape or that need
    /// non-default handling.
    pub fn pack_vec_with<V, F>(
        &mut self,
        values: &mut Vec<V>,
        mut pack_element: F,
    ) -> Result<()>
    where
        V: Default,
        F: FnMut(&mut V, &mut Self) -> Result<()>,
    {
        match T::DIRECTION {
            Direction::Outbound => {
                self.pack_len(values.len())?;
            }
            Direction::Inbound => {
                let len = self.pack_len(0)?;
                values.clear();
                values.resize_with(len, V::default);
            }
        }
        for value in values.iter_mut() {
            pack_element(value, self)?;
        }
        Ok(())
    }

    /// Packs a double-ended queue, same wire shape as [`Session::pack_vec`].
    pub fn pack_deque<V: Pack>(
        &mut self,
        values: &mut VecDeque<V>,
    ) -> Result<()> {
        match T::DIRECTION {
            Direction::Outbound => {
                self.pack_len(values.len())?;
            }
            Direction::Inbound => {
                let len = self.pack_len(0)?;
                values.clear();
                for _ in 0..len {
                    values.push_back(V::default());
                }
            }
        }
        for value in values.iter_mut() {
            value.pack(self)?;
        }
        Ok(())
    }

    /// Packs a string: a length word, then the UTF-8 payload as one block.
    /// The inbound side re-validates the payload.
    pub fn pack_string(&mut self, value: &mut String) -> Result<()> {
        match T::DIRECTION {
            Direction::Outbound => {
                self.pack_len(value.len())?;
                // Outbound transports leave the buffer untouched, so the
                // string's own storage can be lent out and restored.
                let mut bytes = std::mem::take(value).into_bytes();
                let moved = self.pack_plain_slice(&mut bytes[..]);
                *value = String::from_utf8(bytes)
                    .map_err(PackError::InvalidText)?;
                moved
            }
            Direction::Inbound => {
                let len = self.pack_len(0)?;
                let mut bytes = vec![0u8; len];
                self.pack_plain_slice(&mut bytes[..])?;
                *value = String::from_utf8(bytes)
                    .map_err(PackError::InvalidText)?;
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use deepcast_transport::{BufferRead, BufferWrite, NoOp};

    use super::*;

    fn write_to(region: &mut [u8]) -> Session<BufferWrite<'_>> {
        Session::new(BufferWrite::new(region))
    }

    fn read_from(region: &[u8]) -> Session<BufferRead<'_>> {
        Session::new(BufferRead::new(region))
    }

    // =====================================================================
    // Offset bookkeeping
    // =====================================================================

    #[test]
    fn test_offset_counts_every_word() {
        let mut region = [0u8; 64];
        let mut s = write_to(&mut region);
        s.pack_len(3).unwrap();
        s.pack_plain(&mut 7i32).unwrap();
        assert_eq!(s.offset(), 8 + 4);
        assert_eq!(s.finish(), 12);
    }

    #[test]
    fn test_noop_session_counts_without_moving() {
        let mut s = Session::new(NoOp);
        s.pack_plain(&mut 1u64).unwrap();
        s.pack_plain(&mut 2u16).unwrap();
        assert_eq!(s.offset(), 10);
        assert!(s.is_outbound());
    }

    // =====================================================================
    // Leaves and length words
    // =====================================================================

    #[test]
    fn test_plain_round_trip() {
        let mut region = [0u8; 16];
        let mut w = write_to(&mut region);
        w.pack_plain(&mut 0x1234_5678i32).unwrap();
        w.pack_plain(&mut 2.5f64).unwrap();
        let written = w.finish();

        let mut r = read_from(&region[..written]);
        let mut a = 0i32;
        let mut b = 0f64;
        r.pack_plain(&mut a).unwrap();
        r.pack_plain(&mut b).unwrap();
        assert_eq!(a, 0x1234_5678);
        assert_eq!(b, 2.5);
    }

    #[test]
    fn test_len_word_round_trip() {
        let mut region = [0u8; 8];
        let mut w = write_to(&mut region);
        assert_eq!(w.pack_len(42).unwrap(), 42);

        let mut r = read_from(&region);
        assert_eq!(r.pack_len(0).unwrap(), 42);
    }

    // =====================================================================
    // Owned pointers
    // =====================================================================

    #[test]
    fn test_boxed_some_round_trip() {
        let mut region = [0u8; 16];
        let mut w = write_to(&mut region);
        let mut src = Some(Box::new(99u32));
        w.pack_boxed(&mut src).unwrap();
        let written = w.finish();
        assert_eq!(written, 8 + 4);

        let mut r = read_from(&region[..written]);
        let mut dst: Option<Box<u32>> = None;
        r.pack_boxed(&mut dst).unwrap();
        assert_eq!(dst, Some(Box::new(99)));
    }

    #[test]
    fn test_boxed_none_round_trip() {
        let mut region = [0u8; 8];
        let mut w = write_to(&mut region);
        let mut src: Option<Box<u32>> = None;
        w.pack_boxed(&mut src).unwrap();

        let mut r = read_from(&region);
        let mut dst = Some(Box::new(1u32));
        r.pack_boxed(&mut dst).unwrap();
        assert_eq!(dst, None);
    }

    #[test]
    fn test_boxed_is_not_deduplicated() {
        // The same value packed twice costs the payload twice.
        let mut s = Session::new(NoOp);
        let mut a = Some(Box::new(5u64));
        let mut b = Some(Box::new(5u64));
        s.pack_boxed(&mut a).unwrap();
        s.pack_boxed(&mut b).unwrap();
        assert_eq!(s.finish(), 2 * (8 + 8));
    }

    #[test]
    fn test_boxed_slice_declared_length_mismatch() {
        let mut region = [0u8; 64];
        let mut w = write_to(&mut region);
        let mut src: Option<Box<[u16]>> =
            Some(vec![1u16, 2, 3].into_boxed_slice());
        w.pack_boxed_slice(&mut src, None).unwrap();
        let written = w.finish();

        let mut r = read_from(&region[..written]);
        let mut dst: Option<Box<[u16]>> = None;
        let err = r.pack_boxed_slice(&mut dst, Some(5)).unwrap_err();
        match err {
            PackError::LengthMismatch { expected, actual } => {
                assert_eq!(expected, 5);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
        // No partial reconstruction is observable.
        assert!(dst.is_none());
    }

    #[test]
    fn test_boxed_slice_declared_length_accepted() {
        let mut region = [0u8; 64];
        let mut w = write_to(&mut region);
        let mut src: Option<Box<[u16]>> =
            Some(vec![1u16, 2, 3].into_boxed_slice());
        w.pack_boxed_slice(&mut src, Some(3)).unwrap();
        let written = w.finish();

        let mut r = read_from(&region[..written]);
        let mut dst: Option<Box<[u16]>> = None;
        r.pack_boxed_slice(&mut dst, Some(3)).unwrap();
        assert_eq!(dst.as_deref(), Some(&[1u16, 2, 3][..]));
    }

    // =====================================================================
    // Shared pointers
    // =====================================================================

    #[test]
    fn test_shared_round_trip_preserves_identity() {
        let mut region = [0u8; 64];
        let node = Rc::new(RefCell::new(7i32));
        let mut a = Some(Rc::clone(&node));
        let mut b = Some(Rc::clone(&node));

        let mut w = write_to(&mut region);
        w.pack_shared(&mut a).unwrap();
        w.pack_shared(&mut b).unwrap();
        let written = w.finish();
        // token + len + payload, then token only.
        assert_eq!(written, (8 + 8 + 4) + 8);

        let mut r = read_from(&region[..written]);
        let mut a2: Option<Rc<RefCell<i32>>> = None;
        let mut b2: Option<Rc<RefCell<i32>>> = None;
        r.pack_shared(&mut a2).unwrap();
        r.pack_shared(&mut b2).unwrap();

        let a2 = a2.unwrap();
        let b2 = b2.unwrap();
        assert!(Rc::ptr_eq(&a2, &b2));
        assert_eq!(*a2.borrow(), 7);
    }

    #[test]
    fn test_distinct_sources_stay_distinct() {
        let mut region = [0u8; 64];
        let mut a = Some(Rc::new(RefCell::new(1i32)));
        let mut b = Some(Rc::new(RefCell::new(1i32)));

        let mut w = write_to(&mut region);
        w.pack_shared(&mut a).unwrap();
        w.pack_shared(&mut b).unwrap();
        let written = w.finish();

        let mut r = read_from(&region[..written]);
        let mut a2: Option<Rc<RefCell<i32>>> = None;
        let mut b2: Option<Rc<RefCell<i32>>> = None;
        r.pack_shared(&mut a2).unwrap();
        r.pack_shared(&mut b2).unwrap();
        assert!(!Rc::ptr_eq(&a2.unwrap(), &b2.unwrap()));
    }

    #[test]
    fn test_shared_none_round_trip() {
        let mut region = [0u8; 8];
        let mut src: Option<Rc<RefCell<i32>>> = None;
        let mut w = write_to(&mut region);
        w.pack_shared(&mut src).unwrap();
        assert_eq!(w.finish(), 8);

        let mut r = read_from(&region);
        let mut dst = Some(Rc::new(RefCell::new(3i32)));
        r.pack_shared(&mut dst).unwrap();
        assert!(dst.is_none());
    }

    #[test]
    fn test_shared_slice_round_trip() {
        let mut region = [0u8; 64];
        let node = Rc::new(RefCell::new(vec![10i16, 20, 30]));
        let mut src = Some(Rc::clone(&node));

        let mut w = write_to(&mut region);
        w.pack_shared_slice(&mut src, Some(3)).unwrap();
        let written = w.finish();

        let mut r = read_from(&region[..written]);
        let mut dst: Option<Rc<RefCell<Vec<i16>>>> = None;
        r.pack_shared_slice(&mut dst, Some(3)).unwrap();
        assert_eq!(*dst.unwrap().borrow(), vec![10, 20, 30]);
    }

    // =====================================================================
    // Containers
    // =====================================================================

    #[test]
    fn test_vec_round_trip() {
        let mut region = [0u8; 64];
        let mut src = vec![4i32, 9, -2];
        let mut w = write_to(&mut region);
        w.pack_vec(&mut src).unwrap();
        let written = w.finish();
        assert_eq!(written, 8 + 3 * 4);

        let mut r = read_from(&region[..written]);
        let mut dst: Vec<i32> = Vec::new();
        r.pack_vec(&mut dst).unwrap();
        assert_eq!(dst, vec![4, 9, -2]);
    }

    #[test]
    fn test_vec_with_custom_element_routine() {
        let mut region = [0u8; 64];
        // Elements are owned pointers: no intrinsic flat shape, so the
        // caller supplies the routine.
        let mut src = vec![Some(Box::new(1u8)), None, Some(Box::new(3u8))];
        let mut w = write_to(&mut region);
        w.pack_vec_with(&mut src, |slot, session| session.pack_boxed(slot))
            .unwrap();
        let written = w.finish();

        let mut r = read_from(&region[..written]);
        let mut dst: Vec<Option<Box<u8>>> = Vec::new();
        r.pack_vec_with(&mut dst, |slot, session| session.pack_boxed(slot))
            .unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_deque_round_trip() {
        let mut region = [0u8; 64];
        let mut src: VecDeque<u32> = [5u32, 6, 7].into_iter().collect();
        let mut w = write_to(&mut region);
        w.pack_deque(&mut src).unwrap();
        let written = w.finish();

        let mut r = read_from(&region[..written]);
        let mut dst: VecDeque<u32> = VecDeque::new();
        r.pack_deque(&mut dst).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn test_string_round_trip() {
        let mut region = [0u8; 64];
        let mut src = String::from("deep copy");
        let mut w = write_to(&mut region);
        w.pack_string(&mut src).unwrap();
        let written = w.finish();
        assert_eq!(written, 8 + 9);
        // Outbound packing leaves the source untouched.
        assert_eq!(src, "deep copy");

        let mut r = read_from(&region[..written]);
        let mut dst = String::new();
        r.pack_string(&mut dst).unwrap();
        assert_eq!(dst, "deep copy");
    }

    #[test]
    fn test_string_rejects_invalid_utf8() {
        let mut region = [0u8; 16];
        let mut w = write_to(&mut region);
        w.pack_len(2).unwrap();
        w.pack_plain_slice(&mut [0xffu8, 0xfe]).unwrap();
        let written = w.offset();

        let mut r = read_from(&region[..written]);
        let mut dst = String::new();
        assert!(matches!(
            r.pack_string(&mut dst),
            Err(PackError::InvalidText(_))
        ));
    }

    #[test]
    fn test_empty_containers_round_trip() {
        let mut region = [0u8; 32];
        let mut w = write_to(&mut region);
        w.pack_vec(&mut Vec::<i64>::new()).unwrap();
        w.pack_string(&mut String::new()).unwrap();
        let written = w.finish();
        assert_eq!(written, 16);

        let mut r = read_from(&region[..written]);
        let mut v = vec![1i64, 2];
        let mut s = String::from("stale");
        r.pack_vec(&mut v).unwrap();
        r.pack_string(&mut s).unwrap();
        assert!(v.is_empty());
        assert!(s.is_empty());
    }
}
