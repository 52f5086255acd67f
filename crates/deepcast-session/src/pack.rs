//! Type classification: which packing strategy applies to which type.
//!
//! The engine never inspects a value at runtime to decide how to move it —
//! classification is a property of the static type, resolved once per call
//! site by ordinary trait dispatch. [`Pack`] is the single surface:
//!
//! - Self-describing composites opt in by implementing it and walking their
//!   fields against the session. The one method serves write, read, and
//!   size traversals alike.
//! - Plain scalars move as raw bytes.
//! - `Option<Box<V>>` is the owned nullable pointer, `Option<Box<[V]>>` the
//!   owned nullable array, `Option<Rc<RefCell<V>>>` the shared nullable
//!   pointer (deduplicated through the session's alias map).
//! - `Vec`, `VecDeque`, and `String` are the dynamic containers.
//!
//! A second capability, [`Plain`], marks types whose in-memory byte image
//! is the wire image. User composites with no indirection can derive the
//! zerocopy traits and move through [`Session::pack_plain`] as one block
//! instead of field by field.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use deepcast_transport::Transport;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::error::Result;
use crate::session::Session;

/// Values whose native byte image can be moved directly.
///
/// Blanket-implemented for everything satisfying the zerocopy layout
/// traits: the fixed-width integers and floats, and any user type deriving
/// `FromBytes + IntoBytes + Immutable + KnownLayout`.
pub trait Plain: FromBytes + IntoBytes + Immutable + KnownLayout {}

impl<T: FromBytes + IntoBytes + Immutable + KnownLayout> Plain for T {}

/// A type that declares its own traversal shape.
///
/// Reconstruction always targets a freshly default-constructed destination,
/// hence the `Default` supertrait.
pub trait Pack: Default {
    /// Walks this value against `session`, writing or reading depending on
    /// the session's direction.
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()>;
}

macro_rules! impl_plain_pack {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Pack for $ty {
                fn pack<T: Transport>(
                    &mut self,
                    session: &mut Session<T>,
                ) -> Result<()> {
                    session.pack_plain(self)
                }
            }
        )*
    };
}

impl_plain_pack!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, f32, f64);

/// `bool` moves as one byte; any nonzero inbound byte reads as `true`.
impl Pack for bool {
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
        let mut byte = *self as u8;
        session.pack_plain(&mut byte)?;
        *self = byte != 0;
        Ok(())
    }
}

impl Pack for String {
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
        session.pack_string(self)
    }
}

impl<V: Pack> Pack for Vec<V> {
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
        session.pack_vec(self)
    }
}

impl<V: Pack> Pack for VecDeque<V> {
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
        session.pack_deque(self)
    }
}

/// Fixed-size arrays pack element by element, no length word.
impl<V: Pack, const N: usize> Pack for [V; N]
where
    [V; N]: Default,
{
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
        for value in self.iter_mut() {
            value.pack(session)?;
        }
        Ok(())
    }
}

/// A non-nullable owned pointer is transparent: only the payload moves.
impl<V: Pack> Pack for Box<V> {
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
        (**self).pack(session)
    }
}

impl<V: Pack> Pack for Option<Box<V>> {
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
        session.pack_boxed(self)
    }
}

impl<V: Pack> Pack for Option<Box<[V]>> {
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
        session.pack_boxed_slice(self, None)
    }
}

impl<V: Pack + 'static> Pack for Option<Rc<RefCell<V>>> {
    fn pack<T: Transport>(&mut self, session: &mut Session<T>) -> Result<()> {
        session.pack_shared(self)
    }
}

#[cfg(test)]
mod tests {
    use deepcast_transport::{BufferRead, BufferWrite};

    use super::*;

    /// A composite with one declared shape reused by write, read, and size.
    #[derive(Debug, Default, PartialEq)]
    struct Record {
        id: u64,
        name: String,
        readings: Vec<f32>,
        follow_up: Option<Box<Record>>,
    }

    impl Pack for Record {
        fn pack<T: Transport>(
            &mut self,
            session: &mut Session<T>,
        ) -> Result<()> {
            session.pack_plain(&mut self.id)?;
            session.pack_string(&mut self.name)?;
            session.pack_vec(&mut self.readings)?;
            session.pack_boxed(&mut self.follow_up)
        }
    }

    fn round_trip<V: Pack>(src: &mut V) -> V {
        let mut region = vec![0u8; 512];
        let mut w = Session::new(BufferWrite::new(&mut region));
        src.pack(&mut w).unwrap();
        let written = w.finish();

        let mut r = Session::new(BufferRead::new(&region[..written]));
        let mut dst = V::default();
        dst.pack(&mut r).unwrap();
        dst
    }

    #[test]
    fn test_scalar_impls_round_trip() {
        assert_eq!(round_trip(&mut 250u8), 250);
        assert_eq!(round_trip(&mut -40_000i32), -40_000);
        assert_eq!(round_trip(&mut 1.25f64), 1.25);
        assert_eq!(round_trip(&mut u128::MAX), u128::MAX);
    }

    #[test]
    fn test_bool_round_trip() {
        assert!(round_trip(&mut true));
        assert!(!round_trip(&mut false));
    }

    #[test]
    fn test_fixed_array_round_trip() {
        let mut src = [3u16, 1, 4, 1, 5];
        assert_eq!(round_trip(&mut src), [3, 1, 4, 1, 5]);
    }

    #[test]
    fn test_nested_composite_round_trip() {
        let mut src = Record {
            id: 11,
            name: "outer".into(),
            readings: vec![0.5, -0.5],
            follow_up: Some(Box::new(Record {
                id: 12,
                name: "inner".into(),
                readings: Vec::new(),
                follow_up: None,
            })),
        };
        let dst = round_trip(&mut src);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_vec_of_composites_round_trip() {
        let mut src = vec![
            Record {
                id: 1,
                name: "a".into(),
                readings: vec![1.0],
                follow_up: None,
            },
            Record::default(),
        ];
        let dst = round_trip(&mut src);
        assert_eq!(dst, src);
    }

    #[test]
    fn test_owned_slice_option_round_trip() {
        let mut src: Option<Box<[u8]>> =
            Some(vec![1u8, 2, 3].into_boxed_slice());
        assert_eq!(round_trip(&mut src), src);

        let mut none: Option<Box<[u8]>> = None;
        assert_eq!(round_trip(&mut none), None);
    }

    #[test]
    fn test_derived_plain_composite_moves_as_one_block() {
        use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

        #[derive(
            Debug,
            Default,
            Clone,
            Copy,
            PartialEq,
            FromBytes,
            IntoBytes,
            Immutable,
            KnownLayout,
        )]
        #[repr(C)]
        struct Extent {
            rows: u32,
            cols: u32,
        }

        let mut region = [0u8; 8];
        let mut w = Session::new(BufferWrite::new(&mut region));
        w.pack_plain(&mut Extent { rows: 3, cols: 4 }).unwrap();
        assert_eq!(w.finish(), 8);

        let mut r = Session::new(BufferRead::new(&region));
        let mut dst = Extent::default();
        r.pack_plain(&mut dst).unwrap();
        assert_eq!(dst, Extent { rows: 3, cols: 4 });
    }
}
