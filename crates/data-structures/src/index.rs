//! Index types.

pub use index_vec::{Idx, IndexSlice, IndexVec, index_vec};

#[doc(hidden)]
pub use index_vec::define_index_type as __define_index_type;

/// Declares `u32`-backed index newtypes usable as [`IndexVec`] keys.
///
/// # Examples
///
/// ```
/// use contrail_data_structures::{index::IndexVec, newtype_index};
///
/// newtype_index! {
///     /// A node ID.
///     pub struct NodeId;
/// }
///
/// let mut nodes = IndexVec::<NodeId, &str>::new();
/// let id = nodes.push("root");
/// assert_eq!(nodes[id], "root");
/// ```
#[macro_export]
macro_rules! newtype_index {
    ($($(#[$attr:meta])* $vis:vis struct $name:ident;)*) => {$(
        $crate::index::__define_index_type! {
            $(#[$attr])*
            $vis struct $name = u32;
        }
    )*};
}

#[cfg(test)]
mod tests {
    use super::*;

    newtype_index! {
        struct TestId;
        struct OtherId;
    }

    #[test]
    fn push_and_enumerate() {
        let mut v = IndexVec::<TestId, u8>::new();
        let a = v.push(1);
        let b = v.push(2);
        assert_ne!(a, b);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        let collected = v.iter_enumerated().map(|(id, &x)| (id.index(), x)).collect::<Vec<_>>();
        assert_eq!(collected, [(0, 1), (1, 2)]);
        assert_eq!(OtherId::from_usize(3).index(), 3);
    }
}
