//! Map types.
//!
//! Everything is hashed with [`FxHasher`]: keys are small ids and interned symbols, so HashDoS
//! resistance is not a concern.

use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};

pub use rustc_hash::{FxBuildHasher, FxHasher};

/// A [`HashMap`] using [`FxHasher`] as its hasher.
pub type FxHashMap<K, V> = HashMap<K, V, FxBuildHasher>;
/// A [`HashSet`] using [`FxHasher`] as its hasher.
pub type FxHashSet<V> = HashSet<V, FxBuildHasher>;
/// An insertion-ordered [`IndexMap`] using [`FxHasher`] as its hasher.
pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
/// An insertion-ordered [`IndexSet`] using [`FxHasher`] as its hasher.
pub type FxIndexSet<V> = IndexSet<V, FxBuildHasher>;

/// [`FxIndexMap`] entry type.
pub type IndexEntry<'a, K, V> = indexmap::map::Entry<'a, K, V>;
