#[cfg(feature = "std-hash")]
pub mod map {
    pub use std::collections::{HashMap, HashSet};
    pub type OrderedSet<K> = indexmap::IndexSet<K>;
}

#[cfg(not(feature = "std-hash"))]
pub mod map {
    pub type HashMap<K, V> = hashbrown::HashMap<K, V, ahash::RandomState>;
    pub type HashSet<K> = hashbrown::HashSet<K, ahash::RandomState>;
    pub type OrderedSet<K> = indexmap::IndexSet<K, ahash::RandomState>;
}
