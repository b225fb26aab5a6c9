//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;

/// SmallVec sized for a tensor cell coordinate (tensors rarely exceed 4 dimensions).
pub type CellIndex = SmallVec<[usize; 4]>;
