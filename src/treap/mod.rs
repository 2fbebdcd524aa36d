//! Probabilistic binary search tree where each node also maintains the heap invariant.

mod map;
mod node;
mod set;
mod tree;

pub use self::map::{TreapMap, TreapMapIntoIter, TreapMapIter};
pub use self::set::{TreapSet, TreapSetIntoIter, TreapSetIter};
