//! Ordered map and set collections backed by a treap.
//!
//! A treap is a binary search tree where each node additionally carries a randomly drawn
//! priority and the tree maintains the max-heap property over those priorities. The random
//! priorities keep the expected height of the tree proportional to the logarithm of the number
//! of keys without any explicit rebalancing bookkeeping.
//!
//! Nodes live in an index-addressed arena, so parent back-references are plain copyable
//! handles instead of owning pointers and the crate contains no unsafe code.

extern crate rand;
extern crate serde;
#[macro_use]
extern crate serde_derive;

mod entry;
pub mod arena;
pub mod treap;
