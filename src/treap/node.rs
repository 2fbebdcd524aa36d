use crate::arena::Id;
use crate::entry::Entry;

/// A struct representing an internal node of a treap.
///
/// All links are arena handles. The parent link is a non-owning back-reference used by the
/// rotation bookkeeping and never for lifetime control.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub priority: u32,
    pub parent: Option<Id>,
    pub left: Option<Id>,
    pub right: Option<Id>,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U, priority: u32) -> Self {
        Node {
            entry: Entry { key, value },
            priority,
            parent: None,
            left: None,
            right: None,
        }
    }
}
