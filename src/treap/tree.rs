use crate::arena::{Arena, Id};
use crate::entry::Entry;
use crate::treap::node::Node;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

pub type Tree = Option<Id>;

/// Rotates `id` into the position of its parent, which must be the root or an interior node
/// with `id` as its left child. The rotation relinks exactly five references: the parent's
/// former parent link (or the root pointer), the two links between `id` and its parent, and the
/// two links adopting `id`'s former right subtree as the parent's new left subtree. Subtree key
/// order is preserved by construction.
pub fn rotate_right<T, U>(arena: &mut Arena<Node<T, U>>, root: &mut Tree, id: Id) {
    let parent_id = match arena[id].parent {
        Some(parent_id) => parent_id,
        None => unreachable!(),
    };
    let grandparent_id = arena[parent_id].parent;
    let child = arena[id].right;

    arena[parent_id].left = child;
    if let Some(child_id) = child {
        arena[child_id].parent = Some(parent_id);
    }

    arena[id].right = Some(parent_id);
    arena[parent_id].parent = Some(id);

    arena[id].parent = grandparent_id;
    match grandparent_id {
        Some(grandparent_id) => {
            if arena[grandparent_id].left == Some(parent_id) {
                arena[grandparent_id].left = Some(id);
            } else {
                arena[grandparent_id].right = Some(id);
            }
        }
        None => *root = Some(id),
    }
}

/// The mirror image of `rotate_right` for when `id` is its parent's right child.
pub fn rotate_left<T, U>(arena: &mut Arena<Node<T, U>>, root: &mut Tree, id: Id) {
    let parent_id = match arena[id].parent {
        Some(parent_id) => parent_id,
        None => unreachable!(),
    };
    let grandparent_id = arena[parent_id].parent;
    let child = arena[id].left;

    arena[parent_id].right = child;
    if let Some(child_id) = child {
        arena[child_id].parent = Some(parent_id);
    }

    arena[id].left = Some(parent_id);
    arena[parent_id].parent = Some(id);

    arena[id].parent = grandparent_id;
    match grandparent_id {
        Some(grandparent_id) => {
            if arena[grandparent_id].left == Some(parent_id) {
                arena[grandparent_id].left = Some(id);
            } else {
                arena[grandparent_id].right = Some(id);
            }
        }
        None => *root = Some(id),
    }
}

pub fn find<T, U, V>(arena: &Arena<Node<T, U>>, root: Tree, key: &V) -> Option<Id>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = root;
    while let Some(id) = curr {
        let node = &arena[id];
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => curr = node.left,
            Ordering::Greater => curr = node.right,
            Ordering::Equal => return Some(id),
        }
    }
    None
}

/// Inserts a new entry with the given priority, or replaces the entry of an existing key
/// without any structural change. After attaching a new leaf, the heap invariant is restored by
/// rotating the leaf upward while its priority strictly exceeds its parent's priority. Equal
/// priorities do not rotate, so accidental ties terminate the walk.
pub fn insert<T, U>(
    arena: &mut Arena<Node<T, U>>,
    root: &mut Tree,
    key: T,
    value: U,
    priority: u32,
) -> Option<Entry<T, U>>
where
    T: Ord,
{
    let mut parent = None;
    let mut curr = *root;
    while let Some(id) = curr {
        match key.cmp(&arena[id].entry.key) {
            Ordering::Less => {
                parent = Some((id, Ordering::Less));
                curr = arena[id].left;
            }
            Ordering::Greater => {
                parent = Some((id, Ordering::Greater));
                curr = arena[id].right;
            }
            Ordering::Equal => {
                return Some(mem::replace(&mut arena[id].entry, Entry { key, value }));
            }
        }
    }

    let mut new_node = Node::new(key, value, priority);
    new_node.parent = parent.map(|(parent_id, _)| parent_id);
    let id = arena.allocate(new_node);
    match parent {
        Some((parent_id, Ordering::Less)) => arena[parent_id].left = Some(id),
        Some((parent_id, _)) => arena[parent_id].right = Some(id),
        None => *root = Some(id),
    }

    while let Some(parent_id) = arena[id].parent {
        if arena[id].priority <= arena[parent_id].priority {
            break;
        }
        if arena[parent_id].left == Some(id) {
            rotate_right(arena, root, id);
        } else {
            rotate_left(arena, root, id);
        }
    }
    None
}

/// Removes the entry for `key`, if present. The matching node is first rotated downward in the
/// direction of its larger-priority child until it has at most one child, which keeps the heap
/// invariant intact everywhere above it, and is then spliced out and freed.
pub fn remove<T, U, V>(arena: &mut Arena<Node<T, U>>, root: &mut Tree, key: &V) -> Option<Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let id = find(arena, *root, key)?;

    while let (Some(left_id), Some(right_id)) = (arena[id].left, arena[id].right) {
        if arena[right_id].priority >= arena[left_id].priority {
            rotate_left(arena, root, right_id);
        } else {
            rotate_right(arena, root, left_id);
        }
    }

    let child = arena[id].left.or(arena[id].right);
    let parent = arena[id].parent;
    if let Some(child_id) = child {
        arena[child_id].parent = parent;
    }
    match parent {
        Some(parent_id) => {
            if arena[parent_id].left == Some(id) {
                arena[parent_id].left = child;
            } else {
                arena[parent_id].right = child;
            }
        }
        None => *root = child,
    }
    Some(arena.free(id).entry)
}

pub fn min<T, U>(arena: &Arena<Node<T, U>>, root: Tree) -> Option<&Entry<T, U>> {
    let mut curr = root?;
    while let Some(left_id) = arena[curr].left {
        curr = left_id;
    }
    Some(&arena[curr].entry)
}

pub fn max<T, U>(arena: &Arena<Node<T, U>>, root: Tree) -> Option<&Entry<T, U>> {
    let mut curr = root?;
    while let Some(right_id) = arena[curr].right {
        curr = right_id;
    }
    Some(&arena[curr].entry)
}

pub fn ceil<'a, T, U, V>(arena: &'a Arena<Node<T, U>>, root: Tree, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = root;
    let mut successor = None;
    while let Some(id) = curr {
        let node = &arena[id];
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Greater => curr = node.right,
            Ordering::Less => {
                successor = Some(id);
                curr = node.left;
            }
            Ordering::Equal => return Some(&node.entry),
        }
    }
    successor.map(|id| &arena[id].entry)
}

pub fn floor<'a, T, U, V>(arena: &'a Arena<Node<T, U>>, root: Tree, key: &V) -> Option<&'a Entry<T, U>>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    let mut curr = root;
    let mut predecessor = None;
    while let Some(id) = curr {
        let node = &arena[id];
        match key.cmp(node.entry.key.borrow()) {
            Ordering::Less => curr = node.left,
            Ordering::Greater => {
                predecessor = Some(id);
                curr = node.right;
            }
            Ordering::Equal => return Some(&node.entry),
        }
    }
    predecessor.map(|id| &arena[id].entry)
}

/// Verifies that every key lies strictly between the open bounds inherited from its ancestors.
/// Used by tests only; the mutating operations uphold this by construction.
#[cfg(test)]
pub fn is_bst<T, U>(arena: &Arena<Node<T, U>>, root: Tree) -> bool
where
    T: Ord,
{
    fn check<'a, T, U>(
        arena: &'a Arena<Node<T, U>>,
        tree: Tree,
        low: Option<&'a T>,
        high: Option<&'a T>,
    ) -> bool
    where
        T: Ord,
    {
        match tree {
            Some(id) => {
                let node = &arena[id];
                let key = &node.entry.key;
                if low.map_or(false, |low| key <= low) {
                    return false;
                }
                if high.map_or(false, |high| key >= high) {
                    return false;
                }
                check(arena, node.left, low, Some(key)) && check(arena, node.right, Some(key), high)
            }
            None => true,
        }
    }
    check(arena, root, None, None)
}

/// Verifies that every node's priority is greater than or equal to the priorities of its
/// children. Used by tests only.
#[cfg(test)]
pub fn is_heap<T, U>(arena: &Arena<Node<T, U>>, root: Tree) -> bool {
    match root {
        Some(id) => {
            let node = &arena[id];
            let left_ok = node
                .left
                .map_or(true, |left_id| node.priority >= arena[left_id].priority);
            let right_ok = node
                .right
                .map_or(true, |right_id| node.priority >= arena[right_id].priority);
            left_ok && right_ok && is_heap(arena, node.left) && is_heap(arena, node.right)
        }
        None => true,
    }
}

/// Verifies that every child's parent back-reference points at the node that links to it and
/// that the root has no parent. Used by tests only.
#[cfg(test)]
pub fn is_consistent<T, U>(arena: &Arena<Node<T, U>>, root: Tree) -> bool {
    fn check<T, U>(arena: &Arena<Node<T, U>>, tree: Tree, parent: Option<Id>) -> bool {
        match tree {
            Some(id) => {
                let node = &arena[id];
                node.parent == parent
                    && check(arena, node.left, Some(id))
                    && check(arena, node.right, Some(id))
            }
            None => true,
        }
    }
    check(arena, root, None)
}

#[cfg(test)]
mod tests {
    use super::{is_bst, is_consistent, is_heap, rotate_left, rotate_right, Tree};
    use crate::arena::{Arena, Id};
    use crate::treap::node::Node;

    fn link_left(arena: &mut Arena<Node<u32, u32>>, parent: Id, child: Id) {
        arena[parent].left = Some(child);
        arena[child].parent = Some(parent);
    }

    fn link_right(arena: &mut Arena<Node<u32, u32>>, parent: Id, child: Id) {
        arena[parent].right = Some(child);
        arena[child].parent = Some(parent);
    }

    #[test]
    fn test_rotate_right_at_root() {
        //     4            2
        //    /            / \
        //   2      ->    1   4
        //  / \              /
        // 1   3            3
        let mut arena = Arena::new();
        let n4 = arena.allocate(Node::new(4, 0, 10));
        let n2 = arena.allocate(Node::new(2, 0, 20));
        let n1 = arena.allocate(Node::new(1, 0, 5));
        let n3 = arena.allocate(Node::new(3, 0, 4));
        link_left(&mut arena, n4, n2);
        link_left(&mut arena, n2, n1);
        link_right(&mut arena, n2, n3);

        let mut root: Tree = Some(n4);
        rotate_right(&mut arena, &mut root, n2);

        assert_eq!(root, Some(n2));
        assert_eq!(arena[n2].parent, None);
        assert_eq!(arena[n2].left, Some(n1));
        assert_eq!(arena[n2].right, Some(n4));
        assert_eq!(arena[n4].left, Some(n3));
        assert_eq!(arena[n3].parent, Some(n4));
        assert!(is_consistent(&arena, root));
        assert!(is_bst(&arena, root));
        assert!(is_heap(&arena, root));
    }

    #[test]
    fn test_rotate_left_under_grandparent() {
        //   g              g
        //    \              \
        //     p      ->      n
        //      \            /
        //       n          p
        let mut arena = Arena::new();
        let g = arena.allocate(Node::new(0, 0, 30));
        let p = arena.allocate(Node::new(1, 0, 20));
        let n = arena.allocate(Node::new(2, 0, 25));
        link_right(&mut arena, g, p);
        link_right(&mut arena, p, n);

        let mut root: Tree = Some(g);
        rotate_left(&mut arena, &mut root, n);

        assert_eq!(root, Some(g));
        assert_eq!(arena[g].right, Some(n));
        assert_eq!(arena[n].parent, Some(g));
        assert_eq!(arena[n].left, Some(p));
        assert_eq!(arena[p].parent, Some(n));
        assert_eq!(arena[p].right, None);
        assert!(is_consistent(&arena, root));
        assert!(is_bst(&arena, root));
    }

    #[test]
    fn test_rotation_preserves_key_order() {
        let mut arena = Arena::new();
        let n5 = arena.allocate(Node::new(5, 0, 10));
        let n3 = arena.allocate(Node::new(3, 0, 20));
        let n1 = arena.allocate(Node::new(1, 0, 5));
        let n4 = arena.allocate(Node::new(4, 0, 4));
        link_left(&mut arena, n5, n3);
        link_left(&mut arena, n3, n1);
        link_right(&mut arena, n3, n4);

        let mut root: Tree = Some(n5);
        assert!(is_bst(&arena, root));
        rotate_right(&mut arena, &mut root, n3);
        assert!(is_bst(&arena, root));
        assert!(is_heap(&arena, root));
        assert!(is_consistent(&arena, root));
    }
}
