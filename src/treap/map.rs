use crate::arena::{Arena, Id};
use crate::entry::Entry;
use crate::treap::node::Node;
use crate::treap::tree::{self, Tree};
use rand::{Rng, XorShiftRng};
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

/// An ordered map implemented using a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property.
/// Each node has a key, a value, and a priority. The key of any node is greater than all keys in
/// its left subtree and less than all keys in its right subtree. The priority of a node is
/// greater than or equal to the priority of all nodes in its subtrees. By randomly generating
/// priorities, the expected height of the tree is proportional to the logarithm of the number of
/// keys.
///
/// Nodes are stored in an arena and linked by copyable handles, including a parent
/// back-reference, so all mutating operations are iterative pointer walks whose stack usage is
/// independent of the order in which keys were inserted.
///
/// # Examples
///
/// ```
/// use treap_collections::treap::TreapMap;
///
/// let mut map = TreapMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
pub struct TreapMap<T, U, R = XorShiftRng> {
    arena: Arena<Node<T, U>>,
    root: Tree,
    rng: R,
}

impl<T, U> TreapMap<T, U> {
    /// Constructs a new, empty `TreapMap<T, U>` that draws priorities from a `XorShiftRng`
    /// seeded with operating system entropy.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::new();
    /// ```
    pub fn new() -> Self {
        TreapMap {
            arena: Arena::new(),
            root: None,
            rng: rand::weak_rng(),
        }
    }
}

impl<T, U, R> TreapMap<T, U, R> {
    /// Constructs a new, empty `TreapMap<T, U, R>` that draws priorities from `rng`. Supplying
    /// a seeded generator reproduces the exact same tree shape for the same sequence of
    /// operations.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{SeedableRng, XorShiftRng};
    /// use treap_collections::treap::TreapMap;
    ///
    /// let rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    /// let mut map = TreapMap::with_rng(rng);
    /// map.insert(1, 2);
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn with_rng(rng: R) -> Self {
        TreapMap {
            arena: Arena::new(),
            root: None,
            rng,
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, it will
    /// return and replace the old key-value pair without changing the shape of the tree.
    /// Otherwise the new node is created with a freshly drawn priority and rotated upward until
    /// the heap property is restored.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)>
    where
        T: Ord,
        R: Rng,
    {
        let TreapMap {
            ref mut arena,
            ref mut root,
            ref mut rng,
        } = self;
        let priority = rng.next_u32();
        tree::insert(arena, root, key, value, priority).map(|entry| {
            let Entry { key, value } = entry;
            (key, value)
        })
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None` and the map is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let TreapMap {
            ref mut arena,
            ref mut root,
            ..
        } = self;
        tree::remove(arena, root, key).map(|entry| {
            let Entry { key, value } = entry;
            (key, value)
        })
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::find(&self.arena, self.root, key).is_some()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let id = tree::find(&self.arena, self.root, key)?;
        Some(&self.arena[id].entry.value)
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let id = tree::find(&self.arena, self.root, key)?;
        Some(&mut self.arena[id].entry.value)
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let map: TreapMap<u32, u32> = TreapMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Clears the map, removing all entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.arena, self.root).map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.arena, self.root).map(|entry| &entry.key)
    }

    /// Returns the smallest key in the map that is greater than or equal to a particular key.
    /// Returns `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::ceil(&self.arena, self.root, key).map(|entry| &entry.key)
    }

    /// Returns the largest key in the map that is less than or equal to a particular key.
    /// Returns `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        tree::floor(&self.arena, self.root, key).map(|entry| &entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal, so the keys are produced in ascending order. The iterator has no side effects
    /// and may be restarted by calling `iter` again.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapMap;
    ///
    /// let mut map = TreapMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&3, &3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreapMapIter<'_, T, U> {
        TreapMapIter {
            arena: &self.arena,
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<T, U, R> IntoIterator for TreapMap<T, U, R> {
    type IntoIter = TreapMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        TreapMapIntoIter {
            arena: self.arena,
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U, R> IntoIterator for &'a TreapMap<T, U, R>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = TreapMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `TreapMap<T, U, R>`.
///
/// This iterator traverses the entries of the map in-order, freeing each node as it is yielded.
pub struct TreapMapIntoIter<T, U> {
    arena: Arena<Node<T, U>>,
    current: Tree,
    stack: Vec<Id>,
}

impl<T, U> Iterator for TreapMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = self.arena[id].left;
        }
        self.stack.pop().map(|id| {
            let node = self.arena.free(id);
            self.current = node.right;
            let Entry { key, value } = node.entry;
            (key, value)
        })
    }
}

/// An iterator for `TreapMap<T, U, R>`.
///
/// This iterator traverses the entries of the map in-order and yields immutable references.
pub struct TreapMapIter<'a, T, U> {
    arena: &'a Arena<Node<T, U>>,
    current: Tree,
    stack: Vec<Id>,
}

impl<'a, T, U> Iterator for TreapMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.current {
            self.stack.push(id);
            self.current = self.arena[id].left;
        }
        self.stack.pop().map(|id| {
            let node = &self.arena[id];
            self.current = node.right;
            (&node.entry.key, &node.entry.value)
        })
    }
}

impl<T, U> Default for TreapMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, U, R, V> Index<&'a V> for TreapMap<T, U, R>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, R, V> IndexMut<&'a V> for TreapMap<T, U, R>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

impl<T, U, R> fmt::Debug for TreapMap<T, U, R>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T, U, R> PartialEq for TreapMap<T, U, R>
where
    T: PartialEq,
    U: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(lhs, rhs)| lhs == rhs)
    }
}

impl<T, U, R> Eq for TreapMap<T, U, R>
where
    T: Eq,
    U: Eq,
{
}

impl<T, U, R> Serialize for TreapMap<T, U, R>
where
    T: Serialize,
    U: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct TreapMapVisitor<T, U> {
    marker: PhantomData<TreapMap<T, U>>,
}

impl<'de, T, U> Visitor<'de> for TreapMapVisitor<T, U>
where
    T: Ord + Deserialize<'de>,
    U: Deserialize<'de>,
{
    type Value = TreapMap<T, U>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut map = TreapMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, T, U> Deserialize<'de> for TreapMap<T, U>
where
    T: Ord + Deserialize<'de>,
    U: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TreapMapVisitor {
            marker: PhantomData,
        })
    }
}
