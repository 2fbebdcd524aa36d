use crate::treap::map::{TreapMap, TreapMapIntoIter, TreapMapIter};
use rand::{Rng, XorShiftRng};
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;

/// An ordered set implemented using a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property.
/// Each node has a key, a value, and a priority. The key of any node is greater than all keys in
/// its left subtree and less than all keys in its right subtree. The priority of a node is
/// greater than or equal to the priority of all nodes in its subtrees. By randomly generating
/// priorities, the expected height of the tree is proportional to the logarithm of the number of
/// keys.
///
/// # Examples
///
/// ```
/// use treap_collections::treap::TreapSet;
///
/// let mut set = TreapSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct TreapSet<T, R = XorShiftRng> {
    map: TreapMap<T, (), R>,
}

impl<T> TreapSet<T> {
    /// Constructs a new, empty `TreapSet<T>` that draws priorities from a `XorShiftRng` seeded
    /// with operating system entropy.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapSet;
    ///
    /// let set: TreapSet<u32> = TreapSet::new();
    /// ```
    pub fn new() -> Self {
        TreapSet {
            map: TreapMap::new(),
        }
    }
}

impl<T, R> TreapSet<T, R> {
    /// Constructs a new, empty `TreapSet<T, R>` that draws priorities from `rng`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::{SeedableRng, XorShiftRng};
    /// use treap_collections::treap::TreapSet;
    ///
    /// let rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
    /// let mut set = TreapSet::with_rng(rng);
    /// set.insert(1);
    /// assert!(set.contains(&1));
    /// ```
    pub fn with_rng(rng: R) -> Self {
        TreapSet {
            map: TreapMap::with_rng(rng),
        }
    }

    /// Inserts a key into the set. If the key already exists in the set, it will return and
    /// replace the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// assert_eq!(set.insert(1), None);
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Some(1));
    /// ```
    pub fn insert(&mut self, key: T) -> Option<T>
    where
        T: Ord,
        R: Rng,
    {
        self.map.insert(key, ()).map(|pair| pair.0)
    }

    /// Removes a key from the set. If the key exists in the set, it will return the associated
    /// key. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.remove(key).map(|pair| pair.0)
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapSet;
    ///
    /// let set: TreapSet<u32> = TreapSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Clears the set, removing all keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.map.min()
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.map.max()
    }

    /// Returns the smallest key in the set that is greater than or equal to a particular key.
    /// Returns `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.ceil(key)
    }

    /// Returns the largest key in the set that is less than or equal to a particular key.
    /// Returns `None` if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.map.floor(key)
    }

    /// Returns an iterator over the set. The iterator will yield keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::treap::TreapSet;
    ///
    /// let mut set = TreapSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreapSetIter<'_, T> {
        TreapSetIter {
            map_iter: self.map.iter(),
        }
    }
}

impl<T, R> IntoIterator for TreapSet<T, R> {
    type IntoIter = TreapSetIntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        TreapSetIntoIter {
            map_iter: self.map.into_iter(),
        }
    }
}

impl<'a, T, R> IntoIterator for &'a TreapSet<T, R>
where
    T: 'a,
{
    type IntoIter = TreapSetIter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `TreapSet<T, R>`.
///
/// This iterator traverses the keys of the set in-order and yields owned keys.
pub struct TreapSetIntoIter<T> {
    map_iter: TreapMapIntoIter<T, ()>,
}

impl<T> Iterator for TreapSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

/// An iterator for `TreapSet<T, R>`.
///
/// This iterator traverses the keys of the set in-order and yields immutable references.
pub struct TreapSetIter<'a, T> {
    map_iter: TreapMapIter<'a, T, ()>,
}

impl<'a, T> Iterator for TreapSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.map_iter.next().map(|pair| pair.0)
    }
}

impl<T> Default for TreapSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, R> fmt::Debug for TreapSet<T, R>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, R> PartialEq for TreapSet<T, R>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(lhs, rhs)| lhs == rhs)
    }
}

impl<T, R> Eq for TreapSet<T, R> where T: Eq {}

impl<T, R> Serialize for TreapSet<T, R>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for key in self {
            seq.serialize_element(key)?;
        }
        seq.end()
    }
}

struct TreapSetVisitor<T> {
    marker: PhantomData<TreapSet<T>>,
}

impl<'de, T> Visitor<'de> for TreapSetVisitor<T>
where
    T: Ord + Deserialize<'de>,
{
    type Value = TreapSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<S>(self, mut access: S) -> Result<Self::Value, S::Error>
    where
        S: SeqAccess<'de>,
    {
        let mut set = TreapSet::new();
        while let Some(key) = access.next_element()? {
            set.insert(key);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for TreapSet<T>
where
    T: Ord + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(TreapSetVisitor {
            marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::TreapSet;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_len_empty() {
        let set: TreapSet<u32> = TreapSet::new();
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_is_empty() {
        let set: TreapSet<u32> = TreapSet::new();
        assert!(set.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let set: TreapSet<u32> = TreapSet::new();
        assert_eq!(set.min(), None);
        assert_eq!(set.max(), None);
    }

    #[test]
    fn test_insert() {
        let mut set = TreapSet::new();
        let ret = set.insert(1);
        assert!(set.contains(&1));
        assert_eq!(ret, None);
    }

    #[test]
    fn test_insert_replace() {
        let mut set = TreapSet::new();
        let ret_1 = set.insert(1);
        let ret_2 = set.insert(1);
        assert!(set.contains(&1));
        assert_eq!(set.len(), 1);
        assert_eq!(ret_1, None);
        assert_eq!(ret_2, Some(1));
    }

    #[test]
    fn test_remove() {
        let mut set = TreapSet::new();
        set.insert(1);
        let ret = set.remove(&1);
        assert!(!set.contains(&1));
        assert_eq!(ret, Some(1));
    }

    #[test]
    fn test_remove_absent_key() {
        let mut set: TreapSet<u32> = TreapSet::new();
        assert_eq!(set.remove(&1), None);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_min_max() {
        let mut set = TreapSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.min(), Some(&1));
        assert_eq!(set.max(), Some(&5));
    }

    #[test]
    fn test_floor_ceil() {
        let mut set = TreapSet::new();
        set.insert(1);
        set.insert(3);
        set.insert(5);

        assert_eq!(set.floor(&0), None);
        assert_eq!(set.floor(&2), Some(&1));

        assert_eq!(set.ceil(&2), Some(&3));
        assert_eq!(set.ceil(&6), None);
    }

    #[test]
    fn test_iter() {
        let mut set = TreapSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
    }

    #[test]
    fn test_into_iter() {
        let mut set = TreapSet::new();
        set.insert(1);
        set.insert(5);
        set.insert(3);

        assert_eq!(set.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_serde() {
        let mut set = TreapSet::new();
        set.insert(1u32);
        set.insert(3u32);

        assert_tokens(
            &set,
            &[
                Token::Seq { len: Some(2) },
                Token::U32(1),
                Token::U32(3),
                Token::SeqEnd,
            ],
        );
    }
}
