//! Fast, but limited allocator addressed by copyable handles.

use std::mem;
use std::ops::{Index, IndexMut};

/// A handle to an object allocated in an `Arena<T>`.
///
/// Handles are small and copyable, so they can be freely duplicated to express parent and child
/// links between allocated objects without creating ownership cycles.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Id {
    index: usize,
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// A fast, but limited allocator that only allocates a single type of object.
///
/// All objects inside the arena are destroyed when the arena is destroyed. The arena supports
/// deallocation of individual objects and yields both mutable and immutable references to
/// objects. The underlying container is simply a `Vec` of slots where freed slots are threaded
/// into a free list and reused by later allocations, so the code uses no unsafe blocks.
///
/// # Examples
///
/// ```
/// use treap_collections::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// ```
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    head: Option<usize>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// ```
    pub fn new() -> Self {
        Arena {
            slots: Vec::new(),
            head: None,
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns a handle to it. The handle can later be used
    /// to retrieve mutable and immutable references to the object, and to deallocate the object.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena[x], 0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Id {
        self.len += 1;
        match self.head.take() {
            Some(index) => {
                let vacant_slot = mem::replace(&mut self.slots[index], Slot::Occupied(value));
                match vacant_slot {
                    Slot::Vacant(next_index) => {
                        self.head = next_index;
                        Id { index }
                    }
                    Slot::Occupied(_) => panic!("Expected a vacant slot."),
                }
            }
            None => {
                self.slots.push(Slot::Occupied(value));
                Id {
                    index: self.slots.len() - 1,
                }
            }
        }
    }

    /// Deallocates an object in the arena and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if the handle corresponds to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, id: Id) -> T {
        match self.slots.get(id.index) {
            Some(Slot::Occupied(_)) => {}
            _ => panic!("Error: attempting to free invalid or vacant slot."),
        }
        let old_slot = mem::replace(&mut self.slots[id.index], Slot::Vacant(self.head.take()));
        match old_slot {
            Slot::Occupied(value) => {
                self.len -= 1;
                self.head = Some(id.index);
                value
            }
            Slot::Vacant(_) => unreachable!(),
        }
    }

    /// Returns an immutable reference to an object in the arena. Returns `None` if the handle
    /// does not correspond to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn get(&self, id: Id) -> Option<&T> {
        match self.slots.get(id.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None` if the handle does
    /// not correspond to a valid object.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// let x = arena.allocate(0);
    /// *arena.get_mut(x).unwrap() = 1;
    /// assert_eq!(arena.get(x), Some(&1));
    /// ```
    pub fn get_mut(&mut self, id: Id) -> Option<&mut T> {
        match self.slots.get_mut(id.index) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of objects currently allocated in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.allocate(0);
    /// assert_eq!(arena.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the arena contains no allocated objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::new();
    /// assert!(arena.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the arena, deallocating all objects.
    ///
    /// # Examples
    ///
    /// ```
    /// use treap_collections::arena::Arena;
    ///
    /// let mut arena = Arena::new();
    /// arena.allocate(0);
    /// arena.clear();
    /// assert!(arena.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Index<Id> for Arena<T> {
    type Output = T;

    fn index(&self, id: Id) -> &Self::Output {
        self.get(id).expect("Error: id out of bounds.")
    }
}

impl<T> IndexMut<Id> for Arena<T> {
    fn index_mut(&mut self, id: Id) -> &mut Self::Output {
        self.get_mut(id).expect("Error: id out of bounds.")
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}
