//! Linked-tree binary heap
//!
//! A binary min/max heap kept as an explicit tree of linked nodes instead of
//! a flat array. Two structural invariants hold after every operation:
//!
//! 1. **Shape**: the tree is complete. Every level is full except possibly
//!    the last, which is packed to the left, so every node sits at a 0-based
//!    array-heap index (children of `i` at `2i+1` and `2i+2`) even though no
//!    array exists.
//! 2. **Order**: no node outranks its parent under the heap's mode
//!    (min: parent <= child, max: parent >= child).
//!
//! Positional addressing comes from translating an array-heap index into a
//! left/right path from the root, so push and pop reach their slots in
//! O(log n) without scanning.
//!
//! Rebalancing relinks nodes rather than moving values: when a node and its
//! parent trade places, the surrounding pointers are rewired and both nodes
//! keep their identity. Removal relies on this, holding a reference to the
//! spliced-in node across the settling passes.
//!
//! # Time Complexity
//!
//! | Operation | Complexity |
//! |-----------|------------|
//! | `push`    | O(log n)   |
//! | `pop`     | O(log n)   |
//! | `peek`    | O(1)       |
//! | `to_vec`  | O(n)       |
//!
//! # Example
//!
//! ```rust
//! use linked_heap::LinkedBinaryHeap;
//!
//! let mut heap = LinkedBinaryHeap::new();
//! heap.push(3);
//! heap.push(1);
//! heap.push(2);
//!
//! assert_eq!(heap.peek(), Some(&1));
//! assert_eq!(heap.pop(), Some(1));
//! assert_eq!(heap.pop(), Some(2));
//! assert_eq!(heap.pop(), Some(3));
//! assert_eq!(heap.pop(), None);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

/// Type alias for node reference (strong reference)
type NodeRef<T> = Rc<RefCell<Node<T>>>;

/// Type alias for optional node reference
type NodePtr<T> = Option<NodeRef<T>>;

/// Type alias for weak node reference (for parent links)
type WeakNodeRef<T> = Weak<RefCell<Node<T>>>;

/// Which element the root holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeapMode {
    /// The root holds the least element
    #[default]
    Min,
    /// The root holds the greatest element
    Max,
}

/// Internal node structure
///
/// **Memory Model**: Strong references flow from the root downward (`left`,
/// `right`). The `parent` back-reference is weak to avoid reference cycles.
/// Parent/child links stay mutually consistent: whenever `a.left` (or
/// `a.right`) is `b`, `b.parent` upgrades to `a`. Every mutation in this
/// module preserves that.
struct Node<T> {
    value: T,
    /// Parent node - weak reference to avoid cycles (None if root)
    parent: Option<WeakNodeRef<T>>,
    left: NodePtr<T>,
    right: NodePtr<T>,
}

impl<T> Node<T> {
    fn new(value: T) -> NodeRef<T> {
        Rc::new(RefCell::new(Node {
            value,
            parent: None,
            left: None,
            right: None,
        }))
    }
}

/// A left/right move on the way down from the root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

/// Paths are bounded by tree depth, so they stay inline for all but
/// astronomically large heaps.
type DirectionPath = SmallVec<[Direction; 8]>;

/// Directions from the root to the *parent* of the slot at `index` in the
/// implicit array-heap numbering.
///
/// Climbs the index ladder with `i = (i - 1) / 2`, recording for each
/// climbed ancestor whether it is a left child (odd index) or a right child
/// (even index), then reads the path root-to-leaf. The climb stops at the
/// root's direct children, so the path has `floor(log2(index + 1)) - 1`
/// steps, clamped to zero for indices 0..=2.
///
/// The final step down is intentionally absent: insertion fills the left
/// slot before the right, and removal takes the right child before the
/// left, so the caller resolves the last move from the parent's state. This
/// routine is the only way the tree locates the next free slot
/// (`index = len`) or the last occupied slot (`index = len - 1`) without
/// scanning.
fn path_to_parent(index: usize) -> DirectionPath {
    let mut path = DirectionPath::new();
    let mut i = index;
    while i > 2 {
        i = (i - 1) / 2;
        path.push(if i % 2 == 0 {
            Direction::Right
        } else {
            Direction::Left
        });
    }
    path.reverse();
    path
}

/// A binary heap backed by a linked tree
///
/// The heap owns its nodes transitively through the root. `len` always
/// equals the number of reachable nodes, and `len == 0` exactly when the
/// root is absent. The ordering mode is fixed at construction.
///
/// # Example
///
/// ```rust
/// use linked_heap::{HeapMode, LinkedBinaryHeap};
///
/// let mut heap = LinkedBinaryHeap::with_mode(HeapMode::Max);
/// heap.extend([4, 4, 2]);
/// assert_eq!(heap.pop(), Some(4));
/// assert_eq!(heap.peek(), Some(&4));
/// ```
pub struct LinkedBinaryHeap<T: Ord> {
    root: NodePtr<T>,
    len: usize,
    mode: HeapMode,
}

// No manual Drop needed - parents are weak, so dropping the root reclaims
// the whole tree through Rc.

impl<T: Ord> LinkedBinaryHeap<T> {
    /// Creates an empty min-heap
    pub fn new() -> Self {
        Self::with_mode(HeapMode::Min)
    }

    /// Creates an empty heap with the given ordering mode
    pub fn with_mode(mode: HeapMode) -> Self {
        Self {
            root: None,
            len: 0,
            mode,
        }
    }

    /// Creates a heap with the given mode and bulk-inserts `values`
    pub fn from_values<I>(mode: HeapMode, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut heap = Self::with_mode(mode);
        heap.extend(values);
        heap
    }

    /// Returns true if the heap holds no elements
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns the ordering mode fixed at construction
    pub fn mode(&self) -> HeapMode {
        self.mode
    }

    /// Drops every node, leaving the heap empty with its mode unchanged
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns the root value without removing it, or `None` if empty
    ///
    /// The root is the least element in min mode and the greatest in max
    /// mode.
    pub fn peek(&self) -> Option<&T> {
        let root = self.root.as_ref()?;

        // SAFETY: The returned reference is tied to the &self lifetime. The
        // node is owned by the tree (strong ref from `self.root`), every
        // mutating operation takes &mut self, and RefCell contents do not
        // move while we hold &self.
        let node_ptr = root.as_ptr();
        unsafe { Some(&(*node_ptr).value) }
    }

    /// Inserts a value
    ///
    /// **Algorithm**:
    /// 1. Wrap the value in a fresh node; an empty tree adopts it as root.
    /// 2. Walk the direction path for `index = len` to the parent of the
    ///    next free slot.
    /// 3. Attach on the left if that slot is free, else on the right - the
    ///    left always fills first, which is what keeps the tree complete.
    /// 4. Heap-up from the new node to restore order.
    ///
    /// **Time Complexity**: O(log n)
    pub fn push(&mut self, value: T) {
        let node = Node::new(value);
        let root = match &self.root {
            Some(root) => Rc::clone(root),
            None => {
                self.root = Some(node);
                self.len = 1;
                return;
            }
        };

        let mut parent = root;
        for step in path_to_parent(self.len) {
            let next = {
                let p = parent.borrow();
                match step {
                    Direction::Left => p.left.clone(),
                    Direction::Right => p.right.clone(),
                }
            };
            parent = next.expect("interior slots on the path to a free slot are occupied");
        }

        node.borrow_mut().parent = Some(Rc::downgrade(&parent));
        {
            let mut p = parent.borrow_mut();
            if p.left.is_none() {
                p.left = Some(Rc::clone(&node));
            } else {
                p.right = Some(Rc::clone(&node));
            }
        }
        self.len += 1;
        self.heap_up(&node);
    }

    /// Removes and returns the root value, or `None` if the heap is empty
    ///
    /// Internally this is removal by value: the first pre-order node
    /// holding the root's value (trivially the root itself) is replaced by
    /// the last node in heap order, which is then settled into place. The
    /// detached node is consumed and its value returned.
    ///
    /// **Time Complexity**: O(log n)
    pub fn pop(&mut self) -> Option<T> {
        let root = self.root.as_ref().map(Rc::clone)?;
        let target = {
            let guard = root.borrow();
            Self::find_node(&root, &guard.value)
        };
        debug_assert!(target.is_some(), "the root's value is reachable from the root");

        let detached = self.remove(target?)?;
        drop(root);
        let node = Rc::try_unwrap(detached)
            .ok()
            .expect("removed node should have no other strong references")
            .into_inner();
        Some(node.value)
    }

    /// The mode's strict comparison: does `a` belong above `b`?
    fn outranks(&self, a: &T, b: &T) -> bool {
        match self.mode {
            HeapMode::Min => a < b,
            HeapMode::Max => a > b,
        }
    }

    /// First pre-order node holding `value`: the current node, then the
    /// left subtree, then the right.
    fn find_node(node: &NodeRef<T>, value: &T) -> Option<NodeRef<T>> {
        if node.borrow().value == *value {
            return Some(Rc::clone(node));
        }
        let (left, right) = {
            let n = node.borrow();
            (n.left.clone(), n.right.clone())
        };
        if let Some(left) = left {
            if let Some(found) = Self::find_node(&left, value) {
                return Some(found);
            }
        }
        if let Some(right) = right {
            if let Some(found) = Self::find_node(&right, value) {
                return Some(found);
            }
        }
        None
    }

    /// The node occupying the highest array-heap index
    ///
    /// Walks the direction path for `index = len - 1`, which stops at the
    /// parent of the last slot, then takes the right child when present and
    /// the left otherwise. At size one the root itself is the last node.
    fn last_node(&self) -> Option<NodeRef<T>> {
        let mut node = self.root.as_ref().map(Rc::clone)?;
        for step in path_to_parent(self.len - 1) {
            let next = {
                let n = node.borrow();
                match step {
                    Direction::Left => n.left.clone(),
                    Direction::Right => n.right.clone(),
                }
            };
            node = next?;
        }
        let down = {
            let n = node.borrow();
            n.right.clone().or_else(|| n.left.clone())
        };
        Some(down.unwrap_or(node))
    }

    /// Removes `target` from the tree by splicing the last node into its
    /// position, returning the detached node.
    ///
    /// **Algorithm** (all link rewiring, no value moves):
    /// 1. Unhook the last node from its parent.
    /// 2. If the last node *is* the target, the removal is already done -
    ///    dropping the final slot cannot break the order.
    /// 3. Otherwise copy the target's parent/left/right links onto the last
    ///    node, repoint those neighbors at it, and settle the relocated
    ///    node: heap-up first (a no-op when it landed at the root), then
    ///    sift-down.
    ///
    /// A missing last node would mean the size counter and the tree
    /// disagree; the operation then aborts with no state change.
    fn remove(&mut self, target: NodeRef<T>) -> Option<NodeRef<T>> {
        let last = match self.last_node() {
            Some(last) => last,
            None => {
                debug_assert!(false, "a non-empty heap has a last node");
                return None;
            }
        };

        let last_parent = last.borrow().parent.as_ref().and_then(Weak::upgrade);
        if let Some(parent) = &last_parent {
            let mut p = parent.borrow_mut();
            let was_left = p.left.as_ref().map_or(false, |l| Rc::ptr_eq(l, &last));
            if was_left {
                p.left = None;
            } else {
                p.right = None;
            }
        }

        if Rc::ptr_eq(&last, &target) {
            if self.root.as_ref().map_or(false, |r| Rc::ptr_eq(r, &last)) {
                self.root = None;
            }
            last.borrow_mut().parent = None;
            self.len -= 1;
            return Some(last);
        }

        // Splice the last node into the target's slot, link for link. The
        // target's links are read after the unhook above, so a target
        // adjacent to the last node is already out of the picture.
        let target_parent = target.borrow().parent.as_ref().and_then(Weak::upgrade);
        let (target_left, target_right) = {
            let t = target.borrow();
            (t.left.clone(), t.right.clone())
        };
        match &target_parent {
            Some(parent) => {
                let mut p = parent.borrow_mut();
                let was_left = p.left.as_ref().map_or(false, |l| Rc::ptr_eq(l, &target));
                if was_left {
                    p.left = Some(Rc::clone(&last));
                } else {
                    p.right = Some(Rc::clone(&last));
                }
            }
            None => self.root = Some(Rc::clone(&last)),
        }
        {
            let mut l = last.borrow_mut();
            l.parent = target_parent.as_ref().map(Rc::downgrade);
            l.left = target_left.clone();
            l.right = target_right.clone();
        }
        if let Some(child) = &target_left {
            child.borrow_mut().parent = Some(Rc::downgrade(&last));
        }
        if let Some(child) = &target_right {
            child.borrow_mut().parent = Some(Rc::downgrade(&last));
        }
        {
            let mut t = target.borrow_mut();
            t.parent = None;
            t.left = None;
            t.right = None;
        }
        self.len -= 1;

        self.heap_up(&last);
        self.sift_down(&last);

        Some(target)
    }

    /// Climbs `node` toward the root while it outranks its parent
    ///
    /// Each violation is fixed by relinking the node into its parent's
    /// position (see `rotate_up`), never by swapping values, so the node
    /// keeps its identity all the way up. Stops at the root or at the first
    /// parent the node does not outrank.
    fn heap_up(&mut self, node: &NodeRef<T>) {
        loop {
            let parent = match node.borrow().parent.as_ref().and_then(Weak::upgrade) {
                Some(parent) => parent,
                None => break,
            };
            let violates = {
                let n = node.borrow();
                let p = parent.borrow();
                self.outranks(&n.value, &p.value)
            };
            if !violates {
                break;
            }
            self.rotate_up(node, &parent);
        }
    }

    /// Sinks `node` while either child outranks it, always descending into
    /// the child that would win against the other (ties go left; a complete
    /// tree cannot have a right-only child). Reuses the same relinking
    /// primitive as heap-up, with the winning child climbing over `node`.
    fn sift_down(&mut self, node: &NodeRef<T>) {
        loop {
            let child = {
                let n = node.borrow();
                match (&n.left, &n.right) {
                    (Some(left), Some(right)) => {
                        if self.outranks(&right.borrow().value, &left.borrow().value) {
                            Some(Rc::clone(right))
                        } else {
                            Some(Rc::clone(left))
                        }
                    }
                    (Some(left), None) => Some(Rc::clone(left)),
                    (None, _) => None,
                }
            };
            let child = match child {
                Some(child) => child,
                None => break,
            };
            let violates = {
                let c = child.borrow();
                let n = node.borrow();
                self.outranks(&c.value, &n.value)
            };
            if !violates {
                break;
            }
            self.rotate_up(&child, node);
        }
    }

    /// Splices `node` into the position of `parent`, demoting the parent
    /// into the slot the node occupied.
    ///
    /// The node's former children move under the demoted parent, the
    /// sibling keeps its side, and the rotated pair is reattached to the
    /// grandparent (or the node becomes the new root). Only pointers move;
    /// both nodes keep their identity.
    fn rotate_up(&mut self, node: &NodeRef<T>, parent: &NodeRef<T>) {
        let grandparent = parent.borrow().parent.as_ref().and_then(Weak::upgrade);
        let (sibling_left, sibling_right) = {
            let p = parent.borrow();
            (p.left.clone(), p.right.clone())
        };
        let (node_left, node_right) = {
            let n = node.borrow();
            (n.left.clone(), n.right.clone())
        };
        let node_was_left = sibling_left.as_ref().map_or(false, |l| Rc::ptr_eq(l, node));

        {
            let mut p = parent.borrow_mut();
            p.left = node_left.clone();
            p.right = node_right.clone();
            p.parent = Some(Rc::downgrade(node));
        }
        if let Some(child) = &node_left {
            child.borrow_mut().parent = Some(Rc::downgrade(parent));
        }
        if let Some(child) = &node_right {
            child.borrow_mut().parent = Some(Rc::downgrade(parent));
        }

        {
            let mut n = node.borrow_mut();
            if node_was_left {
                n.left = Some(Rc::clone(parent));
                n.right = sibling_right.clone();
            } else {
                n.left = sibling_left.clone();
                n.right = Some(Rc::clone(parent));
            }
        }
        let sibling = if node_was_left {
            sibling_right
        } else {
            sibling_left
        };
        if let Some(sibling) = sibling {
            sibling.borrow_mut().parent = Some(Rc::downgrade(node));
        }

        match grandparent {
            Some(grand) => {
                let parent_was_left = grand
                    .borrow()
                    .left
                    .as_ref()
                    .map_or(false, |l| Rc::ptr_eq(l, parent));
                {
                    let mut g = grand.borrow_mut();
                    if parent_was_left {
                        g.left = Some(Rc::clone(node));
                    } else {
                        g.right = Some(Rc::clone(node));
                    }
                }
                node.borrow_mut().parent = Some(Rc::downgrade(&grand));
            }
            None => {
                node.borrow_mut().parent = None;
                self.root = Some(Rc::clone(node));
            }
        }
    }

    /// Writes each node's projection into its array-heap slot: the value at
    /// `index`, then the left subtree from `2 * index + 1` and the right
    /// from `2 * index + 2`.
    fn write_slots<U, F>(node: &NodeRef<T>, index: usize, slots: &mut [Option<U>], project: &F)
    where
        F: Fn(&T) -> U,
    {
        let n = node.borrow();
        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(project(&n.value));
        }
        if let Some(left) = &n.left {
            Self::write_slots(left, 2 * index + 1, slots, project);
        }
        if let Some(right) = &n.right {
            Self::write_slots(right, 2 * index + 2, slots, project);
        }
    }

    /// Snapshot of the heap in array-heap order
    ///
    /// The result is exactly the flat representation the tree emulates:
    /// `out[i]`'s children are `out[2i+1]` and `out[2i+2]`, and the length
    /// equals `len()`. A complete tree leaves no gaps in `[0, len)`.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut slots: Vec<Option<T>> = Vec::new();
        slots.resize_with(self.len, || None);
        if let Some(root) = &self.root {
            Self::write_slots(root, 0, &mut slots, &|value| value.clone());
        }
        debug_assert!(
            slots.iter().all(Option::is_some),
            "a complete tree fills every slot in [0, len)"
        );
        slots.into_iter().flatten().collect()
    }
}

impl<T: Ord> Default for LinkedBinaryHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for LinkedBinaryHeap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: Ord> FromIterator<T> for LinkedBinaryHeap<T> {
    /// Builds a min-heap from the iterator; use [`LinkedBinaryHeap::from_values`]
    /// to pick the mode.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut heap = Self::new();
        heap.extend(iter);
        heap
    }
}

/// Draining iterator in extraction order: ascending for min mode,
/// descending for max mode.
pub struct IntoIter<T: Ord> {
    heap: LinkedBinaryHeap<T>,
}

impl<T: Ord> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.heap.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

impl<T: Ord> ExactSizeIterator for IntoIter<T> {}

impl<T: Ord> IntoIterator for LinkedBinaryHeap<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { heap: self }
    }
}

impl<T: Ord + fmt::Display> fmt::Display for LinkedBinaryHeap<T> {
    /// Comma-separated listing in array-heap order, or the sentinel
    /// `Heap has no nodes.` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = match &self.root {
            Some(root) => root,
            None => return f.write_str("Heap has no nodes."),
        };
        let mut slots: Vec<Option<String>> = Vec::new();
        slots.resize_with(self.len, || None);
        Self::write_slots(root, 0, &mut slots, &|value| value.to_string());
        let mut first = true;
        for rendered in slots.into_iter().flatten() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(&rendered)?;
            first = false;
        }
        Ok(())
    }
}

impl<T: Ord + fmt::Debug> fmt::Debug for LinkedBinaryHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut slots: Vec<Option<String>> = Vec::new();
        slots.resize_with(self.len, || None);
        if let Some(root) = &self.root {
            Self::write_slots(root, 0, &mut slots, &|value| format!("{:?}", value));
        }
        f.debug_struct("LinkedBinaryHeap")
            .field("mode", &self.mode)
            .field("len", &self.len)
            .field("heap", &slots.into_iter().flatten().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
impl<T: Ord> LinkedBinaryHeap<T> {
    /// Walks the whole tree asserting link consistency and heap order, and
    /// that the reachable-node count matches `len`.
    fn check_consistency(&self) {
        match &self.root {
            None => assert_eq!(self.len, 0, "an empty tree must report len 0"),
            Some(root) => {
                assert!(
                    root.borrow().parent.as_ref().and_then(Weak::upgrade).is_none(),
                    "the root must not have a parent"
                );
                assert_eq!(self.count_and_check(root), self.len);
            }
        }
    }

    fn count_and_check(&self, node: &NodeRef<T>) -> usize {
        let n = node.borrow();
        let mut count = 1;
        for child in [n.left.as_ref(), n.right.as_ref()].into_iter().flatten() {
            let back = child
                .borrow()
                .parent
                .as_ref()
                .and_then(Weak::upgrade)
                .expect("a child holds a live parent link");
            assert!(
                Rc::ptr_eq(&back, node),
                "a child's parent link must point back at its parent"
            );
            assert!(
                !self.outranks(&child.borrow().value, &n.value),
                "a child must not outrank its parent"
            );
            count += self.count_and_check(child);
        }
        count
    }
}
