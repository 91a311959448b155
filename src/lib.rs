//! A binary heap backed by an explicit linked binary tree
//!
//! This crate provides [`LinkedBinaryHeap`], a priority queue that keeps its
//! elements in a tree of linked nodes rather than the flat array used by
//! `std::collections::BinaryHeap`. The tree stays complete at all times, so
//! every node has an implicit array-heap index; push and pop translate those
//! indices into left/right paths from the root instead of scanning.
//!
//! # Features
//!
//! - **Min or max ordering**, fixed at construction via [`HeapMode`]
//! - **O(log n) push and pop** with positional addressing over linked nodes
//! - **Pointer-relinking rebalancing**: nodes keep their identity while they
//!   move; values are never copied between nodes
//! - **Array-heap snapshots** via [`LinkedBinaryHeap::to_vec`] for
//!   verification and rendering
//!
//! # Example
//!
//! ```rust
//! use linked_heap::{HeapMode, LinkedBinaryHeap};
//!
//! let mut heap = LinkedBinaryHeap::new();
//! heap.push(5);
//! heap.push(1);
//! heap.push(3);
//! assert_eq!(heap.peek(), Some(&1));
//! assert_eq!(heap.pop(), Some(1));
//!
//! let max = LinkedBinaryHeap::from_values(HeapMode::Max, [4, 4, 2]);
//! assert_eq!(max.peek(), Some(&4));
//! ```

pub mod binary;

// Re-export the heap and its mode for convenience
pub use binary::{HeapMode, LinkedBinaryHeap};
