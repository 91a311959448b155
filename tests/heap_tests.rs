//! API-level tests for the linked binary heap
//!
//! These exercise the public surface only: construction in both modes,
//! push/peek/pop sequences, the array-heap snapshot, and rendering. The
//! snapshot doubles as the invariant check - a complete tree linearizes
//! with no gaps, and order violations show up at indices `2i+1`/`2i+2`.

use linked_heap::{HeapMode, LinkedBinaryHeap};

/// Asserts that the snapshot has the right length and satisfies the
/// array-heap order for the heap's mode.
fn assert_array_heap_order<T: Ord + Clone + std::fmt::Debug>(heap: &LinkedBinaryHeap<T>) {
    let snapshot = heap.to_vec();
    assert_eq!(snapshot.len(), heap.len(), "snapshot must cover every element");
    for i in 0..snapshot.len() {
        for child in [2 * i + 1, 2 * i + 2] {
            if child >= snapshot.len() {
                continue;
            }
            match heap.mode() {
                HeapMode::Min => assert!(
                    snapshot[i] <= snapshot[child],
                    "min order broken at slots {} and {}: {:?}",
                    i,
                    child,
                    snapshot
                ),
                HeapMode::Max => assert!(
                    snapshot[i] >= snapshot[child],
                    "max order broken at slots {} and {}: {:?}",
                    i,
                    child,
                    snapshot
                ),
            }
        }
    }
}

#[test]
fn empty_heap_behaves() {
    let mut heap: LinkedBinaryHeap<i32> = LinkedBinaryHeap::new();
    assert!(heap.is_empty());
    assert_eq!(heap.len(), 0);
    assert_eq!(heap.peek(), None);
    assert_eq!(heap.pop(), None);
    // Emptiness is idempotent.
    assert_eq!(heap.pop(), None);
    assert_eq!(heap.len(), 0);
}

#[test]
fn min_heap_basic_sequence() {
    let mut heap = LinkedBinaryHeap::new();
    for value in [5, 3, 8, 1, 9] {
        heap.push(value);
        assert_array_heap_order(&heap);
    }

    assert_eq!(heap.peek(), Some(&1));
    assert_eq!(heap.pop(), Some(1));
    assert_eq!(heap.pop(), Some(3));
    assert_eq!(heap.pop(), Some(5));
    assert_eq!(heap.pop(), Some(8));
    assert_eq!(heap.pop(), Some(9));
    assert_eq!(heap.pop(), None);
    assert_eq!(heap.peek(), None);
}

#[test]
fn max_heap_basic_sequence() {
    let mut heap = LinkedBinaryHeap::with_mode(HeapMode::Max);
    for value in [5, 3, 8, 1, 9] {
        heap.push(value);
        assert_array_heap_order(&heap);
    }

    assert_eq!(heap.peek(), Some(&9));
    let drained: Vec<_> = heap.into_iter().collect();
    assert_eq!(drained, vec![9, 8, 5, 3, 1]);
}

#[test]
fn duplicate_values() {
    let mut heap = LinkedBinaryHeap::from_values(HeapMode::Max, [4, 4, 2]);
    assert_eq!(heap.peek(), Some(&4));
    assert_eq!(heap.pop(), Some(4));
    assert_eq!(heap.peek(), Some(&4));
    assert_eq!(heap.pop(), Some(4));
    assert_eq!(heap.pop(), Some(2));
    assert_eq!(heap.pop(), None);
}

#[test]
fn ascending_insertion_drains_sorted() {
    let mut heap = LinkedBinaryHeap::new();
    for i in 0..100 {
        heap.push(i);
    }
    assert_array_heap_order(&heap);
    for i in 0..100 {
        assert_eq!(heap.pop(), Some(i));
    }
    assert!(heap.is_empty());
}

#[test]
fn descending_insertion_drains_sorted() {
    let mut heap = LinkedBinaryHeap::new();
    for i in (0..100).rev() {
        heap.push(i);
    }
    assert_array_heap_order(&heap);
    for i in 0..100 {
        assert_eq!(heap.pop(), Some(i));
    }
    assert!(heap.is_empty());
}

#[test]
fn alternating_push_and_pop() {
    let mut heap = LinkedBinaryHeap::new();
    let mut model = Vec::new();

    for i in 0..200 {
        heap.push(i * 2);
        heap.push(i * 2 + 1);
        model.push(i * 2);
        model.push(i * 2 + 1);

        let popped = heap.pop().expect("two pushes guarantee a pop");
        let best = *model.iter().min().expect("model tracks the heap");
        assert_eq!(popped, best);
        model.retain(|&v| v != popped);
        assert_eq!(heap.len(), model.len());
    }
    assert_array_heap_order(&heap);
}

#[test]
fn size_tracks_operations() {
    let mut heap = LinkedBinaryHeap::new();
    for i in 0..50 {
        heap.push(i);
        assert_eq!(heap.len(), (i + 1) as usize);
        assert_eq!(heap.to_vec().len(), heap.len());
    }
    for i in (0..50).rev() {
        heap.pop();
        assert_eq!(heap.len(), i as usize);
        assert_eq!(heap.to_vec().len(), heap.len());
    }
}

#[test]
fn constructors_and_std_traits() {
    let heap: LinkedBinaryHeap<i32> = LinkedBinaryHeap::default();
    assert_eq!(heap.mode(), HeapMode::Min);
    assert!(heap.is_empty());

    let heap: LinkedBinaryHeap<i32> = [3, 1, 2].into_iter().collect();
    assert_eq!(heap.mode(), HeapMode::Min);
    assert_eq!(heap.peek(), Some(&1));

    let mut heap = LinkedBinaryHeap::with_mode(HeapMode::Max);
    heap.extend([3, 1, 2]);
    heap.extend([10]);
    assert_eq!(heap.len(), 4);
    assert_eq!(heap.peek(), Some(&10));

    let heap = LinkedBinaryHeap::from_values(HeapMode::Min, Vec::<i32>::new());
    assert!(heap.is_empty());
}

#[test]
fn works_with_owned_values() {
    let mut heap = LinkedBinaryHeap::new();
    for name in ["pear", "apple", "quince", "fig"] {
        heap.push(name.to_string());
    }
    assert_eq!(heap.peek().map(String::as_str), Some("apple"));
    assert_eq!(heap.pop().as_deref(), Some("apple"));
    assert_eq!(heap.pop().as_deref(), Some("fig"));
    assert_eq!(heap.pop().as_deref(), Some("pear"));
    assert_eq!(heap.pop().as_deref(), Some("quince"));
}

#[test]
fn reuse_after_draining() {
    let mut heap = LinkedBinaryHeap::new();
    heap.extend([2, 1, 3]);
    while heap.pop().is_some() {}
    assert!(heap.is_empty());

    heap.push(42);
    assert_eq!(heap.peek(), Some(&42));
    assert_eq!(heap.len(), 1);
    assert_eq!(heap.pop(), Some(42));
}

#[test]
fn display_rendering() {
    let mut heap = LinkedBinaryHeap::new();
    assert_eq!(heap.to_string(), "Heap has no nodes.");

    heap.extend([5, 3, 8, 1]);
    assert_eq!(heap.to_string(), "1, 3, 8, 5");

    let empty: LinkedBinaryHeap<String> = LinkedBinaryHeap::with_mode(HeapMode::Max);
    assert_eq!(empty.to_string(), "Heap has no nodes.");
}

#[test]
fn debug_rendering_names_mode_and_len() {
    let heap = LinkedBinaryHeap::from_values(HeapMode::Max, [2, 1]);
    let rendered = format!("{:?}", heap);
    assert!(rendered.contains("Max"), "{}", rendered);
    assert!(rendered.contains("len: 2"), "{}", rendered);
}

#[test]
fn into_iter_is_exact_size() {
    let heap = LinkedBinaryHeap::from_values(HeapMode::Min, [4, 2, 9]);
    let iter = heap.into_iter();
    assert_eq!(iter.len(), 3);
    assert_eq!(iter.collect::<Vec<_>>(), vec![2, 4, 9]);
}
