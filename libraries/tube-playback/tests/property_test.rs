//! Property-based tests for the queue and controller
//!
//! Uses proptest to verify cursor invariants across many random inputs.

mod common;

use common::{item, Harness};
use proptest::prelude::*;
use tube_core::Item;
use tube_playback::{PlayerSignal, PlayerStateCode, Queue};
use tube_storage::{KEY_CURSOR, KEY_QUEUE};

// ===== Helpers =====

fn labels(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{:02}", i)).collect()
}

fn queue_of(count: usize, cursor: usize) -> Queue {
    let items: Vec<Item> = labels(count).iter().map(|l| item(l)).collect();
    let mut queue = Queue::from_parts(items, 0);
    queue.set_cursor(cursor);
    queue
}

fn cursor_in_range(queue: &Queue) -> bool {
    if queue.is_empty() {
        queue.cursor() == 0
    } else {
        queue.cursor() < queue.len()
    }
}

/// Queue operation drawn by proptest
#[derive(Debug, Clone)]
enum Op {
    Append,
    Remove(usize),
    Move(usize, usize),
    SetCursor(usize),
    Clear,
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => Just(Op::Append),
        4 => (0usize..12).prop_map(Op::Remove),
        3 => (0usize..12, 0usize..12).prop_map(|(from, to)| Op::Move(from, to)),
        2 => (0usize..12).prop_map(Op::SetCursor),
        1 => Just(Op::Clear),
    ]
}

// ===== Property Tests =====

proptest! {
    /// Property: cursor stays in range after every removal
    #[test]
    fn cursor_in_range_after_removals(
        len in 1usize..20,
        cursor in 0usize..20,
        removals in prop::collection::vec(0usize..25, 1..30)
    ) {
        let mut queue = queue_of(len, cursor.min(len - 1));

        for index in removals {
            queue.remove_at(index);
            prop_assert!(cursor_in_range(&queue), "cursor {} len {}", queue.cursor(), queue.len());
        }
    }

    /// Property: removing a non-cursor item never changes which item is current
    #[test]
    fn removal_elsewhere_preserves_current_item(
        len in 2usize..20,
        cursor in 0usize..20,
        index in 0usize..20
    ) {
        let cursor = cursor % len;
        let index = index % len;
        prop_assume!(index != cursor);

        let mut queue = queue_of(len, cursor);
        let before = queue.current().cloned();
        queue.remove_at(index);

        prop_assert_eq!(queue.current().cloned(), before);
    }

    /// Property: moving an item and moving it back restores order and cursor
    #[test]
    fn move_round_trip(
        len in 1usize..15,
        cursor in 0usize..15,
        from in 0usize..15,
        to in 0usize..20
    ) {
        let cursor = cursor % len;
        let from = from % len;
        let mut queue = queue_of(len, cursor);
        let original = queue.clone();

        if queue.move_item(from, to) {
            let landed = to.min(len - 1);
            prop_assert!(queue.move_item(landed, from));
        }

        prop_assert_eq!(queue, original);
    }

    /// Property: moving never changes which item is current
    #[test]
    fn move_preserves_current_item(
        len in 1usize..15,
        cursor in 0usize..15,
        from in 0usize..15,
        to in 0usize..15
    ) {
        let mut queue = queue_of(len, cursor % len);
        let before = queue.current().cloned();
        queue.move_item(from, to);

        prop_assert_eq!(queue.current().cloned(), before);
    }

    /// Property: controller keeps its cursor valid and persisted under
    /// arbitrary queue operations
    #[test]
    fn controller_cursor_invariant(ops in prop::collection::vec(arbitrary_op(), 1..40)) {
        let mut h = Harness::new();
        h.controller.on_signal(PlayerSignal::Ready);
        h.controller.on_signal(PlayerSignal::StateChanged(PlayerStateCode::Playing));

        let mut next_label = 0usize;
        for op in ops {
            match op {
                Op::Append => {
                    h.controller.append(item(&format!("{:02}", next_label % 100)));
                    next_label += 1;
                }
                Op::Remove(index) => {
                    h.controller.remove_at(index);
                }
                Op::Move(from, to) => {
                    h.controller.move_item(from, to);
                }
                Op::SetCursor(index) => {
                    h.controller.set_cursor(index);
                }
                Op::Clear => h.controller.clear(),
            }

            prop_assert!(cursor_in_range(h.controller.queue()));
            if let Some(stored) = h.store.json(KEY_CURSOR) {
                prop_assert_eq!(stored, serde_json::json!(h.controller.cursor()));
            }
            if let Some(stored) = h.store.json(KEY_QUEUE) {
                prop_assert_eq!(stored.as_array().map(Vec::len), Some(h.controller.items().len()));
            }
        }
    }
}
