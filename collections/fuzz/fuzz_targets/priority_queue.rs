#![no_main]

use arbitrary::Arbitrary;
use commonware_collections::PriorityQueue;
use libfuzzer_sys::fuzz_target;
use std::collections::BinaryHeap;
use std::cmp::Reverse;

#[derive(Arbitrary, Debug)]
enum PriorityQueueOperation {
    Push(u32),
    Pop,
    Top,
    Clear,
}

fn fuzz(ops: Vec<PriorityQueueOperation>) {
    let mut pq = PriorityQueue::new();
    let mut model = BinaryHeap::new();

    for op in ops {
        match op {
            PriorityQueueOperation::Push(entry) => {
                pq.push(entry);
                model.push(Reverse(entry));
            }
            PriorityQueueOperation::Pop => {
                assert_eq!(pq.pop(), model.pop().map(|Reverse(entry)| entry));
            }
            PriorityQueueOperation::Top => {
                assert_eq!(pq.top(), model.peek().map(|Reverse(entry)| entry));
            }
            PriorityQueueOperation::Clear => {
                pq.clear();
                model.clear();
            }
        }
        assert_eq!(pq.len(), model.len());
        assert_eq!(pq.is_empty(), model.is_empty());
    }

    while let Some(Reverse(expected)) = model.pop() {
        assert_eq!(pq.pop(), Some(expected));
    }
    assert!(pq.is_empty());
}

fuzz_target!(|ops: Vec<PriorityQueueOperation>| {
    fuzz(ops);
});
