#![no_main]

use arbitrary::Arbitrary;
use commonware_collections::{segmented::Config, LongHashSet, LongList, NZUsize};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;

#[derive(Arbitrary, Debug)]
enum SegmentedOperation {
    Push(u16),
    Get(u64),
    Set(u64, u16),
    Contains(u16),
    Insert(u16),
    SetContains(u16),
    Clear,
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    capacity: u8,
    ops: Vec<SegmentedOperation>,
}

fn fuzz(input: FuzzInput) {
    let cfg = Config {
        block_capacity: NZUsize!(input.capacity as usize + 1),
    };
    let capacity = cfg.block_capacity.get();
    let mut list = LongList::with_config(cfg);
    let mut set = LongHashSet::with_config(cfg);
    let mut list_model: Vec<u16> = Vec::new();
    let mut set_model: HashSet<u16> = HashSet::new();

    for op in input.ops {
        match op {
            SegmentedOperation::Push(value) => {
                list.push(value);
                list_model.push(value);
            }
            SegmentedOperation::Get(index) => {
                let expected = usize::try_from(index)
                    .ok()
                    .and_then(|index| list_model.get(index));
                assert_eq!(list.get(index).ok(), expected);
            }
            SegmentedOperation::Set(index, value) => {
                if list.set(index, value).is_ok() {
                    list_model[index as usize] = value;
                } else {
                    assert!(index >= list_model.len() as u64);
                }
            }
            SegmentedOperation::Contains(value) => {
                assert_eq!(list.contains(&value), list_model.contains(&value));
            }
            SegmentedOperation::Insert(value) => {
                assert_eq!(set.insert(value), set_model.insert(value));
            }
            SegmentedOperation::SetContains(value) => {
                assert_eq!(set.contains(&value), set_model.contains(&value));
            }
            SegmentedOperation::Clear => {
                list.clear();
                list_model.clear();
                set.clear();
                set_model.clear();
            }
        }

        assert_eq!(list.len(), list_model.len() as u64);
        assert_eq!(list.num_blocks(), list_model.len().div_ceil(capacity).max(1));
        assert_eq!(set.len(), set_model.len() as u64);
        assert_eq!(set.num_blocks(), set_model.len().div_ceil(capacity).max(1));
    }

    assert!(list.iter().eq(list_model.iter()));
    let values: HashSet<u16> = set.iter().copied().collect();
    assert_eq!(values, set_model);
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
