use commonware_collections::{segmented::Config, Error, LongHashSet, LongList, NZUsize};
use commonware_macros::test_traced;

#[test_traced("DEBUG")]
fn test_list_spans_blocks() {
    const CAPACITY: usize = 1 << 10;
    let mut list = LongList::with_config(Config {
        block_capacity: NZUsize!(CAPACITY),
    });

    // Add one element more than fits in a single block
    for i in 0..=CAPACITY as u64 {
        list.push(i);
    }
    assert_eq!(list.num_blocks(), 2);
    assert_eq!(list.len(), CAPACITY as u64 + 1);
    assert_eq!(list[CAPACITY as u64], CAPACITY as u64);
    assert_eq!(list[CAPACITY as u64 - 1], CAPACITY as u64 - 1);
    assert_eq!(
        list.get(CAPACITY as u64 + 1),
        Err(Error::OutOfRange {
            index: CAPACITY as u64 + 1,
            len: CAPACITY as u64 + 1,
        })
    );

    // Fill many blocks and read everything back through each access path
    list.extend(CAPACITY as u64 + 1..10 * CAPACITY as u64);
    assert_eq!(list.num_blocks(), 10);
    assert!(list.iter().copied().eq(0..10 * CAPACITY as u64));
    for i in (0..10 * CAPACITY as u64).step_by(37) {
        assert_eq!(*list.get(i).unwrap(), i);
    }
    assert!(list.contains(&(10 * CAPACITY as u64 - 1)));
    assert!(!list.contains(&(10 * CAPACITY as u64)));

    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.num_blocks(), 1);
}

#[test_traced("DEBUG")]
fn test_set_spans_blocks() {
    const CAPACITY: usize = 1 << 8;
    let mut set = LongHashSet::with_config(Config {
        block_capacity: NZUsize!(CAPACITY),
    });

    for value in 0..=CAPACITY as u32 {
        assert!(set.insert(value));
    }
    assert_eq!(set.num_blocks(), 2);
    assert_eq!(set.len(), CAPACITY as u64 + 1);

    // Re-inserting any stored value is rejected, no matter which block holds it
    for value in 0..=CAPACITY as u32 {
        assert!(!set.insert(value));
    }
    assert_eq!(set.len(), CAPACITY as u64 + 1);
    assert_eq!(set.num_blocks(), 2);
    assert_eq!(set.iter().count(), CAPACITY + 1);

    set.clear();
    assert!(set.is_empty());
    assert_eq!(set.num_blocks(), 1);
    assert!(set.insert(0));
}
