#![no_main]

use arbitrary::Arbitrary;
use commonware_collections::{Bitfield, Error};
use libfuzzer_sys::fuzz_target;

const MAX_LEN: usize = 4_096;

#[derive(Arbitrary, Debug)]
enum BitfieldOperation {
    Get(usize),
    Set(usize),
    Reset(usize),
    SetTo(usize, bool),
    Toggle(usize),
    SetRange(usize, usize),
    ResetRange(usize, usize),
    SetAll,
    ResetAll,
    CopyTo(usize, usize),
}

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    initial: Vec<bool>,
    ops: Vec<BitfieldOperation>,
}

fn fuzz(input: FuzzInput) {
    let mut model = input.initial;
    model.truncate(MAX_LEN);
    let mut field = Bitfield::from_bools(&model);
    let len = model.len();

    for op in input.ops {
        match op {
            BitfieldOperation::Get(index) => match field.get(index) {
                Ok(value) => assert_eq!(value, model[index]),
                Err(err) => {
                    assert!(index >= len);
                    assert_eq!(
                        err,
                        Error::OutOfRange {
                            index: index as u64,
                            len: len as u64
                        }
                    );
                }
            },
            BitfieldOperation::Set(index) => {
                if field.set(index).is_ok() {
                    model[index] = true;
                } else {
                    assert!(index >= len);
                }
            }
            BitfieldOperation::Reset(index) => {
                if field.reset(index).is_ok() {
                    model[index] = false;
                } else {
                    assert!(index >= len);
                }
            }
            BitfieldOperation::SetTo(index, value) => {
                if field.set_to(index, value).is_ok() {
                    model[index] = value;
                } else {
                    assert!(index >= len);
                }
            }
            BitfieldOperation::Toggle(index) => {
                if field.toggle(index).is_ok() {
                    model[index] = !model[index];
                } else {
                    assert!(index >= len);
                }
            }
            BitfieldOperation::SetRange(from, to) => match field.set_range(from, to) {
                Ok(()) => model[from..=to].fill(true),
                Err(_) => assert!(from >= len || to >= len || from > to),
            },
            BitfieldOperation::ResetRange(from, to) => match field.reset_range(from, to) {
                Ok(()) => model[from..=to].fill(false),
                Err(_) => assert!(from >= len || to >= len || from > to),
            },
            BitfieldOperation::SetAll => {
                field.set_all();
                model.fill(true);
            }
            BitfieldOperation::ResetAll => {
                field.reset_all();
                model.fill(false);
            }
            BitfieldOperation::CopyTo(size, offset) => {
                let mut dst = vec![false; size.min(2 * MAX_LEN)];
                match field.copy_to(&mut dst, offset) {
                    Ok(()) => assert_eq!(&dst[offset..offset + len], &model[..]),
                    Err(_) => assert!(offset > dst.len() || dst.len() - offset < len),
                }
            }
        }

        assert_eq!(field.len(), len);
        assert_eq!(field.count_ones(), model.iter().filter(|b| **b).count());
    }

    let bits: Vec<bool> = field.iter().collect();
    assert_eq!(bits, model);
    let set: Vec<usize> = field.set_bits().collect();
    let expected: Vec<usize> = (0..len).filter(|&i| model[i]).collect();
    assert_eq!(set, expected);
    let unset: Vec<usize> = field.not_set_bits().collect();
    let expected: Vec<usize> = (0..len).filter(|&i| !model[i]).collect();
    assert_eq!(unset, expected);
}

fuzz_target!(|input: FuzzInput| {
    fuzz(input);
});
