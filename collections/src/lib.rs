//! Specialized containers for bit-addressable spaces, very large sequences, and prioritized work.
//!
//! # Overview
//!
//! - [Bitfield]: a fixed-length set of bits packed into 32-bit words, with word-level range
//!   updates and iterators over set/unset positions.
//! - [LongList] and [LongHashSet]: append-only collections that shard their elements across
//!   fixed-capacity blocks so they can hold more elements than a single `Vec` or `HashSet`.
//! - [PriorityQueue]: a binary heap that keeps its smallest entry on top.
//!
//! None of the containers synchronize access internally. Wrap them in a lock if they must be
//! shared between threads.
//!
//! # Status
//!
//! `commonware-collections` is **ALPHA** software and is not yet recommended for production use.
//! Developers should expect breaking changes and occasional instability.

pub mod bitfield;
pub use bitfield::Bitfield;
mod error;
pub use error::Error;
pub mod priority_queue;
pub use priority_queue::PriorityQueue;
pub mod segmented;
pub use segmented::{LongHashSet, LongList};

/// A macro to create a `NonZeroUsize` from a value, panicking if the value is zero.
#[macro_export]
macro_rules! NZUsize {
    ($val:expr) => {
        // This will panic at runtime if $val is zero.
        ::core::num::NonZeroUsize::new($val).expect("value must be non-zero")
    };
}
