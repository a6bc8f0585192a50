//! Ordered in-memory map, kept balanced as a Left Leaning Red Black tree.
//!
//! ```
//! use llrb_map::Llrb;
//!
//! let mut llrb: Llrb<i64, i64> = Llrb::new("example");
//! for key in &[5, 3, 7, 2, 4, 6, 8] {
//!     llrb.insert(*key, key * 100);
//! }
//! assert_eq!(llrb.get(&7), Some(700));
//! assert_eq!(llrb.delete(&7), Some(700));
//! assert_eq!(llrb.get(&7), None);
//!
//! let keys: Vec<i64> = llrb.iter().map(|(key, _)| key).collect();
//! assert_eq!(keys, vec![2, 3, 4, 5, 6, 8]);
//! ```

mod depth;
mod empty;
mod error;
mod llrb;

pub use crate::depth::Depth;
pub use crate::empty::Empty;
pub use crate::error::LlrbError;
pub use crate::llrb::{Iter, Llrb, Range, Reverse, Stats, ITER_LIMIT};

#[cfg(test)]
mod llrb_test;
