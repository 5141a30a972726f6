pub mod sorted_map;

pub use sorted_map::{Iter, SortedMap};
