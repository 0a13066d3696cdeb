//! Generic containers and algorithms shared by the spatial index and the
//! director: a chained hash map, a binary min-heap, a bounded stack, and
//! plain sorting / searching routines over slices.

pub mod hash_map;
pub mod priority_queue;
pub mod search;
pub mod sorting;
pub mod stack;

pub use hash_map::HashMap;
pub use priority_queue::PriorityQueue;
pub use stack::Stack;
