//! A probabilistic ordered set.
//!
//! Items sit on layer 0 in ascending order; each node is also linked on a
//! random number of layers above it, every extra layer with probability 1/2,
//! which gives expected `O(log n)` insert, search and remove without any
//! rebalancing. Nodes live in an index-addressed arena, so links are plain
//! slot numbers.
//!
//! ```
//! use skiplist::{Config, SkipList};
//!
//! let mut list = SkipList::with_config(Config::new().max_layers(8).seed(1)).unwrap();
//! for v in [5, 3, 8, 1, 9].iter() {
//!     list.insert(*v);
//! }
//! assert_eq!(list.search(&8).map(|node| *node.item()), Some(8));
//! assert!(list.search(&100).is_none());
//! list.remove(&3);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 5, 8, 9]);
//! ```
//!
//! A `SkipList` is not synchronized; share it behind one lock, e.g. a
//! `Mutex`, held for each operation.

mod arena;
pub mod config;
pub mod error;
mod iter;
mod render;
mod skiplist;
mod stats;

pub use crate::arena::SkipNode;
pub use crate::config::Config;
pub use crate::error::{Error, Result};
pub use crate::iter::{Iter, LayerIter, Layers, Nodes};
pub use crate::skiplist::SkipList;
pub use crate::stats::LayerHistogram;
