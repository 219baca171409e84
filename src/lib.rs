//! An ordered bidirectional map.
//!
//! [`Bimap`] keeps pairs `(left, right)` such that no left key and no right key repeats,
//! and can be searched, bounded and iterated in order from either side. Each side is a
//! treap (see [`trees::treap`]), and both treaps are made of the same pair records (see
//! [`trees::dual_node`]), so every pair is stored once and found from both directions in
//! expected logarithmic time.

pub mod bimap;
pub mod compare;
pub mod config;
pub mod error;
pub mod trees;

pub use bimap::{Bimap, Cursor, LeftCursor, RightCursor};
pub use compare::{Compare, Natural, Reversed};
pub use config::Builder;
pub use error::{Error, Result};
pub use trees::iterators::Iter;
pub use trees::{Left, Right, Side, View};
