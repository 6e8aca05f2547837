//! One-dimensional cellular automaton over a fixed-width circular row.
//!
//! A [`Universe`](universe::Universe) owns the current generation as a packed
//! [`BitRow`](row::BitRow) and advances it with a [`RuleTable`](rule::RuleTable)
//! that maps every `window`-cell neighbourhood to the cell's next state.

pub(crate) mod bits;
pub mod error;
pub mod history;
pub mod row;
pub mod rule;
pub mod universe;

pub use error::{Error, Result};
