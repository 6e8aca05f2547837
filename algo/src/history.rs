use indexmap::IndexSet;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;
use tracing::debug;
use crate::error::Result;
use crate::row::BitRow;
use crate::rule::RuleTable;
use crate::universe::Universe;

/// A row seen twice. Generation `start + period` equals generation `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycle {
  pub start: usize,
  pub period: usize,
}

/// Every distinct generation recorded so far, in order.
///
/// The position of a row in the set is the generation it first appeared in.
#[derive(Default)]
pub struct History {
  seen: IndexSet<Box<[u8]>, BuildHasherDefault<FxHasher>>,
}

impl History {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records the next generation, or reports the cycle it closes.
  ///
  /// A repeated row is not stored, so after a cycle is found `len()` stays at
  /// the number of distinct generations.
  pub fn record(&mut self, row: &BitRow) -> Option<Cycle> {
    let generation = self.seen.len();
    let (first, new) = self.seen.insert_full(row.as_bytes().into());
    if new {
      None
    } else {
      let cycle = Cycle { start: first, period: generation - first };
      debug!(start = cycle.start, period = cycle.period, "cycle detected");
      Some(cycle)
    }
  }

  pub fn len(&self) -> usize {
    self.seen.len()
  }

  pub fn is_empty(&self) -> bool {
    self.seen.is_empty()
  }

  /// Packed cells of `generation`.
  pub fn get(&self, generation: usize) -> Option<&[u8]> {
    self.seen.get_index(generation).map(|row| &**row)
  }

  pub fn clear(&mut self) {
    self.seen.clear();
  }
}

/// Steps `uni` until a generation repeats, at most `limit` times.
///
/// The universe is left at the first repeated generation.
pub fn find_cycle(
  uni: &mut Universe,
  rules: &RuleTable,
  limit: usize,
) -> Result<Option<Cycle>> {
  let mut history = History::new();
  if let Some(cycle) = history.record(uni.row()) {
    return Ok(Some(cycle));
  }
  for _ in 0..limit {
    uni.step(rules)?;
    if let Some(cycle) = history.record(uni.row()) {
      return Ok(Some(cycle));
    }
  }
  Ok(None)
}
