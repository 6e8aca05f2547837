use std::fmt;
use std::mem;
use std::str::FromStr;
use rand::Rng;
use tracing::{debug, trace};
use crate::bits::*;
use crate::error::{Error, Result};
use crate::row::BitRow;
use crate::rule::RuleTable;

/// Where a cell's neighbourhood window starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
  /// Window covers `i .. i + window`.
  Leading,
  /// Window covers `i - (window - 1) / 2 ..`, i.e. left/self/right for three
  /// cells.
  Centered,
}

impl Default for Anchor {
  fn default() -> Self {
    Anchor::Leading
  }
}

impl FromStr for Anchor {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s.to_ascii_lowercase().as_str() {
      "leading" => Ok(Anchor::Leading),
      "centered" | "centred" => Ok(Anchor::Centered),
      other => Err(Error::InvalidConfiguration(format!(
        "unknown anchor {:?} (expected leading or centered)", other))),
    }
  }
}

/// A circular row of `2 * span + 1` cells and its evolution.
pub struct Universe {
  span: usize,
  anchor: Anchor,
  cells: BitRow,
  /// Next generation is written here, then swapped with `cells`.
  scratch: BitRow,
}

impl Universe {
  pub fn new(span: usize) -> Result<Self> {
    Self::with_anchor(span, Anchor::default())
  }

  pub fn with_anchor(span: usize, anchor: Anchor) -> Result<Self> {
    let width = width_for_span(span)?;
    debug!(span, width, ?anchor, "new universe");
    Ok(Self {
      span,
      anchor,
      cells: BitRow::new(width)?,
      scratch: BitRow::new(width)?,
    })
  }

  /// Replaces the row with an empty one of the new span.
  pub fn reset(&mut self, span: usize) -> Result<()> {
    *self = Self::with_anchor(span, self.anchor)?;
    Ok(())
  }

  pub fn span(&self) -> usize {
    self.span
  }

  pub fn width(&self) -> usize {
    self.cells.width()
  }

  pub fn anchor(&self) -> Anchor {
    self.anchor
  }

  pub fn set_anchor(&mut self, anchor: Anchor) {
    self.anchor = anchor;
  }

  pub fn row(&self) -> &BitRow {
    &self.cells
  }

  /// Current generation packed as described on [`BitRow`].
  pub fn cells(&self) -> &[u8] {
    self.cells.as_bytes()
  }

  pub fn count_active(&self) -> usize {
    self.cells.count_active()
  }

  pub fn get(&self, index: usize) -> Result<bool> {
    self.cells.get(index)
  }

  pub fn set(&mut self, index: usize, alive: bool) -> Result<()> {
    self.cells.set(index, alive)
  }

  /// Clears the row and activates the middle cell.
  pub fn seed_center(&mut self) {
    self.cells.clear();
    self.cells.put(self.span, true);
  }

  pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    self.cells.randomize(rng);
  }

  /// Advances one generation.
  ///
  /// Each cell reads `rules.window()` consecutive cells, wrapping around the
  /// ends of the row, packs them with the lowest position as the most
  /// significant bit and takes the table's outcome for that index. All cells
  /// are computed from the current generation before any is replaced.
  pub fn step(&mut self, rules: &RuleTable) -> Result<()> {
    let width = self.width();
    let window = rules.window() as usize;
    if window > width {
      return Err(Error::RuleTableMismatch { window: rules.window(), width });
    }

    let start = match self.anchor {
      Anchor::Leading => 0,
      Anchor::Centered => width - (window - 1) / 2,
    };
    let mask = (1usize << window) - 1;

    let mut index = 0usize;
    for k in 0..window {
      index = index << 1 | self.cells.bit(wrap(start + k, width)) as usize;
    }
    for i in 0..width {
      self.scratch.put(i, rules.lookup(index));
      // slide the window one cell to the right
      let incoming = self.cells.bit(wrap(start + i + window, width));
      index = (index << 1 | incoming as usize) & mask;
    }

    mem::swap(&mut self.cells, &mut self.scratch);
    trace!(width, window, "stepped");
    Ok(())
  }

  /// `num_gen` is number of generations.
  pub fn simulate(&mut self, rules: &RuleTable, num_gen: usize) -> Result<()> {
    for _ in 0..num_gen {
      self.step(rules)?;
    }
    Ok(())
  }
}

impl fmt::Debug for Universe {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Universe")
      .field("span", &self.span)
      .field("anchor", &self.anchor)
      .field("cells", &self.cells)
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  fn universe(row: &str, anchor: Anchor) -> Universe {
    let row: BitRow = row.parse().unwrap();
    let mut uni = Universe::with_anchor(row.width() / 2, anchor).unwrap();
    for (i, alive) in row.iter().enumerate() {
      uni.set(i, alive).unwrap();
    }
    uni
  }

  /// Cell-by-cell version of `step` for comparison.
  fn naive_step(row: &BitRow, rules: &RuleTable, anchor: Anchor) -> BitRow {
    let width = row.width() as isize;
    let window = rules.window() as isize;
    let offset = match anchor {
      Anchor::Leading => 0,
      Anchor::Centered => -(window - 1) / 2,
    };
    let next = (0..width).map(|i| {
      let mut index = 0;
      for k in 0..window {
        let pos = (i + offset + k).rem_euclid(width) as usize;
        index = index * 2 + row.get(pos).unwrap() as usize;
      }
      rules.get_outcome(index).unwrap()
    });
    BitRow::from_bools(next).unwrap()
  }

  #[test]
  fn test_new_is_empty() {
    let uni = Universe::new(3).unwrap();
    assert_eq!(uni.span(), 3);
    assert_eq!(uni.width(), 7);
    assert_eq!(uni.cells(), &[0]);
    assert_eq!(uni.count_active(), 0);
    assert_eq!(uni.anchor(), Anchor::Leading);
  }

  #[test]
  fn test_zero_span() {
    assert!(matches!(Universe::new(0), Err(Error::InvalidConfiguration(_))));
  }

  #[test]
  fn test_span_too_large() {
    assert!(matches!(Universe::new(usize::MAX / 2), Err(Error::InvalidConfiguration(_))));
    assert!(matches!(Universe::new(usize::MAX / 2 + 1), Err(Error::InvalidConfiguration(_))));
  }

  #[test]
  fn test_new_ignores_history() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut uni = Universe::new(20).unwrap();
    uni.randomize(&mut rng);
    uni.step(&RuleTable::elementary(30)).unwrap();
    let fresh = Universe::new(20).unwrap();
    assert_eq!(fresh.count_active(), 0);
    assert_eq!(fresh.cells(), &[0u8; 6][..]);
  }

  #[test]
  fn test_window_one_identity() {
    let mut uni = universe("...#...", Anchor::Leading);
    let mut rules = RuleTable::new(1).unwrap();
    rules.set_outcome(1, true).unwrap();
    rules.set_outcome(0, false).unwrap();
    uni.step(&rules).unwrap();
    assert_eq!(uni.row().to_string(), "...#...");
    assert_eq!(uni.count_active(), 1);
  }

  #[test]
  fn test_window_one_invert() {
    let mut uni = universe("...#...", Anchor::Leading);
    let mut rules = RuleTable::new(1).unwrap();
    rules.set_outcome(0, true).unwrap();
    uni.step(&rules).unwrap();
    assert_eq!(uni.row().to_string(), "###.###");
    assert_eq!(uni.cells(), &[0b0111_0111]);
  }

  #[test]
  fn test_leading_window_order() {
    // index 0b001 fires only when the cell two to the right is active
    let mut rules = RuleTable::new(3).unwrap();
    rules.set_outcome(0b001, true).unwrap();
    let mut uni = universe("....#....", Anchor::Leading);
    uni.step(&rules).unwrap();
    assert_eq!(uni.row().to_string(), "..#......");
  }

  #[test]
  fn test_centered_wraps() {
    let mut uni = universe("#......", Anchor::Centered);
    uni.step(&RuleTable::elementary(90)).unwrap();
    assert_eq!(uni.row().to_string(), ".#....#");
  }

  #[test]
  fn test_leading_wraps() {
    let mut rules = RuleTable::new(2).unwrap();
    rules.set_outcome(0b01, true).unwrap();
    let mut uni = universe("#....", Anchor::Leading);
    uni.step(&rules).unwrap();
    assert_eq!(uni.row().to_string(), "....#");
  }

  #[test]
  fn test_matches_naive() {
    let mut rng = StdRng::seed_from_u64(99);
    for &anchor in &[Anchor::Leading, Anchor::Centered] {
      for window in 1..=5 {
        let mut rules = RuleTable::new(window).unwrap();
        for i in 0..rules.len() {
          rules.set_outcome(i, rng.gen()).unwrap();
        }
        let mut uni = Universe::with_anchor(17, anchor).unwrap();
        uni.randomize(&mut rng);
        for _ in 0..8 {
          let expected = naive_step(uni.row(), &rules, anchor);
          uni.step(&rules).unwrap();
          assert_eq!(uni.row(), &expected);
        }
      }
    }
  }

  #[test]
  fn test_step_deterministic() {
    let mut rng = StdRng::seed_from_u64(5);
    let rules = RuleTable::elementary(110);
    let mut a = Universe::with_anchor(50, Anchor::Centered).unwrap();
    a.randomize(&mut rng);
    let mut b = Universe::with_anchor(50, Anchor::Centered).unwrap();
    for (i, alive) in a.row().iter().enumerate() {
      b.set(i, alive).unwrap();
    }
    a.step(&rules).unwrap();
    b.step(&rules).unwrap();
    assert_eq!(a.row(), b.row());
  }

  #[test]
  fn test_window_wider_than_row() {
    let mut uni = universe(".#.", Anchor::Leading);
    let rules = RuleTable::new(4).unwrap();
    assert_eq!(uni.step(&rules), Err(Error::RuleTableMismatch { window: 4, width: 3 }));
    assert_eq!(uni.row().to_string(), ".#.");
  }

  #[test]
  fn test_window_equal_to_row() {
    let mut uni = universe("#..", Anchor::Leading);
    let rules = RuleTable::from_fn(3, |i| i == 0b100).unwrap();
    uni.step(&rules).unwrap();
    assert_eq!(uni.row().to_string(), "#..");
  }

  #[test]
  fn test_seed_center_and_reset() {
    let mut uni = Universe::new(4).unwrap();
    uni.seed_center();
    assert_eq!(uni.row().to_string(), "....#....");
    uni.reset(2).unwrap();
    assert_eq!(uni.span(), 2);
    assert_eq!(uni.row().to_string(), ".....");
    assert!(uni.reset(0).is_err());
    assert_eq!(uni.span(), 2);
  }

  #[test]
  fn test_simulate() {
    let mut uni = Universe::with_anchor(4, Anchor::Centered).unwrap();
    uni.seed_center();
    uni.simulate(&RuleTable::elementary(254), 3).unwrap();
    assert_eq!(uni.row().to_string(), ".#######.");
  }

  #[test]
  fn test_padding_after_step() {
    let mut rules = RuleTable::new(1).unwrap();
    rules.set_outcome(0, true).unwrap();
    rules.set_outcome(1, true).unwrap();
    let mut uni = Universe::new(4).unwrap();
    uni.step(&rules).unwrap();
    assert_eq!(uni.cells(), &[0xff, 0x01]);
    assert_eq!(uni.count_active(), 9);
  }

  #[test]
  fn test_parse_anchor() {
    assert_eq!("Centered".parse::<Anchor>(), Ok(Anchor::Centered));
    assert_eq!("leading".parse::<Anchor>(), Ok(Anchor::Leading));
    assert!("middle".parse::<Anchor>().is_err());
  }
}
