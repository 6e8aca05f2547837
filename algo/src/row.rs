use std::fmt::{self, Debug, Display};
use std::str::FromStr;
use rand::Rng;
use crate::bits::*;
use crate::error::{Error, Result};

/// Fixed-width row of cells packed 8 per byte.
///
/// Cell `n` is bit `n % 8` of byte `n / 8`, least-significant bit first. The
/// unused high bits of the last byte are always zero, so hosts may read
/// [`as_bytes`](BitRow::as_bytes) directly.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitRow {
  width: usize,
  units: Box<[u8]>,
}

impl BitRow {
  pub fn new(width: usize) -> Result<Self> {
    if width == 0 {
      return Err(Error::InvalidConfiguration("row width must be at least 1".to_owned()));
    }
    let len = byte_len(width);
    let mut units = Vec::new();
    units.try_reserve_exact(len).map_err(|_| Error::InvalidConfiguration(
      format!("row width {} does not fit in memory", width)))?;
    units.resize(len, 0u8);
    Ok(Self {
      width,
      units: units.into_boxed_slice(),
    })
  }

  /// `units` must already have its padding bits cleared.
  pub(crate) fn from_raw(width: usize, units: Box<[u8]>) -> Self {
    debug_assert!(width > 0 && units.len() == byte_len(width));
    debug_assert_eq!(units[units.len() - 1] & !tail_mask(width), 0);
    Self { width, units }
  }

  pub fn from_bools(cells: impl IntoIterator<Item = bool>) -> Result<Self> {
    let cells = cells.into_iter().collect::<Vec<_>>();
    let mut row = Self::new(cells.len())?;
    for (i, alive) in cells.into_iter().enumerate() {
      row.put(i, alive);
    }
    Ok(row)
  }

  pub fn width(&self) -> usize {
    self.width
  }

  pub fn get(&self, index: usize) -> Result<bool> {
    self.check(index)?;
    Ok(self.bit(index))
  }

  pub fn set(&mut self, index: usize, value: bool) -> Result<()> {
    self.check(index)?;
    self.put(index, value);
    Ok(())
  }

  /// Number of active cells.
  pub fn count_active(&self) -> usize {
    self.units.iter().map(|u| u.count_ones() as usize).sum()
  }

  /// Packed storage, `ceil(width / 8)` bytes long.
  pub fn as_bytes(&self) -> &[u8] {
    &self.units
  }

  /// Sets every cell independently with probability 1/2.
  pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
    rng.fill(&mut self.units[..]);
    self.mask_tail();
  }

  pub fn clear(&mut self) {
    self.units.fill(0);
  }

  pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
    (0..self.width).map(move |i| self.bit(i))
  }

  #[inline]
  pub(crate) fn bit(&self, index: usize) -> bool {
    let (unit, mask) = locate(index);
    self.units[unit] & mask != 0
  }

  #[inline]
  pub(crate) fn put(&mut self, index: usize, value: bool) {
    let (unit, mask) = locate(index);
    if value {
      self.units[unit] |= mask;
    } else {
      self.units[unit] &= !mask;
    }
  }

  fn check(&self, index: usize) -> Result<()> {
    if index < self.width {
      Ok(())
    } else {
      Err(Error::IndexOutOfRange { index, len: self.width })
    }
  }

  fn mask_tail(&mut self) {
    let mask = tail_mask(self.width);
    if let Some(last) = self.units.last_mut() {
      *last &= mask;
    }
  }
}

impl Display for BitRow {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    for alive in self.iter() {
      f.write_str(if alive { "#" } else { "." })?;
    }
    Ok(())
  }
}

impl Debug for BitRow {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "BitRow({})", self)
  }
}

/// Parses `#`/`o`/`1` as active and `.`/`b`/`0` as inactive cells.
impl FromStr for BitRow {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let cells = s.trim().chars().map(|c| match c {
      '#' | 'o' | '1' => Ok(true),
      '.' | 'b' | '0' => Ok(false),
      _ => Err(Error::InvalidConfiguration(format!("invalid cell character {:?}", c))),
    }).collect::<Result<Vec<_>>>()?;
    Self::from_bools(cells)
  }
}
