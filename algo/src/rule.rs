use std::fmt::{self, Debug, Display};
use std::str::FromStr;
use regex::Regex;
use crate::error::{Error, Result};
use crate::row::BitRow;

/// Widest neighbourhood a table may cover (`2^24` outcomes).
pub const MAX_WINDOW: u32 = 24;

/// Lookup table from a `window`-cell neighbourhood to the next cell state.
///
/// A neighbourhood is indexed with the cell at the lowest position as the most
/// significant bit, so for `window = 3` the index of `(a, b, c)` is
/// `a << 2 | b << 1 | c`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RuleTable {
  window: u32,
  outcomes: BitRow,
}

impl RuleTable {
  pub fn new(window: u32) -> Result<Self> {
    if window < 1 || window > MAX_WINDOW {
      return Err(Error::InvalidConfiguration(format!(
        "rule window must be between 1 and {}, got {}", MAX_WINDOW, window)));
    }
    Ok(Self {
      window,
      outcomes: BitRow::new(1 << window)?,
    })
  }

  /// Wolfram's elementary rule `number` over a three-cell window.
  ///
  /// Used with a centered [`Anchor`](crate::universe::Anchor) this steps
  /// exactly like the classic rule.
  pub fn elementary(number: u8) -> Self {
    // eight outcomes fill exactly one unit, bit `i` being `outcome(i)`
    Self {
      window: 3,
      outcomes: BitRow::from_raw(8, Box::new([number])),
    }
  }

  pub fn from_fn(window: u32, mut f: impl FnMut(usize) -> bool) -> Result<Self> {
    let mut table = Self::new(window)?;
    for index in 0..table.len() {
      table.outcomes.put(index, f(index));
    }
    Ok(table)
  }

  pub fn window(&self) -> u32 {
    self.window
  }

  /// Number of outcomes, `2^window`.
  pub fn len(&self) -> usize {
    self.outcomes.width()
  }

  pub fn get_outcome(&self, index: usize) -> Result<bool> {
    self.outcomes.get(index)
  }

  pub fn set_outcome(&mut self, index: usize, value: bool) -> Result<()> {
    self.outcomes.set(index, value)
  }

  /// Outcomes packed the same way as a [`BitRow`].
  pub fn as_bytes(&self) -> &[u8] {
    self.outcomes.as_bytes()
  }

  #[inline]
  pub(crate) fn lookup(&self, index: usize) -> bool {
    self.outcomes.bit(index)
  }
}

impl Default for RuleTable {
  fn default() -> Self {
    Self {
      window: 1,
      outcomes: BitRow::from_raw(2, Box::new([0])),
    }
  }
}

/// `W<window>:<hex>`, where bit `k` of the hex number is `outcome(k)`.
impl Display for RuleTable {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "W{}:", self.window)?;
    let digits = hex_digits(self.len());
    for d in (0..digits).rev() {
      let mut nibble = 0u8;
      for b in 0..4 {
        let index = d * 4 + b;
        if index < self.len() && self.lookup(index) {
          nibble |= 1 << b;
        }
      }
      write!(f, "{:x}", nibble)?;
    }
    Ok(())
  }
}

impl Debug for RuleTable {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "RuleTable({})", self)
  }
}

/// Parses `W<window>:<hex>`, or `R<n>` / `rule <n>` for an elementary rule.
impl FromStr for RuleTable {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let s = s.trim();
    let invalid = || Error::InvalidRule(s.to_owned());

    let rule_re = Regex::new(
      r"^(?:(?i:r|rule)\s*(?P<number>\d+)|[Ww](?P<window>\d+):(?P<hex>[0-9A-Fa-f]+))$"
    ).expect("valid regex");
    let caps = rule_re.captures(s).ok_or_else(invalid)?;
    if let Some(number) = caps.name("number") {
      let number = number.as_str().parse::<u8>().map_err(|_| invalid())?;
      return Ok(Self::elementary(number));
    }

    let window = caps["window"].parse::<u32>().map_err(|_| invalid())?;
    let mut table = Self::new(window)?;

    let hex = caps["hex"].trim_start_matches('0');
    if hex.len() > hex_digits(table.len()) {
      return Err(invalid());
    }
    for (d, c) in hex.chars().rev().enumerate() {
      let nibble = c.to_digit(16).ok_or_else(invalid)?;
      for b in 0..4 {
        if nibble >> b & 1 == 0 {
          continue;
        }
        let index = d * 4 + b;
        if index >= table.len() {
          return Err(invalid());
        }
        table.outcomes.put(index, true);
      }
    }
    Ok(table)
  }
}

fn hex_digits(len: usize) -> usize {
  (len + 3) / 4
}
