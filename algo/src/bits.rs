use crate::error::{Error, Result};

/// Cells per storage unit.
pub(crate) const UNIT_BITS: usize = 8;

/// Number of bytes needed to hold `width` cells.
pub(crate) const fn byte_len(width: usize) -> usize {
  width / UNIT_BITS + (width % UNIT_BITS != 0) as usize
}

/// `(unit, mask)` of cell `index`, least-significant bit first.
#[inline]
pub(crate) const fn locate(index: usize) -> (usize, u8) {
  (index / UNIT_BITS, 1 << (index % UNIT_BITS))
}

/// Mask of the bits of the final unit that hold cells.
pub(crate) const fn tail_mask(width: usize) -> u8 {
  match width % UNIT_BITS {
    0 => !0,
    rem => !(!0u8 << rem),
  }
}

#[inline]
pub(crate) fn wrap(index: usize, width: usize) -> usize {
  if index < width { index } else { index % width }
}

pub(crate) fn width_for_span(span: usize) -> Result<usize> {
  if span == 0 {
    return Err(Error::InvalidConfiguration("span must be at least 1".to_owned()));
  }
  span.checked_mul(2)
    .and_then(|w| w.checked_add(1))
    .ok_or_else(|| Error::InvalidConfiguration(format!("span {} is too large", span)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_byte_len_rounds_up() {
    assert_eq!(byte_len(1), 1);
    assert_eq!(byte_len(7), 1);
    assert_eq!(byte_len(8), 1);
    assert_eq!(byte_len(9), 2);
    assert_eq!(byte_len(401), 51);
    assert_eq!(byte_len(usize::MAX), usize::MAX / 8 + 1);
  }

  #[test]
  fn test_locate() {
    assert_eq!(locate(0), (0, 0b0000_0001));
    assert_eq!(locate(7), (0, 0b1000_0000));
    assert_eq!(locate(10), (1, 0b0000_0100));
  }

  #[test]
  fn test_tail_mask() {
    assert_eq!(tail_mask(7), 0b0111_1111);
    assert_eq!(tail_mask(9), 0b0000_0001);
    assert_eq!(tail_mask(16), 0b1111_1111);
  }

  #[test]
  fn test_wrap() {
    assert_eq!(wrap(3, 7), 3);
    assert_eq!(wrap(7, 7), 0);
    assert_eq!(wrap(15, 7), 1);
  }

  #[test]
  fn test_width_for_span() {
    assert_eq!(width_for_span(3), Ok(7));
    assert!(matches!(width_for_span(0), Err(Error::InvalidConfiguration(_))));
    assert!(matches!(width_for_span(usize::MAX), Err(Error::InvalidConfiguration(_))));
  }
}
