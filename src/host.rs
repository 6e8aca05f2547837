use algo::history::{Cycle, History};
use algo::row::BitRow;
use algo::rule::RuleTable;
use algo::universe::Universe;
use algo::Result;
use tracing::info;

/// Hands generations `0..=limit` to `emit`, stepping between them.
///
/// With `stop_on_cycle`, stops after emitting the first repeated generation
/// and returns the cycle it closes.
pub fn run(
  uni: &mut Universe,
  rules: &RuleTable,
  limit: usize,
  stop_on_cycle: bool,
  mut emit: impl FnMut(usize, &BitRow),
) -> Result<Option<Cycle>> {
  let mut history = History::new();
  for generation in 0..=limit {
    if generation > 0 {
      uni.step(rules)?;
    }
    emit(generation, uni.row());
    if stop_on_cycle {
      if let Some(cycle) = history.record(uni.row()) {
        info!(generation, start = cycle.start, period = cycle.period, "row repeats, stopping");
        return Ok(Some(cycle));
      }
    }
  }
  Ok(None)
}

#[cfg(test)]
mod tests {
  use super::*;
  use algo::universe::Anchor;
  use pretty_assertions::assert_eq;

  fn rows(uni: &mut Universe, rules: &RuleTable, limit: usize, stop: bool) -> (Vec<String>, Option<Cycle>) {
    let mut out = vec![];
    let cycle = run(uni, rules, limit, stop, |_, row| out.push(row.to_string())).unwrap();
    (out, cycle)
  }

  #[test]
  fn test_emits_last_generation() {
    let mut uni = Universe::with_anchor(3, Anchor::Centered).unwrap();
    uni.seed_center();
    let (out, cycle) = rows(&mut uni, &RuleTable::elementary(254), 3, false);
    assert_eq!(out, vec!["...#...", "..###..", ".#####.", "#######"]);
    assert_eq!(cycle, None);
  }

  #[test]
  fn test_zero_limit() {
    let mut uni = Universe::new(2).unwrap();
    uni.seed_center();
    let (out, _) = rows(&mut uni, &RuleTable::elementary(90), 0, false);
    assert_eq!(out, vec!["..#.."]);
  }

  #[test]
  fn test_stop_on_cycle() {
    let mut uni = Universe::with_anchor(3, Anchor::Centered).unwrap();
    uni.seed_center();
    let (out, cycle) = rows(&mut uni, &RuleTable::elementary(254), 10, true);
    assert_eq!(out, vec!["...#...", "..###..", ".#####.", "#######", "#######"]);
    assert_eq!(cycle, Some(Cycle { start: 3, period: 1 }));
  }
}
