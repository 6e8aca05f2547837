use algo::rule::RuleTable;
use algo::universe::Anchor;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "crucial-experiment")]
#[command(about = "Runs a one-dimensional cellular automaton and prints every generation")]
pub struct Cli {
  /// Half-width of the row; the row has 2 * span + 1 cells
  #[arg(long, env = "CRUCIAL_SPAN", default_value = "40")]
  pub span: usize,

  /// Rule as `W<window>:<hex>` or `R<number>` for an elementary rule
  #[arg(long, env = "CRUCIAL_RULE", default_value = "R90")]
  pub rule: RuleTable,

  /// Where each cell's window starts: `leading` or `centered`
  #[arg(long, env = "CRUCIAL_ANCHOR", default_value = "centered")]
  pub anchor: Anchor,

  /// Generations to step, defaults to `span`; the seed row and every
  /// generation after it are printed
  #[arg(long, env = "CRUCIAL_GENERATIONS")]
  pub generations: Option<usize>,

  /// Start from a random row instead of a single centre cell
  #[arg(long)]
  pub random: bool,

  /// Seed for `--random`
  #[arg(long, env = "CRUCIAL_SEED")]
  pub seed: Option<u64>,

  /// Stop as soon as a generation repeats
  #[arg(long)]
  pub stop_on_cycle: bool,

  /// `tracing` filter directives, e.g. `info` or `algo=trace`
  #[arg(long, env = "CRUCIAL_LOG", default_value = "info", value_parser = log_filter)]
  pub log_level: String,
}

fn log_filter(s: &str) -> Result<String, String> {
  EnvFilter::try_new(s).map(|_| s.to_owned()).map_err(|e| e.to_string())
}

impl Cli {
  pub fn generations(&self) -> usize {
    self.generations.unwrap_or(self.span)
  }
}
