mod config;
mod host;

use std::error::Error;
use algo::universe::Universe;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use crate::config::Cli;

fn main() -> Result<(), Box<dyn Error>> {
  let cli = Cli::parse();

  fmt()
    .with_env_filter(EnvFilter::try_new(&cli.log_level)?)
    .with_writer(std::io::stderr)
    .compact()
    .init();

  let mut uni = Universe::with_anchor(cli.span, cli.anchor)?;
  if cli.random {
    match cli.seed {
      Some(seed) => uni.randomize(&mut StdRng::seed_from_u64(seed)),
      None => uni.randomize(&mut rand::thread_rng()),
    }
  } else {
    uni.seed_center();
  }

  info!(
    span = cli.span,
    width = uni.width(),
    rule = %cli.rule,
    anchor = ?cli.anchor,
    "starting"
  );

  let limit = cli.generations();
  host::run(&mut uni, &cli.rule, limit, cli.stop_on_cycle, |_, row| println!("{}", row))?;

  info!(generations = limit, population = uni.count_active(), "done");
  Ok(())
}
