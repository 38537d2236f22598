use annealing_core::core::{Annealer, LocalOpt, MoveManager, NullSink};
use annealing_core::problems::{parse_tsplib, SortMoveManager};
use annealing_core::AnnealingError;
use clap::{App, Arg};
use log::info;
use std::fs;
use std::process;

fn main() {
  env_logger::init();

  let matches = App::new("annealing-core")
    .version("1.0")
    .about("A generic simulated-annealing optimizer for discrete combinatorial problems")
    .arg(
      Arg::with_name("problem")
        .long("problem")
        .help("Demo problem to run")
        .possible_values(&["tsp", "sort"])
        .takes_value(true)
        .required(true),
    )
    .arg(
      Arg::with_name("solver")
        .long("solver")
        .help("Solver to use")
        .possible_values(&["anneal", "local-opt", "anneal-then-local-opt"])
        .takes_value(true)
        .required(true),
    )
    .arg(
      Arg::with_name("instance")
        .long("instance")
        .help("Instance file name (required for --problem tsp)")
        .takes_value(true)
        .required_if("problem", "tsp"),
    )
    .arg(
      Arg::with_name("size")
        .long("size")
        .help("Number of elements to shuffle and sort (required for --problem sort)")
        .takes_value(true)
        .required_if("problem", "sort"),
    )
    .arg(
      Arg::with_name("seed")
        .long("seed")
        .help("Seed for the shuffle/move-generation rng")
        .takes_value(true)
        .default_value("1"),
    )
    .get_matches();

  let problem = matches.value_of("problem").expect("missing problem");
  let solver = matches.value_of("solver").expect("missing solver");
  let seed: u32 = matches
    .value_of("seed")
    .and_then(|s| s.parse().ok())
    .expect("invalid seed");

  let result = match problem {
    "tsp" => run_tsp(&matches, solver),
    "sort" => run_sort(&matches, solver, seed),
    _ => unreachable!("clap restricts --problem to known values"),
  };

  if let Err(err) = result {
    eprintln!("error: {}", err);
    process::exit(1);
  }
}

fn run_tsp(matches: &clap::ArgMatches, solver: &str) -> Result<(), AnnealingError> {
  let file = matches.value_of("instance").expect("missing instance");
  let contents = fs::read_to_string(file).map_err(|source| AnnealingError::Io {
    path: file.to_string(),
    source,
  })?;
  let mut mm = parse_tsplib(&contents)?;
  run_solver(&mut mm, solver);
  println!("{}", mm.score());
  Ok(())
}

fn run_sort(matches: &clap::ArgMatches, solver: &str, seed: u32) -> Result<(), AnnealingError> {
  let size: usize = matches
    .value_of("size")
    .and_then(|s| s.parse().ok())
    .ok_or_else(|| AnnealingError::InvalidArgument {
      arg: "size".to_string(),
      reason: "must be a positive integer".to_string(),
    })?;

  let mut shuffler = annealing_core::Rng::new(seed);
  let mut data: Vec<i64> = (0..size as i64).collect();
  // Fisher-Yates, drawing from the same rng the CLI seeds everything else with.
  for i in (1..data.len()).rev() {
    let j = shuffler.rand_range((i + 1) as u32) as usize;
    data.swap(i, j);
  }

  let mut mm = SortMoveManager::new(data)?;
  run_solver(&mut mm, solver);
  println!("{}", mm.score());
  Ok(())
}

fn run_solver<M: MoveManager>(mm: &mut M, solver: &str) {
  match solver {
    "anneal" => {
      let mut annealer = Annealer::new(NullSink);
      let report = annealer.optimize(mm);
      info!(
        "finished: best_cost={}, final_temperature={}, equilibria_run={}, termination={:?}",
        report.best_cost, report.final_temperature, report.equilibria_run, report.termination
      );
    }
    "local-opt" => {
      let mut opt = LocalOpt::new(1);
      opt.optimize(mm);
    }
    "anneal-then-local-opt" => {
      let mut annealer = Annealer::new(NullSink);
      annealer.optimize(mm);
      let mut opt = LocalOpt::new(1);
      opt.optimize(mm);
    }
    _ => unreachable!("clap restricts --solver to known values"),
  }
}
