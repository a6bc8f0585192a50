// Performance measurement for Llrb instances. Measure:
// * Initial load of N random keys.
// * Set operation, overwrite the loaded data set.
// * Get operation over the loaded data set.
// * Delete operation over the loaded data set.
//
// For each operation log the elapsed time and the per-op latency, and
// validate the tree with its depth statistics once loaded.
//
// usage: llrb-perf [load-count] [seed]

use std::{env, process, time::Instant};

use log::{error, info};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use llrb_map::Llrb;

const DEFAULT_LOAD: usize = 1_000_000;
const DEFAULT_SEED: u128 = 0x5eed;

struct Opts {
    load: usize,
    seed: u128,
}

impl Opts {
    fn from_args<I>(mut args: I) -> Result<Opts, String>
    where
        I: Iterator<Item = String>,
    {
        let load = match args.next() {
            Some(arg) => arg
                .parse()
                .map_err(|err| format!("invalid load-count {:?}: {}", arg, err))?,
            None => DEFAULT_LOAD,
        };
        let seed = match args.next() {
            Some(arg) => arg
                .parse()
                .map_err(|err| format!("invalid seed {:?}: {}", arg, err))?,
            None => DEFAULT_SEED,
        };
        Ok(Opts { load, seed })
    }
}

fn main() {
    let level = LevelFilter::Info;
    let config = Config::default();
    let color = ColorChoice::Auto;
    if let Err(err) = TermLogger::init(level, config, TerminalMode::Mixed, color) {
        eprintln!("llrb-perf: unable to initialize logger: {}", err);
    }

    let opts = match Opts::from_args(env::args().skip(1)) {
        Ok(opts) => opts,
        Err(err) => {
            error!("{}", err);
            process::exit(2);
        }
    };

    let mut rng = SmallRng::from_seed(opts.seed.to_le_bytes());
    let keys: Vec<i64> = (0..opts.load).map(|_| rng.gen()).collect();
    let mut llrb: Llrb<i64, i64> = Llrb::new("llrb-perf");

    let start = Instant::now();
    for key in keys.iter() {
        llrb.insert(*key, *key);
    }
    report("load", keys.len(), start);

    match llrb.validate() {
        Ok(stats) => {
            info!("entries:{} blacks:{:?}", stats.entries(), stats.blacks());
            if let Some(depths) = stats.depths() {
                depths.log_summary("  ");
            }
        }
        Err(err) => {
            error!("validate: {}", err);
            process::exit(1);
        }
    }

    let start = Instant::now();
    for key in keys.iter() {
        llrb.insert(*key, key.wrapping_add(1));
    }
    report("set", keys.len(), start);

    let start = Instant::now();
    let found = keys.iter().filter(|key| llrb.get(*key).is_some()).count();
    report("get", found, start);

    let start = Instant::now();
    let deleted = keys.iter().filter(|key| llrb.delete(*key).is_some()).count();
    report("delete", deleted, start);

    info!("remaining entries {}", llrb.len());
}

fn report(op: &str, n: usize, start: Instant) {
    let elapsed = start.elapsed();
    let per_op = match n {
        0 => 0,
        n => elapsed.as_nanos() / (n as u128),
    };
    info!("{:<6} {} ops in {:?}, {}ns per op", op, n, elapsed, per_op);
}
