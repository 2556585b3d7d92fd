/*!
Command-line configuration.

Flags are parsed with `getopts`, the same crate the teacher's own binary
uses for its CLI surface. Defaults and validation ranges mirror the
reference implementation's `main()` exactly: mesh side length in `2..=16`,
injection rate a percentage in `1..=100`, simulation length at least 100
ticks, routing algorithm one of `XY`/`WEST_FIRST`.
*/

use getopts::Options;

use crate::error::ConfigError;
use crate::routing::Routing;

#[derive(Debug, Clone)]
pub struct Config {
    pub mesh_size: usize,
    pub injection_rate: u32,
    pub sim_ticks: u64,
    pub routing: Routing,
    pub seed: u64,
}

const DEFAULT_MESH_SIZE: usize = 4;
const DEFAULT_INJECTION_RATE: u32 = 10;
const DEFAULT_SIM_TICKS: u64 = 1000;
const DEFAULT_ROUTING: &str = "XY";
const DEFAULT_SEED: u64 = 42;

fn usage(program: &str, opts: &Options) -> String {
    let brief = format!("Usage: {} [options]", program);
    opts.usage(&brief)
}

/// Parse and validate `args` (excluding the program name). `Ok(Err(text))`
/// means `-help`/`-h` was passed and `text` is the usage banner to print.
pub fn parse(program: &str, args: &[String]) -> Result<Result<Config, String>, ConfigError> {
    let mut opts = Options::new();
    opts.optopt("", "size", "side length of the square mesh, 2..=16 (default 4)", "S");
    opts.optopt("", "routing", "routing algorithm: XY or WEST_FIRST (default XY)", "R");
    opts.optopt("", "rate", "per-tick injection rate as a percent, 1..=100 (default 10)", "P");
    opts.optopt("", "time", "number of ticks to generate traffic for, >= 100 (default 1000)", "T");
    opts.optopt("", "seed", "master PRNG seed (default 42)", "SEED");
    opts.optflag("h", "help", "print this help menu");

    let matches = opts
        .parse(args)
        .map_err(|e| ConfigError::ArgumentParsing(e.to_string()))?;

    if matches.opt_present("help") {
        return Ok(Err(usage(program, &opts)));
    }

    let mesh_size = match matches.opt_str("size") {
        Some(raw) => raw.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
            flag: "size",
            value: raw,
        })?,
        None => DEFAULT_MESH_SIZE,
    };
    if !(2..=16).contains(&mesh_size) {
        return Err(ConfigError::OutOfRange {
            flag: "size",
            value: mesh_size.to_string(),
            reason: "mesh size must be between 2 and 16",
        });
    }

    let routing_name = matches.opt_str("routing").unwrap_or_else(|| DEFAULT_ROUTING.to_string());
    let routing = Routing::from_name(&routing_name).ok_or_else(|| ConfigError::InvalidValue {
        flag: "routing",
        value: routing_name.clone(),
    })?;

    let injection_rate = match matches.opt_str("rate") {
        Some(raw) => raw.parse::<u32>().map_err(|_| ConfigError::InvalidValue {
            flag: "rate",
            value: raw,
        })?,
        None => DEFAULT_INJECTION_RATE,
    };
    if !(1..=100).contains(&injection_rate) {
        return Err(ConfigError::OutOfRange {
            flag: "rate",
            value: injection_rate.to_string(),
            reason: "injection rate is a percentage, must be between 1 and 100",
        });
    }

    let sim_ticks = match matches.opt_str("time") {
        Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
            flag: "time",
            value: raw,
        })?,
        None => DEFAULT_SIM_TICKS,
    };
    if sim_ticks < 100 {
        return Err(ConfigError::OutOfRange {
            flag: "time",
            value: sim_ticks.to_string(),
            reason: "simulation time must be at least 100 ticks",
        });
    }

    let seed = match matches.opt_str("seed") {
        Some(raw) => raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
            flag: "seed",
            value: raw,
        })?,
        None => DEFAULT_SEED,
    };

    Ok(Ok(Config {
        mesh_size,
        injection_rate,
        sim_ticks,
        routing,
        seed,
    }))
}
