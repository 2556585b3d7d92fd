/*!
CLI entry point: parse flags, run the mesh to completion, print the report.
*/

use std::io::{self, Write};
use std::process::ExitCode;

use noc_sim::config;
use noc_sim::engine::Engine;
use noc_sim::stats;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    let program = args[0].clone();

    let config = match config::parse(&program, &args[1..]) {
        Ok(Ok(config)) => config,
        Ok(Err(usage_text)) => {
            println!("{}", usage_text);
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("Error: {}", err);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(config: &config::Config) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "Running simulation: mesh={0}x{0}, routing={1}, rate={2}%, time={3}",
        config.mesh_size,
        config.routing.name(),
        config.injection_rate,
        config.sim_ticks
    )?;

    let mut engine = Engine::new(config);
    engine.run(config, &mut out)?;

    for diag in engine.diagnostics() {
        eprintln!("Warning: {}", diag);
    }

    stats::write_report(&mut out, config.routing, engine.nodes(), engine.diagnostics())?;
    Ok(())
}
