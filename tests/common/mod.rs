use noc_sim::config::Config;
use noc_sim::engine::Engine;
use noc_sim::routing::Routing;

/// Builds a `Config` for tests, with every field spelled out so a reader
/// can see exactly what scenario is under test without chasing defaults.
pub struct ConfigBuilder {
    pub mesh_size: usize,
    pub injection_rate: u32,
    pub sim_ticks: u64,
    pub routing: Routing,
    pub seed: u64,
}

pub fn build_config(arg: ConfigBuilder) -> Config {
    Config {
        mesh_size: arg.mesh_size,
        injection_rate: arg.injection_rate,
        sim_ticks: arg.sim_ticks,
        routing: arg.routing,
        seed: arg.seed,
    }
}

/// Runs `config` to completion and returns the captured stdout report as a
/// `String`, so tests can assert on it without touching the real stdout.
pub fn run_and_capture(config: &Config) -> String {
    let mut engine = Engine::new(config);
    let mut buf = Vec::new();
    engine.run(config, &mut buf).expect("writing to an in-memory buffer cannot fail");
    String::from_utf8(buf).expect("report is ASCII")
}
