/*!
noc-sim
=======

A cycle-accurate simulator for 2D-mesh Networks-on-Chip: routers with
per-port input buffers, a valid/ready handshake between every producer and
consumer, oblivious routing (XY or West-First), and Bernoulli traffic
sources at each node.

# Usage

This crate is both a library (`noc_sim`) and a binary (`noc-sim`). The
library exposes the simulation engine and its components for anyone who
wants to drive a mesh programmatically or inspect per-node statistics
directly; the binary is a thin CLI wrapper that parses flags, runs a mesh to
completion, and prints a report.

```no_run
use noc_sim::config::Config;
use noc_sim::engine::Engine;
use noc_sim::routing::Routing;

let config = Config {
    mesh_size: 4,
    injection_rate: 10,
    sim_ticks: 1000,
    routing: Routing::Xy,
    seed: 42,
};
let mut engine = Engine::new(&config);
let mut report = Vec::new();
engine.run(&config, &mut report).unwrap();
```

# Determinism

Every PRNG stream in the simulation is derived deterministically from a
single master seed, one per node, and every component step reads only state
committed at the end of the previous tick. Two runs built from the same
`Config` therefore produce byte-identical output.
*/

pub mod channel;
pub mod config;
pub mod engine;
pub mod error;
pub mod node;
pub mod packet;
pub mod router;
pub mod routing;
pub mod stats;
pub mod topology;
