/*!
Statistics rollup and the final report.

The report is written through a `&mut dyn Write` sink, mirroring the
teacher's own `Simulation::write_result(&self, output: &mut dyn Write)`
rather than calling `println!` directly. That makes the byte-for-byte
determinism property testable: an integration test can capture the report
into an in-memory `Vec<u8>` and compare two runs with the same seed without
touching stdout at all.

Routing dead-ends are soft invariant violations, not crashes (see
`error::RoutingDiagnostic`); `NetworkSummary` carries them alongside the
throughput/latency rollup so a caller inspecting one value sees the whole
picture of how the run went, not just the happy-path counters.
*/

use std::io::{self, Write};

use crate::error::RoutingDiagnostic;
use crate::node::Node;
use crate::routing::Routing;

pub struct NetworkSummary {
    pub total_sent: u64,
    pub total_received: u64,
    pub avg_latency: f64,
    pub avg_hops: f64,
    pub diagnostics: Vec<String>,
}

pub fn summarize(nodes: &[Node], diagnostics: &[RoutingDiagnostic]) -> NetworkSummary {
    let total_sent: u64 = nodes.iter().map(|n| n.sent()).sum();
    let total_received: u64 = nodes.iter().map(|n| n.received()).sum();
    let latency_sum: u64 = nodes.iter().map(|n| n.latency_sum()).sum();
    let hops_sum: u64 = nodes.iter().map(|n| n.hops_sum()).sum();
    let (avg_latency, avg_hops) = if total_received == 0 {
        (0.0, 0.0)
    } else {
        (
            latency_sum as f64 / total_received as f64,
            hops_sum as f64 / total_received as f64,
        )
    };
    NetworkSummary {
        total_sent,
        total_received,
        avg_latency,
        avg_hops,
        diagnostics: diagnostics.iter().map(|d| d.to_string()).collect(),
    }
}

/// Write the final statistics block in the reference report format.
pub fn write_report(
    out: &mut dyn Write,
    routing: Routing,
    nodes: &[Node],
    diagnostics: &[RoutingDiagnostic],
) -> io::Result<()> {
    writeln!(out, "-------- Simulation Statistics --------")?;
    writeln!(out, "Routing Algorithm: {}", routing.name())?;
    for node in nodes {
        writeln!(
            out,
            "Node {}: Sent={}, Received={}, Avg Latency={:.2}, Avg Hops={:.2}",
            node.id,
            node.sent(),
            node.received(),
            node.average_latency(),
            node.average_hops()
        )?;
    }
    let summary = summarize(nodes, diagnostics);
    writeln!(
        out,
        "Network Summary: Total Sent={}, Total Received={}, Avg Latency={:.2}, Avg Hops={:.2}",
        summary.total_sent, summary.total_received, summary.avg_latency, summary.avg_hops
    )?;
    Ok(())
}
