/*!
The traffic source / sink attached to each router's LOCAL port.

Traffic generation is Bernoulli per tick (injection probability `rate`,
expressed in percent, matching the original's integer percentage), with the
destination drawn uniformly from every other node in the mesh. Each node
owns an independent `rand::rngs::StdRng` stream (see `engine.rs` for how the
per-node seeds are derived from the run's master seed) so results reproduce
exactly given the same seed, and so nodes could in principle be stepped in
parallel without their draws interfering with each other.
*/

use rand::rngs::StdRng;
use rand::Rng;

use crate::packet::{Packet, PacketKind};
use crate::topology::NodeId;

pub struct InjectionEvent {
    pub tick: u64,
    pub src: NodeId,
    pub dst: NodeId,
    pub payload: u64,
}

pub struct DeliveryEvent {
    pub tick: u64,
    pub dst: NodeId,
    pub src: NodeId,
    pub latency: u64,
    pub hops: u32,
}

pub struct NodeOutputs {
    pub out_valid: bool,
    pub out_packet: Option<Packet>,
    pub injected: Option<InjectionEvent>,
    pub delivered: Option<DeliveryEvent>,
}

pub struct Node {
    pub id: NodeId,
    total_nodes: usize,
    injection_rate: u32,
    sim_ticks: u64,
    rng: StdRng,
    cur_t: u64,

    sent: u64,
    received: u64,
    latency_sum: u64,
    hops_sum: u64,
}

impl Node {
    pub fn new(id: NodeId, total_nodes: usize, injection_rate: u32, sim_ticks: u64, rng: StdRng) -> Self {
        Node {
            id,
            total_nodes,
            injection_rate,
            sim_ticks,
            rng,
            cur_t: 0,
            sent: 0,
            received: 0,
            latency_sum: 0,
            hops_sum: 0,
        }
    }

    /// Draw a destination uniformly from every node but ourselves.
    fn generate_destination(&mut self) -> NodeId {
        loop {
            let candidate = self.rng.gen_range(0..self.total_nodes);
            if candidate != self.id.index() {
                return NodeId(candidate);
            }
        }
    }

    fn should_generate(&mut self) -> bool {
        if self.cur_t >= self.sim_ticks {
            return false;
        }
        self.rng.gen_range(0..100) < self.injection_rate
    }

    /// Advance one tick. `in_valid`/`in_packet` are this node's inbound
    /// signals from the co-located router's LOCAL output; `out_ready` is
    /// that router's LOCAL input readiness, both sampled as of the previous
    /// tick's commit.
    pub fn step(&mut self, in_valid: bool, in_packet: Option<&Packet>, out_ready: bool) -> NodeOutputs {
        self.cur_t += 1;

        let delivered = if in_valid {
            in_packet.map(|pkt| {
                self.received += 1;
                let latency = self.cur_t - pkt.birth_time;
                self.latency_sum += latency;
                self.hops_sum += pkt.hops as u64;
                DeliveryEvent {
                    tick: self.cur_t,
                    dst: self.id,
                    src: pkt.src,
                    latency,
                    hops: pkt.hops,
                }
            })
        } else {
            None
        };

        let (out_valid, out_packet, injected) = if out_ready && self.should_generate() {
            let dst = self.generate_destination();
            let payload = self.rng.gen_range(0..1000);
            let packet = Packet::new(self.id, dst, PacketKind::Data, payload, self.cur_t);
            self.sent += 1;
            (
                true,
                Some(packet),
                Some(InjectionEvent {
                    tick: self.cur_t,
                    src: self.id,
                    dst,
                    payload,
                }),
            )
        } else {
            (false, None, None)
        };

        NodeOutputs {
            out_valid,
            out_packet,
            injected,
            delivered,
        }
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }
    pub fn received(&self) -> u64 {
        self.received
    }
    pub fn average_latency(&self) -> f64 {
        if self.received == 0 {
            0.0
        } else {
            self.latency_sum as f64 / self.received as f64
        }
    }
    pub fn average_hops(&self) -> f64 {
        if self.received == 0 {
            0.0
        } else {
            self.hops_sum as f64 / self.received as f64
        }
    }
    pub fn latency_sum(&self) -> u64 {
        self.latency_sum
    }
    pub fn hops_sum(&self) -> u64 {
        self.hops_sum
    }
}
