/*!
The five-port, input-buffered router.

Each port owns a FIFO of capacity `BUFFER_SIZE`. Every tick runs two
logically ordered phases, matching the original design's `process_routing`
then `process_inputs` (the naming there is by SystemC process registration
order; by data-dependence the release-and-grant phase must run against the
buffer state left over from the *previous* tick, and only after that does
the current tick's intake get appended — a same-tick intake becomes routing
-eligible starting next tick, never this one):

* **Phase B (release + grant).** Any output slot whose downstream consumer
  was ready last tick is cleared. Then, in fixed port order NORTH, EAST,
  SOUTH, WEST, LOCAL, each non-empty input buffer's head packet is offered to
  its routed output port; the offer succeeds if that output slot is free and
  the downstream is ready.
* **Phase A (intake).** Any port with an asserted, accepted input (valid and
  the port had room) is stamped (`hops`, `path`) and appended to that port's
  buffer tail.

Buffer occupancy after Phase A determines `in_ready` for the next tick;
presence of a held output packet determines `out_valid` for the next tick.
*/

use std::collections::VecDeque;

use crate::packet::Packet;
use crate::routing::Routing;
use crate::topology::{Direction, NUM_PORTS};

/// Per-port input FIFO depth.
pub const BUFFER_SIZE: usize = 4;

pub struct RouterInputs {
    pub in_valid: [bool; NUM_PORTS],
    pub in_packet: [Option<Packet>; NUM_PORTS],
    pub out_ready: [bool; NUM_PORTS],
}

pub struct RouterOutputs {
    pub in_ready: [bool; NUM_PORTS],
    pub out_valid: [bool; NUM_PORTS],
    pub out_packet: [Option<Packet>; NUM_PORTS],
    /// Every input port whose head-of-line packet resolved to a dead
    /// boundary stub this tick; the packet stays queued, this is purely
    /// diagnostic. More than one port can dead-end in the same tick, so all
    /// of them are recorded, not just the last.
    pub dead_ends: Vec<usize>,
}

pub struct Router {
    pub id: usize,
    pub x: usize,
    pub y: usize,
    routing: Routing,
    mesh_x: usize,
    mesh_y: usize,
    buf: [VecDeque<Packet>; NUM_PORTS],
    output_slot: [Option<Packet>; NUM_PORTS],
}

impl Router {
    pub fn new(id: usize, x: usize, y: usize, mesh_x: usize, mesh_y: usize, routing: Routing) -> Self {
        Router {
            id,
            x,
            y,
            routing,
            mesh_x,
            mesh_y,
            buf: Default::default(),
            output_slot: Default::default(),
        }
    }

    pub fn step(&mut self, inputs: RouterInputs) -> RouterOutputs {
        let mut dead_ends = Vec::new();

        // Phase B: release slots whose downstream accepted last tick.
        for port in 0..NUM_PORTS {
            if self.output_slot[port].is_some() && inputs.out_ready[port] {
                self.output_slot[port] = None;
            }
        }

        // Phase B: grant, against the buffer state inherited from the
        // previous tick (this tick's intake has not been appended yet).
        for port in 0..NUM_PORTS {
            let head_dest = self.buf[port].front().map(|p| p.dst);
            let dest = match head_dest {
                Some(dest) => dest,
                None => continue,
            };
            let (dx, dy) = (dest.index() % self.mesh_x, dest.index() / self.mesh_x);
            let direction = self.routing.next_direction(self.x, self.y, dx, dy);
            let out_port = match direction.port() {
                Some(p) => p,
                None => {
                    dead_ends.push(port);
                    continue;
                }
            };
            if self.output_slot[out_port].is_none() && inputs.out_ready[out_port] {
                let packet = self.buf[port].pop_front().expect("checked non-empty above");
                self.output_slot[out_port] = Some(packet);
            }
        }

        // Phase A: intake, stamping newly accepted packets.
        let mut in_ready = [false; NUM_PORTS];
        for port in 0..NUM_PORTS {
            if inputs.in_valid[port] && self.buf[port].len() < BUFFER_SIZE {
                if let Some(mut packet) = inputs.in_packet[port].clone() {
                    packet.stamp(self.id);
                    self.buf[port].push_back(packet);
                }
            }
            in_ready[port] = self.buf[port].len() < BUFFER_SIZE;
        }

        let mut out_valid = [false; NUM_PORTS];
        let mut out_packet: [Option<Packet>; NUM_PORTS] = Default::default();
        for port in 0..NUM_PORTS {
            out_valid[port] = self.output_slot[port].is_some();
            out_packet[port] = self.output_slot[port].clone();
        }

        RouterOutputs {
            in_ready,
            out_valid,
            out_packet,
            dead_ends,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::PacketKind;
    use crate::topology::NodeId;

    fn no_inputs() -> RouterInputs {
        RouterInputs {
            in_valid: [false; NUM_PORTS],
            in_packet: Default::default(),
            out_ready: [true; NUM_PORTS],
        }
    }

    #[test]
    fn same_tick_intake_is_not_routing_eligible() {
        let mut r = Router::new(0, 0, 0, 2, 2, Routing::Xy);
        let mut inputs = no_inputs();
        inputs.in_valid[4] = true; // LOCAL
        inputs.in_packet[4] = Some(Packet::new(NodeId(0), NodeId(1), PacketKind::Data, 0, 0));

        let out = r.step(inputs);
        // Nothing could have been granted yet: the buffer was empty at the
        // start of this tick's Phase B.
        assert!(out.out_valid.iter().all(|v| !v));
        assert!(out.in_ready[4], "buffer has room after accepting one packet");

        // Next tick, with no new input, the queued packet should be routed.
        let out2 = r.step(no_inputs());
        let east = Direction::East.port().unwrap();
        assert!(out2.out_valid[east]);
        let pkt = out2.out_packet[east].as_ref().unwrap();
        assert_eq!(pkt.hops, 1);
        assert_eq!(pkt.path, vec![0]);
    }

    #[test]
    fn buffer_backpressures_at_capacity() {
        let mut r = Router::new(0, 0, 0, 2, 2, Routing::Xy);
        // Fill the LOCAL buffer to capacity without ever granting it (East
        // neighbour held not-ready), then confirm in_ready drops.
        for _ in 0..BUFFER_SIZE {
            let mut inputs = no_inputs();
            inputs.out_ready[Direction::East.port().unwrap()] = false;
            inputs.in_valid[4] = true;
            inputs.in_packet[4] = Some(Packet::new(NodeId(0), NodeId(1), PacketKind::Data, 0, 0));
            r.step(inputs);
        }
        let mut inputs = no_inputs();
        inputs.out_ready[Direction::East.port().unwrap()] = false;
        inputs.in_valid[4] = true;
        inputs.in_packet[4] = Some(Packet::new(NodeId(0), NodeId(1), PacketKind::Data, 0, 0));
        let out = r.step(inputs);
        assert!(!out.in_ready[4], "buffer at capacity must deassert in_ready");
    }
}
