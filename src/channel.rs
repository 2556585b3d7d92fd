/*!
Single-slot pipeline channel modelling a link with latency `delay >= 1`.

The teacher's library keeps a `channels` field in its `Simulation` even
though the default experiment wiring never instantiates one, treating the
channel as a pluggable delay element. This crate follows the same shape: the
reference engine (`engine.rs`) wires routers directly to their neighbours
with no channel in between, exactly like the original design's mesh wiring,
but `Channel` itself is a fully working, independently testable component
for callers who want an explicit multi-tick link.
*/

use crate::packet::Packet;

/// A single in-flight packet, counting down the ticks left before it
/// reaches the far end.
struct InFlight {
    packet: Packet,
    remaining: u32,
}

/// One pipeline slot between a producer and a consumer, `delay` ticks deep.
///
/// Only one packet may be in flight at a time: the channel refuses new
/// input (`in_ready == false`) until the slot empties, i.e. until the
/// consumer has accepted the packet currently at its head.
pub struct Channel {
    delay: u32,
    slot: Option<InFlight>,
}

pub struct ChannelOutputs {
    pub in_ready: bool,
    pub out_valid: bool,
    pub out_packet: Option<Packet>,
}

impl Channel {
    pub fn new(delay: u32) -> Self {
        assert!(delay >= 1, "channel delay must be at least 1 tick");
        Channel { delay, slot: None }
    }

    /// Advance one tick given the producer's `(in_valid, in_packet)` and the
    /// consumer's `out_ready`, all sampled as of the previous tick's commit.
    pub fn step(&mut self, in_valid: bool, in_packet: Option<Packet>, out_ready: bool) -> ChannelOutputs {
        let out_valid = matches!(&self.slot, Some(f) if f.remaining == 0);
        let out_packet = if out_valid {
            self.slot.as_ref().map(|f| f.packet.clone())
        } else {
            None
        };

        if out_valid && out_ready {
            self.slot = None;
        } else if let Some(flight) = self.slot.as_mut() {
            if flight.remaining > 0 {
                flight.remaining -= 1;
            }
        }

        let accepting = self.slot.is_none();
        if accepting && in_valid {
            if let Some(packet) = in_packet {
                self.slot = Some(InFlight {
                    packet,
                    remaining: self.delay - 1,
                });
            }
        }

        ChannelOutputs {
            in_ready: self.slot.is_none(),
            out_valid,
            out_packet,
        }
    }
}
