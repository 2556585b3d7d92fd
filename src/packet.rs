/*!
The packet value type and its two kinds.
*/

use std::fmt;

use crate::topology::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketKind {
    Data,
    Control,
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PacketKind::Data => write!(f, "DATA"),
            PacketKind::Control => write!(f, "CONTROL"),
        }
    }
}

/// A single packet travelling through the mesh.
///
/// `path` is stamped by every router it passes through (see `router.rs`);
/// `hops` is kept in lockstep with `path.len()` rather than derived from it,
/// matching the reference implementation's bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub src: NodeId,
    pub dst: NodeId,
    pub kind: PacketKind,
    pub payload: u64,
    pub birth_time: u64,
    pub hops: u32,
    pub path: Vec<usize>,
}

impl Packet {
    pub fn new(src: NodeId, dst: NodeId, kind: PacketKind, payload: u64, birth_time: u64) -> Self {
        debug_assert_ne!(src, dst, "a packet may not be injected with src == dst");
        Packet {
            src,
            dst,
            kind,
            payload,
            birth_time,
            hops: 0,
            path: Vec::new(),
        }
    }

    /// Record that this packet has just entered `router`, incrementing
    /// `hops` and appending to `path` in the same step.
    pub fn stamp(&mut self, router: usize) {
        self.path.push(router);
        self.hops += 1;
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self
            .path
            .iter()
            .map(|r| r.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");
        write!(
            f,
            "Packet[{}->{}, Type: {}, Payload: {}, Hops: {}, Path: {}]",
            self.src, self.dst, self.kind, self.payload, self.hops, path
        )
    }
}
