/*!
Mesh topology: node identity, router ports, and the arithmetic that wires
routers to their neighbours.

The mesh is a rectangle of `mesh_x` by `mesh_y` routers, one node hanging off
each router's `LOCAL` port. Neighbour discovery is arithmetic on `(x,y)`
coordinates rather than a pointer graph, following the arena style used
throughout this crate (see `engine.rs`): there is one flat `Vec` of routers
and one of nodes, and every cross-reference is an index into one of them.
*/

use std::fmt;

/// Identifier of a node/router position in the mesh, `y * mesh_x + x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        NodeId(index)
    }
    pub fn index(self) -> usize {
        self.0
    }
    /// Decompose into `(x, y)` coordinates given the mesh's row length.
    pub fn coords(self, mesh_x: usize) -> (usize, usize) {
        (self.0 % mesh_x, self.0 / mesh_x)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<usize> for NodeId {
    fn from(index: usize) -> Self {
        NodeId(index)
    }
}

/// The five directions a router port can face. `Local` is the node-facing
/// port; `None` is the routing sentinel meaning "no valid route this tick".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    East,
    South,
    West,
    Local,
    None,
}

impl Direction {
    /// Canonical port ordering: NORTH=0, EAST=1, SOUTH=2, WEST=3, LOCAL=4.
    pub fn port(self) -> Option<usize> {
        match self {
            Direction::North => Some(0),
            Direction::East => Some(1),
            Direction::South => Some(2),
            Direction::West => Some(3),
            Direction::Local => Some(4),
            Direction::None => None,
        }
    }
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Local => Direction::Local,
            Direction::None => Direction::None,
        }
    }
}

/// Number of ports on every router: north, east, south, west, local.
pub const NUM_PORTS: usize = 5;

/// A rectangular mesh of `mesh_x` by `mesh_y` routers, one server per router.
///
/// The CLI only ever builds the square case (`mesh_x == mesh_y`, see
/// `config.rs`), but the topology itself does not require it; tests build
/// thin rectangular meshes directly (e.g. a 1x4 linear chain) to stress the
/// router's buffering without the noise of a full 2D mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub mesh_x: usize,
    pub mesh_y: usize,
}

impl Mesh {
    pub fn new(mesh_x: usize, mesh_y: usize) -> Self {
        assert!(mesh_x > 0 && mesh_y > 0, "mesh dimensions must be positive");
        Mesh { mesh_x, mesh_y }
    }

    pub fn num_routers(&self) -> usize {
        self.mesh_x * self.mesh_y
    }

    /// The router/node sharing coordinates `(x, y)`.
    pub fn id_at(&self, x: usize, y: usize) -> NodeId {
        NodeId(y * self.mesh_x + x)
    }

    /// The neighbouring router reached by leaving `router` through `port`,
    /// together with the port on that neighbour which faces back. Returns
    /// `None` at mesh boundaries, where the port is bound to a stub (see
    /// `router.rs`).
    pub fn neighbour(&self, router: NodeId, port: usize) -> Option<(NodeId, usize)> {
        let (x, y) = router.coords(self.mesh_x);
        let (nx, ny, back_port) = match port {
            0 /* North */ => {
                if y == 0 { return None; }
                (x, y - 1, 2)
            }
            1 /* East */ => {
                if x + 1 >= self.mesh_x { return None; }
                (x + 1, y, 3)
            }
            2 /* South */ => {
                if y + 1 >= self.mesh_y { return None; }
                (x, y + 1, 0)
            }
            3 /* West */ => {
                if x == 0 { return None; }
                (x - 1, y, 1)
            }
            _ => return None, // LOCAL has no router neighbour
        };
        Some((self.id_at(nx, ny), back_port))
    }

    pub fn manhattan_distance(&self, a: NodeId, b: NodeId) -> usize {
        let (ax, ay) = a.coords(self.mesh_x);
        let (bx, by) = b.coords(self.mesh_x);
        (ax as isize - bx as isize).unsigned_abs() + (ay as isize - by as isize).unsigned_abs()
    }
}
