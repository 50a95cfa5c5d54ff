pub mod geometry;
pub mod harbors;
pub mod layout;

pub use geometry::{Axial, Board, BoardMode, Edge, EdgeId, Hex, HexId, Node, NodeId, Terrain};
pub use harbors::{Harbor, HarborId, HarborKind};
pub use layout::build_board;
