//! Tile layouts: the contract the coordinator drives, plus a row-based engine.

mod contract;
mod rows;

pub use contract::{
    Area, Direction, LayoutSignal, MoveStatus, TileLayout, TileLayoutEngine, ViewId,
};
pub use rows::{RowsEngine, RowsFocus, RowsLayout};
