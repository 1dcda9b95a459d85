//! # Tile-layout contract.
//!
//! The layout engine is an external collaborator. The coordinator needs only
//! the operations below: build a view for an area, move focus in response to
//! D-pad keys, and release everything on detach. Layout-side notifications
//! (focus about to leave, rebuild pending) come back as [`LayoutSignal`]
//! messages instead of callbacks.

use std::fmt;

use crate::error::LayoutError;
use crate::focus::FocusCapability;

/// D-pad direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Returns a short stable label (lowercase).
    pub fn as_label(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// True for `Up`/`Down`.
    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Display area a layout is built for, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub width: u32,
    pub height: u32,
}

impl Area {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Identity of a built view, handed to the screen for mounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u64);

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// Result of a D-pad move inside the layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStatus {
    /// Focus moved to another element.
    Moved,
    /// The layout scrolled without changing the focused element.
    Scrolled,
    /// Nothing happened (e.g. nothing focused).
    NoChange,
    /// The move would take focus out of the layout.
    WouldLeave,
}

/// Notification from the layout engine to its coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSignal {
    /// Focus is about to leave the layout in the given direction.
    FocusWouldLeave(Direction),
    /// The layout is about to be rebuilt.
    RebuildPending,
}

/// A built tile layout.
pub trait TileLayout: FocusCapability {
    /// Root view to mount into the screen.
    fn view_id(&self) -> ViewId;

    /// Moves focus one step in `direction`.
    fn move_focus(&mut self, direction: Direction) -> MoveStatus;

    /// Drops all rows, adapters and bindings held by the layout.
    fn release(&mut self);
}

/// Builds tile layouts.
pub trait TileLayoutEngine {
    type Layout: TileLayout;

    /// Builds a layout sized for `area`.
    fn build(&mut self, area: Area) -> Result<Self::Layout, LayoutError>;

    /// Called after `layout` was released and unmounted.
    fn on_layout_released(&mut self, layout: &Self::Layout) {
        let _ = layout;
    }
}
