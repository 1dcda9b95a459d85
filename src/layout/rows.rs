//! # Row-based tile layout.
//!
//! [`RowsEngine`] builds [`RowsLayout`]s: vertical stacks of horizontal rows
//! of tiles, the shape of a TV home screen. Focus memory is
//! [`RowsFocus`] (row id + tile id), so it survives data reloads that keep ids.
//!
//! Restoration rules:
//! - `restore_focus` exact tile in the same row, if still focusable;
//! - `focus_nearest` first focusable tile of the remembered row, if the row exists;
//! - `focus_first` first focusable tile in the first row that has one.

use crate::error::LayoutError;
use crate::focus::FocusCapability;

use super::contract::{Area, Direction, MoveStatus, TileLayout, TileLayoutEngine, ViewId};

/// Focus snapshot of a [`RowsLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowsFocus {
    pub row: u64,
    pub tile: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Tile {
    id: u64,
    focusable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Row {
    id: u64,
    tiles: Vec<Tile>,
}

impl Row {
    fn new(id: u64, tiles: &[u64]) -> Self {
        Self {
            id,
            tiles: tiles.iter().map(|&id| Tile { id, focusable: true }).collect(),
        }
    }

    fn first_focusable(&self) -> Option<usize> {
        self.tiles.iter().position(|t| t.focusable)
    }

    fn closest_focusable(&self, column: usize) -> Option<usize> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, t)| t.focusable)
            .min_by_key(|(i, _)| i.abs_diff(column))
            .map(|(i, _)| i)
    }
}

/// A built row layout.
#[derive(Debug)]
pub struct RowsLayout {
    view: ViewId,
    rows: Vec<Row>,
    /// (row index, tile index)
    focus: Option<(usize, usize)>,
    released: bool,
}

impl RowsLayout {
    fn locate(&self, tile: u64) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.tiles.iter().position(|t| t.id == tile).map(|c| (r, c))
        })
    }

    /// Focuses `tile` if it exists and is focusable.
    pub fn focus_tile(&mut self, tile: u64) -> bool {
        match self.locate(tile) {
            Some((r, c)) if self.rows[r].tiles[c].focusable => {
                self.focus = Some((r, c));
                true
            }
            _ => false,
        }
    }

    /// Id of the focused tile.
    pub fn focused_tile(&self) -> Option<u64> {
        self.focus.map(|(r, c)| self.rows[r].tiles[c].id)
    }

    /// Removes `tile`; drops focus if it was the focused one.
    pub fn remove_tile(&mut self, tile: u64) {
        let focused = self.focused_tile();
        let Some((r, c)) = self.locate(tile) else {
            return;
        };
        self.rows[r].tiles.remove(c);
        self.focus = focused.filter(|&f| f != tile).and_then(|f| self.locate(f));
    }

    /// Marks `tile` (non-)focusable. Unfocusable tiles lose focus.
    pub fn set_focusable(&mut self, tile: u64, focusable: bool) {
        if let Some((r, c)) = self.locate(tile) {
            self.rows[r].tiles[c].focusable = focusable;
            if !focusable && self.focus == Some((r, c)) {
                self.focus = None;
            }
        }
    }

    /// Replaces the content, keeping focus on the same tile if it survived.
    pub fn replace_rows(&mut self, rows: &[(u64, &[u64])]) {
        let focused = self.focused_tile();
        self.rows = rows.iter().map(|(id, tiles)| Row::new(*id, tiles)).collect();
        self.focus = focused.and_then(|f| self.locate(f));
    }

    /// Drops focus without touching the content.
    pub fn clear_focus(&mut self) {
        self.focus = None;
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn tile_count(&self) -> usize {
        self.rows.iter().map(|r| r.tiles.len()).sum()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    fn move_horizontal(&mut self, r: usize, c: usize, direction: Direction) -> MoveStatus {
        let row = &self.rows[r];
        let next = match direction {
            Direction::Right => (c + 1..row.tiles.len()).find(|&i| row.tiles[i].focusable),
            _ => (0..c).rev().find(|&i| row.tiles[i].focusable),
        };
        match next {
            Some(i) => {
                self.focus = Some((r, i));
                MoveStatus::Moved
            }
            None => MoveStatus::WouldLeave,
        }
    }

    fn move_vertical(&mut self, r: usize, c: usize, direction: Direction) -> MoveStatus {
        let candidates: Box<dyn Iterator<Item = usize>> = match direction {
            Direction::Down => Box::new(r + 1..self.rows.len()),
            _ => Box::new((0..r).rev()),
        };
        for ri in candidates {
            if let Some(ci) = self.rows[ri].closest_focusable(c) {
                self.focus = Some((ri, ci));
                return MoveStatus::Moved;
            }
        }
        MoveStatus::WouldLeave
    }
}

impl FocusCapability for RowsLayout {
    type Memory = RowsFocus;

    fn snapshot_focus(&self) -> Option<RowsFocus> {
        self.focus.map(|(r, c)| RowsFocus {
            row: self.rows[r].id,
            tile: self.rows[r].tiles[c].id,
        })
    }

    fn restore_focus(&mut self, memory: &RowsFocus) -> bool {
        let Some(r) = self.rows.iter().position(|row| row.id == memory.row) else {
            return false;
        };
        match self.rows[r].tiles.iter().position(|t| t.id == memory.tile) {
            Some(c) if self.rows[r].tiles[c].focusable => {
                self.focus = Some((r, c));
                true
            }
            _ => false,
        }
    }

    fn focus_nearest(&mut self, memory: &RowsFocus) -> bool {
        let found = self
            .rows
            .iter()
            .position(|row| row.id == memory.row)
            .and_then(|r| self.rows[r].first_focusable().map(|c| (r, c)));
        if found.is_some() {
            self.focus = found;
        }
        found.is_some()
    }

    fn focus_first(&mut self) -> bool {
        let found = self
            .rows
            .iter()
            .enumerate()
            .find_map(|(r, row)| row.first_focusable().map(|c| (r, c)));
        if found.is_some() {
            self.focus = found;
        }
        found.is_some()
    }

    fn has_focus(&self) -> bool {
        self.focus.is_some()
    }
}

impl TileLayout for RowsLayout {
    fn view_id(&self) -> ViewId {
        self.view
    }

    fn move_focus(&mut self, direction: Direction) -> MoveStatus {
        let Some((r, c)) = self.focus else {
            return MoveStatus::NoChange;
        };
        if direction.is_vertical() {
            self.move_vertical(r, c, direction)
        } else {
            self.move_horizontal(r, c, direction)
        }
    }

    fn release(&mut self) {
        self.rows.clear();
        self.focus = None;
        self.released = true;
    }
}

/// Builds [`RowsLayout`]s from a fixed row description.
#[derive(Debug, Default)]
pub struct RowsEngine {
    rows: Vec<Row>,
    tile_size: Option<Area>,
    next_view: u64,
    built: usize,
    released: Vec<ViewId>,
}

impl RowsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row with the given tile ids.
    pub fn with_row(mut self, id: u64, tiles: &[u64]) -> Self {
        self.rows.push(Row::new(id, tiles));
        self
    }

    /// Areas smaller than one tile fail to build.
    pub fn with_tile_size(mut self, size: Area) -> Self {
        self.tile_size = Some(size);
        self
    }

    /// Number of successful builds.
    pub fn built(&self) -> usize {
        self.built
    }

    /// Views reported back through [`TileLayoutEngine::on_layout_released`].
    pub fn released(&self) -> &[ViewId] {
        &self.released
    }
}

impl TileLayoutEngine for RowsEngine {
    type Layout = RowsLayout;

    fn build(&mut self, area: Area) -> Result<RowsLayout, LayoutError> {
        if area.is_degenerate() {
            return Err(LayoutError::DegenerateArea {
                width: area.width,
                height: area.height,
            });
        }
        if let Some(tile) = self.tile_size
            && (area.width < tile.width || area.height < tile.height)
        {
            return Err(LayoutError::BuildFailed {
                reason: format!("area {area} smaller than tile {tile}"),
            });
        }

        self.next_view += 1;
        self.built += 1;
        Ok(RowsLayout {
            view: ViewId(self.next_view),
            rows: self.rows.clone(),
            focus: None,
            released: false,
        })
    }

    fn on_layout_released(&mut self, layout: &RowsLayout) {
        self.released.push(layout.view_id());
    }
}
