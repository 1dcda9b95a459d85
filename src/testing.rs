//! Test doubles shared by unit tests.

use std::cell::{Cell, RefCell};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::Config;
use crate::layout::{Area, ViewId};
use crate::screen::{Screen, ViewModel};

#[derive(Debug)]
pub(crate) struct FakeScreen {
    pub area: Cell<Area>,
    pub focus_available: Cell<bool>,
    pub focused: Cell<bool>,
    pub primary: Cell<Option<ViewId>>,
    pub unmounted: RefCell<Vec<ViewId>>,
    pub placeholder_holds: Cell<usize>,
}

impl FakeScreen {
    pub fn new() -> Self {
        Self::with_area(Area::new(1920, 1080))
    }

    pub fn with_area(area: Area) -> Self {
        Self {
            area: Cell::new(area),
            focus_available: Cell::new(true),
            focused: Cell::new(false),
            primary: Cell::new(None),
            unmounted: RefCell::new(Vec::new()),
            placeholder_holds: Cell::new(0),
        }
    }
}

impl Screen for FakeScreen {
    fn display_area(&self) -> Area {
        self.area.get()
    }

    fn is_focus_available(&self) -> bool {
        self.focus_available.get()
    }

    fn has_focus(&self) -> bool {
        self.focused.get()
    }

    fn mount_primary(&self, view: ViewId) -> Option<ViewId> {
        self.primary.replace(Some(view))
    }

    fn unmount_primary(&self, view: ViewId) {
        if self.primary.get() == Some(view) {
            self.primary.set(None);
        }
        self.unmounted.borrow_mut().push(view);
    }

    fn hold_placeholder_focus(&self) -> bool {
        self.placeholder_holds.set(self.placeholder_holds.get() + 1);
        true
    }
}

#[derive(Debug, Default)]
pub(crate) struct CountingViewModel {
    pub attached: AtomicUsize,
    pub detached: AtomicUsize,
}

impl CountingViewModel {
    pub fn attached(&self) -> usize {
        self.attached.load(Ordering::SeqCst)
    }

    pub fn detached(&self) -> usize {
        self.detached.load(Ordering::SeqCst)
    }
}

impl ViewModel for CountingViewModel {
    fn on_pre_attach(&self) {
        self.attached.fetch_add(1, Ordering::SeqCst);
    }

    fn on_post_detach(&self) {
        self.detached.fetch_add(1, Ordering::SeqCst);
    }
}

/// Default config that returns contract violations instead of panicking.
pub(crate) fn lenient() -> Config {
    Config {
        strict_contracts: false,
        ..Config::default()
    }
}
