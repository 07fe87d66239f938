//! Where the controller sends its output.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::state::DashboardState;
use crate::view::{Region, View};

/// A surface the dashboard draws on.
///
/// Takes `&self` because the controller shares the target across
/// concurrently pending fetches on a single thread.
pub trait RenderTarget {
    /// Replaces the whole content of one region.
    fn set_content(&self, region: Region, view: View);

    /// Called after every state change so visibility can be re-derived.
    fn apply_state(&self, state: &DashboardState);
}

impl<R: RenderTarget + ?Sized> RenderTarget for std::rc::Rc<R> {
    fn set_content(&self, region: Region, view: View) {
        (**self).set_content(region, view)
    }

    fn apply_state(&self, state: &DashboardState) {
        (**self).apply_state(state)
    }
}

/// Keeps the latest view per region in memory.
#[derive(Debug, Default)]
pub struct MemoryTarget {
    regions: RefCell<BTreeMap<Region, View>>,
    state: RefCell<Option<DashboardState>>,
    writes: RefCell<Vec<Region>>,
}

impl MemoryTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self, region: Region) -> Option<View> {
        self.regions.borrow().get(&region).cloned()
    }

    pub fn text(&self, region: Region) -> Option<String> {
        match self.view(region)? {
            View::Text(text) | View::Placeholder(text) => Some(text),
            _ => None,
        }
    }

    /// Last state pushed through [`RenderTarget::apply_state`].
    pub fn last_state(&self) -> Option<DashboardState> {
        self.state.borrow().clone()
    }

    /// Every region written so far, in order.
    pub fn writes(&self) -> Vec<Region> {
        self.writes.borrow().clone()
    }

    pub fn clear_writes(&self) {
        self.writes.borrow_mut().clear();
    }
}

impl RenderTarget for MemoryTarget {
    fn set_content(&self, region: Region, view: View) {
        self.writes.borrow_mut().push(region);
        self.regions.borrow_mut().insert(region, view);
    }

    fn apply_state(&self, state: &DashboardState) {
        *self.state.borrow_mut() = Some(state.clone());
    }
}
