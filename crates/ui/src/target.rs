use std::collections::{HashMap, HashSet};
use std::time::Instant;

use chronicle_application::{Region, RenderTarget, View};

/// Region contents kept between frames; drawing reads from here.
#[derive(Debug, Default)]
pub(crate) struct TerminalTarget {
    content: HashMap<Region, View>,
    visible: HashSet<Region>,
    shown_at: HashMap<Region, Instant>,
    focused: Option<Region>,
    scroll_locked: bool,
    /// Bumped each time a modal is shown, so per-modal cursors can reset.
    pub(crate) modal_generation: u64,
}

impl TerminalTarget {
    pub(crate) fn view(&self, region: Region) -> &View {
        static EMPTY: View = View::Empty;
        self.content.get(&region).unwrap_or(&EMPTY)
    }

    pub(crate) fn is_visible(&self, region: Region) -> bool {
        self.visible.contains(&region)
    }

    pub(crate) fn shown_at(&self, region: Region) -> Option<Instant> {
        self.shown_at.get(&region).copied()
    }

    pub(crate) fn is_focused(&self, region: Region) -> bool {
        self.focused == Some(region)
    }

    pub(crate) fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }
}

impl RenderTarget for TerminalTarget {
    fn set_content(&mut self, region: Region, view: View) {
        self.content.insert(region, view);
    }

    fn toggle_visibility(&mut self, region: Region, visible: bool) {
        if visible {
            self.visible.insert(region);
            self.shown_at.insert(region, Instant::now());
            if matches!(region, Region::Modal(_)) {
                self.modal_generation += 1;
            }
        } else {
            self.visible.remove(&region);
            if self.focused.is_some_and(|f| owned_by(f, region)) {
                self.focused = None;
            }
        }
    }

    fn focus(&mut self, region: Region) {
        self.focused = Some(region);
    }

    fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}

fn owned_by(focused: Region, hidden: Region) -> bool {
    match (focused, hidden) {
        (Region::CloseControl(a), Region::Modal(b)) => a == b,
        (Region::SearchInput, Region::Modal(id)) => {
            id == chronicle_application::ModalId::Search
        }
        (a, b) => a == b,
    }
}
