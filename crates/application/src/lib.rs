//! Application orchestration layer for Chronicle.

use std::collections::{BTreeSet, HashMap};

use chrono::Datelike as _;
use chronicle_core::{Document, Settings, Work};
use chronicle_storage::{DocumentOrigin, LoadOutcome};

mod manager;
pub mod view;

pub use manager::{AppEvent, ModalManager, NO_DESCRIPTION, NO_RESULTS, SEARCH_PROMPT};
pub use view::{ModalId, Region, RenderTarget, View};

/// Loaded catalog plus the current selection.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub settings: Settings,
    pub document: Option<Document>,
    pub origin: Option<DocumentOrigin>,
    pub active_modal: Option<ModalId>,
    pub selected_decade: Option<String>,
    pub selected_work: Option<Work>,
    pub active_filters: BTreeSet<String>,
    pub current_year: i32,
}

impl AppContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            document: None,
            origin: None,
            active_modal: None,
            selected_decade: None,
            selected_work: None,
            active_filters: BTreeSet::new(),
            current_year: chrono::Local::now().year(),
        }
    }

    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = year;
        self
    }

    pub fn with_document(mut self, outcome: LoadOutcome) -> Self {
        self.set_document(outcome);
        self
    }

    pub fn set_document(&mut self, outcome: LoadOutcome) {
        self.document = Some(outcome.document);
        self.origin = Some(outcome.origin);
    }

    pub fn is_loaded(&self) -> bool {
        self.document.is_some()
    }

    pub fn all_works(&self) -> Vec<&Work> {
        chronicle_storage::all_works(self.document.as_ref())
    }

    pub fn search_works(&self, query: &str) -> Vec<&Work> {
        chronicle_storage::search_works(self.document.as_ref(), query)
    }

    pub fn category_counts(&self) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for work in self.all_works() {
            *counts.entry(work.category.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// Whether `work` survives the active category filters.
    ///
    /// Filters only narrow listings when `apply_category_filters` is on and at
    /// least one category is selected.
    pub fn passes_filters(&self, work: &Work) -> bool {
        !self.settings.apply_category_filters
            || self.active_filters.is_empty()
            || self.active_filters.contains(&work.category)
    }
}
