//! Display regions, the views written into them, and the target that shows them.

use chronicle_core::{Award, Highlight};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModalId {
    Biography,
    Decade,
    Work,
    Search,
    Filter,
}

impl ModalId {
    pub const ALL: [ModalId; 5] = [
        ModalId::Biography,
        ModalId::Decade,
        ModalId::Work,
        ModalId::Search,
        ModalId::Filter,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModalId::Biography => "biography",
            ModalId::Decade => "decade",
            ModalId::Work => "work",
            ModalId::Search => "search",
            ModalId::Filter => "filter",
        }
    }
}

impl std::fmt::Display for ModalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Modal(ModalId),
    CloseControl(ModalId),
    BiographyContent,
    DecadeTitle,
    DecadeTheme,
    DecadeStats,
    DecadeSummary,
    WorksGrid,
    WorkDetail,
    SearchInput,
    SearchResults,
    FilterCategories,
    LoadingCover,
    DecadeNav,
    StatCounters,
}

/// Host surface the presentation layer writes into.
///
/// Implementations own the markup and styling of each region; callers only
/// replace region content and flip visibility.
pub trait RenderTarget {
    fn set_content(&mut self, region: Region, view: View);

    fn toggle_visibility(&mut self, region: Region, visible: bool);

    fn focus(&mut self, _region: Region) {}

    fn set_scroll_locked(&mut self, _locked: bool) {}
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Empty,
    Text(String),
    /// Centered informational text, e.g. search prompts.
    Message(String),
    Biography(BiographyView),
    DecadeStats {
        total_works: u32,
        category_count: usize,
    },
    DecadeSummary {
        summary: Option<String>,
        achievements: Vec<String>,
    },
    WorksGrid(Vec<WorkCard>),
    WorkDetail(WorkDetailView),
    SearchResults(Vec<SearchResultRow>),
    FilterList(Vec<FilterRow>),
    DecadeNav(Vec<NavDot>),
    StatCounters(Vec<StatCounter>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BiographyView {
    pub name: String,
    pub title: String,
    pub institution: String,
    pub bio: String,
    pub career_start: i32,
    pub career_years: i32,
    pub total_works: String,
    pub awards: Vec<Award>,
    pub personal_background: Option<String>,
    pub highlights: Vec<Highlight>,
}

impl BiographyView {
    pub fn career_span(&self) -> String {
        format!(
            "Career Span: {}-present ({}+ years)",
            self.career_start, self.career_years
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkCard {
    pub title: String,
    pub category: String,
    pub year: i32,
    pub description: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetaRow {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkDetailView {
    pub title: String,
    pub category: String,
    pub category_color: String,
    pub meta: Vec<MetaRow>,
    pub description: String,
    pub awards: Option<String>,
    pub link: Option<String>,
    pub enhanced_description: Option<String>,
    pub related_themes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultRow {
    pub title: String,
    pub meta: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterRow {
    pub category: String,
    pub color: String,
    pub checked: bool,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NavDot {
    pub key: String,
    pub range: String,
    pub color: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatCounter {
    pub label: &'static str,
    pub target: u64,
}
