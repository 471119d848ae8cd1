use chronicle_core::{CATEGORY_COLORS, DECADES, Work, category_color, find_decade};
use chronicle_storage::LoadOutcome;

use crate::AppContext;
use crate::view::{
    BiographyView, FilterRow, MetaRow, ModalId, NavDot, Region, RenderTarget, SearchResultRow,
    StatCounter, View, WorkCard, WorkDetailView,
};

pub const NO_DESCRIPTION: &str = "No description available.";
pub const SEARCH_PROMPT: &str = "Type at least 2 characters to search...";
pub const NO_RESULTS: &str = "No results found.";
pub const LOADING_TEXT: &str = "Loading timeline...";

const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    MarkerClicked(String),
    NavClicked(String),
    AboutClicked,
    SearchClicked,
    FilterClicked,
    SearchInput(String),
    WorkCardClicked(usize),
    SearchResultClicked(usize),
    FilterRowClicked(String),
    CloseClicked,
    OverlayClicked,
    EscapePressed,
}

/// Maps events onto the five modal views and renders them from the context.
///
/// At most one modal is open at any time: every open first closes whatever
/// is showing.
#[derive(Debug)]
pub struct ModalManager {
    ctx: AppContext,
    cards: Vec<Work>,
    results: Vec<Work>,
}

impl ModalManager {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            cards: Vec::new(),
            results: Vec::new(),
        }
    }

    pub fn ctx(&self) -> &AppContext {
        &self.ctx
    }

    pub fn into_ctx(self) -> AppContext {
        self.ctx
    }

    pub fn active_modal(&self) -> Option<ModalId> {
        self.ctx.active_modal
    }

    /// Works currently shown in the decade grid.
    pub fn cards(&self) -> &[Work] {
        &self.cards
    }

    /// Works currently listed as search results.
    pub fn results(&self) -> &[Work] {
        &self.results
    }

    pub fn begin_loading(&mut self, target: &mut dyn RenderTarget) {
        target.set_content(Region::LoadingCover, View::Text(LOADING_TEXT.to_string()));
        target.toggle_visibility(Region::LoadingCover, true);
    }

    /// Installs the loaded document and only then lifts the loading cover.
    pub fn finish_loading(&mut self, outcome: LoadOutcome, target: &mut dyn RenderTarget) {
        self.ctx.set_document(outcome);
        self.render_decade_nav(target);
        self.render_stat_counters(target);
        target.toggle_visibility(Region::LoadingCover, false);
    }

    pub fn dispatch(&mut self, event: AppEvent, target: &mut dyn RenderTarget) {
        match event {
            AppEvent::MarkerClicked(key) | AppEvent::NavClicked(key) => {
                self.open_decade(&key, target);
            }
            AppEvent::AboutClicked => self.open_biography(target),
            AppEvent::SearchClicked => self.open_search(target),
            AppEvent::FilterClicked => self.open_filter(target),
            AppEvent::SearchInput(query) => self.search_input(&query, target),
            AppEvent::WorkCardClicked(index) => {
                if self.ctx.active_modal != Some(ModalId::Decade) {
                    return;
                }
                if let Some(work) = self.cards.get(index).cloned() {
                    self.open_work(work, target);
                }
            }
            AppEvent::SearchResultClicked(index) => {
                if self.ctx.active_modal != Some(ModalId::Search) {
                    return;
                }
                if let Some(work) = self.results.get(index).cloned() {
                    self.open_work(work, target);
                }
            }
            AppEvent::FilterRowClicked(category) => {
                if self.ctx.active_modal == Some(ModalId::Filter) {
                    self.toggle_filter(&category, target);
                }
            }
            AppEvent::CloseClicked | AppEvent::OverlayClicked => self.close_modal(target),
            AppEvent::EscapePressed => {
                if self.ctx.active_modal.is_some() {
                    self.close_modal(target);
                }
            }
        }
    }

    pub fn open_modal(&mut self, id: ModalId, target: &mut dyn RenderTarget) {
        self.close_modal(target);

        target.toggle_visibility(Region::Modal(id), true);
        target.set_scroll_locked(true);
        target.focus(Region::CloseControl(id));
        self.ctx.active_modal = Some(id);
        log::debug!("opened {id} modal");
    }

    pub fn close_modal(&mut self, target: &mut dyn RenderTarget) {
        let Some(id) = self.ctx.active_modal.take() else {
            return;
        };
        target.toggle_visibility(Region::Modal(id), false);
        target.set_scroll_locked(false);
        if id == ModalId::Search {
            self.results.clear();
        }
        log::debug!("closed {id} modal");
    }

    pub fn open_biography(&mut self, target: &mut dyn RenderTarget) {
        let Some(bio) = self.ctx.document.as_ref().and_then(|d| d.biography.as_ref()) else {
            return;
        };

        let view = BiographyView {
            name: bio.name.clone(),
            title: bio.title.clone(),
            institution: bio.institution.clone(),
            bio: bio.bio.clone(),
            career_start: bio.career_start,
            career_years: self.ctx.current_year - bio.career_start,
            total_works: bio.total_works.clone(),
            awards: bio.awards.clone(),
            personal_background: bio.personal_background.clone(),
            highlights: bio.timeline_highlights.clone(),
        };
        target.set_content(Region::BiographyContent, View::Biography(view));
        self.open_modal(ModalId::Biography, target);
    }

    /// Silently does nothing unless `key` is both configured and loaded.
    pub fn open_decade(&mut self, key: &str, target: &mut dyn RenderTarget) {
        let Some(descriptor) = find_decade(key) else {
            return;
        };
        let Some(decade) = self.ctx.document.as_ref().and_then(|d| d.decades.get(key)) else {
            return;
        };

        target.set_content(Region::DecadeTitle, View::Text(descriptor.range.to_string()));
        target.set_content(Region::DecadeTheme, View::Text(descriptor.theme.to_string()));
        target.set_content(
            Region::DecadeStats,
            View::DecadeStats {
                total_works: decade.total_works,
                category_count: decade.category_count(),
            },
        );
        let summary = if decade.summary.is_none() && decade.key_achievements.is_empty() {
            View::Empty
        } else {
            View::DecadeSummary {
                summary: decade.summary.clone(),
                achievements: decade.key_achievements.clone(),
            }
        };
        target.set_content(Region::DecadeSummary, summary);

        let cards: Vec<Work> = decade
            .works()
            .filter(|work| self.ctx.passes_filters(work))
            .cloned()
            .collect();
        let grid = cards.iter().map(work_card).collect();
        target.set_content(Region::WorksGrid, View::WorksGrid(grid));

        self.cards = cards;
        self.ctx.selected_decade = Some(key.to_string());
        self.render_decade_nav(target);
        self.open_modal(ModalId::Decade, target);
    }

    pub fn open_work(&mut self, work: Work, target: &mut dyn RenderTarget) {
        target.set_content(Region::WorkDetail, View::WorkDetail(work_detail(&work)));
        self.ctx.selected_work = Some(work);
        self.open_modal(ModalId::Work, target);
    }

    pub fn open_search(&mut self, target: &mut dyn RenderTarget) {
        self.open_modal(ModalId::Search, target);

        self.results.clear();
        target.set_content(Region::SearchInput, View::Text(String::new()));
        target.set_content(Region::SearchResults, View::Empty);
        target.focus(Region::SearchInput);
    }

    /// Live search for one keystroke; ignored unless the search modal is open.
    pub fn search_input(&mut self, query: &str, target: &mut dyn RenderTarget) {
        if self.ctx.active_modal != Some(ModalId::Search) {
            return;
        }
        target.set_content(Region::SearchInput, View::Text(query.to_string()));

        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            self.results.clear();
            target.set_content(
                Region::SearchResults,
                View::Message(SEARCH_PROMPT.to_string()),
            );
            return;
        }

        self.results = self
            .ctx
            .search_works(query)
            .into_iter()
            .filter(|work| self.ctx.passes_filters(work))
            .cloned()
            .collect();

        if self.results.is_empty() {
            target.set_content(Region::SearchResults, View::Message(NO_RESULTS.to_string()));
            return;
        }

        let rows = self
            .results
            .iter()
            .map(|work| SearchResultRow {
                title: work.title.clone(),
                meta: format!("{} • {}", work.year, work.category),
            })
            .collect();
        target.set_content(Region::SearchResults, View::SearchResults(rows));
    }

    pub fn open_filter(&mut self, target: &mut dyn RenderTarget) {
        self.open_modal(ModalId::Filter, target);
        self.render_filter_list(target);
    }

    pub fn toggle_filter(&mut self, category: &str, target: &mut dyn RenderTarget) {
        if !self.ctx.active_filters.remove(category) {
            self.ctx.active_filters.insert(category.to_string());
        }
        log::debug!(
            "category filter {category} {}",
            if self.ctx.active_filters.contains(category) {
                "on"
            } else {
                "off"
            }
        );
        self.render_filter_list(target);
    }

    /// Categories in the order the filter modal lists them.
    pub fn filter_categories(&self) -> impl Iterator<Item = &'static str> {
        CATEGORY_COLORS.iter().map(|(name, _)| *name)
    }

    fn render_filter_list(&self, target: &mut dyn RenderTarget) {
        let counts = self.ctx.category_counts();
        let rows = CATEGORY_COLORS
            .iter()
            .map(|(name, color)| FilterRow {
                category: name.to_string(),
                color: color.to_string(),
                checked: self.ctx.active_filters.contains(*name),
                count: counts.get(name).copied().unwrap_or(0),
            })
            .collect();
        target.set_content(Region::FilterCategories, View::FilterList(rows));
    }

    fn render_decade_nav(&self, target: &mut dyn RenderTarget) {
        let dots = DECADES
            .iter()
            .map(|d| NavDot {
                key: d.key.to_string(),
                range: d.range.to_string(),
                color: d.color.to_string(),
                active: self.ctx.selected_decade.as_deref() == Some(d.key),
            })
            .collect();
        target.set_content(Region::DecadeNav, View::DecadeNav(dots));
    }

    fn render_stat_counters(&self, target: &mut dyn RenderTarget) {
        let awards = self
            .ctx
            .document
            .as_ref()
            .and_then(|d| d.biography.as_ref())
            .map(|b| b.awards.len())
            .unwrap_or(0);
        let counters = vec![
            StatCounter {
                label: "Works Catalogued",
                target: self.ctx.all_works().len() as u64,
            },
            StatCounter {
                label: "Decades",
                target: DECADES.len() as u64,
            },
            StatCounter {
                label: "Categories",
                target: self.ctx.category_counts().len() as u64,
            },
            StatCounter {
                label: "Awards",
                target: awards as u64,
            },
        ];
        target.set_content(Region::StatCounters, View::StatCounters(counters));
    }
}

fn work_card(work: &Work) -> WorkCard {
    WorkCard {
        title: work.title.clone(),
        category: work.category.clone(),
        year: work.year,
        description: work.description.clone().unwrap_or_default(),
        color: category_color(&work.category).to_string(),
    }
}

fn work_detail(work: &Work) -> WorkDetailView {
    let mut meta = vec![MetaRow {
        label: "Year",
        value: work.year.to_string(),
    }];
    if let Some(isbn) = &work.isbn {
        meta.push(MetaRow {
            label: "ISBN",
            value: isbn.clone(),
        });
    }
    if let Some(significance) = &work.significance {
        meta.push(MetaRow {
            label: "Significance",
            value: significance.clone(),
        });
    }

    WorkDetailView {
        title: work.title.clone(),
        category: work.category.clone(),
        category_color: category_color(&work.category).to_string(),
        meta,
        description: work
            .description
            .clone()
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        awards: work.awards.clone(),
        link: work.url.clone(),
        enhanced_description: work.enhanced_description.clone(),
        related_themes: work.related_themes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use chronicle_core::Settings;
    use chronicle_storage::{DocumentOrigin, fallback_document};

    #[derive(Default)]
    struct Target {
        content: HashMap<Region, View>,
        visible: HashMap<Region, bool>,
        scroll_locked: bool,
        focused: Option<Region>,
    }

    impl RenderTarget for Target {
        fn set_content(&mut self, region: Region, view: View) {
            self.content.insert(region, view);
        }

        fn toggle_visibility(&mut self, region: Region, visible: bool) {
            self.visible.insert(region, visible);
        }

        fn focus(&mut self, region: Region) {
            self.focused = Some(region);
        }

        fn set_scroll_locked(&mut self, locked: bool) {
            self.scroll_locked = locked;
        }
    }

    impl Target {
        fn open_modals(&self) -> Vec<ModalId> {
            ModalId::ALL
                .into_iter()
                .filter(|id| self.visible.get(&Region::Modal(*id)).copied().unwrap_or(false))
                .collect()
        }
    }

    fn manager() -> (ModalManager, Target) {
        let mut manager = ModalManager::new(AppContext::new(Settings::default()).with_current_year(2026));
        let mut target = Target::default();
        manager.begin_loading(&mut target);
        manager.finish_loading(
            LoadOutcome {
                document: fallback_document(),
                origin: DocumentOrigin::Fallback {
                    reason: "test".to_string(),
                },
            },
            &mut target,
        );
        (manager, target)
    }

    #[test]
    fn loading_cover_lifts_after_document_installed() {
        let mut manager = ModalManager::new(AppContext::new(Settings::default()));
        let mut target = Target::default();
        manager.begin_loading(&mut target);
        assert_eq!(target.visible.get(&Region::LoadingCover), Some(&true));
        assert!(!manager.ctx().is_loaded());

        let (manager, target) = self::manager();
        assert!(manager.ctx().is_loaded());
        assert_eq!(target.visible.get(&Region::LoadingCover), Some(&false));
        match target.content.get(&Region::StatCounters) {
            Some(View::StatCounters(counters)) => {
                let targets: Vec<u64> = counters.iter().map(|c| c.target).collect();
                assert_eq!(targets, [11, 6, 6, 4]);
            }
            other => panic!("unexpected counters {other:?}"),
        }
    }

    #[test]
    fn opening_replaces_the_current_modal() {
        let (mut manager, mut target) = manager();
        manager.open_biography(&mut target);
        assert_eq!(manager.active_modal(), Some(ModalId::Biography));
        assert!(target.scroll_locked);
        assert_eq!(target.focused, Some(Region::CloseControl(ModalId::Biography)));

        manager.dispatch(AppEvent::NavClicked("2010s".to_string()), &mut target);
        assert_eq!(manager.active_modal(), Some(ModalId::Decade));
        assert_eq!(target.open_modals(), [ModalId::Decade]);

        manager.dispatch(AppEvent::EscapePressed, &mut target);
        assert_eq!(manager.active_modal(), None);
        assert!(target.open_modals().is_empty());
        assert!(!target.scroll_locked);
    }

    #[test]
    fn biography_reports_career_length() {
        let (mut manager, mut target) = manager();
        manager.dispatch(AppEvent::AboutClicked, &mut target);
        let Some(View::Biography(view)) = target.content.get(&Region::BiographyContent) else {
            panic!("biography not rendered");
        };
        assert_eq!(view.career_years, 58);
        assert_eq!(view.career_span(), "Career Span: 1968-present (58+ years)");
        assert_eq!(view.total_works, "400+");
        assert_eq!(view.awards.len(), 4);
    }

    #[test]
    fn biography_without_data_is_noop() {
        let mut manager = ModalManager::new(AppContext::new(Settings::default()));
        let mut target = Target::default();
        manager.open_biography(&mut target);
        assert_eq!(manager.active_modal(), None);
        assert!(target.content.is_empty());
    }

    #[test]
    fn decade_renders_stats_and_cards() {
        let (mut manager, mut target) = manager();
        manager.dispatch(AppEvent::MarkerClicked("1970s".to_string()), &mut target);

        assert_eq!(
            target.content.get(&Region::DecadeTitle),
            Some(&View::Text("1970-1979".to_string()))
        );
        assert_eq!(
            target.content.get(&Region::DecadeStats),
            Some(&View::DecadeStats {
                total_works: 8,
                category_count: 2
            })
        );
        let Some(View::WorksGrid(cards)) = target.content.get(&Region::WorksGrid) else {
            panic!("grid not rendered");
        };
        let titles: Vec<_> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Gaúcho Politics in Brazil",
                "Three Perspectives on Ethnicity",
                "Teaching the Chicano Experience"
            ]
        );
        assert_eq!(cards[2].color, "#00796b");
        assert_eq!(manager.ctx().selected_decade.as_deref(), Some("1970s"));
        assert_eq!(target.content.get(&Region::DecadeSummary), Some(&View::Empty));
    }

    #[test]
    fn unknown_decade_is_noop() {
        let (mut manager, mut target) = manager();
        manager.open_biography(&mut target);
        manager.dispatch(AppEvent::MarkerClicked("1960s".to_string()), &mut target);
        assert_eq!(manager.active_modal(), Some(ModalId::Biography));
        assert!(!target.content.contains_key(&Region::WorksGrid));
    }

    #[test]
    fn card_click_opens_work_detail() {
        let (mut manager, mut target) = manager();
        manager.dispatch(AppEvent::NavClicked("2020s".to_string()), &mut target);
        manager.dispatch(AppEvent::WorkCardClicked(0), &mut target);
        assert_eq!(manager.active_modal(), Some(ModalId::Work));
        assert_eq!(
            manager.ctx().selected_work.as_ref().map(|w| w.title.as_str()),
            Some("Scouts' Honor")
        );
        let Some(View::WorkDetail(detail)) = target.content.get(&Region::WorkDetail) else {
            panic!("work not rendered");
        };
        let labels: Vec<_> = detail.meta.iter().map(|m| m.label).collect();
        assert_eq!(labels, ["Year", "Significance"]);
        assert!(detail.link.is_none());

        // Grid clicks only count while the decade modal is showing.
        manager.dispatch(AppEvent::WorkCardClicked(1), &mut target);
        assert_eq!(
            manager.ctx().selected_work.as_ref().map(|w| w.title.as_str()),
            Some("Scouts' Honor")
        );
    }

    #[test]
    fn search_prompts_until_two_characters() {
        let (mut manager, mut target) = manager();
        manager.dispatch(AppEvent::SearchClicked, &mut target);
        assert_eq!(target.content.get(&Region::SearchResults), Some(&View::Empty));
        assert_eq!(target.focused, Some(Region::SearchInput));

        manager.dispatch(AppEvent::SearchInput(" r ".to_string()), &mut target);
        assert_eq!(
            target.content.get(&Region::SearchResults),
            Some(&View::Message(SEARCH_PROMPT.to_string()))
        );

        manager.dispatch(AppEvent::SearchInput("zzzz".to_string()), &mut target);
        assert_eq!(
            target.content.get(&Region::SearchResults),
            Some(&View::Message(NO_RESULTS.to_string()))
        );

        manager.dispatch(AppEvent::SearchInput("rose".to_string()), &mut target);
        let Some(View::SearchResults(rows)) = target.content.get(&Region::SearchResults) else {
            panic!("results not rendered");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].meta, "2012 • Biography/Memoir");

        manager.dispatch(AppEvent::SearchResultClicked(0), &mut target);
        assert_eq!(manager.active_modal(), Some(ModalId::Work));
        assert!(manager.results().is_empty());
    }

    #[test]
    fn keystrokes_after_close_are_ignored() {
        let (mut manager, mut target) = manager();
        manager.dispatch(AppEvent::SearchClicked, &mut target);
        manager.dispatch(AppEvent::CloseClicked, &mut target);
        manager.dispatch(AppEvent::SearchInput("rose".to_string()), &mut target);
        assert_eq!(target.content.get(&Region::SearchResults), Some(&View::Empty));
    }

    #[test]
    fn filter_rows_toggle_membership() {
        let (mut manager, mut target) = manager();
        manager.dispatch(AppEvent::FilterClicked, &mut target);
        let rows = |target: &Target| match target.content.get(&Region::FilterCategories) {
            Some(View::FilterList(rows)) => rows.clone(),
            other => panic!("unexpected filter view {other:?}"),
        };

        let before = rows(&target);
        assert_eq!(before.len(), CATEGORY_COLORS.len());
        assert_eq!(before[0].category, "Books - Scholarly");
        assert_eq!(before[0].count, 4);
        assert!(before.iter().all(|r| !r.checked));

        manager.dispatch(AppEvent::FilterRowClicked("Novels".to_string()), &mut target);
        let after = rows(&target);
        let novels = after.iter().find(|r| r.category == "Novels").unwrap();
        assert!(novels.checked);
        assert_eq!(novels.count, 1);

        manager.dispatch(AppEvent::FilterRowClicked("Novels".to_string()), &mut target);
        assert!(manager.ctx().active_filters.is_empty());
    }

    #[test]
    fn active_filters_leave_listings_alone_by_default() {
        let (mut manager, mut target) = manager();
        manager.dispatch(AppEvent::FilterClicked, &mut target);
        manager.dispatch(AppEvent::FilterRowClicked("Novels".to_string()), &mut target);
        manager.dispatch(AppEvent::NavClicked("2020s".to_string()), &mut target);
        assert_eq!(manager.cards().len(), 2);
    }

    #[test]
    fn enabled_filters_narrow_grid_and_results() {
        let mut settings = Settings::default();
        settings.apply_category_filters = true;
        let mut manager = ModalManager::new(AppContext::new(settings));
        let mut target = Target::default();
        manager.finish_loading(
            LoadOutcome {
                document: fallback_document(),
                origin: DocumentOrigin::Fallback {
                    reason: "test".to_string(),
                },
            },
            &mut target,
        );
        manager.dispatch(AppEvent::FilterClicked, &mut target);
        manager.dispatch(AppEvent::FilterRowClicked("Novels".to_string()), &mut target);

        manager.dispatch(AppEvent::NavClicked("2020s".to_string()), &mut target);
        let titles: Vec<_> = manager.cards().iter().map(|w| w.title.as_str()).collect();
        assert_eq!(titles, ["Scouts' Honor"]);

        manager.dispatch(AppEvent::SearchClicked, &mut target);
        manager.dispatch(AppEvent::SearchInput("2025".to_string()), &mut target);
        assert_eq!(manager.results().len(), 1);
    }
}
