//! Test helpers and fixtures.

use std::collections::HashMap;

use chronicle_application::{AppContext, ModalId, ModalManager, Region, RenderTarget, View};
use chronicle_core::{Decade, Document, Settings, Work};
use chronicle_storage::{DocumentOrigin, LoadOutcome};
use indexmap::IndexMap;

/// One decade, one category, one work: the smallest useful catalog.
pub fn scholarly_document() -> Document {
    let work = Work {
        title: "Gaúcho Politics in Brazil".to_string(),
        year: 1974,
        category: "Books - Scholarly".to_string(),
        isbn: Some("082630303X".to_string()),
        ..Work::default()
    };
    let mut categories = IndexMap::new();
    categories.insert("Books - Scholarly".to_string(), vec![work]);

    let mut decades = IndexMap::new();
    decades.insert(
        "1970s".to_string(),
        Decade {
            theme: "Chicano Studies Pioneer".to_string(),
            total_works: 1,
            categories,
            ..Decade::default()
        },
    );
    Document {
        biography: None,
        decades,
    }
}

pub fn loaded(document: Document) -> LoadOutcome {
    LoadOutcome {
        document,
        origin: DocumentOrigin::Loaded {
            location: "fixture".to_string(),
        },
    }
}

/// A manager with `document` installed and the loading cover already lifted.
pub fn make_manager(settings: Settings, document: Document) -> (ModalManager, RecordingTarget) {
    let mut manager = ModalManager::new(AppContext::new(settings).with_current_year(2025));
    let mut target = RecordingTarget::default();
    manager.begin_loading(&mut target);
    manager.finish_loading(loaded(document), &mut target);
    (manager, target)
}

/// Render target that remembers the latest content and visibility per region.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub content: HashMap<Region, View>,
    pub visible: HashMap<Region, bool>,
    pub focused: Option<Region>,
    pub scroll_locked: bool,
    pub writes: usize,
}

impl RecordingTarget {
    pub fn view(&self, region: Region) -> Option<&View> {
        self.content.get(&region)
    }

    pub fn is_visible(&self, region: Region) -> bool {
        self.visible.get(&region).copied().unwrap_or(false)
    }

    pub fn open_modals(&self) -> Vec<ModalId> {
        ModalId::ALL
            .into_iter()
            .filter(|id| self.is_visible(Region::Modal(*id)))
            .collect()
    }
}

impl RenderTarget for RecordingTarget {
    fn set_content(&mut self, region: Region, view: View) {
        self.writes += 1;
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

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_application::{AppEvent, NO_DESCRIPTION};
    use chronicle_core::DECADES;
    use chronicle_engine::TimelineLayout;
    use chronicle_storage::{all_works, fallback_document, search_works};

    #[test]
    fn scholarly_scenario_searches() {
        let doc = scholarly_document();
        let works = all_works(Some(&doc));
        assert_eq!(works.len(), 1);
        assert_eq!(works[0].title, "Gaúcho Politics in Brazil");

        assert_eq!(search_works(Some(&doc), "1974"), works);
        assert_eq!(search_works(Some(&doc), "brazil"), works);
        assert!(search_works(Some(&doc), "xyz").is_empty());
    }

    #[test]
    fn flattened_length_matches_category_totals() {
        let doc = fallback_document();
        let expected: usize = doc
            .decades
            .values()
            .flat_map(|d| d.categories.values())
            .map(Vec::len)
            .sum();
        assert_eq!(all_works(Some(&doc)).len(), expected);
    }

    #[test]
    fn search_returns_exactly_the_matching_works() {
        let doc = fallback_document();
        for query in ["ar", "Books", "MEDIA", "200", "20", "kansas", "-"] {
            let lower = query.to_lowercase();
            let expected: Vec<&Work> = all_works(Some(&doc))
                .into_iter()
                .filter(|w| {
                    w.title.to_lowercase().contains(&lower)
                        || w.category.to_lowercase().contains(&lower)
                        || w
                            .description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(&lower))
                        || w.year.to_string().contains(query)
                })
                .collect();
            assert_eq!(search_works(Some(&doc), query), expected, "query {query}");
        }
    }

    #[test]
    fn at_most_one_modal_is_ever_open() {
        let (mut manager, mut target) = make_manager(Settings::default(), fallback_document());
        let events = [
            AppEvent::AboutClicked,
            AppEvent::SearchClicked,
            AppEvent::MarkerClicked("1990s".to_string()),
            AppEvent::WorkCardClicked(0),
            AppEvent::FilterClicked,
            AppEvent::EscapePressed,
            AppEvent::EscapePressed,
            AppEvent::NavClicked("2000s".to_string()),
            AppEvent::OverlayClicked,
            AppEvent::SearchClicked,
            AppEvent::SearchInput("children".to_string()),
            AppEvent::SearchResultClicked(0),
            AppEvent::AboutClicked,
            AppEvent::CloseClicked,
        ];
        for event in events {
            manager.dispatch(event.clone(), &mut target);
            let open = target.open_modals();
            assert!(open.len() <= 1, "{event:?} left {open:?} open");
            assert_eq!(open.first().copied(), manager.active_modal(), "{event:?}");
        }
        assert!(target.open_modals().is_empty());
        assert!(!target.scroll_locked);
    }

    #[test]
    fn configured_but_unloaded_decade_is_noop() {
        let (mut manager, mut target) = make_manager(Settings::default(), scholarly_document());
        let writes = target.writes;
        manager.dispatch(AppEvent::MarkerClicked("1980s".to_string()), &mut target);
        assert_eq!(manager.active_modal(), None);
        assert_eq!(target.writes, writes);
        assert!(target.view(Region::WorksGrid).is_none());
    }

    #[test]
    fn bare_work_omits_optional_blocks() {
        let (mut manager, mut target) = make_manager(Settings::default(), scholarly_document());
        let bare = Work {
            title: "Untitled".to_string(),
            year: 1990,
            category: "Podcasts".to_string(),
            ..Work::default()
        };
        manager.open_work(bare, &mut target);

        let Some(View::WorkDetail(detail)) = target.view(Region::WorkDetail) else {
            panic!("work detail not rendered");
        };
        let labels: Vec<_> = detail.meta.iter().map(|m| m.label).collect();
        assert_eq!(labels, ["Year"]);
        assert!(detail.awards.is_none());
        assert!(detail.link.is_none());
        assert_eq!(detail.description, NO_DESCRIPTION);
        assert_eq!(detail.category_color, chronicle_core::DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn scholarly_work_shows_isbn_row() {
        let (mut manager, mut target) = make_manager(Settings::default(), scholarly_document());
        manager.dispatch(AppEvent::MarkerClicked("1970s".to_string()), &mut target);
        manager.dispatch(AppEvent::WorkCardClicked(0), &mut target);

        let Some(View::WorkDetail(detail)) = target.view(Region::WorkDetail) else {
            panic!("work detail not rendered");
        };
        let rows: Vec<_> = detail
            .meta
            .iter()
            .map(|m| (m.label, m.value.as_str()))
            .collect();
        assert_eq!(rows, [("Year", "1974"), ("ISBN", "082630303X")]);
    }

    #[test]
    fn timeline_annotates_only_loaded_decades() {
        let doc = scholarly_document();
        let timeline = TimelineLayout::new().render(&DECADES, Some(&doc));
        assert_eq!(timeline.markers.len(), DECADES.len());
        let annotated: Vec<_> = timeline
            .markers
            .iter()
            .filter(|m| m.count.is_some())
            .map(|m| m.key.as_str())
            .collect();
        assert_eq!(annotated, ["1970s"]);
    }

    #[test]
    fn marker_hit_opens_its_decade() {
        let doc = scholarly_document();
        let timeline = TimelineLayout::new().render(&DECADES, Some(&doc));
        let (mut manager, mut target) = make_manager(Settings::default(), doc);

        let center = timeline.markers[0].center;
        let key = timeline
            .marker_at(center)
            .map(|m| m.key.clone())
            .unwrap();
        manager.dispatch(AppEvent::MarkerClicked(key), &mut target);
        assert_eq!(manager.active_modal(), Some(ModalId::Decade));
        assert_eq!(
            target.view(Region::DecadeTheme),
            Some(&View::Text("Chicano Studies Pioneer".to_string()))
        );
    }
}
