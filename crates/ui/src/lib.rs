//! ratatui-based UI.

use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::Context as _;
use chronicle_application::{AppContext, AppEvent, ModalId, ModalManager, Region};
use chronicle_core::DECADES;
use chronicle_engine::animation::Tween;
use chronicle_engine::{Timeline, TimelineLayout};
use chronicle_storage::{DataLoader, DocumentSource};
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Position, Rect};

mod projection;
mod render;
mod target;

use projection::Projection;
use target::TerminalTarget;

const ANIMATION_TICK: Duration = Duration::from_millis(40);
const IDLE_TICK: Duration = Duration::from_millis(250);
// Long enough for every entry animation to have finished.
const SETTLED: Duration = Duration::from_secs(60);

pub struct Ui<S> {
    manager: ModalManager,
    loader: DataLoader<S>,
    target: TerminalTarget,
    layout: TimelineLayout,
    timeline: Timeline,
    started: Instant,
    animations: bool,
    cursor: usize,
    scroll: u16,
    query: String,
    seen_generation: u64,
    hits: HitMap,
}

/// Screen areas recorded while drawing, used to route mouse clicks.
#[derive(Debug, Default)]
struct HitMap {
    timeline: Option<Projection>,
    labels: Vec<(Rect, String)>,
    nav: Vec<(Rect, String)>,
    popup: Option<Rect>,
    close: Option<Rect>,
    rows: Vec<(Rect, usize)>,
}

impl<S: DocumentSource> Ui<S> {
    pub fn new(ctx: AppContext, loader: DataLoader<S>) -> Self {
        let animations = ctx.settings.animations;
        let layout = TimelineLayout::new();
        let timeline = layout.render(&DECADES, None);
        Self {
            manager: ModalManager::new(ctx),
            loader,
            target: TerminalTarget::default(),
            layout,
            timeline,
            started: Instant::now(),
            animations,
            cursor: 0,
            scroll: 0,
            query: String::new(),
            seen_generation: 0,
            hits: HitMap::default(),
        }
    }

    pub fn run(mut self) -> anyhow::Result<AppContext> {
        let mut terminal = setup_terminal()?;
        terminal.clear().ok();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            self.event_loop(&mut terminal)
        }));
        let restore_result = restore_terminal(&mut terminal);

        match (result, restore_result) {
            (Ok(Ok(())), Ok(())) => Ok(self.manager.into_ctx()),
            (Ok(Err(err)), _) => Err(err),
            (Ok(Ok(())), Err(err)) => Err(err),
            (Err(panic), Ok(())) => Err(anyhow::anyhow!(panic_to_string(panic))),
            (Err(panic), Err(err)) => Err(anyhow::anyhow!(
                "{}\n(additionally failed to restore terminal: {err})",
                panic_to_string(panic)
            )),
        }
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    ) -> anyhow::Result<()> {
        self.manager.begin_loading(&mut self.target);
        terminal.draw(|frame| self.draw(frame.area(), frame))?;

        let outcome = self.loader.load();
        self.manager.finish_loading(outcome, &mut self.target);
        self.timeline = self
            .layout
            .render(&DECADES, self.manager.ctx().document.as_ref());
        self.started = Instant::now();
        log::info!("timeline ready");

        let mut needs_redraw = true;
        loop {
            if needs_redraw || self.is_animating() {
                terminal.draw(|frame| self.draw(frame.area(), frame))?;
                needs_redraw = false;
            }

            let tick = if self.is_animating() {
                ANIMATION_TICK
            } else {
                IDLE_TICK
            };
            if !event::poll(tick)? {
                continue;
            }

            match event::read()? {
                Event::Resize(_, _) => needs_redraw = true,
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    needs_redraw = true;
                    if self.handle_key(key) {
                        log::info!("exiting");
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => {
                    needs_redraw = true;
                    self.handle_mouse(mouse);
                }
                _ => {}
            }
        }
    }

    fn elapsed(&self) -> Duration {
        if self.animations {
            self.started.elapsed()
        } else {
            SETTLED
        }
    }

    /// Time since `region` was last shown, for staggered entry effects.
    fn elapsed_since_shown(&self, region: Region) -> Duration {
        if !self.animations {
            return SETTLED;
        }
        self.target
            .shown_at(region)
            .map(|at| at.elapsed())
            .unwrap_or(SETTLED)
    }

    fn is_animating(&self) -> bool {
        if !self.animations {
            return false;
        }
        let elapsed = self.elapsed();
        let timeline_running = !self.timeline.line_entry.is_finished(elapsed)
            || self
                .timeline
                .markers
                .iter()
                .any(|m| !m.entry.is_finished(elapsed))
            || !Tween::counter().is_finished(elapsed);
        let cards_running = self.manager.active_modal() == Some(ModalId::Decade)
            && self.elapsed_since_shown(Region::Modal(ModalId::Decade))
                < render::grid_settle_time(
                    self.manager.cards().iter().map(|work| work.category.as_str()),
                );
        timeline_running || cards_running
    }

    fn dispatch(&mut self, event: AppEvent) {
        self.manager.dispatch(event, &mut self.target);
        if self.target.modal_generation != self.seen_generation {
            self.seen_generation = self.target.modal_generation;
            self.cursor = 0;
            self.scroll = 0;
            if self.manager.active_modal() == Some(ModalId::Search) {
                self.query.clear();
            }
        }
    }

    /// Returns `true` when the app should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }
        if self.target.is_visible(Region::LoadingCover) {
            return false;
        }

        match self.manager.active_modal() {
            None => return self.handle_main_key(key),
            Some(_) if key.code == KeyCode::Esc => self.dispatch(AppEvent::EscapePressed),
            Some(ModalId::Search) => self.handle_search_key(key),
            Some(ModalId::Decade) => {
                let len = self.manager.cards().len();
                if self.move_cursor(key.code, len) {
                    return false;
                }
                if key.code == KeyCode::Enter && len > 0 {
                    self.dispatch(AppEvent::WorkCardClicked(self.cursor));
                }
            }
            Some(ModalId::Filter) => {
                let categories: Vec<&'static str> = self.manager.filter_categories().collect();
                if self.move_cursor(key.code, categories.len()) {
                    return false;
                }
                if !matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    return false;
                }
                if let Some(category) = categories.get(self.cursor) {
                    self.dispatch(AppEvent::FilterRowClicked(category.to_string()));
                }
            }
            Some(ModalId::Biography | ModalId::Work) => match key.code {
                KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
                KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
                KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
                KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
                _ => {}
            },
        }
        false
    }

    fn handle_main_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('a') => self.dispatch(AppEvent::AboutClicked),
            KeyCode::Char('/') | KeyCode::Char('s') => self.dispatch(AppEvent::SearchClicked),
            KeyCode::Char('f') => self.dispatch(AppEvent::FilterClicked),
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                if let Some(decade) = DECADES.get(index) {
                    self.dispatch(AppEvent::NavClicked(decade.key.to_string()));
                }
            }
            _ => {}
        }
        false
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let len = self.manager.results().len();
        match key.code {
            KeyCode::Up | KeyCode::Down => {
                self.move_cursor(key.code, len);
            }
            KeyCode::Enter => {
                if len > 0 {
                    self.dispatch(AppEvent::SearchResultClicked(self.cursor));
                }
            }
            KeyCode::Backspace => {
                self.query.pop();
                self.cursor = 0;
                self.dispatch(AppEvent::SearchInput(self.query.clone()));
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.query.push(c);
                self.cursor = 0;
                self.dispatch(AppEvent::SearchInput(self.query.clone()));
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, code: KeyCode, len: usize) -> bool {
        match code {
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
                true
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            _ => false,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.target.is_visible(Region::LoadingCover) {
            return;
        }
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {}
            MouseEventKind::ScrollDown => {
                self.scroll = self.scroll.saturating_add(1);
                return;
            }
            MouseEventKind::ScrollUp => {
                self.scroll = self.scroll.saturating_sub(1);
                return;
            }
            _ => return,
        }
        let position = Position {
            x: mouse.column,
            y: mouse.row,
        };

        if let Some(modal) = self.manager.active_modal() {
            if self.hits.close.is_some_and(|c| c.contains(position)) {
                self.dispatch(AppEvent::CloseClicked);
                return;
            }
            let inside = self.hits.popup.is_some_and(|p| p.contains(position));
            if !inside {
                self.dispatch(AppEvent::OverlayClicked);
                return;
            }
            let Some(index) = self
                .hits
                .rows
                .iter()
                .find(|(rect, _)| rect.contains(position))
                .map(|(_, index)| *index)
            else {
                return;
            };
            self.cursor = index;
            match modal {
                ModalId::Decade => self.dispatch(AppEvent::WorkCardClicked(index)),
                ModalId::Search => self.dispatch(AppEvent::SearchResultClicked(index)),
                ModalId::Filter => {
                    let category = self.manager.filter_categories().nth(index);
                    if let Some(category) = category {
                        self.dispatch(AppEvent::FilterRowClicked(category.to_string()));
                    }
                }
                ModalId::Biography | ModalId::Work => {}
            }
            return;
        }

        let nav_key = self
            .hits
            .nav
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, key)| key.clone());
        if let Some(key) = nav_key {
            self.dispatch(AppEvent::NavClicked(key));
            return;
        }

        let Some(projection) = self.hits.timeline else {
            return;
        };
        let marker_key =
            projection.marker_key_at(&self.timeline, &self.hits.labels, mouse.column, mouse.row);
        if let Some(key) = marker_key {
            self.dispatch(AppEvent::MarkerClicked(key));
        }
    }
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<Stdout>>> {
    terminal::enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("enter alt screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("create terminal")
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
    terminal::disable_raw_mode().context("disable raw mode")?;
    crossterm::execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )
    .context("leave alt screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn panic_to_string(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("panic: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("panic: {s}")
    } else {
        "panic: (unknown payload)".to_string()
    }
}
