use std::ops::Range;
use std::time::Duration;

use chronicle_application::view::{BiographyView, WorkDetailView};
use chronicle_application::{ModalId, Region, View};
use chronicle_core::{DEFAULT_CATEGORY_COLOR, parse_hex_color};
use chronicle_engine::animation::{CARD_DURATION, Tween};
use chronicle_storage::{DocumentOrigin, DocumentSource};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use crate::projection::{Projection, truncate_to_width};
use crate::{HitMap, Ui};

const CARD_HEIGHT: u16 = 3;
const RESULT_HEIGHT: u16 = 2;

/// Stagger position of each card: its index within its own category run.
fn category_stagger<'a>(categories: impl IntoIterator<Item = &'a str>) -> Vec<usize> {
    let mut previous: Option<&str> = None;
    let mut position = 0usize;
    categories
        .into_iter()
        .map(|category| {
            position = if previous == Some(category) {
                position + 1
            } else {
                0
            };
            previous = Some(category);
            position
        })
        .collect()
}

/// Time until the slowest card of a grid has settled.
pub(crate) fn grid_settle_time<'a>(categories: impl IntoIterator<Item = &'a str>) -> Duration {
    let last = category_stagger(categories).into_iter().max().unwrap_or(0);
    Tween::card(last).delay + CARD_DURATION
}

impl<S: DocumentSource> Ui<S> {
    pub(crate) fn draw(&mut self, area: Rect, frame: &mut Frame) {
        frame.render_widget(Clear, area);
        self.hits = HitMap::default();

        if self.target.is_visible(Region::LoadingCover) {
            self.draw_loading(area, frame);
            return;
        }

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(7),
                Constraint::Length(3),
                Constraint::Length(2),
            ])
            .split(area);

        frame.render_widget(self.header(), layout[0]);
        self.draw_timeline(frame, layout[1]);
        self.draw_nav(frame, layout[2]);
        frame.render_widget(self.footer(), layout[3]);

        if self.target.scroll_locked() {
            frame
                .buffer_mut()
                .set_style(area, Style::default().add_modifier(Modifier::DIM));
        }

        if let Some(modal) = self.manager.active_modal() {
            self.draw_modal(modal, area, frame);
        }
    }

    fn draw_loading(&self, area: Rect, frame: &mut Frame) {
        let text = match self.target.view(Region::LoadingCover) {
            View::Text(text) => text.clone(),
            _ => String::new(),
        };
        let popup = centered_rect(40, 20, area);
        let paragraph = Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, popup);
    }

    fn header(&self) -> Paragraph<'static> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let biography = self
            .manager
            .ctx()
            .document
            .as_ref()
            .and_then(|doc| doc.biography.as_ref());

        let mut title = Vec::new();
        match biography {
            Some(bio) => {
                title.push(Span::styled(bio.name.clone(), bold));
                if !bio.title.is_empty() {
                    title.push(Span::raw(format!("  {}", bio.title)));
                }
                if !bio.institution.is_empty() {
                    title.push(Span::styled(
                        format!(", {}", bio.institution),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            None => title.push(Span::styled("Chronicle", bold)),
        }

        let elapsed = self.elapsed();
        let mut counters = Vec::new();
        if let View::StatCounters(stats) = self.target.view(Region::StatCounters) {
            for (idx, stat) in stats.iter().enumerate() {
                if idx > 0 {
                    counters.push(Span::raw("   "));
                }
                let value = Tween::counter().count(stat.target, elapsed);
                counters.push(Span::styled(
                    value.to_string(),
                    bold.fg(hex_color(DEFAULT_CATEGORY_COLOR)),
                ));
                counters.push(Span::raw(format!(" {}", stat.label)));
            }
        }

        Paragraph::new(Text::from(vec![Line::from(title), Line::from(counters)]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn draw_timeline(&mut self, frame: &mut Frame, inner: Rect) {
        if inner.width < 2 || inner.height == 0 {
            return;
        }

        let projection = Projection::new(inner, &self.timeline);
        self.hits.timeline = Some(projection);
        let elapsed = self.elapsed();
        let selected = self.manager.ctx().selected_decade.clone();
        let slot = projection.label_slot(self.timeline.markers.len());
        let buf = frame.buffer_mut();

        let line = self.timeline.line;
        let progress = self.timeline.line_entry.progress(elapsed);
        if progress > 0.0 {
            if let Some(row) = projection.row(line.from.y) {
                let start = projection.column(line.from.x);
                let end = projection.column(line.from.x + (line.to.x - line.from.x) * progress);
                let style = Style::default().fg(Color::DarkGray);
                for column in start..=end {
                    buf.set_string(column, row, "─", style);
                }
            }
        }

        for marker in &self.timeline.markers {
            let progress = marker.entry.progress(elapsed);
            if progress <= 0.0 {
                continue;
            }
            let mut style = Style::default().fg(hex_color(&marker.color));
            if progress < 1.0 {
                style = style.add_modifier(Modifier::DIM);
            }
            if selected.as_deref() == Some(marker.key.as_str()) {
                style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
            }

            let column = projection.column(marker.center.x);
            if let Some(row) = projection.row(marker.center.y) {
                let glyph = if progress < 0.5 { "·" } else { "●" };
                buf.set_string(column, row, glyph, style);
            }
            if progress < 0.5 {
                continue;
            }

            let labels = [
                (Some(&marker.label), style.add_modifier(Modifier::BOLD)),
                (Some(&marker.theme), Style::default().fg(Color::Gray)),
                (marker.count.as_ref(), Style::default().fg(Color::DarkGray)),
            ];
            for (label, label_style) in labels {
                let Some(label) = label else { continue };
                let text = truncate_to_width(&label.text, slot);
                let Some(rect) = projection.label_rect(marker.center, label, text.width() as u16)
                else {
                    continue;
                };
                buf.set_stringn(rect.x, rect.y, &text, rect.width as usize, label_style);
                self.hits.labels.push((rect, marker.key.clone()));
            }
        }
    }

    fn draw_nav(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::BOTTOM);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let View::DecadeNav(dots) = self.target.view(Region::DecadeNav) else {
            return;
        };
        let entries: Vec<(String, Style, Style)> = dots
            .iter()
            .enumerate()
            .map(|(idx, dot)| {
                let dot_style = Style::default().fg(hex_color(&dot.color));
                let label_style = if dot.active {
                    Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default()
                };
                (format!("{} {}", idx + 1, dot.range), dot_style, label_style)
            })
            .collect();
        let keys: Vec<String> = dots.iter().map(|dot| dot.key.clone()).collect();

        let total: u16 = entries
            .iter()
            .map(|(label, _, _)| label.width() as u16 + 4)
            .sum();
        let mut x = inner.x + inner.width.saturating_sub(total) / 2;
        let right = inner.x + inner.width;
        let buf = frame.buffer_mut();
        for ((label, dot_style, label_style), key) in entries.into_iter().zip(keys) {
            let width = label.width() as u16 + 2;
            if x + width > right {
                break;
            }
            buf.set_string(x, inner.y, "●", dot_style);
            buf.set_string(x + 2, inner.y, &label, label_style);
            self.hits.nav.push((Rect::new(x, inner.y, width, 1), key));
            x += width + 2;
        }
    }

    fn footer(&self) -> Paragraph<'static> {
        let help = match self.manager.active_modal() {
            None => "1-6 decade  a about  / search  f filter  q quit",
            Some(ModalId::Search) => "type to search  ↑/↓ move  Enter open  Esc close",
            Some(ModalId::Filter) => "↑/↓ move  Space toggle  Esc close",
            Some(ModalId::Decade) => "↑/↓ move  Enter open work  Esc close",
            Some(ModalId::Biography | ModalId::Work) => "↑/↓ scroll  Esc close",
        };
        let mut spans = vec![Span::raw(help)];
        if let Some(DocumentOrigin::Fallback { .. }) = &self.manager.ctx().origin {
            spans.push(Span::styled(
                "  (built-in data)",
                Style::default().fg(Color::Yellow),
            ));
        }
        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn draw_modal(&mut self, modal: ModalId, area: Rect, frame: &mut Frame) {
        let popup = centered_rect(76, 80, area);
        self.hits.popup = Some(popup);
        frame.render_widget(Clear, popup);

        let close_style = if self.target.is_focused(Region::CloseControl(modal)) {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let close_label = " Esc close ";
        let block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                self.modal_title(modal),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(Span::styled(close_label, close_style)).right_aligned());
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let close_width = close_label.width() as u16;
        self.hits.close = Some(Rect::new(
            (popup.x + popup.width).saturating_sub(close_width + 1),
            (popup.y + popup.height).saturating_sub(1),
            close_width,
            1,
        ));

        self.hits.rows = match modal {
            ModalId::Biography => {
                self.draw_biography(frame, inner);
                Vec::new()
            }
            ModalId::Work => {
                self.draw_work(frame, inner);
                Vec::new()
            }
            ModalId::Decade => self.draw_decade(frame, inner),
            ModalId::Search => self.draw_search(frame, inner),
            ModalId::Filter => self.draw_filter(frame, inner),
        };
    }

    fn modal_title(&self, modal: ModalId) -> String {
        let title = match (modal, self.target.view(title_region(modal))) {
            (ModalId::Decade, View::Text(range)) => range.clone(),
            (ModalId::Work, View::WorkDetail(detail)) => detail.title.clone(),
            (ModalId::Biography, View::Biography(bio)) => bio.name.clone(),
            (ModalId::Search, _) => "Search Works".to_string(),
            (ModalId::Filter, _) => "Filter by Category".to_string(),
            _ => modal.to_string(),
        };
        format!(" {title} ")
    }

    fn draw_biography(&self, frame: &mut Frame, area: Rect) {
        let View::Biography(view) = self.target.view(Region::BiographyContent) else {
            return;
        };
        let paragraph = Paragraph::new(Text::from(biography_lines(view)))
            .wrap(Wrap { trim: true })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_work(&self, frame: &mut Frame, area: Rect) {
        let View::WorkDetail(view) = self.target.view(Region::WorkDetail) else {
            return;
        };
        let paragraph = Paragraph::new(Text::from(work_lines(view)))
            .wrap(Wrap { trim: true })
            .scroll((self.scroll, 0));
        frame.render_widget(paragraph, area);
    }

    fn draw_decade(&self, frame: &mut Frame, area: Rect) -> Vec<(Rect, usize)> {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let text_width = area.width.saturating_sub(2) as usize;

        let mut header = Vec::new();
        if let View::Text(theme) = self.target.view(Region::DecadeTheme) {
            header.push(Line::from(Span::styled(
                theme.clone(),
                bold.fg(hex_color(DEFAULT_CATEGORY_COLOR)),
            )));
        }
        if let View::DecadeStats {
            total_works,
            category_count,
        } = self.target.view(Region::DecadeStats)
        {
            header.push(Line::raw(format!(
                "{total_works} works • {category_count} categories"
            )));
        }
        if let View::DecadeSummary {
            summary,
            achievements,
        } = self.target.view(Region::DecadeSummary)
        {
            header.push(Line::raw(""));
            if let Some(summary) = summary {
                header.extend(wrap_text(summary, text_width).into_iter().map(Line::raw));
            }
            for achievement in achievements {
                header.extend(
                    wrap_text(&format!("• {achievement}"), text_width)
                        .into_iter()
                        .map(Line::raw),
                );
            }
        }
        header.push(Line::raw(""));

        let header_height = (header.len() as u16).min(area.height / 2);
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(header_height), Constraint::Min(0)])
            .split(area);
        frame.render_widget(Paragraph::new(Text::from(header)), split[0]);

        let View::WorksGrid(cards) = self.target.view(Region::WorksGrid) else {
            return Vec::new();
        };
        let grid = split[1];
        if cards.is_empty() {
            let empty = Paragraph::new("No works match the active filters.")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, grid);
            return Vec::new();
        }

        let since_shown = self.elapsed_since_shown(Region::Modal(ModalId::Decade));
        let stagger = category_stagger(cards.iter().map(|card| card.category.as_str()));
        let capacity = (grid.height / CARD_HEIGHT) as usize;
        let mut hits = Vec::new();
        for (slot, index) in list_window(cards.len(), self.cursor, capacity).enumerate() {
            let card = &cards[index];
            let progress = Tween::card(stagger[index]).progress(since_shown);
            if progress <= 0.0 {
                continue;
            }
            let rect = Rect::new(
                grid.x,
                grid.y + slot as u16 * CARD_HEIGHT,
                grid.width,
                CARD_HEIGHT,
            );
            let selected = index == self.cursor;
            let mut title_style = bold;
            if selected {
                title_style = title_style.add_modifier(Modifier::REVERSED);
            }
            let mut body_style = Style::default();
            if progress < 1.0 {
                title_style = title_style.add_modifier(Modifier::DIM);
                body_style = body_style.add_modifier(Modifier::DIM);
            }
            let bar = Span::styled("▌ ", Style::default().fg(hex_color(&card.color)));
            let description = wrap_text(&card.description, text_width.saturating_sub(2))
                .into_iter()
                .next()
                .unwrap_or_default();
            let lines = vec![
                Line::from(vec![
                    bar.clone(),
                    Span::styled(card.title.clone(), title_style),
                ]),
                Line::from(vec![
                    bar.clone(),
                    Span::styled(
                        format!("{} • {}", card.year, card.category),
                        body_style.fg(Color::Gray),
                    ),
                ]),
                Line::from(vec![bar, Span::styled(description, body_style)]),
            ];
            frame.render_widget(Paragraph::new(Text::from(lines)), rect);
            hits.push((rect, index));
        }
        hits
    }

    fn draw_search(&self, frame: &mut Frame, area: Rect) -> Vec<(Rect, usize)> {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let query = match self.target.view(Region::SearchInput) {
            View::Text(query) => query.as_str(),
            _ => "",
        };
        let input_block = Block::default().borders(Borders::ALL).title(" Query ");
        let input_inner = input_block.inner(split[0]);
        frame.render_widget(Paragraph::new(query.to_string()).block(input_block), split[0]);
        if self.target.is_focused(Region::SearchInput) {
            let offset = (query.width() as u16).min(input_inner.width.saturating_sub(1));
            frame.set_cursor_position(Position::new(input_inner.x + offset, input_inner.y));
        }

        let results = split[1];
        match self.target.view(Region::SearchResults) {
            View::Message(message) => {
                let paragraph = Paragraph::new(message.clone())
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray));
                frame.render_widget(paragraph, results);
                Vec::new()
            }
            View::SearchResults(rows) => {
                let capacity = (results.height / RESULT_HEIGHT) as usize;
                let mut hits = Vec::new();
                for (slot, index) in list_window(rows.len(), self.cursor, capacity).enumerate() {
                    let row = &rows[index];
                    let rect = Rect::new(
                        results.x,
                        results.y + slot as u16 * RESULT_HEIGHT,
                        results.width,
                        RESULT_HEIGHT,
                    );
                    let mut title_style = Style::default().add_modifier(Modifier::BOLD);
                    if index == self.cursor {
                        title_style = title_style.add_modifier(Modifier::REVERSED);
                    }
                    let lines = vec![
                        Line::from(Span::styled(row.title.clone(), title_style)),
                        Line::from(Span::styled(
                            row.meta.clone(),
                            Style::default().fg(Color::Gray),
                        )),
                    ];
                    frame.render_widget(Paragraph::new(Text::from(lines)), rect);
                    hits.push((rect, index));
                }
                hits
            }
            _ => Vec::new(),
        }
    }

    fn draw_filter(&self, frame: &mut Frame, area: Rect) -> Vec<(Rect, usize)> {
        let View::FilterList(rows) = self.target.view(Region::FilterCategories) else {
            return Vec::new();
        };
        let mut list = area;
        if !self.manager.ctx().settings.apply_category_filters {
            let notice = Paragraph::new(
                "Selections are remembered but do not narrow the timeline \
                 (apply_category_filters is off).",
            )
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::DarkGray));
            let split = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(0)])
                .split(area);
            frame.render_widget(notice, split[0]);
            list = split[1];
        }

        let capacity = list.height as usize;
        let mut hits = Vec::new();
        for (slot, index) in list_window(rows.len(), self.cursor, capacity).enumerate() {
            let row = &rows[index];
            let rect = Rect::new(list.x, list.y + slot as u16, list.width, 1);
            let mut label_style = Style::default();
            if index == self.cursor {
                label_style = label_style.add_modifier(Modifier::REVERSED);
            }
            let check = if row.checked { "[x] " } else { "[ ] " };
            let line = Line::from(vec![
                Span::raw(check),
                Span::styled("■ ", Style::default().fg(hex_color(&row.color))),
                Span::styled(row.category.clone(), label_style),
                Span::styled(
                    format!(" ({})", row.count),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            frame.render_widget(Paragraph::new(line), rect);
            hits.push((rect, index));
        }
        hits
    }
}

fn title_region(modal: ModalId) -> Region {
    match modal {
        ModalId::Biography => Region::BiographyContent,
        ModalId::Decade => Region::DecadeTitle,
        ModalId::Work => Region::WorkDetail,
        ModalId::Search => Region::SearchInput,
        ModalId::Filter => Region::FilterCategories,
    }
}

fn biography_lines(view: &BiographyView) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let accent = Style::default().fg(hex_color(DEFAULT_CATEGORY_COLOR));

    let mut lines = vec![
        Line::from(Span::styled(view.title.clone(), bold)),
        Line::raw(view.institution.clone()),
        Line::raw(""),
        Line::from(Span::styled(view.career_span(), accent)),
        Line::raw(format!("Total Works: {}", view.total_works)),
        Line::raw(""),
        Line::raw(view.bio.clone()),
    ];

    if let Some(background) = &view.personal_background {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Background", bold)));
        lines.push(Line::raw(background.clone()));
    }

    if !view.awards.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Awards & Recognition", bold)));
        for award in &view.awards {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", award.year), accent),
                Span::styled(award.award.clone(), bold),
            ]));
            if !award.description.is_empty() {
                lines.push(Line::raw(format!("     {}", award.description)));
            }
        }
    }

    if !view.highlights.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("Highlights", bold)));
        for highlight in &view.highlights {
            lines.push(Line::from(vec![
                Span::styled(format!("{} ", highlight.year), accent),
                Span::raw(highlight.event.clone()),
            ]));
        }
    }
    lines
}

fn work_lines(view: &WorkDetailView) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let badge = Style::default()
        .fg(Color::Black)
        .bg(hex_color(&view.category_color));

    let mut lines = vec![
        Line::from(Span::styled(format!(" {} ", view.category), badge)),
        Line::raw(""),
    ];
    for row in &view.meta {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", row.label), bold),
            Span::raw(row.value.clone()),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw(view.description.clone()));

    if let Some(enhanced) = &view.enhanced_description {
        lines.push(Line::raw(""));
        lines.push(Line::raw(enhanced.clone()));
    }
    if let Some(awards) = &view.awards {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Awards: ", bold),
            Span::raw(awards.clone()),
        ]));
    }
    if !view.related_themes.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Themes: ", bold),
            Span::raw(view.related_themes.join(", ")),
        ]));
    }
    if let Some(link) = &view.link {
        lines.push(Line::raw(""));
        lines.push(Line::from(vec![
            Span::styled("Link: ", bold),
            Span::styled(
                link.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            ),
        ]));
    }
    lines
}

fn hex_color(value: &str) -> Color {
    parse_hex_color(value)
        .map(|(r, g, b)| Color::Rgb(r, g, b))
        .unwrap_or(Color::Reset)
}

/// Indices of a `len`-item list to show in `capacity` rows, keeping `cursor` in view.
fn list_window(len: usize, cursor: usize, capacity: usize) -> Range<usize> {
    if capacity == 0 || len == 0 {
        return 0..0;
    }
    if len <= capacity {
        return 0..len;
    }
    let cursor = cursor.min(len - 1);
    let start = (cursor + 1).saturating_sub(capacity);
    start..start + capacity
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0usize;

    for word in text.split_whitespace() {
        let word_width = UnicodeWidthStr::width(word);
        let sep_width = if current.is_empty() { 0 } else { 1 };

        if current_width + sep_width + word_width <= max_width {
            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if word_width <= max_width {
            current.push_str(word);
            current_width = word_width;
            continue;
        }

        let mut chunk = String::new();
        let mut chunk_width = 0usize;
        for ch in word.chars() {
            let mut buf = [0u8; 4];
            let w = UnicodeWidthStr::width(&*ch.encode_utf8(&mut buf));
            if chunk_width + w > max_width && !chunk.is_empty() {
                lines.push(std::mem::take(&mut chunk));
                chunk_width = 0;
            }
            chunk.push(ch);
            chunk_width += w;
        }
        if !chunk.is_empty() {
            lines.push(chunk);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}
