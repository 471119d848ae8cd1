use chronicle_engine::{Label, Point, Timeline};
use ratatui::layout::{Position, Rect};
use unicode_width::UnicodeWidthStr;

/// Canvas units per terminal row around the axis.
const ROW_SCALE: f32 = 25.0;

/// Maps timeline canvas coordinates onto a terminal area and back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Projection {
    area: Rect,
    canvas_width: f32,
    axis_y: f32,
}

impl Projection {
    pub(crate) fn new(area: Rect, timeline: &Timeline) -> Self {
        Self {
            area,
            canvas_width: timeline.width,
            axis_y: timeline.line.from.y,
        }
    }

    fn span(&self) -> f32 {
        f32::from(self.area.width.saturating_sub(1).max(1))
    }

    pub(crate) fn axis_row(&self) -> u16 {
        self.area.y + self.area.height / 2
    }

    pub(crate) fn column(&self, x: f32) -> u16 {
        let offset = (x / self.canvas_width * self.span()).round().max(0.0) as u16;
        self.area.x + offset.min(self.area.width.saturating_sub(1))
    }

    /// Terminal row for canvas `y`, or `None` when it falls outside the area.
    pub(crate) fn row(&self, y: f32) -> Option<u16> {
        let delta = ((y - self.axis_y) / ROW_SCALE).round() as i32;
        let row = i32::from(self.axis_row()) + delta;
        let top = i32::from(self.area.y);
        let bottom = top + i32::from(self.area.height);
        (top..bottom).contains(&row).then(|| row as u16)
    }

    pub(crate) fn to_canvas(&self, column: u16, row: u16) -> Point {
        let dx = f32::from(column.saturating_sub(self.area.x));
        let dy = i32::from(row) - i32::from(self.axis_row());
        Point {
            x: dx / self.span() * self.canvas_width,
            y: self.axis_y + dy as f32 * ROW_SCALE,
        }
    }

    /// Widest label text that keeps neighbouring markers apart.
    pub(crate) fn label_slot(&self, markers: usize) -> usize {
        (self.area.width as usize / markers.max(1)).saturating_sub(1)
    }

    /// Cells a label of `width` columns occupies once drawn.
    ///
    /// A label on the marker's own row sits just right of the marker; the
    /// others are centred under their anchor and kept inside the area.
    pub(crate) fn label_rect(&self, marker_center: Point, label: &Label, width: u16) -> Option<Rect> {
        let row = self.row(label.at.y)?;
        let right = self.area.x + self.area.width;
        let x = if Some(row) == self.row(marker_center.y) {
            self.column(marker_center.x).saturating_add(2)
        } else {
            let max_x = right.saturating_sub(width).max(self.area.x);
            self.column(label.at.x)
                .saturating_sub(width / 2)
                .clamp(self.area.x, max_x)
        };
        let width = width.min(right.saturating_sub(x));
        (width > 0).then(|| Rect::new(x, row, width, 1))
    }

    /// Decade key under a terminal cell: drawn label text first, then marker circles.
    pub(crate) fn marker_key_at(
        &self,
        timeline: &Timeline,
        labels: &[(Rect, String)],
        column: u16,
        row: u16,
    ) -> Option<String> {
        let position = Position::new(column, row);
        if let Some((_, key)) = labels.iter().find(|(rect, _)| rect.contains(position)) {
            return Some(key.clone());
        }
        let point = self.to_canvas(column, row);
        timeline
            .markers
            .iter()
            .find(|m| m.circle_contains(point))
            .map(|m| m.key.clone())
    }
}

pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0usize;
    for ch in text.chars() {
        let mut buf = [0u8; 4];
        let w = UnicodeWidthStr::width(&*ch.encode_utf8(&mut buf));
        if width + w + 1 > max_width {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}
