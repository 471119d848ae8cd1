//! Timeline layout: decade markers positioned along a horizontal axis.

use std::time::Duration;

use chronicle_core::{DecadeDescriptor, Document};

pub mod animation;

use animation::{Ease, Tween};

pub const CANVAS_WIDTH: f32 = 1400.0;
pub const CANVAS_HEIGHT: f32 = 600.0;
pub const MARKER_RADIUS: f32 = 30.0;

const LABEL_OFFSET_Y: f32 = 5.0;
const THEME_OFFSET_Y: f32 = 60.0;
const COUNT_OFFSET_Y: f32 = -50.0;
// Rough glyph advance used to size label hit boxes.
const GLYPH_WIDTH: f32 = 7.0;
const GLYPH_HALF_HEIGHT: f32 = 10.0;

const LINE_DELAY: Duration = Duration::from_millis(1200);
const LINE_DURATION: Duration = Duration::from_millis(2000);
const MARKER_DELAY: Duration = Duration::from_millis(1400);
const MARKER_STAGGER: Duration = Duration::from_millis(100);
const MARKER_DURATION: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn length(&self) -> f32 {
        (self.to.x - self.from.x).hypot(self.to.y - self.from.y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub at: Point,
    pub text: String,
}

impl Label {
    fn contains(&self, point: Point) -> bool {
        let half_width = self.text.chars().count() as f32 * GLYPH_WIDTH / 2.0;
        (point.x - self.at.x).abs() <= half_width
            && (point.y - self.at.y).abs() <= GLYPH_HALF_HEIGHT
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub key: String,
    pub index: usize,
    pub center: Point,
    pub radius: f32,
    pub color: String,
    pub label: Label,
    pub theme: Label,
    pub count: Option<Label>,
    pub entry: Tween,
}

impl Marker {
    /// Hit test over the circle and every label of the group.
    pub fn contains(&self, point: Point) -> bool {
        self.circle_contains(point)
            || self.label.contains(point)
            || self.theme.contains(point)
            || self.count.as_ref().is_some_and(|c| c.contains(point))
    }

    /// Hit test over the circle alone, for hosts that place labels themselves.
    pub fn circle_contains(&self, point: Point) -> bool {
        let dx = point.x - self.center.x;
        let dy = point.y - self.center.y;
        dx.hypot(dy) <= self.radius
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timeline {
    pub width: f32,
    pub height: f32,
    pub line: Segment,
    pub line_entry: Tween,
    pub markers: Vec<Marker>,
}

impl Timeline {
    pub fn marker_at(&self, point: Point) -> Option<&Marker> {
        self.markers.iter().find(|m| m.contains(point))
    }

    pub fn marker(&self, key: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.key == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineLayout {
    pub width: f32,
    pub height: f32,
    pub padding: Padding,
}

impl Default for TimelineLayout {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            padding: Padding {
                left: 100.0,
                right: 100.0,
                top: 300.0,
                bottom: 300.0,
            },
        }
    }
}

impl TimelineLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn axis_y(&self) -> f32 {
        self.height / 2.0
    }

    pub fn line_length(&self) -> f32 {
        (self.width - self.padding.left - self.padding.right).max(0.0)
    }

    /// Horizontal position of the `index`-th of `count` markers.
    pub fn marker_x(&self, index: usize, count: usize) -> f32 {
        let length = self.line_length();
        if count <= 1 {
            return self.padding.left + length / 2.0;
        }
        let spacing = length / (count - 1) as f32;
        self.padding.left + index as f32 * spacing
    }

    pub fn render(&self, descriptors: &[DecadeDescriptor], document: Option<&Document>) -> Timeline {
        let y = self.axis_y();
        let line = Segment {
            from: Point {
                x: self.padding.left,
                y,
            },
            to: Point {
                x: self.padding.left + self.line_length(),
                y,
            },
        };

        let markers = descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| {
                let x = self.marker_x(index, descriptors.len());
                self.marker(index, x, y, descriptor, document)
            })
            .collect();

        Timeline {
            width: self.width,
            height: self.height,
            line,
            line_entry: Tween::new(LINE_DELAY, LINE_DURATION, Ease::Power2InOut),
            markers,
        }
    }

    fn marker(
        &self,
        index: usize,
        x: f32,
        y: f32,
        descriptor: &DecadeDescriptor,
        document: Option<&Document>,
    ) -> Marker {
        let count = document
            .and_then(|doc| doc.decades.get(descriptor.key))
            .map(|decade| Label {
                at: Point {
                    x,
                    y: y + COUNT_OFFSET_Y,
                },
                text: format!(
                    "{} works • {} categories",
                    decade.total_works,
                    decade.category_count()
                ),
            });

        Marker {
            key: descriptor.key.to_string(),
            index,
            center: Point { x, y },
            radius: MARKER_RADIUS,
            color: descriptor.color.to_string(),
            label: Label {
                at: Point {
                    x,
                    y: y + LABEL_OFFSET_Y,
                },
                text: descriptor.key.to_string(),
            },
            theme: Label {
                at: Point {
                    x,
                    y: y + THEME_OFFSET_Y,
                },
                text: descriptor.theme.to_string(),
            },
            count,
            entry: Tween::new(
                MARKER_DELAY + MARKER_STAGGER * index as u32,
                MARKER_DURATION,
                Ease::BackOut(1.7),
            ),
        }
    }
}
