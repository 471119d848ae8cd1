//! Core domain types for Chronicle.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_DATA_PATH: &str = "assets/data/timeline-data.json";
pub const DEFAULT_CATEGORY_COLOR: &str = "#1976d2";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecadeDescriptor {
    pub key: &'static str,
    pub range: &'static str,
    pub theme: &'static str,
    pub color: &'static str,
}

pub const DECADES: [DecadeDescriptor; 6] = [
    DecadeDescriptor {
        key: "1970s",
        range: "1970-1979",
        theme: "Chicano Studies Pioneer",
        color: "#2C3E50",
    },
    DecadeDescriptor {
        key: "1980s",
        range: "1980-1989",
        theme: "Multicultural Education Leader",
        color: "#8E44AD",
    },
    DecadeDescriptor {
        key: "1990s",
        range: "1990-1999",
        theme: "Media & Diversity Scholar",
        color: "#2980B9",
    },
    DecadeDescriptor {
        key: "2000s",
        range: "2000-2009",
        theme: "Creative Consulting",
        color: "#27AE60",
    },
    DecadeDescriptor {
        key: "2010s",
        range: "2010-2019",
        theme: "Creative Works & Memoirs",
        color: "#E74C3C",
    },
    DecadeDescriptor {
        key: "2020s",
        range: "2020-2025",
        theme: "Anti-Racism & Renewal",
        color: "#C0392B",
    },
];

/// Category name to accent color, in display order.
pub const CATEGORY_COLORS: [(&str, &str); 15] = [
    ("Books - Scholarly", "#1976d2"),
    ("Books - Edited Works", "#0288d1"),
    ("Articles", "#00796b"),
    ("Blogs", "#f57c00"),
    ("Plays", "#c2185b"),
    ("Novels", "#7b1fa2"),
    ("Books - Poetry", "#512da8"),
    ("Biography/Memoir", "#d32f2f"),
    ("Consulting Projects", "#0097a7"),
    ("Curriculum Development", "#388e3c"),
    ("Videos", "#e64a19"),
    ("Teaching Materials", "#5d4037"),
    ("Administrative Work", "#455a64"),
    ("Papers", "#689f38"),
    ("Books - Textbook Contributions", "#00838f"),
];

pub fn find_decade(key: &str) -> Option<&'static DecadeDescriptor> {
    DECADES.iter().find(|d| d.key == key)
}

pub fn category_color(category: &str) -> &'static str {
    CATEGORY_COLORS
        .iter()
        .find(|(name, _)| *name == category)
        .map(|(_, color)| *color)
        .unwrap_or(DEFAULT_CATEGORY_COLOR)
}

/// Parses `#rrggbb` (case-insensitive) into its components.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub biography: Option<Biography>,
    #[serde(default)]
    pub decades: IndexMap<String, Decade>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biography {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub bio: String,
    pub career_start: i32,
    #[serde(default, deserialize_with = "deserialize_label")]
    pub total_works: String,
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_year: Option<i32>,
    #[serde(
        default,
        rename = "personal_background",
        skip_serializing_if = "Option::is_none"
    )]
    pub personal_background: Option<String>,
    #[serde(
        default,
        rename = "timeline_highlights",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub timeline_highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Award {
    pub year: i32,
    pub award: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub year: i32,
    pub event: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decade {
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub total_works: u32,
    #[serde(default)]
    pub categories: IndexMap<String, Vec<Work>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(
        default,
        rename = "key_achievements",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub key_achievements: Vec<String>,
}

impl Decade {
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Works across all categories, in document order.
    pub fn works(&self) -> impl Iterator<Item = &Work> {
        self.categories.values().flatten()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Work {
    pub title: String,
    pub year: i32,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub awards: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhanced_description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_themes: Vec<String>,
}

impl Work {
    pub fn category_color(&self) -> &'static str {
        category_color(&self.category)
    }
}

fn deserialize_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Label {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Label::deserialize(deserializer)? {
        Label::Text(text) => text,
        Label::Int(value) => value.to_string(),
        Label::Float(value) => value.to_string(),
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub data_path: String,
    pub log_level: LogLevel,
    pub animations: bool,
    pub apply_category_filters: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err("unknown log level"),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_path: DEFAULT_DATA_PATH.to_string(),
            log_level: LogLevel::Info,
            animations: true,
            apply_category_filters: false,
        }
    }
}

impl Settings {
    pub fn normalize(&mut self) {
        let trimmed = self.data_path.trim();
        self.data_path = if trimmed.is_empty() {
            DEFAULT_DATA_PATH.to_string()
        } else {
            trimmed.to_string()
        };
    }
}
