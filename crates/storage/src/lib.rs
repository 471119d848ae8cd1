//! Document loading, fallback substitution and catalog queries.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chronicle_core::{Document, Settings, Work};

mod fallback;

pub use fallback::fallback_document;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{location} is empty")]
    Empty { location: String },
    #[error("parse {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the raw document text comes from.
pub trait DocumentSource {
    fn location(&self) -> String;
    fn fetch(&self) -> Result<String, LoadError>;
}

#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Resolves `relative` against `base` unless it is already absolute.
    pub fn new(base: impl AsRef<Path>, relative: impl AsRef<Path>) -> Self {
        let relative = relative.as_ref();
        let path = if relative.is_absolute() {
            relative.to_path_buf()
        } else {
            base.as_ref().join(relative)
        };
        Self { path }
    }
}

impl DocumentSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String, LoadError> {
        fs::read_to_string(&self.path).map_err(|source| LoadError::Io {
            location: self.location(),
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentOrigin {
    Loaded { location: String },
    Fallback { reason: String },
}

impl DocumentOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, DocumentOrigin::Fallback { .. })
    }
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub document: Document,
    pub origin: DocumentOrigin,
}

pub struct DataLoader<S> {
    source: S,
}

impl DataLoader<FileSource> {
    pub fn from_settings(base: impl AsRef<Path>, settings: &Settings) -> Self {
        Self::new(FileSource::new(base, &settings.data_path))
    }
}

impl<S: DocumentSource> DataLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Loads the document, substituting the built-in one on any failure.
    pub fn load(&self) -> LoadOutcome {
        match self.try_load() {
            Ok(document) => {
                let location = self.source.location();
                log::info!(
                    "loaded timeline document from {location} ({} works)",
                    all_works(Some(&document)).len()
                );
                LoadOutcome {
                    document,
                    origin: DocumentOrigin::Loaded { location },
                }
            }
            Err(err) => {
                log::warn!("falling back to built-in timeline document: {err}");
                LoadOutcome {
                    document: fallback_document(),
                    origin: DocumentOrigin::Fallback {
                        reason: err.to_string(),
                    },
                }
            }
        }
    }

    pub fn try_load(&self) -> Result<Document, LoadError> {
        let body = self.source.fetch()?;
        if body.trim().is_empty() {
            return Err(LoadError::Empty {
                location: self.source.location(),
            });
        }
        serde_json::from_str(&body).map_err(|source| LoadError::Parse {
            location: self.source.location(),
            source,
        })
    }
}

/// Every work in decade, category, then list order.
pub fn all_works(document: Option<&Document>) -> Vec<&Work> {
    let Some(document) = document else {
        return Vec::new();
    };
    document
        .decades
        .values()
        .flat_map(|decade| decade.works())
        .collect()
}

pub fn search_works<'a>(document: Option<&'a Document>, query: &str) -> Vec<&'a Work> {
    let needle = query.to_lowercase();
    all_works(document)
        .into_iter()
        .filter(|work| matches_query(work, query, &needle))
        .collect()
}

fn matches_query(work: &Work, query: &str, needle: &str) -> bool {
    work.title.to_lowercase().contains(needle)
        || work.category.to_lowercase().contains(needle)
        || work
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
        || work.year.to_string().contains(query)
}

/// Reads the settings file; a missing file yields defaults.
pub fn load_settings(path: impl AsRef<Path>) -> anyhow::Result<Settings> {
    let path = path.as_ref();
    let mut settings = match fs::read_to_string(path) {
        Ok(body) => serde_json::from_str::<Settings>(&body)
            .with_context(|| format!("parse settings {}", path.display()))?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err).with_context(|| format!("read settings {}", path.display()));
        }
    };
    settings.normalize();
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chronicle_core::{Decade, LogLevel};
    use indexmap::IndexMap;

    struct StaticSource(Result<&'static str, &'static str>);

    impl DocumentSource for StaticSource {
        fn location(&self) -> String {
            "memory".to_string()
        }

        fn fetch(&self) -> Result<String, LoadError> {
            match self.0 {
                Ok(body) => Ok(body.to_string()),
                Err(msg) => Err(LoadError::Io {
                    location: self.location(),
                    source: std::io::Error::other(msg),
                }),
            }
        }
    }

    fn work(title: &str, year: i32, category: &str, description: Option<&str>) -> Work {
        Work {
            title: title.to_string(),
            year,
            category: category.to_string(),
            description: description.map(str::to_string),
            ..Work::default()
        }
    }

    fn two_decade_document() -> Document {
        let mut first = IndexMap::new();
        first.insert(
            "Articles".to_string(),
            vec![work("Teaching the Chicano Experience", 1973, "Articles", None)],
        );
        first.insert(
            "Plays".to_string(),
            vec![
                work("Rose Hill", 1979, "Plays", Some("One-person play")),
                work("Second Act", 1978, "Plays", None),
            ],
        );
        let mut second = IndexMap::new();
        second.insert(
            "Videos".to_string(),
            vec![work("Diversity in the Classroom", 1994, "Videos", Some("Teacher training"))],
        );

        let mut decades = IndexMap::new();
        decades.insert(
            "1970s".to_string(),
            Decade {
                categories: first,
                ..Decade::default()
            },
        );
        decades.insert(
            "1990s".to_string(),
            Decade {
                categories: second,
                ..Decade::default()
            },
        );
        Document {
            biography: None,
            decades,
        }
    }

    #[test]
    fn all_works_flattens_in_document_order() {
        let doc = two_decade_document();
        let titles: Vec<_> = all_works(Some(&doc)).iter().map(|w| w.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Teaching the Chicano Experience",
                "Rose Hill",
                "Second Act",
                "Diversity in the Classroom"
            ]
        );
        assert!(all_works(None).is_empty());
    }

    #[test]
    fn search_matches_fields_case_insensitively() {
        let doc = two_decade_document();
        let titles = |q: &str| -> Vec<String> {
            search_works(Some(&doc), q)
                .iter()
                .map(|w| w.title.clone())
                .collect()
        };
        assert_eq!(titles("CHICANO"), ["Teaching the Chicano Experience"]);
        assert_eq!(titles("plays"), ["Rose Hill", "Second Act"]);
        assert_eq!(titles("training"), ["Diversity in the Classroom"]);
        assert_eq!(titles("197"), ["Teaching the Chicano Experience", "Rose Hill", "Second Act"]);
        assert!(titles("nothing here").is_empty());
    }

    #[test]
    fn search_ignores_missing_description() {
        let doc = two_decade_document();
        let results = search_works(Some(&doc), "one-person");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Rose Hill");
    }

    #[test]
    fn loader_parses_source_body() {
        let loader = DataLoader::new(StaticSource(Ok(
            r#"{"decades": {"1980s": {"theme": "t", "totalWorks": 3, "categories": {}}}}"#,
        )));
        let outcome = loader.load();
        assert_eq!(
            outcome.origin,
            DocumentOrigin::Loaded {
                location: "memory".to_string()
            }
        );
        assert_eq!(outcome.document.decades["1980s"].total_works, 3);
    }

    #[test]
    fn loader_falls_back_on_fetch_error() {
        let outcome = DataLoader::new(StaticSource(Err("offline"))).load();
        assert!(outcome.origin.is_fallback());
        assert_eq!(outcome.document, fallback_document());
    }

    #[test]
    fn loader_falls_back_on_malformed_or_empty_body() {
        let outcome = DataLoader::new(StaticSource(Ok("{ not json"))).load();
        match outcome.origin {
            DocumentOrigin::Fallback { reason } => assert!(reason.starts_with("parse memory")),
            other => panic!("unexpected origin {other:?}"),
        }

        let err = DataLoader::new(StaticSource(Ok("  \n"))).try_load().unwrap_err();
        assert!(matches!(err, LoadError::Empty { .. }));
    }

    #[test]
    fn file_source_resolves_relative_paths() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let data_dir = dir.path().join("assets").join("data");
        fs::create_dir_all(&data_dir)?;
        fs::write(
            data_dir.join("timeline-data.json"),
            r#"{"biography": {"name": "N", "careerStart": 1968, "totalWorks": "1"}, "decades": {}}"#,
        )?;

        let loader = DataLoader::from_settings(dir.path(), &Settings::default());
        let outcome = loader.load();
        assert!(!outcome.origin.is_fallback());
        assert_eq!(
            outcome.document.biography.map(|b| b.name),
            Some("N".to_string())
        );
        Ok(())
    }

    #[test]
    fn missing_file_falls_back() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let loader = DataLoader::new(FileSource::new(dir.path(), "missing.json"));
        let err = loader.try_load().unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(loader.load().origin.is_fallback());
        Ok(())
    }

    #[test]
    fn settings_file_is_optional() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("settings.json");
        let settings = load_settings(&path)?;
        assert_eq!(settings.data_path, chronicle_core::DEFAULT_DATA_PATH);

        fs::write(
            &path,
            r#"{"data_path": " other.json ", "log_level": "debug", "apply_category_filters": true}"#,
        )?;
        let settings = load_settings(&path)?;
        assert_eq!(settings.data_path, "other.json");
        assert_eq!(settings.log_level, LogLevel::Debug);
        assert!(settings.apply_category_filters);

        fs::write(&path, "[")?;
        assert!(load_settings(&path).is_err());
        Ok(())
    }
}
