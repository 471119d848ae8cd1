use chronicle_core::{Award, Biography, Decade, Document, Work};
use indexmap::IndexMap;

/// Built-in document used whenever the configured one cannot be loaded.
pub fn fallback_document() -> Document {
    let mut decades = IndexMap::new();
    decades.insert(
        "1970s".to_string(),
        decade(
            "Chicano Studies Pioneer",
            8,
            vec![
                (
                    "Books - Scholarly",
                    vec![
                        Work {
                            awards: Some("Hubert Herring Memorial Award".to_string()),
                            isbn: Some("082630303X".to_string()),
                            url: Some(
                                "https://www.amazon.com/Gaucho-Politics-Brazil-Grande-1930-1964/dp/082630303X"
                                    .to_string(),
                            ),
                            ..work(
                                "Gaúcho Politics in Brazil",
                                1974,
                                "Books - Scholarly",
                                "Scholarly monograph examining regional politics in Rio Grande do Sul, Brazil.",
                            )
                        },
                        Work {
                            isbn: Some("9780399503696".to_string()),
                            ..work(
                                "Three Perspectives on Ethnicity",
                                1976,
                                "Books - Scholarly",
                                "Comparative analysis of Black, Chicano, and Native American ethnic experiences.",
                            )
                        },
                    ],
                ),
                (
                    "Articles",
                    vec![Work {
                        url: Some("https://eric.ed.gov/?id=ED079204".to_string()),
                        ..work(
                            "Teaching the Chicano Experience",
                            1973,
                            "Articles",
                            "Foundational chapter on Chicano Studies pedagogy in James Banks' influential volume.",
                        )
                    }],
                ),
            ],
        ),
    );
    decades.insert(
        "1980s".to_string(),
        decade(
            "Multicultural Education Leader",
            12,
            vec![(
                "Books - Edited Works",
                vec![Work {
                    significance: Some("Major reference work in Hispanic studies".to_string()),
                    ..work(
                        "Hispanics in the United States (30 volumes)",
                        1980,
                        "Books - Edited Works",
                        "Monumental 30-volume series of Hispanic scholarship reprints.",
                    )
                }],
            )],
        ),
    );
    decades.insert(
        "1990s".to_string(),
        decade(
            "Media & Diversity Scholar",
            15,
            vec![(
                "Articles",
                vec![work(
                    "Media & Values Magazine Columns",
                    1994,
                    "Articles",
                    "Series of articles on media treatment of diversity.",
                )],
            )],
        ),
    );
    decades.insert(
        "2000s".to_string(),
        decade(
            "Creative Consulting",
            10,
            vec![(
                "Books - Scholarly",
                vec![
                    Work {
                        isbn: Some("9780807739372".to_string()),
                        url: Some(
                            "https://www.amazon.com/Children-Are-Watching-Diversity-Multicultural/dp/0807739375"
                                .to_string(),
                        ),
                        ..work(
                            "The Children Are Watching",
                            2000,
                            "Books - Scholarly",
                            "Groundbreaking book analyzing how media teaches about diversity.",
                        )
                    },
                    Work {
                        isbn: Some("9780807742518".to_string()),
                        ..work(
                            "The Making—and Remaking—of a Multiculturalist",
                            2002,
                            "Books - Scholarly",
                            "Autobiographical educational memoir tracing the multicultural education movement.",
                        )
                    },
                ],
            )],
        ),
    );
    decades.insert(
        "2010s".to_string(),
        decade(
            "Creative Works & Memoirs",
            8,
            vec![
                (
                    "Biography/Memoir",
                    vec![Work {
                        isbn: Some("9781597141888".to_string()),
                        url: Some(
                            "https://www.heydaybooks.com/catalog/rose-hill-an-intermarriage-before-its-time/"
                                .to_string(),
                        ),
                        ..work(
                            "Rose Hill: An Intermarriage before Its Time",
                            2012,
                            "Biography/Memoir",
                            "Memoir about growing up in an interracial, interfaith family in Kansas City.",
                        )
                    }],
                ),
                (
                    "Books - Poetry",
                    vec![Work {
                        awards: Some(
                            "Honorable Mention - 2017 International Latino Book Awards".to_string(),
                        ),
                        url: Some(
                            "https://www.amazon.com/Fourth-Quarter-Reflections-Cranky-Old/dp/1945378042"
                                .to_string(),
                        ),
                        ..work(
                            "Fourth Quarter: Reflections of a Cranky Old Man",
                            2016,
                            "Books - Poetry",
                            "Poetry collection reflecting on aging and cultural change.",
                        )
                    }],
                ),
            ],
        ),
    );
    decades.insert(
        "2020s".to_string(),
        decade(
            "Anti-Racism & Renewal",
            4,
            vec![
                (
                    "Novels",
                    vec![Work {
                        significance: Some(
                            "First novel after career in academic scholarship".to_string(),
                        ),
                        ..work(
                            "Scouts' Honor",
                            2025,
                            "Novels",
                            "Debut novel at age 91 - mystery set at Boy Scout Camp Matulia.",
                        )
                    }],
                ),
                (
                    "Articles",
                    vec![Work {
                        url: Some("https://doi.org/10.1080/15210960.2025.2558492".to_string()),
                        ..work(
                            "Renewing Multicultural Education: An Ancient Mariner's Manifesto",
                            2025,
                            "Articles",
                            "Keynote address on three bad habits in multicultural education.",
                        )
                    }],
                ),
            ],
        ),
    );

    Document {
        biography: Some(biography()),
        decades,
    }
}

fn biography() -> Biography {
    Biography {
        name: "Dr. Carlos E. Cortés".to_string(),
        title: "Edward A. Dickson Emeritus Professor of History".to_string(),
        institution: "University of California, Riverside".to_string(),
        bio: "Pioneering figure in multicultural education, ethnic studies, and diversity scholarship with a career spanning over five decades.".to_string(),
        career_start: 1968,
        total_works: "400+".to_string(),
        awards: vec![
            award(
                1974,
                "Hubert Herring Memorial Award",
                "Pacific Coast Council on Latin American Studies for Gaúcho Politics in Brazil",
            ),
            award(
                2009,
                "NAACP Image Award",
                "Creative/Cultural Advisory work for Nickelodeon",
            ),
            award(
                2017,
                "Honorable Mention - International Latino Book Awards",
                "Best Book of Poetry for Fourth Quarter",
            ),
            award(
                2020,
                "Constantine Panunzio Distinguished Emeriti Award",
                "University of California (first from UCR)",
            ),
        ],
        ..Biography::default()
    }
}

fn award(year: i32, name: &str, description: &str) -> Award {
    Award {
        year,
        award: name.to_string(),
        description: description.to_string(),
    }
}

fn work(title: &str, year: i32, category: &str, description: &str) -> Work {
    Work {
        title: title.to_string(),
        year,
        category: category.to_string(),
        description: Some(description.to_string()),
        ..Work::default()
    }
}

fn decade(theme: &str, total_works: u32, categories: Vec<(&str, Vec<Work>)>) -> Decade {
    Decade {
        theme: theme.to_string(),
        total_works,
        categories: categories
            .into_iter()
            .map(|(name, works)| (name.to_string(), works))
            .collect(),
        ..Decade::default()
    }
}
