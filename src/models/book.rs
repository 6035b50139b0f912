//! Book model and related types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Icon used when a genre has no dedicated one
pub const DEFAULT_ICON: &str = "book";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9-]").expect("valid regex"));

/// Book record as stored in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub total_copies: u32,
    #[serde(default)]
    pub available_copies: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default = "default_icon")]
    pub icon: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_icon() -> String {
    DEFAULT_ICON.to_string()
}

impl Book {
    /// Case-insensitive substring match over title, author, genre and tags.
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
            || self.genre.to_lowercase().contains(needle)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(needle))
    }

    /// Apply a field-level diff. Optional fields absent on the book stay absent
    /// and available copies never exceed the total afterwards.
    pub fn apply(&mut self, patch: BookPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
        if let Some(total) = patch.total_copies {
            self.total_copies = total;
        }
        if let Some(available) = patch.available_copies {
            self.available_copies = available;
        }
        if self.available_copies > self.total_copies {
            tracing::warn!(
                "Book {}: available copies {} clamped to total {}",
                self.id,
                self.available_copies,
                self.total_copies
            );
            self.available_copies = self.total_copies;
        }
        if let Some(icon) = patch.icon {
            self.icon = icon;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        overwrite_present(&mut self.description, patch.description);
        overwrite_present(&mut self.rating, patch.rating);
        overwrite_present(&mut self.isbn, patch.isbn);
        overwrite_present(&mut self.pages, patch.pages);
        overwrite_present(&mut self.year, patch.year);
    }
}

fn overwrite_present<T>(slot: &mut Option<T>, value: Option<T>) {
    if let (Some(current), Some(value)) = (slot.as_mut(), value) {
        *current = value;
    }
}

/// Field-level diff for a book update
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub total_copies: Option<u32>,
    pub available_copies: Option<u32>,
    pub rating: Option<f32>,
    pub isbn: Option<String>,
    pub pages: Option<u32>,
    pub year: Option<i32>,
    pub icon: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Copy count as typed in a form: a number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum CopiesInput {
    Number(i64),
    Text(String),
}

impl CopiesInput {
    /// Parsed copy count; unparseable, zero or negative input falls back to 1
    pub fn count(&self) -> u32 {
        let parsed = match self {
            CopiesInput::Number(n) => *n,
            CopiesInput::Text(s) => s.trim().parse::<i64>().unwrap_or(0),
        };
        u32::try_from(parsed).ok().filter(|n| *n > 0).unwrap_or(1)
    }
}

/// Input for adding a book to the catalog
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    /// Client-supplied identifier; derived from the title when absent
    pub id: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub copies: Option<CopiesInput>,
    pub total_copies: Option<CopiesInput>,
    pub available_copies: Option<u32>,
    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f32>,
    pub isbn: Option<String>,
    pub pages: Option<u32>,
    pub year: Option<i32>,
    pub tags: Option<Vec<String>>,
}

impl NewBook {
    /// Names of required fields that are absent or blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.title) {
            missing.push("title");
        }
        if is_blank(&self.author) {
            missing.push("author");
        }
        missing
    }

    /// Build the catalog record. Callers check `missing_fields` first.
    pub fn into_book(self) -> Book {
        let title = self.title.unwrap_or_default().trim().to_string();
        let genre = self.genre.unwrap_or_default();
        let total_copies = self
            .total_copies
            .or(self.copies)
            .map(|c| c.count())
            .unwrap_or(1);
        let available_copies = self
            .available_copies
            .map(|a| a.min(total_copies))
            .unwrap_or(total_copies);

        Book {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| slugify(&title)),
            author: self.author.unwrap_or_default().trim().to_string(),
            icon: genre_icon(&genre).to_string(),
            title,
            genre,
            description: self.description,
            total_copies,
            available_copies,
            rating: self.rating,
            isbn: self.isbn,
            pages: self.pages,
            year: self.year,
            tags: self.tags.unwrap_or_default(),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |s| s.trim().is_empty())
}

/// Derive a book identifier from its title: lowercase, whitespace runs become
/// hyphens, anything outside `[a-z0-9-]` is dropped.
pub fn slugify(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let hyphenated = WHITESPACE_RUN.replace_all(&lowered, "-");
    NON_SLUG_CHARS.replace_all(&hyphenated, "").into_owned()
}

/// Icon tag for a genre, falling back to [`DEFAULT_ICON`]
pub fn genre_icon(genre: &str) -> &'static str {
    match genre.trim().to_lowercase().as_str() {
        "fiction" => "book-open",
        "mystery" => "user-secret",
        "thriller" => "bolt",
        "science fiction" | "sci-fi" => "rocket",
        "fantasy" => "dragon",
        "romance" => "heart",
        "biography" => "user",
        "history" => "landmark",
        "self-help" => "lightbulb",
        "science" => "flask",
        "poetry" => "feather",
        "children" => "child",
        _ => DEFAULT_ICON,
    }
}

/// Demo catalog written on first run
pub fn seed_books() -> Vec<Book> {
    let seed = [
        (
            "The Silent Patient",
            "Alex Michaelides",
            "Mystery",
            "A woman shoots her husband and never speaks again.",
            3,
            4.1,
            "9781250301697",
            336,
            2019,
            &["psychological", "thriller", "mystery"][..],
        ),
        (
            "Project Hail Mary",
            "Andy Weir",
            "Science Fiction",
            "A lone astronaut wakes up with no memory and a mission to save Earth.",
            2,
            4.5,
            "9780593135204",
            496,
            2021,
            &["space", "survival", "science"][..],
        ),
        (
            "Where the Crawdads Sing",
            "Delia Owens",
            "Fiction",
            "A coming-of-age story set in the marshes of North Carolina.",
            4,
            4.4,
            "9780735219090",
            384,
            2018,
            &["nature", "coming-of-age", "mystery"][..],
        ),
        (
            "Atomic Habits",
            "James Clear",
            "Self-Help",
            "Tiny changes, remarkable results.",
            5,
            4.6,
            "9780735211292",
            320,
            2018,
            &["habits", "productivity"][..],
        ),
        (
            "The Name of the Wind",
            "Patrick Rothfuss",
            "Fantasy",
            "The tale of Kvothe, told in his own words.",
            1,
            4.5,
            "9780756404741",
            662,
            2007,
            &["magic", "epic", "adventure"][..],
        ),
        (
            "Educated",
            "Tara Westover",
            "Biography",
            "A memoir about growing up in a survivalist family and finding education.",
            2,
            4.4,
            "9780399590504",
            352,
            2018,
            &["memoir", "education"][..],
        ),
    ];

    seed.into_iter()
        .map(
            |(title, author, genre, description, copies, rating, isbn, pages, year, tags)| Book {
                id: slugify(title),
                title: title.to_string(),
                author: author.to_string(),
                genre: genre.to_string(),
                description: Some(description.to_string()),
                total_copies: copies,
                available_copies: copies,
                rating: Some(rating),
                isbn: Some(isbn.to_string()),
                pages: Some(pages),
                year: Some(year),
                icon: genre_icon(genre).to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
            },
        )
        .collect()
}
