//! Filtering and ordering of the book collection for listing.
//!
//! Stages run in order: text search, date range, year bucket, sort. Every
//! parameter has a neutral default and unrecognised names degrade to it.

use std::cmp::Ordering;

use chrono::{Datelike, NaiveDate};

use super::models::Book;

/// Legacy publication-year bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    All,
    Before2000,
    From2000To2010,
    After2010,
}

impl YearFilter {
    /// Case-insensitive; anything unrecognised means [`YearFilter::All`].
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("before2000") {
            YearFilter::Before2000
        } else if value.eq_ignore_ascii_case("2000-2010") {
            YearFilter::From2000To2010
        } else if value.eq_ignore_ascii_case("after2010") {
            YearFilter::After2010
        } else {
            YearFilter::All
        }
    }

    pub fn matches(self, year: i32) -> bool {
        match self {
            YearFilter::All => true,
            YearFilter::Before2000 => year < 2000,
            YearFilter::From2000To2010 => (2000..=2010).contains(&year),
            YearFilter::After2010 => year > 2010,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Title,
    Author,
    Date,
}

impl SortKey {
    /// Case-insensitive; anything unrecognised sorts by title.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.eq_ignore_ascii_case("author") {
            SortKey::Author
        } else if value.eq_ignore_ascii_case("date") {
            SortKey::Date
        } else {
            SortKey::Title
        }
    }

    fn compare(self, a: &Book, b: &Book) -> Ordering {
        match self {
            SortKey::Title => compare_ignoring_case(&a.title, &b.title),
            SortKey::Author => compare_ignoring_case(&a.author, &b.author),
            SortKey::Date => a.publication_date.cmp(&b.publication_date),
        }
    }
}

/// Text keys differing only in case compare equal and keep their input order.
fn compare_ignoring_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Only a case-insensitive `desc` selects descending order.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("desc") {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }
}

/// Listing parameters after parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub search_query: String,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub year_filter: YearFilter,
    pub sort_by: SortKey,
    pub sort_order: SortOrder,
}

fn matches_search(book: &Book, needle: &str) -> bool {
    [&book.title, &book.author, &book.isbn]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Filter and order `books` without touching the input.
///
/// The sort is stable: books with equal keys keep the order they had in `books`,
/// in both directions.
pub fn list_books(books: &[Book], query: &BookQuery) -> Vec<Book> {
    let needle = query.search_query.trim().to_lowercase();

    let mut result: Vec<Book> = books
        .iter()
        .filter(|book| needle.is_empty() || matches_search(book, &needle))
        .filter(|book| {
            let date = book.publication_date.date();
            query.min_date.map_or(true, |min| date >= min)
                && query.max_date.map_or(true, |max| date <= max)
        })
        .filter(|book| query.year_filter.matches(book.publication_date.year()))
        .cloned()
        .collect();

    let key = query.sort_by;
    match query.sort_order {
        SortOrder::Ascending => result.sort_by(|a, b| key.compare(a, b)),
        SortOrder::Descending => result.sort_by(|a, b| key.compare(b, a)),
    }

    result
}
