//! Field validation and ISBN uniqueness for book drafts.
//!
//! [`validate_book`] runs the checks in a fixed order (title, author, ISBN
//! format, ISBN uniqueness, publication date) and reports only the first
//! failure, so the same draft always yields the same error.

use chrono::{Datelike, NaiveDateTime};

use super::error::{ErrorKind, Field, ValidationError};
use super::models::{Book, BookDraft, BookFields, BookId};

pub const TITLE_MIN_LEN: usize = 2;
pub const TITLE_MAX_LEN: usize = 100;
pub const AUTHOR_MIN_LEN: usize = 2;
pub const AUTHOR_MAX_LEN: usize = 50;

/// Publication dates before January 1st of this year are rejected.
pub const EARLIEST_PUBLICATION_YEAR: i32 = 1450;

const ISBN_LENGTHS: [usize; 2] = [10, 13];

pub type ValidationResult = Result<(), ValidationError>;

fn validate_text(field: Field, label: &str, value: &str, min: usize, max: usize) -> ValidationResult {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(
            field,
            ErrorKind::RequiredField,
            format!("{label} is required"),
        ));
    }

    let len = trimmed.chars().count();
    if len < min {
        return Err(ValidationError::new(
            field,
            ErrorKind::TooShort,
            format!("{label} must be at least {min} characters"),
        ));
    }
    if len > max {
        return Err(ValidationError::new(
            field,
            ErrorKind::TooLong,
            format!("{label} cannot exceed {max} characters"),
        ));
    }

    Ok(())
}

pub fn validate_title(title: &str) -> ValidationResult {
    validate_text(Field::Title, "Title", title, TITLE_MIN_LEN, TITLE_MAX_LEN)
}

pub fn validate_author(author: &str) -> ValidationResult {
    validate_text(Field::Author, "Author", author, AUTHOR_MIN_LEN, AUTHOR_MAX_LEN)
}

/// Strip every hyphen; the result is what format, length, and uniqueness
/// checks compare.
pub fn normalize_isbn(isbn: &str) -> String {
    isbn.chars().filter(|c| *c != '-').collect()
}

pub fn validate_isbn(isbn: &str) -> ValidationResult {
    if isbn.trim().is_empty() {
        return Err(ValidationError::new(
            Field::Isbn,
            ErrorKind::RequiredField,
            "ISBN is required",
        ));
    }

    let digits = normalize_isbn(isbn);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            Field::Isbn,
            ErrorKind::InvalidFormat,
            "ISBN must contain only numbers and optional hyphens",
        ));
    }

    if !ISBN_LENGTHS.contains(&digits.len()) {
        return Err(ValidationError::new(
            Field::Isbn,
            ErrorKind::InvalidLength,
            "ISBN must be exactly 10 or 13 digits",
        ));
    }

    Ok(())
}

/// `false` when another book already carries the same normalized ISBN.
/// The book with `exclude_id` is skipped so an update never conflicts with itself.
pub fn is_isbn_unique(isbn: &str, books: &[Book], exclude_id: Option<BookId>) -> bool {
    let candidate = normalize_isbn(isbn);
    !books
        .iter()
        .filter(|book| Some(book.id) != exclude_id)
        .any(|book| normalize_isbn(&book.isbn) == candidate)
}

pub fn validate_publication_date(date: NaiveDateTime, now: NaiveDateTime) -> ValidationResult {
    if date > now {
        return Err(ValidationError::new(
            Field::PublicationDate,
            ErrorKind::FutureDate,
            "Publication date cannot be in the future",
        ));
    }

    if date.year() < EARLIEST_PUBLICATION_YEAR {
        return Err(ValidationError::new(
            Field::PublicationDate,
            ErrorKind::TooOld,
            format!("Publication date must be after {EARLIEST_PUBLICATION_YEAR}"),
        ));
    }

    Ok(())
}

/// Validate a draft against field rules and the current collection.
///
/// On success the accepted fields are returned, ready for the store.
pub fn validate_book(
    draft: &BookDraft,
    books: &[Book],
    exclude_id: Option<BookId>,
    now: NaiveDateTime,
) -> Result<BookFields, ValidationError> {
    validate_title(&draft.title)?;
    validate_author(&draft.author)?;
    validate_isbn(&draft.isbn)?;

    if !is_isbn_unique(&draft.isbn, books, exclude_id) {
        return Err(ValidationError::new(
            Field::Isbn,
            ErrorKind::DuplicateIsbn,
            "This ISBN already exists",
        ));
    }

    let publication_date = draft.publication_date.ok_or_else(|| {
        ValidationError::new(
            Field::PublicationDate,
            ErrorKind::RequiredField,
            "Publication date is required",
        )
    })?;
    validate_publication_date(publication_date, now)?;

    Ok(BookFields {
        title: draft.title.clone(),
        author: draft.author.clone(),
        isbn: draft.isbn.clone(),
        publication_date,
        image_url: draft.image_url.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::books::clock::{Clock, FixedClock, SystemClock};
    use crate::utils::dates::parse_date_time;
    use chrono::{Duration, Utc};

    fn at(value: &str) -> NaiveDateTime {
        parse_date_time(value).unwrap()
    }

    fn now() -> NaiveDateTime {
        at("2024-06-15T12:00:00")
    }

    fn book(id: BookId, isbn: &str) -> Book {
        Book {
            id,
            title: "The Odyssey".to_string(),
            author: "Homer".to_string(),
            isbn: isbn.to_string(),
            publication_date: at("1488-01-01"),
            image_url: None,
        }
    }

    fn draft() -> BookDraft {
        BookDraft {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            isbn: "978-0441172719".to_string(),
            publication_date: Some(at("1965-08-01")),
            image_url: Some("https://example.com/dune.jpg".to_string()),
        }
    }

    fn kind(result: ValidationResult) -> ErrorKind {
        result.unwrap_err().kind
    }

    #[test]
    fn title_length_bounds() {
        assert_eq!(kind(validate_title("")), ErrorKind::RequiredField);
        assert_eq!(kind(validate_title("   \t")), ErrorKind::RequiredField);
        assert_eq!(kind(validate_title(" A ")), ErrorKind::TooShort);
        assert!(validate_title("  It  ").is_ok());
        assert!(validate_title(&"x".repeat(100)).is_ok());
        assert_eq!(kind(validate_title(&"x".repeat(101))), ErrorKind::TooLong);
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        assert!(validate_title(&"é".repeat(100)).is_ok());
    }

    #[test]
    fn author_length_bounds() {
        assert_eq!(kind(validate_author("")), ErrorKind::RequiredField);
        assert_eq!(kind(validate_author("H")), ErrorKind::TooShort);
        assert!(validate_author(&"y".repeat(50)).is_ok());
        assert_eq!(kind(validate_author(&"y".repeat(51))), ErrorKind::TooLong);
    }

    #[test]
    fn messages_name_the_field() {
        assert_eq!(validate_title("").unwrap_err().message, "Title is required");
        assert_eq!(
            validate_author("x").unwrap_err().message,
            "Author must be at least 2 characters"
        );
        assert_eq!(
            validate_title(&"x".repeat(101)).unwrap_err().message,
            "Title cannot exceed 100 characters"
        );
    }

    #[test]
    fn isbn_rules() {
        assert_eq!(kind(validate_isbn(" ")), ErrorKind::RequiredField);
        assert_eq!(kind(validate_isbn("978-014310928X")), ErrorKind::InvalidFormat);
        assert_eq!(kind(validate_isbn("978 0143109280")), ErrorKind::InvalidFormat);
        assert_eq!(kind(validate_isbn("123")), ErrorKind::InvalidLength);
        assert_eq!(kind(validate_isbn("12345678901")), ErrorKind::InvalidLength);
        assert!(validate_isbn("0-306-40615-2").is_ok());
        assert!(validate_isbn("978-0143109280").is_ok());
        assert!(validate_isbn("9780143109280").is_ok());
    }

    #[test]
    fn hyphen_only_isbn_is_a_length_error() {
        assert_eq!(kind(validate_isbn("---")), ErrorKind::InvalidLength);
    }

    #[test]
    fn isbn_uniqueness_ignores_hyphens_and_excluded_id() {
        let books = vec![book(12, "978-0143109280"), book(13, "0306406152")];

        assert!(!is_isbn_unique("9780143109280", &books, None));
        assert!(!is_isbn_unique("0-306-40615-2", &books, None));
        assert!(is_isbn_unique("9780143109280", &books, Some(12)));
        assert!(!is_isbn_unique("9780143109280", &books, Some(13)));
        assert!(is_isbn_unique("9780441172719", &books, None));
        assert!(is_isbn_unique("9780441172719", &[], None));
    }

    #[test]
    fn publication_date_bounds() {
        let now = now();
        assert_eq!(
            kind(validate_publication_date(now + Duration::days(1), now)),
            ErrorKind::FutureDate
        );
        assert_eq!(
            kind(validate_publication_date(now + Duration::seconds(1), now)),
            ErrorKind::FutureDate
        );
        assert!(validate_publication_date(now, now).is_ok());
        assert!(validate_publication_date(at("1450-01-01"), now).is_ok());
        assert_eq!(
            kind(validate_publication_date(at("1449-12-31"), now)),
            ErrorKind::TooOld
        );
        assert_eq!(
            kind(validate_publication_date(at("1449-12-31T23:59:59"), now)),
            ErrorKind::TooOld
        );
    }

    #[test]
    fn past_instant_with_offset_is_not_in_the_future() {
        let clock = SystemClock;
        let hour_ago = parse_date_time(&(Utc::now() - Duration::hours(1)).to_rfc3339()).unwrap();
        assert!(validate_publication_date(hour_ago, clock.now()).is_ok());

        let frozen = FixedClock(clock.now());
        assert!(validate_publication_date(hour_ago, frozen.now()).is_ok());

        let hour_ahead = parse_date_time(&(Utc::now() + Duration::hours(1)).to_rfc3339()).unwrap();
        assert_eq!(
            kind(validate_publication_date(hour_ahead, frozen.now())),
            ErrorKind::FutureDate
        );
    }

    #[test]
    fn valid_draft_yields_fields() {
        let fields = validate_book(&draft(), &[book(1, "978-0143109280")], None, now()).unwrap();
        assert_eq!(fields.title, "Dune");
        assert_eq!(fields.isbn, "978-0441172719");
        assert_eq!(fields.publication_date, at("1965-08-01"));
        assert_eq!(fields.image_url.as_deref(), Some("https://example.com/dune.jpg"));
    }

    #[test]
    fn first_failure_wins() {
        let mut bad = draft();
        bad.title = String::new();
        bad.author = String::new();
        bad.isbn = "abc".to_string();
        bad.publication_date = None;
        assert_eq!(
            validate_book(&bad, &[], None, now()).unwrap_err().field,
            Field::Title
        );

        bad.title = "Dune".to_string();
        assert_eq!(
            validate_book(&bad, &[], None, now()).unwrap_err().field,
            Field::Author
        );

        bad.author = "Frank Herbert".to_string();
        assert_eq!(
            validate_book(&bad, &[], None, now()).unwrap_err().kind,
            ErrorKind::InvalidFormat
        );
    }

    #[test]
    fn format_is_checked_before_uniqueness() {
        let books = vec![book(1, "123")];
        let mut bad = draft();
        bad.isbn = "123".to_string();
        assert_eq!(
            validate_book(&bad, &books, None, now()).unwrap_err().kind,
            ErrorKind::InvalidLength
        );
    }

    #[test]
    fn uniqueness_is_checked_before_date() {
        let books = vec![book(1, "9780441172719")];
        let mut bad = draft();
        bad.publication_date = Some(at("1200-01-01"));
        assert_eq!(
            validate_book(&bad, &books, None, now()).unwrap_err().kind,
            ErrorKind::DuplicateIsbn
        );
    }

    #[test]
    fn missing_date_is_required_field() {
        let mut bad = draft();
        bad.publication_date = None;
        let err = validate_book(&bad, &[], None, now()).unwrap_err();
        assert_eq!(err.field, Field::PublicationDate);
        assert_eq!(err.kind, ErrorKind::RequiredField);
        assert_eq!(err.message, "Publication date is required");
    }

    #[test]
    fn own_isbn_does_not_conflict_on_update() {
        let books = vec![book(5, "978-0441172719")];
        assert!(validate_book(&draft(), &books, Some(5), now()).is_ok());
        assert_eq!(
            validate_book(&draft(), &books, None, now()).unwrap_err().kind,
            ErrorKind::DuplicateIsbn
        );
    }
}
