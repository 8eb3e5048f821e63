use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::utils::dates;

/// Store-assigned book identifier.
pub type BookId = u64;

/// A catalogued book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier, assigned by the store and never reused
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// 10 or 13 digit ISBN, optionally hyphenated
    pub isbn: String,
    /// Publication date
    #[serde(with = "dates")]
    pub publication_date: NaiveDateTime,
    /// Cover image URL or inline image data
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Book {
    pub fn from_fields(id: BookId, fields: BookFields) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            isbn: fields.isbn,
            publication_date: fields.publication_date,
            image_url: fields.image_url,
        }
    }
}

/// Request body for creating or replacing a book.
///
/// Every field is optional on the wire so that a missing value is reported
/// as a validation failure rather than a decoding error. A client-supplied
/// `id` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub isbn: String,
    #[serde(default, deserialize_with = "dates::deserialize_optional")]
    pub publication_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// The mutable fields of a book after validation has accepted a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookFields {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub publication_date: NaiveDateTime,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn book_serializes_camel_case() {
        let book = Book {
            id: 3,
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            isbn: "978-0451524935".to_string(),
            publication_date: dates::parse_date_time("1949-06-08").unwrap(),
            image_url: None,
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "title": "1984",
                "author": "George Orwell",
                "isbn": "978-0451524935",
                "publicationDate": "1949-06-08T00:00:00",
                "imageUrl": null
            })
        );
    }

    #[test]
    fn draft_ignores_client_id_and_tolerates_missing_fields() {
        let draft: BookDraft = serde_json::from_value(json!({
            "id": 999,
            "title": "Dune",
            "publicationDate": "1965-08-01"
        }))
        .unwrap();

        assert_eq!(draft.title, "Dune");
        assert!(draft.author.is_empty());
        assert!(draft.isbn.is_empty());
        assert!(draft.publication_date.is_some());
        assert!(draft.image_url.is_none());
    }

    #[test]
    fn draft_blank_date_reads_as_missing() {
        let draft: BookDraft = serde_json::from_value(json!({ "publicationDate": "" })).unwrap();
        assert!(draft.publication_date.is_none());
    }
}
