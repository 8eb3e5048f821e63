use std::fmt::Debug;

use chrono::NaiveDate;

use super::models::{Book, BookFields, BookId};
use super::validation::normalize_isbn;

/// Storage contract for the catalog.
///
/// Stores trust their callers: only validated fields are ever passed in.
pub trait BookStore: Debug + Send + Sync {
    /// All books in insertion order.
    fn all(&self) -> &[Book];

    fn get(&self, id: BookId) -> Option<&Book>;

    /// Insert under a fresh id.
    fn add(&mut self, fields: BookFields) -> Book;

    /// Replace every field except the id; `None` if the id is unknown.
    fn update(&mut self, id: BookId, fields: BookFields) -> Option<Book>;

    /// `true` if a book was removed.
    fn delete(&mut self, id: BookId) -> bool;
}

/// Vector-backed store. Ids increase monotonically and are never reused.
#[derive(Debug)]
pub struct MemoryBookStore {
    books: Vec<Book>,
    next_id: BookId,
}

impl Default for MemoryBookStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBookStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self {
            books: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a store holding `books`; new ids continue after the highest one.
    pub fn with_books(books: Vec<Book>) -> Self {
        let next_id = books.iter().map(|book| book.id).max().unwrap_or(0) + 1;
        Self { books, next_id }
    }

    /// Creates a store pre-populated with [`sample_books`].
    pub fn seeded() -> Self {
        Self::with_books(sample_books())
    }
}

impl BookStore for MemoryBookStore {
    fn all(&self) -> &[Book] {
        &self.books
    }

    fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    fn add(&mut self, fields: BookFields) -> Book {
        let book = Book::from_fields(self.next_id, fields);
        self.next_id += 1;
        self.books.push(book.clone());
        book
    }

    fn update(&mut self, id: BookId, fields: BookFields) -> Option<Book> {
        let book = self.books.iter_mut().find(|book| book.id == id)?;
        *book = Book::from_fields(id, fields);
        Some(book.clone())
    }

    fn delete(&mut self, id: BookId) -> bool {
        match self.books.iter().position(|book| book.id == id) {
            Some(index) => {
                self.books.remove(index);
                true
            }
            None => false,
        }
    }
}

const SAMPLE_BOOKS: &[(&str, &str, &str, (i32, u32, u32))] = &[
    ("The Great Gatsby", "F. Scott Fitzgerald", "978-0743273565", (1925, 4, 10)),
    ("To Kill a Mockingbird", "Harper Lee", "978-0061120084", (1960, 7, 11)),
    ("1984", "George Orwell", "978-0451524935", (1949, 6, 8)),
    ("Pride and Prejudice", "Jane Austen", "978-0141439518", (1813, 1, 28)),
    ("The Catcher in the Rye", "J.D. Salinger", "978-0316769174", (1951, 7, 16)),
    ("Jane Eyre", "Charlotte Brontë", "978-0141441146", (1847, 10, 16)),
    ("The Lord of the Rings", "J.R.R. Tolkien", "978-0544003415", (1954, 7, 29)),
    ("Moby-Dick", "Herman Melville", "978-0142437247", (1851, 10, 18)),
    ("The Hobbit", "J.R.R. Tolkien", "978-0547928227", (1937, 9, 21)),
    ("Wuthering Heights", "Emily Brontë", "978-0141439556", (1847, 12, 19)),
    ("The Picture of Dorian Gray", "Oscar Wilde", "978-0141439570", (1890, 7, 1)),
    ("The Odyssey", "Homer", "978-0143109280", (1488, 1, 1)),
];

/// The bundled starter catalog, ids 1 through 12.
pub fn sample_books() -> Vec<Book> {
    SAMPLE_BOOKS
        .iter()
        .zip(1..)
        .filter_map(|(&(title, author, isbn, (year, month, day)), id)| {
            let publication_date = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(0, 0, 0)?;
            Some(Book {
                id,
                title: title.to_string(),
                author: author.to_string(),
                isbn: isbn.to_string(),
                publication_date,
                image_url: Some(format!(
                    "https://covers.openlibrary.org/b/isbn/{}-L.jpg",
                    normalize_isbn(isbn)
                )),
            })
        })
        .collect()
}
