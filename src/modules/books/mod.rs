pub mod clock;
pub mod error;
pub mod models;
pub mod query;
pub mod routes;
pub mod service;
pub mod store;
pub mod validation;

use async_trait::async_trait;
use axum::Router;
use bookshelf_kernel::{settings::CatalogSettings, InitCtx, Module};
use serde_json::json;

use clock::SystemClock;
use service::BookCatalog;
use store::MemoryBookStore;
use validation::{AUTHOR_MAX_LEN, AUTHOR_MIN_LEN, TITLE_MAX_LEN, TITLE_MIN_LEN};

/// Mount point name; routes live under `/api/books`.
pub const MODULE_NAME: &str = "books";

/// Book catalog module: list, get, create, update, and delete over an in-memory store
pub struct BooksModule {
    catalog: BookCatalog,
}

impl BooksModule {
    pub fn new(catalog: BookCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &BookCatalog {
        &self.catalog
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        MODULE_NAME
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        let books = self.catalog.len().await;
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.catalog.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let book_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Book" }
                    }
                }
            })
        };
        let id_parameter = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        });
        let draft_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookDraft" }
                }
            }
        });
        let query_parameter = |name: &str, description: &str, format: Option<&str>| {
            let mut schema = json!({ "type": "string" });
            if let Some(format) = format {
                schema["format"] = json!(format);
            }
            json!({
                "name": name,
                "in": "query",
                "required": false,
                "description": description,
                "schema": schema
            })
        };

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "parameters": [
                            query_parameter("searchQuery", "Case-insensitive match on title, author, or ISBN", None),
                            query_parameter("yearFilter", "all, before2000, 2000-2010, or after2010", None),
                            query_parameter("sortBy", "title, author, or date", None),
                            query_parameter("sortOrder", "asc or desc", None),
                            query_parameter("minDate", "Earliest publication date (inclusive)", Some("date")),
                            query_parameter("maxDate", "Latest publication date (inclusive)", Some("date"))
                        ],
                        "responses": {
                            "200": {
                                "description": "Filtered and sorted books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "400": error_response("Malformed date parameter")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": draft_body.clone(),
                        "responses": {
                            "201": book_response("Created book"),
                            "400": error_response("Validation error")
                        }
                    }
                },
                "/health": {
                    "get": {
                        "summary": "Books health check",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "OK",
                                "content": {
                                    "text/plain": { "schema": { "type": "string" } }
                                }
                            }
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [id_parameter.clone()],
                        "responses": {
                            "200": book_response("The book"),
                            "404": error_response("Book not found")
                        }
                    },
                    "put": {
                        "summary": "Replace a book",
                        "tags": ["Books"],
                        "parameters": [id_parameter.clone()],
                        "requestBody": draft_body,
                        "responses": {
                            "200": book_response("Updated book"),
                            "400": error_response("Validation error"),
                            "404": error_response("Book not found")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [id_parameter],
                        "responses": {
                            "204": { "description": "Deleted" },
                            "404": error_response("Book not found")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "isbn": { "type": "string" },
                            "publicationDate": { "type": "string", "format": "date-time" },
                            "imageUrl": { "type": ["string", "null"] }
                        },
                        "required": ["id", "title", "author", "isbn", "publicationDate"]
                    },
                    "BookDraft": {
                        "type": "object",
                        "properties": {
                            "title": {
                                "type": "string",
                                "minLength": TITLE_MIN_LEN,
                                "maxLength": TITLE_MAX_LEN
                            },
                            "author": {
                                "type": "string",
                                "minLength": AUTHOR_MIN_LEN,
                                "maxLength": AUTHOR_MAX_LEN
                            },
                            "isbn": {
                                "type": "string",
                                "description": "10 or 13 digits, hyphens allowed, unique"
                            },
                            "publicationDate": {
                                "type": "string",
                                "description": "YYYY-MM-DD or ISO 8601 date-time, not in the future, not before 1450"
                            },
                            "imageUrl": { "type": ["string", "null"] }
                        },
                        "required": ["title", "author", "isbn", "publicationDate"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module
pub fn create_module(settings: &CatalogSettings) -> std::sync::Arc<dyn Module> {
    let store = if settings.seed_sample_data {
        MemoryBookStore::seeded()
    } else {
        MemoryBookStore::new()
    };
    std::sync::Arc::new(BooksModule::new(BookCatalog::new(store, SystemClock)))
}
