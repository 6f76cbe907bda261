mod catalog_service;
mod errors;

pub use catalog_service::{
    BookAdded, SearchType, add_book_to_catalog, list_catalog, search_books_in_catalog,
};
pub use errors::{CatalogError, Result};
