#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::module_name_repetitions)]
#![doc = include_str!("../README.md")]

mod api;
mod error;
pub mod store;

pub use api::google_books::Volume;
pub use error::{Error, ErrorKind};
pub use store::{
    DeleteOutcome, LoginOutcome, RegisterOutcome, Review, Store, UpsertOutcome,
};

use log::trace;

type Client = api::HttpClient;

/// Search volumes matching a free-text term using the default API.
///
/// # Errors
///
/// An `Err` is returned when the term is blank.
/// An `Err` is returned when no volume is found for the term.
/// An `Err` is returned when the request fails or the response cannot be
/// parsed.
#[inline]
pub fn volumes_by_keyword(term: &str) -> Result<Vec<Volume>, Error> {
    trace!("Search volumes by keyword of '{term}'");
    api::google_books::get_volumes_by_keyword::<Client>(term)
}

/// Search volumes by `title` using the default API.
///
/// # Errors
///
/// An `Err` is returned when the title is blank.
/// An `Err` is returned when no volume is found for the title.
/// An `Err` is returned when the request fails or the response cannot be
/// parsed.
#[inline]
pub fn volumes_by_title(title: &str) -> Result<Vec<Volume>, Error> {
    trace!("Search volumes by title of '{title}'");
    api::google_books::get_volumes_by_title::<Client>(title)
}

/// Search volumes by `author` using the default API.
///
/// # Errors
///
/// An `Err` is returned when the author is blank.
/// An `Err` is returned when no volume is found for the author.
/// An `Err` is returned when the request fails or the response cannot be
/// parsed.
#[inline]
pub fn volumes_by_author(author: &str) -> Result<Vec<Volume>, Error> {
    trace!("Search volumes by author of '{author}'");
    api::google_books::get_volumes_by_author::<Client>(author)
}

/// Search the volume matching an `isbn` using the default API.
///
/// Searching by `isbn` should only match a single volume so the first result
/// is returned. Hyphens in the ISBN are ignored.
///
/// # Errors
///
/// An `Err` is returned when the ISBN is blank.
/// An `Err` is returned when no volume is found for the ISBN.
/// An `Err` is returned when the request fails or the response cannot be
/// parsed.
#[inline]
pub fn volume_by_isbn(isbn: &str) -> Result<Volume, Error> {
    trace!("Search the volume for ISBN of '{isbn}'");
    api::google_books::get_volume_by_isbn::<Client>(isbn)
}

/// Fetch the raw volume record for an `isbn` from the volume lookup endpoint.
///
/// This is a different external service than the search functions above. The
/// record is returned as opaque JSON text and is not interpreted.
///
/// # Errors
///
/// An `Err` is returned when the ISBN is blank.
/// An `Err` is returned when the record is empty.
/// An `Err` is returned when the request fails.
#[inline]
pub fn volume_record_by_isbn(isbn: &str) -> Result<String, Error> {
    trace!("Fetch the volume record for ISBN of '{isbn}'");
    api::open_library::get_volume_record::<Client>(isbn)
}
