//! The in-memory user and review registry.
//!
//! A [`Store`] is an owned value with no global state, the caller decides
//! where it lives and for how long. Registered users and their reviews only
//! exist for the lifetime of the value.
//!
//! Expected misses (unknown user, no review for an ISBN) are ordinary outcome
//! variants rather than errors, an `Err` is only returned when the password
//! hashing algorithm itself fails.

use std::collections::HashMap;

use log::{info, trace};
use serde::{Deserialize, Serialize};

use crate::{Error, ErrorKind};

/// A registered account. Only the bcrypt hash of the password is retained.
#[derive(Debug, Clone)]
struct User {
    username: String,
    password_hash: String,
}

/// A single review of a book, attributed to the user that wrote it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// The user that wrote the review.
    pub username: String,
    /// The review text.
    pub text: String,
}

/// Result of [`Store::register`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The user was added to the store.
    Registered,
    /// Another user already holds this username, nothing was changed.
    UsernameTaken,
}

/// Result of [`Store::login`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The password matched the stored hash.
    Success,
    /// The password did not match the stored hash.
    BadPassword,
    /// No user is registered under this username.
    UnknownUser,
}

/// Result of [`Store::upsert_review`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new review was appended for this user.
    Added,
    /// The user's existing review text was replaced in place.
    Updated,
    /// The username is not registered, nothing was changed.
    NotRegistered,
}

/// Result of [`Store::delete_review`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The user's review was removed.
    Deleted,
    /// The ISBN has no reviews at all.
    NoReviews,
    /// The ISBN has reviews but none from this user.
    NotFound,
    /// The username is not registered, nothing was changed.
    NotRegistered,
}

/// The in-memory user and review registry.
///
/// Reviews are grouped by ISBN and kept in insertion order, which is also
/// their display order. The store maintains the invariant that each user has
/// at most one review per ISBN, see [`Store::upsert_review`].
pub struct Store {
    users: HashMap<String, User>,
    reviews: HashMap<String, Vec<Review>>,
    hash_cost: u32,
}

impl Store {
    /// Creates an empty store hashing passwords with [`bcrypt::DEFAULT_COST`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_hash_cost(bcrypt::DEFAULT_COST)
    }

    /// Creates an empty store with an explicit bcrypt cost factor.
    #[must_use]
    pub fn with_hash_cost(hash_cost: u32) -> Self {
        Self {
            users: HashMap::new(),
            reviews: HashMap::new(),
            hash_cost,
        }
    }

    /// Registers a new user under a unique username.
    ///
    /// Usernames are unique: registering a taken name is a polite
    /// [`RegisterOutcome::UsernameTaken`] and leaves the store untouched.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when hashing the password fails, in which case no
    /// user is added.
    pub fn register(&mut self, username: &str, password: &str) -> Result<RegisterOutcome, Error> {
        if self.users.contains_key(username) {
            trace!("Username '{username}' is already registered");
            return Ok(RegisterOutcome::UsernameTaken);
        }

        let password_hash =
            bcrypt::hash(password, self.hash_cost).map_err(|e| Error::wrap(ErrorKind::Hash, e))?;

        self.users.insert(
            username.to_owned(),
            User {
                username: username.to_owned(),
                password_hash,
            },
        );

        info!("Registered user '{username}'");
        Ok(RegisterOutcome::Registered)
    }

    /// Verifies a password against the stored hash for this username.
    ///
    /// This is a stateless check, no session or token is issued.
    ///
    /// # Errors
    ///
    /// An `Err` is returned when the stored hash cannot be verified, for
    /// example because it is malformed.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, Error> {
        match self.users.get(username) {
            None => Ok(LoginOutcome::UnknownUser),
            Some(user) => {
                let valid = bcrypt::verify(password, &user.password_hash)
                    .map_err(|e| Error::wrap(ErrorKind::Hash, e))?;

                if valid {
                    trace!("Verified the password for '{}'", user.username);
                    Ok(LoginOutcome::Success)
                } else {
                    Ok(LoginOutcome::BadPassword)
                }
            }
        }
    }

    /// Returns the reviews for an ISBN in insertion order.
    #[must_use]
    pub fn reviews_for(&self, isbn: &str) -> Option<&[Review]> {
        self.reviews.get(isbn).map(Vec::as_slice)
    }

    /// Adds a review, or replaces the text of the user's existing review for
    /// this ISBN.
    ///
    /// An update keeps the review at its original position so the display
    /// order is stable. Only registered users may write reviews, an unknown
    /// username aborts before any write.
    pub fn upsert_review(&mut self, username: &str, isbn: &str, text: &str) -> UpsertOutcome {
        if !self.users.contains_key(username) {
            return UpsertOutcome::NotRegistered;
        }

        let entries = self.reviews.entry(isbn.to_owned()).or_default();

        match entries.iter_mut().find(|r| r.username == username) {
            Some(existing) => {
                existing.text = text.to_owned();
                info!("Updated the review of '{username}' for ISBN '{isbn}'");
                UpsertOutcome::Updated
            }
            None => {
                entries.push(Review {
                    username: username.to_owned(),
                    text: text.to_owned(),
                });
                info!("Added a review by '{username}' for ISBN '{isbn}'");
                UpsertOutcome::Added
            }
        }
    }

    /// Removes the user's review for this ISBN.
    ///
    /// Remaining reviews shift down and keep their relative order. Only
    /// registered users may delete reviews, an unknown username aborts before
    /// any write.
    pub fn delete_review(&mut self, username: &str, isbn: &str) -> DeleteOutcome {
        if !self.users.contains_key(username) {
            return DeleteOutcome::NotRegistered;
        }

        match self.reviews.get_mut(isbn) {
            None => DeleteOutcome::NoReviews,
            Some(entries) => match entries.iter().position(|r| r.username == username) {
                Some(index) => {
                    entries.remove(index);
                    info!("Deleted the review of '{username}' for ISBN '{isbn}'");
                    DeleteOutcome::Deleted
                }
                None => DeleteOutcome::NotFound,
            },
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
