use eyre::Result;
use log::{error, trace};
use shelf::{DeleteOutcome, LoginOutcome, RegisterOutcome, Store, UpsertOutcome};

use crate::commands::search::SearchCommands;
use crate::commands::Commands;
use crate::interact::{user_input, user_password, user_select};

const ACTIONS: &[&str] = &[
    "Search by keyword",
    "Search by title",
    "Search by author",
    "Search by ISBN",
    "Fetch a volume record",
    "Register",
    "Log in",
    "Add or update a review",
    "Delete a review",
    "List reviews",
    "Quit",
];

/// Runs the interactive session.
///
/// The session owns the review shelf: users and reviews registered here are
/// gone when the session ends. A failed action is reported and ends that
/// action only, the session continues.
pub fn run_shell() -> Result<String> {
    let mut store = Store::new();

    trace!("Starting an interactive session with an empty shelf");

    loop {
        let action = user_select("What would you like to do?", ACTIONS)?;

        let outcome = match action {
            0 => search_keyword(),
            1 => search_title(),
            2 => search_author(),
            3 => search_isbn(),
            4 => fetch_volume_record(),
            5 => register(&mut store),
            6 => login(&store),
            7 => upsert_review(&mut store),
            8 => delete_review(&mut store),
            9 => list_reviews(&store),
            _ => return Ok("Until next time!".to_owned()),
        };

        match outcome {
            Ok(message) => println!("{message}"),
            Err(err) => error!("{err}"),
        }
    }
}

fn search_keyword() -> Result<String> {
    let term = user_input("Search term".to_owned())?;
    SearchCommands::Keyword { term }.execute()
}

fn search_title() -> Result<String> {
    let title = user_input("Title".to_owned())?;
    SearchCommands::Title { title }.execute()
}

fn search_author() -> Result<String> {
    let author = user_input("Author".to_owned())?;
    SearchCommands::Author { author }.execute()
}

fn search_isbn() -> Result<String> {
    let isbn = user_input("ISBN".to_owned())?;
    SearchCommands::Isbn { isbn }.execute()
}

fn fetch_volume_record() -> Result<String> {
    let isbn = user_input("ISBN".to_owned())?;
    Commands::Volume { isbn }.execute()
}

fn register(store: &mut Store) -> Result<String> {
    let username = user_input("Username".to_owned())?;
    let password = user_password("Password")?;

    let message = match store.register(&username, &password)? {
        RegisterOutcome::Registered => format!("User registered successfully: {username}"),
        RegisterOutcome::UsernameTaken => format!("Username '{username}' is already taken."),
    };
    Ok(message)
}

fn login(store: &Store) -> Result<String> {
    let username = user_input("Username".to_owned())?;
    let password = user_password("Password")?;

    let message = match store.login(&username, &password)? {
        LoginOutcome::Success => "Login successful!".to_owned(),
        LoginOutcome::BadPassword => "Invalid password!".to_owned(),
        LoginOutcome::UnknownUser => "User not found!".to_owned(),
    };
    Ok(message)
}

fn upsert_review(store: &mut Store) -> Result<String> {
    let username = user_input("Username".to_owned())?;
    let isbn = user_input("ISBN".to_owned())?;
    let text = user_input("Review".to_owned())?;

    let message = match store.upsert_review(&username, &isbn, &text) {
        UpsertOutcome::Added => format!("Review added for {username}: {text}"),
        UpsertOutcome::Updated => format!("Review updated for {username}: {text}"),
        UpsertOutcome::NotRegistered => "User not found. Please register first.".to_owned(),
    };
    Ok(message)
}

fn delete_review(store: &mut Store) -> Result<String> {
    let username = user_input("Username".to_owned())?;
    let isbn = user_input("ISBN".to_owned())?;

    let message = match store.delete_review(&username, &isbn) {
        DeleteOutcome::Deleted => format!("Review deleted for {username}."),
        DeleteOutcome::NoReviews => "No reviews found for the given ISBN.".to_owned(),
        DeleteOutcome::NotFound => "Review not found for this user.".to_owned(),
        DeleteOutcome::NotRegistered => "User not found. Please register first.".to_owned(),
    };
    Ok(message)
}

fn list_reviews(store: &Store) -> Result<String> {
    let isbn = user_input("ISBN".to_owned())?;

    let message = match store.reviews_for(&isbn) {
        Some(reviews) if !reviews.is_empty() => {
            let mut lines = vec![format!("Reviews for ISBN {isbn}:")];
            lines.extend(reviews.iter().enumerate().map(|(index, review)| {
                format!(
                    "Review {}: {} (by {})",
                    index + 1,
                    review.text,
                    review.username
                )
            }));
            lines.join("\n")
        }
        _ => format!("No reviews found for ISBN {isbn}."),
    };
    Ok(message)
}
