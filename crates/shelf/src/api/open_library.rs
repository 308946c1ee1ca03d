use log::{info, trace};

use crate::{Error, ErrorKind};

use super::Client;

const VOLUMES_BRIEF_URL: &str = "https://openlibrary.org/api/volumes/brief/json/";

/// Fetches the brief volume record for an ISBN from Open Library.
///
/// The payload is opaque JSON and is returned as text, callers decide how to
/// display it.
pub(crate) fn get_volume_record<C: Client>(isbn: &str) -> Result<String, Error> {
    let isbn = isbn.replace('-', "");
    if isbn.trim().is_empty() {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "ISBN must not be empty",
        ));
    }

    info!("Fetching the volume record for ISBN '{isbn}' from Open Library");

    let mut url = VOLUMES_BRIEF_URL.to_owned();
    url.push_str(&isbn);

    let client = C::default();
    let record = client.get_text(&url)?;

    trace!("Request was successful");

    Ok(record)
}
