use log::{info, trace};
use serde::Deserialize;

use crate::{Error, ErrorKind};

use super::Client;

const VOLUMES_URL: &str = "https://www.googleapis.com/books/v1/volumes?q=";

pub(crate) fn get_volumes_by_keyword<C: Client>(term: &str) -> Result<Vec<Volume>, Error> {
    info!("Searching volumes matching '{term}' using the Google Books API");
    search::<C>(&volumes_url("", term)?)
}

pub(crate) fn get_volumes_by_title<C: Client>(title: &str) -> Result<Vec<Volume>, Error> {
    info!("Searching volumes with a title of '{title}' using the Google Books API");
    search::<C>(&volumes_url("intitle:", title)?)
}

pub(crate) fn get_volumes_by_author<C: Client>(author: &str) -> Result<Vec<Volume>, Error> {
    info!("Searching volumes with an author of '{author}' using the Google Books API");
    search::<C>(&volumes_url("inauthor:", author)?)
}

pub(crate) fn get_volume_by_isbn<C: Client>(isbn: &str) -> Result<Volume, Error> {
    // remove hyphens from ISBN-13 (if applicable)
    let isbn = isbn.replace('-', "");
    info!("Searching for ISBN '{isbn}' using the Google Books API");

    let mut volumes = search::<C>(&volumes_url("isbn:", &isbn)?)?;
    Ok(volumes.remove(0))
}

fn volumes_url(qualifier: &str, term: &str) -> Result<String, Error> {
    if term.trim().is_empty() {
        return Err(Error::new(
            ErrorKind::InvalidInput,
            "Search term must not be empty",
        ));
    }

    let mut url = VOLUMES_URL.to_owned();
    url.push_str(qualifier);
    url.push_str(term);
    Ok(url)
}

fn search<C: Client>(url: &str) -> Result<Vec<Volume>, Error> {
    let client = C::default();
    let VolumesModel { mut items } = client.get_json(url)?;

    trace!("Request was successful");

    if items.is_empty() {
        return Err(Error::new(ErrorKind::NoValue, "No books found!"));
    }

    Ok(items.drain(..).map(Item::into_volume).collect())
}

/// A search result reduced to its display fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    /// Title of the volume.
    pub title: String,
    /// Authors of the volume, empty when the API does not report any.
    pub authors: Vec<String>,
}

impl std::fmt::Display for Volume {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)?;
        if !self.authors.is_empty() {
            write!(f, " by {}", self.authors.join(", "))?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct VolumesModel {
    // the API omits the key entirely when nothing matches
    #[serde(default)]
    items: Vec<Item>,
}

#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct Item {
    #[serde(rename = "volumeInfo")]
    volume_info: VolumeInfo,
}

/// Volume information from the Google Books API.
#[derive(Deserialize)]
#[cfg_attr(test, derive(Debug))]
struct VolumeInfo {
    title: String,
    #[serde(default)]
    authors: Vec<String>,
}

impl Item {
    fn into_volume(self) -> Volume {
        let VolumeInfo { title, mut authors } = self.volume_info;

        authors.retain(|author| !author.is_empty());

        Volume { title, authors }
    }
}

#[cfg(test)]
mod tests {
    use super::{Volume, VolumesModel};
    use crate::{
        api::{assert_url, impl_text_producer, MockClient, NetworkErrorProducer},
        ErrorKind,
    };

    const VOLUMES_JSON: &str = include_str!("../../tests/data/google_books_volumes.json");

    impl_text_producer! {
        ValidJsonProducer => Ok(VOLUMES_JSON.to_owned()),
        EmptyItemsProducer => Ok(
            r#"{
                "items": []
            }"#.to_owned()
        ),
        NoItemsKeyProducer => Ok(
            r#"{
                "kind": "books#volumes",
                "totalItems": 0
            }"#.to_owned()
        ),
    }

    #[test]
    fn keyword_url_format_is_correct() {
        let res = super::get_volumes_by_keyword::<MockClient<ValidJsonProducer>>("harry potter");

        assert!(res.is_ok());
        // Not expecting percent encoding here, the str to URL conversion will do this.
        assert_url!("https://www.googleapis.com/books/v1/volumes?q=harry potter");
    }

    #[test]
    fn title_url_format_is_correct() {
        let res = super::get_volumes_by_title::<MockClient<ValidJsonProducer>>("Goblet of Fire");

        assert!(res.is_ok());
        assert_url!("https://www.googleapis.com/books/v1/volumes?q=intitle:Goblet of Fire");
    }

    #[test]
    fn author_url_format_is_correct() {
        let res = super::get_volumes_by_author::<MockClient<ValidJsonProducer>>("J.K. Rowling");

        assert!(res.is_ok());
        assert_url!("https://www.googleapis.com/books/v1/volumes?q=inauthor:J.K. Rowling");
    }

    #[test]
    fn isbn_10_url_format_is_correct() {
        assert!(super::get_volume_by_isbn::<MockClient<ValidJsonProducer>>("0140328721").is_ok());
        assert_url!("https://www.googleapis.com/books/v1/volumes?q=isbn:0140328721");
    }

    #[test]
    fn isbn_13_hyphens_are_stripped() {
        assert!(
            super::get_volume_by_isbn::<MockClient<ValidJsonProducer>>("978-0140328721").is_ok()
        );
        // should strip the hyphen in a ISBN-13 string
        assert_url!("https://www.googleapis.com/books/v1/volumes?q=isbn:9780140328721");
    }

    #[test]
    fn empty_term_is_rejected_before_any_request() {
        let err = super::get_volumes_by_keyword::<MockClient<ValidJsonProducer>>("  ")
            .expect_err("A blank search term should never reach the client");

        assert_eq!(ErrorKind::InvalidInput, err.kind());
    }

    #[test]
    fn empty_items_returns_no_value_error() {
        let err = super::get_volumes_by_keyword::<MockClient<EmptyItemsProducer>>("nothing")
            .expect_err("An empty items array means no results");

        assert_eq!(ErrorKind::NoValue, err.kind());
    }

    #[test]
    fn missing_items_key_returns_no_value_error() {
        // the live API drops the items key when there are zero hits
        let err = super::get_volumes_by_keyword::<MockClient<NoItemsKeyProducer>>("nothing")
            .expect_err("A missing items key means no results");

        assert_eq!(ErrorKind::NoValue, err.kind());
    }

    #[test]
    fn network_error_is_io_kind() {
        let err = super::get_volumes_by_keyword::<MockClient<NetworkErrorProducer>>("anything")
            .expect_err("NetworkErrorProducer should always cause an error");

        assert_eq!(ErrorKind::IO, err.kind());
    }

    #[test]
    fn valid_json_produces_volumes_in_order() {
        let volumes = super::get_volumes_by_keyword::<MockClient<ValidJsonProducer>>("dahl")
            .expect("ValidJsonProducer always produces a valid json String to be deserialized");

        let titles = volumes.iter().map(|v| v.title.as_str()).collect::<Vec<_>>();
        assert_eq!(
            vec![
                "Fantastic Mr Fox",
                "Danny, the Champion of the World",
                "The Complete Adventures of Charlie and Mr Willy Wonka",
            ],
            titles
        );
    }

    #[test]
    fn isbn_search_returns_first_volume() {
        let volume = super::get_volume_by_isbn::<MockClient<ValidJsonProducer>>("0140328721")
            .expect("ValidJsonProducer always produces a valid json String to be deserialized");

        assert_eq!("Fantastic Mr Fox", volume.title);
        assert_eq!(vec!["Roald Dahl".to_owned()], volume.authors);
    }

    #[test]
    fn missing_authors_deserialize_to_empty_vec() {
        let model: VolumesModel = serde_json::from_str(VOLUMES_JSON).unwrap();

        let last = model.items.last().unwrap();
        assert!(last.volume_info.authors.is_empty());
    }

    #[test]
    fn display_includes_authors_when_present() {
        let volume = Volume {
            title: "Fantastic Mr Fox".to_owned(),
            authors: vec!["Roald Dahl".to_owned()],
        };

        assert_eq!("Fantastic Mr Fox by Roald Dahl", volume.to_string());

        let bare = Volume {
            title: "Fantastic Mr Fox".to_owned(),
            authors: vec![],
        };

        assert_eq!("Fantastic Mr Fox", bare.to_string());
    }
}
