use super::domain::RawListing;
use serde_json::Value;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("listing feed not found at {}", .path.display())]
    MissingInput { path: PathBuf },
    #[error("failed to read listing feed {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// Listings read from a feed. A feed that could not be parsed still loads,
/// with no listings and the parse error kept for reporting.
#[derive(Debug, Default)]
pub struct LoadedListings {
    pub listings: Vec<RawListing>,
    pub parse_error: Option<serde_json::Error>,
}

pub struct ListingLoader;

impl ListingLoader {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<LoadedListings, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::MissingInput {
                path: path.to_path_buf(),
            },
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        Self::from_reader(file).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_reader<R: Read>(mut reader: R) -> io::Result<LoadedListings> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        Ok(Self::from_content(&content))
    }

    pub fn from_content(content: &str) -> LoadedListings {
        match parse_payload(content) {
            Ok(listings) => {
                info!(count = listings.len(), "loaded listing feed");
                LoadedListings {
                    listings,
                    parse_error: None,
                }
            }
            Err(err) => {
                warn!(error = %err, "listing feed could not be parsed; continuing with no listings");
                LoadedListings {
                    listings: Vec::new(),
                    parse_error: Some(err),
                }
            }
        }
    }
}

/// Parses a feed holding one document, several comma separated documents,
/// or several whitespace separated documents. Each document contributes its
/// `listings` array. When every strategy fails the comma separated attempt's
/// error is returned.
pub fn parse_payload(content: &str) -> Result<Vec<RawListing>, serde_json::Error> {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Array(documents)) => return Ok(listings_from_documents(documents)),
        Ok(document) => return Ok(listings_from_documents([document])),
        Err(err) => debug!(error = %err, "feed is not a single document"),
    }

    let wrapped = format!("[{content}]");
    let wrapped_error = match serde_json::from_str::<Vec<Value>>(&wrapped) {
        Ok(documents) => return Ok(listings_from_documents(documents)),
        Err(err) => err,
    };

    serde_json::Deserializer::from_str(content)
        .into_iter::<Value>()
        .collect::<Result<Vec<_>, _>>()
        .map(listings_from_documents)
        .map_err(|_| wrapped_error)
}

fn listings_from_documents<I>(documents: I) -> Vec<RawListing>
where
    I: IntoIterator<Item = Value>,
{
    let mut listings = Vec::new();

    for (index, document) in documents.into_iter().enumerate() {
        let Value::Object(mut fields) = document else {
            warn!(document = index, "skipping feed document that is not an object");
            continue;
        };

        match fields.remove("listings") {
            Some(Value::Array(entries)) => {
                listings.extend(entries.into_iter().filter_map(decode_listing))
            }
            Some(_) => warn!(document = index, "feed document `listings` is not an array"),
            None => debug!(document = index, "feed document has no listings"),
        }
    }

    listings
}

fn decode_listing(entry: Value) -> Option<RawListing> {
    if !entry.is_object() {
        warn!("skipping listing entry that is not an object");
        return None;
    }

    match serde_json::from_value::<RawListing>(entry) {
        Ok(listing) => Some(listing),
        Err(err) => {
            warn!(error = %err, "skipping malformed listing entry");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn vins(listings: &[RawListing]) -> Vec<&str> {
        listings
            .iter()
            .map(|listing| listing.vin.as_deref().unwrap_or(""))
            .collect()
    }

    #[test]
    fn parses_single_document() {
        let content = r#"{"listings":[{"vin":"A"},{"vin":"B"}],"totalResultCount":2}"#;
        let listings = parse_payload(content).expect("single document parses");
        assert_eq!(vins(&listings), ["A", "B"]);
    }

    #[test]
    fn parses_comma_concatenated_documents() {
        let content = "{\"listings\":[{\"vin\":\"A\"}]},\n{\"listings\":[{\"vin\":\"B\"},{\"vin\":\"C\"}]}";
        let listings = parse_payload(content).expect("concatenated documents parse");
        assert_eq!(vins(&listings), ["A", "B", "C"]);
    }

    #[test]
    fn parses_whitespace_concatenated_documents() {
        let content = "{\"listings\":[{\"vin\":\"A\"}]}\n\n{\"listings\":[{\"vin\":\"B\"}]}\n";
        let listings = parse_payload(content).expect("document stream parses");
        assert_eq!(vins(&listings), ["A", "B"]);
    }

    #[test]
    fn documents_without_listings_contribute_nothing() {
        let content = "{\"listings\":[{\"vin\":\"A\"}]},{\"meta\":{}},{\"listings\":\"oops\"},[1]";
        let listings = parse_payload(content).expect("parses");
        assert_eq!(vins(&listings), ["A"]);
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let content = r#"{"listings":[{"vin":"A"},42,"B",null,{"vin":"C"}]}"#;
        let listings = parse_payload(content).expect("parses");
        assert_eq!(vins(&listings), ["A", "C"]);
    }

    #[test]
    fn wrongly_typed_fields_keep_the_entry() {
        let content = r#"{"listings":[
            {"vin":"A","year":"2019"},
            {"vin":"B","images":{"sources":null}},
            {"vin":"C","specifications":{"mileage":[]}}
        ]}"#;
        let listings = parse_payload(content).expect("parses");
        assert_eq!(vins(&listings), ["A", "B", "C"]);
    }

    #[test]
    fn empty_feed_yields_no_listings() {
        let listings = parse_payload("  \n").expect("blank feed parses");
        assert!(listings.is_empty());
    }

    #[test]
    fn malformed_feed_is_reported_not_fatal() {
        let loaded = ListingLoader::from_content("{\"listings\": [ {\"vin\": ");
        assert!(loaded.listings.is_empty());
        assert!(loaded.parse_error.is_some());
    }

    #[test]
    fn from_reader_loads_listings() {
        let loaded = ListingLoader::from_reader(Cursor::new(r#"{"listings":[{"vin":"A"}]}"#))
            .expect("reader loads");
        assert_eq!(loaded.listings.len(), 1);
        assert!(loaded.parse_error.is_none());
    }

    #[test]
    fn from_path_reports_missing_input() {
        let error = ListingLoader::from_path("./does-not-exist/cardata")
            .expect_err("expected missing input");

        match error {
            LoadError::MissingInput { path } => {
                assert_eq!(path, PathBuf::from("./does-not-exist/cardata"))
            }
            other => panic!("expected missing input, got {other:?}"),
        }
    }
}
