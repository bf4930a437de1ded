//! Open Library source plugin
//!
//! API docs: https://openlibrary.org/dev/docs/api/search
//! Unauthenticated; identify the client through the User-Agent header.

use async_trait::async_trait;
use serde::Deserialize;

use super::SearchClient;
use crate::domain::BookSearchResult;
use crate::error::LookupError;
use crate::http::HttpClient;

const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

/// Open Library search response wrapper
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "numFound")]
    #[allow(dead_code)]
    num_found: Option<u32>,
    docs: Vec<SearchDoc>,
}

/// Single document from Open Library search results
#[derive(Debug, Deserialize)]
struct SearchDoc {
    key: String,
    title: String,
    #[serde(rename = "author_name", default)]
    author_name: Vec<String>,
    #[serde(default)]
    language: Vec<String>,
    #[serde(default)]
    publisher: Vec<String>,
    #[serde(default)]
    isbn: Vec<String>,
    #[serde(rename = "publish_year", default)]
    publish_year: Vec<i32>,
    #[serde(default)]
    subject: Vec<String>,
    #[serde(rename = "ddc_sort", default)]
    ddc_sort: String,
}

pub struct OpenLibrarySource {
    client: HttpClient,
    base_url: String,
}

impl OpenLibrarySource {
    pub fn new() -> Self {
        Self {
            client: HttpClient::new("shelfscan/0.1 (book cataloging)"),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the source at a different endpoint, e.g. a local stub server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: HttpClient::default(),
            base_url: base_url.into(),
        }
    }

    /// Parse an Open Library search response to the first matching record.
    pub fn parse_search_response(json: &str) -> Result<BookSearchResult, LookupError> {
        let response: SearchResponse = serde_json::from_str(json)
            .map_err(|e| LookupError::Malformed(format!("invalid Open Library JSON: {e}")))?;

        response
            .docs
            .into_iter()
            .next()
            .map(Self::map_document)
            .ok_or(LookupError::NotFound)
    }

    fn map_document(doc: SearchDoc) -> BookSearchResult {
        BookSearchResult {
            title: doc.title,
            authors: doc.author_name,
            languages: doc.language,
            publishers: doc.publisher,
            isbns: doc.isbn,
            subjects: doc.subject,
            published_years: doc.publish_year,
            source_key: doc.key,
            sort_key: doc.ddc_sort,
        }
    }
}

impl Default for OpenLibrarySource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SearchClient for OpenLibrarySource {
    async fn search_by_isbn(&self, isbn: &str) -> Result<BookSearchResult, LookupError> {
        let url = format!("{}/search.json", self.base_url);
        let body = self.client.get_with_params(&url, &[("isbn", isbn)]).await?;
        Self::parse_search_response(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "numFound": 1,
        "docs": [{
            "key": "/works/OL27482W",
            "title": "Neuromancer",
            "author_name": ["William Gibson"],
            "language": ["eng", "fre"],
            "publisher": ["Ace Books", "Gollancz"],
            "isbn": ["9780441569595", "0441569595"],
            "publish_year": [1984, 1986],
            "subject": ["Science fiction", "Cyberpunk"],
            "ddc_sort": "813.54"
        }]
    }"#;

    #[test]
    fn parse_search_response_maps_fields() {
        let result = OpenLibrarySource::parse_search_response(SAMPLE_RESPONSE).unwrap();
        assert_eq!(result.title, "Neuromancer");
        assert_eq!(result.authors, vec!["William Gibson"]);
        assert_eq!(result.languages, vec!["eng", "fre"]);
        assert_eq!(result.publishers.len(), 2);
        assert_eq!(result.published_years, vec![1984, 1986]);
        assert_eq!(result.source_key, "/works/OL27482W");
        assert_eq!(result.sort_key, "813.54");
    }

    #[test]
    fn parse_search_response_defaults_optional_fields() {
        let json = r#"{
            "numFound": 1,
            "docs": [{
                "key": "/works/OL1W",
                "title": "Sparse Record",
                "author_name": ["Somebody"],
                "language": ["eng"],
                "publisher": ["Somewhere Press"],
                "isbn": ["9780321125217"],
                "publish_year": [2003]
            }]
        }"#;

        let result = OpenLibrarySource::parse_search_response(json).unwrap();
        assert!(result.subjects.is_empty());
        assert_eq!(result.sort_key, "");
    }

    #[test]
    fn empty_result_set_is_not_found() {
        let json = r#"{"numFound": 0, "docs": []}"#;
        assert_eq!(
            OpenLibrarySource::parse_search_response(json),
            Err(LookupError::NotFound)
        );
    }

    #[test]
    fn invalid_json_is_malformed() {
        let err = OpenLibrarySource::parse_search_response("not json").unwrap_err();
        assert!(matches!(err, LookupError::Malformed(_)));
    }
}
