use crate::configuration::{ApiSettings, Credentials};
use url::Url;

/// Filter field used for search-bar queries.
pub const TITLE_FILTER: &str = "title";

/// Builds listing URLs on top of a fixed base endpoint.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    endpoint: Url,
}

impl UrlBuilder {
    pub fn new(base_url: &str, credentials: Option<&Credentials>) -> Result<Self, url::ParseError> {
        let mut endpoint = Url::parse(base_url)?;
        if let Some(c) = credentials {
            endpoint
                .query_pairs_mut()
                .append_pair("ts", &c.ts)
                .append_pair("apikey", &c.apikey)
                .append_pair("hash", &c.hash);
        }
        Ok(UrlBuilder { endpoint })
    }

    pub fn from_settings(api: &ApiSettings) -> Result<Self, url::ParseError> {
        Self::new(&api.base_url, api.credentials.as_ref())
    }

    /// Returns the base endpoint, filtered by `name=value` only when both are given.
    pub fn build_url(&self, filter_name: Option<&str>, filter_value: Option<&str>) -> String {
        match (filter_name, filter_value) {
            (Some(name), Some(value)) => {
                let mut url = self.endpoint.clone();
                url.query_pairs_mut().append_pair(name, value);
                url.to_string()
            }
            _ => self.endpoint.to_string(),
        }
    }
}
