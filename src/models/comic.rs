use serde::Deserialize;

/// One series row as returned by the listing endpoint.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Comic {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<Thumbnail>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Thumbnail {
    pub path: String,
    pub extension: String,
}

/// Listing bodies come either bare or wrapped in the Marvel response envelope.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub enum ListingPayload {
    Bare(Vec<Comic>),
    Wrapped { data: ListingData },
}

#[derive(Deserialize, Debug)]
pub struct ListingData {
    pub results: Vec<Comic>,
}

impl ListingPayload {
    pub fn into_comics(self) -> Vec<Comic> {
        match self {
            ListingPayload::Bare(comics) => comics,
            ListingPayload::Wrapped { data } => data.results,
        }
    }
}
