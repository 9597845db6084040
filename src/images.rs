use crate::marvel_client::ComicApi;
use crate::models::Thumbnail;
use log::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSize {
    /// List rows.
    Small,
    /// Detail view.
    Portrait,
}

impl ImageSize {
    fn variant(self) -> &'static str {
        match self {
            ImageSize::Small => "portrait_small",
            ImageSize::Portrait => "portrait_uncanny",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    Remote { url: String, bytes: Vec<u8> },
    Placeholder,
}

/// `<https path>/<variant>.<extension>`
pub fn image_url(thumbnail: &Thumbnail, size: ImageSize) -> String {
    let path = thumbnail.path.trim_end_matches('/');
    let path = if let Some(rest) = path.strip_prefix("http://") {
        format!("https://{rest}")
    } else if path.starts_with("https://") {
        path.to_string()
    } else {
        format!("https://{path}")
    };
    format!("{}/{}.{}", path, size.variant(), thumbnail.extension)
}

/// Fetches a thumbnail, falling back to the placeholder on any failure.
pub async fn load_image<A: ComicApi>(
    api: &A,
    thumbnail: Option<&Thumbnail>,
    size: ImageSize,
) -> Image {
    let Some(thumbnail) = thumbnail else {
        return Image::Placeholder;
    };
    let url = image_url(thumbnail, size);
    match api.fetch_image(&url).await {
        Ok(bytes) if !bytes.is_empty() => Image::Remote { url, bytes },
        Ok(_) => {
            debug!("Image {} was empty, using placeholder", url);
            Image::Placeholder
        }
        Err(e) => {
            warn!("Image {} unavailable: {}, using placeholder", url, e);
            Image::Placeholder
        }
    }
}
