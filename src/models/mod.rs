pub mod cli;
pub mod comic;

pub use cli::Cli;
pub use comic::{Comic, ListingPayload, Thumbnail};
