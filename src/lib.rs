pub mod configuration;
pub mod controller;
pub mod debouncer;
pub mod images;
pub mod marvel_client;
pub mod models;
pub mod run;
pub mod terminal_view;
pub mod url_builder;

pub use configuration::Settings;
pub use controller::{ListController, ListView, UserEvent};
pub use models::Cli;
pub use run::run;
