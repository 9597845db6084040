use clap::Parser;

/// Search Marvel comic series from the terminal.
///
/// Type a title to search, `:cancel` to go back to the full listing,
/// `:open N` to show a series and `:quit` to leave.
#[derive(clap::Parser)]
pub struct Cli {
    #[arg(short, long, default_value = "comics")]
    pub config_file: String,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}
