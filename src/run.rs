use crate::configuration::Settings;
use crate::controller::{ListController, UserEvent};
use crate::marvel_client::MarvelClient;
use crate::terminal_view::TerminalView;
use crate::url_builder::UrlBuilder;
use anyhow::Context;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Event(UserEvent),
    Quit,
}

/// Maps one line of terminal input to a command.
///
/// `:cancel`, `:open N` (1-based) and `:quit` are commands; anything else is
/// the new search text. Returns `None` for commands that can't be used.
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim_end_matches(['\r', '\n']);
    match line.trim() {
        ":quit" | ":q" => return Some(Command::Quit),
        ":cancel" => return Some(Command::Event(UserEvent::CancelPressed)),
        _ => {}
    }
    if let Some(row) = line.trim().strip_prefix(":open") {
        return match row.trim().parse::<usize>() {
            Ok(n) if n > 0 => Some(Command::Event(UserEvent::Selected(n - 1))),
            _ => None,
        };
    }
    Some(Command::Event(UserEvent::TextChanged(line.to_string())))
}

pub async fn run(settings: Settings) -> anyhow::Result<()> {
    info!("Listing endpoint: {}", settings.api.base_url);
    let urls = UrlBuilder::from_settings(&settings.api)
        .with_context(|| format!("invalid base_url {:?}", settings.api.base_url))?;

    let client = Arc::new(MarvelClient::new());
    let view = TerminalView::new(std::io::stdout());
    let mut controller = ListController::new(client, urls, view, settings.quiet_period())
        .discard_stale_responses(settings.discard_stale_responses);

    let (tx, rx) = mpsc::channel(32);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    warn!("Unable to read input: {}", e);
                    break;
                }
            };
            match parse_command(&line) {
                Some(Command::Event(event)) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                Some(Command::Quit) => break,
                None => warn!("Unrecognised command {:?}", line),
            }
        }
        debug!("Input closed");
    });

    controller.run(rx).await;

    info!("Finished!");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_a_search() {
        assert_eq!(
            Some(Command::Event(UserEvent::TextChanged("spider man".into()))),
            parse_command("spider man\n")
        );
        assert_eq!(
            Some(Command::Event(UserEvent::TextChanged(String::new()))),
            parse_command("")
        );
    }

    #[test]
    fn commands() {
        assert_eq!(Some(Command::Quit), parse_command(":quit"));
        assert_eq!(
            Some(Command::Event(UserEvent::CancelPressed)),
            parse_command(":cancel")
        );
        assert_eq!(
            Some(Command::Event(UserEvent::Selected(2))),
            parse_command(":open 3")
        );
    }

    #[test]
    fn bad_open_rows() {
        assert_eq!(None, parse_command(":open 0"));
        assert_eq!(None, parse_command(":open"));
        assert_eq!(None, parse_command(":open hulk"));
    }

    #[tokio::test]
    async fn bad_base_url_fails() {
        let settings = Settings {
            api: crate::configuration::ApiSettings {
                base_url: "not a url".into(),
                credentials: None,
            },
            quiet_period_ms: 800,
            discard_stale_responses: false,
        };
        assert!(run(settings).await.is_err());
    }
}
