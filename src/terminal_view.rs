use crate::controller::ListView;
use crate::images::{image_url, Image, ImageSize};
use crate::models::Comic;
use log::warn;
use std::io::Write;

/// Line-oriented rendering of the list screen.
pub struct TerminalView<W: Write> {
    out: W,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        TerminalView { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("Unable to write to terminal: {}", e);
        }
    }

    fn alert(&mut self, title: &str, message: &str) {
        self.emit(&format!("[{title}] {message}\n"));
    }
}

impl<W: Write> ListView for TerminalView<W> {
    fn list_changed(&mut self, comics: &[Comic]) {
        let mut text = String::new();
        for (row, comic) in comics.iter().enumerate() {
            let thumb = match &comic.thumbnail {
                Some(t) => image_url(t, ImageSize::Small),
                None => "(no image)".into(),
            };
            text.push_str(&format!("{:>3}. {}  {}\n", row + 1, comic.title, thumb));
        }
        text.push_str(&format!("-- {} series --\n", comics.len()));
        self.emit(&text);
    }

    fn fetch_error(&mut self, message: &str) {
        self.alert("Request error", message);
    }

    fn no_results(&mut self, query: &str) {
        self.alert("Title error", &format!("Nothing found for \"{query}\""));
    }

    fn show_detail(&mut self, comic: &Comic, image: &Image) {
        let mut text = format!("== {} (#{}) ==\n", comic.title, comic.id);
        if let Some(description) = comic.description.as_deref().filter(|d| !d.is_empty()) {
            text.push_str(description);
            text.push('\n');
        }
        match image {
            Image::Remote { url, bytes } => {
                text.push_str(&format!("image: {} ({} bytes)\n", url, bytes.len()))
            }
            Image::Placeholder => text.push_str("image: placeholder\n"),
        }
        self.emit(&text);
    }
}
