use crate::debouncer::{SearchDebouncer, SearchEvent};
use crate::images::{load_image, Image, ImageSize};
use crate::marvel_client::{ComicApi, FetchError};
use crate::models::Comic;
use crate::url_builder::{UrlBuilder, TITLE_FILTER};
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{sleep_until, Instant};

/// Rendering side of the list screen.
pub trait ListView {
    fn list_changed(&mut self, comics: &[Comic]);
    fn fetch_error(&mut self, message: &str);
    /// A search finished without matches. Not an error.
    fn no_results(&mut self, query: &str);
    fn show_detail(&mut self, comic: &Comic, image: &Image);
}

/// Input coming from the search bar and the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserEvent {
    /// Full current contents of the search bar.
    TextChanged(String),
    CancelPressed,
    /// Zero-based row index.
    Selected(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FetchPurpose {
    Listing,
    Search(String),
}

#[derive(Debug)]
struct Completion {
    seq: u64,
    purpose: FetchPurpose,
    result: Result<Vec<Comic>, FetchError>,
}

pub struct ListController<A, V> {
    api: Arc<A>,
    urls: UrlBuilder,
    view: V,
    debouncer: SearchDebouncer,
    comics: Vec<Comic>,
    discard_stale: bool,
    next_seq: u64,
    last_applied: Option<u64>,
    fetches: JoinSet<Completion>,
}

impl<A: ComicApi, V: ListView> ListController<A, V> {
    pub fn new(api: Arc<A>, urls: UrlBuilder, view: V, quiet_period: Duration) -> Self {
        ListController {
            api,
            urls,
            view,
            debouncer: SearchDebouncer::new(quiet_period),
            comics: Vec::new(),
            discard_stale: false,
            next_seq: 0,
            last_applied: None,
            fetches: JoinSet::new(),
        }
    }

    /// Drop responses that are older than the last one applied, so the most
    /// recently issued request wins instead of the most recently completed.
    pub fn discard_stale_responses(mut self, discard: bool) -> Self {
        self.discard_stale = discard;
        self
    }

    pub fn comics(&self) -> &[Comic] {
        &self.comics
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Loads the unfiltered listing, then handles events until `events` closes.
    ///
    /// After the channel closes any pending search is dropped and fetches
    /// already in flight are still applied before returning.
    pub async fn run(&mut self, mut events: mpsc::Receiver<UserEvent>) {
        self.request_listing();
        let mut accepting = true;

        loop {
            if !accepting && self.fetches.is_empty() {
                break;
            }
            let deadline = self.debouncer.deadline();

            tokio::select! {
                event = events.recv(), if accepting => match event {
                    Some(event) => self.handle_event(event).await,
                    None => {
                        debug!("Event source closed, {} fetches in flight", self.fetches.len());
                        accepting = false;
                        self.debouncer.disarm();
                    }
                },
                Some(joined) = self.fetches.join_next() => self.apply(joined),
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(event) = self.debouncer.poll(Instant::now()) {
                        self.dispatch(event);
                    }
                }
            }
        }
    }

    async fn handle_event(&mut self, event: UserEvent) {
        match event {
            UserEvent::TextChanged(text) => {
                if self.debouncer.on_text_change(&text, Instant::now()) {
                    debug!("Search for {:?} armed", text);
                }
            }
            UserEvent::CancelPressed => {
                let event = self.debouncer.on_cancel_button();
                self.dispatch(event);
            }
            // Blocks the loop until the image is in, like a synchronous image load
            UserEvent::Selected(index) => self.open_detail(index).await,
        }
    }

    fn dispatch(&mut self, event: SearchEvent) {
        match event {
            SearchEvent::SearchTriggered(text) => self.spawn_fetch(FetchPurpose::Search(text)),
            SearchEvent::UnfilteredRequested => self.request_listing(),
        }
    }

    fn request_listing(&mut self) {
        self.spawn_fetch(FetchPurpose::Listing);
    }

    fn spawn_fetch(&mut self, purpose: FetchPurpose) {
        let url = match &purpose {
            FetchPurpose::Listing => self.urls.build_url(None, None),
            FetchPurpose::Search(query) => self.urls.build_url(Some(TITLE_FILTER), Some(query)),
        };
        self.next_seq += 1;
        let seq = self.next_seq;
        debug!("Fetch #{} issued for {:?}", seq, purpose);

        let api = Arc::clone(&self.api);
        self.fetches.spawn(async move {
            let result = api.fetch_comics(&url).await;
            Completion {
                seq,
                purpose,
                result,
            }
        });
    }

    fn apply(&mut self, joined: Result<Completion, JoinError>) {
        let done = match joined {
            Ok(done) => done,
            Err(e) => {
                let e = FetchError::Transport(format!("fetch task failed: {e}"));
                error!("Error received requesting data: {}", e);
                self.view.fetch_error(&e.user_message());
                return;
            }
        };

        if self.discard_stale && self.last_applied.is_some_and(|last| done.seq < last) {
            info!("Discarding stale response for fetch #{}", done.seq);
            return;
        }
        self.last_applied = Some(done.seq);

        match done.result {
            Ok(comics) => {
                info!("Fetch #{} returned {} comics", done.seq, comics.len());
                self.comics = comics;
                self.view.list_changed(&self.comics);
                if let FetchPurpose::Search(query) = &done.purpose {
                    if self.comics.is_empty() {
                        self.view.no_results(query);
                    }
                }
            }
            Err(e) => {
                error!("Error received requesting data: {}", e);
                self.view.fetch_error(&e.user_message());
            }
        }
    }

    async fn open_detail(&mut self, index: usize) {
        let Some(comic) = self.comics.get(index).cloned() else {
            warn!(
                "No comic at row {}, list has {} rows",
                index,
                self.comics.len()
            );
            return;
        };
        let image = load_image(
            self.api.as_ref(),
            comic.thumbnail.as_ref(),
            ImageSize::Portrait,
        )
        .await;
        self.view.show_detail(&comic, &image);
    }
}
