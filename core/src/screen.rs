//! Load state for screens that display brand data.
//!
//! A screen starts a load, shows a spinner, then shows either the data, an
//! empty placeholder, or the error message with a retry action. Retrying is
//! starting a new load. Each load hands out a `LoadTicket`; completing with
//! an older ticket is ignored, so a response that arrives after the user
//! retried or left the screen never overwrites newer state.

use crate::brand::Brand;
use crate::error::ApiError;

/// Shown by list screens when the API returns no brands.
pub const EMPTY_BRANDS_MESSAGE: &str = "No brands available at the moment.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState<T> {
    Loading,
    Loaded(T),
    Empty,
    Failed { message: String },
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    /// Text the screen should display, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            LoadState::Failed { message } => Some(message.as_str()),
            LoadState::Empty => Some(EMPTY_BRANDS_MESSAGE),
            LoadState::Loading | LoadState::Loaded(_) => None,
        }
    }

    /// Failed and empty screens offer a retry action.
    pub fn can_retry(&self) -> bool {
        matches!(self, LoadState::Failed { .. } | LoadState::Empty)
    }
}

/// Payloads that can be "nothing to show" even when the request succeeded.
pub trait Presentable {
    fn is_empty(&self) -> bool {
        false
    }
}

impl Presentable for Brand {}

impl Presentable for Vec<Brand> {
    fn is_empty(&self) -> bool {
        <[Brand]>::is_empty(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone)]
pub struct Screen<T> {
    state: LoadState<T>,
    generation: u64,
}

pub type BrandListScreen = Screen<Vec<Brand>>;
pub type BrandDetailScreen = Screen<Brand>;

impl<T: Presentable> Screen<T> {
    /// Screens mount in the loading state; the first load starts immediately.
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            generation: 0,
        }
    }

    pub fn state(&self) -> &LoadState<T> {
        &self.state
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.state = LoadState::Loading;
        LoadTicket(self.generation)
    }

    /// Apply a finished load. Returns `false` and leaves the state untouched
    /// when `ticket` is stale.
    pub fn complete(&mut self, ticket: LoadTicket, result: Result<T, ApiError>) -> bool {
        if ticket.0 != self.generation {
            tracing::debug!(ticket = ticket.0, current = self.generation, "discarding stale load");
            return false;
        }
        self.state = match result {
            Ok(data) if data.is_empty() => LoadState::Empty,
            Ok(data) => LoadState::Loaded(data),
            Err(err) => LoadState::Failed {
                message: err.to_string(),
            },
        };
        true
    }
}

impl<T: Presentable> Default for Screen<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NETWORK_ERROR_MESSAGE;

    fn brand(id: &str) -> Brand {
        Brand {
            id: id.to_string(),
            name: format!("Brand {id}"),
            logo: format!("https://example.com/{id}.png"),
            tagline: "tagline".to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn mounts_loading() {
        let screen = BrandListScreen::new();
        assert!(screen.state().is_loading());
        assert_eq!(screen.state().message(), None);
    }

    #[test]
    fn loaded_list() {
        let mut screen = BrandListScreen::new();
        let ticket = screen.begin_load();
        assert!(screen.complete(ticket, Ok(vec![brand("1"), brand("2")])));
        assert!(matches!(screen.state(), LoadState::Loaded(list) if list.len() == 2));
        assert!(!screen.state().can_retry());
    }

    #[test]
    fn empty_list_shows_placeholder() {
        let mut screen = BrandListScreen::new();
        let ticket = screen.begin_load();
        screen.complete(ticket, Ok(Vec::new()));
        assert_eq!(screen.state(), &LoadState::Empty);
        assert_eq!(screen.state().message(), Some(EMPTY_BRANDS_MESSAGE));
        assert!(screen.state().can_retry());
    }

    #[test]
    fn failure_shows_error_message() {
        let mut screen = BrandDetailScreen::new();
        let ticket = screen.begin_load();
        screen.complete(
            ticket,
            Err(ApiError::Network {
                cause: "connection refused".to_string(),
            }),
        );
        assert_eq!(screen.state().message(), Some(NETWORK_ERROR_MESSAGE));
        assert!(screen.state().can_retry());
    }

    #[test]
    fn retry_discards_the_abandoned_result() {
        let mut screen = BrandDetailScreen::new();
        let first = screen.begin_load();
        let retry = screen.begin_load();

        assert!(screen.complete(retry, Ok(brand("2"))));
        assert!(!screen.complete(first, Err(ApiError::NotFound { id: "1".to_string() })));
        assert_eq!(screen.state(), &LoadState::Loaded(brand("2")));
    }

    #[test]
    fn retry_after_failure_returns_to_loading() {
        let mut screen = BrandListScreen::new();
        let ticket = screen.begin_load();
        screen.complete(
            ticket,
            Err(ApiError::Http {
                status: 500,
                body: String::new(),
            }),
        );
        screen.begin_load();
        assert!(screen.state().is_loading());
    }
}
