//! Page model types: `App`, result sources and health badges.

use crate::api::{RecKind, Track};

/// Where the current result list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsSource {
    /// Nothing requested yet.
    None,
    Search { query: String },
    Recommendations { kind: RecKind },
}

/// Outcome of a health probe, as shown in the status line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HealthBadge {
    Unknown,
    Checking,
    Up,
    Down,
}

impl HealthBadge {
    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "?",
            Self::Checking => "...",
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// The main page model.
pub struct App {
    pub results: Vec<Track>,
    pub source: ResultsSource,
    pub selected: usize,

    pub search_mode: bool,
    pub search_input: String,

    /// Strategy requested by the next recommendations fetch.
    pub rec_kind: RecKind,
    /// A recommendations request is in flight.
    pub loading: bool,

    pub service_health: HealthBadge,
    pub storage_health: HealthBadge,
}

impl App {
    pub fn new(rec_kind: RecKind) -> Self {
        Self {
            results: Vec::new(),
            source: ResultsSource::None,
            selected: 0,
            search_mode: false,
            search_input: String::new(),
            rec_kind,
            loading: false,
            service_health: HealthBadge::Unknown,
            storage_health: HealthBadge::Unknown,
        }
    }

    /// Replace the result list with search results for `query`.
    pub fn set_search_results(&mut self, query: String, tracks: Vec<Track>) {
        self.results = tracks;
        self.source = ResultsSource::Search { query };
        self.selected = 0;
    }

    /// Replace the result list with recommendations of `kind`.
    pub fn set_recommendations(&mut self, kind: RecKind, tracks: Vec<Track>) {
        self.results = tracks;
        self.source = ResultsSource::Recommendations { kind };
        self.selected = 0;
        self.loading = false;
    }

    /// True when a completed request returned nothing. The UI renders an
    /// explicit notice for this, never an empty list.
    pub fn no_results(&self) -> bool {
        self.source != ResultsSource::None && self.results.is_empty()
    }

    pub fn showing_recommendations(&self) -> bool {
        matches!(self.source, ResultsSource::Recommendations { .. })
    }

    pub fn has_results(&self) -> bool {
        !self.results.is_empty()
    }

    pub fn selected_track(&self) -> Option<&Track> {
        self.results.get(self.selected)
    }

    /// Move the selection cursor down, wrapping at the end.
    pub fn select_next(&mut self) {
        if !self.results.is_empty() {
            self.selected = (self.selected + 1) % self.results.len();
        }
    }

    /// Move the selection cursor up, wrapping at the start.
    pub fn select_prev(&mut self) {
        if !self.results.is_empty() {
            let len = self.results.len();
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.results.len().saturating_sub(1);
    }

    /// Fold a confirmed rating back into the visible list so the stars
    /// update without a refetch.
    pub fn apply_rating(&mut self, song_id: i64, new_rating: f64) {
        for track in self.results.iter_mut().filter(|t| t.id == song_id) {
            track.avg_rating = Some(new_rating);
        }
    }

    /// Advance to the next recommendation strategy.
    pub fn cycle_rec_kind(&mut self) -> RecKind {
        self.rec_kind = self.rec_kind.next();
        self.rec_kind
    }

    pub fn enter_search_mode(&mut self) {
        self.search_mode = true;
    }

    pub fn exit_search_mode(&mut self) {
        self.search_mode = false;
    }

    /// Leave search mode and wipe the input.
    pub fn clear_search(&mut self) {
        self.search_mode = false;
        self.search_input.clear();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_input.pop();
    }
}
