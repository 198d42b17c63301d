//! Interactive city search: debounced queries, a candidate list with a
//! keyboard cursor, and committing a candidate as the active city.
//!
//! The session performs no I/O of its own. Input events mutate it and may
//! hand back a [`SearchTicket`]; the caller runs the ticket against a
//! [`GeocodingService`] and feeds the reply to [`SearchSession::complete`].
//! Replies carrying anything but the latest sequence number are dropped.

use std::time::Duration;

use tokio::time::Instant;

use crate::{config::SearchConfig, error::ServiceError, model::City, provider::GeocodingService};

pub const NO_RESULTS: &str = "검색 결과가 없습니다.";
pub const SEARCH_FAILED: &str = "도시 검색 중 오류가 발생했습니다.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// No query, a query below the minimum length, or a closed list.
    Idle,
    Searching,
    Results,
    /// The lookup succeeded with zero matches.
    Empty,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Down,
    Up,
    Enter,
    Escape,
}

/// A geocoding request the caller should dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub query: String,
}

/// One row of the rendered list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEntry<'a> {
    Candidate { city: &'a City, active: bool },
    /// Disabled placeholder row; never selectable.
    Notice(&'static str),
}

#[derive(Debug, Clone)]
struct PendingSearch {
    query: String,
    due: Instant,
}

#[derive(Debug)]
pub struct SearchSession {
    debounce: Duration,
    min_query_chars: usize,
    query: String,
    state: SearchState,
    candidates: Vec<City>,
    cursor: Option<usize>,
    open: bool,
    // Single slot: a new keystroke overwrites (cancels) the previous timer.
    pending: Option<PendingSearch>,
    next_seq: u64,
    in_flight: Option<u64>,
    searched_query: Option<String>,
}

impl SearchSession {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            debounce: config.debounce(),
            min_query_chars: config.min_query_chars,
            query: String::new(),
            state: SearchState::Idle,
            candidates: Vec::new(),
            cursor: None,
            open: false,
            pending: None,
            next_seq: 1,
            in_flight: None,
            searched_query: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn candidates(&self) -> &[City] {
        &self.candidates
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// When the pending debounced search fires, if one is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    pub fn entries(&self) -> Vec<ListEntry<'_>> {
        if !self.open {
            return Vec::new();
        }
        match self.state {
            SearchState::Empty => vec![ListEntry::Notice(NO_RESULTS)],
            SearchState::Failed => vec![ListEntry::Notice(SEARCH_FAILED)],
            _ => self
                .candidates
                .iter()
                .enumerate()
                .map(|(i, city)| ListEntry::Candidate {
                    city,
                    active: self.cursor == Some(i),
                })
                .collect(),
        }
    }

    /// Text box changed. Restarts the debounce timer; nothing is dispatched
    /// until [`poll_due`](Self::poll_due) sees the deadline pass.
    pub fn input(&mut self, text: &str, now: Instant) {
        self.query = text.trim().to_string();
        self.pending = Some(PendingSearch {
            query: self.query.clone(),
            due: now + self.debounce,
        });
    }

    /// Fire the pending search if its deadline has passed.
    pub fn poll_due(&mut self, now: Instant) -> Option<SearchTicket> {
        let due = self.pending.as_ref().is_some_and(|p| p.due <= now);
        if !due {
            return None;
        }
        let pending = self.pending.take()?;
        self.dispatch(pending.query)
    }

    /// Focus re-issues the current query at once when the list is idle or
    /// shows results for a different query.
    pub fn focus(&mut self) -> Option<SearchTicket> {
        if !self.long_enough(&self.query) {
            return None;
        }
        let stale = self.searched_query.as_deref() != Some(self.query.as_str());
        if self.state != SearchState::Idle && !stale {
            return None;
        }
        self.pending = None;
        self.dispatch(self.query.clone())
    }

    /// Set the query and search immediately, skipping the debounce.
    pub fn submit(&mut self, text: &str) -> Option<SearchTicket> {
        self.query = text.trim().to_string();
        self.pending = None;
        self.dispatch(self.query.clone())
    }

    /// Apply a geocoding reply. Returns `false` when the reply was stale.
    pub fn complete(&mut self, seq: u64, result: Result<Vec<City>, ServiceError>) -> bool {
        if self.in_flight != Some(seq) {
            tracing::debug!(seq, latest = ?self.in_flight, "discarding stale search reply");
            return false;
        }
        self.in_flight = None;
        self.cursor = None;
        self.open = true;

        match result {
            Ok(cities) if cities.is_empty() => {
                self.candidates.clear();
                self.state = SearchState::Empty;
            }
            Ok(cities) => {
                self.candidates = cities;
                self.state = SearchState::Results;
            }
            Err(err) => {
                tracing::warn!(error = %err, "city search failed");
                self.candidates.clear();
                self.state = SearchState::Failed;
            }
        }
        true
    }

    /// Keyboard navigation. Returns the committed city on Enter.
    pub fn key(&mut self, key: Key) -> Option<City> {
        match key {
            Key::Down | Key::Up if self.state == SearchState::Results => {
                let n = self.candidates.len();
                if n == 0 {
                    return None;
                }
                self.cursor = Some(match (key, self.cursor) {
                    (Key::Down, None) => 0,
                    (Key::Down, Some(i)) => (i + 1) % n,
                    (_, None) => n - 1,
                    (_, Some(i)) => (i + n - 1) % n,
                });
                None
            }
            Key::Enter if self.state == SearchState::Results => {
                let index = self.cursor?;
                self.commit(index)
            }
            Key::Escape if self.state != SearchState::Idle || self.open => {
                self.close();
                None
            }
            _ => None,
        }
    }

    /// Pointer activation of a listed candidate, regardless of the cursor.
    pub fn activate(&mut self, index: usize) -> Option<City> {
        if index >= self.candidates.len() {
            return None;
        }
        self.commit(index)
    }

    /// Run a ticket against `geocoder` and apply the reply.
    pub async fn run<G>(&mut self, geocoder: &G, ticket: SearchTicket) -> bool
    where
        G: GeocodingService + ?Sized,
    {
        let result = geocoder.search(&ticket.query).await;
        self.complete(ticket.seq, result)
    }

    /// Wait out the debounce window, then run whatever search fires.
    /// Returns `false` when nothing was dispatched.
    pub async fn settle<G>(&mut self, geocoder: &G) -> bool
    where
        G: GeocodingService + ?Sized,
    {
        let Some(due) = self.next_deadline() else {
            return false;
        };
        tokio::time::sleep_until(due).await;
        match self.poll_due(Instant::now()) {
            Some(ticket) => self.run(geocoder, ticket).await,
            None => false,
        }
    }

    fn long_enough(&self, query: &str) -> bool {
        query.chars().count() >= self.min_query_chars
    }

    fn dispatch(&mut self, query: String) -> Option<SearchTicket> {
        if !self.long_enough(&query) {
            self.close();
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.in_flight = Some(seq);
        self.searched_query = Some(query.clone());
        self.state = SearchState::Searching;

        tracing::debug!(seq, %query, "dispatching city search");
        Some(SearchTicket { seq, query })
    }

    fn commit(&mut self, index: usize) -> Option<City> {
        let city = self.candidates.get(index).cloned()?;
        self.query = city.input_label();
        self.close();
        tracing::info!(city = %city.display_label(), "city committed");
        Some(city)
    }

    fn close(&mut self) {
        self.candidates.clear();
        self.cursor = None;
        self.open = false;
        self.pending = None;
        self.in_flight = None;
        self.searched_query = None;
        self.state = SearchState::Idle;
    }
}
