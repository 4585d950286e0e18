use crate::clause::{build_clause, FilterClause};
use crate::errors::QueryError;
use crate::fields::TIME_RANGE_FIELD;
use crate::parser::parse_query;
use crate::registry::FieldRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The distinguished temporal clause every query carries.
///
/// Absent bounds mean unbounded; both absent is the "all time" default.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimeRangeClause {
    pub field: String,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeRangeClause {
    pub fn all_time() -> Self {
        Self {
            field: TIME_RANGE_FIELD.to_string(),
            start: None,
            end: None,
        }
    }

    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            field: TIME_RANGE_FIELD.to_string(),
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_all_time(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

impl Default for TimeRangeClause {
    fn default() -> Self {
        Self::all_time()
    }
}

/// Immutable value object handed to the search backend.
///
/// Clauses are conjunctive; their order is insertion order and carries no
/// result semantics.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchQuery {
    pub clauses: Vec<FilterClause>,
    pub time_range: TimeRangeClause,
}

impl SearchQuery {
    /// Wire form for the search-execution collaborator.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Compose clauses and a time range into a query. The time-range clause is
/// always present in the result, defaulting to all time when omitted.
pub fn serialize_query(
    clauses: Vec<FilterClause>,
    time_range: Option<TimeRangeClause>,
) -> SearchQuery {
    SearchQuery {
        clauses,
        time_range: time_range.unwrap_or_else(TimeRangeClause::all_time),
    }
}

/// Parse, validate and serialize a typed-in query string in one step.
pub fn build_query(
    registry: &FieldRegistry,
    input: &str,
    time_range: Option<TimeRangeClause>,
) -> Result<SearchQuery, QueryError> {
    let mut clauses = Vec::new();
    for term in parse_query(input)? {
        clauses.push(build_clause(
            registry,
            &term.field,
            term.operator,
            &term.raw,
        )?);
    }
    Ok(serialize_query(clauses, time_range))
}

/// Lifecycle of a query under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftState {
    Empty,
    Editing,
    Submitted,
}

/// A query being assembled in the UI.
///
/// Starts empty, moves to editing as clauses are added or removed, and
/// produces an immutable [`SearchQuery`] on submit. Editing again after a
/// submit supersedes the previous submission; drafts are ephemeral and
/// never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDraft {
    clauses: Vec<FilterClause>,
    time_range: Option<TimeRangeClause>,
    state: DraftState,
}

impl QueryDraft {
    pub fn new() -> Self {
        Self {
            clauses: Vec::new(),
            time_range: None,
            state: DraftState::Empty,
        }
    }

    pub fn state(&self) -> DraftState {
        self.state
    }

    pub fn clauses(&self) -> &[FilterClause] {
        &self.clauses
    }

    pub fn add_clause(&mut self, clause: FilterClause) {
        self.clauses.push(clause);
        self.state = DraftState::Editing;
    }

    pub fn remove_clause(&mut self, index: usize) -> Option<FilterClause> {
        if index >= self.clauses.len() {
            return None;
        }
        self.state = DraftState::Editing;
        Some(self.clauses.remove(index))
    }

    pub fn set_time_range(&mut self, time_range: TimeRangeClause) {
        self.time_range = Some(time_range);
        self.state = DraftState::Editing;
    }

    /// Serialize the current state. The draft stays usable: further edits
    /// supersede this submission and a later submit produces a fresh query.
    pub fn submit(&mut self) -> SearchQuery {
        self.state = DraftState::Submitted;
        serialize_query(self.clauses.clone(), self.time_range.clone())
    }
}

impl Default for QueryDraft {
    fn default() -> Self {
        Self::new()
    }
}
