//! Seat lookup for the chat collaborator
//!
//! Guests come from a static directory (name, optional category, seat id).
//! A name shared by several guests is ambiguous; the candidates are parked in
//! a per-conversation [`PendingChoice`] that expires on its own, and the
//! guest's next reply picks one.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::artifact::LayoutResult;
use crate::entity::TableEntity;
use crate::{Error, Result};

/// How long a disambiguation question stays open
pub const DEFAULT_CHOICE_TTL_SECS: i64 = 600;

/// One row of the guest directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Entity id in the layout artifact, usually `T<n>`
    pub seat: String,
}

impl GuestRecord {
    /// `name (category)` as shown in a choice list
    #[must_use]
    pub fn label(&self) -> String {
        match self.category.as_deref().filter(|c| !c.is_empty()) {
            Some(category) => format!("{} ({category})", self.name),
            None => self.name.clone(),
        }
    }

    fn category_matches(&self, query: &str) -> bool {
        self.category.as_deref().unwrap_or_default().to_lowercase() == query.to_lowercase()
    }

    fn name_matches(&self, query: &str) -> bool {
        self.name.to_lowercase() == query.to_lowercase()
    }
}

/// A parsed guest query, `name` or `name (category)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestQuery {
    pub name: String,
    pub category: Option<String>,
}

impl GuestQuery {
    /// Split `name (category)`; full-width parentheses are accepted too
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let Some(inner) = text.strip_suffix(')').or_else(|| text.strip_suffix('）')) else {
            return Self::name_only(text);
        };
        let Some(open) = inner.rfind(['(', '（']) else {
            return Self::name_only(text);
        };
        let name = inner[..open].trim();
        let category = inner[open..]
            .trim_start_matches(['(', '（'])
            .trim();
        if name.is_empty() || category.is_empty() {
            return Self::name_only(text);
        }
        Self {
            name: name.to_string(),
            category: Some(category.to_string()),
        }
    }

    fn name_only(text: &str) -> Self {
        Self {
            name: text.to_string(),
            category: None,
        }
    }
}

/// Outcome of resolving a guest query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Unique(GuestRecord),
    /// Several guests share the name; their categories tell them apart
    Ambiguous(Vec<GuestRecord>),
    NotFound,
}

/// Static guest data
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuestDirectory {
    guests: Vec<GuestRecord>,
}

impl GuestDirectory {
    #[must_use]
    pub const fn new(guests: Vec<GuestRecord>) -> Self {
        Self { guests }
    }

    /// Parse a JSON list of guest records
    ///
    /// # Errors
    ///
    /// Returns `Error::Parse` if the text is not a list of records.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text)
            .map(Self::new)
            .map_err(|e| Error::parse(format!("Failed to parse guest directory: {e}")))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.guests.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guests.is_empty()
    }

    /// Case-insensitive exact name match
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Vec<&GuestRecord> {
        self.guests.iter().filter(|g| g.name_matches(name)).collect()
    }

    /// Resolve free text to a guest.
    ///
    /// A `name (category)` query that matches exactly wins; otherwise the
    /// category is ignored and the name alone decides.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Resolution {
        let query = GuestQuery::parse(text);
        let by_name = self.find_by_name(&query.name);

        if let Some(category) = &query.category {
            if let Some(guest) = by_name.iter().find(|g| g.category_matches(category)) {
                return Resolution::Unique((*guest).clone());
            }
        }

        let candidates = if by_name.is_empty() {
            self.find_by_name(text.trim())
        } else {
            by_name
        };

        match candidates.as_slice() {
            [] => Resolution::NotFound,
            [guest] => Resolution::Unique((*guest).clone()),
            many => Resolution::Ambiguous(many.iter().map(|g| (*g).clone()).collect()),
        }
    }
}

/// Read access to a loaded artifact keyed by table id
#[derive(Debug, Clone)]
pub struct SeatLookup {
    layout: LayoutResult,
}

impl SeatLookup {
    #[must_use]
    pub const fn new(layout: LayoutResult) -> Self {
        Self { layout }
    }

    /// Entity for `id`
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` when the layout has no such id.
    pub fn table(&self, id: &str) -> Result<&TableEntity> {
        self.layout
            .get(id)
            .ok_or_else(|| Error::not_found(format!("no table '{id}' in the current layout")))
    }

    /// Seat of a resolved guest
    ///
    /// # Errors
    ///
    /// Returns `Error::NotFound` when the guest's seat is not in the layout.
    pub fn seat_of(&self, guest: &GuestRecord) -> Result<&TableEntity> {
        self.table(&guest.seat)
    }

    #[must_use]
    pub fn normal_tables(&self) -> Vec<&TableEntity> {
        self.layout.normal_tables()
    }

    #[must_use]
    pub const fn layout(&self) -> &LayoutResult {
        &self.layout
    }
}

/// Candidates waiting for the guest to pick one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingChoice {
    pub candidates: Vec<GuestRecord>,
    pub expires_at: DateTime<Utc>,
}

impl PendingChoice {
    /// Match a reply against the candidates: a 1-based option number, the
    /// category alone, `name (category)`, or the bare name of an
    /// uncategorized guest.
    #[must_use]
    pub fn pick(&self, reply: &str) -> Option<&GuestRecord> {
        let reply = reply.trim();

        if let Ok(index) = reply.parse::<usize>() {
            return index.checked_sub(1).and_then(|i| self.candidates.get(i));
        }

        let query = GuestQuery::parse(reply);
        match &query.category {
            Some(category) => self
                .candidates
                .iter()
                .find(|g| g.name_matches(&query.name) && g.category_matches(category)),
            None => self
                .candidates
                .iter()
                .find(|g| g.category.is_some() && g.category_matches(reply))
                .or_else(|| {
                    self.candidates
                        .iter()
                        .find(|g| g.label() == g.name && g.name_matches(reply))
                }),
        }
    }
}

/// Open disambiguation questions keyed by conversation id
#[derive(Debug, Clone)]
pub struct ConversationContexts {
    ttl: Duration,
    pending: HashMap<String, PendingChoice>,
}

impl Default for ConversationContexts {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_CHOICE_TTL_SECS))
    }
}

impl ConversationContexts {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            pending: HashMap::new(),
        }
    }

    /// Park `candidates` for `conversation`, replacing any open question
    pub fn begin(&mut self, conversation: &str, candidates: Vec<GuestRecord>, now: DateTime<Utc>) {
        let expires_at = now + self.ttl;
        debug!(
            conversation,
            candidates = candidates.len(),
            %expires_at,
            "awaiting guest choice"
        );
        self.pending.insert(
            conversation.to_string(),
            PendingChoice {
                candidates,
                expires_at,
            },
        );
    }

    /// Open question for `conversation`, if it has not expired
    #[must_use]
    pub fn pending(&self, conversation: &str, now: DateTime<Utc>) -> Option<&PendingChoice> {
        self.pending
            .get(conversation)
            .filter(|choice| choice.expires_at > now)
    }

    /// Consume the open question with the guest's reply.
    ///
    /// The question is closed whether or not the reply matched, as a
    /// non-matching reply starts a fresh lookup.
    pub fn resolve(
        &mut self,
        conversation: &str,
        reply: &str,
        now: DateTime<Utc>,
    ) -> Option<GuestRecord> {
        let choice = self.pending.remove(conversation)?;
        if choice.expires_at <= now {
            debug!(conversation, "guest choice expired");
            return None;
        }
        let picked = choice.pick(reply).cloned();
        if let Some(guest) = &picked {
            info!(
                conversation,
                guest = %guest.label(),
                seat = %guest.seat,
                "guest choice resolved"
            );
        }
        picked
    }

    /// Drop every expired question, returning how many were removed
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.pending.len();
        self.pending.retain(|_, choice| choice.expires_at > now);
        before - self.pending.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
