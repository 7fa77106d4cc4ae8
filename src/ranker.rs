//! Score ordering and rank lookup
//!
//! Entries are sorted by ascending score. Equal scores are ordered by a
//! [`TieBreak`]; the default keeps the order the entries were given in.
//! Rank is the 1-based position in that order: rank 1 is the lowest score.

use crate::error::{HiggsError, Result};
use crate::event::Event;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Ordering applied to entries with equal scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TieBreak {
    /// Stable sort: tied entries keep their input order
    #[default]
    InputOrder,
    /// Tied entries are ordered by ascending event id
    EventId,
}

impl TieBreak {
    fn compare(self, a: &ScoredId, b: &ScoredId) -> Ordering {
        let by_score = a.score.total_cmp(&b.score);
        match self {
            TieBreak::InputOrder => by_score,
            TieBreak::EventId => by_score.then(a.id.cmp(&b.id)),
        }
    }
}

/// Event id paired with its score
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredId {
    pub id: i64,
    pub score: f64,
}

impl From<&Event> for ScoredId {
    fn from(evt: &Event) -> Self {
        Self {
            id: evt.event_id,
            score: evt.score,
        }
    }
}

/// Entries in ascending score order with an id to rank map
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    order: Vec<ScoredId>,
    ranks: HashMap<i64, usize>,
}

impl Ranking {
    /// Sort `entries` and assign ranks 1..=N, ties in input order.
    ///
    /// Scores are compared with [`f64::total_cmp`], so NaN scores sort after
    /// every finite score instead of breaking the order.
    ///
    /// Ranks are dense only when ids are unique. A repeated id keeps the rank
    /// of its last occurrence, so [`Ranking::rank_of`] returns the same rank
    /// for every row carrying that id.
    pub fn new(entries: Vec<ScoredId>) -> Self {
        Self::with_tie_break(entries, TieBreak::InputOrder)
    }

    /// Sort `entries` with an explicit [`TieBreak`] and assign ranks 1..=N
    pub fn with_tie_break(mut entries: Vec<ScoredId>, tie_break: TieBreak) -> Self {
        entries.sort_by(|a, b| tie_break.compare(a, b));

        let mut ranks = HashMap::with_capacity(entries.len());
        for (pos, entry) in entries.iter().enumerate() {
            if ranks.insert(entry.id, pos + 1).is_some() {
                warn!(id = entry.id, "duplicate event id, keeping the higher rank");
            }
        }

        debug!(entries = entries.len(), ?tie_break, "ranked scores");
        Self {
            order: entries,
            ranks,
        }
    }

    pub fn from_events<'a>(events: impl IntoIterator<Item = &'a Event>) -> Self {
        Self::new(events.into_iter().map(ScoredId::from).collect())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Entries in rank order
    pub fn ordered(&self) -> &[ScoredId] {
        &self.order
    }

    /// Rank of `id`, failing with [`HiggsError::UnknownEvent`] when absent
    pub fn rank_of(&self, id: i64) -> Result<usize> {
        self.ranks
            .get(&id)
            .copied()
            .ok_or(HiggsError::UnknownEvent { id })
    }

    /// Rank of `id` bounded by `total` records.
    ///
    /// `index` is the caller's position and only appears in the error.
    pub fn checked_rank(&self, index: usize, id: i64, total: usize) -> Result<usize> {
        let rank = self.rank_of(id)?;
        if rank > total {
            return Err(HiggsError::RankOutOfRange {
                index,
                id,
                rank,
                total,
            });
        }
        Ok(rank)
    }
}
