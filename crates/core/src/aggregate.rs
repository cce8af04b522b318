//! Candidate aggregation: keep the longest value seen for each marker.
//!
//! The longest span is the one least likely to be truncated. Aggregation is
//! order-independent with respect to lengths: whatever order candidates
//! arrive in, each marker ends up holding a value of the maximum length seen.
//! On equal lengths the first one offered wins.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::info;

use crate::extract::Candidate;
use crate::table::TableFile;

/// Best value recovered for one marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recovered {
    pub text: String,
    pub chars: usize,
    pub source: TableFile,
}

/// Outcome of offering a candidate to the [`Aggregator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    /// First value for this marker.
    Inserted,
    /// Replaced a strictly shorter value.
    Replaced { previous_chars: usize },
    /// An equal or longer value is already stored.
    Kept,
    /// The marker is not part of the configured set.
    UnknownMarker,
}

impl Offer {
    /// Whether the stored value changed.
    pub fn is_update(self) -> bool {
        matches!(self, Offer::Inserted | Offer::Replaced { .. })
    }
}

/// Accumulator owned by a scan; one per worker if scanning is parallelized.
#[derive(Debug, Clone)]
pub struct Aggregator {
    markers: BTreeSet<String>,
    best: BTreeMap<String, Recovered>,
}

impl Aggregator {
    /// Create an empty accumulator for a closed set of markers.
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { markers: markers.into_iter().map(Into::into).collect(), best: BTreeMap::new() }
    }

    /// Consider one candidate.
    pub fn offer(&mut self, candidate: Candidate) -> Offer {
        let Candidate { marker, text, chars, source } = candidate;
        self.offer_recovered(marker, Recovered { text, chars, source })
    }

    fn offer_recovered(&mut self, marker: String, value: Recovered) -> Offer {
        if !self.markers.contains(&marker) {
            return Offer::UnknownMarker;
        }

        let previous = self.best.get(&marker).map(|r| r.chars);
        if matches!(previous, Some(stored) if value.chars <= stored) {
            return Offer::Kept;
        }

        info!(
            marker = %marker,
            source = %value.source.label(),
            chars = value.chars,
            "Found {}: {} chars",
            marker,
            value.chars
        );
        self.best.insert(marker, value);

        match previous {
            Some(previous_chars) => Offer::Replaced { previous_chars },
            None => Offer::Inserted,
        }
    }

    /// Fold another accumulator into this one using the same longest-wins rule.
    pub fn merge(&mut self, other: Aggregator) {
        for (marker, value) in other.best {
            self.offer_recovered(marker, value);
        }
    }

    /// Current length stored for `marker`, if any.
    pub fn current_chars(&self, marker: &str) -> Option<usize> {
        self.best.get(marker).map(|r| r.chars)
    }

    /// Finalize into the result handed to reporting and persistence.
    pub fn finish(self) -> AggregateResult {
        AggregateResult { entries: self.best }
    }
}

/// Final mapping from marker to its longest recovered value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    entries: BTreeMap<String, Recovered>,
}

impl AggregateResult {
    pub fn get(&self, marker: &str) -> Option<&Recovered> {
        self.entries.get(marker)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Marker -> raw text pairs, ordered by marker.
    pub fn texts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.text.as_str()))
    }

    /// The persisted form: marker -> raw text.
    pub fn to_document(&self) -> BTreeMap<String, String> {
        self.texts().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    /// SHA-256 of the compact persisted document, as lowercase hex.
    ///
    /// Two scans over unchanged inputs produce the same digest.
    pub fn digest(&self) -> String {
        let canonical = serde_json::to_vec(&self.to_document()).unwrap_or_default();
        let digest = Sha256::digest(&canonical);
        format!("{:x}", digest)
    }
}
