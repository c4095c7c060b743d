//! Bounded, rank-ordered suggestion collection with an emoji quota.
//!
//! The collection is a sorted vector (best first) capped at `capacity`. When an
//! emoji quota is configured (`emoji_capacity < capacity`), emoji and words
//! compete only within their own slots: `emoji_capacity` slots for emoji and
//! `capacity - emoji_capacity` for everything else.

use crate::candidate::SuggestedCandidate;

#[derive(Debug, Clone)]
pub struct RankedSuggestionCollector {
    capacity: usize,
    emoji_capacity: usize,
    emoji_count: usize,
    candidates: Vec<SuggestedCandidate>,
    is_beginning_of_sentence: bool,
}

impl RankedSuggestionCollector {
    /// Collector without an emoji quota.
    pub fn new(capacity: usize) -> Self {
        Self::with_emoji_quota(capacity, capacity)
    }

    /// Collector reserving `emoji_capacity` of its `capacity` slots for emoji.
    /// An `emoji_capacity` at or above `capacity` means no quota.
    ///
    /// The reserved slots stay reserved: words never hold more than
    /// `capacity - emoji_capacity` slots, even if no emoji arrives.
    pub fn with_emoji_quota(capacity: usize, emoji_capacity: usize) -> Self {
        Self {
            capacity,
            emoji_capacity: emoji_capacity.min(capacity),
            emoji_count: 0,
            candidates: Vec::with_capacity(capacity),
            is_beginning_of_sentence: false,
        }
    }

    pub fn set_beginning_of_sentence(&mut self, value: bool) {
        self.is_beginning_of_sentence = value;
    }

    pub fn is_beginning_of_sentence(&self) -> bool {
        self.is_beginning_of_sentence
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn emoji_capacity(&self) -> usize {
        self.emoji_capacity
    }

    pub fn emoji_count(&self) -> usize {
        self.emoji_count
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Best candidate.
    pub fn first(&self) -> Option<&SuggestedCandidate> {
        self.candidates.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SuggestedCandidate> {
        self.candidates.iter()
    }

    pub fn into_vec(self) -> Vec<SuggestedCandidate> {
        self.candidates
    }

    fn has_emoji_quota(&self) -> bool {
        self.emoji_capacity < self.capacity
    }

    /// Insert `candidate` if it fits or outranks the worst entry of its class.
    ///
    /// Returns whether the candidate was kept. Identical candidates are rejected.
    pub fn try_insert(&mut self, candidate: SuggestedCandidate) -> bool {
        let pos = match self.candidates.binary_search(&candidate) {
            Ok(_) => return false,
            Err(pos) => pos,
        };

        if candidate.is_emoji && self.has_emoji_quota() {
            if self.emoji_count < self.emoji_capacity {
                self.candidates.insert(pos, candidate);
                self.emoji_count += 1;
                return true;
            }
            // quota full: replace the worst emoji, never a word
            let Some(worst) = self.candidates.iter().rposition(|c| c.is_emoji) else {
                return false;
            };
            if !candidate.outranks(&self.candidates[worst]) {
                return false;
            }
            // pos <= worst because the candidate outranks it
            self.candidates.remove(worst);
            self.candidates.insert(pos, candidate);
            return true;
        }

        let (class_len, class_capacity) = if self.has_emoji_quota() {
            (
                self.candidates.len() - self.emoji_count,
                self.capacity - self.emoji_capacity,
            )
        } else {
            (self.candidates.len(), self.capacity)
        };

        let is_emoji = candidate.is_emoji;
        if class_len < class_capacity {
            self.candidates.insert(pos, candidate);
            if is_emoji {
                self.emoji_count += 1;
            }
            return true;
        }

        let worst = if self.has_emoji_quota() {
            self.candidates.iter().rposition(|c| !c.is_emoji)
        } else {
            self.candidates.len().checked_sub(1)
        };
        let Some(worst) = worst else {
            return false;
        };
        if !candidate.outranks(&self.candidates[worst]) {
            return false;
        }
        self.candidates.insert(pos, candidate);
        let evicted = self.candidates.remove(worst + 1);
        if is_emoji {
            self.emoji_count += 1;
        }
        if evicted.is_emoji {
            self.emoji_count -= 1;
        }
        true
    }

    /// Insert every candidate; `None` is a no-op. Returns how many were kept
    /// at the time of their insertion.
    pub fn bulk_insert<I>(&mut self, candidates: Option<I>) -> usize
    where
        I: IntoIterator<Item = SuggestedCandidate>,
    {
        let Some(candidates) = candidates else {
            return 0;
        };
        candidates
            .into_iter()
            .map(|c| self.try_insert(c))
            .filter(|&kept| kept)
            .count()
    }
}

impl<'a> IntoIterator for &'a RankedSuggestionCollector {
    type Item = &'a SuggestedCandidate;
    type IntoIter = std::slice::Iter<'a, SuggestedCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

impl IntoIterator for RankedSuggestionCollector {
    type Item = SuggestedCandidate;
    type IntoIter = std::vec::IntoIter<SuggestedCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}
