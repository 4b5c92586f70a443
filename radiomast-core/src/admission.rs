//! ## radiomast-core::admission
//! **The subscriber admission gate and roster**
//!
//! Admission runs four checks in a fixed order (name, phone, capacity,
//! usage) and stops at the first failure. Ids are only consumed by
//! successful admissions, so a rejected draft leaves the roster byte-for-byte
//! unchanged.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::subscriber::{Subscriber, SubscriberDraft, TrafficClass};
use crate::technology::{Generation, UsageError};

/// Why a draft was refused. The variant order mirrors the check order.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum AdmissionError {
    /// Name is empty or contains a character that is not an ASCII letter.
    #[error("invalid name {0:?}: must be non-empty ASCII letters")]
    InvalidName(String),
    /// Phone is shorter than three characters or contains a non-digit.
    #[error("invalid phone {0:?}: must be at least 3 digits")]
    InvalidPhone(String),
    /// The station is full; capacity reflects the current configuration.
    #[error("station at capacity ({capacity} subscribers)")]
    CapacityReached { capacity: u64 },
    /// The declared usage violates the active generation's service caps.
    #[error(transparent)]
    Usage(#[from] UsageError),
}

/// True when the name is non-empty and every character is an ASCII letter.
/// Accented and other Unicode letters are rejected like digits are.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphabetic())
}

/// True when the phone has at least three characters, all ASCII digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() >= 3 && phone.chars().all(|c| c.is_ascii_digit())
}

/// The admitted subscriber population of one station.
///
/// Ids are handed out sequentially from 1 and are never reused until
/// [`Roster::reset`] wipes the roster entirely.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Roster {
    subscribers: Vec<Subscriber>,
    next_id: u32,
}

impl Default for Roster {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 1,
        }
    }
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the admission gate over a draft.
    ///
    /// Check order is name, phone, capacity, usage; the first failure aborts
    /// and no id is consumed. On success the draft is promoted to a
    /// [`Subscriber`] and a reference to the stored record is returned.
    pub fn admit(
        &mut self,
        draft: SubscriberDraft,
        generation: Generation,
        capacity: u64,
    ) -> Result<&Subscriber, AdmissionError> {
        if !is_valid_name(&draft.name) {
            return Err(AdmissionError::InvalidName(draft.name));
        }
        if !is_valid_phone(&draft.phone) {
            return Err(AdmissionError::InvalidPhone(draft.phone));
        }
        if self.subscribers.len() as u64 >= capacity {
            return Err(AdmissionError::CapacityReached { capacity });
        }
        generation.validate_usage(&draft.traffic, draft.messages)?;

        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push(Subscriber::from_draft(id, draft));
        Ok(self.subscribers.last().expect("Subscriber was just pushed"))
    }

    /// Drops every subscriber and restarts id assignment at 1.
    pub fn reset(&mut self) {
        self.subscribers.clear();
        self.next_id = 1;
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    pub fn subscribers(&self) -> &[Subscriber] {
        &self.subscribers
    }

    pub fn subscribers_mut(&mut self) -> &mut [Subscriber] {
        &mut self.subscribers
    }

    /// Number of subscribers currently placed on a channel.
    pub fn connected(&self) -> usize {
        self.subscribers.iter().filter(|s| s.is_connected()).count()
    }

    /// Tally of data versus voice subscribers. Unclassifiable traffic counts
    /// toward voice, matching the reporting convention.
    pub fn traffic_split(&self) -> (usize, usize) {
        let data = self
            .subscribers
            .iter()
            .filter(|s| s.traffic_class() == Some(TrafficClass::Data))
            .count();
        (data, self.subscribers.len() - data)
    }

    /// Total messages scheduled for transmission across subscribers that
    /// still hold a channel. Dropped subscribers contribute nothing.
    pub fn planned_messages(&self) -> u64 {
        self.subscribers
            .iter()
            .filter(|s| !s.dropped)
            .map(|s| u64::from(s.messages))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, phone: &str, traffic: &str, messages: u32) -> SubscriberDraft {
        SubscriberDraft::new(name, phone, traffic, messages)
    }

    #[test]
    fn admits_valid_draft_with_sequential_ids() {
        let mut roster = Roster::new();
        let first = roster
            .admit(draft("Alice", "12345", "data", 4), Generation::Lte, 10)
            .unwrap();
        assert_eq!(first.id, 1);
        let second = roster
            .admit(draft("Bob", "555", "voice", 2), Generation::Lte, 10)
            .unwrap();
        assert_eq!(second.id, 2);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn rejects_name_with_digit() {
        let mut roster = Roster::new();
        let err = roster
            .admit(draft("A1ice", "12345", "data", 1), Generation::Lte, 10)
            .unwrap_err();
        assert_eq!(err, AdmissionError::InvalidName("A1ice".to_string()));
    }

    #[test]
    fn rejects_name_with_accented_letter() {
        let mut roster = Roster::new();
        assert!(matches!(
            roster.admit(draft("Ålice", "12345", "data", 1), Generation::Lte, 10),
            Err(AdmissionError::InvalidName(_))
        ));
    }

    #[test]
    fn rejects_empty_name() {
        let mut roster = Roster::new();
        assert!(matches!(
            roster.admit(draft("", "123", "data", 1), Generation::Lte, 10),
            Err(AdmissionError::InvalidName(_))
        ));
    }

    #[test]
    fn phone_needs_three_digits() {
        let mut roster = Roster::new();
        assert!(matches!(
            roster.admit(draft("Ann", "12", "data", 1), Generation::Lte, 10),
            Err(AdmissionError::InvalidPhone(_))
        ));
        assert!(matches!(
            roster.admit(draft("Ann", "12a45", "data", 1), Generation::Lte, 10),
            Err(AdmissionError::InvalidPhone(_))
        ));
        assert!(roster
            .admit(draft("Ann", "123", "data", 1), Generation::Lte, 10)
            .is_ok());
    }

    #[test]
    fn name_check_runs_before_phone_check() {
        let mut roster = Roster::new();
        // Both fields are bad; the gate reports the name first.
        assert!(matches!(
            roster.admit(draft("A1", "x", "data", 1), Generation::Lte, 10),
            Err(AdmissionError::InvalidName(_))
        ));
    }

    #[test]
    fn capacity_gate_blocks_admission() {
        let mut roster = Roster::new();
        roster
            .admit(draft("Ann", "123", "data", 1), Generation::Lte, 1)
            .unwrap();
        assert_eq!(
            roster
                .admit(draft("Bob", "456", "data", 1), Generation::Lte, 1)
                .unwrap_err(),
            AdmissionError::CapacityReached { capacity: 1 }
        );
    }

    #[test]
    fn usage_gate_runs_last() {
        let mut roster = Roster::new();
        let err = roster
            .admit(draft("Ann", "123", "data", 6), Generation::Gsm, 10)
            .unwrap_err();
        assert!(matches!(
            err,
            AdmissionError::Usage(UsageError::LimitExceeded { limit: 5, .. })
        ));
    }

    #[test]
    fn rejected_draft_consumes_no_id() {
        let mut roster = Roster::new();
        let _ = roster.admit(draft("A1ice", "123", "data", 1), Generation::Lte, 10);
        let admitted = roster
            .admit(draft("Alice", "123", "data", 1), Generation::Lte, 10)
            .unwrap();
        assert_eq!(admitted.id, 1);
    }

    #[test]
    fn reset_restarts_ids() {
        let mut roster = Roster::new();
        roster
            .admit(draft("Ann", "123", "data", 1), Generation::Lte, 10)
            .unwrap();
        roster.reset();
        assert!(roster.is_empty());
        let admitted = roster
            .admit(draft("Bob", "456", "voice", 1), Generation::Lte, 10)
            .unwrap();
        assert_eq!(admitted.id, 1);
    }

    #[test]
    fn traffic_split_counts_unclassified_as_voice() {
        let mut roster = Roster::new();
        roster
            .admit(draft("Ann", "123", "data", 1), Generation::Lte, 10)
            .unwrap();
        roster
            .admit(draft("Bob", "456", "voice", 1), Generation::Lte, 10)
            .unwrap();
        roster
            .admit(draft("Cat", "789", "video", 1), Generation::Lte, 10)
            .unwrap();
        assert_eq!(roster.traffic_split(), (1, 2));
    }

    #[test]
    fn planned_messages_skip_dropped() {
        let mut roster = Roster::new();
        roster
            .admit(draft("Ann", "123", "data", 3), Generation::Lte, 10)
            .unwrap();
        roster
            .admit(draft("Bob", "456", "voice", 5), Generation::Lte, 10)
            .unwrap();
        assert_eq!(roster.planned_messages(), 8);
        roster.subscribers_mut()[1].dropped = true;
        assert_eq!(roster.planned_messages(), 3);
    }
}
