//! ## radiomast-core::subscriber
//! **Subscriber records and their placement state**
//!
//! A [`SubscriberDraft`] is the unvalidated intake shape; a [`Subscriber`] is
//! the admitted record, carrying the roster-assigned id plus mutable placement
//! state written by the allocation pass.

use serde::{Deserialize, Serialize};

/// Coarse service class derived from the free-form traffic declaration.
///
/// Only 2G admission cares about this distinction; everywhere else the class
/// is informational (traffic splits, report tallies).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrafficClass {
    Data,
    Voice,
}

impl TrafficClass {
    /// Case-insensitive match of the declared type. Anything that is neither
    /// `data` nor `voice` returns `None`.
    pub fn classify(declared: &str) -> Option<TrafficClass> {
        if declared.eq_ignore_ascii_case("data") {
            Some(TrafficClass::Data)
        } else if declared.eq_ignore_ascii_case("voice") {
            Some(TrafficClass::Voice)
        } else {
            None
        }
    }
}

/// Intake form for one subscriber, prior to any validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubscriberDraft {
    pub name: String,
    pub phone: String,
    /// Declared traffic type, kept verbatim even when unclassifiable.
    pub traffic: String,
    /// Messages the subscriber intends to transmit this cycle.
    pub messages: u32,
}

impl SubscriberDraft {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        traffic: impl Into<String>,
        messages: u32,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            traffic: traffic.into(),
            messages,
        }
    }
}

/// An admitted subscriber.
///
/// `assigned_channel` and `dropped` are written by channel allocation; both
/// reset whenever the station reallocates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    /// Roster-assigned id, starting at 1. Never reused within a roster
    /// lifetime.
    pub id: u32,
    pub name: String,
    pub phone: String,
    pub traffic: String,
    pub messages: u32,
    /// Zero-based channel index, `None` until placed or after a drop.
    pub assigned_channel: Option<u32>,
    /// Set when allocation could not place this subscriber anywhere.
    pub dropped: bool,
}

impl Subscriber {
    /// Builds the admitted record from a validated draft.
    pub fn from_draft(id: u32, draft: SubscriberDraft) -> Self {
        Self {
            id,
            name: draft.name,
            phone: draft.phone,
            traffic: draft.traffic,
            messages: draft.messages,
            assigned_channel: None,
            dropped: false,
        }
    }

    /// Service class of the declared traffic, if recognizable.
    pub fn traffic_class(&self) -> Option<TrafficClass> {
        TrafficClass::classify(&self.traffic)
    }

    /// True once allocation has placed this subscriber on a channel.
    pub fn is_connected(&self) -> bool {
        self.assigned_channel.is_some() && !self.dropped
    }
}
