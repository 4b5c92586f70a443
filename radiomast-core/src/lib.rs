//! # radiomast-core
//!
//! Foundation layer for the radiomast base-station capacity planner.
//! Holds the pieces every other crate builds on: the per-generation radio
//! technology profiles, the subscriber model, and the admission gate that
//! decides whether a registration request may enter the roster.
//!
//! ### Key Submodules:
//! - `technology`: closed set of generation profiles (2G..5G) with channel
//!   arithmetic and the per-generation usage-validation law
//! - `subscriber`: subscriber records and traffic classification
//! - `admission`: name/phone/capacity/usage gate and the owned roster
//!
//! Nothing in this crate performs I/O or holds locks; the allocation engine
//! and the simulation runtime live in their own crates.

pub mod admission;
pub mod subscriber;
pub mod technology;

pub mod prelude {
    pub use crate::admission::*;
    pub use crate::subscriber::*;
    pub use crate::technology::*;
}

pub use admission::{AdmissionError, Roster};
pub use subscriber::{Subscriber, SubscriberDraft, TrafficClass};
pub use technology::{Generation, UnknownTechnology, UsageError};
