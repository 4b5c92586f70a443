//! ## radiomast-sizing::sizer
//! **Message overhead and processing-core arithmetic**
//!
//! Overhead is charged in whole 100-message blocks: a partial block still
//! incurs a full overhead unit. Core count is a ceiling over payload plus
//! overhead; zero payload needs zero cores.

use serde::{Deserialize, Serialize};

/// Converts aggregate message volume into overhead and core requirements.
///
/// Stateless apart from its two configuration constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreSizer {
    overhead_per_100: u32,
    core_capacity_msgs: u32,
}

impl Default for CoreSizer {
    fn default() -> Self {
        Self {
            overhead_per_100: Self::DEFAULT_OVERHEAD_PER_100,
            core_capacity_msgs: Self::DEFAULT_CORE_CAPACITY_MSGS,
        }
    }
}

impl CoreSizer {
    /// Overhead messages injected per started block of 100 payload messages.
    pub const DEFAULT_OVERHEAD_PER_100: u32 = 10;
    /// Messages one processing core absorbs.
    pub const DEFAULT_CORE_CAPACITY_MSGS: u32 = 500;

    pub fn new(overhead_per_100: u32, core_capacity_msgs: u32) -> Self {
        Self {
            overhead_per_100,
            core_capacity_msgs,
        }
    }

    pub fn overhead_per_100(&self) -> u32 {
        self.overhead_per_100
    }

    pub fn core_capacity_msgs(&self) -> u32 {
        self.core_capacity_msgs
    }

    /// Protocol overhead for the given payload volume, charged per started
    /// 100-block.
    pub fn overhead_for(&self, messages: u64) -> u64 {
        messages.div_ceil(100) * u64::from(self.overhead_per_100)
    }

    /// Processing cores required for payload plus overhead. Zero messages
    /// need zero cores; a zero core capacity is clamped to 1.
    pub fn cores_needed(&self, messages: u64) -> u64 {
        if messages == 0 {
            return 0;
        }
        let total = messages + self.overhead_for(messages);
        total.div_ceil(u64::from(self.core_capacity_msgs).max(1))
    }
}
