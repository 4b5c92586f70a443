//! ## radiomast-config::plan
//! **The `key=value` deployment plan format**
//!
//! A plan is an ordered script, not a bag of settings: configuration lines
//! (`technology=`, `bandwidth_mhz=`, `antennas=`) take effect for the
//! subscriber lines that follow them, so a subscriber declared before a
//! technology switch is admitted under the old technology. The parser
//! preserves that order and leaves admission to the consumer.
//!
//! Failure policy follows the batch-ingestion contract: an unknown
//! technology token or a malformed numeric setting is fatal to the whole
//! plan, while a malformed subscriber line is logged, recorded, and
//! skipped.
//!
//! ```text
//! # station
//! technology=4G
//! bandwidth_mhz=1.0
//! antennas=4
//! user1=name:Alice,phone:12345,type:data,msg:8
//! user2=name:Bob,phone:55512,type:voice,msg:3
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use radiomast_core::subscriber::SubscriberDraft;
use radiomast_core::technology::{Generation, UnknownTechnology};

/// Errors that abort plan parsing entirely.
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("cannot read plan file {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    UnknownTechnology(#[from] UnknownTechnology),
    #[error("line {line}: invalid value for {key}: {value:?}")]
    InvalidValue {
        line: usize,
        key: String,
        value: String,
    },
}

/// One directive of a deployment plan, in file order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlanEntry {
    Technology(Generation),
    Bandwidth(f64),
    Antennas(u32),
    Subscriber(SubscriberDraft),
}

/// A subscriber line the parser rejected. Diagnostic only; parsing
/// continued past it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number in the plan source.
    pub line: usize,
    pub reason: String,
}

/// Parsed plan: the ordered directive script plus skipped-line diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentPlan {
    pub entries: Vec<PlanEntry>,
    pub skipped: Vec<SkippedLine>,
}

impl DeploymentPlan {
    /// Subscriber directives in the plan.
    pub fn subscriber_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e, PlanEntry::Subscriber(_)))
            .count()
    }
}

/// Reads and parses a plan file.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<DeploymentPlan, PlanError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| PlanError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_plan(&source)
}

/// Parses plan text.
///
/// Blank lines, `#` comments, and lines without `=` are ignored. Unknown
/// keys are ignored with a debug log so newer plan formats stay loadable.
pub fn parse_plan(source: &str) -> Result<DeploymentPlan, PlanError> {
    let mut plan = DeploymentPlan::default();

    for (index, raw) in source.lines().enumerate() {
        let number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        match key {
            "technology" => {
                let generation: Generation = value.parse()?;
                plan.entries.push(PlanEntry::Technology(generation));
            }
            "bandwidth_mhz" => {
                let bandwidth: f64 = value.parse().map_err(|_| PlanError::InvalidValue {
                    line: number,
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
                plan.entries.push(PlanEntry::Bandwidth(bandwidth));
            }
            "antennas" => {
                // Negative counts are tolerated and read as zero; capacity
                // math clamps zero up to one later.
                let antennas: i64 = value.parse().map_err(|_| PlanError::InvalidValue {
                    line: number,
                    key: key.to_string(),
                    value: value.to_string(),
                })?;
                plan.entries
                    .push(PlanEntry::Antennas(antennas.clamp(0, i64::from(u32::MAX)) as u32));
            }
            key if key.starts_with("user") => match parse_subscriber(value) {
                Ok(draft) => plan.entries.push(PlanEntry::Subscriber(draft)),
                Err(reason) => {
                    warn!(line = number, %reason, "skipping malformed subscriber line");
                    plan.skipped.push(SkippedLine {
                        line: number,
                        reason,
                    });
                }
            },
            other => {
                debug!(line = number, key = other, "ignoring unknown plan key");
            }
        }
    }

    Ok(plan)
}

/// Parses the `name:...,phone:...,type:...,msg:...` payload of a subscriber
/// line. Segments without a `:` are ignored; missing fields stay at their
/// empty defaults and are caught by admission later.
fn parse_subscriber(value: &str) -> Result<SubscriberDraft, String> {
    let mut draft = SubscriberDraft::new("", "", "", 0);
    for segment in value.split(',') {
        let Some((key, field)) = segment.split_once(':') else {
            continue;
        };
        let field = field.trim();
        match key.trim() {
            "name" => draft.name = field.to_string(),
            "phone" => draft.phone = field.to_string(),
            "type" => draft.traffic = field.to_string(),
            "msg" => {
                draft.messages = field
                    .parse()
                    .map_err(|_| format!("invalid message count {field:?}"))?;
            }
            _ => {}
        }
    }
    Ok(draft)
}
