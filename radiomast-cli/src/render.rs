//! Plain-text rendering of station reports.
//!
//! Every section is returned as a `String` ending in a newline, so callers
//! control spacing between blocks. No colors or cursor control; output is
//! meant to read the same in a terminal and in captured logs.

use radiomast_core::subscriber::Subscriber;
use radiomast_engine::{RunReport, StationStatus};
use radiomast_sizing::SignalQuality;
use radiomast_tower::SpectrumSnapshot;

const BAR_CELLS: usize = 20;

/// Channel-by-channel allocation map: one row per channel, one bracket per
/// slot, occupied slots showing the subscriber id.
pub fn spectrum_map(snapshot: &SpectrumSnapshot) -> String {
    let mut out = String::from("--- SPECTRUM ALLOCATION MAP ---\n");
    if snapshot.generation.is_none() {
        out.push_str("System Offline\n");
        return out;
    }

    let capacity = snapshot.per_channel_capacity as usize;
    for (index, slot) in snapshot.channels.iter().enumerate() {
        out.push_str(&format!(" CH {:>2} |", index + 1));
        for id in slot {
            out.push_str(&format!("[U{id:>3}]"));
        }
        for _ in 0..capacity.saturating_sub(slot.len()) {
            out.push_str("[ ... ]");
        }
        out.push('\n');
    }
    out.push_str(&"-".repeat(31));
    out.push('\n');
    out
}

/// Per-subscriber message volume as block bars, scaled to the busiest
/// subscriber. Empty when nothing would transmit.
pub fn traffic_bars(outcomes: &[Subscriber]) -> String {
    let connected: Vec<&Subscriber> = outcomes.iter().filter(|s| !s.dropped).collect();
    let planned: u64 = connected.iter().map(|s| u64::from(s.messages)).sum();
    if planned == 0 {
        return String::new();
    }

    let max_messages = connected
        .iter()
        .map(|s| s.messages)
        .max()
        .unwrap_or_default();

    let mut out = String::from("--- TRAFFIC DISTRIBUTION ANALYTICS ---\n");
    for subscriber in connected {
        let pct = f64::from(subscriber.messages) / f64::from(max_messages);
        let filled = (pct * BAR_CELLS as f64) as usize;

        out.push_str(&format!("User {:>3} |", subscriber.id));
        for _ in 0..filled {
            out.push('\u{2588}');
        }
        for _ in filled..BAR_CELLS {
            out.push('\u{2591}');
        }
        out.push_str(&format!(" ({}%)\n", (pct * 100.0) as u32));
    }
    out
}

/// The control-center status panel: link state, radio parameters, load and
/// latency, connectivity split.
pub fn status_panel(status: &StationStatus) -> String {
    let heavy = "=".repeat(63);
    let light = "-".repeat(63);
    let mut out = String::new();

    out.push_str(&format!("{heavy}\n"));
    out.push_str("             CELLULAR NETWORK CONTROL CENTER\n");
    out.push_str(&format!("{heavy}\n"));
    out.push_str(&format!(" SYSTEM STATUS : {}\n", status.state));
    out.push_str(&format!(
        " TECHNOLOGY    : {} | {} MHz | {}x MIMO\n",
        status.technology, status.bandwidth_mhz, status.antennas
    ));
    out.push_str(&format!("{light}\n"));
    out.push_str(" NETWORK METRICS\n");
    out.push_str(&format!(
        " [LOAD] {:.1}% Utilized   [LATENCY] {:.1} ms (est)\n",
        status.load_pct, status.latency_ms
    ));
    out.push_str(&format!("{light}\n"));
    out.push_str(" CONNECTIVITY\n");
    out.push_str(&format!(
        " Active Users  : {:>4} / {:>4}\n",
        status.active_subscribers, status.total_capacity
    ));
    out.push_str(&format!(
        " Traffic Type  : {:>4} Data  | {:>4} Voice\n",
        status.data_subscribers, status.voice_subscribers
    ));
    out.push_str(&format!("{heavy}\n"));
    out
}

/// Totals of one cycle: traffic, overhead, core count, latency, revenue.
pub fn analytics_block(report: &RunReport) -> String {
    let rule = "-".repeat(42);
    let mut out = String::new();

    out.push_str(&format!("{rule}\n"));
    out.push_str(" ANALYTICS & BILLING REPORT\n");
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        " Total Messages Processed : {}\n",
        report.planned_messages
    ));
    out.push_str(&format!(
        " Network Overhead         : {} msgs\n",
        report.overhead_messages
    ));
    out.push_str(&format!(
        " Total Traffic Load       : {} msgs\n",
        report.total_traffic
    ));
    out.push_str(&format!(
        " Cellular Cores Active    : {}\n",
        report.cores_needed
    ));
    out.push_str(&format!(
        " Avg Network Latency      : {:.1} ms\n",
        report.latency_ms
    ));
    out.push_str(&format!(
        " Revenue Generated        : ${:.2} (@ ${:.2}/msg)\n",
        report.projected_revenue, report.tariff_per_message
    ));
    out.push_str(&format!("{rule}\n"));
    out
}

/// Roster listing with the synthetic signal-quality column.
pub fn subscriber_table(outcomes: &[Subscriber]) -> String {
    let rule = "-".repeat(72);
    let mut out = String::from("--- CURRENT CONNECTED USERS ---\n");
    out.push_str(&format!(
        "{:<5}{:<15}{:<15}{:<10}{:<10}{}\n",
        "ID", "Name", "Phone", "Type", "Msgs", "Signal Quality"
    ));
    out.push_str(&format!("{rule}\n"));

    if outcomes.is_empty() {
        out.push_str("(No users connected)\n");
        return out;
    }

    for subscriber in outcomes {
        out.push_str(&format!(
            "{:<5}{:<15}{:<15}{:<10}{:<10}{}\n",
            subscriber.id,
            subscriber.name,
            subscriber.phone,
            subscriber.traffic,
            subscriber.messages,
            SignalQuality::for_subscriber(subscriber.id)
        ));
    }
    out.push_str(&format!("{rule}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use radiomast_core::subscriber::SubscriberDraft;
    use radiomast_core::technology::Generation;
    use radiomast_engine::LinkState;
    use radiomast_tower::PlacementStrategy;

    fn subscriber(id: u32, messages: u32) -> Subscriber {
        let mut s = Subscriber::from_draft(
            id,
            SubscriberDraft::new("Alice", "5550100", "data", messages),
        );
        s.assigned_channel = Some(1);
        s
    }

    fn snapshot() -> SpectrumSnapshot {
        SpectrumSnapshot {
            generation: Some(Generation::Lte),
            bandwidth_mhz: 1.0,
            antennas: 1,
            per_channel_capacity: 2,
            channels: vec![vec![1], vec![]],
        }
    }

    #[test]
    fn spectrum_map_draws_occupied_and_empty_slots() {
        let map = spectrum_map(&snapshot());
        assert!(map.contains(" CH  1 |[U  1][ ... ]"));
        assert!(map.contains(" CH  2 |[ ... ][ ... ]"));
        assert!(map.starts_with("--- SPECTRUM ALLOCATION MAP ---\n"));
    }

    #[test]
    fn spectrum_map_reports_offline_without_technology() {
        let mut snap = snapshot();
        snap.generation = None;
        assert!(spectrum_map(&snap).contains("System Offline"));
    }

    #[test]
    fn traffic_bars_scale_to_busiest_subscriber() {
        let outcomes = vec![subscriber(1, 10), subscriber(2, 5)];
        let bars = traffic_bars(&outcomes);

        let full: String = "\u{2588}".repeat(20);
        let half: String = format!("{}{}", "\u{2588}".repeat(10), "\u{2591}".repeat(10));
        assert!(bars.contains(&format!("User   1 |{full} (100%)")));
        assert!(bars.contains(&format!("User   2 |{half} (50%)")));
    }

    #[test]
    fn traffic_bars_skip_dropped_and_empty_rosters() {
        let mut dropped = subscriber(1, 10);
        dropped.dropped = true;
        dropped.assigned_channel = None;

        let bars = traffic_bars(&[dropped]);
        assert!(bars.is_empty());
    }

    #[test]
    fn status_panel_shows_link_state_and_split() {
        let status = StationStatus {
            state: LinkState::Online,
            technology: Generation::Lte,
            bandwidth_mhz: 1.0,
            antennas: 4,
            active_subscribers: 1,
            total_capacity: 12_000,
            data_subscribers: 1,
            voice_subscribers: 0,
            load_pct: 0.008,
            latency_ms: 30.0,
        };

        let panel = status_panel(&status);
        assert!(panel.contains(" SYSTEM STATUS : ONLINE"));
        assert!(panel.contains(" TECHNOLOGY    : 4G | 1 MHz | 4x MIMO"));
        assert!(panel.contains(" [LOAD] 0.0% Utilized   [LATENCY] 30.0 ms (est)"));
        assert!(panel.contains(" Active Users  :    1 / 12000"));
        assert!(panel.contains(" Traffic Type  :    1 Data  |    0 Voice"));
    }

    #[test]
    fn analytics_block_lists_cycle_totals() {
        let report = RunReport {
            generated_at: chrono::Utc::now(),
            technology: Generation::Lte,
            strategy: PlacementStrategy::BestFit,
            bandwidth_mhz: 1.0,
            antennas: 4,
            total_capacity: 12_000,
            connected: 2,
            dropped: 0,
            data_subscribers: 2,
            voice_subscribers: 0,
            planned_messages: 17,
            delivered_messages: 17,
            disturbed_messages: 0,
            overhead_messages: 10,
            total_traffic: 27,
            cores_needed: 1,
            load_pct: 0.02,
            latency_ms: 30.0,
            tariff_per_message: 0.03,
            projected_revenue: 0.51,
            spectrum_digest: String::new(),
            spectrum: snapshot(),
            outcomes: Vec::new(),
        };

        let block = analytics_block(&report);
        assert!(block.contains(" Total Messages Processed : 17"));
        assert!(block.contains(" Network Overhead         : 10 msgs"));
        assert!(block.contains(" Total Traffic Load       : 27 msgs"));
        assert!(block.contains(" Cellular Cores Active    : 1"));
        assert!(block.contains(" Revenue Generated        : $0.51 (@ $0.03/msg)"));
    }

    #[test]
    fn subscriber_table_includes_signal_grade() {
        let table = subscriber_table(&[subscriber(1, 8)]);
        // id 1 folds to score 17, a Poor grade.
        assert!(table.contains("Poor (-115dBm)"));
        assert!(table.contains("1    Alice          5550100        data      8"));
    }

    #[test]
    fn subscriber_table_handles_empty_roster() {
        assert!(subscriber_table(&[]).contains("(No users connected)"));
    }
}
