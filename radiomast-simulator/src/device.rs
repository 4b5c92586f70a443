//! ## radiomast-simulator::device
//! **One transmitting subscriber**
//!
//! A device emits a bounded sequence of message events, pacing itself
//! between messages and consulting its interference model per message. It
//! carries no allocation authority: the channel it reports is the one the
//! allocation pass assigned, read once at construction.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::interference::InterferenceModel;
use crate::pacing::Pacer;
use crate::sink::TransmissionEvent;

pub struct UserDevice {
    id: u32,
    channel: u32,
    messages: u32,
    pacer: Box<dyn Pacer>,
    interference: Box<dyn InterferenceModel>,
}

impl UserDevice {
    pub fn new(
        id: u32,
        channel: u32,
        messages: u32,
        pacer: Box<dyn Pacer>,
        interference: Box<dyn InterferenceModel>,
    ) -> Self {
        Self {
            id,
            channel,
            messages,
            pacer,
            interference,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn messages(&self) -> u32 {
        self.messages
    }

    /// Transmits the full message sequence, one event per message.
    ///
    /// Returns early when the terminate flag is raised or the consumer went
    /// away; both are cooperative stops, not errors.
    pub async fn run(mut self, sink: mpsc::Sender<TransmissionEvent>, terminate: Arc<AtomicBool>) {
        for seq in 1..=self.messages {
            if terminate.load(Ordering::SeqCst) {
                break;
            }
            let delay = self.pacer.next_delay();
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            let event = TransmissionEvent {
                subscriber: self.id,
                channel: self.channel,
                seq,
                total: self.messages,
                disturbed: self.interference.disturbs(),
            };
            if sink.send(event).await.is_err() {
                break;
            }
        }
    }
}
