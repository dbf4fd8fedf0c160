//! # Events Module
//!
//! Event-driven progress reporting for the pairing engine.
//!
//! Core functions take an [`EventSender`] and emit events at phase boundaries
//! and at per-file granularity; the CLI consumes them on a separate thread to
//! drive its progress bars. Use [`null_sender`] when no one is listening.

use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// All events emitted by the pairing engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    /// Tag extraction events
    Extract(ExtractEvent),
    /// Pairwise tag comparison events
    Compare(CompareEvent),
    /// Metric matching events
    Match(MatchEvent),
}

/// Events while extracting EXIF tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ExtractEvent {
    /// Extraction has started
    Started { total_files: usize },
    /// Progress update during extraction
    Progress(ExtractProgress),
    /// Extraction completed
    Completed { total_extracted: usize },
}

/// Progress information during extraction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractProgress {
    /// Number of files extracted so far
    pub completed: usize,
    /// Total number of files to extract
    pub total: usize,
    /// File currently being read
    pub current_path: PathBuf,
}

/// Events while comparing tags pair by pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CompareEvent {
    /// Comparison has started
    Started { total_pairs: usize },
    /// A pair was compared
    PairCompared { completed: usize, total: usize },
    /// Comparison completed
    Completed { identical: usize, different: usize },
}

/// Events while matching the radiometric population against the RGB one
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MatchEvent {
    /// Matching has started
    Started {
        radiometric: usize,
        rgb: usize,
    },
    /// Matching completed
    Completed { matched: usize, unmatched: usize },
}

/// Sends events from the core library.
///
/// A thin wrapper around crossbeam's Sender that can be cloned
/// and sent across threads.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Send an event.
    ///
    /// If the receiver is dropped, the event is silently discarded; progress
    /// reporting is always optional.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Receives events from the core library.
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event is received
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Try to receive an event without blocking
    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Returns an iterator over received events
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }
}

/// Factory for event channels between the engine and a UI layer.
pub struct EventChannel;

impl EventChannel {
    /// Create a new unbounded event channel.
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }

    /// Create a bounded event channel with the specified capacity,
    /// for consumers that need backpressure.
    pub fn bounded(capacity: usize) -> (EventSender, EventReceiver) {
        let (sender, receiver) = bounded(capacity);
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// A no-op event sender for when you don't need progress reporting.
pub fn null_sender() -> EventSender {
    let (sender, _receiver) = EventChannel::new();
    sender
}
