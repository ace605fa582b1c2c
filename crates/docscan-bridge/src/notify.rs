// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Notifier implementations shared by every platform.

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::traits::Notifier;

/// Writes every message to the log. Used headless and as a fallback.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, message: &str) {
        info!(target: "docscan::toast", "{message}");
    }
}

/// Forwards messages to a UI task over an unbounded channel.
///
/// Sending never blocks; once the receiver is gone messages are dropped.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<String>,
}

impl ChannelNotifier {
    /// Create a notifier and the receiving end the UI drains.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, message: &str) {
        info!(target: "docscan::toast", "{message}");
        if self.tx.send(message.to_owned()).is_err() {
            debug!("toast receiver closed, message dropped");
        }
    }
}
