//! One-shot timer that closes an animation cycle's settle window.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::animator::CycleId;
use crate::tea::Message;
use crate::olog_trace;

use super::ActorHandle;

pub struct SettleTimer {
    msg_tx: mpsc::UnboundedSender<Message>,
    cycle: CycleId,
    after: Duration,
}

impl SettleTimer {
    pub fn new(msg_tx: mpsc::UnboundedSender<Message>, cycle: CycleId, after: Duration) -> Self {
        Self {
            msg_tx,
            cycle,
            after,
        }
    }

    /// Arm the timer. Dropping the returned handle disarms it.
    pub fn spawn(self) -> ActorHandle {
        let cancel = CancellationToken::new();
        let cancel_clone = cancel.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = cancel_clone.cancelled() => {
                    olog_trace!("SettleTimer: cycle {} disarmed", self.cycle);
                }
                _ = tokio::time::sleep(self.after) => {
                    let _ = self.msg_tx.send(Message::Settled(self.cycle));
                }
            }
        });

        ActorHandle::new(cancel)
    }
}
