//! Inbound poller: repeats [`ChatController::fetch_new_messages`] on a tokio
//! interval until stopped.
//!
//! DESIGN
//! ======
//! Starting the poller performs the first fetch inline, so the caller sees
//! the initial load before `start` returns. Later ticks run in a spawned
//! task; each tick waits for the previous fetch to finish, and missed ticks
//! are delayed rather than bunched. Failed cycles are already logged by the
//! controller and are dropped here.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};

use crate::api::ChatApi;
use crate::controller::ChatController;
use crate::session::ChatSession;
use crate::types::{ConversationId, MessageId};
use crate::view::ChatView;

/// Shortest poll period; anything below is raised to this.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Stop handle for a running poller.
#[derive(Debug)]
pub struct PollerHandle {
    task: JoinHandle<()>,
}

impl PollerHandle {
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Cancel the poller and wait for its task to wind down. A fetch in
    /// flight is dropped.
    pub async fn stop(self) {
        self.task.abort();
        let _ = self.task.await;
        info!("chat poller stopped");
    }
}

/// Fetch once now, then every `every` in the background. Periods shorter
/// than [`MIN_POLL_INTERVAL`] are raised to it.
pub async fn start<A, V>(controller: Arc<ChatController<A, V>>, every: Duration) -> PollerHandle
where
    A: ChatApi + 'static,
    V: ChatView + 'static,
{
    let every = clamp_interval(every);
    let _ = controller.fetch_new_messages().await;

    let session = controller.session();
    info!(
        conversation_id = ?session.conversation_id(),
        last_seen_id = session.last_seen_id(),
        interval_ms = u64::try_from(every.as_millis()).unwrap_or(u64::MAX),
        "chat poller started"
    );

    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + every, every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let _ = controller.fetch_new_messages().await;
        }
    });

    PollerHandle { task }
}

fn clamp_interval(every: Duration) -> Duration {
    if every < MIN_POLL_INTERVAL {
        warn!(
            requested_ms = u64::try_from(every.as_millis()).unwrap_or(u64::MAX),
            "poll interval too short; using minimum"
        );
        return MIN_POLL_INTERVAL;
    }
    every
}

/// Set up a chat view: build the controller for the given session, load
/// what is already there, and keep polling every `every`.
pub async fn init_chat<A, V>(
    api: A,
    view: V,
    viewer_is_operator: bool,
    conversation_id: Option<ConversationId>,
    last_seen_id: MessageId,
    every: Duration,
) -> (Arc<ChatController<A, V>>, PollerHandle)
where
    A: ChatApi + 'static,
    V: ChatView + 'static,
{
    let session = ChatSession::new(conversation_id, last_seen_id);
    let controller = Arc::new(ChatController::new(api, view, session, viewer_is_operator));
    let handle = start(Arc::clone(&controller), every).await;
    (controller, handle)
}

#[cfg(test)]
#[path = "poller_test.rs"]
mod tests;
