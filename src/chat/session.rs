//! Chat session orchestration.
//!
//! A session moves between [`SessionState::Idle`] and
//! [`SessionState::AwaitingReply`]. Submitting text appends the user turn
//! at once and schedules the assistant turn after a fixed pause. The reply
//! is computed when the pause ends, in whatever locale is active then.
//!
//! Several replies may be pending at the same time. They are independent
//! tasks and may complete in any order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

use super::{Message, MessageLog, ResponseSelector, Role, Topic};
use crate::i18n::LocaleStore;

/// Pause before the assistant answers.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_millis(1000);

/// Capacity of the message event channel.
const EVENT_CAPACITY: usize = 64;

/// Whether the session is waiting on an assistant turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingReply,
}

/// Rejected submissions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("message is empty")]
    EmptyInput,
}

struct SessionInner {
    log: Mutex<MessageLog>,
    locale: LocaleStore,
    selector: ResponseSelector,
    reply_delay: Duration,
    pending: AtomicUsize,
    /// Bumped by `end`; replies scheduled in an older epoch are dropped.
    epoch: AtomicU64,
    events: broadcast::Sender<Message>,
}

impl SessionInner {
    fn publish(&self, message: &Message) {
        // No receivers is fine; nobody is rendering.
        let _ = self.events.send(message.clone());
    }

    fn complete(&self, utterance: &str, epoch: u64) -> Option<Message> {
        let locale = self.locale.get_active();
        let reply = self.selector.select_reply(utterance, locale);

        let message = {
            let mut log = self.log.lock();
            if self.epoch.load(Ordering::SeqCst) != epoch {
                debug!("Dropping reply scheduled before the session ended");
                return None;
            }
            log.append(Role::Assistant, reply)
        };
        debug!("Assistant replied in {}", locale);
        self.publish(&message);
        Some(message)
    }
}

/// Decrements the pending count when the reply task finishes or is dropped.
struct PendingGuard(Arc<SessionInner>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.pending.fetch_sub(1, Ordering::SeqCst);
    }
}

/// A scheduled assistant reply.
#[derive(Debug)]
pub struct PendingReply {
    user_message: Message,
    handle: JoinHandle<Option<Message>>,
}

impl PendingReply {
    /// The user turn that triggered this reply.
    pub fn user_message(&self) -> &Message {
        &self.user_message
    }

    /// Abort the reply. A cancelled reply never appends anything.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the assistant turn. `None` if cancelled or discarded.
    pub async fn wait(self) -> Option<Message> {
        self.handle.await.ok().flatten()
    }
}

/// One chat view's conversation state.
#[derive(Clone)]
pub struct ChatSession {
    inner: Arc<SessionInner>,
}

impl ChatSession {
    pub fn new(locale: LocaleStore, selector: ResponseSelector, reply_delay: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(SessionInner {
                log: Mutex::new(MessageLog::new()),
                locale,
                selector,
                reply_delay,
                pending: AtomicUsize::new(0),
                epoch: AtomicU64::new(0),
                events,
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.inner.pending.load(Ordering::SeqCst) > 0 {
            SessionState::AwaitingReply
        } else {
            SessionState::Idle
        }
    }

    /// Number of replies still scheduled.
    pub fn pending_replies(&self) -> usize {
        self.inner.pending.load(Ordering::SeqCst)
    }

    /// Append the assistant greeting if the conversation has not started.
    pub fn greet(&self) -> Option<Message> {
        let greeting = self
            .inner
            .selector
            .reply_for(Topic::Default, self.inner.locale.get_active());

        let message = {
            let mut log = self.inner.log.lock();
            if !log.is_empty() {
                return None;
            }
            log.append(Role::Assistant, greeting)
        };
        self.inner.publish(&message);
        Some(message)
    }

    /// Submit user text.
    ///
    /// The user turn is visible in [`ChatSession::messages`] as soon as this
    /// returns; the assistant turn follows after the reply delay.
    ///
    /// # Errors
    /// Returns [`SubmitError::EmptyInput`] for blank or whitespace-only text.
    ///
    /// # Panics
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, text: &str) -> Result<PendingReply, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        let (user_message, epoch) = {
            let mut log = self.inner.log.lock();
            (log.append(Role::User, text), self.inner.epoch.load(Ordering::SeqCst))
        };
        self.inner.publish(&user_message);

        self.inner.pending.fetch_add(1, Ordering::SeqCst);
        let guard = PendingGuard(Arc::clone(&self.inner));
        let utterance = text.to_string();
        let delay = self.inner.reply_delay;

        let handle = tokio::spawn(async move {
            let guard = guard;
            tokio::time::sleep(delay).await;
            guard.0.complete(&utterance, epoch)
        });
        debug!("Scheduled reply to {} in {:?}", user_message.id, delay);

        Ok(PendingReply {
            user_message,
            handle,
        })
    }

    /// Snapshot of the conversation.
    pub fn messages(&self) -> Vec<Message> {
        self.inner.log.lock().list_all()
    }

    /// Receive every turn appended from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Message> {
        self.inner.events.subscribe()
    }

    /// End the session: clear the log and drop replies still in flight.
    pub fn end(&self) {
        let mut log = self.inner.log.lock();
        self.inner.epoch.fetch_add(1, Ordering::SeqCst);
        log.reset();
        debug!("Chat session ended");
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("messages", &self.inner.log.lock().len())
            .field("pending", &self.pending_replies())
            .field("reply_delay", &self.inner.reply_delay)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{Catalog, Locale};
    use crate::storage::MemoryStore;

    fn session() -> (ChatSession, LocaleStore) {
        let locale = LocaleStore::load(Arc::new(MemoryStore::new()));
        let session = ChatSession::new(locale.clone(), ResponseSelector::default(), DEFAULT_REPLY_DELAY);
        (session, locale)
    }

    fn text(locale: Locale, key: &str) -> String {
        Catalog::embedded().resolve(locale, key).to_string()
    }

    #[tokio::test(start_paused = true)]
    async fn test_submit_then_reply() {
        let (session, _) = session();
        let pending = session.submit("hello").unwrap();

        assert_eq!(session.state(), SessionState::AwaitingReply);
        let messages = session.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::User);
        assert_eq!(messages[0].content, "hello");

        let reply = pending.wait().await.unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert!(!reply.content.is_empty());

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[1], reply);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_waits_for_delay() {
        let (session, _) = session();
        let _pending = session.submit("fever").unwrap();

        tokio::time::sleep(DEFAULT_REPLY_DELAY / 2).await;
        assert_eq!(session.messages().len(), 1);

        tokio::time::sleep(DEFAULT_REPLY_DELAY).await;
        assert_eq!(session.messages().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_submission_rejected() {
        let (session, _) = session();
        assert_eq!(session.submit("   \n\t").unwrap_err(), SubmitError::EmptyInput);
        assert_eq!(session.submit("").unwrap_err(), SubmitError::EmptyInput);
        assert!(session.messages().is_empty());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_submissions_before_replies() {
        let (session, _) = session();
        let first = session.submit("first").unwrap();
        let second = session.submit("second").unwrap();
        assert_eq!(session.pending_replies(), 2);

        first.wait().await;
        second.wait().await;

        let messages = session.messages();
        assert_eq!(messages.len(), 4);
        let users: Vec<&str> = messages
            .iter()
            .filter(|m| m.is_user())
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(users, ["first", "second"]);
        assert_eq!(messages.iter().filter(|m| m.role == Role::Assistant).count(), 2);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reply_uses_locale_active_at_completion() {
        let (session, locale) = session();
        let pending = session.submit("I have a fever").unwrap();

        locale.set_active(Locale::Hi);
        let reply = pending.wait().await.unwrap();

        assert_eq!(reply.content, text(Locale::Hi, "reply.fever"));
        assert_ne!(reply.content, text(Locale::En, "reply.fever"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_reply_appends_nothing() {
        let (session, _) = session();
        let pending = session.submit("hospital").unwrap();
        pending.cancel();

        assert_eq!(pending.wait().await, None);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_end_discards_in_flight_replies() {
        let (session, _) = session();
        let pending = session.submit("hello").unwrap();
        session.end();

        assert_eq!(pending.wait().await, None);
        assert!(session.messages().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_greet_only_on_empty_log() {
        let (session, locale) = session();
        locale.set_active(Locale::Bn);

        let greeting = session.greet().unwrap();
        assert_eq!(greeting.content, text(Locale::Bn, "reply.default"));
        assert_eq!(session.greet(), None);
        assert_eq!(session.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_subscribers_see_every_turn() {
        let (session, _) = session();
        let mut events = session.subscribe();

        let pending = session.submit("hospital please").unwrap();
        pending.wait().await;

        let user = events.recv().await.unwrap();
        let assistant = events.recv().await.unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(assistant.content, text(Locale::En, "reply.hospital"));
    }
}
