//! Terminal front end.
//!
//! Reads commands line by line and renders every screen through the active
//! locale. Assistant turns arrive asynchronously on the session's event
//! channel and are printed as soon as they are appended.

mod command;
mod view;

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, warn};

use crate::auth::{AuthError, AuthService, ChatAccess, Profile, Session, chat_access};
use crate::chat::{ChatSession, Message, PendingReply, SessionState, SubmitError};
use crate::hospitals::{HospitalDirectory, render_card};
use crate::i18n::{Locale, LocaleStore, Subscription};

pub use command::Command;

/// Result limits for the hospital finder.
#[derive(Debug, Clone, Copy)]
pub struct HospitalLimits {
    pub search: usize,
    pub initial: usize,
}

/// Whether the loop keeps reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive console bound to one output stream.
pub struct Console<W> {
    locale: LocaleStore,
    chat: ChatSession,
    auth: AuthService,
    hospitals: Arc<dyn HospitalDirectory>,
    limits: HospitalLimits,
    out: W,
    language_changes: mpsc::UnboundedReceiver<Locale>,
    subscription: Subscription,
    /// Replies not yet delivered; cancelled on sign-out.
    pending: Vec<PendingReply>,
}

impl<W: AsyncWrite + Unpin> Console<W> {
    pub fn new(
        locale: LocaleStore,
        chat: ChatSession,
        auth: AuthService,
        hospitals: Arc<dyn HospitalDirectory>,
        limits: HospitalLimits,
        out: W,
    ) -> Self {
        let (tx, language_changes) = mpsc::unbounded_channel();
        let subscription = locale.subscribe(move |locale| {
            // Receiver is gone only after the console is dropped.
            let _ = tx.send(locale);
        });

        Self {
            locale,
            chat,
            auth,
            hospitals,
            limits,
            out,
            language_changes,
            subscription,
            pending: Vec::new(),
        }
    }

    /// Run until `/quit`, end of input or Ctrl-C.
    ///
    /// # Errors
    /// Returns error only if reading input or writing output fails.
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        let mut lines = input.lines();
        let mut events = self.chat.subscribe();
        let mut sessions = self.auth.on_session_change();
        let mut signed_in = sessions.borrow().as_ref().map(|s| s.user_id.clone());

        let banner = format!("{}\n{}\n", view::home(&self.locale), self.locale.t("console.help"));
        self.write(&banner).await?;

        loop {
            tokio::select! {
                biased;

                Ok(()) = sessions.changed() => {
                    let current = sessions.borrow_and_update().as_ref().map(|s| s.user_id.clone());
                    // A conversation belongs to one signed-in user.
                    if current != signed_in {
                        debug!("Session user changed, ending chat");
                        self.cancel_pending();
                        self.chat.end();
                        signed_in = current;
                    }
                }

                Some(locale) = self.language_changes.recv() => {
                    let text = format!(
                        "{} {} ({})\n",
                        self.locale.t("console.lang.changed"),
                        locale.native_name(),
                        locale.code()
                    );
                    self.write(&text).await?;
                }

                event = events.recv() => match event {
                    Ok(message) => self.show_message(&message).await?,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Console fell behind, {} chat messages not shown", skipped);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },

                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("Input closed");
                        // Piped questions still get their answers.
                        self.settle_pending().await;
                        while let Ok(message) = events.try_recv() {
                            self.show_message(&message).await?;
                        }
                        break;
                    };
                    let Some(command) = Command::parse(&line) else {
                        continue;
                    };
                    if self.handle(command).await? == Flow::Quit {
                        break;
                    }
                }

                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                    break;
                }
            }
        }

        if self.chat.state() == SessionState::AwaitingReply {
            debug!("Leaving with {} replies undelivered", self.chat.pending_replies());
        }
        let goodbye = format!("{}\n", self.locale.t("console.goodbye"));
        self.write(&goodbye).await?;
        Ok(())
    }

    async fn handle(&mut self, command: Command) -> Result<Flow> {
        debug!("Handling {:?}", command);
        match command {
            Command::Help => self.say_key("console.help").await?,
            Command::Home => {
                let text = view::home(&self.locale);
                self.write(&text).await?;
            }
            Command::Features => {
                let text = view::features(&self.locale);
                self.write(&text).await?;
            }
            Command::Chat => self.open_chat().await?,
            Command::Say(text) => self.send_chat(&text).await?,
            Command::Hospitals(term) => self.find_hospitals(term.as_deref()).await?,
            Command::Lang(None) => {
                let text = view::languages(&self.locale);
                self.write(&text).await?;
            }
            Command::Lang(Some(code)) => {
                if self.locale.set_active_code(&code).is_none() {
                    let text = format!(
                        "{} {}\n",
                        self.locale.t("console.lang.invalid"),
                        Locale::available_codes()
                    );
                    self.write(&text).await?;
                }
            }
            Command::Login { email, password } => {
                let result = self.auth.sign_in_with_password(&email, &password).await;
                self.after_auth(result, "console.auth.welcome").await?;
            }
            Command::Signup {
                email,
                password,
                language,
                full_name,
            } => {
                let profile = Profile {
                    full_name,
                    preferred_language: language.unwrap_or_else(|| self.locale.get_active()),
                };
                let result = self.auth.sign_up(&email, &password, profile).await;
                self.after_auth(result, "console.auth.created").await?;
            }
            Command::Logout => {
                self.auth.sign_out();
                self.say_key("console.auth.logged_out").await?;
            }
            Command::Quit => return Ok(Flow::Quit),
            Command::Usage(key) => self.say_key(key).await?,
            Command::Unknown(name) => {
                debug!("Unknown command {}", name);
                self.say_key("console.unknown_command").await?;
            }
        }
        Ok(Flow::Continue)
    }

    /// Show the chat view, greeting on an empty conversation.
    async fn open_chat(&mut self) -> Result<()> {
        match chat_access(self.auth.current_session()) {
            ChatAccess::Granted(session) => {
                debug!("Chat opened for {}", session.user_id);
                let title = format!("{}\n", self.locale.t("chat.title"));
                self.write(&title).await?;
                if self.chat.greet().is_none() {
                    let history: String = self
                        .chat
                        .messages()
                        .iter()
                        .map(|message| view::message(message, &self.locale))
                        .collect();
                    self.write(&history).await?;
                }
            }
            ChatAccess::RedirectToSignIn => self.say_key("console.auth.required").await?,
        }
        Ok(())
    }

    async fn send_chat(&mut self, text: &str) -> Result<()> {
        let ChatAccess::Granted(_) = chat_access(self.auth.current_session()) else {
            return self.say_key("console.auth.required").await;
        };

        self.chat.greet();
        match self.chat.submit(text) {
            Ok(reply) => {
                debug!("Awaiting reply to {}", reply.user_message().id);
                self.pending.retain(|p| !p.is_finished());
                self.pending.push(reply);
            }
            Err(SubmitError::EmptyInput) => {}
        }
        Ok(())
    }

    /// Wait until every tracked reply has landed or been dropped.
    async fn settle_pending(&mut self) {
        for reply in std::mem::take(&mut self.pending) {
            if reply.wait().await.is_none() {
                debug!("Reply was discarded before delivery");
            }
        }
    }

    fn cancel_pending(&mut self) {
        for reply in self.pending.drain(..) {
            reply.cancel();
        }
    }

    async fn find_hospitals(&mut self, term: Option<&str>) -> Result<()> {
        let result = match term {
            Some(term) => self.hospitals.search(term, self.limits.search).await,
            None => {
                let header = format!(
                    "{}\n{}\n",
                    self.locale.t("hospital.title"),
                    self.locale.t("console.hospital.hint")
                );
                self.write(&header).await?;
                self.hospitals.list(self.limits.initial).await
            }
        };

        let hospitals = match result {
            Ok(hospitals) => hospitals,
            Err(e) => {
                warn!("Hospital lookup failed: {}", e);
                let text = view::alert(&self.locale, &e);
                return self.write(&text).await;
            }
        };

        if hospitals.is_empty() {
            return self.say_key("hospital.no.results").await;
        }

        let mut text = String::new();
        if term.is_some() {
            text.push_str(&format!(
                "{} {}\n",
                hospitals.len(),
                self.locale.t("console.hospital.count")
            ));
        }
        for hospital in &hospitals {
            text.push_str(&render_card(hospital, &self.locale));
            text.push('\n');
        }
        self.write(&text).await
    }

    async fn after_auth(
        &mut self,
        result: Result<Session, AuthError>,
        success_key: &str,
    ) -> Result<()> {
        match result {
            Ok(session) => {
                info!("Signed in as {}", session.user_id);
                self.locale.set_active(session.preferred_language);
                let text = format!(
                    "{} ({})\n",
                    self.locale.t(success_key),
                    session.display_name()
                );
                self.write(&text).await
            }
            Err(AuthError::Validation(errors)) => {
                let mut text = String::new();
                for key in errors.keys() {
                    text.push_str(&format!("- {}\n", self.locale.t(key)));
                }
                self.write(&text).await
            }
            Err(e) => {
                warn!("Authentication failed: {}", e);
                let text = view::alert(&self.locale, &e);
                self.write(&text).await
            }
        }
    }

    async fn show_message(&mut self, message: &Message) -> Result<()> {
        // The user's own line is already on screen.
        if message.is_user() {
            return Ok(());
        }
        let text = view::message(message, &self.locale);
        self.write(&text).await
    }

    async fn say_key(&mut self, key: &str) -> Result<()> {
        let text = format!("{}\n", self.locale.t(key));
        self.write(&text).await
    }

    async fn write(&mut self, text: &str) -> Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }
}

impl<W> Drop for Console<W> {
    fn drop(&mut self) {
        self.locale.unsubscribe(self.subscription);
    }
}
