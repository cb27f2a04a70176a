//! Test doubles shared by service tests

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use slack_status_domain::{CredentialDocument, ListenerTls, Result, SlackStatusError};

use crate::auth::ports::{CallbackListener, OperatorPrompt, TokenExchanger};
use crate::auth::AuthorizationSession;
use crate::credentials::ports::DocumentStore;
use crate::status::ports::StatusClient;

#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<Option<CredentialDocument>>,
    fail_load: bool,
}

impl MemoryStore {
    pub fn failing_load() -> Self {
        Self { fail_load: true, ..Self::default() }
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Option<CredentialDocument>> {
        if self.fail_load {
            return Err(SlackStatusError::ConfigIo("malformed document".into()));
        }
        Ok(self.document.lock().clone())
    }

    fn save(&self, document: &CredentialDocument) -> Result<()> {
        *self.document.lock() = Some(document.clone());
        Ok(())
    }
}

pub struct StubListener {
    code: String,
    calls: AtomicUsize,
}

impl StubListener {
    pub fn returning(code: &str) -> Self {
        Self { code: code.to_string(), calls: AtomicUsize::new(0) }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CallbackListener for StubListener {
    async fn listen_for_code(&self, _: &str, _: &str, _: &ListenerTls) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.code.clone())
    }
}

pub struct StubExchanger;

#[async_trait]
impl TokenExchanger for StubExchanger {
    async fn exchange(&self, _: &AuthorizationSession, code: &str) -> Result<String> {
        Ok(format!("xoxp-{code}"))
    }
}

pub struct SilentPrompt;

impl OperatorPrompt for SilentPrompt {
    fn present(&self, _: &str, _: &ListenerTls) {}
}

/// Records every call as a readable line.
#[derive(Default)]
pub struct RecordingStatusClient {
    team: String,
    pub calls: Mutex<Vec<String>>,
    end_snooze_error: Option<SlackStatusError>,
}

impl RecordingStatusClient {
    pub fn with_team(team: &str) -> Self {
        Self { team: team.to_string(), ..Self::default() }
    }

    pub fn failing_end_snooze(err: SlackStatusError) -> Self {
        Self { end_snooze_error: Some(err), ..Self::default() }
    }
}

#[async_trait]
impl StatusClient for RecordingStatusClient {
    async fn team_domain(&self, token: &str) -> Result<String> {
        self.calls.lock().push(format!("team_domain {token}"));
        Ok(self.team.clone())
    }

    async fn set_status(&self, token: &str, text: &str, emoji: &str, expiration: i64) -> Result<()> {
        self.calls.lock().push(format!("set_status {token} {text:?} {emoji:?} {expiration}"));
        Ok(())
    }

    async fn set_snooze(&self, token: &str, minutes: u64) -> Result<()> {
        self.calls.lock().push(format!("set_snooze {token} {minutes}"));
        Ok(())
    }

    async fn end_snooze(&self, token: &str) -> Result<()> {
        self.calls.lock().push(format!("end_snooze {token}"));
        self.end_snooze_error.clone().map_or(Ok(()), Err)
    }
}
