//! Local session persistence
//!
//! All sessions live in one JSON file under the platform data directory.
//! The store keeps every session in memory and rewrites the file on save;
//! transcripts are small enough that this is never the bottleneck.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Title given to a session before its first user message
const UNTITLED: &str = "New chat";

/// Session titles derived from the first message are cut at this length
const TITLE_MAX_CHARS: usize = 40;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed session file: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("no data directory available")]
    NoDataDir,
}

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

/// One stored chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub author: Author,
    pub text: String,
    pub sent_at: DateTime<Utc>,
}

impl StoredMessage {
    pub fn new(author: Author, text: impl Into<String>) -> Self {
        Self {
            author,
            text: text.into(),
            sent_at: Utc::now(),
        }
    }
}

/// One conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<StoredMessage>,
}

impl Session {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            title: UNTITLED.to_string(),
            created_at: Utc::now(),
            messages: Vec::new(),
        }
    }

    /// Adopt the first user message as the session title
    pub fn title_from(&mut self, text: &str) {
        if self.title != UNTITLED {
            return;
        }
        let title: String = text.chars().take(TITLE_MAX_CHARS).collect();
        if !title.is_empty() {
            self.title = title;
        }
    }
}

/// JSON-backed store for all sessions
///
/// The store always holds at least one session; the last one is current.
pub struct SessionStore {
    path: PathBuf,
    sessions: Vec<Session>,
}

impl SessionStore {
    /// Open the store at the default platform location
    pub fn open() -> Result<Self, StoreError> {
        let dir = dirs::data_dir().ok_or(StoreError::NoDataDir)?.join("chatmark");
        fs::create_dir_all(&dir)?;
        Self::open_at(dir.join("sessions.json"))
    }

    /// Open a store backed by a specific file
    pub fn open_at(path: PathBuf) -> Result<Self, StoreError> {
        let mut sessions: Vec<Session> = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        if sessions.is_empty() {
            sessions.push(Session::new());
        }

        Ok(Self { path, sessions })
    }

    pub fn current(&self) -> &Session {
        &self.sessions[self.sessions.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Session {
        let last = self.sessions.len() - 1;
        &mut self.sessions[last]
    }

    /// Write the whole store back to disk
    pub fn save(&self) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(&self.sessions)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_store_starts_with_one_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::open_at(dir.path().join("sessions.json")).unwrap();

        assert_eq!(store.current().title, UNTITLED);
        assert!(store.current().messages.is_empty());
    }

    #[test]
    fn test_messages_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sessions.json");

        {
            let mut store = SessionStore::open_at(path.clone()).unwrap();
            let session = store.current_mut();
            session.title_from("What is Rust?");
            session
                .messages
                .push(StoredMessage::new(Author::User, "What is Rust?"));
            session
                .messages
                .push(StoredMessage::new(Author::Assistant, "A language."));
            store.save().unwrap();
        }

        let reopened = SessionStore::open_at(path).unwrap();
        let session = reopened.current();
        assert_eq!(session.title, "What is Rust?");
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].author, Author::User);
        assert_eq!(session.messages[1].author, Author::Assistant);
        assert_eq!(session.messages[1].text, "A language.");
    }

    #[test]
    fn test_title_is_set_once_and_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = SessionStore::open_at(dir.path().join("sessions.json")).unwrap();

        let long = "x".repeat(100);
        store.current_mut().title_from(&long);
        assert_eq!(store.current().title.chars().count(), TITLE_MAX_CHARS);

        store.current_mut().title_from("second message");
        assert!(store.current().title.starts_with('x'));
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SessionStore::open_at(dir.path().join("nope.json")).is_ok());
    }
}
