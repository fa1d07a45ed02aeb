//! Core chat session management.
//!
//! This module provides the `ChatSession` struct which manages conversation
//! state, the authenticated user, and the profile context that rides along
//! with every message to the scheduling assistant.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{from_reader, to_writer_pretty};
use time::OffsetDateTime;

use crate::Wildcat;
use crate::error::Result;
use crate::types::{ChatRequest, UserProfile, UserResponse};

/// Reply substituted into the transcript when the assistant cannot be
/// reached, so the conversation stays coherent instead of ending on an error.
pub const FALLBACK_REPLY: &str =
    "Sorry, I couldn't reach the scheduling assistant. Please try again in a moment.";

/// Which side of the conversation a message belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// The student.
    User,

    /// The scheduling assistant.
    Assistant,
}

/// One message in the conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The side that produced the message.
    pub role: ChatRole,

    /// The message text.
    pub content: String,
}

impl ChatMessage {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// A chat session that manages conversation state and API interactions.
///
/// The session keeps the transcript, the authenticated user, and the stored
/// profile; the profile is folded into every outgoing [`ChatRequest`] so the
/// assistant sees the student's constraints without being retold each turn.
pub struct ChatSession {
    client: Wildcat,
    messages: Vec<ChatMessage>,
    user: Option<UserResponse>,
    profile: Option<UserProfile>,
    request_count: u64,
    fallback_count: u64,
}

/// Aggregated stats for a chat session.
#[derive(Debug, Clone)]
pub struct SessionStats {
    /// The backend base URL.
    pub backend: String,

    /// The authenticated user's netid, if logged in.
    pub netid: Option<String>,

    /// The number of messages in the transcript.
    pub message_count: usize,

    /// Total chat requests sent.
    pub request_count: u64,

    /// How many of those were answered with the fallback reply.
    pub fallback_count: u64,
}

impl ChatSession {
    /// Creates a new chat session with the given client.
    pub fn new(client: Wildcat) -> Self {
        Self {
            client,
            messages: Vec::new(),
            user: None,
            profile: None,
            request_count: 0,
            fallback_count: 0,
        }
    }

    /// The underlying API client.
    pub fn client(&self) -> &Wildcat {
        &self.client
    }

    /// The conversation transcript.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&UserResponse> {
        self.user.as_ref()
    }

    /// The stored profile used as chat context, if any.
    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Resume a persisted session, if the stored credentials still work.
    ///
    /// Probes `/auth/me` with whatever tokens the store holds. If the probe
    /// fails the stale tokens are cleared, leaving the session logged out.
    pub async fn resume(&mut self) -> Option<&UserResponse> {
        if !self.client.credentials().is_authenticated() {
            return None;
        }
        match self.client.me().await {
            Ok(user) => {
                self.profile = self.client.profile().await.ok();
                Some(self.user.insert(user))
            }
            Err(_) => {
                let _ = self.client.logout();
                None
            }
        }
    }

    /// Log in and cache the user's identity and profile.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<&UserResponse> {
        self.client.login(email, password).await?;
        self.refresh_identity().await
    }

    /// Register a new account and cache the user's identity.
    pub async fn register(
        &mut self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<&UserResponse> {
        self.client.register(email, password, name).await?;
        self.refresh_identity().await
    }

    async fn refresh_identity(&mut self) -> Result<&UserResponse> {
        let user = self.client.me().await?;
        // The extended profile is optional context; a missing one is fine.
        self.profile = self.client.profile().await.ok();
        Ok(self.user.insert(user))
    }

    /// Log out, clearing credentials and the cached identity.
    pub fn logout(&mut self) -> Result<()> {
        self.client.logout()?;
        self.user = None;
        self.profile = None;
        Ok(())
    }

    /// Clears the conversation history.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Sends a user message and returns the assistant's reply.
    ///
    /// The message is appended to the transcript before dispatch. On failure
    /// the transcript receives [`FALLBACK_REPLY`] in place of a real answer
    /// and the error is returned for the caller to surface.
    pub async fn send(&mut self, user_input: &str) -> Result<String> {
        self.messages.push(ChatMessage::user(user_input));

        let user_id = self
            .user
            .as_ref()
            .map(|u| u.netid.clone())
            .unwrap_or_else(|| "anonymous".to_string());
        let mut request = ChatRequest::new(user_input, user_id, OffsetDateTime::now_utc());
        if let Some(profile) = &self.profile {
            request = request.with_profile(profile);
        }

        self.request_count += 1;
        match self.client.chat(&request).await {
            Ok(reply) => {
                self.messages.push(ChatMessage::assistant(&reply.response));
                Ok(reply.response)
            }
            Err(err) => {
                self.messages.push(ChatMessage::assistant(FALLBACK_REPLY));
                self.fallback_count += 1;
                Err(err)
            }
        }
    }

    /// Returns aggregated statistics about the session.
    pub fn stats(&self) -> SessionStats {
        SessionStats {
            backend: self.client.base_url().to_string(),
            netid: self.user.as_ref().map(|u| u.netid.clone()),
            message_count: self.messages.len(),
            request_count: self.request_count,
            fallback_count: self.fallback_count,
        }
    }

    /// Saves the transcript to a file as pretty-printed JSON.
    pub fn save_transcript_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        to_writer_pretty(BufWriter::new(file), &self.messages)?;
        Ok(())
    }

    /// Replaces the transcript with one loaded from a file.
    pub fn load_transcript_from(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::open(path.as_ref())?;
        self.messages = from_reader(BufReader::new(file))?;
        Ok(())
    }
}
