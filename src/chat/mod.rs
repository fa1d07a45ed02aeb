//! Chat application module for conversing with the scheduling assistant.
//!
//! This module provides a REPL chat interface built on top of the wildcat
//! client library. It supports:
//!
//! - Login, registration, and logout from inside the session
//! - Profile-aware requests: stored preferences ride along with every message
//! - Slash commands for session control
//! - Transcript save/load
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`session`]: Core chat session management and API interaction
//! - [`commands`]: Slash command parsing and handling
mod commands;
mod config;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
pub use session::{ChatMessage, ChatRole, ChatSession, FALLBACK_REPLY, SessionStats};
