//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use std::path::PathBuf;

use arrrg_derive::CommandLine;

/// Command-line arguments for the wildcat-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Backend base URL.
    #[arrrg(optional, "Backend base URL (default: http://localhost:8000)", "URL")]
    pub api_url: Option<String>,

    /// Where to persist login credentials between runs.
    #[arrrg(optional, "Persist login credentials to this file", "PATH")]
    pub credentials: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatConfig {
    /// Backend base URL override. `None` defers to the client's own
    /// resolution (environment variable, then the development default).
    pub api_url: Option<String>,

    /// Path for persisted credentials. `None` keeps the session in memory.
    pub credentials_path: Option<PathBuf>,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Backend URL: resolved by the client
    /// - Credentials: in-memory only
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            api_url: None,
            credentials_path: None,
            use_color: true,
        }
    }

    /// Sets the backend base URL.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    /// Sets the credentials persistence path.
    pub fn with_credentials_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_path = Some(path.into());
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        ChatConfig {
            api_url: args.api_url,
            credentials_path: args.credentials.map(PathBuf::from),
            use_color: !args.no_color,
        }
    }
}
