//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! allowing users to control the chat session without sending messages
//! to the assistant.

/// A parsed chat command.
///
/// These commands control the chat session and are not sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Log in with an email address; the password is prompted separately.
    Login(String),

    /// Register a new account: email plus display name.
    Register {
        /// The account email address.
        email: String,
        /// The student's display name.
        name: String,
    },

    /// Log out, clearing stored credentials.
    Logout,

    /// Show the authenticated user.
    Whoami,

    /// Show the stored profile used as chat context.
    Profile,

    /// Clear the conversation history.
    Clear,

    /// Save the transcript to a specific file immediately.
    SaveTranscript(String),

    /// Load conversation history from a file.
    LoadTranscript(String),

    /// Display session statistics (message count, backend, etc.).
    Stats,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use wildcat::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/login jds1234@example.edu").is_some());
/// assert!(parse_command("What should I take next term?").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "login" => match argument {
            Some(email) => ChatCommand::Login(email.to_string()),
            None => ChatCommand::Invalid("/login requires an email address".to_string()),
        },
        "register" => parse_register_command(argument),
        "logout" => ChatCommand::Logout,
        "whoami" => ChatCommand::Whoami,
        "profile" => ChatCommand::Profile,
        "clear" => ChatCommand::Clear,
        "save" => match argument {
            Some(arg) => ChatCommand::SaveTranscript(arg.to_string()),
            None => ChatCommand::Invalid("/save requires a file path".to_string()),
        },
        "load" => match argument {
            Some(arg) => ChatCommand::LoadTranscript(arg.to_string()),
            None => ChatCommand::Invalid("/load requires a file path".to_string()),
        },
        "stats" | "status" => ChatCommand::Stats,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

fn parse_register_command(argument: Option<&str>) -> ChatCommand {
    let Some(arg) = argument else {
        return ChatCommand::Invalid("/register requires an email and a name".to_string());
    };

    let mut parts = arg.splitn(2, ' ');
    let email = parts.next().unwrap_or_default();
    let Some(name) = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty()) else {
        return ChatCommand::Invalid("/register requires an email and a name".to_string());
    };
    ChatCommand::Register {
        email: email.to_string(),
        name: name.to_string(),
    }
}

/// Returns the help text describing available commands.
pub fn help_text() -> String {
    let commands = [
        ("/login <email>", "Log in (prompts for a password)"),
        ("/register <email> <name>", "Create an account"),
        ("/logout", "Log out and clear stored credentials"),
        ("/whoami", "Show the authenticated user"),
        ("/profile", "Show the stored profile context"),
        ("/clear", "Clear conversation history"),
        ("/save <file>", "Save the transcript to a file"),
        ("/load <file>", "Load a transcript from a file"),
        ("/stats", "Show session statistics"),
        ("/help", "Show this help message"),
        ("/quit", "Exit the application"),
    ];

    let mut text = String::from("Available commands:\n");
    for (command, description) in commands {
        text.push_str(&format!("  {:<26} {}\n", command, description));
    }
    text
}
