//! Interactive chat application for the Wildcat scheduling assistant.
//!
//! This binary provides a REPL interface for asking the course-scheduling
//! assistant questions, with login handled in-session.
//!
//! # Usage
//!
//! ```bash
//! # Basic usage with default settings
//! wildcat-chat
//!
//! # Point at a specific backend
//! wildcat-chat --api-url https://scheduler.example.edu
//!
//! # Keep the login between runs
//! wildcat-chat --credentials ~/.wildcat-credentials.json
//!
//! # Disable colors (useful for piping output)
//! wildcat-chat --no-color
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/help` - Show available commands
//! - `/login <email>` - Sign in (prompts for a password)
//! - `/register <email> <name>` - Create an account
//! - `/logout` - Sign out and clear stored credentials
//! - `/whoami` - Show the authenticated user
//! - `/profile` - Show the stored profile context
//! - `/stats` - Show session statistics
//! - `/quit` - Exit the application

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use wildcat::Wildcat;
use wildcat::chat::{
    ChatArgs, ChatCommand, ChatConfig, ChatSession, FALLBACK_REPLY, PlainTextRenderer, Renderer,
    help_text, parse_command,
};
use wildcat::credentials::CredentialStore;

/// Main entry point for the wildcat-chat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("wildcat-chat [OPTIONS]");
    let config = ChatConfig::from(args);
    let use_color = config.use_color;

    let credentials = match &config.credentials_path {
        Some(path) => CredentialStore::persistent(path),
        None => CredentialStore::in_memory(),
    };
    let client = Wildcat::with_options(config.api_url.clone(), credentials, None)?;
    let mut session = ChatSession::new(client);
    let mut renderer = PlainTextRenderer::with_color(use_color);
    let mut rl = DefaultEditor::new()?;

    // Flag so Ctrl+C during a pending request exits after it settles rather
    // than killing the process mid-write.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })?;

    println!("Wildcat Chat (backend: {})", session.client().base_url());
    match session.resume().await {
        Some(user) => {
            renderer.print_info(&format!("Resumed session for {} ({}).", user.name, user.netid))
        }
        None => renderer.print_info("Not logged in. Use /login <email> to sign in."),
    }
    println!("Type /help for commands, /quit to exit\n");

    loop {
        if interrupted.load(Ordering::Relaxed) {
            println!("Goodbye!");
            break;
        }

        let readline = rl.readline("You: ");

        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                // Check for slash commands
                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Login(email) => {
                            let Some(password) = read_password(&mut rl) else {
                                renderer.print_info("Login cancelled.");
                                continue;
                            };
                            match session.login(&email, &password).await {
                                Ok(user) => renderer.print_info(&format!(
                                    "Logged in as {} ({}).",
                                    user.name, user.netid
                                )),
                                Err(err) => renderer.print_error(&err.to_string()),
                            }
                        }
                        ChatCommand::Register { email, name } => {
                            let Some(password) = read_password(&mut rl) else {
                                renderer.print_info("Registration cancelled.");
                                continue;
                            };
                            match session.register(&email, &password, &name).await {
                                Ok(user) => renderer.print_info(&format!(
                                    "Registered and logged in as {} ({}).",
                                    user.name, user.netid
                                )),
                                Err(err) => renderer.print_error(&err.to_string()),
                            }
                        }
                        ChatCommand::Logout => match session.logout() {
                            Ok(()) => renderer.print_info("Logged out."),
                            Err(err) => renderer.print_error(&err.to_string()),
                        },
                        ChatCommand::Whoami => print_whoami(&session),
                        ChatCommand::Profile => print_profile(&session),
                        ChatCommand::Clear => {
                            session.clear();
                            renderer.print_info("Conversation cleared.");
                        }
                        ChatCommand::SaveTranscript(path) => {
                            match session.save_transcript_to(&path) {
                                Ok(()) => {
                                    renderer.print_info(&format!("Transcript saved to {}", path))
                                }
                                Err(err) => renderer
                                    .print_error(&format!("Failed to save transcript: {}", err)),
                            }
                        }
                        ChatCommand::LoadTranscript(path) => {
                            match session.load_transcript_from(&path) {
                                Ok(()) => {
                                    renderer.print_info(&format!("Transcript loaded from {}", path))
                                }
                                Err(err) => renderer
                                    .print_error(&format!("Failed to load transcript: {}", err)),
                            }
                        }
                        ChatCommand::Stats => print_stats(&session),
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Invalid(message) => {
                            renderer.print_error(&message);
                        }
                    }
                    continue;
                }

                // Regular message - send to the assistant
                println!("Advisor:");
                match session.send(line).await {
                    Ok(reply) => renderer.print_assistant(&reply),
                    Err(err) => {
                        renderer.print_assistant(FALLBACK_REPLY);
                        renderer.print_error(&err.to_string());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                renderer.print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}

fn read_password(rl: &mut DefaultEditor) -> Option<String> {
    match rl.readline("Password: ") {
        Ok(password) => {
            let password = password.trim().to_string();
            if password.is_empty() { None } else { Some(password) }
        }
        Err(_) => None,
    }
}

fn print_whoami(session: &ChatSession) {
    let Some(user) = session.user() else {
        println!("    Not logged in.");
        return;
    };
    println!("    {} ({})", user.name, user.netid);
    println!("    Email: {}", user.email);
    println!("    Majors: {}", describe_list(Some(user.majors.as_slice())));
    println!("    Minors: {}", describe_list(user.minors.as_deref()));
}

fn print_profile(session: &ChatSession) {
    let Some(profile) = session.profile() else {
        println!("    No stored profile.");
        return;
    };
    println!("    Profile for {}:", profile.netid);
    println!(
        "      Majors: {}",
        describe_list(Some(profile.majors.as_slice()))
    );
    println!("      Minors: {}", describe_list(profile.minors.as_deref()));
    println!(
        "      Already taken: {}",
        describe_list(profile.classes_already_taken.as_deref())
    );
    println!(
        "      Interests: {}",
        describe_list(profile.vocational_interests.as_deref())
    );
    println!(
        "      Locked classes: {}",
        describe_list(profile.locked_classes.as_deref())
    );
    match profile.earliest_class_time.as_deref() {
        Some(time) => println!("      Earliest class time: {}", time),
        None => println!("      Earliest class time: (none)"),
    }
    match profile.self_description.as_deref() {
        Some(description) => println!("      About: {}", description),
        None => println!("      About: (none)"),
    }
}

fn print_stats(session: &ChatSession) {
    let stats = session.stats();
    println!("    Session Statistics:");
    println!("      Backend: {}", stats.backend);
    match stats.netid {
        Some(ref netid) => println!("      Logged in as: {}", netid),
        None => println!("      Logged in as: (not logged in)"),
    }
    println!("      Messages: {}", stats.message_count);
    println!(
        "      Requests: {} ({} answered with the fallback reply)",
        stats.request_count, stats.fallback_count
    );
}

fn describe_list(values: Option<&[String]>) -> String {
    match values {
        Some(values) if !values.is_empty() => values.join(", "),
        _ => "(none)".to_string(),
    }
}
