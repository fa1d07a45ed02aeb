//! One-shot question tool for the Wildcat scheduling assistant.
//!
//! Sends a single question to the assistant and prints the reply, without
//! entering the interactive REPL. Useful for scripting and quick checks.
//!
//! # Usage
//!
//! ```bash
//! # Ask with the development backend
//! wildcat-ask "What distribution requirements am I missing?"
//!
//! # Reuse a saved login so the assistant sees your profile
//! wildcat-ask --credentials ~/.wildcat-credentials.json "Plan my fall term"
//!
//! # Point at a specific backend
//! wildcat-ask --api-url https://scheduler.example.edu "Suggest a CS elective"
//! ```

use arrrg::CommandLine;
use arrrg_derive::CommandLine;
use time::OffsetDateTime;

use wildcat::Wildcat;
use wildcat::credentials::CredentialStore;
use wildcat::types::ChatRequest;

/// Command-line arguments for the wildcat-ask tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
struct AskArgs {
    /// Backend base URL.
    #[arrrg(optional, "Backend base URL (default: http://localhost:8000)", "URL")]
    api_url: Option<String>,

    /// Saved credentials to authenticate with.
    #[arrrg(optional, "Use persisted login credentials from this file", "PATH")]
    credentials: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, free) = AskArgs::from_command_line_relaxed("wildcat-ask [OPTIONS] QUESTION");
    if free.is_empty() {
        eprintln!("Usage: wildcat-ask [OPTIONS] QUESTION");
        std::process::exit(1);
    }
    let question = free.join(" ");

    let credentials = match &args.credentials {
        Some(path) => CredentialStore::persistent(path),
        None => CredentialStore::in_memory(),
    };
    let client = Wildcat::with_options(args.api_url.clone(), credentials, None)?;

    // With a saved login the assistant can use the stored profile; without
    // one the question goes out anonymously.
    let mut user_id = "anonymous".to_string();
    let mut profile = None;
    if client.credentials().is_authenticated() {
        if let Ok(user) = client.me().await {
            user_id = user.netid;
            profile = client.profile().await.ok();
        }
    }

    let mut request = ChatRequest::new(question, user_id, OffsetDateTime::now_utc());
    if let Some(profile) = &profile {
        request = request.with_profile(profile);
    }

    let reply = client.chat(&request).await?;
    println!("{}", reply.response);
    Ok(())
}
