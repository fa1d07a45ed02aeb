// Public modules
pub mod chat_request;
pub mod chat_response;
pub mod google_token_request;
pub mod login_request;
pub mod refresh_token_request;
pub mod register_request;
pub mod schedule;
pub mod schedule_course;
pub mod status_message;
pub mod token_response;
pub mod user_profile;
pub mod user_response;

// Re-exports
pub use chat_request::ChatRequest;
pub use chat_response::ChatResponse;
pub use google_token_request::GoogleTokenRequest;
pub use login_request::LoginRequest;
pub use refresh_token_request::RefreshTokenRequest;
pub use register_request::RegisterRequest;
pub use schedule::Schedule;
pub use schedule_course::ScheduleCourse;
pub use status_message::StatusMessage;
pub use token_response::TokenResponse;
pub use user_profile::{ProfileSaved, UserProfile};
pub use user_response::UserResponse;
