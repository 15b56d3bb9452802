//! Slack slash-command server for version-check.
//!
//! Accepts signed `/salt-version <pr-or-commit>` commands, acknowledges them
//! immediately, runs the containment search in the background, and posts
//! the answer to the command's `response_url`.

pub mod auth;
pub mod config;
pub mod error;
pub mod handler;
pub mod notify;
pub mod router;
pub mod server;
pub mod slack;
pub mod state;

pub use auth::SlackVerifier;
pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use notify::{HttpResponseSink, ResponseSink};
pub use server::VersionCheckServer;
pub use slack::{parse_search_item, SearchItem, SlackMessage};
pub use state::AppState;
