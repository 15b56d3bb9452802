//! Slack message payloads and slash-command parsing.

use std::fmt;

use serde::{Deserialize, Serialize};
use vck_core::SearchRequest;
use vck_types::{RefKind, SearchResult};

/// Sidebar color of an attachment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Good,
    Warning,
    Danger,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub title: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
    pub color: Color,
}

/// A message posted to a slash command's `response_url`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlackMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl SlackMessage {
    /// Immediate acknowledgement while the search runs.
    pub fn searching() -> Self {
        Self {
            text: Some("Searching...".into()),
            attachments: Vec::new(),
        }
    }

    /// Reply when the command had no argument.
    pub fn missing_input() -> Self {
        Self::attachment(Attachment {
            title: None,
            text: Some("Please provide a pull request number or commit hash.".into()),
            fields: Vec::new(),
            color: Color::Danger,
        })
    }

    /// Matches found (or not) for `label`.
    pub fn results(label: &str, result: &SearchResult) -> Self {
        let fields: Vec<Field> = [RefKind::Branch, RefKind::Tag]
            .into_iter()
            .filter(|kind| !result.refs(*kind).is_empty())
            .map(|kind| Field {
                title: kind.heading().to_string(),
                value: result.refs(kind).join(", "),
            })
            .collect();

        let title = Some(format!("{label} Search Results:"));
        if fields.is_empty() {
            Self::attachment(Attachment {
                title,
                text: Some("No matches found.".into()),
                fields,
                color: Color::Warning,
            })
        } else {
            Self::attachment(Attachment {
                title,
                text: None,
                fields,
                color: Color::Good,
            })
        }
    }

    /// The search for `label` failed.
    pub fn failure(label: &str, error: &dyn fmt::Display) -> Self {
        Self::attachment(Attachment {
            title: Some(format!("{label} Search Results:")),
            text: Some(error.to_string()),
            fields: Vec::new(),
            color: Color::Danger,
        })
    }

    fn attachment(attachment: Attachment) -> Self {
        Self {
            text: None,
            attachments: vec![attachment],
        }
    }
}

/// What a slash command asked for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchItem {
    pub request: SearchRequest,
    /// How the item is named in replies ("PR #43210", "Commit 4a6d8b3").
    pub label: String,
}

/// Interpret slash-command text: a number (optionally `#`-prefixed) is a
/// pull request, anything else is a commit hash.
pub fn parse_search_item(text: &str) -> SearchItem {
    let text = text.trim();
    let digits = text.trim_start_matches('#');
    if !digits.is_empty() && digits.parse::<u64>().is_ok() {
        SearchItem {
            request: SearchRequest::for_pull_request(digits),
            label: format!("PR #{digits}"),
        }
    } else {
        let short: String = text.chars().take(7).collect();
        SearchItem {
            request: SearchRequest::for_commit(text),
            label: format!("Commit {short}"),
        }
    }
}
