//! Client-supplied task payloads.
//!
//! These types are untrusted input. They carry no owner, identifier or
//! timestamp fields; unknown JSON keys are ignored during decoding.

use serde::{Deserialize, Serialize};

/// Title and description submitted by a client for create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRequest {
    #[serde(default)]
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl TaskRequest {
    /// Creates a request with the given title and no description.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the submitted title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the submitted description, if present.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Splits the request into its title and optional description.
    #[must_use]
    pub fn into_parts(self) -> (String, Option<String>) {
        (self.title, self.description)
    }
}

/// Completion flag submitted by a client for a status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusRequest {
    /// Requested completion state.
    pub completed: bool,
}
