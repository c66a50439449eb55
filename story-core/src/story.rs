use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ApiError;

/// One story as the server reports it. Fields are copied verbatim from
/// server records; the client never invents values and only replaces them
/// wholesale through the update-refresh path in `StoryList`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    pub story_id: String,
    pub title: String,
    pub author: String,
    pub url: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl Story {
    /// Canonical identity accessor; every id comparison in the crate goes
    /// through this.
    pub fn id(&self) -> &str {
        &self.story_id
    }

    /// Host of the story's URL, without scheme, port, or path.
    ///
    /// Stories can arrive with empty or relative URLs; those fail here and
    /// callers decide what to display instead.
    pub fn hostname(&self) -> Result<String, ApiError> {
        let parsed =
            Url::parse(&self.url).map_err(|_| ApiError::MalformedUrl(self.url.clone()))?;
        parsed
            .host_str()
            .map(ToOwned::to_owned)
            .ok_or_else(|| ApiError::MalformedUrl(self.url.clone()))
    }

    /// The editable fields of this story, ready to resend on an update.
    pub fn draft(&self) -> StoryDraft {
        StoryDraft {
            title: self.title.clone(),
            author: self.author.clone(),
            url: self.url.clone(),
        }
    }
}

/// The field set a user supplies when creating or editing a story.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoryDraft {
    pub title: String,
    pub author: String,
    pub url: String,
}
