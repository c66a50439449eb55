use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::{ApiClient, TokenBody};
use crate::error::ApiError;
use crate::story::{Story, StoryDraft};
use crate::user::User;

/// Ordered collection of stories, newest first. The list is an owned value
/// returned by `fetch` and passed to the operations that need it; nothing
/// in the crate keeps a process-wide copy.
#[derive(Debug, Clone, Default)]
pub struct StoryList {
    stories: Vec<Story>,
}

#[derive(Debug, Deserialize)]
struct StoriesBody {
    stories: Vec<Story>,
}

#[derive(Debug, Deserialize)]
struct StoryBody {
    story: Story,
}

#[derive(Debug, Serialize)]
struct StoryRequest<'a> {
    token: &'a str,
    story: &'a StoryDraft,
}

impl StoryList {
    /// Fetch every story the server knows about, in server order.
    /// No auth required.
    pub async fn fetch(client: &ApiClient) -> Result<Self, ApiError> {
        let response = client.get("/stories", &[]).await?;
        let body: StoriesBody = response.json().await?;
        debug!(count = body.stories.len(), "fetched story list");
        Ok(Self {
            stories: body.stories,
        })
    }

    pub fn stories(&self) -> &[Story] {
        &self.stories
    }

    pub fn get(&self, story_id: &str) -> Option<&Story> {
        self.stories.iter().find(|story| story.id() == story_id)
    }

    /// Post a new story under `user`'s session. On success the server's
    /// record is front-inserted into both this list and `user`'s own
    /// stories so it shows up without a refetch.
    pub async fn add_story(
        &mut self,
        client: &ApiClient,
        user: &mut User,
        draft: &StoryDraft,
    ) -> Result<Story, ApiError> {
        let request = StoryRequest {
            token: user.token(),
            story: draft,
        };
        let response = client.post_json("/stories", &request).await?;
        let body: StoryBody = response.json().await?;
        self.stories.insert(0, body.story.clone());
        user.own_stories_mut().insert(0, body.story.clone());
        Ok(body.story)
    }

    /// Delete a story on the server, then drop it from this list and from
    /// `user`'s favorites and own stories. Collections that never held the
    /// id are left as they are; nothing local changes on failure.
    pub async fn delete_story(
        &mut self,
        client: &ApiClient,
        user: &mut User,
        story_id: &str,
    ) -> Result<(), ApiError> {
        let request = TokenBody {
            token: user.token(),
        };
        client
            .delete_json(&format!("/stories/{story_id}"), &request)
            .await?;
        remove_by_id(&mut self.stories, story_id);
        user.forget_story(story_id);
        Ok(())
    }

    /// Replace a story's editable fields on the server, then refresh every
    /// cached copy. Each collection holds its own copy of the story, so the
    /// refresh has to touch all of them explicitly.
    pub async fn update_story(
        &mut self,
        client: &ApiClient,
        user: &mut User,
        story_id: &str,
        draft: &StoryDraft,
    ) -> Result<Story, ApiError> {
        let request = StoryRequest {
            token: user.token(),
            story: draft,
        };
        let response = client
            .patch_json(&format!("/stories/{story_id}"), &request)
            .await?;
        let body: StoryBody = response.json().await?;
        refresh_by_id(&mut self.stories, &body.story);
        user.refresh_story(&body.story);
        Ok(body.story)
    }
}

/// Drop the entry with the given id, if any. Absent ids are a no-op.
pub(crate) fn remove_by_id(stories: &mut Vec<Story>, story_id: &str) {
    stories.retain(|story| story.id() != story_id);
}

/// Overwrite any cached copy of `updated` with the server's new fields.
pub(crate) fn refresh_by_id(stories: &mut [Story], updated: &Story) {
    for story in stories.iter_mut() {
        if story.id() == updated.id() {
            *story = updated.clone();
        }
    }
}
