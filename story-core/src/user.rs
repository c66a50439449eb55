use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::client::{ApiClient, TokenBody};
use crate::error::ApiError;
use crate::story::Story;
use crate::story_list::{refresh_by_id, remove_by_id};

/// The authenticated user: profile fields, session token, and the user's
/// two story collections. Dropping the value is logout; there is no
/// intermediate session state.
#[derive(Debug, Clone)]
pub struct User {
    username: String,
    name: String,
    created_at: DateTime<Utc>,
    favorites: Vec<Story>,
    own_stories: Vec<Story>,
    token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserProfile {
    username: String,
    name: String,
    created_at: DateTime<Utc>,
    #[serde(default)]
    favorites: Vec<Story>,
    // the server keys authored stories as `stories`
    #[serde(default, rename = "stories")]
    own_stories: Vec<Story>,
}

#[derive(Debug, Deserialize)]
struct AuthBody {
    user: UserProfile,
    token: String,
}

#[derive(Debug, Deserialize)]
struct ProfileBody {
    user: UserProfile,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CredentialsBody<'a> {
    user: Credentials<'a>,
}

enum FavoriteAction {
    Add,
    Remove,
}

impl User {
    fn from_profile(profile: UserProfile, token: String) -> Self {
        Self {
            username: profile.username,
            name: profile.name,
            created_at: profile.created_at,
            favorites: profile.favorites,
            own_stories: profile.own_stories,
            token,
        }
    }

    /// Register a new account and return the authenticated user.
    pub async fn signup(
        client: &ApiClient,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<Self, ApiError> {
        let body = CredentialsBody {
            user: Credentials {
                username,
                password,
                name: Some(name),
            },
        };
        let response = client.post_json("/signup", &body).await?;
        let auth: AuthBody = response.json().await?;
        Ok(Self::from_profile(auth.user, auth.token))
    }

    /// Exchange credentials for a session token and full profile.
    pub async fn login(
        client: &ApiClient,
        username: &str,
        password: &str,
    ) -> Result<Self, ApiError> {
        let body = CredentialsBody {
            user: Credentials {
                username,
                password,
                name: None,
            },
        };
        let response = client.post_json("/login", &body).await?;
        let auth: AuthBody = response.json().await?;
        Ok(Self::from_profile(auth.user, auth.token))
    }

    /// Rebuild a session from a stored token. Any failure downgrades to
    /// `None` so a stale token means "logged out" rather than a startup
    /// error.
    pub async fn restore_session(client: &ApiClient, token: &str, username: &str) -> Option<Self> {
        let result = async {
            let response = client
                .get(&format!("/users/{username}"), &[("token", token)])
                .await?;
            let profile: ProfileBody = response.json().await?;
            Ok::<_, ApiError>(Self::from_profile(profile.user, token.to_owned()))
        }
        .await;
        match result {
            Ok(user) => Some(user),
            Err(err) => {
                warn!(%username, error = %err, "session restore failed, treating as logged out");
                None
            }
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn favorites(&self) -> &[Story] {
        &self.favorites
    }

    pub fn own_stories(&self) -> &[Story] {
        &self.own_stories
    }

    pub(crate) fn own_stories_mut(&mut self) -> &mut Vec<Story> {
        &mut self.own_stories
    }

    pub(crate) fn forget_story(&mut self, story_id: &str) {
        remove_by_id(&mut self.favorites, story_id);
        remove_by_id(&mut self.own_stories, story_id);
    }

    pub(crate) fn refresh_story(&mut self, updated: &Story) {
        refresh_by_id(&mut self.favorites, updated);
        refresh_by_id(&mut self.own_stories, updated);
    }

    /// Mark a story as a favorite. The local append happens only after the
    /// server confirms, so a failed call leaves `favorites` untouched.
    pub async fn favorite(&mut self, client: &ApiClient, story: &Story) -> Result<(), ApiError> {
        if self.is_favorite(story) {
            return Ok(());
        }
        self.send_favorite(client, story.id(), FavoriteAction::Add)
            .await?;
        self.favorites.push(story.clone());
        Ok(())
    }

    /// Remove a story from favorites, server first. An id that is not in
    /// the local collection is a no-op removal.
    pub async fn unfavorite(&mut self, client: &ApiClient, story: &Story) -> Result<(), ApiError> {
        self.send_favorite(client, story.id(), FavoriteAction::Remove)
            .await?;
        remove_by_id(&mut self.favorites, story.id());
        Ok(())
    }

    pub fn is_favorite(&self, story: &Story) -> bool {
        self.favorites.iter().any(|fav| fav.id() == story.id())
    }

    async fn send_favorite(
        &self,
        client: &ApiClient,
        story_id: &str,
        action: FavoriteAction,
    ) -> Result<(), ApiError> {
        let path = format!("/users/{}/favorites/{}", self.username, story_id);
        let body = TokenBody { token: &self.token };
        match action {
            FavoriteAction::Add => client.post_json(&path, &body).await?,
            FavoriteAction::Remove => client.delete_json(&path, &body).await?,
        };
        Ok(())
    }
}
