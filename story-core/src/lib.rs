pub mod client;
pub mod config;
pub mod error;
pub mod story;
pub mod story_list;
pub mod user;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use story::{Story, StoryDraft};
pub use story_list::StoryList;
pub use user::User;
