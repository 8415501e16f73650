use serde::{Deserialize, Serialize};

use super::posts::Post;

/// The post collection owned by the host for the duration of one build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Site {
    #[serde(default)]
    pub posts: Vec<Post>,
}

impl Site {
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }
}
