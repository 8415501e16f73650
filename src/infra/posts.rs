//! Reads the post collection the host exports for a build.

use std::{fs, path::Path};

use serde::Deserialize;
use tracing::debug;

use crate::domain::{posts::Post, site::Site};

use super::error::InfraError;

/// Either a bare array of posts or an object with a `posts` array.
#[derive(Deserialize)]
#[serde(untagged)]
enum PostsDocument {
    Bare(Vec<Post>),
    Site(Site),
}

pub fn load_site(path: &Path) -> Result<Site, InfraError> {
    let data = fs::read_to_string(path)?;
    let site = parse_site(&data).map_err(|message| InfraError::posts(path, message))?;

    debug!(
        target = "infra::posts",
        path = %path.display(),
        posts = site.posts.len(),
        "loaded posts"
    );

    Ok(site)
}

pub fn parse_site(data: &str) -> Result<Site, String> {
    serde_json::from_str::<PostsDocument>(data)
        .map(|document| match document {
            PostsDocument::Bare(posts) => Site::new(posts),
            PostsDocument::Site(site) => site,
        })
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::domain::posts::PinnedFlag;

    use super::*;

    #[test]
    fn parses_bare_and_wrapped_documents() {
        let bare = parse_site(r#"[{"date": "2024-01-01", "pinned": true}]"#).expect("bare array");
        let wrapped =
            parse_site(r#"{"posts": [{"date": "2024-01-01", "pinned": true}]}"#).expect("object");

        assert_eq!(bare, wrapped);
        assert_eq!(bare.posts[0].pinned(), PinnedFlag::Pinned);
    }

    #[test]
    fn rejects_posts_without_dates() {
        assert!(parse_site(r#"[{"title": "undated"}]"#).is_err());
    }

    #[test]
    fn load_reports_the_offending_path() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");

        let err = load_site(file.path()).expect_err("invalid document");
        assert!(matches!(err, InfraError::Posts { ref path, .. } if path == file.path()));
    }
}
