//! Feed presentation helpers: ordering, search, downloads.

use crate::domain::{Post, PostId};

/// Reorders posts as returned by the gateway (oldest first) so the newest
/// post comes first.
#[must_use]
pub fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.reverse();
    posts
}

/// Returns the posts whose name or prompt contains `query`, ignoring case.
///
/// A blank query matches every post.
#[must_use]
pub fn search_posts<'a>(posts: &'a [Post], query: &str) -> Vec<&'a Post> {
    let needle = query.trim().to_lowercase();
    posts
        .iter()
        .filter(|post| {
            needle.is_empty()
                || post.name.to_lowercase().contains(&needle)
                || post.prompt.to_lowercase().contains(&needle)
        })
        .collect()
}

/// File name offered when a post's image is downloaded.
#[must_use]
pub fn download_file_name(id: PostId) -> String {
    format!("download-{id}.jpg")
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::NewPost;

    fn post(name: &str, prompt: &str) -> Post {
        NewPost {
            name: name.to_string(),
            prompt: prompt.to_string(),
            photo: "https://img.test/p.png".to_string(),
        }
        .into_post(PostId::new(), Utc::now())
    }

    #[test]
    fn newest_first_reverses_server_order() {
        let posts = vec![post("a", "1"), post("b", "2"), post("c", "3")];
        let names: Vec<_> = newest_first(posts).into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["c", "b", "a"]);
    }

    #[test]
    fn search_matches_name_or_prompt_case_insensitively() {
        let posts = vec![
            post("Ada", "a lighthouse at dusk"),
            post("Grace", "Neon city in the rain"),
            post("Linus", "penguin on an iceberg"),
        ];

        let by_name: Vec<_> = search_posts(&posts, "ADA").iter().map(|p| &p.name).collect();
        assert_eq!(by_name, ["Ada"]);

        let by_prompt: Vec<_> = search_posts(&posts, "neon").iter().map(|p| &p.name).collect();
        assert_eq!(by_prompt, ["Grace"]);

        assert!(search_posts(&posts, "volcano").is_empty());
    }

    #[test]
    fn blank_search_matches_everything() {
        let posts = vec![post("a", "1"), post("b", "2")];
        assert_eq!(search_posts(&posts, "  ").len(), 2);
    }

    #[test]
    fn download_name_uses_post_id() {
        let id = PostId::new();
        assert_eq!(download_file_name(id), format!("download-{id}.jpg"));
    }
}
