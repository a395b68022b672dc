/// Ownership-based permission checks
///
/// Posts are editable only by their author. A failed check is not an error
/// condition here; callers decide how to surface it (the web layer redirects
/// to the read-only detail view instead of rendering an error page).
/// Commenting itself is open to every authenticated identity; only comment
/// deletion is owner-restricted.
use uuid::Uuid;

use crate::models::{Comment, Post};

/// Check if a user may edit or delete a post
pub fn can_edit_post(user_id: Uuid, post: &Post) -> bool {
    post.author_id == user_id
}

/// Check if a user may delete a comment
pub fn can_delete_comment(user_id: Uuid, comment: &Comment) -> bool {
    comment.author_id == user_id
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_by(author_id: Uuid) -> Post {
        Post {
            id: Uuid::new_v4(),
            author_id,
            text: "hello".to_string(),
            group_id: None,
            image_key: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn author_can_edit_own_post() {
        let author = Uuid::new_v4();
        assert!(can_edit_post(author, &post_by(author)));
    }

    #[test]
    fn non_author_cannot_edit_post() {
        let post = post_by(Uuid::new_v4());
        assert!(!can_edit_post(Uuid::new_v4(), &post));
    }

    #[test]
    fn only_comment_author_can_delete_it() {
        let author = Uuid::new_v4();
        let comment = Comment {
            id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
            author_id: author,
            text: "nice".to_string(),
            created_at: Utc::now(),
        };
        assert!(can_delete_comment(author, &comment));
        assert!(!can_delete_comment(Uuid::new_v4(), &comment));
    }
}
