use thiserror::Error;

/// Local validation failures; raised before any request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Post title and content cannot be empty.")]
    EmptyPost,
    #[error("Comment cannot be empty.")]
    EmptyComment,
    #[error("Email and password are required.")]
    MissingCredentials,
    #[error("Name, email and password are required.")]
    MissingSignupFields,
}

/// One generic message per operation family; the underlying error is only logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RemoteFailure {
    #[error("Failed to fetch posts. Please try again.")]
    FetchPosts,
    #[error("Failed to fetch post. Please try again.")]
    FetchPost,
    #[error("Failed to create post. Please try again.")]
    CreatePost,
    #[error("Failed to like post. Please try again.")]
    LikePost,
    #[error("Failed to delete post. Please try again.")]
    DeletePost,
    #[error("Failed to add comment. Please try again.")]
    AddComment,
    #[error("Login failed. Please check your credentials.")]
    Login,
    #[error("Sign up failed. Please try again.")]
    Signup,
    #[error("Could not save session.")]
    SaveSession,
}

pub const ALREADY_LIKED: &str = "You have already liked this post.";
pub const ACCOUNT_CREATED: &str = "Account created. Please log in.";

/// Checks a draft for emptiness the way every submit form does.
pub fn require_text(value: &str) -> bool {
    !value.trim().is_empty()
}
