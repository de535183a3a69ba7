pub mod comments;
pub mod credentials;
pub mod sessions;

pub use comments::{CommentBoard, PostError};
pub use credentials::{CredentialStore, RegisterError};
pub use sessions::SessionRegistry;
