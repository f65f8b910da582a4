//! Data models for the application.

mod child;
mod user;

#[cfg(feature = "server")]
pub use child::ChildRow;
#[cfg(feature = "server")]
pub use user::User;
pub use user::UserInfo;
