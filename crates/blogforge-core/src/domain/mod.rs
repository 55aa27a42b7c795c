//! Domain entities - the core business objects.

mod blog_post;

mod user;

pub use blog_post::{BlogPost, NO_LINK};
pub use user::User;
