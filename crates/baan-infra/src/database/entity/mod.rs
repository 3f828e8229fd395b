//! SeaORM entities mapping the domain onto Postgres tables.
//!
//! The original embedded comment/like arrays are re-expressed as child
//! tables keyed by post id; the read path composes them back into views.

pub mod comment;
pub mod post;
pub mod post_like;
pub mod user;
