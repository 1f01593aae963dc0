pub mod ids;
pub mod time;

pub use ids::{canonical_id, contains_id, new_id};
pub use self::time::{format_joined_at, now_timestamp};
