pub mod listing;
pub mod moderation;
pub mod photos;
