pub mod prompt;
pub mod stats;
pub mod thumbnails;
