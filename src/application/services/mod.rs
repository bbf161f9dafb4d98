mod thumbnails;

pub use thumbnails::ThumbnailService;
