//! Thumbgen is a small HTTP service that turns video titles into
//! ready-to-publish YouTube thumbnails. It blends trending-thumbnail
//! statistics into a text-to-image prompt, submits the prompt to a remote
//! generation API, overlays the title on the returned image, and serves
//! the finished JPEG back over HTTP.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
