pub mod client;
pub mod compositor;
pub mod generation;
pub mod overlay;
pub mod stats_store;
pub mod storage;
