//! Storage module for persisting fetched responses
//!
//! This module handles durable storage of response payloads, including:
//! - The `ResponseStore` trait the crawler writes through
//! - Addressing by resource type and optional resource id
//! - A filesystem implementation writing one JSON document per endpoint

mod fs;
mod traits;

pub use fs::FsStore;
pub use traits::{DocumentAddress, ResponseStore, StorageError, StorageResult};
