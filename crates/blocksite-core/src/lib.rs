//! blocksite Core Library
//!
//! Configuration, error handling, the record model and the JSON record store
//! for the blocksite static site generator.

pub mod config;
pub mod error;
pub mod record;
pub mod store;

pub use config::Config;
pub use error::{CoreError, Result, SourceError};
pub use record::{ContentRecord, RecordCollection, RecordError};
pub use store::JsonRecordStore;
