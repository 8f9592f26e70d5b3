//! Docsight Storage Library
//!
//! Transient storage for uploaded files. Files are written under a single upload
//! directory, keyed by the client's file name, so two uploads with the same name
//! overwrite each other.

pub mod local;
pub mod traits;

pub use local::LocalUploadStorage;
pub use traits::{StorageError, StorageResult, StoredFile, UploadStorage};
