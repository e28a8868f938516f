//! Filesystem primitives for safer-claude
//!
//! Provides the path filter shared by snapshot and reconciliation, streaming
//! content checksums, forward-slash relative keys and copy helpers that
//! never leave a half-written file behind.

pub mod checksum;
pub mod config;
pub mod error;
pub mod filter;
pub mod io;
pub mod path;

pub use checksum::{ContentDigest, compute_content_checksum, compute_file_checksum};
pub use config::{ConfigStore, Format};
pub use error::{Error, Result};
pub use filter::{Entry, FnRule, HiddenDirs, JunkFiles, PathFilter, SkipRule};
pub use path::{is_network_path, join_key, relative_key};
