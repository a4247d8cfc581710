//! Sandboxed markdown vault.
//!
//! This module provides path sandboxing, hashtag extraction, a
//! modification-time validated content cache, and the [`Vault`] operations
//! built on top of them.

pub mod cache;
pub mod cancel;
pub mod error;
pub mod guard;
pub mod store;
pub mod tags;
pub mod walker;

pub use cache::{CacheEntry, ContentCache};
pub use cancel::Cancellation;
pub use error::VaultError;
pub use guard::{MARKDOWN_EXT, PathGuard};
pub use store::{NoteInfo, Vault};
pub use tags::extract_tags;
pub use walker::{VaultWalker, WalkedFile};
