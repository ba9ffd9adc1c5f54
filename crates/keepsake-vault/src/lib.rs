//! `keepsake-vault` — Client-side vault logic for keepsake.
//!
//! Version history bookkeeping, token session metadata, the interactive
//! command vocabulary, masked terminal input, and persisted client settings.
//! Built on the primitives in `keepsake-crypto-core`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod versions;

pub mod session;

pub mod commands;

pub mod terminal;

pub mod settings;

pub use commands::{find_command, Command, UnknownCommand};
pub use error::VaultError;
pub use session::TokenSession;
pub use settings::ClientSettings;
pub use terminal::{read_secret, read_secret_from, EchoGuard};
pub use versions::{deduplicate, latest, Version};
