//! PhotoSweep Core Domain Logic
//!
//! This crate contains:
//! - Browsing session and trash buffer
//! - Session controller driving a view from user actions and library events
//! - Photo library boundary and its folder-backed implementation
//! - Thumbnail decoding and caching
//! - Configuration, key bindings and localization
//! - Error types

pub mod asset;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod gateway;
pub mod i18n;
pub mod library;
pub mod permission;
pub mod session;
pub mod thumbnail;
pub mod trash;
pub mod ui_state;
pub mod view;

#[cfg(test)]
mod testing;

pub use asset::{AssetId, AssetRef, Thumbnail, ThumbnailSize};
pub use command::{Command, CommandId, KeyMap};
pub use config::{AppConfig, GeneralConfig, LibraryConfig, ViewerConfig};
pub use controller::{SessionAction, SessionController, SessionHandle};
pub use error::AppError;
pub use gateway::{LibrarySubscription, PhotoLibraryGateway};
pub use i18n::I18n;
pub use library::{FsLibraryOptions, FsPhotoLibrary};
pub use permission::{PermissionState, PermissionStatus};
pub use session::{BrowsingSession, SessionError};
pub use thumbnail::ThumbnailCache;
pub use trash::{CommitError, TrashBuffer};
pub use ui_state::UiState;
pub use view::SessionView;
