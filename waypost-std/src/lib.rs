//! # waypost-std
//!
//! Standard implementations for the Waypost client-side navigation engine.
//!
//! This crate provides:
//! - **Link interception**: [`LinkInterceptor`]
//! - **Navigation**: [`NavigationService`], [`NavigationServiceBuilder`]
//! - **Rendering**: [`ViewOutlet`]
//! - **Hosts**: [`MemoryHost`]
//! - **Executors**: `TokioSpawner` (feature `tokio`)
//! - **Testing**: [`testing`] helpers for driving navigation step by step

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use waypost_core;

mod log;

// Modules
pub mod host;
pub mod interceptor;
pub mod navigation;
pub mod outlet;
#[cfg(feature = "tokio")]
pub mod spawn;
pub mod testing;

pub use host::{HistoryEntry, MemoryHost};
pub use interceptor::{Ignored, LinkInterceptor};
pub use navigation::{NavigationService, NavigationServiceBuilder};
pub use outlet::ViewOutlet;
#[cfg(feature = "tokio")]
pub use spawn::TokioSpawner;
