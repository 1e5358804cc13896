//! msfeedback library - device diagnostics and feedback composition.
//!
//! This library exposes the core functionality of the `msfeedback` CLI for use
//! in tests and embedding applications.
//!
//! # Modules
//!
//! - `platform`: Capability trait over the host (identity, storage, network, media)
//! - `report`: Fault-tolerant device report collector
//! - `image_ops`: Sample factor computation, bounded decoding and JPEG compression
//! - `content`: Image references and the local media store
//! - `resolver`: Image reference to filesystem path resolution
//! - `applog`: Append-only application log
//! - `feedback`: Draft validation, message composition and the outbox
//! - `config`: Configuration file handling
//! - `output`: Output mode abstraction (robot/human)
#![forbid(unsafe_code)]

pub mod applog;
pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod feedback;
pub mod image_ops;
pub mod logging;
pub mod output;
pub mod platform;
pub mod report;
pub mod resolver;
pub mod theme;
