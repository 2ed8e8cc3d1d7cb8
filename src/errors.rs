//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`RigError`] covers the recoverable failure modes,
//! which are all GPU bring-up related. Malformed scene input (a child node
//! listed before its parent, an animation targeting a node outside the graph)
//! indicates a scene that cannot be safely animated and is a fatal assertion,
//! not a [`RigError`].
//!
//! # Usage
//!
//! Fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, RigError>`.

use thiserror::Error;

/// The main error type for the rig engine.
#[derive(Error, Debug)]
pub enum RigError {
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),
}

/// Alias for `Result<T, RigError>`.
pub type Result<T> = std::result::Result<T, RigError>;
