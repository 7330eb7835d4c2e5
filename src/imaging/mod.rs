//! Codec boundary: everything that touches encoded images or resampling.
//!
//! | Operation | Provided by |
//! |---|---|
//! | **Decode** | [`ImageCodec::decode`] |
//! | **Resize (fit / fill)** | [`ImageCodec::resize`] |
//! | **Grayscale** | [`ImageCodec::to_grayscale`] |
//! | **Bounded sample** | [`sample`] |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing resize requests
//! - **Backend**: [`ImageCodec`] trait + [`RustBackend`]
//! - **Sampler**: the bounded-sample adapter the analysis code calls

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;
mod sampler;

pub use backend::{CodecError, ImageCodec};
pub use calculations::{calculate_ceiling_dimensions, calculate_fit_dimensions};
pub use params::{ResizeMode, ResizeParams};
pub use rust_backend::RustBackend;
pub use sampler::sample;
