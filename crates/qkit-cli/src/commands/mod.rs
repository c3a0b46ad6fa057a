//! CLI command implementations.

pub mod common;
pub mod decompose;
pub mod gates;
pub mod ket;
pub mod matrix;
pub mod random;
pub mod version;
