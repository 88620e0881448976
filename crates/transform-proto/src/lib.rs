//! transform-proto: Serialization formats for transform-core values
//!
//! Provides:
//! - Binary framing (storage, wire)
//! - JSON in the object layout of the original JavaScript binding
//! - ASCII armor (human-readable export)
//!
//! ## Format Selection
//!
//! | Format      | Use Case                    | Size Overhead |
//! |-------------|-----------------------------|--------------:|
//! | Binary      | Wire, storage               |     6 bytes   |
//! | JSON        | Debug, API, JS interop      |        ~40%   |
//! | ASCII Armor | Key export, manual backup   |        ~37%   |
//!
//! Decoding never verifies signatures; the engine does that on use.

pub mod armor;
pub mod binary;
pub mod error;
pub mod format;
pub mod impls;
pub mod json;

pub use armor::{armor_decode, armor_encode, ArmorType};
pub use error::{ProtoError, ProtoResult};
pub use format::{detect_format, Format, MultiFormat};
