//! Core library components.
//!
//! The reference grammar, the secret store client and cache, and the
//! substitution engine built on top of them.

pub mod cache;
pub mod constants;
pub mod reference;
pub mod store;
pub mod substitute;
pub mod transform;
pub mod values;
