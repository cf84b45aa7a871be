//! Data models for the contacts backend.

mod contact;

pub use contact::*;
