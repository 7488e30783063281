//! Implementation of the `#[derive(Record)]` macro.
//!
//! The derive turns `#[col(...)]` field annotations into a
//! `tagtable::RecordType` descriptor, replacing runtime reflection with a
//! descriptor generated once at compile time.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
