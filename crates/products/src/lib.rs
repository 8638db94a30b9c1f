//! Products domain module.
//!
//! This crate contains the catalog `Product` record and its validation rules,
//! implemented as plain domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{Product, ProductDraft, DESCRIPTION_MAX_LEN, NAME_MAX_LEN};
