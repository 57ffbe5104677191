//! Shared core logic for the ODS Actions console.
//!
//! Everything in this crate is pure and host-testable: symbol list
//! normalization, the per-tab request lifecycle state machine, row mapping
//! over raw backend JSON, cell formatting, table export, audit-log filtering,
//! and admin-form validation. The `frontend` crate wires these into the UI.

pub mod export;
pub mod lifecycle;
pub mod model;
pub mod rows;
pub mod symbols;
