//! Estimate Engine for construction cost proposals
//!
//! This crate aggregates construction estimate line items (labor, materials,
//! equipment, subcontractors and miscellaneous costs) into a proposal total.
//! Markups are applied in a fixed order, change orders are split out from
//! the original scope, and sales tax applies to materials only.
//!
//! The engine itself is a pure function of an [`estimate::Estimate`]; the
//! [`api`] module exposes it over HTTP together with an in-memory
//! [`store`] of saved projects.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod estimate;
pub mod export;
pub mod models;
pub mod store;
