//! Break Placement Engine
//!
//! This crate computes rest-break placements inside a work shift from a set of
//! configurable break rules: applicability filtering, rule selection, parameter
//! validation, first-break positioning per distribution strategy, and
//! derivation of the remaining breaks.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
