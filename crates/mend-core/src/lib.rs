//! # mend-core
//!
//! Core types, ID generation, and error types for sitemend.
//!
//! This crate provides the foundational types shared across all sitemend crates:
//! - Entity structs for all domain objects (audits, pages, findings, fix records)
//! - The fix status enum with its state machine transitions
//! - Nested field paths for CMS document addressing
//! - ID prefix constants and formatting helpers
//! - Cross-cutting error types
//! - CLI response types
//! - Activity detail sub-types

pub mod activity_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod field_path;
pub mod ids;
pub mod responses;
