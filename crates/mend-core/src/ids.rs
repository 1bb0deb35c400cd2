//! ID prefix constants for sitemend entities.
//!
//! Every entity ID has the form `{prefix}-{8 hex chars}`, e.g. `fix-a3f8b2c1`.
//! The hex suffix is minted by the database layer from 4 random bytes.

pub const PREFIX_AUDIT: &str = "aud";
pub const PREFIX_PAGE: &str = "pag";
pub const PREFIX_FINDING: &str = "fnd";
pub const PREFIX_FIX: &str = "fix";
pub const PREFIX_ACTIVITY: &str = "act";

/// All known prefixes, used by ID-generation tests.
pub const ALL_PREFIXES: &[&str] = &[
    PREFIX_AUDIT,
    PREFIX_PAGE,
    PREFIX_FINDING,
    PREFIX_FIX,
    PREFIX_ACTIVITY,
];

/// Length of a full ID: 3-char prefix + `-` + 8 hex chars.
pub const ID_LEN: usize = 12;
