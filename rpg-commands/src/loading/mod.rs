//! Bulk item import: bundled catalogs and CSV attachments.

pub mod catalog;
pub mod file;
