//! lessprune - finds and removes unused `@import` statements from LESS stylesheets
//!
//! This crate analyses less.js syntax trees to work out which symbols each
//! file defines and which it references, and from that which of its imports
//! contribute nothing. Those imports can then be removed from the source text.

pub mod analysis;
pub mod export;
pub mod files;
pub mod logging;
pub mod parser;
pub mod tree;
