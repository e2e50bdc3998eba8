//! Protocol module
//!
//! The line-oriented command grammar shared by text front ends.

pub mod command;
