//! Support code for the `cru` command line tool.

pub mod loader;
pub mod output;
