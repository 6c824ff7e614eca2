//! Porcelain commands (user-facing operations)
//!
//! ## Commands
//!
//! - `init`: Create the repository skeleton
//! - `add`: Stage files and directories
//! - `status`: Compare the working tree with the index
//! - `diff`: Show line changes of modified files

pub mod add;
pub mod diff;
pub mod init;
pub mod status;
