//! Session Client CLI for the aws-mcp Tool Host.
//!
//! [`ClientArgs`] picks the target (pipe or HTTP), [`Walkthrough`] runs the demo
//! sequence and [`call_and_print`] runs a single invocation.

pub mod cli;
pub mod error;
pub mod walkthrough;

pub use cli::{ClientArgs, DEFAULT_SERVER_URL};
pub use error::{ClientError, ClientResult};
pub use walkthrough::{call_and_print, Walkthrough};
