pub mod command;
pub mod history;
pub mod registry;
pub mod service;
pub mod tree;

pub use service::{SharedSvn, SvnService};
