//! Command handlers, one module per subcommand.

pub mod completions;
pub mod config;
pub mod frontends;
pub mod init;
pub mod inspect;
pub mod new;
pub mod profiles;
