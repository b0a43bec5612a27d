//! `infer`: ask a chat-completion endpoint one question from the command line.
//!
//! The binary is a thin shell around [`infer_json`]: it gathers the prompt,
//! optional piped context and [`Config`], posts the hand-assembled payload
//! through a [`Transport`], and decodes the reply's `content` field.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod run;
pub mod transport;

pub use cli::Cli;
pub use config::{Config, ConfigError};
pub use error::InferError;
pub use run::ask;
pub use transport::{HttpResponse, HttpTransport, Transport, TransportError};
