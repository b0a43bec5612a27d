use std::{
    ffi::OsString,
    io::{self, Read},
    time::Duration,
};

use clap::Parser;
use infer_json::DEFAULT_TOKEN_CAPACITY;

/// Ask a chat-completion endpoint a question and print the answer.
///
/// Anything piped on standard input is sent along as context.
#[derive(Debug, Parser)]
#[command(
    name = "infer",
    version,
    after_help = "Environment:\n  INFER_BASE_URL  API base URL, e.g. https://api.openai.com/v1\n  \
                  INFER_API_KEY   bearer token\n  INFER_MODEL     model identifier\n  \
                  INFER_LOG       log filter (default: warn)"
)]
pub struct Cli {
    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 300)]
    pub timeout: u64,

    /// Most JSON tokens accepted in the response
    #[arg(long, value_name = "N", default_value_t = DEFAULT_TOKEN_CAPACITY)]
    pub token_capacity: usize,

    /// The prompt; multiple words are joined with spaces
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub prompt: Vec<OsString>,
}

impl Cli {
    /// Prompt words joined with single spaces, as raw bytes.
    #[must_use]
    pub fn prompt_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for (i, word) in self.prompt.iter().enumerate() {
            if i > 0 {
                out.push(b' ');
            }
            out.extend_from_slice(word.as_encoded_bytes());
        }
        out
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Reads piped context from `input`.
///
/// Returns `None` when `input` is a terminal, since nothing was piped.
///
/// # Errors
///
/// Reading `input` failed.
pub fn read_context(mut input: impl Read, is_terminal: bool) -> io::Result<Option<Vec<u8>>> {
    if is_terminal {
        return Ok(None);
    }
    let mut buf = Vec::new();
    input.read_to_end(&mut buf)?;
    Ok(Some(buf))
}
