use std::{
    io::{self, IsTerminal, Write},
    process::ExitCode,
};

use clap::Parser;
use infer::{Cli, Config, HttpTransport, InferError, ask, cli::read_context, logging};
use infer_json::Tokenizer;
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), InferError> {
    let config = Config::from_env()?;
    debug!(?config, "loaded configuration");

    let stdin = io::stdin();
    let is_terminal = stdin.is_terminal();
    let context = read_context(stdin.lock(), is_terminal)?;

    let transport = HttpTransport::new(cli.timeout())?;
    let content = ask(
        &config,
        &transport,
        Tokenizer::new(cli.token_capacity),
        &cli.prompt_bytes(),
        context.as_deref(),
    )?;

    let mut stdout = io::stdout().lock();
    stdout.write_all(&content)?;
    stdout.write_all(b"\n")?;
    stdout.flush()?;
    Ok(())
}
