//! Simple command that prints one or '-n count' identifiers of '-l length' characters

use std::{env, io, io::Write, process::ExitCode};

use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Options {
    count: Option<usize>,
    length: Option<usize>,
}

fn main() -> io::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut args = env::args();
    let program = args.next();
    let opts = match parse_args(args) {
        Ok(opts) => opts,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!(
                "Usage: {} [-n count] [-l length]",
                program.as_deref().unwrap_or("cuid2")
            );
            return Ok(ExitCode::FAILURE);
        }
    };

    let length = opts.length.unwrap_or(cuid2::DEFAULT_LENGTH);
    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..opts.count.unwrap_or(1) {
        match cuid2::cuid2_with_length(length) {
            Ok(id) => writeln!(buf, "{}", id)?,
            Err(err) => {
                eprintln!("Error: {}", err);
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    buf.flush()?;

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    while let Some(arg) = args.next() {
        let (name, slot) = match arg.as_str() {
            "-n" => ('n', &mut opts.count),
            "-l" => ('l', &mut opts.length),
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        };
        if slot.is_some() {
            return Err(format!("option '{}' given more than once", name));
        }
        let Some(value) = args.next() else {
            return Err(format!("argument to option '{}' missing", name));
        };
        let Ok(v) = value.parse() else {
            return Err(format!("invalid argument to option '{}': '{}'", name, value));
        };
        slot.replace(v);
    }
    Ok(opts)
}
