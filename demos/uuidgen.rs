//! Simple command that prints one or '-n count' UUID strings of version 1, 4 or 6 ('-v version')

use std::{env, io, io::Write, process::ExitCode};

use embedded_uuid::Uuid;

struct Options {
    count: usize,
    generate: fn() -> Uuid,
}

fn main() -> io::Result<ExitCode> {
    let opts = {
        let mut args = env::args();
        let program = args.next();
        match parse_args(args) {
            Ok(opts) => opts,
            Err(message) => {
                eprintln!("Error: {}", message);
                eprintln!(
                    "Usage: {} [-n count] [-v 1|4|6]",
                    program.as_deref().unwrap_or("uuidgen")
                );
                return Ok(ExitCode::FAILURE);
            }
        }
    };

    let mut buf = io::BufWriter::new(io::stdout());
    for _ in 0..opts.count {
        writeln!(buf, "{}", (opts.generate)())?;
    }

    Ok(ExitCode::SUCCESS)
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, String> {
    let mut count = None;
    let mut generate = None;
    while let Some(arg) = args.next() {
        let opt = match arg.as_str() {
            "-n" => 'n',
            "-v" => 'v',
            _ => return Err(format!("unrecognized argument '{}'", arg)),
        };
        let Some(opt_arg) = args.next() else {
            return Err(format!("argument to option '{}' missing", opt));
        };

        if opt == 'n' {
            if count.is_some() {
                return Err("option 'n' given more than once".to_owned());
            }
            let Ok(c) = opt_arg.parse() else {
                return Err(format!("invalid argument to option 'n': '{}'", opt_arg));
            };
            count.replace(c);
        } else {
            if generate.is_some() {
                return Err("option 'v' given more than once".to_owned());
            }
            let f: fn() -> Uuid = match opt_arg.as_str() {
                "1" => embedded_uuid::uuid1,
                "4" => embedded_uuid::uuid4,
                "6" => embedded_uuid::uuid6,
                _ => return Err(format!("unsupported version: '{}'", opt_arg)),
            };
            generate.replace(f);
        }
    }

    Ok(Options {
        count: count.unwrap_or(1),
        generate: generate.unwrap_or(embedded_uuid::uuid6),
    })
}
