use std::io::IsTerminal;
use std::process::ExitCode;

use hollow_cli::{CliError, USAGE, parse_args, run};
use hollow_testhelpers::{level_from_env, setup_with_level};
use log::LevelFilter;
use owo_colors::OwoColorize;

fn main() -> ExitCode {
    setup_with_level(level_from_env(
        std::env::var("RUST_LOG").ok().as_deref(),
        LevelFilter::Info,
    ));

    let args: Vec<String> = std::env::args().skip(1).collect();
    let stdout = std::io::stdout();
    let color = stdout.is_terminal();
    let result = parse_args(&args).and_then(|command| run(&command, &mut stdout.lock(), color));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let kind = format!("error[{}]", err.kind());
            if std::io::stderr().is_terminal() {
                eprintln!("{}: {err}", kind.red().bold());
            } else {
                eprintln!("{kind}: {err}");
            }
            if matches!(err, CliError::Usage(_)) {
                eprintln!();
                eprint!("{USAGE}");
            }
            ExitCode::from(err.exit_code())
        }
    }
}
