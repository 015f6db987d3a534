//! The `hollow` command: reads class declarations, generates a builder class for one of
//! them, and writes it out or checks that a checked-in copy is current.
//!
//! ```text
//! hollow generate <decls> <type> [-o <file>] [--builder-name <name>] [--package <pkg>] [--no-header]
//! hollow check    <decls> <type>  -o <file>  [--builder-name <name>] [--package <pkg>] [--no-header]
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use hollow::{EmitError, EmitOptions, TypeModel, generate};
use log::{debug, info};
use owo_colors::OwoColorize;
use similar::{ChangeTag, TextDiff};

pub mod decls;

pub use decls::{DeclError, parse_declarations, read_registry};

/// Printed for `help` and after usage errors
pub const USAGE: &str = "\
Usage: hollow <generate|check> <decls> <type> [options]

Reads the class declarations in <decls> and emits a builder class for <type>
(a binary name such as com.example.Outer$Inner).

Commands:
  generate    write the builder to the output file, or to stdout
  check       fail if the output file differs from what generate would write

Options:
  -o, --output <file>       output file (`-` for stdout, the default for generate)
      --builder-name <name> simple name of the builder class
      --package <pkg>       package of the builder class
      --no-header           leave out the generated-file header
  -h, --help                print this message
";

/// Where generated source goes
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Dest {
    /// standard output
    Stdout,
    /// a file, replaced atomically
    File(PathBuf),
}

/// One builder to produce
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Job {
    /// the declaration file
    pub decls: PathBuf,
    /// binary name of the target class
    pub type_name: String,
    /// output
    pub dest: Dest,
    /// emitter options
    pub options: EmitOptions,
}

/// A parsed command line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// print usage
    Help,
    /// emit and write
    Generate(Job),
    /// emit and compare with the output file
    Check(Job),
}

/// Everything that makes the command fail
#[derive(Debug)]
#[non_exhaustive]
pub enum CliError {
    /// bad command line
    Usage(String),
    /// reading or writing a file failed
    Io(io::Error),
    /// the declaration file is malformed
    Declarations {
        /// the declaration file
        path: PathBuf,
        /// what is wrong with it
        error: DeclError,
    },
    /// no builder could be emitted
    Emit(EmitError),
    /// `check` found an output file that does not match
    Stale {
        /// the output file
        path: PathBuf,
    },
}

impl CliError {
    /// Process exit code: 1 when the input was understood but refused, 2 for usage errors,
    /// 3 when files could not be read or written
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Emit(_) | CliError::Stale { .. } => 1,
            CliError::Usage(_) => 2,
            CliError::Io(_) | CliError::Declarations { .. } => 3,
        }
    }

    /// Short machine-readable category, printed as `error[kind]`
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::Usage(_) => "usage",
            CliError::Io(_) => "io",
            CliError::Declarations { .. } => "declarations",
            CliError::Emit(err) => err.kind(),
            CliError::Stale { .. } => "stale",
        }
    }
}

impl core::fmt::Display for CliError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CliError::Usage(msg) => f.write_str(msg),
            CliError::Io(err) => write!(f, "{err}"),
            CliError::Declarations { path, error } => write!(f, "{}:{error}", path.display()),
            CliError::Emit(err) => write!(f, "{err}"),
            CliError::Stale { path } => write!(
                f,
                "{} is out of date, run `hollow generate` to update it",
                path.display()
            ),
        }
    }
}

impl core::error::Error for CliError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            CliError::Io(err) => Some(err),
            CliError::Declarations { error, .. } => Some(error),
            CliError::Emit(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Io(err)
    }
}

impl From<EmitError> for CliError {
    fn from(err: EmitError) -> Self {
        CliError::Emit(err)
    }
}

fn usage(msg: impl Into<String>) -> CliError {
    CliError::Usage(msg.into())
}

/// Parses the arguments that follow the program name
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Command, CliError> {
    let mut args = args.iter().map(AsRef::<str>::as_ref);
    let subcommand = match args.next() {
        None => return Err(usage("missing command")),
        Some("help" | "-h" | "--help") => return Ok(Command::Help),
        Some(cmd @ ("generate" | "check")) => cmd,
        Some(other) => return Err(usage(format!("unknown command `{other}`"))),
    };

    let mut positional = Vec::new();
    let mut dest = None;
    let mut options = EmitOptions::new();
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag, Some(value)),
            _ => (arg, None),
        };
        let mut value = |name: &str| -> Result<String, CliError> {
            inline
                .or_else(|| args.next())
                .map(str::to_string)
                .ok_or_else(|| usage(format!("{name} needs a value")))
        };
        match flag {
            "-h" | "--help" => return Ok(Command::Help),
            "-o" | "--output" => {
                dest = Some(match value(flag)?.as_str() {
                    "-" => Dest::Stdout,
                    path => Dest::File(PathBuf::from(path)),
                })
            }
            "--builder-name" => options = options.builder_name(value(flag)?),
            "--package" => options = options.package(value(flag)?),
            "--no-header" if inline.is_none() => options = options.header(false),
            _ if flag.starts_with('-') && flag != "-" => {
                return Err(usage(format!("unknown option `{arg}`")));
            }
            _ => positional.push(arg),
        }
    }

    let [decls, type_name] = positional[..] else {
        return Err(usage(format!(
            "{subcommand} takes a declaration file and a type name, got {} argument(s)",
            positional.len()
        )));
    };
    let job = |dest| Job {
        decls: PathBuf::from(decls),
        type_name: type_name.to_string(),
        dest,
        options,
    };
    match subcommand {
        "check" => match dest {
            Some(Dest::File(path)) => Ok(Command::Check(job(Dest::File(path)))),
            _ => Err(usage("check needs an output file (-o <file>)")),
        },
        _ => Ok(Command::Generate(job(dest.unwrap_or(Dest::Stdout)))),
    }
}

/// Reads the declarations and emits the builder source for `job`
pub fn emit_job(job: &Job) -> Result<String, CliError> {
    let src = fs_err::read_to_string(&job.decls)?;
    let registry = read_registry(&src).map_err(|error| CliError::Declarations {
        path: job.decls.clone(),
        error,
    })?;
    debug!(
        "{} declares {} type(s)",
        job.decls.display(),
        registry.len()
    );
    let model = TypeModel::new(registry);
    Ok(generate(&model, &job.type_name, &job.options)?)
}

/// Runs `command`, writing source and diffs to `out`. Diffs are colored when `color` is set.
pub fn run(command: &Command, out: &mut dyn Write, color: bool) -> Result<(), CliError> {
    match command {
        Command::Help => {
            out.write_all(USAGE.as_bytes())?;
        }
        Command::Generate(job) => {
            let source = emit_job(job)?;
            match &job.dest {
                Dest::Stdout => out.write_all(source.as_bytes())?,
                Dest::File(path) => write_if_changed(path, &source)?,
            }
        }
        Command::Check(job) => {
            let source = emit_job(job)?;
            let Dest::File(path) = &job.dest else {
                return Err(usage("check needs an output file (-o <file>)"));
            };
            let current = match fs_err::read_to_string(path) {
                Ok(current) => current,
                Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
                Err(err) => return Err(err.into()),
            };
            if current == source {
                info!("{} is up to date", path.display());
            } else {
                write_diff(out, &current, &source, color)?;
                return Err(CliError::Stale { path: path.clone() });
            }
        }
    }
    Ok(())
}

/// Replaces `path` with `contents` through a temporary file in the same directory, so
/// readers never see a partial file. Leaves the file alone when it already matches.
pub fn write_if_changed(path: &Path, contents: &str) -> io::Result<()> {
    if fs_err::read_to_string(path).is_ok_and(|current| current == contents) {
        info!("{} is up to date", path.display());
        return Ok(());
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs_err::create_dir_all(dir)?;
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| err.error)?;
    info!("wrote {}", path.display());
    Ok(())
}

const CONTEXT_LINES: usize = 3;

/// Writes a line diff from `old` to `new`, keeping a few lines of context around changes
pub fn write_diff(out: &mut dyn Write, old: &str, new: &str, color: bool) -> io::Result<()> {
    let diff = TextDiff::from_lines(old, new);
    let changes: Vec<_> = diff.iter_all_changes().collect();

    let mut show = vec![false; changes.len()];
    for (idx, change) in changes.iter().enumerate() {
        if change.tag() != ChangeTag::Equal {
            let start = idx.saturating_sub(CONTEXT_LINES);
            let end = (idx + CONTEXT_LINES + 1).min(changes.len());
            show[start..end].fill(true);
        }
    }

    let mut last_was_ellipsis = false;
    for (change, shown) in changes.iter().zip(show) {
        if !shown {
            if !last_was_ellipsis {
                writeln!(out, "{}", paint("    ...", color, |s| s.dimmed().to_string()))?;
                last_was_ellipsis = true;
            }
            continue;
        }
        last_was_ellipsis = false;

        let line = change.to_string_lossy();
        let line = line.trim_end_matches('\n');
        let rendered = match change.tag() {
            ChangeTag::Insert => paint(&format!("    +{line}"), color, |s| s.green().to_string()),
            ChangeTag::Delete => paint(&format!("    -{line}"), color, |s| s.red().to_string()),
            ChangeTag::Equal => paint(&format!("     {line}"), color, |s| s.dimmed().to_string()),
        };
        writeln!(out, "{rendered}")?;
    }
    Ok(())
}

fn paint(text: &str, color: bool, style: impl Fn(&str) -> String) -> String {
    if color { style(text) } else { text.to_string() }
}
