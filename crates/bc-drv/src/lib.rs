//! `bc-drv` ties the lexer, parser/code-generator, and intermediate-file
//! writer into one single-file compilation: `source.b` in, an intermediate
//! `.bif` file out. Owns the CLI surface, logging initialisation, and
//! optional config-file loading — everything `b-lex`/`b-par`/`b-bif`
//! themselves stay silent about.

mod config;
mod error;
mod listing;

pub use config::Config;
pub use error::{DriverError, Result};

use b_lex::Lexer;
use b_par::Parser;
use b_util::{FileId, Handler, Interner};
use clap::Parser as _;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `bc <input.b> [-o <output.bif>] [--emit-tokens] [--emit-code] [-v|--verbose] [--listing] [-c <config.toml>]`
#[derive(clap::Parser, Debug)]
#[command(name = "bc")]
#[command(author = "B Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compiles a B source file to the stack-machine intermediate format", long_about = None)]
pub struct Cli {
    /// B source file to compile
    pub input: PathBuf,

    /// Output path for the intermediate file (default: input with a `.bif` extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Dump the token stream and stop, without parsing
    #[arg(long)]
    pub emit_tokens: bool,

    /// Print the per-function code-fragment listing instead of writing the intermediate file
    #[arg(long)]
    pub emit_code: bool,

    /// Print the code-fragment listing in addition to writing the intermediate file
    #[arg(long)]
    pub listing: bool,

    /// Enable verbose (debug-level) logging
    #[arg(short, long, env = "BC_VERBOSE")]
    pub verbose: bool,

    /// Path to a TOML config file providing defaults for `output`/`verbose`
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,
}

/// Process exit codes, matching `spec.md` §7's categories plus the driver's
/// own command-line-error case.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const COMPILATION_FAILED: i32 = 1;
    pub const INTERNAL_ERROR: i32 = 2;
}

/// Initializes `tracing_subscriber` once for the process: `info` by
/// default, `debug` under `--verbose` (`faxt::main::init_logging`'s shape).
pub fn init_logging(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    let _ = tracing_subscriber::registry().with(filter).with(fmt::layer().with_target(false)).try_init();
}

/// Resolves config-file defaults, then lets CLI flags override them.
pub fn resolve_output(cli: &Cli, config: &Config) -> PathBuf {
    cli.output
        .clone()
        .or_else(|| config.output.clone())
        .unwrap_or_else(|| cli.input.with_extension("bif"))
}

pub fn resolve_verbose(cli: &Cli, config: &Config) -> bool {
    cli.verbose || config.verbose
}

/// One compilation's worth of state: the string interner and the
/// diagnostic handler, mirroring `faxc_drv::Session` generalized to the
/// `b` pipeline (lex -> parse+codegen -> write, no HIR/MIR/LIR stages).
pub struct Session {
    pub interner: Interner,
    pub handler: Handler,
}

impl Session {
    pub fn new() -> Self {
        Self { interner: Interner::new(), handler: Handler::new() }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the whole CLI invocation end to end and returns the process exit
/// code. Only I/O and serialization failures become `Err`; a source file
/// that fails to compile is reported on stderr and reflected in the
/// returned exit code, per `spec.md` §7.
pub fn run(cli: Cli) -> Result<i32> {
    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::default(),
    };
    init_logging(resolve_verbose(&cli, &config));

    let source = std::fs::read_to_string(&cli.input).map_err(|e| DriverError::ReadSource(cli.input.clone(), e))?;
    let mut session = Session::new();

    if cli.emit_tokens {
        emit_tokens(&source, &mut session);
        return Ok(exit_code::SUCCESS);
    }

    let parser = Parser::new(&source, FileId::new(0), &mut session.interner, &session.handler);
    let program = parser.parse_program();

    for diag in session.handler.diagnostics() {
        report_diagnostic(&cli.input, &diag);
    }

    if session.handler.has_errors() {
        tracing::error!("compilation failed: {} error(s)", session.handler.error_count());
        return Ok(exit_code::COMPILATION_FAILED);
    }

    if cli.emit_code || cli.listing {
        print!("{}", listing::render(&program.table, &program.fragments, &session.interner));
    }
    if cli.emit_code {
        return Ok(exit_code::SUCCESS);
    }

    let output_path = resolve_output(&cli, &config);
    write_output(&output_path, &program, &session.interner)?;
    tracing::info!("wrote {}", output_path.display());
    Ok(exit_code::SUCCESS)
}

fn emit_tokens(source: &str, session: &mut Session) {
    let mut lexer = Lexer::new(source, FileId::new(0));
    loop {
        let tok = lexer.next_token(&mut session.interner, &session.handler);
        let is_eof = tok.is_eof();
        println!("{:?}", tok.kind);
        if is_eof {
            break;
        }
    }
}

/// Writes the intermediate file, removing the partial output on failure
/// (`spec.md` §7's "on output failure the partial file is removed").
fn write_output(path: &Path, program: &b_par::Program, interner: &Interner) -> Result<()> {
    let mut file = std::fs::File::create(path).map_err(|e| DriverError::WriteOutput(path.to_path_buf(), e))?;
    if let Err(err) = b_bif::write_program(&program.table, &program.fragments, interner, &mut file) {
        let _ = std::fs::remove_file(path);
        return Err(err.into());
    }
    Ok(())
}

fn report_diagnostic(input: &Path, diag: &b_util::Diagnostic) {
    let code = diag.code.map(|c| format!("[{}]", c.as_str())).unwrap_or_default();
    eprintln!("{}:{}: {}: {} {}", input.display(), diag.span.line, diag.level, diag.message, code);
    for note in &diag.notes {
        eprintln!("  note: {note}");
    }
}
