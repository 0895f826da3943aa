//! firststep-drv - the `firststep` command-line driver (spec.md §6).
//!
//! Two paths share one front end (lex + parse): interpret the parsed
//! program directly, or lower it to IR and emit RISC-V 32 assembly.
//! Exit status follows spec.md §6 exactly — `main`'s return value (or
//! the emitted-assembly success code `0`) on success, otherwise the
//! summed per-stage error counts from the shared [`Handler`].

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser as ClapParser;

use firststep_gen::AsmGenerator;
use firststep_interp::Interpreter;
use firststep_ir::IrGen;
use firststep_par::{FunDef, Parser};
use firststep_util::{Handler, SourceMap, Stage};

/// Tree-walking interpreter and RISC-V 32 compiler for the firststep
/// language.
#[derive(Debug, ClapParser)]
#[command(name = "firststep", version, about)]
pub struct Cli {
    /// Source file to interpret, or compile with `-c`.
    pub input: PathBuf,

    /// Compile to RISC-V 32 assembly instead of interpreting.
    #[arg(short = 'c', long = "compile")]
    pub compile: bool,

    /// Write emitted assembly here instead of stdout (requires `-c`).
    #[arg(short = 'o', long = "output", requires = "compile")]
    pub output: Option<PathBuf>,
}

/// Installs a `tracing` subscriber reading its filter from `RUST_LOG`,
/// defaulting to `warn` so a plain run stays quiet on stderr.
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Runs the driver end to end and returns the process exit status.
pub fn run(cli: Cli) -> i32 {
    let source = match fs::read_to_string(&cli.input) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: could not read '{}': {e}", cli.input.display());
            return 1;
        }
    };

    let handler = Handler::with_source_map(SourceMap::new(cli.input.clone(), source.clone()));
    tracing::debug!(path = %cli.input.display(), "read source file");

    if cli.compile {
        run_compile(&source, &handler, cli.output.as_deref())
    } else {
        run_interpret(&source, &handler)
    }
}

/// Parses `source` to completion, stopping at the first error (spec.md
/// §4.2). Returns whatever functions parsed before that point.
fn parse_all(source: &str, handler: &Handler) -> Vec<FunDef> {
    let mut parser = Parser::new(source, handler);
    let mut funcs = Vec::new();
    while let Some(result) = parser.parse_next() {
        match result {
            Ok(f) => funcs.push(f),
            Err(()) => break,
        }
    }
    funcs
}

fn run_interpret(source: &str, handler: &Handler) -> i32 {
    let funcs = parse_all(source, handler);

    let mut interp = Interpreter::new(handler);
    for f in funcs {
        let _ = interp.register(f);
    }

    if !handler.has_errors() {
        if let Some(v) = interp.eval_main() {
            tracing::info!(result = v, "program returned");
            return v;
        }
    }
    handler.total_error_num(&[Stage::Lexer, Stage::Parser, Stage::Interpreter]) as i32
}

fn run_compile(source: &str, handler: &Handler, output: Option<&Path>) -> i32 {
    let funcs = parse_all(source, handler);
    if handler.has_errors() {
        return handler.total_error_num(&[Stage::Lexer, Stage::Parser]) as i32;
    }

    let mut irgen = IrGen::new(handler);
    let _ = irgen.lower_program(&funcs);
    if handler.has_errors() {
        return handler.total_error_num(&[Stage::Lexer, Stage::Parser, Stage::IrGen]) as i32;
    }
    let module = irgen.into_module();

    let asm = match AsmGenerator::new().generate_module(&module) {
        Ok(asm) => asm,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    match output {
        Some(path) => {
            if let Err(e) = fs::write(path, &asm) {
                eprintln!("error: could not write '{}': {e}", path.display());
                return 1;
            }
            tracing::info!(path = %path.display(), "wrote assembly");
        }
        None => {
            let _ = std::io::stdout().write_all(asm.as_bytes());
        }
    }
    0
}
