use clap::{error::ErrorKind, Parser as _};

use firststep_drv::{init_logging, run, Cli};

fn main() {
    init_logging();
    match Cli::try_parse_from(std::env::args_os()) {
        Ok(cli) => std::process::exit(run(cli)),
        Err(e) => {
            // `--help`/`--version` exit 0 via clap's own convention; any
            // other parse failure is spec.md §6's "missing arguments"
            // case, which exits 1 rather than clap's default of 2.
            if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
                e.exit();
            }
            eprint!("{e}");
            std::process::exit(1);
        }
    }
}
