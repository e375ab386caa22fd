/*!
 * Command-line interface for pcat
 */

use std::io::{self, BufWriter, ErrorKind};
use std::process;

use clap::Parser;
use log::debug;

use pcat::classifier::{classify, FsProbe};
use pcat::config::{self, Args};
use pcat::error::PcatError;
use pcat::Aggregator;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    setup_logging(&args);
    debug!("CLI args parsed: {:?}", args);

    if let Some(shell) = args.generate {
        if let Err(e) = config::write_completions(shell, &mut io::stdout()) {
            eprintln!("pcat: error: {}", e);
            process::exit(1);
        }
        return;
    }

    if args.has_no_input() {
        let _ = config::print_help();
        process::exit(1);
    }

    let code = match run(&args) {
        Ok(()) => 0,
        // Downstream closed the pipe (e.g. `| head`): stop quietly
        Err(PcatError::Io(ref e)) if e.kind() == ErrorKind::BrokenPipe => 0,
        Err(e) => {
            eprintln!("pcat: error: {}", e);
            e.exit_code()
        }
    };
    debug!("Exiting with code {}", code);
    process::exit(code);
}

fn run(args: &Args) -> pcat::Result<()> {
    // Validate arguments and build the request before any output
    let spec = classify(args, &FsProbe)?;
    debug!("Input spec: {:?}", spec);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    Aggregator::new(spec).run(&mut out)?;

    Ok(())
}

fn setup_logging(args: &Args) {
    env_logger::Builder::new()
        .filter_level(args.log_level())
        .format_timestamp(None)
        .init();
}
