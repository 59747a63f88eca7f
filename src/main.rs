//! pfs-ls: list one directory through the portable filesystem layer

use clap::Parser;
use portable_fs::cli::Args;
use portable_fs::listing::list_directory;
use portable_fs::FsPath;
use std::io::Write;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = args.validate() {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    tracing_subscriber::fmt()
        .with_max_level(args.output.log_level())
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let directory = FsPath::new(&args.directory);
    tracing::info!("Listing {}", directory);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    list_directory(&directory, args.use_utc(), &mut out)?;
    out.flush()?;
    Ok(())
}
