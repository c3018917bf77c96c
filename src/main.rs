use anyhow::{Context, Result};
use clap::Parser;

mod ops;

use ops::installer::Installer;
use ops::paths::Paths;
use ops::pip::PipFailure;

#[derive(Parser, Debug)]
#[command(name = "esbgm-setup")]
#[command(
    about = "Installs the latest version of BGM for EmulationStation",
    long_about = None
)]
struct Cli {
    /// Install on top of an existing version.
    #[arg(short, long)]
    force: bool,

    /// Accept all prompts.
    #[arg(short, long)]
    yes: bool,

    /// Use the prerelease package.
    #[arg(long)]
    prerelease: bool,

    /// Uninstall es-bgm and remove its system integration.
    #[arg(long)]
    uninstall: bool,

    /// Do not write; print planned actions.
    #[arg(long)]
    dry_run: bool,
}

fn main() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(&cli) {
        // Package-manager failures surface pip's captured output and exit
        // with pip's own code.
        if let Some(failure) = err.root_cause().downcast_ref::<PipFailure>() {
            let output = format!("{}{}", failure.stdout, failure.stderr);
            if !output.is_empty() {
                eprintln!("{}", output.trim_end());
            }
            eprintln!("Error: {err:#}");
            std::process::exit(failure.exit_code());
        }

        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let paths = Paths::system().context("resolve host paths")?;
    let installer = Installer::new(paths, cli.yes, cli.dry_run);

    if cli.uninstall {
        installer.uninstall().context("uninstall")
    } else {
        installer
            .install(cli.prerelease, cli.force)
            .context("install")
    }
}
