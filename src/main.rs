use std::{fs::File, path::Path, process::ExitCode};

use clap::Parser;
use dvdsaver::{
    config::{Args, Config},
    saver::Saver,
};
use env_logger::{Env, Target};
use log::{error, info};

fn main() -> ExitCode {
    let args = Args::parse();
    let to_file = init_logging(args.log_file.as_deref());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            if to_file {
                eprintln!("dvdsaver: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> dvdsaver::Result<()> {
    let config = Config::try_from(args)?;
    let image = config.logo.load()?;
    info!(
        "loaded {}x{} logo from {:?}",
        image.width(),
        image.height(),
        config.logo
    );
    Saver::new(config, image).run()
}

/// Logs go to `log_file` when given, since the animation owns the terminal. Without one
/// only warnings and errors are shown, on stderr. Returns whether logging to a file.
fn init_logging(log_file: Option<&Path>) -> bool {
    let file = log_file.and_then(|path| match File::create(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("dvdsaver: cannot open log file {}: {e}", path.display());
            None
        }
    });
    let default_filter = if file.is_some() { "info" } else { "warn" };

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));
    let to_file = file.is_some();
    if let Some(file) = file {
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    to_file
}
