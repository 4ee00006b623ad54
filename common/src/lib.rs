#[cfg(feature = "testing")]
pub mod testing;

use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Loads variables from a `.env` file if one is present.
pub fn load_env() {
    dotenvy::dotenv().ok();
}

/// Initializes the logger with a default filter level of "info".
///
/// `RUST_LOG` overrides the filter. When `log_file` is given, records are
/// appended to that file instead of stderr.
pub fn init_logger(log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));

    if let Some(path) = log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.init();
    Ok(())
}
