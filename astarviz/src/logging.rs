//! `env_logger` setup for the two binaries.
//!
//! The default filter is `info`; `RUST_LOG` overrides it.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::error::Result;

fn builder() -> Builder {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{}] {} - {}",
            record.level(),
            record.target(),
            record.args()
        )
    });
    builder
}

/// Log to `path`, truncating it. Used by the terminal binary, whose screen
/// is owned by the driver.
pub fn init_file(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    builder().target(Target::Pipe(Box::new(file))).try_init()?;
    Ok(())
}

/// Log to stderr.
pub fn init_stderr() -> Result<()> {
    builder().target(Target::Stderr).try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VizError;

    #[test]
    fn second_init_reports_the_conflict() {
        // Whichever call wins the global logger, the other must fail loudly.
        let first = init_stderr();
        let second = init_stderr();
        assert!(first.is_ok() || matches!(first, Err(VizError::Logger(_))));
        assert!(matches!(second, Err(VizError::Logger(_))));
    }

    #[test]
    fn unwritable_log_file_is_io_error() {
        let err = init_file(Path::new("/nonexistent/dir/astarviz.log"));
        assert!(matches!(err, Err(VizError::Io(_))));
    }
}
