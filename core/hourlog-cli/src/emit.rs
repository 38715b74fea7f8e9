//! One-shot emit through a `LeveledLogger` built from the resolved config.

use hourlog::{Level, LogConfig, Logging};

use crate::CliError;

/// Emits `words`, joined by single spaces, at `level`.
///
/// Unlike library callers the CLI reports an unusable log directory, since a
/// user running `hourlog emit` wants to know the line went nowhere.
pub fn run(config: &LogConfig, level: Level, words: &[String]) -> Result<(), CliError> {
    let logging = Logging::from_config(config);
    let logger = logging.logger();

    if !logger.enabled(level) {
        tracing::debug!(%level, threshold = %logger.threshold(), "Message below threshold");
        return Ok(());
    }

    logging.writer().open_current()?;
    logger.log(level, words.join(" "));
    Ok(())
}
