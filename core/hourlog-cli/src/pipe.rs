//! Copies stdin into the hourly files, one write per line.
//!
//! Failed writes are reported through tracing and skipped; the pipe keeps
//! draining stdin so the producer never blocks on a full pipe.

use hourlog::RotatingFileWriter;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::CliError;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PipeStats {
    pub lines: u64,
    pub dropped: u64,
}

pub fn run(dir: &Path, tee: bool) -> Result<PipeStats, CliError> {
    let writer = RotatingFileWriter::new(dir);
    // Fail fast on an unusable directory rather than dropping every line.
    let first = writer.open_current()?;
    tracing::info!(path = %first.display(), "Piping stdin");

    let stdin = io::stdin();
    let stats = if tee {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        copy_lines(stdin.lock(), &writer, Some(&mut out))?
    } else {
        copy_lines(stdin.lock(), &writer, None)?
    };

    tracing::info!(lines = stats.lines, dropped = stats.dropped, "Stdin closed");
    Ok(stats)
}

/// Copies `input` line by line into `writer`. A final line without a newline
/// gets one.
pub fn copy_lines<R: BufRead>(
    mut input: R,
    writer: &RotatingFileWriter,
    mut tee: Option<&mut dyn Write>,
) -> Result<PipeStats, CliError> {
    let mut stats = PipeStats::default();
    let mut line = Vec::with_capacity(256);

    loop {
        line.clear();
        if input.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.last() != Some(&b'\n') {
            line.push(b'\n');
        }
        stats.lines += 1;

        if let Err(e) = writer.write_bytes(&line) {
            stats.dropped += 1;
            tracing::warn!(error = %e, "Failed to write line");
        }
        if let Some(out) = tee.as_mut() {
            out.write_all(&line)?;
        }
    }

    if let Some(out) = tee.as_mut() {
        out.flush()?;
    }
    Ok(stats)
}
