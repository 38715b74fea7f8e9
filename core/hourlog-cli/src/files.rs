//! `list` and `path` subcommands.

use chrono::Utc;
use hourlog::RotatingFileWriter;
use std::io::{self, Write};
use std::path::Path;

use crate::CliError;

pub fn list(dir: &Path) -> Result<(), CliError> {
    let files = hourlog::files::list(dir)?;
    let stdout = io::stdout();
    write_listing(&mut stdout.lock(), &files)?;
    Ok(())
}

pub fn write_listing(out: &mut impl Write, files: &[hourlog::files::LogFile]) -> io::Result<()> {
    for file in files {
        writeln!(
            out,
            "{}  {:>10}  {}",
            file.hour.format("%Y-%m-%d %H:00"),
            file.len,
            file.path.display()
        )?;
    }
    Ok(())
}

pub fn print_current_path(dir: &Path) {
    println!("{}", RotatingFileWriter::path_for(dir, &Utc::now()).display());
}
