//! Plain-text command output
//!
//! Command results go to stdout one line at a time; diagnostics and logs
//! go to stderr.

use std::io::Write;

use super::errors::CliResult;

/// Write each line followed by a newline, then flush.
pub fn write_lines<W: Write>(out: &mut W, lines: &[String]) -> CliResult<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()?;
    Ok(())
}
