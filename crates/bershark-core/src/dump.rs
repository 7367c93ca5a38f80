//! Top-level decode loop: pull records off a source until it is exhausted,
//! rendering each finished tree before the next decode begins.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::DEFAULT_RECORD_BUDGET;
use crate::ber::{DecodeError, decode_record};
use crate::render::{OutputFormat, render_node};
use crate::source::{ByteSource, ReadSource};

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Dump every record in a file.
///
/// # Examples
/// ```no_run
/// use std::path::Path;
///
/// use bershark_core::{OutputFormat, dump_file};
///
/// let mut out = std::io::stdout();
/// let records = dump_file(Path::new("records.ber"), OutputFormat::Tree, &mut out)?;
/// eprintln!("{records} records");
/// # Ok::<(), bershark_core::DumpError>(())
/// ```
pub fn dump_file<W: Write>(
    path: &Path,
    format: OutputFormat,
    out: &mut W,
) -> Result<u64, DumpError> {
    let file = File::open(path)?;
    let mut source = ReadSource::new(file);
    dump_source(&mut source, format, out)
}

/// Dump every record pulled from `source`, returning how many were
/// rendered.
///
/// Each top-level decode starts with a fresh record budget. A record is
/// rendered and flushed as soon as it completes, so output for records
/// decoded before a failure stands; the failure itself stops this source
/// only.
pub fn dump_source<S: ByteSource, W: Write>(
    source: &mut S,
    format: OutputFormat,
    out: &mut W,
) -> Result<u64, DumpError> {
    let mut records = 0u64;
    while let Some(node) = decode_record(source, DEFAULT_RECORD_BUDGET)? {
        render_node(&node, format, out)?;
        out.flush()?;
        records += 1;
    }
    Ok(records)
}
