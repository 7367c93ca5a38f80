//! Textual renderers over a decoded tree.
//!
//! Renderers walk a finished [`TlvNode`] read-only, depth-first, in
//! document order, and write lines into any [`Write`] impl. They never
//! feed back into decoding. Leaf versus internal is decided by the tag's
//! primitive flag in every form, and value bytes render as lowercase
//! two-digit hex with no separators.

mod flat;
mod path;
mod tree;

use std::io::{self, Write};

use crate::TlvNode;

/// Output form selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented nested structure with `{`/`}` delimiters.
    Tree,
    /// One `number|...` line per node, no indentation.
    Flat,
    /// Flat form with the root-to-node tag number chain as identifier.
    Path,
}

/// Render one decoded record into `out` in the selected form.
///
/// # Examples
/// ```
/// use bershark_core::{DEFAULT_RECORD_BUDGET, OutputFormat, ReadSource, decode_record, render_node};
///
/// let bytes: &[u8] = &[0x02, 0x01, 0x05];
/// let mut source = ReadSource::new(bytes);
/// let node = decode_record(&mut source, DEFAULT_RECORD_BUDGET)?.expect("one record");
/// let mut out = Vec::new();
/// render_node(&node, OutputFormat::Flat, &mut out)?;
/// assert_eq!(String::from_utf8_lossy(&out), "2|05\n");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn render_node<W: Write>(node: &TlvNode, format: OutputFormat, out: &mut W) -> io::Result<()> {
    match format {
        OutputFormat::Tree => tree::render(node, out),
        OutputFormat::Flat => flat::render(node, out),
        OutputFormat::Path => path::render(node, out),
    }
}

pub(crate) fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
