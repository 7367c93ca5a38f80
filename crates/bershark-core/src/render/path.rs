use std::io::{self, Write};

use super::hex;
use crate::TlvNode;

pub(crate) fn render<W: Write>(node: &TlvNode, out: &mut W) -> io::Result<()> {
    let mut chain = Vec::new();
    render_with_chain(node, &mut chain, out)
}

/// The chain of tag numbers from the root to the current node is threaded
/// through the recursion explicitly; nothing outlives the walk.
fn render_with_chain<W: Write>(
    node: &TlvNode,
    chain: &mut Vec<u64>,
    out: &mut W,
) -> io::Result<()> {
    chain.push(node.tag.number);
    let label = join(chain);
    if node.is_primitive() {
        writeln!(out, "{}|{}", label, hex(node.value()))?;
    } else {
        writeln!(out, "{}|BEGIN", label)?;
        for child in node.children() {
            render_with_chain(child, chain, out)?;
        }
        writeln!(out, "{}|END", label)?;
    }
    chain.pop();
    Ok(())
}

fn join(chain: &[u64]) -> String {
    chain
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}
