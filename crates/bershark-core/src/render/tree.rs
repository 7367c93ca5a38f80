use std::io::{self, Write};

use super::hex;
use crate::TlvNode;

pub(crate) fn render<W: Write>(node: &TlvNode, out: &mut W) -> io::Result<()> {
    let indent = "  ".repeat(node.depth as usize);
    if node.is_primitive() {
        writeln!(out, "{}[{}] {}", indent, node.tag.number, hex(node.value()))
    } else {
        writeln!(out, "{}[{}] {{", indent, node.tag.number)?;
        for child in node.children() {
            render(child, out)?;
        }
        writeln!(out, "{}}}", indent)
    }
}
