use std::io::{self, Write};

use super::hex;
use crate::TlvNode;

pub(crate) fn render<W: Write>(node: &TlvNode, out: &mut W) -> io::Result<()> {
    if node.is_primitive() {
        writeln!(out, "{}|{}", node.tag.number, hex(node.value()))
    } else {
        writeln!(out, "{}|BEGIN", node.tag.number)?;
        for child in node.children() {
            render(child, out)?;
        }
        writeln!(out, "{}|END", node.tag.number)
    }
}
