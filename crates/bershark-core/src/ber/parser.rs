use super::error::DecodeError;
use super::reader::{read_length, read_tag};
use crate::source::ByteSource;
use crate::{Content, Length, MAX_NESTING_DEPTH, Tag, TlvNode};

/// Decode one top-level record.
///
/// `budget` caps the encoded size of the record. Returns `Ok(None)` when
/// the source ends cleanly before the first tag byte, so a driver can stop
/// without treating end of input as a failure.
pub fn decode_record<S: ByteSource>(
    source: &mut S,
    budget: u64,
) -> Result<Option<TlvNode>, DecodeError> {
    decode_node(source, budget, 0)
}

/// Decode one node under a byte budget.
///
/// The budget is the enclosing ceiling: the record cap at the top level,
/// the remaining portion of the parent's declared length for definite
/// children, and the parent's own shrinking ceiling for indefinite
/// children.
fn decode_node<S: ByteSource>(
    source: &mut S,
    budget: u64,
    depth: u32,
) -> Result<Option<TlvNode>, DecodeError> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(DecodeError::TooDeep {
            limit: MAX_NESTING_DEPTH,
        });
    }

    let tag = match read_tag(source)? {
        Some(tag) => tag,
        None => return Ok(None),
    };
    let length = read_length(source)?;
    let mut nbytes = tag.nbytes + length.nbytes;

    if nbytes >= budget {
        // A zero-length element may land exactly on the ceiling; anything
        // larger is malformed.
        if length.value == 0 {
            return Ok(Some(empty_node(tag, length, nbytes, depth)));
        }
        return Err(DecodeError::BudgetExceeded {
            needed: nbytes,
            budget,
        });
    }

    if tag.primitive {
        // Primitive definite-length shape. The indefinite form carries
        // value 0 and so falls into the empty case.
        if length.value == 0 {
            return Ok(Some(empty_node(tag, length, nbytes, depth)));
        }
        check_declared(nbytes, length.value, budget)?;
        let value = read_value(source, length.value)?;
        nbytes += length.value;
        return Ok(Some(TlvNode {
            tag,
            length,
            nbytes,
            depth,
            content: Content::Primitive(value),
        }));
    }

    if length.indefinite {
        // Constructed indefinite-length shape: children run until the
        // end-of-contents marker, under the same outer ceiling this call
        // was given, shrunk by what is already consumed.
        let mut children = Vec::new();
        loop {
            let remaining = budget.saturating_sub(nbytes);
            let child = decode_node(source, remaining, depth + 1)?
                .ok_or(DecodeError::Truncated { context: "content" })?;
            nbytes += child.nbytes;
            if child.tag.number == 0 && child.length.value == 0 {
                // End-of-contents: counted, not stored.
                break;
            }
            children.push(child);
        }
        return Ok(Some(TlvNode {
            tag,
            length,
            nbytes,
            depth,
            content: Content::Constructed(children),
        }));
    }

    // Constructed definite-length shape: children must consume the
    // declared length exactly.
    if length.value == 0 {
        return Ok(Some(empty_node(tag, length, nbytes, depth)));
    }
    check_declared(nbytes, length.value, budget)?;
    let mut children = Vec::new();
    let mut consumed = 0u64;
    while consumed < length.value {
        let child = decode_node(source, length.value - consumed, depth + 1)?
            .ok_or(DecodeError::Truncated { context: "content" })?;
        consumed += child.nbytes;
        children.push(child);
    }
    if consumed > length.value {
        return Err(DecodeError::BudgetExceeded {
            needed: consumed,
            budget: length.value,
        });
    }
    nbytes += consumed;
    Ok(Some(TlvNode {
        tag,
        length,
        nbytes,
        depth,
        content: Content::Constructed(children),
    }))
}

/// Fail if a declared content length cannot fit in the remaining budget.
fn check_declared(header: u64, declared: u64, budget: u64) -> Result<(), DecodeError> {
    match header.checked_add(declared) {
        Some(total) if total <= budget => Ok(()),
        _ => Err(DecodeError::BudgetExceeded {
            needed: declared,
            budget: budget - header,
        }),
    }
}

fn read_value<S: ByteSource>(source: &mut S, declared: u64) -> Result<Vec<u8>, DecodeError> {
    let len = usize::try_from(declared).map_err(|_| DecodeError::BudgetExceeded {
        needed: declared,
        budget: usize::MAX as u64,
    })?;
    let mut value = vec![0u8; len];
    let filled = source.read_into(&mut value)?;
    if filled < len {
        return Err(DecodeError::Truncated { context: "value" });
    }
    Ok(value)
}

fn empty_node(tag: Tag, length: Length, nbytes: u64, depth: u32) -> TlvNode {
    let content = if tag.primitive {
        Content::Primitive(Vec::new())
    } else {
        Content::Constructed(Vec::new())
    };
    TlvNode {
        tag,
        length,
        nbytes,
        depth,
        content,
    }
}
