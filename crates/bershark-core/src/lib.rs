//! BERshark core library for inspecting BER-encoded byte streams.
//!
//! This crate implements the decode pipeline used by the CLI: byte sources
//! feed the BER layer (layout/reader/parser), which builds one owned tree per
//! top-level record, and renderers turn finished trees into text. Decoding is
//! a sequential pull from one source; all I/O is isolated in `source`
//! modules. Wire-format conventions are captured in the reader so the parser
//! stays free of raw byte twiddling.
//!
//! Invariants:
//! - A node's `nbytes` is the exact number of source bytes its subtree
//!   consumed, so consecutive records line up back-to-back.
//! - A node owns either value bytes or children, never both.
//! - Recursion depth is threaded explicitly and bounded by
//!   [`MAX_NESTING_DEPTH`].
//!
//! # Examples
//! ```
//! use bershark_core::{DEFAULT_RECORD_BUDGET, ReadSource, decode_record};
//!
//! let bytes: &[u8] = &[0x02, 0x01, 0x05];
//! let mut source = ReadSource::new(bytes);
//! let node = decode_record(&mut source, DEFAULT_RECORD_BUDGET)?.expect("one record");
//! assert_eq!(node.tag.number, 2);
//! assert_eq!(node.value(), &[0x05]);
//! # Ok::<(), bershark_core::DecodeError>(())
//! ```

mod ber;
mod dump;
mod render;
mod source;

pub use ber::{DecodeError, decode_record};
pub use dump::{DumpError, dump_file, dump_source};
pub use render::{OutputFormat, render_node};
pub use source::{ByteSource, ReadSource, SourceError};

/// Ceiling on the encoded size of a single top-level record, in bytes.
///
/// A safety bound against runaway declared lengths, not a protocol limit;
/// the budget resets fresh for every top-level record.
pub const DEFAULT_RECORD_BUDGET: u64 = 1024 * 1024;

/// Maximum nesting depth the decoder will recurse into.
///
/// Input nesting drives recursion directly, so the guard bounds stack usage
/// against adversarial encodings.
pub const MAX_NESTING_DEPTH: u32 = 128;

/// Tag class from the top two bits of the first tag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

/// Decoded tag field.
///
/// # Examples
/// ```
/// use bershark_core::{Tag, TagClass};
///
/// let tag = Tag {
///     class: TagClass::Universal,
///     primitive: true,
///     number: 2,
///     nbytes: 1,
/// };
/// assert!(tag.primitive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    /// Tag class.
    pub class: TagClass,
    /// Primitive (bit 5 clear) versus constructed encoding.
    pub primitive: bool,
    /// Tag number, possibly accumulated from base-128 continuation bytes.
    pub number: u64,
    /// Exact encoded size of the tag field.
    pub nbytes: u64,
}

/// Decoded length field.
///
/// The indefinite form carries value 0; termination is deferred to the
/// end-of-contents marker.
///
/// # Examples
/// ```
/// use bershark_core::Length;
///
/// let length = Length {
///     value: 128,
///     nbytes: 2,
///     indefinite: false,
/// };
/// assert_eq!(length.value, 128);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    /// Declared content size in bytes; 0 for an empty primitive or the
    /// indefinite marker.
    pub value: u64,
    /// Exact encoded size of the length field.
    pub nbytes: u64,
    /// Indefinite form: content runs until an end-of-contents marker.
    pub indefinite: bool,
}

/// Contents of a decoded node: literal bytes for primitive encodings,
/// owned child nodes in document order for constructed ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Primitive(Vec<u8>),
    Constructed(Vec<TlvNode>),
}

/// One decoded tag-length-value node.
///
/// A node is fully built by a single decode call before any renderer sees
/// it, and each top-level tree is owned by the call that produced it.
///
/// # Examples
/// ```
/// use bershark_core::{DEFAULT_RECORD_BUDGET, ReadSource, decode_record};
///
/// // SEQUENCE { INTEGER 5 }
/// let bytes: &[u8] = &[0x30, 0x03, 0x02, 0x01, 0x05];
/// let mut source = ReadSource::new(bytes);
/// let node = decode_record(&mut source, DEFAULT_RECORD_BUDGET)?.expect("one record");
/// assert_eq!(node.nbytes, 5);
/// assert_eq!(node.children().len(), 1);
/// assert_eq!(node.children()[0].depth, 1);
/// # Ok::<(), bershark_core::DecodeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvNode {
    /// Decoded tag field.
    pub tag: Tag,
    /// Decoded length field.
    pub length: Length,
    /// Total encoded size of this subtree: tag, length, and value or
    /// children bytes (end-of-contents markers included).
    pub nbytes: u64,
    /// Nesting depth; a top-level record sits at 0.
    pub depth: u32,
    /// Value bytes or child nodes.
    pub content: Content,
}

impl TlvNode {
    /// Whether the node uses the primitive encoding.
    pub fn is_primitive(&self) -> bool {
        self.tag.primitive
    }

    /// Value bytes of a primitive node; empty for constructed nodes.
    pub fn value(&self) -> &[u8] {
        match &self.content {
            Content::Primitive(value) => value,
            Content::Constructed(_) => &[],
        }
    }

    /// Children of a constructed node in document order; empty for
    /// primitive nodes.
    pub fn children(&self) -> &[TlvNode] {
        match &self.content {
            Content::Constructed(children) => children,
            Content::Primitive(_) => &[],
        }
    }
}
