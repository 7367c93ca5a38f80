//! BER tag-length-value decoding.
//!
//! The layer follows the usual structure:
//! - `layout`: bit masks and field markers (source of truth)
//! - `reader`: tag and length field reads over a byte source
//! - `parser`: recursive node decoding under a shrinking byte budget
//! - `error`: explicit, actionable errors
//!
//! The parser supports the three encoding shapes — primitive definite,
//! constructed definite, constructed indefinite — each with its own
//! termination rule, and never over- or under-consumes the source. Clean
//! end of input before the first tag byte is `Ok(None)`, not an error.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;

pub use error::DecodeError;
pub use parser::decode_record;
