//! # chatseal Core
//!
//! Pure primitives shared by every chatseal crate: the binary/text codec and
//! the identifiers used to address parties and messages.
//!
//! This crate contains no cryptography, no I/O, no networking. It only
//! converts between raw key/ciphertext bytes and their textual forms.
//!
//! ## Key Types
//!
//! - [`KeyKind`] - Which armored key block a text carries (public or private)
//! - [`Username`] - Identifier of a sending or receiving party
//! - [`MessageId`] - Identifier assigned to a delivered message
//!
//! ## Codec
//!
//! Transport encoding is standard base64; decoding is lenient about the
//! URL-safe alphabet, missing padding and whitespace. Key text is a
//! header/body/footer block wrapped at 64 columns. See [`codec`] module.

pub mod codec;
pub mod error;
pub mod types;

pub use codec::{bytes_to_text, text_to_bytes, unwrap_key_text, wrap_key_text, KeyKind};
pub use error::{CodecError, Result};
pub use types::{MessageId, Username};
