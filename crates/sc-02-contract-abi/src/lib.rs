//! # SC-02 Contract ABI - Artifacts and Call Encoding
//!
//! Loads compiled contract descriptors (interface definition + bytecode) and
//! translates between Rust values and Solidity ABI call data.
//!
//! ## Components
//!
//! | Component | Location | Purpose |
//! |-----------|----------|---------|
//! | Artifact | `artifact.rs` | Truffle-style JSON descriptor loading |
//! | ABI model | `abi.rs` | Functions, constructor, selectors |
//! | Types | `param_type.rs` | Solidity type grammar |
//! | Tokens | `token.rs` | Decoded values and argument coercion |
//! | Codec | `codec.rs` | Head/tail encoding and decoding |
//! | Text | `text.rs` | Legacy ASCII decoding of fixed byte strings |
//!
//! ## Argument Coercion
//!
//! Callers pass [`Literal`]s; the ABI decides the wire type. Text bound to a
//! `bytesN` parameter becomes right-padded UTF-8, negative integers bound to
//! `intN` become two's complement, and text bound to integers or addresses is
//! parsed.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod abi;
pub mod artifact;
pub mod codec;
pub mod errors;
pub mod param_type;
pub mod text;
pub mod token;

pub use abi::{Abi, AbiEntry, Constructor, Function, Param};
pub use artifact::ContractArtifact;
pub use errors::{AbiError, ArtifactError};
pub use param_type::ParamType;
pub use text::{decode_text, strip_non_word, to_ascii};
pub use token::{Literal, Token};
