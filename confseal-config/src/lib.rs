//! Encrypted values in configuration documents.
//!
//! Provides:
//! - Key resolution from the environment or from key files
//! - Substitution of `${enc:...}` references in JSON documents, reporting
//!   every failure with its field path in one error
//! - Helpers that load a file and bind it to a typed config
//!
//! ```no_run
//! use confseal_config::{load_json_file, KeyResolver};
//!
//! let resolver = KeyResolver::default();
//! let config = load_json_file("config.json", &resolver)?;
//! # Ok::<(), confseal_config::SubstitutionError>(())
//! ```

pub mod config;
pub mod document;
pub mod env;
mod error;
pub mod key_file;
mod path;
pub mod resolver;
pub mod scanner;
pub mod substitutor;

pub use config::ResolverConfig;
pub use document::{
    load_json_file, load_json_str, load_typed, substitute_document, substitute_in_place,
};
pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use error::{ResolveError, ResolveResult, SubstitutionError, SubstitutionFailure};
pub use path::{FieldPath, PathSegment};
pub use resolver::{KeyResolver, KeyStrategy};
pub use substitutor::{Lookup, SpanFailure, StringSubstitutor};
