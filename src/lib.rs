//! genexamples — translate console-syntax documentation examples into
//! Go client calls.
//!
//! The engine is a pure function of one [`Example`]: its text is split into
//! commands ([`split`]), each command is dispatched to the first matching
//! rule ([`rules`]), and the rendered calls are wrapped in `tag:`/`end:`
//! markers ([`Translator`]). [`generate`] turns the result into Go test files
//! and AsciiDoc snippets.

pub mod convert;
pub mod error;
pub mod generate;
pub mod model;
pub mod naming;
pub mod rules;
pub mod split;
pub mod translate;

pub use error::TranslateError;
pub use model::{EnabledFiles, Example, SourceLocation};
pub use rules::{Call, Imports};
pub use translate::{Profile, Translator};
