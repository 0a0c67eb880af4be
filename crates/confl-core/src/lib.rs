//! # confl-core
//!
//! Parser for **confl**, a small line-oriented configuration language with
//! constants, postfix arithmetic, and nested struct literals. A parsed
//! [`Document`] renders to YAML or JSON.
//!
//! ```text
//! *> comments start with *>
//! port <- 8000;
//! offset <- $port 80 +$;
//!
//! struct server {
//!     name = 'edge',
//!     port = $offset 65535 min$,
//!     limits = struct {
//!         slots = $offset 7 mod$,
//!     }
//! }
//! ```
//!
//! ## Quick start
//!
//! ```rust
//! use confl_core::{parse, to_yaml, FieldValue};
//!
//! let src = "x <- 10;\nstruct app {\n  a = $x 5 +$,\n  b = 'test',\n}";
//! let doc = parse(src).unwrap();
//! assert_eq!(doc.get_path("app.a"), Some(&FieldValue::Integer(15)));
//! assert_eq!(to_yaml(&doc), "app:\n  a: 15\n  b: test");
//! ```
//!
//! ## Modules
//!
//! - [`line`]: line classifier and line positions
//! - [`scanner`]: top-level driver (`parse`, `Parser`)
//! - [`structs`]: recursive struct parser
//! - [`eval`]: expression evaluator
//! - [`constants`]: per-parse constant table
//! - [`types`]: `Scalar`, `FieldValue`, `Document`
//! - [`encoder`]: YAML / JSON rendering
//! - [`error`]: error types

pub mod constants;
pub mod encoder;
pub mod error;
pub mod eval;
pub mod line;
pub mod scanner;
pub mod structs;
pub mod types;

pub use constants::ConstantTable;
pub use encoder::{to_json, to_yaml, Format};
pub use error::{ConflError, ErrorKind, EvalError};
pub use eval::evaluate;
pub use scanner::{parse, Parser};
pub use types::{Document, FieldValue, OrderedMap, Scalar, StructValue};
