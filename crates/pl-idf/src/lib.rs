//! pl-idf: flat IDF records and their text form.
//!
//! Provides:
//! - the record schema (`IddObjectType` plus one field enum per type)
//! - `IdfObject` records with fixed fields and extensible groups
//! - `Workspace`, the ordered output of a translation
//! - an IDF text writer with aligned field comments, and a reader

pub mod error;
pub mod idd;
pub mod object;
pub mod parser;
pub mod workspace;
pub mod writer;

pub use error::{IdfError, IdfResult};
pub use idd::{FieldIndex, IddObjectType};
pub use object::{ExtensibleGroup, IdfObject, format_number};
pub use parser::parse_idf;
pub use workspace::Workspace;
pub use writer::{IdfDisplay, PRINTED_FIELD_SPACE, WriteOptions, object_to_string};
