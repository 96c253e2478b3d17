use thiserror::Error;

pub type IdfResult<T> = Result<T, IdfError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum IdfError {
    #[error("Unknown object type: {name}")]
    UnknownObjectType { name: String },

    #[error("Too many fields for {object_type}: got {count}, at most {max}")]
    TooManyFields {
        object_type: &'static str,
        count: usize,
        max: usize,
    },

    #[error("Object {index} has no type name")]
    MissingObjectType { index: usize },

    #[error("Unterminated object: {text}")]
    Unterminated { text: String },
}
