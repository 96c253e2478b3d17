//! Read-only inputs shared by every translation step.

use pl_model::{Model, TopologyIndex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslatorOptions {
    /// Write `!- Field Name` comments in IDF text.
    pub field_comments: bool,
    /// Also emit components that sit on no plant loop.
    pub translate_unconnected_components: bool,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            field_comments: true,
            translate_unconnected_components: true,
        }
    }
}

/// The model being translated with its loop topology.
#[derive(Debug, Clone, Copy)]
pub struct TranslateContext<'a> {
    pub model: &'a Model,
    pub topology: &'a TopologyIndex,
}

impl<'a> TranslateContext<'a> {
    pub fn new(model: &'a Model, topology: &'a TopologyIndex) -> Self {
        Self { model, topology }
    }
}
