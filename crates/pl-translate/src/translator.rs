//! Model-wide entry point.

use pl_idf::writer::WriteOptions;
use pl_idf::Workspace;
use pl_model::{Model, TopologyIndex};

use crate::context::{TranslateContext, TranslatorOptions};
use crate::error::TranslateResult;
use crate::objects::translate_object;
use crate::session::TranslationSession;

/// Translates a whole model into IDF records.
#[derive(Debug, Clone, Default)]
pub struct ForwardTranslator {
    options: TranslatorOptions,
}

impl ForwardTranslator {
    pub fn new(options: TranslatorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> TranslatorOptions {
        self.options
    }

    /// Translate `model` into a fresh workspace.
    ///
    /// The input is left untouched: translation works on a copy that is
    /// guaranteed to hold the always-on schedule operation schemes fall
    /// back to. Schedules come first, then each plant loop with its
    /// equipment, then setpoint managers, then any equipment no loop
    /// reached (when enabled).
    pub fn translate_model(&self, model: &Model) -> TranslateResult<Workspace> {
        let mut model = model.clone();
        model.always_on_discrete_schedule();
        let topology = TopologyIndex::build(&model)?;
        let cx = TranslateContext::new(&model, &topology);
        let mut session = TranslationSession::new();

        for schedule in model.schedules() {
            translate_object(cx, &mut session, schedule)?;
        }
        for plant_loop in model.plant_loops() {
            translate_object(cx, &mut session, plant_loop)?;
        }
        for spm in model.setpoint_managers() {
            translate_object(cx, &mut session, spm)?;
        }
        if self.options.translate_unconnected_components {
            let before = session.len();
            for component in model.components() {
                translate_object(cx, &mut session, component)?;
            }
            let extra = session.len() - before;
            if extra > 0 {
                tracing::debug!(records = extra, "translated equipment outside plant loops");
            }
        }

        tracing::info!(
            plant_loops = topology.loops().len(),
            records = session.len(),
            "forward translation complete"
        );
        Ok(session.into_workspace())
    }

    /// Translate `model` and render the records as IDF text.
    pub fn translate_to_string(&self, model: &Model) -> TranslateResult<String> {
        let workspace = self.translate_model(model)?;
        Ok(workspace.to_idf_string(WriteOptions {
            field_comments: self.options.field_comments,
        }))
    }
}
