//! Project to IDF translation.

use std::path::Path;

use pl_idf::Workspace;
use pl_project::schema::Project;
use pl_translate::{ForwardTranslator, TranslatorOptions};

use crate::error::{AppError, AppResult};
use crate::model_compile::{compile_model, translator_options};

/// Command-line overrides applied on top of the project's translator section.
#[derive(Debug, Clone, Copy, Default)]
pub struct TranslateRequest {
    pub field_comments: Option<bool>,
    pub translate_unconnected_components: Option<bool>,
}

impl TranslateRequest {
    pub fn options(&self, project: &Project) -> TranslatorOptions {
        let base = translator_options(project);
        TranslatorOptions {
            field_comments: self.field_comments.unwrap_or(base.field_comments),
            translate_unconnected_components: self
                .translate_unconnected_components
                .unwrap_or(base.translate_unconnected_components),
        }
    }
}

/// Records produced for one project.
#[derive(Debug)]
pub struct TranslateResponse {
    pub workspace: Workspace,
    pub options: TranslatorOptions,
}

impl TranslateResponse {
    pub fn to_idf_string(&self) -> String {
        self.workspace.to_idf_string(pl_idf::writer::WriteOptions {
            field_comments: self.options.field_comments,
        })
    }
}

pub fn translate_project(project: &Project, request: TranslateRequest) -> AppResult<TranslateResponse> {
    let compiled = compile_model(project)?;
    let options = request.options(project);
    let workspace = ForwardTranslator::new(options).translate_model(&compiled.model)?;
    tracing::info!(
        project = %project.name,
        records = workspace.objects().len(),
        "translated project"
    );
    Ok(TranslateResponse { workspace, options })
}

/// Write the translated records to `path` as IDF text.
pub fn write_idf(path: &Path, response: &TranslateResponse) -> AppResult<()> {
    std::fs::write(path, response.to_idf_string()).map_err(|e| AppError::IdfFileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
