//! IDF text input for the record types in the schema table.

use crate::error::{IdfError, IdfResult};
use crate::idd::IddObjectType;
use crate::object::IdfObject;
use crate::workspace::Workspace;

/// Parse IDF text into a workspace. `!` starts a comment that runs to the
/// end of the line; records end with `;`.
pub fn parse_idf(text: &str) -> IdfResult<Workspace> {
    let stripped: String = text
        .lines()
        .map(|line| line.split_once('!').map_or(line, |(code, _)| code))
        .collect::<Vec<_>>()
        .join("\n");

    let mut statements: Vec<&str> = stripped.split(';').collect();
    // Text after the final ';' must be blank.
    let tail = statements.pop().unwrap_or("");
    if !tail.trim().is_empty() {
        return Err(IdfError::Unterminated {
            text: tail.trim().to_string(),
        });
    }

    let mut workspace = Workspace::new();
    for (index, statement) in statements.iter().enumerate() {
        if statement.trim().is_empty() {
            continue;
        }
        let mut tokens = statement.split(',').map(str::trim);
        let type_name = tokens.next().unwrap_or("");
        if type_name.is_empty() {
            return Err(IdfError::MissingObjectType { index });
        }
        let idd_type =
            IddObjectType::from_name(type_name).ok_or_else(|| IdfError::UnknownObjectType {
                name: type_name.to_string(),
            })?;
        let values = tokens
            .map(|t| (!t.is_empty()).then(|| t.to_string()))
            .collect();
        workspace.add_object(IdfObject::from_values(idd_type, values)?);
    }
    tracing::debug!(objects = workspace.len(), "parsed idf text");
    Ok(workspace)
}
