//! IDF text output.
//!
//! ```text
//! Pipe:Adiabatic,
//!   HW Supply Inlet Pipe,                   !- Name
//!   HW Supply Inlet Node,                   !- Inlet Node Name
//!   HW Supply Inlet Pipe Node;              !- Outlet Node Name
//! ```

use std::fmt;

use crate::object::IdfObject;
use crate::workspace::Workspace;

/// Width of the value column before a field comment.
pub const PRINTED_FIELD_SPACE: usize = 38;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Append `!- Field Name` comments.
    pub field_comments: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            field_comments: true,
        }
    }
}

/// `Display` adapter for one record.
pub struct IdfDisplay<'a> {
    object: &'a IdfObject,
    options: WriteOptions,
}

impl<'a> IdfDisplay<'a> {
    pub fn new(object: &'a IdfObject, options: WriteOptions) -> Self {
        Self { object, options }
    }
}

impl fmt::Display for IdfDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = printed_fields(self.object);
        let type_name = self.object.idd_type().name();
        if entries.is_empty() {
            return writeln!(f, "{type_name};");
        }
        writeln!(f, "{type_name},")?;

        let last = entries.len() - 1;
        for (i, (value, label)) in entries.iter().enumerate() {
            let delim = if i == last { ';' } else { ',' };
            write!(f, "  {value}{delim}")?;
            if self.options.field_comments {
                let pad = PRINTED_FIELD_SPACE.saturating_sub(value.len());
                write!(f, "{:pad$} !- {label}", "")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Values to print with their comment labels. Trailing blank fixed fields
/// are dropped when the record has no extensible groups.
fn printed_fields(object: &IdfObject) -> Vec<(&str, String)> {
    let labels = object.idd_type().field_labels();
    let mut fixed: Vec<(&str, String)> = object
        .fields()
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let label = labels.get(i).copied().unwrap_or("Field");
            (v.as_deref().unwrap_or(""), label.to_string())
        })
        .collect();

    if object.groups().is_empty() {
        let used = object
            .fields()
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |i| i + 1);
        fixed.truncate(used);
        return fixed;
    }

    let ext_labels = object.idd_type().extensible_labels();
    for (n, group) in object.groups().iter().enumerate() {
        for (i, v) in group.values().iter().enumerate() {
            let label = ext_labels.get(i).copied().unwrap_or("Field");
            fixed.push((v.as_deref().unwrap_or(""), format!("{label} {}", n + 1)));
        }
    }
    fixed
}

/// Render a single record.
pub fn object_to_string(object: &IdfObject, options: WriteOptions) -> String {
    IdfDisplay::new(object, options).to_string()
}

/// Render every record in order, separated by blank lines.
pub fn workspace_to_string(workspace: &Workspace, options: WriteOptions) -> String {
    let mut out = String::new();
    for object in workspace.objects() {
        out.push_str(&object_to_string(object, options));
        out.push('\n');
    }
    out
}
