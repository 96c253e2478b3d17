//! Flat field-value records.

use serde::{Deserialize, Serialize};

use crate::error::{IdfError, IdfResult};
use crate::idd::{FieldIndex, IddObjectType};

/// Format a number the way record fields carry it (`0.5`, `1000000000`).
pub fn format_number(value: f64) -> String {
    format!("{value}")
}

/// One repetition of a record's extensible fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtensibleGroup {
    values: Vec<Option<String>>,
}

impl ExtensibleGroup {
    fn with_len(len: usize) -> Self {
        Self {
            values: vec![None; len],
        }
    }

    pub fn values(&self) -> &[Option<String>] {
        &self.values
    }

    pub fn set_string<E: FieldIndex>(&mut self, field: E, value: impl Into<String>) -> &mut Self {
        let i = field.index();
        if i >= self.values.len() {
            self.values.resize(i + 1, None);
        }
        self.values[i] = Some(value.into());
        self
    }

    pub fn set_double<E: FieldIndex>(&mut self, field: E, value: f64) -> &mut Self {
        self.set_string(field, format_number(value))
    }

    pub fn set_if_some<E: FieldIndex, S: Into<String>>(
        &mut self,
        field: E,
        value: Option<S>,
    ) -> &mut Self {
        if let Some(v) = value {
            self.set_string(field, v);
        }
        self
    }

    pub fn get_string<E: FieldIndex>(&self, field: E) -> Option<&str> {
        self.values.get(field.index())?.as_deref()
    }

    pub fn get_double<E: FieldIndex>(&self, field: E) -> Option<f64> {
        self.get_string(field)?.parse().ok()
    }
}

/// A typed record: fixed fields followed by zero or more extensible groups.
///
/// Fixed fields always span the full schema width; `None` marks a blank
/// field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdfObject {
    #[serde(rename = "type")]
    idd_type: IddObjectType,
    fields: Vec<Option<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    groups: Vec<ExtensibleGroup>,
}

impl IdfObject {
    pub fn new(idd_type: IddObjectType) -> Self {
        Self {
            idd_type,
            fields: vec![None; idd_type.field_labels().len()],
            groups: Vec::new(),
        }
    }

    /// Build a record from positional values; values past the fixed fields
    /// fill extensible groups, the last of which is padded with blanks.
    pub fn from_values(idd_type: IddObjectType, values: Vec<Option<String>>) -> IdfResult<Self> {
        let fixed = idd_type.field_labels().len();
        let group_len = idd_type.extensible_labels().len();
        if values.len() > fixed && group_len == 0 {
            return Err(IdfError::TooManyFields {
                object_type: idd_type.name(),
                count: values.len(),
                max: fixed,
            });
        }

        let mut obj = Self::new(idd_type);
        let mut values = values.into_iter();
        for slot in obj.fields.iter_mut() {
            match values.next() {
                Some(v) => *slot = v,
                None => break,
            }
        }
        let rest: Vec<Option<String>> = values.collect();
        for chunk in rest.chunks(group_len.max(1)) {
            let mut group = ExtensibleGroup::with_len(group_len);
            for (slot, v) in group.values.iter_mut().zip(chunk) {
                *slot = v.clone();
            }
            obj.groups.push(group);
        }
        Ok(obj)
    }

    pub fn idd_type(&self) -> IddObjectType {
        self.idd_type
    }

    pub fn fields(&self) -> &[Option<String>] {
        &self.fields
    }

    pub fn name(&self) -> Option<&str> {
        if self.idd_type.has_name() {
            self.fields.first()?.as_deref()
        } else {
            None
        }
    }

    /// Set the name field. Records without a name field are left unchanged
    /// and `false` is returned.
    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        if !self.idd_type.has_name() {
            return false;
        }
        if let Some(slot) = self.fields.first_mut() {
            *slot = Some(name.into());
        }
        true
    }

    pub fn set_string<F: FieldIndex>(&mut self, field: F, value: impl Into<String>) -> &mut Self {
        let i = field.index();
        if i >= self.fields.len() {
            self.fields.resize(i + 1, None);
        }
        self.fields[i] = Some(value.into());
        self
    }

    pub fn set_double<F: FieldIndex>(&mut self, field: F, value: f64) -> &mut Self {
        self.set_string(field, format_number(value))
    }

    /// Set `field` only when a value is present; absent values leave the
    /// field as it was.
    pub fn set_if_some<F: FieldIndex, S: Into<String>>(
        &mut self,
        field: F,
        value: Option<S>,
    ) -> &mut Self {
        if let Some(v) = value {
            self.set_string(field, v);
        }
        self
    }

    pub fn get_string<F: FieldIndex>(&self, field: F) -> Option<&str> {
        self.fields.get(field.index())?.as_deref()
    }

    pub fn get_double<F: FieldIndex>(&self, field: F) -> Option<f64> {
        self.get_string(field)?.parse().ok()
    }

    pub fn groups(&self) -> &[ExtensibleGroup] {
        &self.groups
    }

    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Append a blank extensible group and return it for filling in.
    pub fn push_group(&mut self) -> &mut ExtensibleGroup {
        let len = self.idd_type.extensible_labels().len();
        self.groups.push(ExtensibleGroup::with_len(len));
        let last = self.groups.len() - 1;
        &mut self.groups[last]
    }

    pub fn clear_groups(&mut self) {
        self.groups.clear();
    }
}
