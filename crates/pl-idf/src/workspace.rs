//! Ordered collection of records produced by one translation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdfError;
use crate::idd::IddObjectType;
use crate::object::IdfObject;
use crate::writer::{WriteOptions, workspace_to_string};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    objects: Vec<IdfObject>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_objects(objects: Vec<IdfObject>) -> Self {
        Self { objects }
    }

    /// Append a record and return its position.
    pub fn add_object(&mut self, object: IdfObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn objects(&self) -> &[IdfObject] {
        &self.objects
    }

    pub fn into_objects(self) -> Vec<IdfObject> {
        self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn objects_of_type(&self, idd_type: IddObjectType) -> Vec<&IdfObject> {
        self.objects
            .iter()
            .filter(|o| o.idd_type() == idd_type)
            .collect()
    }

    /// First record of `idd_type` whose name matches, ignoring ASCII case.
    pub fn object_by_type_and_name(
        &self,
        idd_type: IddObjectType,
        name: &str,
    ) -> Option<&IdfObject> {
        self.objects.iter().find(|o| {
            o.idd_type() == idd_type && o.name().is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
    }

    pub fn to_idf_string(&self, options: WriteOptions) -> String {
        workspace_to_string(self, options)
    }
}

impl fmt::Display for Workspace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_idf_string(WriteOptions::default()))
    }
}

impl FromStr for Workspace {
    type Err = IdfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse_idf(s)
    }
}
