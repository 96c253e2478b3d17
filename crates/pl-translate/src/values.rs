//! Field value formatting shared by the record builders.

use pl_core::{ObjectId, ensure_finite};
use pl_idf::{IddObjectType, IdfObject, format_number};
use pl_model::{Autosizable, Model};

use crate::error::TranslateResult;

pub(crate) const AUTOSIZE: &str = "Autosize";

/// A finite number as field text.
pub(crate) fn number(what: &'static str, value: f64) -> TranslateResult<String> {
    Ok(format_number(ensure_finite(what, value)?))
}

pub(crate) fn sizable(what: &'static str, value: Autosizable) -> TranslateResult<String> {
    match value {
        Autosizable::Autosize => Ok(AUTOSIZE.to_string()),
        Autosizable::Value(v) => number(what, v),
    }
}

pub(crate) fn optional_number(
    what: &'static str,
    value: Option<f64>,
) -> TranslateResult<Option<String>> {
    value.map(|v| number(what, v)).transpose()
}

/// Name of an optional node; `None` stays blank in the record.
pub(crate) fn node_name(model: &Model, node: Option<ObjectId>) -> Option<String> {
    node.map(|n| model.name(n).to_string())
}

pub(crate) fn named(idd_type: IddObjectType, name: &str) -> IdfObject {
    let mut record = IdfObject::new(idd_type);
    record.set_name(name);
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateError;

    #[test]
    fn sizable_values() {
        assert_eq!(sizable("flow", Autosizable::Autosize).unwrap(), "Autosize");
        assert_eq!(sizable("flow", Autosizable::Value(0.0012)).unwrap(), "0.0012");
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let err = number("capacity", f64::INFINITY).unwrap_err();
        assert!(matches!(err, TranslateError::Core(_)));
        assert_eq!(optional_number("flow", None).unwrap(), None);
    }
}
