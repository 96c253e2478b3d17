//! Object dispatch: one entry point turns any model object into its record,
//! at most once per translation.

use pl_core::{ObjectId, RecordId};
use pl_idf::IddObjectType;
use pl_idf::idd::{
    ScheduleConstantFields, ScheduleTypeLimitsFields, SetpointManagerScheduledDualSetpointFields,
    SetpointManagerScheduledFields,
};
use pl_model::{ObjectKind, Schedule, ScheduleTypeLimits, SetpointManager};

use crate::context::TranslateContext;
use crate::error::{TranslateError, TranslateResult};
use crate::session::TranslationSession;
use crate::values::{named, node_name, number, optional_number};
use crate::{components, operation_schemes, plant_loop};

/// Translate `id`, or return the record it was already translated to.
///
/// Nodes, splitters, mixers and sub-components that live inside another
/// object's record translate to `None`.
pub fn translate_object(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    id: ObjectId,
) -> TranslateResult<Option<RecordId>> {
    if let Some(done) = session.mapped(id) {
        return Ok(done);
    }
    let object = cx.model.get(id)?;
    tracing::trace!(object = %object.name, kind = object.kind.type_label(), "translate");

    let record = match &object.kind {
        ObjectKind::Node | ObjectKind::Splitter(_) | ObjectKind::Mixer(_) => None,
        // The loop registers itself as soon as its record exists.
        ObjectKind::PlantLoop(_) => {
            return plant_loop::translate_plant_loop(cx, session, id).map(Some);
        }
        ObjectKind::Component(component) => {
            components::translate_component(cx, session, object, component)?
        }
        ObjectKind::Schedule(schedule) => Some(translate_schedule(session, &object.name, schedule)?),
        ObjectKind::SetpointManager(spm) => {
            Some(translate_setpoint_manager(cx, session, &object.name, spm)?)
        }
        ObjectKind::OperationScheme(scheme) => Some(operation_schemes::translate_user_scheme(
            cx,
            session,
            &object.name,
            scheme,
        )?),
    };
    session.map(id, record);
    Ok(record)
}

/// Translate an object that must produce a record and return its name.
pub(crate) fn translate_named(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    id: ObjectId,
) -> TranslateResult<String> {
    let record = translate_object(cx, session, id)?.ok_or_else(|| TranslateError::NoRecord {
        name: cx.model.name(id).to_string(),
    })?;
    Ok(session.record(record).name().unwrap_or_default().to_string())
}

fn translate_schedule(
    session: &mut TranslationSession,
    name: &str,
    schedule: &Schedule,
) -> TranslateResult<RecordId> {
    match schedule {
        Schedule::Constant { value, type_limits } => {
            let limits = type_limits
                .as_ref()
                .map(|l| translate_type_limits(session, l))
                .transpose()?;
            let mut record = named(IddObjectType::ScheduleConstant, name);
            record
                .set_if_some(ScheduleConstantFields::ScheduleTypeLimitsName, limits)
                .set_string(ScheduleConstantFields::HourlyValue, number("schedule value", *value)?);
            Ok(session.push(record))
        }
    }
}

/// Type limits are shared by name; the first schedule that needs them emits
/// the record.
fn translate_type_limits(
    session: &mut TranslationSession,
    limits: &ScheduleTypeLimits,
) -> TranslateResult<String> {
    if session
        .find(IddObjectType::ScheduleTypeLimits, &limits.name)
        .is_none()
    {
        let mut record = named(IddObjectType::ScheduleTypeLimits, &limits.name);
        record
            .set_if_some(
                ScheduleTypeLimitsFields::LowerLimitValue,
                optional_number("lower limit", limits.lower_limit)?,
            )
            .set_if_some(
                ScheduleTypeLimitsFields::UpperLimitValue,
                optional_number("upper limit", limits.upper_limit)?,
            )
            .set_string(ScheduleTypeLimitsFields::NumericType, &limits.numeric_type);
        session.push(record);
    }
    Ok(limits.name.clone())
}

fn translate_setpoint_manager(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    name: &str,
    spm: &SetpointManager,
) -> TranslateResult<RecordId> {
    let record = match spm {
        SetpointManager::Scheduled {
            control_variable,
            schedule,
            node,
        } => {
            let schedule = translate_named(cx, session, *schedule)?;
            let mut record = named(IddObjectType::SetpointManagerScheduled, name);
            record
                .set_string(SetpointManagerScheduledFields::ControlVariable, control_variable)
                .set_string(SetpointManagerScheduledFields::ScheduleName, schedule)
                .set_if_some(
                    SetpointManagerScheduledFields::SetpointNodeorNodeListName,
                    node_name(cx.model, *node),
                );
            record
        }
        SetpointManager::ScheduledDualSetpoint {
            high_schedule,
            low_schedule,
            node,
        } => {
            let high = translate_named(cx, session, *high_schedule)?;
            let low = translate_named(cx, session, *low_schedule)?;
            let mut record = named(IddObjectType::SetpointManagerScheduledDualSetpoint, name);
            record
                .set_string(SetpointManagerScheduledDualSetpointFields::ControlVariable, "Temperature")
                .set_string(
                    SetpointManagerScheduledDualSetpointFields::HighSetpointScheduleName,
                    high,
                )
                .set_string(
                    SetpointManagerScheduledDualSetpointFields::LowSetpointScheduleName,
                    low,
                )
                .set_if_some(
                    SetpointManagerScheduledDualSetpointFields::SetpointNodeorNodeListName,
                    node_name(cx.model, *node),
                );
            record
        }
    };
    Ok(session.push(record))
}
