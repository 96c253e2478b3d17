//! Branch population: turn one linear run of loop objects into the
//! component groups of a `Branch` record.

use pl_core::{ObjectId, RecordId};
use pl_idf::IddObjectType;
use pl_idf::idd::{BranchExtensibleFields, ZoneHvacAirDistributionUnitFields};
use pl_model::{LoopSide, ObjectKind, Ports};

use crate::context::TranslateContext;
use crate::error::{TranslateError, TranslateResult};
use crate::objects::translate_object;
use crate::participant::{BranchContext, BranchParticipant};
use crate::session::TranslationSession;

/// Append one `(type, name, inlet, outlet)` group per component in `objects`.
///
/// Every object in the run is translated (once per session). Nodes only
/// advance the previous-node cursor; the splitter and mixer bounding a run
/// add nothing. A component whose node pair cannot be resolved for this
/// loop is skipped with a warning.
///
/// A multi-passage component picks its passage from the node before it, so
/// one with no node ahead of it in the run is a structural error.
pub fn populate_branch(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    branch: RecordId,
    objects: &[ObjectId],
    plant_loop: ObjectId,
    side: LoopSide,
) -> TranslateResult<()> {
    let mut prev_node = None;
    for &id in objects {
        let record = translate_object(cx, session, id)?;
        let object = cx.model.get(id)?;
        let component = match &object.kind {
            ObjectKind::Node => {
                prev_node = Some(id);
                continue;
            }
            ObjectKind::Component(c) => c,
            _ => continue,
        };
        if matches!(component.ports, Ports::Multi(_)) && prev_node.is_none() {
            return Err(TranslateError::structure(
                cx.model.name(plant_loop),
                format!("no node leads into multi-passage component '{}'", object.name),
            ));
        }

        let bcx = BranchContext {
            model: cx.model,
            topology: cx.topology,
            plant_loop,
            side,
            prev_node,
        };
        let (Some(inlet), Some(outlet)) = (object.inlet_node(&bcx), object.outlet_node(&bcx))
        else {
            tracing::warn!(
                component = %object.name,
                plant_loop = cx.model.name(plant_loop),
                side = side.label(),
                "no node pair on this loop, leaving component off the branch"
            );
            continue;
        };

        let entry = match object.substitute_component(&bcx) {
            Some(container) => container_entry(cx, session, container)?,
            None => record.map(|r| record_entry(session, r)),
        };
        let Some((idd_type, name)) = entry else {
            tracing::warn!(component = %object.name, "no record to place on the branch");
            continue;
        };

        session
            .record_mut(branch)
            .push_group()
            .set_string(BranchExtensibleFields::ComponentObjectType, idd_type)
            .set_string(BranchExtensibleFields::ComponentName, name)
            .set_string(
                BranchExtensibleFields::ComponentInletNodeName,
                cx.model.name(inlet),
            )
            .set_string(
                BranchExtensibleFields::ComponentOutletNodeName,
                cx.model.name(outlet),
            );
    }

    let record = session.record(branch);
    tracing::debug!(
        branch = record.name().unwrap_or(""),
        components = record.num_groups(),
        "populated branch"
    );
    Ok(())
}

fn record_entry(session: &TranslationSession, record: RecordId) -> (String, String) {
    let r = session.record(record);
    (
        r.idd_type().name().to_string(),
        r.name().unwrap_or_default().to_string(),
    )
}

/// Type and name a container is listed under on a branch. Air terminals
/// are listed under the terminal named by their distribution unit.
fn container_entry(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    container: ObjectId,
) -> TranslateResult<Option<(String, String)>> {
    let Some(record) = translate_object(cx, session, container)? else {
        return Ok(None);
    };
    let r = session.record(record);
    if r.idd_type() == IddObjectType::ZoneHvacAirDistributionUnit {
        let terminal_type = r.get_string(ZoneHvacAirDistributionUnitFields::AirTerminalObjectType);
        let terminal_name = r.get_string(ZoneHvacAirDistributionUnitFields::AirTerminalName);
        if let (Some(t), Some(n)) = (terminal_type, terminal_name) {
            return Ok(Some((t.to_string(), n.to_string())));
        }
    }
    Ok(Some(record_entry(session, record)))
}
