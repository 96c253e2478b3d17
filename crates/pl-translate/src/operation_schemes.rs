//! Plant equipment operation schemes: which equipment runs, under which
//! load range or setpoint, for each loop.

use pl_core::{ObjectId, RecordId};
use pl_idf::idd::{
    PlantEquipmentListExtensibleFields, PlantEquipmentOperationComponentSetpointExtensibleFields,
    PlantEquipmentOperationCoolingLoadExtensibleFields,
    PlantEquipmentOperationHeatingLoadExtensibleFields, PlantEquipmentOperationSchemesExtensibleFields,
    PlantEquipmentOperationUncontrolledFields,
};
use pl_idf::IddObjectType;
use pl_model::{LoadRange, ModelError, OperationScheme, SchemeAssignment};

use crate::classify::{
    component_type, cooling_components, flow_rate, heating_components, operation_scheme_component,
    setpoint_components, uncontrolled_components,
};
use crate::context::TranslateContext;
use crate::error::{TranslateError, TranslateResult};
use crate::objects::{translate_named, translate_object};
use crate::session::TranslationSession;
use crate::values::{AUTOSIZE, named, node_name, number};

/// Upper bound of the single load range used by default schemes.
const DEFAULT_RANGE_UPPER_W: f64 = 1e9;

/// Build the `PlantEquipmentOperationSchemes` list of a loop and return its
/// name.
///
/// User schemes assigned to the loop win; otherwise heating, cooling,
/// uncontrolled and component-setpoint schemes are derived from the supply
/// equipment.
pub fn translate_plant_equipment_operation_schemes(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    plant_loop: ObjectId,
) -> TranslateResult<String> {
    let object = cx.model.get(plant_loop)?;
    let pl = cx.model.plant_loop(plant_loop).ok_or_else(|| ModelError::WrongKind {
        name: object.name.clone(),
        expected: "plant loop",
    })?;
    let loop_name = object.name.as_str();

    let schemes_name = format!("{loop_name} Operation Schemes");
    let schemes = session.push(named(
        IddObjectType::PlantEquipmentOperationSchemes,
        &schemes_name,
    ));

    let always_on_id = cx.model.find_always_on_discrete_schedule().ok_or_else(|| {
        TranslateError::structure(loop_name, "always-on discrete schedule is missing")
    })?;
    let always_on = translate_named(cx, session, always_on_id)?;

    let builder = SchemeList {
        schemes,
        always_on: &always_on,
    };

    if pl.has_user_schemes() {
        let assigned = [
            (pl.cooling_load_scheme, false),
            (pl.heating_load_scheme, false),
            (pl.primary_scheme, true),
        ];
        for (assignment, primary) in assigned {
            let Some(SchemeAssignment { scheme, schedule }) = assignment else {
                continue;
            };
            let record = translate_object(cx, session, scheme)?.ok_or_else(|| {
                TranslateError::NoRecord {
                    name: cx.model.name(scheme).to_string(),
                }
            })?;
            let schedule = schedule
                .map(|s| translate_named(cx, session, s))
                .transpose()?;
            builder.list(session, record, schedule.as_deref());
            if primary {
                setpoint_scheme(cx, session, &builder, plant_loop, loop_name)?;
            }
        }
        tracing::debug!(plant_loop = %loop_name, "applied user operation schemes");
        return Ok(schemes_name);
    }

    let heating = heating_components(cx, plant_loop);
    if !heating.is_empty() {
        let scheme = load_scheme(
            cx,
            session,
            IddObjectType::PlantEquipmentOperationHeatingLoad,
            &format!("{loop_name} Heating"),
            &heating,
        )?;
        builder.list(session, scheme, None);
    }

    let cooling = cooling_components(cx, plant_loop);
    if !cooling.is_empty() {
        let scheme = load_scheme(
            cx,
            session,
            IddObjectType::PlantEquipmentOperationCoolingLoad,
            &format!("{loop_name} Cooling"),
            &cooling,
        )?;
        builder.list(session, scheme, None);
    }

    let uncontrolled = uncontrolled_components(cx, plant_loop);
    if !uncontrolled.is_empty() {
        let list_name = format!("{loop_name} Uncontrolled Equipment List");
        let mut scheme = named(
            IddObjectType::PlantEquipmentOperationUncontrolled,
            &format!("{loop_name} Uncontrolled Operation Scheme"),
        );
        scheme.set_string(PlantEquipmentOperationUncontrolledFields::EquipmentListName, &list_name);
        let scheme = session.push(scheme);
        equipment_list(cx, session, &list_name, &uncontrolled)?;
        builder.list(session, scheme, None);
    }

    setpoint_scheme(cx, session, &builder, plant_loop, loop_name)?;

    tracing::debug!(
        plant_loop = %loop_name,
        heating = heating.len(),
        cooling = cooling.len(),
        uncontrolled = uncontrolled.len(),
        "applied default operation schemes"
    );
    Ok(schemes_name)
}

/// The loop's scheme list record and the schedule schemes default to.
struct SchemeList<'a> {
    schemes: RecordId,
    always_on: &'a str,
}

impl SchemeList<'_> {
    fn list(&self, session: &mut TranslationSession, scheme: RecordId, schedule: Option<&str>) {
        let (idd_type, name) = {
            let r = session.record(scheme);
            (r.idd_type(), r.name().unwrap_or_default().to_string())
        };
        self.list_named(session, idd_type, name, schedule);
    }

    fn list_named(
        &self,
        session: &mut TranslationSession,
        idd_type: IddObjectType,
        name: String,
        schedule: Option<&str>,
    ) {
        use PlantEquipmentOperationSchemesExtensibleFields as F;
        session
            .record_mut(self.schemes)
            .push_group()
            .set_string(F::ControlSchemeObjectType, idd_type.name())
            .set_string(F::ControlSchemeName, name)
            .set_string(F::ControlSchemeScheduleName, schedule.unwrap_or(self.always_on));
    }
}

/// Default single-range load scheme `"{prefix} Operation Scheme"` with its
/// equipment list `"{prefix} Equipment List"`.
fn load_scheme(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    idd_type: IddObjectType,
    prefix: &str,
    equipment: &[ObjectId],
) -> TranslateResult<RecordId> {
    let list_name = format!("{prefix} Equipment List");
    let scheme = session.push(named(idd_type, &format!("{prefix} Operation Scheme")));
    equipment_list(cx, session, &list_name, equipment)?;
    push_range(session, scheme, 0.0, DEFAULT_RANGE_UPPER_W, &list_name)?;
    Ok(scheme)
}

fn push_range(
    session: &mut TranslationSession,
    scheme: RecordId,
    lower: f64,
    upper: f64,
    list_name: &str,
) -> TranslateResult<()> {
    let lower = number("load range lower limit", lower)?;
    let upper = number("load range upper limit", upper)?;
    let record = session.record_mut(scheme);
    let heating = record.idd_type() == IddObjectType::PlantEquipmentOperationHeatingLoad;
    let group = record.push_group();
    if heating {
        use PlantEquipmentOperationHeatingLoadExtensibleFields as F;
        group
            .set_string(F::LoadRangeLowerLimit, lower)
            .set_string(F::LoadRangeUpperLimit, upper)
            .set_string(F::RangeEquipmentListName, list_name);
    } else {
        use PlantEquipmentOperationCoolingLoadExtensibleFields as F;
        group
            .set_string(F::LoadRangeLowerLimit, lower)
            .set_string(F::LoadRangeUpperLimit, upper)
            .set_string(F::RangeEquipmentListName, list_name);
    }
    Ok(())
}

/// Push a `PlantEquipmentList` naming the records of `equipment`, in order.
/// Equipment without a record of its own is left off.
fn equipment_list(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    name: &str,
    equipment: &[ObjectId],
) -> TranslateResult<RecordId> {
    let list = session.push(named(IddObjectType::PlantEquipmentList, name));
    for &component in equipment {
        let Some(record) = translate_object(cx, session, component)? else {
            tracing::warn!(
                component = cx.model.name(component),
                list = %name,
                "equipment has no record, leaving it off the list"
            );
            continue;
        };
        let (idd_type, equipment_name) = {
            let r = session.record(record);
            (r.idd_type(), r.name().unwrap_or_default().to_string())
        };
        session
            .record_mut(list)
            .push_group()
            .set_string(PlantEquipmentListExtensibleFields::EquipmentObjectType, idd_type.name())
            .set_string(PlantEquipmentListExtensibleFields::EquipmentName, equipment_name);
    }
    Ok(list)
}

/// Component setpoint scheme for supply equipment with its own setpoint
/// manager. Nothing is emitted when there is no such equipment.
fn setpoint_scheme(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    builder: &SchemeList<'_>,
    plant_loop: ObjectId,
    loop_name: &str,
) -> TranslateResult<()> {
    let components = setpoint_components(cx, plant_loop);
    if components.is_empty() {
        return Ok(());
    }
    let Some(topology) = cx.topology.get(plant_loop) else {
        return Err(TranslateError::structure(
            loop_name,
            "loop topology was not indexed",
        ));
    };

    let name = format!("{loop_name} Setpoint Operation Scheme");
    let scheme = session.push(named(
        IddObjectType::PlantEquipmentOperationComponentSetpoint,
        &name,
    ));
    let schedule = cx
        .model
        .plant_loop(plant_loop)
        .and_then(|pl| pl.component_setpoint_scheme_schedule)
        .map(|s| translate_named(cx, session, s))
        .transpose()?;
    builder.list_named(
        session,
        IddObjectType::PlantEquipmentOperationComponentSetpoint,
        name,
        schedule.as_deref(),
    );

    for component in components {
        let controlled = operation_scheme_component(cx.model, component);
        let record = translate_object(cx, session, controlled)?.ok_or_else(|| {
            TranslateError::NoRecord {
                name: cx.model.name(controlled).to_string(),
            }
        })?;
        let (idd_type, equipment_name) = {
            let r = session.record(record);
            (r.idd_type(), r.name().unwrap_or_default().to_string())
        };
        let node_before = topology
            .supply
            .before(component)
            .filter(|n| cx.model.is_node(*n));
        let node_after = topology
            .supply
            .after(component)
            .filter(|n| cx.model.is_node(*n));
        let flow = match flow_rate(cx.model, component) {
            Some(v) => number("component flow rate", v)?,
            None => AUTOSIZE.to_string(),
        };

        use PlantEquipmentOperationComponentSetpointExtensibleFields as F;
        session
            .record_mut(scheme)
            .push_group()
            .set_string(F::EquipmentObjectType, idd_type.name())
            .set_string(F::EquipmentName, equipment_name)
            .set_if_some(F::DemandCalculationNodeName, node_name(cx.model, node_before))
            .set_if_some(F::SetpointNodeName, node_name(cx.model, node_after))
            .set_string(F::ComponentFlowRate, flow)
            .set_string(
                F::OperationType,
                component_type(cx, component).operation_type(),
            );
    }
    Ok(())
}

/// Translate a user-defined scheme under its own name.
///
/// Load-range schemes get one equipment list per range,
/// `"{scheme} Equipment List {n}"`; an uncontrolled scheme gets
/// `"{scheme} Equipment List"`.
pub(crate) fn translate_user_scheme(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    name: &str,
    scheme: &OperationScheme,
) -> TranslateResult<RecordId> {
    match scheme {
        OperationScheme::HeatingLoad { ranges } => load_range_scheme(
            cx,
            session,
            IddObjectType::PlantEquipmentOperationHeatingLoad,
            name,
            ranges,
        ),
        OperationScheme::CoolingLoad { ranges } => load_range_scheme(
            cx,
            session,
            IddObjectType::PlantEquipmentOperationCoolingLoad,
            name,
            ranges,
        ),
        OperationScheme::Uncontrolled { equipment } => {
            let list_name = format!("{name} Equipment List");
            let mut record = named(IddObjectType::PlantEquipmentOperationUncontrolled, name);
            record.set_string(PlantEquipmentOperationUncontrolledFields::EquipmentListName, &list_name);
            let record = session.push(record);
            let equipment = scheme_equipment(cx, equipment);
            equipment_list(cx, session, &list_name, &equipment)?;
            Ok(record)
        }
    }
}

fn load_range_scheme(
    cx: TranslateContext<'_>,
    session: &mut TranslationSession,
    idd_type: IddObjectType,
    name: &str,
    ranges: &[LoadRange],
) -> TranslateResult<RecordId> {
    let record = session.push(named(idd_type, name));
    for (i, range) in ranges.iter().enumerate() {
        let list_name = format!("{name} Equipment List {}", i + 1);
        let equipment = scheme_equipment(cx, &range.equipment);
        equipment_list(cx, session, &list_name, &equipment)?;
        push_range(
            session,
            record,
            range.lower_limit_w,
            range.upper_limit_w,
            &list_name,
        )?;
    }
    Ok(record)
}

fn scheme_equipment(cx: TranslateContext<'_>, equipment: &[ObjectId]) -> Vec<ObjectId> {
    equipment
        .iter()
        .map(|c| operation_scheme_component(cx.model, *c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pl_idf::IdfObject;
    use pl_idf::idd::PlantEquipmentOperationSchemesFields;
    use pl_model::{Autosizable, ComponentKind, Model, SetpointManager, TopologyIndex};

    fn boiler() -> ComponentKind {
        ComponentKind::BoilerHotWater {
            nominal_capacity_w: Autosizable::Autosize,
            nominal_thermal_efficiency: 0.8,
            design_water_flow_rate_m3ps: Autosizable::Autosize,
            fuel_type: "NaturalGas".into(),
        }
    }

    fn translate(m: &Model, l: ObjectId) -> TranslateResult<TranslationSession> {
        let t = TopologyIndex::build(m)?;
        let cx = TranslateContext::new(m, &t);
        let mut s = TranslationSession::new();
        translate_object(cx, &mut s, l)?;
        Ok(s)
    }

    fn find<'a>(s: &'a TranslationSession, idd_type: IddObjectType, name: &str) -> &'a IdfObject {
        s.record(s.find(idd_type, name).unwrap())
    }

    fn hot_water_loop() -> (Model, ObjectId, ObjectId) {
        let mut m = Model::new();
        m.always_on_discrete_schedule();
        let l = m.add_plant_loop("HW");
        let b = m.add_component("Boiler", boiler());
        m.add_supply_branch_for_component(l, b).unwrap();
        (m, l, b)
    }

    #[test]
    fn default_heating_scheme() {
        let (m, l, _) = hot_water_loop();
        let s = translate(&m, l).unwrap();

        let schemes = find(&s, IddObjectType::PlantEquipmentOperationSchemes, "HW Operation Schemes");
        assert_eq!(schemes.num_groups(), 1);
        let g = &schemes.groups()[0];
        assert_eq!(
            g.get_string(PlantEquipmentOperationSchemesExtensibleFields::ControlSchemeName),
            Some("HW Heating Operation Scheme")
        );
        assert_eq!(
            g.get_string(PlantEquipmentOperationSchemesExtensibleFields::ControlSchemeScheduleName),
            Some(pl_model::ALWAYS_ON_DISCRETE)
        );

        let heating = find(
            &s,
            IddObjectType::PlantEquipmentOperationHeatingLoad,
            "HW Heating Operation Scheme",
        );
        let range = &heating.groups()[0];
        assert_eq!(
            range.get_double(PlantEquipmentOperationHeatingLoadExtensibleFields::LoadRangeUpperLimit),
            Some(1e9)
        );
        let list = find(&s, IddObjectType::PlantEquipmentList, "HW Heating Equipment List");
        assert_eq!(
            list.groups()[0].get_string(PlantEquipmentListExtensibleFields::EquipmentName),
            Some("Boiler")
        );
    }

    #[test]
    fn setpoint_on_equipment_outlet_adds_component_setpoint_scheme() {
        let (mut m, l, b) = hot_water_loop();
        let outlet = m.component(b).unwrap().passage(pl_model::PassageRole::Main).unwrap().outlet;
        let sched = m.add_schedule_constant("HW Temp", 80.0, None);
        m.add_setpoint_manager(
            "Boiler SPM",
            SetpointManager::Scheduled {
                control_variable: "Temperature".into(),
                schedule: sched,
                node: outlet,
            },
        );
        let s = translate(&m, l).unwrap();

        let scheme = find(
            &s,
            IddObjectType::PlantEquipmentOperationComponentSetpoint,
            "HW Setpoint Operation Scheme",
        );
        use PlantEquipmentOperationComponentSetpointExtensibleFields as F;
        let g = &scheme.groups()[0];
        assert_eq!(g.get_string(F::EquipmentName), Some("Boiler"));
        assert_eq!(g.get_string(F::DemandCalculationNodeName), Some("HW Supply Connector Node"));
        assert_eq!(g.get_string(F::SetpointNodeName), Some("Boiler Outlet Node"));
        assert_eq!(g.get_string(F::ComponentFlowRate), Some("Autosize"));
        assert_eq!(g.get_string(F::OperationType), Some("Heating"));

        let schemes = find(&s, IddObjectType::PlantEquipmentOperationSchemes, "HW Operation Schemes");
        assert_eq!(schemes.num_groups(), 2);
    }

    #[test]
    fn user_load_scheme_replaces_defaults() {
        let (mut m, l, b) = hot_water_loop();
        let b2 = m.add_component("Boiler 2", boiler());
        m.add_supply_branch_for_component(l, b2).unwrap();
        let scheme = m.add_operation_scheme(
            "Staged",
            OperationScheme::HeatingLoad {
                ranges: vec![
                    LoadRange {
                        lower_limit_w: 0.0,
                        upper_limit_w: 50_000.0,
                        equipment: vec![b],
                    },
                    LoadRange {
                        lower_limit_w: 50_000.0,
                        upper_limit_w: 1e6,
                        equipment: vec![b, b2],
                    },
                ],
            },
        );
        m.plant_loop_mut(l).unwrap().heating_load_scheme = Some(SchemeAssignment {
            scheme,
            schedule: None,
        });
        let s = translate(&m, l).unwrap();

        assert!(s
            .find(IddObjectType::PlantEquipmentOperationHeatingLoad, "HW Heating Operation Scheme")
            .is_none());
        let staged = find(&s, IddObjectType::PlantEquipmentOperationHeatingLoad, "Staged");
        assert_eq!(staged.num_groups(), 2);
        assert_eq!(
            staged.groups()[1]
                .get_string(PlantEquipmentOperationHeatingLoadExtensibleFields::RangeEquipmentListName),
            Some("Staged Equipment List 2")
        );
        let list = find(&s, IddObjectType::PlantEquipmentList, "Staged Equipment List 2");
        assert_eq!(list.num_groups(), 2);

        let schemes = find(&s, IddObjectType::PlantEquipmentOperationSchemes, "HW Operation Schemes");
        assert_eq!(schemes.num_groups(), 1);
        assert_eq!(
            schemes.get_string(PlantEquipmentOperationSchemesFields::Name),
            Some("HW Operation Schemes")
        );
    }

    #[test]
    fn missing_always_on_schedule_is_an_error() {
        let mut m = Model::new();
        let l = m.add_plant_loop("Bare");
        let err = translate(&m, l).unwrap_err();
        assert!(matches!(err, TranslateError::Structure { .. }));
    }
}
