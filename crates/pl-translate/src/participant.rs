//! How an object shows up on a plant branch.
//!
//! A branch entry needs the node pair the fluid of *this* loop passes
//! through, and sometimes a different object to name. Both depend on the
//! loop being populated, the side, and for multi-passage equipment on the
//! node just upstream.

use pl_core::ObjectId;
use pl_model::{
    ComponentKind, LoopSide, Model, ModelObject, ObjectKind, PassageRole, Ports, TopologyIndex,
};

/// Where a branch is being populated.
#[derive(Debug, Clone, Copy)]
pub struct BranchContext<'a> {
    pub model: &'a Model,
    pub topology: &'a TopologyIndex,
    pub plant_loop: ObjectId,
    pub side: LoopSide,
    /// Last node seen on the run before the current object.
    pub prev_node: Option<ObjectId>,
}

impl BranchContext<'_> {
    fn is_this_loop(&self, found: Option<ObjectId>) -> bool {
        found == Some(self.plant_loop)
    }
}

pub trait BranchParticipant {
    /// Passage of this object that carries the loop being populated.
    fn branch_passage(&self, cx: &BranchContext<'_>) -> Option<PassageRole>;

    /// Container whose record names this object on a branch.
    fn substitute_component(&self, cx: &BranchContext<'_>) -> Option<ObjectId>;

    fn inlet_node(&self, cx: &BranchContext<'_>) -> Option<ObjectId>;

    fn outlet_node(&self, cx: &BranchContext<'_>) -> Option<ObjectId>;
}

impl BranchParticipant for ModelObject {
    fn branch_passage(&self, cx: &BranchContext<'_>) -> Option<PassageRole> {
        let ObjectKind::Component(component) = &self.kind else {
            return None;
        };
        match &component.ports {
            Ports::None => None,
            Ports::Straight(_) => Some(PassageRole::Main),
            // Air loops are not translated here, so only the water passage
            // can sit on a branch.
            Ports::WaterToAir { .. } => Some(PassageRole::Water),
            Ports::WaterToWater { tertiary, .. } => {
                water_to_water_passage(self.id, &component.kind, tertiary.is_some(), cx)
            }
            Ports::Multi(passages) => {
                let prev = cx.prev_node?;
                passages
                    .iter()
                    .find(|(_, p)| p.inlet == Some(prev))
                    .map(|(role, _)| *role)
            }
        }
    }

    fn substitute_component(&self, _cx: &BranchContext<'_>) -> Option<ObjectId> {
        match &self.kind {
            ObjectKind::Component(c) => c.container,
            _ => None,
        }
    }

    fn inlet_node(&self, cx: &BranchContext<'_>) -> Option<ObjectId> {
        let role = self.branch_passage(cx)?;
        component_ports(self)?.passage(role)?.inlet
    }

    fn outlet_node(&self, cx: &BranchContext<'_>) -> Option<ObjectId> {
        let role = self.branch_passage(cx)?;
        component_ports(self)?.passage(role)?.outlet
    }
}

fn component_ports(object: &ModelObject) -> Option<&Ports> {
    match &object.kind {
        ObjectKind::Component(c) => Some(&c.ports),
        _ => None,
    }
}

fn water_to_water_passage(
    id: ObjectId,
    kind: &ComponentKind,
    has_tertiary: bool,
    cx: &BranchContext<'_>,
) -> Option<PassageRole> {
    let loop_of = |role| cx.topology.passage_loop(cx.model, id, role).map(|(l, _)| l);

    // Cooling loop on the supply passage, heating loop on the tertiary one,
    // source loop on the demand one.
    if matches!(kind, ComponentKind::CentralHeatPumpSystem { .. }) {
        return [PassageRole::Supply, PassageRole::Tertiary, PassageRole::Demand]
            .into_iter()
            .find(|role| cx.is_this_loop(loop_of(*role)));
    }

    match cx.side {
        LoopSide::Supply => {
            // A tank heated from this loop sits here with its source side.
            if kind.is_water_heater() && cx.is_this_loop(loop_of(PassageRole::Demand)) {
                Some(PassageRole::Demand)
            } else {
                Some(PassageRole::Supply)
            }
        }
        LoopSide::Demand => {
            let tertiary_here = has_tertiary
                && cx.topology.passage_loop(cx.model, id, PassageRole::Tertiary)
                    == Some((cx.plant_loop, LoopSide::Demand));
            if tertiary_here {
                Some(PassageRole::Tertiary)
            } else {
                Some(PassageRole::Demand)
            }
        }
    }
}
