//! Loop topology derived from port wiring.
//!
//! Each loop side becomes a `pl_graph::Graph` whose vertices are nodes,
//! components, the splitter and the mixer. Runs between two anchors are
//! read back with `Graph::between`, so a run always contains both of its
//! boundary objects.

use std::collections::{HashMap, HashSet};

use pl_core::ObjectId;
use pl_graph::{Graph, GraphBuilder};

use crate::component::PassageRole;
use crate::error::{ModelError, ModelResult};
use crate::model::{Model, PortRef, PortSlot};
use crate::object::ObjectKind;
use crate::plant_loop::{LoopSide, SideAnchors};

/// One side of one loop.
#[derive(Debug, Clone)]
pub struct SideTopology {
    pub side: LoopSide,
    pub anchors: SideAnchors,
    graph: Graph,
    splitter_outlets: Vec<ObjectId>,
    mixer_inlets: Vec<ObjectId>,
}

impl SideTopology {
    fn build(
        model: &Model,
        consumers: &HashMap<ObjectId, PortRef>,
        loop_name: &str,
        side: LoopSide,
        anchors: SideAnchors,
    ) -> ModelResult<Self> {
        let mut builder = GraphBuilder::new();
        builder.add_vertex(anchors.inlet_node);

        let mut visited = HashSet::new();
        let mut stack = vec![anchors.inlet_node];
        while let Some(node) = stack.pop() {
            if !visited.insert(node) || node == anchors.outlet_node {
                continue;
            }
            let port = consumers
                .get(&node)
                .copied()
                .ok_or_else(|| ModelError::OpenLoopSide {
                    loop_name: loop_name.to_string(),
                    node: model.name(node).to_string(),
                })?;
            builder.link_objects(node, port.object);

            let downstream = downstream_nodes(model, port);
            for next in &downstream {
                builder.link_objects(port.object, *next);
            }
            stack.extend(downstream.into_iter().rev());
        }

        let graph = builder.build()?;
        if !graph.contains(anchors.outlet_node) {
            return Err(ModelError::OpenLoopSide {
                loop_name: loop_name.to_string(),
                node: model.name(anchors.inlet_node).to_string(),
            });
        }

        let splitter_outlets = model
            .splitter(anchors.splitter)
            .map(|s| s.outlets.clone())
            .unwrap_or_default();
        let mixer_inlets = model
            .mixer(anchors.mixer)
            .map(|m| m.inlets.clone())
            .unwrap_or_default();

        Ok(Self {
            side,
            anchors,
            graph,
            splitter_outlets,
            mixer_inlets,
        })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Objects from `from` to `to` inclusive, in flow order.
    pub fn components(&self, from: ObjectId, to: ObjectId) -> Vec<ObjectId> {
        self.graph.between(from, to)
    }

    /// The whole side: inlet run, each branch in order, outlet run.
    pub fn all(&self) -> Vec<ObjectId> {
        self.components(self.anchors.inlet_node, self.anchors.outlet_node)
    }

    pub fn contains(&self, object: ObjectId) -> bool {
        self.graph.contains(object)
    }

    pub fn splitter_outlets(&self) -> &[ObjectId] {
        &self.splitter_outlets
    }

    pub fn mixer_inlets(&self) -> &[ObjectId] {
        &self.mixer_inlets
    }

    /// Inlet node through splitter.
    pub fn inlet_run(&self) -> Vec<ObjectId> {
        self.components(self.anchors.inlet_node, self.anchors.splitter)
    }

    /// Mixer through outlet node.
    pub fn outlet_run(&self) -> Vec<ObjectId> {
        self.components(self.anchors.mixer, self.anchors.outlet_node)
    }

    /// Splitter outlet node through mixer inlet node, one run per branch,
    /// pairing outlets and inlets by position.
    pub fn branch_runs(&self) -> Vec<Vec<ObjectId>> {
        self.splitter_outlets
            .iter()
            .zip(self.mixer_inlets.iter())
            .map(|(from, to)| self.components(*from, *to))
            .collect()
    }

    /// The object immediately upstream of `object` on this side.
    pub fn before(&self, object: ObjectId) -> Option<ObjectId> {
        self.graph.predecessors(object).first().copied()
    }

    /// The object immediately downstream of `object` on this side.
    pub fn after(&self, object: ObjectId) -> Option<ObjectId> {
        self.graph.successors(object).first().copied()
    }
}

fn downstream_nodes(model: &Model, port: PortRef) -> Vec<ObjectId> {
    let Some(obj) = model.object(port.object) else {
        return Vec::new();
    };
    match (&obj.kind, port.slot) {
        (ObjectKind::Component(c), PortSlot::PassageInlet(role)) => c
            .passage(role)
            .and_then(|p| p.outlet)
            .into_iter()
            .collect(),
        (ObjectKind::Splitter(s), PortSlot::SplitterInlet) => s.outlets.clone(),
        (ObjectKind::Mixer(m), PortSlot::MixerInlet(_)) => m.outlet.into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Supply and demand topology of one plant loop.
#[derive(Debug, Clone)]
pub struct LoopTopology {
    pub plant_loop: ObjectId,
    pub supply: SideTopology,
    pub demand: SideTopology,
}

impl LoopTopology {
    pub fn side(&self, side: LoopSide) -> &SideTopology {
        match side {
            LoopSide::Supply => &self.supply,
            LoopSide::Demand => &self.demand,
        }
    }
}

/// Topology of every plant loop in a model, with a reverse index from
/// object to the loop side it sits on.
#[derive(Debug, Clone, Default)]
pub struct TopologyIndex {
    loops: Vec<LoopTopology>,
    by_loop: HashMap<ObjectId, usize>,
    located: HashMap<ObjectId, (ObjectId, LoopSide)>,
}

impl TopologyIndex {
    pub fn build(model: &Model) -> ModelResult<Self> {
        let consumers: HashMap<ObjectId, PortRef> = model
            .attachments()
            .into_iter()
            .filter(|(port, _)| port.slot.is_inlet())
            .map(|(port, node)| (node, port))
            .collect();

        let mut index = Self::default();
        for loop_id in model.plant_loops() {
            let Some(pl) = model.plant_loop(loop_id) else {
                continue;
            };
            let name = model.name(loop_id);
            let supply =
                SideTopology::build(model, &consumers, name, LoopSide::Supply, pl.supply)?;
            let demand =
                SideTopology::build(model, &consumers, name, LoopSide::Demand, pl.demand)?;

            for (side, topo) in [(LoopSide::Supply, &supply), (LoopSide::Demand, &demand)] {
                for object in topo.graph().objects() {
                    index.located.entry(object).or_insert((loop_id, side));
                }
            }
            tracing::debug!(
                plant_loop = name,
                supply_branches = supply.splitter_outlets().len(),
                demand_branches = demand.splitter_outlets().len(),
                "indexed loop topology"
            );

            index.by_loop.insert(loop_id, index.loops.len());
            index.loops.push(LoopTopology {
                plant_loop: loop_id,
                supply,
                demand,
            });
        }
        Ok(index)
    }

    pub fn loops(&self) -> &[LoopTopology] {
        &self.loops
    }

    pub fn get(&self, plant_loop: ObjectId) -> Option<&LoopTopology> {
        self.by_loop.get(&plant_loop).map(|&i| &self.loops[i])
    }

    /// Loop and side holding `object` (a node, connector or single-loop
    /// component).
    pub fn locate(&self, object: ObjectId) -> Option<(ObjectId, LoopSide)> {
        self.located.get(&object).copied()
    }

    /// Loop and side a given passage of `component` is wired into.
    pub fn passage_loop(
        &self,
        model: &Model,
        component: ObjectId,
        role: PassageRole,
    ) -> Option<(ObjectId, LoopSide)> {
        let inlet = model.component(component)?.passage(role)?.inlet?;
        self.locate(inlet)
    }

    fn first_passage_loop(
        &self,
        model: &Model,
        component: ObjectId,
        roles: &[PassageRole],
    ) -> Option<ObjectId> {
        roles
            .iter()
            .find_map(|role| self.passage_loop(model, component, *role))
            .map(|(l, _)| l)
    }

    /// Loop served by the component's plant-side passage.
    pub fn plant_loop_of(&self, model: &Model, component: ObjectId) -> Option<ObjectId> {
        self.first_passage_loop(
            model,
            component,
            &[
                PassageRole::Main,
                PassageRole::Water,
                PassageRole::Supply,
                PassageRole::ChilledWater,
            ],
        )
    }

    /// Loop on the component's source (demand) passage.
    pub fn secondary_plant_loop(&self, model: &Model, component: ObjectId) -> Option<ObjectId> {
        self.first_passage_loop(
            model,
            component,
            &[PassageRole::Demand, PassageRole::Condenser],
        )
    }

    /// Loop on the component's third passage.
    pub fn tertiary_plant_loop(&self, model: &Model, component: ObjectId) -> Option<ObjectId> {
        self.first_passage_loop(
            model,
            component,
            &[PassageRole::Tertiary, PassageRole::HeatRecovery],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Autosizable, ComponentKind};

    fn boiler() -> ComponentKind {
        ComponentKind::BoilerHotWater {
            nominal_capacity_w: Autosizable::Autosize,
            nominal_thermal_efficiency: 0.8,
            design_water_flow_rate_m3ps: Autosizable::Autosize,
            fuel_type: "NaturalGas".into(),
        }
    }

    #[test]
    fn empty_loop_runs() {
        let mut m = Model::new();
        let l = m.add_plant_loop("HW");
        let index = TopologyIndex::build(&m).unwrap();
        let topo = index.get(l).unwrap();

        assert_eq!(topo.supply.inlet_run().len(), 2);
        assert_eq!(topo.supply.outlet_run().len(), 2);
        let branches = topo.supply.branch_runs();
        assert_eq!(branches.len(), 1);
        assert_eq!(branches[0].len(), 1);
        assert_eq!(topo.supply.all().len(), 5);
    }

    #[test]
    fn branch_run_includes_boundary_nodes() {
        let mut m = Model::new();
        let l = m.add_plant_loop("HW");
        let b1 = m.add_component("B1", boiler());
        m.add_supply_branch_for_component(l, b1).unwrap();

        let index = TopologyIndex::build(&m).unwrap();
        let topo = index.get(l).unwrap();
        let runs = topo.supply.branch_runs();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 3);
        assert_eq!(runs[0][1], b1);
        assert_eq!(index.locate(b1), Some((l, LoopSide::Supply)));
        assert_eq!(index.plant_loop_of(&m, b1), Some(l));
    }

    #[test]
    fn dual_loop_component_sits_on_both_loops() {
        let mut m = Model::new();
        let chw = m.add_plant_loop("CHW");
        let cnd = m.add_plant_loop("CND");
        let chiller = m.add_component(
            "Chiller",
            ComponentKind::ChillerElectricEir {
                reference_capacity_w: Autosizable::Autosize,
                reference_cop: 5.5,
                reference_chilled_water_flow_rate_m3ps: Autosizable::Autosize,
                reference_condenser_fluid_flow_rate_m3ps: Autosizable::Autosize,
            },
        );
        m.add_supply_branch_for_component(chw, chiller).unwrap();
        m.add_demand_branch_for_component(cnd, chiller, false).unwrap();

        let index = TopologyIndex::build(&m).unwrap();
        assert!(index.get(chw).unwrap().supply.contains(chiller));
        assert!(index.get(cnd).unwrap().demand.contains(chiller));
        assert_eq!(index.plant_loop_of(&m, chiller), Some(chw));
        assert_eq!(index.secondary_plant_loop(&m, chiller), Some(cnd));
        assert_eq!(index.tertiary_plant_loop(&m, chiller), None);
    }
}
