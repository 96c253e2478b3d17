//! The model arena and its wiring API.

use std::collections::HashMap;

use pl_core::ObjectId;

use crate::component::{Component, ComponentKind, PassageRole, Ports};
use crate::error::{ModelError, ModelResult};
use crate::object::{
    Mixer, ModelObject, ObjectKind, OperationScheme, Schedule, ScheduleTypeLimits,
    SetpointManager, Splitter,
};
use crate::plant_loop::{LoopSide, PlantLoop, SideAnchors};

/// Name of the shared always-on schedule used by operation schemes.
pub const ALWAYS_ON_DISCRETE: &str = "Always On Discrete";

/// Where a node attaches to an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortSlot {
    PassageInlet(PassageRole),
    PassageOutlet(PassageRole),
    SplitterInlet,
    SplitterOutlet(usize),
    MixerInlet(usize),
    MixerOutlet,
}

impl PortSlot {
    /// True when fluid enters the owning object through this slot.
    pub fn is_inlet(self) -> bool {
        matches!(
            self,
            PortSlot::PassageInlet(_) | PortSlot::SplitterInlet | PortSlot::MixerInlet(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRef {
    pub object: ObjectId,
    pub slot: PortSlot,
}

/// Arena of named model objects.
///
/// Objects are never removed, so an `ObjectId` stays valid for the life of
/// the model. Names are unique; clashing names get a numeric suffix.
#[derive(Debug, Clone, Default)]
pub struct Model {
    objects: Vec<ModelObject>,
    names: HashMap<String, ObjectId>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// First free name derived from `base`.
    pub fn unique_name(&self, base: &str) -> String {
        if !self.names.contains_key(base) {
            return base.to_string();
        }
        let mut n = 1;
        loop {
            let candidate = format!("{base} {n}");
            if !self.names.contains_key(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    fn push(&mut self, name: &str, kind: ObjectKind) -> ObjectId {
        let id = ObjectId::from_usize(self.objects.len());
        let name = self.unique_name(name);
        tracing::trace!(%id, name = %name, kind = kind.type_label(), "add object");
        self.names.insert(name.clone(), id);
        self.objects.push(ModelObject { id, name, kind });
        id
    }

    pub fn objects(&self) -> &[ModelObject] {
        &self.objects
    }

    pub fn object(&self, id: ObjectId) -> Option<&ModelObject> {
        self.objects.get(id.slot())
    }

    pub fn get(&self, id: ObjectId) -> ModelResult<&ModelObject> {
        self.object(id).ok_or(ModelError::ObjectNotFound { id })
    }

    fn get_mut(&mut self, id: ObjectId) -> ModelResult<&mut ModelObject> {
        self.objects
            .get_mut(id.slot())
            .ok_or(ModelError::ObjectNotFound { id })
    }

    /// Name of `id`, or an empty string for an unknown ID.
    pub fn name(&self, id: ObjectId) -> &str {
        self.object(id).map_or("", |o| o.name.as_str())
    }

    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.names.get(name).copied()
    }

    /// Rename an object; returns the name actually given.
    pub fn set_name(&mut self, id: ObjectId, name: &str) -> ModelResult<String> {
        let old = self.get(id)?.name.clone();
        if old == name {
            return Ok(old);
        }
        let new = self.unique_name(name);
        self.names.remove(&old);
        self.names.insert(new.clone(), id);
        self.get_mut(id)?.name = new.clone();
        Ok(new)
    }

    pub fn is_node(&self, id: ObjectId) -> bool {
        matches!(self.object(id).map(|o| &o.kind), Some(ObjectKind::Node))
    }

    pub fn component(&self, id: ObjectId) -> Option<&Component> {
        match &self.object(id)?.kind {
            ObjectKind::Component(c) => Some(c),
            _ => None,
        }
    }

    pub fn component_mut(&mut self, id: ObjectId) -> Option<&mut Component> {
        match &mut self.objects.get_mut(id.slot())?.kind {
            ObjectKind::Component(c) => Some(c),
            _ => None,
        }
    }

    pub fn plant_loop(&self, id: ObjectId) -> Option<&PlantLoop> {
        match &self.object(id)?.kind {
            ObjectKind::PlantLoop(l) => Some(l),
            _ => None,
        }
    }

    pub fn plant_loop_mut(&mut self, id: ObjectId) -> Option<&mut PlantLoop> {
        match &mut self.objects.get_mut(id.slot())?.kind {
            ObjectKind::PlantLoop(l) => Some(l),
            _ => None,
        }
    }

    pub fn splitter(&self, id: ObjectId) -> Option<&Splitter> {
        match &self.object(id)?.kind {
            ObjectKind::Splitter(s) => Some(s),
            _ => None,
        }
    }

    pub fn mixer(&self, id: ObjectId) -> Option<&Mixer> {
        match &self.object(id)?.kind {
            ObjectKind::Mixer(m) => Some(m),
            _ => None,
        }
    }

    pub fn schedule(&self, id: ObjectId) -> Option<&Schedule> {
        match &self.object(id)?.kind {
            ObjectKind::Schedule(s) => Some(s),
            _ => None,
        }
    }

    pub fn setpoint_manager(&self, id: ObjectId) -> Option<&SetpointManager> {
        match &self.object(id)?.kind {
            ObjectKind::SetpointManager(s) => Some(s),
            _ => None,
        }
    }

    pub fn operation_scheme(&self, id: ObjectId) -> Option<&OperationScheme> {
        match &self.object(id)?.kind {
            ObjectKind::OperationScheme(s) => Some(s),
            _ => None,
        }
    }

    fn ids_where(&self, f: impl Fn(&ObjectKind) -> bool) -> Vec<ObjectId> {
        self.objects
            .iter()
            .filter(|o| f(&o.kind))
            .map(|o| o.id)
            .collect()
    }

    pub fn plant_loops(&self) -> Vec<ObjectId> {
        self.ids_where(|k| matches!(k, ObjectKind::PlantLoop(_)))
    }

    pub fn components(&self) -> Vec<ObjectId> {
        self.ids_where(|k| matches!(k, ObjectKind::Component(_)))
    }

    pub fn schedules(&self) -> Vec<ObjectId> {
        self.ids_where(|k| matches!(k, ObjectKind::Schedule(_)))
    }

    pub fn setpoint_managers(&self) -> Vec<ObjectId> {
        self.ids_where(|k| matches!(k, ObjectKind::SetpointManager(_)))
    }

    /// Setpoint managers controlling `node`, in creation order.
    pub fn setpoint_managers_on(&self, node: ObjectId) -> Vec<ObjectId> {
        self.ids_where(|k| match k {
            ObjectKind::SetpointManager(spm) => spm.node() == Some(node),
            _ => false,
        })
    }

    /// Components whose container is `container`, in creation order.
    pub fn children_of(&self, container: ObjectId) -> Vec<ObjectId> {
        self.ids_where(|k| match k {
            ObjectKind::Component(c) => c.container == Some(container),
            _ => false,
        })
    }

    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    pub(crate) fn add_node(&mut self, name: &str) -> ObjectId {
        self.push(name, ObjectKind::Node)
    }

    pub fn add_component(&mut self, name: &str, kind: ComponentKind) -> ObjectId {
        self.push(name, ObjectKind::Component(Component::new(kind)))
    }

    /// Create a plant loop with an empty supply and demand side.
    ///
    /// Each side is `inlet node -> splitter -> node -> mixer -> outlet node`.
    pub fn add_plant_loop(&mut self, name: &str) -> ObjectId {
        let name = self.unique_name(name);
        let supply = self.add_side(&name, LoopSide::Supply);
        let demand = self.add_side(&name, LoopSide::Demand);
        let id = self.push(&name, ObjectKind::PlantLoop(Box::new(PlantLoop::new(supply, demand))));
        tracing::debug!(plant_loop = %name, "created plant loop topology");
        id
    }

    fn add_side(&mut self, loop_name: &str, side: LoopSide) -> SideAnchors {
        let label = side.label();
        let inlet_node = self.add_node(&format!("{loop_name} {label} Inlet Node"));
        let connector = self.add_node(&format!("{loop_name} {label} Connector Node"));
        let outlet_node = self.add_node(&format!("{loop_name} {label} Outlet Node"));
        let splitter = self.push(
            &format!("{loop_name} {label} Splitter"),
            ObjectKind::Splitter(Splitter {
                inlet: Some(inlet_node),
                outlets: vec![connector],
            }),
        );
        let mixer = self.push(
            &format!("{loop_name} {label} Mixer"),
            ObjectKind::Mixer(Mixer {
                inlets: vec![connector],
                outlet: Some(outlet_node),
            }),
        );
        SideAnchors {
            inlet_node,
            splitter,
            mixer,
            outlet_node,
        }
    }

    pub fn add_schedule_constant(
        &mut self,
        name: &str,
        value: f64,
        type_limits: Option<ScheduleTypeLimits>,
    ) -> ObjectId {
        self.push(name, ObjectKind::Schedule(Schedule::Constant { value, type_limits }))
    }

    pub fn find_always_on_discrete_schedule(&self) -> Option<ObjectId> {
        let id = self.find_by_name(ALWAYS_ON_DISCRETE)?;
        self.schedule(id).map(|_| id)
    }

    /// The shared always-on schedule, created on first use.
    pub fn always_on_discrete_schedule(&mut self) -> ObjectId {
        match self.find_always_on_discrete_schedule() {
            Some(id) => id,
            None => self.add_schedule_constant(
                ALWAYS_ON_DISCRETE,
                1.0,
                Some(ScheduleTypeLimits::on_off()),
            ),
        }
    }

    pub fn add_setpoint_manager(&mut self, name: &str, spm: SetpointManager) -> ObjectId {
        self.push(name, ObjectKind::SetpointManager(spm))
    }

    pub fn add_operation_scheme(&mut self, name: &str, scheme: OperationScheme) -> ObjectId {
        self.push(name, ObjectKind::OperationScheme(scheme))
    }

    /// Make `child` a part of `container` (coil in zone equipment, tank in
    /// a heat-pump water heater, heat recovery in a generator).
    pub fn set_container(&mut self, child: ObjectId, container: ObjectId) -> ModelResult<()> {
        let container_obj = self.get(container)?;
        let child_obj = self.get(child)?;
        let (ObjectKind::Component(outer), ObjectKind::Component(inner)) =
            (&container_obj.kind, &child_obj.kind)
        else {
            return Err(ModelError::InvalidContainment {
                container: container_obj.name.clone(),
                child: child_obj.name.clone(),
            });
        };
        if !outer.kind.accepts_child(&inner.kind) {
            return Err(ModelError::InvalidContainment {
                container: container_obj.name.clone(),
                child: child_obj.name.clone(),
            });
        }
        if let Some(c) = self.component_mut(child) {
            c.container = Some(container);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Wiring
    // ------------------------------------------------------------------

    /// Every (port, node) attachment in the model.
    pub fn attachments(&self) -> Vec<(PortRef, ObjectId)> {
        let mut out = Vec::new();
        for obj in &self.objects {
            let at = |slot| PortRef {
                object: obj.id,
                slot,
            };
            match &obj.kind {
                ObjectKind::Component(c) => {
                    for (role, passage) in c.ports.passages() {
                        if let Some(n) = passage.inlet {
                            out.push((at(PortSlot::PassageInlet(role)), n));
                        }
                        if let Some(n) = passage.outlet {
                            out.push((at(PortSlot::PassageOutlet(role)), n));
                        }
                    }
                }
                ObjectKind::Splitter(s) => {
                    if let Some(n) = s.inlet {
                        out.push((at(PortSlot::SplitterInlet), n));
                    }
                    for (i, n) in s.outlets.iter().enumerate() {
                        out.push((at(PortSlot::SplitterOutlet(i)), *n));
                    }
                }
                ObjectKind::Mixer(m) => {
                    for (i, n) in m.inlets.iter().enumerate() {
                        out.push((at(PortSlot::MixerInlet(i)), *n));
                    }
                    if let Some(n) = m.outlet {
                        out.push((at(PortSlot::MixerOutlet), n));
                    }
                }
                _ => {}
            }
        }
        out
    }

    /// The object that takes fluid from `node`.
    pub fn consumer_of(&self, node: ObjectId) -> Option<PortRef> {
        self.attachments()
            .into_iter()
            .find(|(port, n)| *n == node && port.slot.is_inlet())
            .map(|(port, _)| port)
    }

    /// The object that delivers fluid into `node`.
    pub fn producer_of(&self, node: ObjectId) -> Option<PortRef> {
        self.attachments()
            .into_iter()
            .find(|(port, n)| *n == node && !port.slot.is_inlet())
            .map(|(port, _)| port)
    }

    fn set_port(&mut self, port: PortRef, node: ObjectId) -> ModelResult<()> {
        let obj = self.get_mut(port.object)?;
        let name = obj.name.clone();
        match (&mut obj.kind, port.slot) {
            (ObjectKind::Component(c), PortSlot::PassageInlet(role)) => {
                let p = c
                    .ports
                    .passage_mut(role)
                    .ok_or(ModelError::NoSuchPassage { name, role })?;
                p.inlet = Some(node);
            }
            (ObjectKind::Component(c), PortSlot::PassageOutlet(role)) => {
                let p = c
                    .ports
                    .passage_mut(role)
                    .ok_or(ModelError::NoSuchPassage { name, role })?;
                p.outlet = Some(node);
            }
            (ObjectKind::Splitter(s), PortSlot::SplitterInlet) => s.inlet = Some(node),
            (ObjectKind::Splitter(s), PortSlot::SplitterOutlet(i)) => {
                if let Some(slot) = s.outlets.get_mut(i) {
                    *slot = node;
                }
            }
            (ObjectKind::Mixer(m), PortSlot::MixerInlet(i)) => {
                if let Some(slot) = m.inlets.get_mut(i) {
                    *slot = node;
                }
            }
            (ObjectKind::Mixer(m), PortSlot::MixerOutlet) => m.outlet = Some(node),
            _ => {
                return Err(ModelError::WrongKind {
                    name,
                    expected: "port owner",
                });
            }
        }
        Ok(())
    }

    fn free_passage(&self, component: ObjectId, role: PassageRole) -> ModelResult<String> {
        let obj = self.get(component)?;
        let ObjectKind::Component(c) = &obj.kind else {
            return Err(ModelError::WrongKind {
                name: obj.name.clone(),
                expected: "component",
            });
        };
        match c.ports.passage(role) {
            None => Err(ModelError::NoSuchPassage {
                name: obj.name.clone(),
                role,
            }),
            Some(p) if p.is_connected() => Err(ModelError::AlreadyConnected {
                name: obj.name.clone(),
                role,
            }),
            Some(_) => Ok(obj.name.clone()),
        }
    }

    fn passage_node_name(component: &str, role: PassageRole, end: &str) -> String {
        match role.label() {
            "" => format!("{component} {end} Node"),
            label => format!("{component} {label} {end} Node"),
        }
    }

    fn connect_passage(
        &mut self,
        component: ObjectId,
        role: PassageRole,
        inlet: ObjectId,
        outlet: ObjectId,
    ) -> ModelResult<()> {
        self.set_port(
            PortRef {
                object: component,
                slot: PortSlot::PassageInlet(role),
            },
            inlet,
        )?;
        self.set_port(
            PortRef {
                object: component,
                slot: PortSlot::PassageOutlet(role),
            },
            outlet,
        )
    }

    /// Insert a component passage at `node`.
    ///
    /// The passage goes downstream of `node`; when `node` ends a loop side
    /// (nothing downstream) the passage goes upstream of it instead.
    pub fn add_to_node(
        &mut self,
        component: ObjectId,
        role: PassageRole,
        node: ObjectId,
    ) -> ModelResult<()> {
        let comp_name = self.free_passage(component, role)?;
        if !self.is_node(node) {
            return Err(ModelError::WrongKind {
                name: self.name(node).to_string(),
                expected: "node",
            });
        }

        if let Some(consumer) = self.consumer_of(node) {
            let new_node = self.add_node(&Self::passage_node_name(&comp_name, role, "Outlet"));
            self.set_port(consumer, new_node)?;
            self.connect_passage(component, role, node, new_node)
        } else if let Some(producer) = self.producer_of(node) {
            let new_node = self.add_node(&Self::passage_node_name(&comp_name, role, "Inlet"));
            self.set_port(producer, new_node)?;
            self.connect_passage(component, role, new_node, node)
        } else {
            Err(ModelError::DetachedNode {
                node: self.name(node).to_string(),
            })
        }
    }

    /// Passage a component uses when placed on a branch of `side`.
    pub fn default_role(
        &self,
        component: ObjectId,
        side: LoopSide,
        tertiary: bool,
    ) -> ModelResult<PassageRole> {
        let obj = self.get(component)?;
        let Some(c) = self.component(component) else {
            return Err(ModelError::WrongKind {
                name: obj.name.clone(),
                expected: "component",
            });
        };
        let role = match (&c.ports, side) {
            (Ports::None, _) => {
                return Err(ModelError::NotConnectable {
                    name: obj.name.clone(),
                });
            }
            (Ports::Straight(_), _) => PassageRole::Main,
            (Ports::WaterToAir { .. }, _) => PassageRole::Water,
            (Ports::WaterToWater { .. }, LoopSide::Supply) => PassageRole::Supply,
            (Ports::WaterToWater { .. }, LoopSide::Demand) if tertiary => PassageRole::Tertiary,
            (Ports::WaterToWater { .. }, LoopSide::Demand) => PassageRole::Demand,
            (Ports::Multi(_), LoopSide::Supply) => PassageRole::ChilledWater,
            (Ports::Multi(_), LoopSide::Demand) if tertiary => PassageRole::HeatRecovery,
            (Ports::Multi(_), LoopSide::Demand) => PassageRole::Condenser,
        };
        Ok(role)
    }

    /// Put one passage of `component` on a new parallel branch of a loop side.
    ///
    /// A side whose only branch is still empty reuses that branch.
    pub fn add_branch_for_passage(
        &mut self,
        plant_loop: ObjectId,
        side: LoopSide,
        component: ObjectId,
        role: PassageRole,
    ) -> ModelResult<()> {
        let loop_obj = self.get(plant_loop)?;
        let Some(pl) = self.plant_loop(plant_loop) else {
            return Err(ModelError::WrongKind {
                name: loop_obj.name.clone(),
                expected: "plant loop",
            });
        };
        let anchors = *pl.anchors(side);
        let comp_name = self.free_passage(component, role)?;

        let outlets = self
            .splitter(anchors.splitter)
            .map(|s| s.outlets.clone())
            .unwrap_or_default();
        if let [only] = outlets.as_slice() {
            let empty = self
                .consumer_of(*only)
                .is_some_and(|c| c.object == anchors.mixer);
            if empty {
                return self.add_to_node(component, role, *only);
            }
        }

        let inlet = self.add_node(&Self::passage_node_name(&comp_name, role, "Inlet"));
        let outlet = self.add_node(&Self::passage_node_name(&comp_name, role, "Outlet"));
        if let ObjectKind::Splitter(s) = &mut self.get_mut(anchors.splitter)?.kind {
            s.outlets.push(inlet);
        }
        if let ObjectKind::Mixer(m) = &mut self.get_mut(anchors.mixer)?.kind {
            m.inlets.push(outlet);
        }
        self.connect_passage(component, role, inlet, outlet)
    }

    pub fn add_supply_branch_for_component(
        &mut self,
        plant_loop: ObjectId,
        component: ObjectId,
    ) -> ModelResult<()> {
        let role = self.default_role(component, LoopSide::Supply, false)?;
        self.add_branch_for_passage(plant_loop, LoopSide::Supply, component, role)
    }

    /// Demand-side placement; `tertiary` selects the third passage of
    /// components that have one (heat recovery, central heat pump heating).
    pub fn add_demand_branch_for_component(
        &mut self,
        plant_loop: ObjectId,
        component: ObjectId,
        tertiary: bool,
    ) -> ModelResult<()> {
        let role = self.default_role(component, LoopSide::Demand, tertiary)?;
        self.add_branch_for_passage(plant_loop, LoopSide::Demand, component, role)
    }
}
