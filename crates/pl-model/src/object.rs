//! Non-component model objects: nodes, connectors, schedules, setpoint
//! managers and operation schemes.

use pl_core::ObjectId;

use crate::component::Component;
use crate::plant_loop::PlantLoop;

/// A named entry in the model arena.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelObject {
    pub id: ObjectId,
    pub name: String,
    pub kind: ObjectKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// State point between two hydraulic objects.
    Node,
    Splitter(Splitter),
    Mixer(Mixer),
    PlantLoop(Box<PlantLoop>),
    Component(Component),
    Schedule(Schedule),
    SetpointManager(SetpointManager),
    OperationScheme(OperationScheme),
}

impl ObjectKind {
    pub fn type_label(&self) -> &'static str {
        match self {
            ObjectKind::Node => "Node",
            ObjectKind::Splitter(_) => "Splitter",
            ObjectKind::Mixer(_) => "Mixer",
            ObjectKind::PlantLoop(_) => "PlantLoop",
            ObjectKind::Component(c) => c.kind.label(),
            ObjectKind::Schedule(_) => "Schedule",
            ObjectKind::SetpointManager(_) => "SetpointManager",
            ObjectKind::OperationScheme(_) => "OperationScheme",
        }
    }
}

/// Fans one inlet node out to several outlet nodes, in branch order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Splitter {
    pub inlet: Option<ObjectId>,
    pub outlets: Vec<ObjectId>,
}

/// Collects several inlet nodes, in branch order, into one outlet node.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mixer {
    pub inlets: Vec<ObjectId>,
    pub outlet: Option<ObjectId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleTypeLimits {
    pub name: String,
    pub lower_limit: Option<f64>,
    pub upper_limit: Option<f64>,
    /// "Continuous" or "Discrete".
    pub numeric_type: String,
}

impl ScheduleTypeLimits {
    pub fn on_off() -> Self {
        Self {
            name: "OnOff".to_string(),
            lower_limit: Some(0.0),
            upper_limit: Some(1.0),
            numeric_type: "Discrete".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Schedule {
    Constant {
        value: f64,
        type_limits: Option<ScheduleTypeLimits>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetpointManager {
    Scheduled {
        control_variable: String,
        schedule: ObjectId,
        node: Option<ObjectId>,
    },
    ScheduledDualSetpoint {
        high_schedule: ObjectId,
        low_schedule: ObjectId,
        node: Option<ObjectId>,
    },
}

impl SetpointManager {
    pub fn node(&self) -> Option<ObjectId> {
        match self {
            SetpointManager::Scheduled { node, .. } => *node,
            SetpointManager::ScheduledDualSetpoint { node, .. } => *node,
        }
    }

    pub fn is_dual_setpoint(&self) -> bool {
        matches!(self, SetpointManager::ScheduledDualSetpoint { .. })
    }
}

/// One load band of a load-range scheme and the equipment that serves it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadRange {
    pub lower_limit_w: f64,
    pub upper_limit_w: f64,
    pub equipment: Vec<ObjectId>,
}

/// User-defined plant equipment operation scheme.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationScheme {
    HeatingLoad { ranges: Vec<LoadRange> },
    CoolingLoad { ranges: Vec<LoadRange> },
    Uncontrolled { equipment: Vec<ObjectId> },
}
