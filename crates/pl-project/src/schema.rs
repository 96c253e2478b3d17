//! Project schema definitions.

use pl_model::{
    Autosizable, CommonPipeSimulation, ComponentKind, FluidType, LoadDistributionScheme, LoopSide,
    PassageRole, SizingLoopType,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub translator: TranslatorDef,
    #[serde(default)]
    pub schedules: Vec<ScheduleDef>,
    #[serde(default)]
    pub components: Vec<ComponentDef>,
    #[serde(default)]
    pub plant_loops: Vec<PlantLoopDef>,
    #[serde(default)]
    pub setpoint_managers: Vec<SetpointManagerDef>,
    #[serde(default)]
    pub operation_schemes: Vec<OperationSchemeDef>,
}

impl Project {
    pub fn new(name: &str) -> Self {
        Self {
            version: crate::migrate::LATEST_VERSION,
            name: name.to_string(),
            translator: TranslatorDef::default(),
            schedules: vec![],
            components: vec![],
            plant_loops: vec![],
            setpoint_managers: vec![],
            operation_schemes: vec![],
        }
    }

    pub fn plant_loop(&self, name: &str) -> Option<&PlantLoopDef> {
        self.plant_loops.iter().find(|l| l.name == name)
    }
}

/// Output settings for the forward translator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslatorDef {
    #[serde(default = "default_true")]
    pub field_comments: bool,
    #[serde(default = "default_true")]
    pub translate_unconnected_components: bool,
}

impl Default for TranslatorDef {
    fn default() -> Self {
        Self {
            field_comments: true,
            translate_unconnected_components: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleDef {
    pub name: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_limits: Option<ScheduleTypeLimitsDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduleTypeLimitsDef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_limit: Option<f64>,
    #[serde(default = "default_numeric_type")]
    pub numeric_type: String,
}

fn default_numeric_type() -> String {
    "Continuous".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComponentDef {
    pub name: String,
    pub kind: ComponentKind,
    /// Zone equipment, generator or heat-pump water heater this component
    /// is a part of.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contained_in: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlantLoopDef {
    pub name: String,
    #[serde(default)]
    pub fluid: FluidType,
    /// Percent by volume, glycol fluids only.
    #[serde(default)]
    pub glycol_concentration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_loop_temperature_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum_loop_temperature_c: Option<f64>,
    #[serde(default)]
    pub maximum_loop_flow_rate_m3ps: Autosizable,
    #[serde(default = "zero_flow")]
    pub minimum_loop_flow_rate_m3ps: Autosizable,
    /// Autocalculated when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plant_loop_volume_m3: Option<f64>,
    #[serde(default)]
    pub load_distribution_scheme: LoadDistributionScheme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub common_pipe_simulation: Option<CommonPipeSimulation>,
    #[serde(default)]
    pub sizing: SizingDef,
    /// Defaults to the supply outlet node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setpoint_node: Option<NodeRefDef>,
    #[serde(default)]
    pub supply: LoopSideDef,
    #[serde(default)]
    pub demand: LoopSideDef,
    #[serde(default)]
    pub operation: LoopOperationDef,
}

fn zero_flow() -> Autosizable {
    Autosizable::Value(0.0)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SizingDef {
    #[serde(default)]
    pub loop_type: SizingLoopType,
    #[serde(default = "default_exit_temperature")]
    pub design_loop_exit_temperature_c: f64,
    #[serde(default = "default_temperature_difference")]
    pub loop_design_temperature_difference_k: f64,
}

impl Default for SizingDef {
    fn default() -> Self {
        Self {
            loop_type: SizingLoopType::default(),
            design_loop_exit_temperature_c: default_exit_temperature(),
            loop_design_temperature_difference_k: default_temperature_difference(),
        }
    }
}

fn default_exit_temperature() -> f64 {
    82.0
}

fn default_temperature_difference() -> f64 {
    11.0
}

/// Equipment placed on one side of a loop, in flow order.
///
/// `inlet` runs between the side inlet node and the splitter, `outlet`
/// between the mixer and the side outlet node. Each entry of `branches` is
/// one parallel branch with its components in series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LoopSideDef {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inlet: Vec<PlacementDef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<Vec<PlacementDef>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outlet: Vec<PlacementDef>,
}

impl LoopSideDef {
    pub fn placements(&self) -> impl Iterator<Item = &PlacementDef> {
        self.inlet
            .iter()
            .chain(self.branches.iter().flatten())
            .chain(self.outlet.iter())
    }
}

/// A component on a loop, either by bare name or with an explicit passage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PlacementDef {
    Name(String),
    Passage {
        component: String,
        role: PassageRole,
    },
}

impl PlacementDef {
    pub fn component(&self) -> &str {
        match self {
            PlacementDef::Name(name) => name,
            PlacementDef::Passage { component, .. } => component,
        }
    }

    pub fn role(&self) -> Option<PassageRole> {
        match self {
            PlacementDef::Name(_) => None,
            PlacementDef::Passage { role, .. } => Some(*role),
        }
    }
}

/// Reference to a node created while wiring the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum NodeRefDef {
    LoopInlet {
        plant_loop: String,
        side: LoopSide,
    },
    LoopOutlet {
        plant_loop: String,
        side: LoopSide,
    },
    ComponentInlet {
        component: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        role: Option<PassageRole>,
    },
    ComponentOutlet {
        component: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        role: Option<PassageRole>,
    },
}

/// User operation schemes attached to a loop. When any of the three scheme
/// slots is set the translator's default schemes are not generated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LoopOperationDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_load: Option<SchemeAssignmentDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_load: Option<SchemeAssignmentDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<SchemeAssignmentDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_setpoint_schedule: Option<String>,
}

impl LoopOperationDef {
    pub fn assignments(&self) -> impl Iterator<Item = &SchemeAssignmentDef> {
        [&self.heating_load, &self.cooling_load, &self.primary]
            .into_iter()
            .flatten()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemeAssignmentDef {
    pub scheme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetpointManagerDef {
    pub name: String,
    pub kind: SetpointManagerKindDef,
    pub node: NodeRefDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SetpointManagerKindDef {
    Scheduled {
        #[serde(default = "default_control_variable")]
        control_variable: String,
        schedule: String,
    },
    ScheduledDualSetpoint {
        high_schedule: String,
        low_schedule: String,
    },
}

fn default_control_variable() -> String {
    "Temperature".to_string()
}

impl SetpointManagerKindDef {
    pub fn schedules(&self) -> Vec<&str> {
        match self {
            SetpointManagerKindDef::Scheduled { schedule, .. } => vec![schedule],
            SetpointManagerKindDef::ScheduledDualSetpoint {
                high_schedule,
                low_schedule,
            } => vec![high_schedule, low_schedule],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OperationSchemeDef {
    pub name: String,
    pub kind: OperationSchemeKindDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum OperationSchemeKindDef {
    HeatingLoad { ranges: Vec<LoadRangeDef> },
    CoolingLoad { ranges: Vec<LoadRangeDef> },
    Uncontrolled { equipment: Vec<String> },
}

impl OperationSchemeKindDef {
    pub fn equipment(&self) -> Vec<&str> {
        match self {
            OperationSchemeKindDef::HeatingLoad { ranges }
            | OperationSchemeKindDef::CoolingLoad { ranges } => ranges
                .iter()
                .flat_map(|r| r.equipment.iter().map(String::as_str))
                .collect(),
            OperationSchemeKindDef::Uncontrolled { equipment } => {
                equipment.iter().map(String::as_str).collect()
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoadRangeDef {
    pub lower_limit_w: f64,
    pub upper_limit_w: f64,
    pub equipment: Vec<String>,
}
