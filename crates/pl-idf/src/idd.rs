//! Record schema: object types, their fixed fields and extensible groups.
//!
//! Each object type gets a field enum (`PlantLoopFields`, ...) and, when it
//! has repeating groups, an extensible enum (`BranchExtensibleFields`, ...).
//! The enums index into an `IdfObject`'s field vector.

use std::fmt;

/// A field position within a record or within one extensible group.
pub trait FieldIndex: Copy {
    const LABELS: &'static [&'static str];

    fn index(self) -> usize;

    fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }
}

macro_rules! idd_schema {
    (
        $(
            $variant:ident = $idd_name:literal, named: $named:literal,
            fields $fields:ident { $($f:ident = $flabel:literal),* $(,)? }
            $(, extensible $ext:ident { $($e:ident = $elabel:literal),* $(,)? })?
            ;
        )*
    ) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(into = "String", try_from = "String")]
        pub enum IddObjectType {
            $($variant,)*
        }

        impl IddObjectType {
            pub const ALL: &'static [IddObjectType] = &[$(IddObjectType::$variant),*];

            /// Object type name as written in IDF text.
            pub fn name(self) -> &'static str {
                match self {
                    $(IddObjectType::$variant => $idd_name,)*
                }
            }

            /// Whether the first field is the object's name.
            pub fn has_name(self) -> bool {
                match self {
                    $(IddObjectType::$variant => $named,)*
                }
            }

            pub fn field_labels(self) -> &'static [&'static str] {
                match self {
                    $(IddObjectType::$variant => <$fields as FieldIndex>::LABELS,)*
                }
            }

            /// Labels of one extensible group; empty when the type has none.
            pub fn extensible_labels(self) -> &'static [&'static str] {
                match self {
                    $(IddObjectType::$variant => {
                        #[allow(unused_variables)]
                        let labels: &'static [&'static str] = &[];
                        $(let labels: &'static [&'static str] = <$ext as FieldIndex>::LABELS;)?
                        labels
                    })*
                }
            }
        }

        $(
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
            pub enum $fields {
                $($f,)*
            }

            impl FieldIndex for $fields {
                const LABELS: &'static [&'static str] = &[$($flabel),*];

                fn index(self) -> usize {
                    self as usize
                }
            }

            $(
                #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
                pub enum $ext {
                    $($e,)*
                }

                impl FieldIndex for $ext {
                    const LABELS: &'static [&'static str] = &[$($elabel),*];

                    fn index(self) -> usize {
                        self as usize
                    }
                }
            )?
        )*
    };
}

idd_schema! {
    // ------------------------------------------------------------------
    // Loop structure
    // ------------------------------------------------------------------
    PlantLoop = "PlantLoop", named: true,
    fields PlantLoopFields {
        Name = "Name",
        FluidType = "Fluid Type",
        UserDefinedFluidType = "User Defined Fluid Type",
        PlantEquipmentOperationSchemeName = "Plant Equipment Operation Scheme Name",
        LoopTemperatureSetpointNodeName = "Loop Temperature Setpoint Node Name",
        MaximumLoopTemperature = "Maximum Loop Temperature",
        MinimumLoopTemperature = "Minimum Loop Temperature",
        MaximumLoopFlowRate = "Maximum Loop Flow Rate",
        MinimumLoopFlowRate = "Minimum Loop Flow Rate",
        PlantLoopVolume = "Plant Loop Volume",
        PlantSideInletNodeName = "Plant Side Inlet Node Name",
        PlantSideOutletNodeName = "Plant Side Outlet Node Name",
        PlantSideBranchListName = "Plant Side Branch List Name",
        PlantSideConnectorListName = "Plant Side Connector List Name",
        DemandSideInletNodeName = "Demand Side Inlet Node Name",
        DemandSideOutletNodeName = "Demand Side Outlet Node Name",
        DemandSideBranchListName = "Demand Side Branch List Name",
        DemandSideConnectorListName = "Demand Side Connector List Name",
        LoadDistributionScheme = "Load Distribution Scheme",
        AvailabilityManagerListName = "Availability Manager List Name",
        PlantLoopDemandCalculationScheme = "Plant Loop Demand Calculation Scheme",
        CommonPipeSimulation = "Common Pipe Simulation",
    };

    SizingPlant = "Sizing:Plant", named: false,
    fields SizingPlantFields {
        PlantorCondenserLoopName = "Plant or Condenser Loop Name",
        LoopType = "Loop Type",
        DesignLoopExitTemperature = "Design Loop Exit Temperature",
        LoopDesignTemperatureDifference = "Loop Design Temperature Difference",
    };

    Branch = "Branch", named: true,
    fields BranchFields {
        Name = "Name",
        PressureDropCurveName = "Pressure Drop Curve Name",
    },
    extensible BranchExtensibleFields {
        ComponentObjectType = "Component Object Type",
        ComponentName = "Component Name",
        ComponentInletNodeName = "Component Inlet Node Name",
        ComponentOutletNodeName = "Component Outlet Node Name",
    };

    BranchList = "BranchList", named: true,
    fields BranchListFields {
        Name = "Name",
    },
    extensible BranchListExtensibleFields {
        BranchName = "Branch Name",
    };

    ConnectorList = "ConnectorList", named: true,
    fields ConnectorListFields {
        Name = "Name",
        Connector1ObjectType = "Connector 1 Object Type",
        Connector1Name = "Connector 1 Name",
        Connector2ObjectType = "Connector 2 Object Type",
        Connector2Name = "Connector 2 Name",
    };

    ConnectorSplitter = "Connector:Splitter", named: true,
    fields ConnectorSplitterFields {
        Name = "Name",
        InletBranchName = "Inlet Branch Name",
    },
    extensible ConnectorSplitterExtensibleFields {
        OutletBranchName = "Outlet Branch Name",
    };

    ConnectorMixer = "Connector:Mixer", named: true,
    fields ConnectorMixerFields {
        Name = "Name",
        OutletBranchName = "Outlet Branch Name",
    },
    extensible ConnectorMixerExtensibleFields {
        InletBranchName = "Inlet Branch Name",
    };

    PipeAdiabatic = "Pipe:Adiabatic", named: true,
    fields PipeAdiabaticFields {
        Name = "Name",
        InletNodeName = "Inlet Node Name",
        OutletNodeName = "Outlet Node Name",
    };

    // ------------------------------------------------------------------
    // Operation schemes
    // ------------------------------------------------------------------
    PlantEquipmentOperationSchemes = "PlantEquipmentOperationSchemes", named: true,
    fields PlantEquipmentOperationSchemesFields {
        Name = "Name",
    },
    extensible PlantEquipmentOperationSchemesExtensibleFields {
        ControlSchemeObjectType = "Control Scheme Object Type",
        ControlSchemeName = "Control Scheme Name",
        ControlSchemeScheduleName = "Control Scheme Schedule Name",
    };

    PlantEquipmentOperationHeatingLoad = "PlantEquipmentOperation:HeatingLoad", named: true,
    fields PlantEquipmentOperationHeatingLoadFields {
        Name = "Name",
    },
    extensible PlantEquipmentOperationHeatingLoadExtensibleFields {
        LoadRangeLowerLimit = "Load Range Lower Limit",
        LoadRangeUpperLimit = "Load Range Upper Limit",
        RangeEquipmentListName = "Range Equipment List Name",
    };

    PlantEquipmentOperationCoolingLoad = "PlantEquipmentOperation:CoolingLoad", named: true,
    fields PlantEquipmentOperationCoolingLoadFields {
        Name = "Name",
    },
    extensible PlantEquipmentOperationCoolingLoadExtensibleFields {
        LoadRangeLowerLimit = "Load Range Lower Limit",
        LoadRangeUpperLimit = "Load Range Upper Limit",
        RangeEquipmentListName = "Range Equipment List Name",
    };

    PlantEquipmentOperationUncontrolled = "PlantEquipmentOperation:Uncontrolled", named: true,
    fields PlantEquipmentOperationUncontrolledFields {
        Name = "Name",
        EquipmentListName = "Equipment List Name",
    };

    PlantEquipmentOperationComponentSetpoint = "PlantEquipmentOperation:ComponentSetpoint", named: true,
    fields PlantEquipmentOperationComponentSetpointFields {
        Name = "Name",
    },
    extensible PlantEquipmentOperationComponentSetpointExtensibleFields {
        EquipmentObjectType = "Equipment Object Type",
        EquipmentName = "Equipment Name",
        DemandCalculationNodeName = "Demand Calculation Node Name",
        SetpointNodeName = "Setpoint Node Name",
        ComponentFlowRate = "Component Flow Rate",
        OperationType = "Operation Type",
    };

    PlantEquipmentList = "PlantEquipmentList", named: true,
    fields PlantEquipmentListFields {
        Name = "Name",
    },
    extensible PlantEquipmentListExtensibleFields {
        EquipmentObjectType = "Equipment Object Type",
        EquipmentName = "Equipment Name",
    };

    // ------------------------------------------------------------------
    // Fluids, schedules, setpoints
    // ------------------------------------------------------------------
    FluidPropertiesName = "FluidProperties:Name", named: true,
    fields FluidPropertiesNameFields {
        FluidName = "Fluid Name",
        FluidType = "Fluid Type",
    };

    FluidPropertiesGlycolConcentration = "FluidProperties:GlycolConcentration", named: true,
    fields FluidPropertiesGlycolConcentrationFields {
        Name = "Name",
        GlycolType = "Glycol Type",
        UserDefinedGlycolName = "User Defined Glycol Name",
        GlycolConcentration = "Glycol Concentration",
    };

    ScheduleConstant = "Schedule:Constant", named: true,
    fields ScheduleConstantFields {
        Name = "Name",
        ScheduleTypeLimitsName = "Schedule Type Limits Name",
        HourlyValue = "Hourly Value",
    };

    ScheduleTypeLimits = "ScheduleTypeLimits", named: true,
    fields ScheduleTypeLimitsFields {
        Name = "Name",
        LowerLimitValue = "Lower Limit Value",
        UpperLimitValue = "Upper Limit Value",
        NumericType = "Numeric Type",
    };

    SetpointManagerScheduled = "SetpointManager:Scheduled", named: true,
    fields SetpointManagerScheduledFields {
        Name = "Name",
        ControlVariable = "Control Variable",
        ScheduleName = "Schedule Name",
        SetpointNodeorNodeListName = "Setpoint Node or NodeList Name",
    };

    SetpointManagerScheduledDualSetpoint = "SetpointManager:Scheduled:DualSetpoint", named: true,
    fields SetpointManagerScheduledDualSetpointFields {
        Name = "Name",
        ControlVariable = "Control Variable",
        HighSetpointScheduleName = "High Setpoint Schedule Name",
        LowSetpointScheduleName = "Low Setpoint Schedule Name",
        SetpointNodeorNodeListName = "Setpoint Node or NodeList Name",
    };

    ZoneHvacAirDistributionUnit = "ZoneHVAC:AirDistributionUnit", named: true,
    fields ZoneHvacAirDistributionUnitFields {
        Name = "Name",
        AirDistributionUnitOutletNodeName = "Air Distribution Unit Outlet Node Name",
        AirTerminalObjectType = "Air Terminal Object Type",
        AirTerminalName = "Air Terminal Name",
    };

    // ------------------------------------------------------------------
    // Straight equipment
    // ------------------------------------------------------------------
    PumpVariableSpeed = "Pump:VariableSpeed", named: true,
    fields PumpVariableSpeedFields {
        Name = "Name",
        InletNodeName = "Inlet Node Name",
        OutletNodeName = "Outlet Node Name",
        DesignMaximumFlowRate = "Design Maximum Flow Rate",
        DesignPumpHead = "Design Pump Head",
        PumpControlType = "Pump Control Type",
    };

    PumpConstantSpeed = "Pump:ConstantSpeed", named: true,
    fields PumpConstantSpeedFields {
        Name = "Name",
        InletNodeName = "Inlet Node Name",
        OutletNodeName = "Outlet Node Name",
        DesignFlowRate = "Design Flow Rate",
        DesignPumpHead = "Design Pump Head",
        PumpControlType = "Pump Control Type",
    };

    BoilerHotWater = "Boiler:HotWater", named: true,
    fields BoilerHotWaterFields {
        Name = "Name",
        FuelType = "Fuel Type",
        NominalCapacity = "Nominal Capacity",
        NominalThermalEfficiency = "Nominal Thermal Efficiency",
        DesignWaterFlowRate = "Design Water Flow Rate",
        BoilerWaterInletNodeName = "Boiler Water Inlet Node Name",
        BoilerWaterOutletNodeName = "Boiler Water Outlet Node Name",
    };

    DistrictHeatingWater = "DistrictHeating:Water", named: true,
    fields DistrictHeatingWaterFields {
        Name = "Name",
        HotWaterInletNodeName = "Hot Water Inlet Node Name",
        HotWaterOutletNodeName = "Hot Water Outlet Node Name",
        NominalCapacity = "Nominal Capacity",
    };

    DistrictCooling = "DistrictCooling", named: true,
    fields DistrictCoolingFields {
        Name = "Name",
        ChilledWaterInletNodeName = "Chilled Water Inlet Node Name",
        ChilledWaterOutletNodeName = "Chilled Water Outlet Node Name",
        NominalCapacity = "Nominal Capacity",
    };

    CoolingTowerSingleSpeed = "CoolingTower:SingleSpeed", named: true,
    fields CoolingTowerSingleSpeedFields {
        Name = "Name",
        WaterInletNodeName = "Water Inlet Node Name",
        WaterOutletNodeName = "Water Outlet Node Name",
        DesignWaterFlowRate = "Design Water Flow Rate",
        DesignAirFlowRate = "Design Air Flow Rate",
    };

    GroundHeatExchangerVertical = "GroundHeatExchanger:Vertical", named: true,
    fields GroundHeatExchangerVerticalFields {
        Name = "Name",
        InletNodeName = "Inlet Node Name",
        OutletNodeName = "Outlet Node Name",
        DesignFlowRate = "Design Flow Rate",
        NumberofBoreHoles = "Number of Bore Holes",
        BoreHoleLength = "Bore Hole Length",
    };

    SolarCollectorFlatPlateWater = "SolarCollector:FlatPlate:Water", named: true,
    fields SolarCollectorFlatPlateWaterFields {
        Name = "Name",
        SolarCollectorPerformanceName = "SolarCollectorPerformance Name",
        SurfaceName = "Surface Name",
        InletNodeName = "Inlet Node Name",
        OutletNodeName = "Outlet Node Name",
        MaximumFlowRate = "Maximum Flow Rate",
    };

    PlantComponentTemperatureSource = "PlantComponent:TemperatureSource", named: true,
    fields PlantComponentTemperatureSourceFields {
        Name = "Name",
        InletNode = "Inlet Node",
        OutletNode = "Outlet Node",
        DesignVolumeFlowRate = "Design Volume Flow Rate",
        TemperatureSpecificationType = "Temperature Specification Type",
        SourceTemperature = "Source Temperature",
    };

    // ------------------------------------------------------------------
    // Containers whose records carry a child's plant connections
    // ------------------------------------------------------------------
    GeneratorMicroTurbine = "Generator:MicroTurbine", named: true,
    fields GeneratorMicroTurbineFields {
        Name = "Name",
        ReferenceElectricalPowerOutput = "Reference Electrical Power Output",
        HeatRecoveryWaterInletNodeName = "Heat Recovery Water Inlet Node Name",
        HeatRecoveryWaterOutletNodeName = "Heat Recovery Water Outlet Node Name",
        ReferenceHeatRecoveryWaterFlowRate = "Reference Heat Recovery Water Flow Rate",
        MaximumHeatRecoveryWaterFlowRate = "Maximum Heat Recovery Water Flow Rate",
    };

    ZoneHvacBaseboardConvectiveWater = "ZoneHVAC:Baseboard:Convective:Water", named: true,
    fields ZoneHvacBaseboardConvectiveWaterFields {
        Name = "Name",
        InletNodeName = "Inlet Node Name",
        OutletNodeName = "Outlet Node Name",
        UFactorTimesAreaValue = "U-Factor Times Area Value",
        MaximumWaterFlowRate = "Maximum Water Flow Rate",
    };

    ZoneHvacBaseboardRadiantConvectiveWater = "ZoneHVAC:Baseboard:RadiantConvective:Water", named: true,
    fields ZoneHvacBaseboardRadiantConvectiveWaterFields {
        Name = "Name",
        InletNodeName = "Inlet Node Name",
        OutletNodeName = "Outlet Node Name",
        HeatingDesignCapacity = "Heating Design Capacity",
        MaximumWaterFlowRate = "Maximum Water Flow Rate",
        FractionRadiant = "Fraction Radiant",
    };

    ZoneHvacCoolingPanelRadiantConvectiveWater = "ZoneHVAC:CoolingPanel:RadiantConvective:Water", named: true,
    fields ZoneHvacCoolingPanelRadiantConvectiveWaterFields {
        Name = "Name",
        WaterInletNodeName = "Water Inlet Node Name",
        WaterOutletNodeName = "Water Outlet Node Name",
        CoolingDesignCapacity = "Cooling Design Capacity",
        MaximumChilledWaterFlowRate = "Maximum Chilled Water Flow Rate",
        FractionRadiant = "Fraction Radiant",
    };

    ZoneHvacLowTemperatureRadiantConstantFlow = "ZoneHVAC:LowTemperatureRadiant:ConstantFlow", named: true,
    fields ZoneHvacLowTemperatureRadiantConstantFlowFields {
        Name = "Name",
        RatedFlowRate = "Rated Flow Rate",
        HeatingWaterInletNodeName = "Heating Water Inlet Node Name",
        HeatingWaterOutletNodeName = "Heating Water Outlet Node Name",
        CoolingWaterInletNodeName = "Cooling Water Inlet Node Name",
        CoolingWaterOutletNodeName = "Cooling Water Outlet Node Name",
    };

    ZoneHvacLowTemperatureRadiantVariableFlow = "ZoneHVAC:LowTemperatureRadiant:VariableFlow", named: true,
    fields ZoneHvacLowTemperatureRadiantVariableFlowFields {
        Name = "Name",
        MaximumHotWaterFlow = "Maximum Hot Water Flow",
        HeatingWaterInletNodeName = "Heating Water Inlet Node Name",
        HeatingWaterOutletNodeName = "Heating Water Outlet Node Name",
        MaximumColdWaterFlow = "Maximum Cold Water Flow",
        CoolingWaterInletNodeName = "Cooling Water Inlet Node Name",
        CoolingWaterOutletNodeName = "Cooling Water Outlet Node Name",
    };

    AirTerminalCooledBeam = "AirTerminal:SingleDuct:ConstantVolume:CooledBeam", named: true,
    fields AirTerminalCooledBeamFields {
        Name = "Name",
        CooledBeamType = "Cooled Beam Type",
        SupplyAirVolumetricFlowRate = "Supply Air Volumetric Flow Rate",
        ChilledWaterInletNodeName = "Chilled Water Inlet Node Name",
        ChilledWaterOutletNodeName = "Chilled Water Outlet Node Name",
        CoilSurfaceAreaperCoilLength = "Coil Surface Area per Coil Length",
    };

    AirTerminalFourPipeBeam = "AirTerminal:SingleDuct:ConstantVolume:FourPipeBeam", named: true,
    fields AirTerminalFourPipeBeamFields {
        Name = "Name",
        DesignPrimaryAirVolumeFlowRate = "Design Primary Air Volume Flow Rate",
        ChilledWaterInletNodeName = "Chilled Water Inlet Node Name",
        ChilledWaterOutletNodeName = "Chilled Water Outlet Node Name",
        HotWaterInletNodeName = "Hot Water Inlet Node Name",
        HotWaterOutletNodeName = "Hot Water Outlet Node Name",
        BeamRatedCoolingCapacityperBeamLength = "Beam Rated Cooling Capacity per Beam Length",
        BeamRatedHeatingCapacityperBeamLength = "Beam Rated Heating Capacity per Beam Length",
    };

    WaterHeaterHeatPumpPumpedCondenser = "WaterHeater:HeatPump:PumpedCondenser", named: true,
    fields WaterHeaterHeatPumpPumpedCondenserFields {
        Name = "Name",
        CondenserWaterFlowRate = "Condenser Water Flow Rate",
        TankObjectType = "Tank Object Type",
        TankName = "Tank Name",
        TankUseSideInletNodeName = "Tank Use Side Inlet Node Name",
        TankUseSideOutletNodeName = "Tank Use Side Outlet Node Name",
    };

    // ------------------------------------------------------------------
    // Water-to-air coils
    // ------------------------------------------------------------------
    CoilHeatingWater = "Coil:Heating:Water", named: true,
    fields CoilHeatingWaterFields {
        Name = "Name",
        UFactorTimesAreaValue = "U-Factor Times Area Value",
        MaximumWaterFlowRate = "Maximum Water Flow Rate",
        WaterInletNodeName = "Water Inlet Node Name",
        WaterOutletNodeName = "Water Outlet Node Name",
        AirInletNodeName = "Air Inlet Node Name",
        AirOutletNodeName = "Air Outlet Node Name",
    };

    CoilCoolingWater = "Coil:Cooling:Water", named: true,
    fields CoilCoolingWaterFields {
        Name = "Name",
        DesignWaterFlowRate = "Design Water Flow Rate",
        DesignAirFlowRate = "Design Air Flow Rate",
        WaterInletNodeName = "Water Inlet Node Name",
        WaterOutletNodeName = "Water Outlet Node Name",
        AirInletNodeName = "Air Inlet Node Name",
        AirOutletNodeName = "Air Outlet Node Name",
    };

    // ------------------------------------------------------------------
    // Water-to-water equipment
    // ------------------------------------------------------------------
    ChillerElectricEir = "Chiller:Electric:EIR", named: true,
    fields ChillerElectricEirFields {
        Name = "Name",
        ReferenceCapacity = "Reference Capacity",
        ReferenceCOP = "Reference COP",
        ReferenceChilledWaterFlowRate = "Reference Chilled Water Flow Rate",
        ReferenceCondenserFluidFlowRate = "Reference Condenser Fluid Flow Rate",
        ChilledWaterInletNodeName = "Chilled Water Inlet Node Name",
        ChilledWaterOutletNodeName = "Chilled Water Outlet Node Name",
        CondenserInletNodeName = "Condenser Inlet Node Name",
        CondenserOutletNodeName = "Condenser Outlet Node Name",
        HeatRecoveryInletNodeName = "Heat Recovery Inlet Node Name",
        HeatRecoveryOutletNodeName = "Heat Recovery Outlet Node Name",
    };

    ChillerElectricAshrae205 = "Chiller:Electric:ASHRAE205", named: true,
    fields ChillerElectricAshrae205Fields {
        Name = "Name",
        RepresentationFileName = "Representation File Name",
        RatedCapacity = "Rated Capacity",
        ChilledWaterInletNodeName = "Chilled Water Inlet Node Name",
        ChilledWaterOutletNodeName = "Chilled Water Outlet Node Name",
        ChilledWaterMaximumRequestedFlowRate = "Chilled Water Maximum Requested Flow Rate",
        CondenserInletNodeName = "Condenser Inlet Node Name",
        CondenserOutletNodeName = "Condenser Outlet Node Name",
        HeatRecoveryInletNodeName = "Heat Recovery Inlet Node Name",
        HeatRecoveryOutletNodeName = "Heat Recovery Outlet Node Name",
        OilCoolerInletNodeName = "Oil Cooler Inlet Node Name",
        OilCoolerOutletNodeName = "Oil Cooler Outlet Node Name",
        AuxiliaryInletNodeName = "Auxiliary Inlet Node Name",
        AuxiliaryOutletNodeName = "Auxiliary Outlet Node Name",
    };

    HeatExchangerFluidToFluid = "HeatExchanger:FluidToFluid", named: true,
    fields HeatExchangerFluidToFluidFields {
        Name = "Name",
        LoopDemandSideInletNodeName = "Loop Demand Side Inlet Node Name",
        LoopDemandSideOutletNodeName = "Loop Demand Side Outlet Node Name",
        LoopDemandSideDesignFlowRate = "Loop Demand Side Design Flow Rate",
        LoopSupplySideInletNodeName = "Loop Supply Side Inlet Node Name",
        LoopSupplySideOutletNodeName = "Loop Supply Side Outlet Node Name",
        LoopSupplySideDesignFlowRate = "Loop Supply Side Design Flow Rate",
        ControlType = "Control Type",
    };

    WaterHeaterMixed = "WaterHeater:Mixed", named: true,
    fields WaterHeaterMixedFields {
        Name = "Name",
        TankVolume = "Tank Volume",
        HeaterMaximumCapacity = "Heater Maximum Capacity",
        UseSideInletNodeName = "Use Side Inlet Node Name",
        UseSideOutletNodeName = "Use Side Outlet Node Name",
        UseSideDesignFlowRate = "Use Side Design Flow Rate",
        SourceSideInletNodeName = "Source Side Inlet Node Name",
        SourceSideOutletNodeName = "Source Side Outlet Node Name",
        SourceSideDesignFlowRate = "Source Side Design Flow Rate",
    };

    WaterHeaterStratified = "WaterHeater:Stratified", named: true,
    fields WaterHeaterStratifiedFields {
        Name = "Name",
        TankVolume = "Tank Volume",
        Heater1Capacity = "Heater 1 Capacity",
        Heater2Capacity = "Heater 2 Capacity",
        UseSideInletNodeName = "Use Side Inlet Node Name",
        UseSideOutletNodeName = "Use Side Outlet Node Name",
        UseSideDesignFlowRate = "Use Side Design Flow Rate",
        SourceSideInletNodeName = "Source Side Inlet Node Name",
        SourceSideOutletNodeName = "Source Side Outlet Node Name",
        SourceSideDesignFlowRate = "Source Side Design Flow Rate",
    };

    HeatPumpWaterToWaterEquationFitHeating = "HeatPump:WaterToWater:EquationFit:Heating", named: true,
    fields HeatPumpWaterToWaterEquationFitHeatingFields {
        Name = "Name",
        SourceSideInletNodeName = "Source Side Inlet Node Name",
        SourceSideOutletNodeName = "Source Side Outlet Node Name",
        LoadSideInletNodeName = "Load Side Inlet Node Name",
        LoadSideOutletNodeName = "Load Side Outlet Node Name",
        ReferenceLoadSideFlowRate = "Reference Load Side Flow Rate",
        ReferenceSourceSideFlowRate = "Reference Source Side Flow Rate",
        ReferenceHeatingCapacity = "Reference Heating Capacity",
    };

    HeatPumpWaterToWaterEquationFitCooling = "HeatPump:WaterToWater:EquationFit:Cooling", named: true,
    fields HeatPumpWaterToWaterEquationFitCoolingFields {
        Name = "Name",
        SourceSideInletNodeName = "Source Side Inlet Node Name",
        SourceSideOutletNodeName = "Source Side Outlet Node Name",
        LoadSideInletNodeName = "Load Side Inlet Node Name",
        LoadSideOutletNodeName = "Load Side Outlet Node Name",
        ReferenceLoadSideFlowRate = "Reference Load Side Flow Rate",
        ReferenceSourceSideFlowRate = "Reference Source Side Flow Rate",
        ReferenceCoolingCapacity = "Reference Cooling Capacity",
    };

    CentralHeatPumpSystem = "CentralHeatPumpSystem", named: true,
    fields CentralHeatPumpSystemFields {
        Name = "Name",
        ControlMethod = "Control Method",
        CoolingLoopInletNodeName = "Cooling Loop Inlet Node Name",
        CoolingLoopOutletNodeName = "Cooling Loop Outlet Node Name",
        SourceLoopInletNodeName = "Source Loop Inlet Node Name",
        SourceLoopOutletNodeName = "Source Loop Outlet Node Name",
        HeatingLoopInletNodeName = "Heating Loop Inlet Node Name",
        HeatingLoopOutletNodeName = "Heating Loop Outlet Node Name",
        AncillaryPower = "Ancillary Power",
    };
}

impl IddObjectType {
    /// Look up a type by its IDF name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }

    pub fn is_extensible(self) -> bool {
        !self.extensible_labels().is_empty()
    }
}

impl fmt::Display for IddObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<IddObjectType> for String {
    fn from(t: IddObjectType) -> Self {
        t.name().to_string()
    }
}

impl TryFrom<String> for IddObjectType {
    type Error = crate::error::IdfError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name).ok_or(crate::error::IdfError::UnknownObjectType { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = IddObjectType::ALL.iter().map(|t| t.name()).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(
            IddObjectType::from_name("pipe:adiabatic"),
            Some(IddObjectType::PipeAdiabatic)
        );
        assert_eq!(IddObjectType::from_name("Pipe:Outdoor"), None);
    }

    #[test]
    fn field_enums_index_their_labels() {
        assert_eq!(PlantLoopFields::Name.index(), 0);
        assert_eq!(PlantLoopFields::FluidType.label(), "Fluid Type");
        assert_eq!(
            BranchExtensibleFields::ComponentOutletNodeName.index(),
            3
        );
        assert_eq!(IddObjectType::Branch.extensible_labels().len(), 4);
        assert!(!IddObjectType::PipeAdiabatic.is_extensible());
        assert!(!IddObjectType::SizingPlant.has_name());
    }
}
