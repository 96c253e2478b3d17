//! Structural properties of translated loops.

use pl_core::ObjectId;
use pl_idf::idd::{
    BranchExtensibleFields, BranchListExtensibleFields, ConnectorMixerExtensibleFields,
    ConnectorSplitterExtensibleFields,
};
use pl_idf::{IddObjectType, Workspace};
use pl_model::*;
use pl_translate::ForwardTranslator;
use proptest::prelude::*;

fn boiler(model: &mut Model, name: &str) -> ObjectId {
    model.add_component(
        name,
        ComponentKind::BoilerHotWater {
            nominal_capacity_w: Autosizable::Autosize,
            nominal_thermal_efficiency: 0.8,
            design_water_flow_rate_m3ps: Autosizable::Autosize,
            fuel_type: "NaturalGas".into(),
        },
    )
}

fn pump(model: &mut Model, name: &str) -> ObjectId {
    model.add_component(
        name,
        ComponentKind::PumpConstantSpeed {
            rated_flow_rate_m3ps: Autosizable::Autosize,
            rated_pump_head_pa: 179_352.0,
        },
    )
}

fn coil(model: &mut Model, name: &str) -> ObjectId {
    model.add_component(
        name,
        ComponentKind::CoilHeatingWater {
            u_factor_times_area_w_per_k: Autosizable::Autosize,
            maximum_water_flow_rate_m3ps: Autosizable::Autosize,
        },
    )
}

fn main_outlet(model: &Model, component: ObjectId) -> ObjectId {
    model
        .component(component)
        .unwrap()
        .passage(PassageRole::Main)
        .unwrap()
        .outlet
        .unwrap()
}

fn branch_names<'a>(ws: &'a Workspace, list_name: &str) -> Vec<&'a str> {
    let list = ws
        .object_by_type_and_name(IddObjectType::BranchList, list_name)
        .unwrap();
    list.groups()
        .iter()
        .filter_map(|g| g.get_string(BranchListExtensibleFields::BranchName))
        .collect()
}

proptest! {
    #[test]
    fn branches_splitter_and_mixer_agree(
        supply in prop::collection::vec(1usize..4, 0..5),
        demand in 0usize..5,
    ) {
        let mut model = Model::new();
        let hw = model.add_plant_loop("HW");
        for (i, count) in supply.iter().enumerate() {
            let first = boiler(&mut model, &format!("Boiler {i}"));
            model.add_supply_branch_for_component(hw, first).unwrap();
            let mut tail = main_outlet(&model, first);
            for j in 1..*count {
                let p = pump(&mut model, &format!("Pump {i}-{j}"));
                model.add_to_node(p, PassageRole::Main, tail).unwrap();
                tail = main_outlet(&model, p);
            }
        }
        for i in 0..demand {
            let c = coil(&mut model, &format!("Coil {i}"));
            model.add_demand_branch_for_component(hw, c, false).unwrap();
        }

        let ws = ForwardTranslator::default().translate_model(&model).unwrap();

        // The demand side always carries a bypass branch as well.
        for (side, expected) in [("Supply", supply.len().max(1)), ("Demand", demand.max(1) + 1)] {
            let splitter = ws
                .object_by_type_and_name(IddObjectType::ConnectorSplitter, &format!("HW {side} Splitter"))
                .unwrap();
            let mixer = ws
                .object_by_type_and_name(IddObjectType::ConnectorMixer, &format!("HW {side} Mixer"))
                .unwrap();
            let outs: Vec<&str> = splitter
                .groups()
                .iter()
                .filter_map(|g| g.get_string(ConnectorSplitterExtensibleFields::OutletBranchName))
                .collect();
            let ins: Vec<&str> = mixer
                .groups()
                .iter()
                .filter_map(|g| g.get_string(ConnectorMixerExtensibleFields::InletBranchName))
                .collect();
            prop_assert_eq!(outs.len(), expected);
            prop_assert_eq!(&outs, &ins);

            // Every connector branch is also on the side's branch list.
            let listed = branch_names(&ws, &format!("HW {side} Branches"));
            for name in &outs {
                prop_assert!(listed.contains(name));
            }
        }
    }

    #[test]
    fn branch_components_chain_node_to_node(count in 1usize..6) {
        let mut model = Model::new();
        let hw = model.add_plant_loop("HW");
        let first = boiler(&mut model, "Boiler");
        model.add_supply_branch_for_component(hw, first).unwrap();
        let mut tail = main_outlet(&model, first);
        for j in 1..count {
            let p = pump(&mut model, &format!("Pump {j}"));
            model.add_to_node(p, PassageRole::Main, tail).unwrap();
            tail = main_outlet(&model, p);
        }

        let ws = ForwardTranslator::default().translate_model(&model).unwrap();
        let branch = ws
            .object_by_type_and_name(IddObjectType::Branch, "HW Supply Branch 1")
            .unwrap();
        let groups = branch.groups();
        prop_assert_eq!(groups.len(), count);
        for pair in groups.windows(2) {
            prop_assert_eq!(
                pair[0].get_string(BranchExtensibleFields::ComponentOutletNodeName),
                pair[1].get_string(BranchExtensibleFields::ComponentInletNodeName)
            );
        }
        prop_assert_eq!(
            groups[count - 1].get_string(BranchExtensibleFields::ComponentOutletNodeName),
            Some(model.name(tail))
        );
    }
}
