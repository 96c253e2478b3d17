use std::path::PathBuf;

use pl_app::{
    AppError, TranslateRequest, get_plant_loop, list_plant_loops, load_project, save_project,
    translate_project, write_idf,
};
use pl_idf::IddObjectType;
use pl_idf::idd::{BranchExtensibleFields, PlantLoopFields};

fn demo_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../demos/campus_plant.yaml")
}

#[test]
fn demo_project_lists_its_loops() {
    let project = load_project(&demo_path()).unwrap();
    let loops = list_plant_loops(&project);
    let names: Vec<_> = loops.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Hot Water Loop", "Chilled Water Loop", "Condenser Water Loop"]
    );
    assert_eq!(loops[0].supply_branches, 2);
    assert_eq!(loops[1].fluid, "PropyleneGlycol 30%");
    assert!(matches!(
        get_plant_loop(&project, "Steam Loop"),
        Err(AppError::PlantLoopNotFound(_))
    ));
}

#[test]
fn demo_project_translates() {
    let project = load_project(&demo_path()).unwrap();
    let response = translate_project(&project, TranslateRequest::default()).unwrap();
    let ws = &response.workspace;

    assert_eq!(ws.objects_of_type(IddObjectType::PlantLoop).len(), 3);
    assert_eq!(ws.objects_of_type(IddObjectType::ChillerElectricEir).len(), 1);
    assert_eq!(ws.objects_of_type(IddObjectType::BoilerHotWater).len(), 2);
    assert_eq!(
        ws.objects_of_type(IddObjectType::SetpointManagerScheduled)
            .len(),
        3
    );

    let hw = ws
        .object_by_type_and_name(IddObjectType::PlantLoop, "Hot Water Loop")
        .unwrap();
    assert_eq!(
        hw.get_string(PlantLoopFields::LoopTemperatureSetpointNodeName),
        Some("Hot Water Loop Supply Outlet Node")
    );

    let inlet = ws
        .object_by_type_and_name(IddObjectType::Branch, "Chilled Water Loop Supply Inlet Branch")
        .unwrap();
    assert_eq!(
        inlet.groups()[0].get_string(BranchExtensibleFields::ComponentName),
        Some("CHW Pump")
    );

    let text = response.to_idf_string();
    assert!(text.contains("Connector:Splitter,"));
    assert!(text.contains("!- Loop Temperature Setpoint Node Name"));
}

#[test]
fn request_overrides_project_settings() {
    let project = load_project(&demo_path()).unwrap();
    let response = translate_project(
        &project,
        TranslateRequest {
            field_comments: Some(false),
            ..TranslateRequest::default()
        },
    )
    .unwrap();
    assert!(!response.options.field_comments);
    assert!(!response.to_idf_string().contains("!-"));
}

#[test]
fn idf_and_project_files_are_written() {
    let project = load_project(&demo_path()).unwrap();
    let dir = std::env::temp_dir();

    let json = dir.join("pl_app_campus_plant.json");
    save_project(&json, &project).unwrap();
    assert_eq!(load_project(&json).unwrap(), project);

    let idf = dir.join("pl_app_campus_plant.idf");
    let response = translate_project(&project, TranslateRequest::default()).unwrap();
    write_idf(&idf, &response).unwrap();
    let written = std::fs::read_to_string(&idf).unwrap();
    let parsed = pl_idf::parse_idf(&written).unwrap();
    assert_eq!(parsed.len(), response.workspace.len());
}

#[test]
fn invalid_project_reports_validation() {
    let path = std::env::temp_dir().join("pl_app_invalid.yaml");
    std::fs::write(
        &path,
        "version: 1\nname: Broken\nplant_loops:\n  - name: HW\n    supply:\n      branches:\n        - [Missing Boiler]\n",
    )
    .unwrap();
    assert!(matches!(load_project(&path), Err(AppError::Validation(_))));
}
