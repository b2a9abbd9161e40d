use std::fs;

use tactics_content::{ContentFactory, ScenarioLoader};
use tactics_core::{Faction, GameConfig, Phase, Position, Terrain};

const RIDGE: &str = r#"(
    name: "Ridge",
    grid: Some((cols: 12, rows: 8)),
    paint: [
        VLine(col: 0, from: 0, to: 11, thickness: 1, terrain: Mountain),
        Rect(x: 4, y: 4, width: 2, height: 2, terrain: Forest),
        Cell(x: 5, y: 5, terrain: Fortress),
    ],
    units: [
        (name: "Alm", class: Lord, faction: Player, position: (x: 1, y: 1)),
        (name: "Brigand", class: Brigand, faction: Enemy, position: (x: 5, y: 5)),
    ],
)"#;

#[test]
fn loads_battle_from_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("scenarios")).unwrap();
    fs::write(dir.path().join("scenarios/ridge.ron"), RIDGE).unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "turn_limit = 10\nfirst_faction = \"Enemy\"\n",
    )
    .unwrap();

    let manager = ContentFactory::new(dir.path()).load_battle("ridge").unwrap();

    assert_eq!(manager.phase(), Phase::Select);
    assert_eq!(manager.turn().active, Faction::Enemy);
    assert_eq!(manager.turn().remaining, Some(10));
    assert_eq!(manager.selector(), Position::new(5, 5));

    let grid = manager.grid();
    assert_eq!(grid.terrain(Position::new(0, 7)), Some(Terrain::Mountain));
    assert_eq!(grid.terrain(Position::new(4, 4)), Some(Terrain::Forest));
    assert_eq!(grid.terrain(Position::new(5, 5)), Some(Terrain::Fortress));
    assert_eq!(grid.terrain(Position::new(1, 0)), Some(Terrain::Plain));
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = ContentFactory::new(dir.path()).load_config().unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn missing_scenario_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ContentFactory::new(dir.path())
        .load_scenario("nowhere")
        .unwrap_err();
    assert!(err.to_string().contains("nowhere.ron"));
}

#[test]
fn rejects_units_on_blocked_or_shared_cells() {
    let mut scenario = ScenarioLoader::parse(RIDGE).unwrap();
    scenario.units[0].position = Position::new(0, 3);
    let err = ContentFactory::build(&scenario, &GameConfig::default()).unwrap_err();
    assert!(err.to_string().contains("Mountain"), "{err}");

    let mut scenario = ScenarioLoader::parse(RIDGE).unwrap();
    scenario.units[0].position = Position::new(5, 5);
    assert!(ContentFactory::build(&scenario, &GameConfig::default()).is_err());

    let mut scenario = ScenarioLoader::parse(RIDGE).unwrap();
    scenario.units[0].position = Position::new(30, 1);
    let err = ContentFactory::build(&scenario, &GameConfig::default()).unwrap_err();
    assert!(err.to_string().contains("outside"), "{err}");
}

#[test]
fn bundled_sample_builds() {
    let manager = ContentFactory::sample(&GameConfig::default()).unwrap();
    assert_eq!(manager.grid().dimensions().cols, 12);
    assert_eq!(manager.grid().dimensions().rows, 8);
    assert_eq!(manager.roster().living(Faction::Player).count(), 3);
    assert_eq!(manager.roster().living(Faction::Enemy).count(), 3);
    assert!(manager.outcome().is_none());
}

#[test]
fn bundled_data_directory_loads_through_factory() {
    let data = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let manager = ContentFactory::new(data).load_battle("skirmish").unwrap();

    assert_eq!(manager.turn().remaining, Some(40));
    assert_eq!(manager.turn().active, Faction::Player);
    assert_eq!(manager.roster().len(), 6);
}
