use tactics_core::{
    Actor, ActorStats, BattleOutcome, Command, Direction, Event, Faction, GameConfig, Grid,
    GridBuilder, GridDimensions, Key, Phase, PhaseManager, Position, Rejection, Roster, Selector,
    Terrain, UnitClass, UnitId,
};

fn unit(id: u32, faction: Faction, at: (i32, i32), stats: ActorStats, hp: u32) -> Actor {
    Actor::new(
        UnitId(id),
        format!("unit-{id}"),
        UnitClass::Soldier,
        faction,
        at.into(),
        stats,
        hp,
    )
}

fn battle(actors: Vec<Actor>) -> PhaseManager {
    let grid = Grid::plain(GridDimensions::new(12, 8));
    PhaseManager::new(grid, Roster::from_actors(actors).unwrap(), &GameConfig::default())
}

#[test]
fn draw_v_mountain_column_scenario() {
    let grid = GridBuilder::new(GridDimensions::new(12, 8))
        .draw_v(0, 0, 11, 1, Terrain::Mountain)
        .build();

    for (y, row) in grid.rows().enumerate() {
        assert_eq!(row[0], Terrain::Mountain, "row {y}");
    }
    assert_eq!(grid.codes()[0][1], 0);
    assert_eq!(grid.terrain(Position::new(0, 11)), None);
}

#[test]
fn strength_below_defense_leaves_hp_and_spends_action() {
    let mut manager = battle(vec![
        unit(1, Faction::Player, (3, 3), ActorStats::new(5, 1, 1, 2, 1), 20),
        unit(2, Faction::Enemy, (4, 3), ActorStats::new(1, 8, 1, 2, 1), 20),
    ]);

    manager.select(Position::new(3, 3)).unwrap();
    manager.confirm_move(Position::new(3, 3)).unwrap();
    manager.attack(Position::new(4, 3)).unwrap();

    assert_eq!(manager.roster().get(UnitId(2)).unwrap().hp().current(), 20);
    assert_eq!(manager.roster().get(UnitId(1)).unwrap().actions_remaining(), 0);
    assert_eq!(manager.phase(), Phase::End);
}

#[test]
fn exhausted_unit_cannot_start_a_move() {
    let mut manager = battle(vec![
        unit(1, Faction::Player, (3, 3), ActorStats::new(5, 1, 1, 2, 1), 20),
        unit(2, Faction::Player, (6, 6), ActorStats::new(5, 1, 1, 2, 1), 20),
        unit(3, Faction::Enemy, (10, 1), ActorStats::new(5, 1, 1, 2, 1), 20),
    ]);

    // Spend unit 1's action, then come back to it after cancelling.
    manager.select(Position::new(3, 3)).unwrap();
    manager.confirm_move(Position::new(3, 4)).unwrap();
    manager.skip_attack().unwrap();
    manager.cancel().unwrap();
    assert_eq!(manager.phase(), Phase::Select);

    assert_eq!(
        manager.select(Position::new(3, 4)),
        Err(Rejection::NoActionsRemaining(UnitId(1)))
    );
    assert_eq!(manager.phase(), Phase::Select);
    assert_eq!(
        manager.roster().get(UnitId(1)).unwrap().position,
        Position::new(3, 4)
    );
    assert!(manager.confirm_move(Position::new(3, 5)).is_err());
    assert_eq!(
        manager.roster().get(UnitId(1)).unwrap().position,
        Position::new(3, 4)
    );
}

#[test]
fn phases_follow_the_only_cycle() {
    let mut manager = battle(vec![
        unit(1, Faction::Player, (1, 1), ActorStats::new(4, 1, 1, 3, 1), 20),
        unit(2, Faction::Enemy, (10, 6), ActorStats::new(4, 1, 1, 3, 1), 20),
    ]);
    manager.drain_events();

    let script = [
        Command::Select,
        Command::ConfirmMove,
        Command::SkipAttack,
        Command::Proceed,
        Command::Select,
        Command::ConfirmMove,
        Command::SkipAttack,
        Command::Proceed,
    ];
    for command in script {
        manager.handle(command).unwrap();
    }

    let changes: Vec<(Phase, Phase)> = manager
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            Event::PhaseChanged { from, to, .. } => Some((from, to)),
            _ => None,
        })
        .collect();

    assert_eq!(changes.len(), 8);
    for (from, to) in changes {
        assert_eq!(from.next(), to);
    }
    assert_eq!(manager.turn().number, 3);
    assert_eq!(manager.turn().active, Faction::Player);
}

#[test]
fn selector_never_leaves_grid() {
    let mut manager = battle(vec![unit(
        1,
        Faction::Player,
        (0, 0),
        ActorStats::new(1, 1, 1, 1, 1),
        5,
    ), unit(2, Faction::Enemy, (11, 7), ActorStats::new(1, 1, 1, 1, 1), 5)]);

    for direction in Direction::ALL {
        for _ in 0..40 {
            manager.move_cursor(direction);
            let p = manager.selector();
            assert!((0..12).contains(&p.x) && (0..8).contains(&p.y), "{p}");
        }
    }
    manager.set_cursor(Position::new(-50, 99));
    assert_eq!(manager.selector(), Position::new(0, 7));
}

#[test]
fn defeating_last_enemy_wins_the_battle() {
    let mut manager = battle(vec![
        unit(1, Faction::Player, (2, 2), ActorStats::new(30, 1, 1, 2, 2), 20),
        unit(2, Faction::Enemy, (4, 2), ActorStats::new(1, 2, 1, 2, 1), 10),
    ]);

    manager.select(Position::new(2, 2)).unwrap();
    manager.confirm_move(Position::new(2, 2)).unwrap();
    manager.attack(Position::new(4, 2)).unwrap();

    let enemy = manager.roster().get(UnitId(2)).unwrap();
    assert_eq!(enemy.hp().current(), 0);
    assert!(!enemy.can_move());
    assert_eq!(manager.outcome(), Some(BattleOutcome::Victory(Faction::Player)));
    assert_eq!(manager.proceed(), Err(Rejection::BattleOver));
}

#[test]
fn friendly_fire_and_out_of_range_attacks_are_rejected() {
    let mut manager = battle(vec![
        unit(1, Faction::Player, (2, 2), ActorStats::new(9, 1, 1, 2, 1), 20),
        unit(2, Faction::Player, (2, 3), ActorStats::new(9, 1, 1, 2, 1), 20),
        unit(3, Faction::Enemy, (5, 2), ActorStats::new(1, 1, 1, 2, 1), 20),
    ]);

    manager.select(Position::new(2, 2)).unwrap();
    manager.confirm_move(Position::new(2, 2)).unwrap();

    assert_eq!(
        manager.attack(Position::new(2, 3)),
        Err(Rejection::InvalidTarget(Position::new(2, 3)))
    );
    assert!(matches!(
        manager.attack(Position::new(5, 2)),
        Err(Rejection::OutOfRange { distance: 3, range: 1, .. })
    ));
    assert_eq!(manager.phase(), Phase::Attack);
    assert_eq!(manager.roster().get(UnitId(2)).unwrap().hp().current(), 20);
    assert_eq!(manager.roster().get(UnitId(3)).unwrap().hp().current(), 20);
    assert_eq!(manager.roster().get(UnitId(1)).unwrap().actions_remaining(), 1);
}

#[test]
fn cancel_with_nobody_ready_hands_off_turn() {
    let mut manager = battle(vec![
        unit(1, Faction::Player, (2, 2), ActorStats::new(1, 1, 1, 2, 1), 20),
        unit(2, Faction::Enemy, (9, 2), ActorStats::new(1, 1, 1, 2, 1), 20),
    ]);

    manager.select(Position::new(2, 2)).unwrap();
    manager.confirm_move(Position::new(2, 2)).unwrap();
    manager.skip_attack().unwrap();
    manager.cancel().unwrap();

    assert_eq!(manager.phase(), Phase::Select);
    assert_eq!(manager.turn().active, Faction::Enemy);
    assert_eq!(manager.turn().number, 2);
}

#[test]
fn keys_drive_a_whole_turn_through_the_scene() {
    use tactics_core::{BattleScene, Scene};

    let mut scene = BattleScene::new(battle(vec![
        unit(1, Faction::Player, (2, 2), ActorStats::new(9, 1, 1, 2, 1), 20),
        unit(2, Faction::Enemy, (4, 2), ActorStats::new(1, 3, 1, 2, 1), 20),
    ]));

    let press = |keys: &'static [Key]| move |key: Key| keys.contains(&key);
    let idle = press(&[]);
    let frames: [&dyn Fn(Key) -> bool; 10] = [
        &press(&[Key::Confirm]), // select unit at (2, 2)
        &idle,
        &press(&[Key::Right]), // cursor to (3, 2)
        &idle,
        &press(&[Key::Confirm]), // move there
        &idle,
        &press(&[Key::Right]), // cursor onto the enemy
        &idle,
        &press(&[Key::Attack]),
        &idle,
    ];
    for frame in frames {
        scene.update(16, &frame);
    }

    let manager = scene.manager();
    assert_eq!(manager.phase(), Phase::End);
    assert_eq!(manager.roster().get(UnitId(1)).unwrap().position, Position::new(3, 2));
    assert_eq!(manager.roster().get(UnitId(2)).unwrap().hp().current(), 14);
}

#[test]
fn cancelled_move_is_undone_before_reselecting() {
    let mut manager = battle(vec![
        unit(1, Faction::Player, (2, 2), ActorStats::new(5, 1, 1, 2, 1), 20),
        unit(2, Faction::Enemy, (11, 7), ActorStats::new(5, 1, 1, 2, 1), 20),
    ]);

    for _ in 0..4 {
        manager.select(Position::new(2, 2)).unwrap();
        manager.confirm_move(Position::new(4, 2)).unwrap();
        assert_eq!(manager.cancel().unwrap().from, Phase::Attack);
        assert_eq!(
            manager.roster().get(UnitId(1)).unwrap().position,
            Position::new(2, 2)
        );
    }

    manager.select(Position::new(2, 2)).unwrap();
    assert!(matches!(
        manager.confirm_move(Position::new(5, 2)),
        Err(Rejection::OutOfRange { distance: 3, range: 2, .. })
    ));
    assert_eq!(manager.turn().number, 1);
    assert_eq!(manager.turn().active, Faction::Player);
}

#[test]
fn every_ready_unit_acts_before_the_turn_passes() {
    let grid = Grid::plain(GridDimensions::new(12, 8));
    let roster = Roster::from_actors(vec![
        unit(1, Faction::Player, (1, 1), ActorStats::new(1, 1, 1, 2, 1), 20),
        unit(2, Faction::Player, (1, 5), ActorStats::new(1, 1, 1, 2, 1), 20),
        unit(3, Faction::Enemy, (10, 3), ActorStats::new(1, 1, 1, 2, 1), 20),
    ])
    .unwrap();
    let config = GameConfig::default().with_turn_limit(10);
    let mut manager = PhaseManager::new(grid, roster, &config);

    manager.select(Position::new(1, 1)).unwrap();
    manager.confirm_move(Position::new(2, 1)).unwrap();
    manager.skip_attack().unwrap();
    manager.proceed().unwrap();

    assert_eq!(manager.turn().active, Faction::Player);
    assert_eq!(manager.turn().number, 1);
    assert_eq!(manager.turn().remaining, Some(10));
    assert_eq!(manager.selector(), Position::new(1, 5));

    manager.handle(Command::Select).unwrap();
    manager.handle(Command::ConfirmMove).unwrap();
    manager.handle(Command::SkipAttack).unwrap();
    manager.handle(Command::Proceed).unwrap();

    assert_eq!(manager.turn().active, Faction::Enemy);
    assert_eq!(manager.turn().number, 2);
    assert_eq!(manager.turn().remaining, Some(9));
    assert_eq!(manager.roster().get(UnitId(3)).unwrap().actions_remaining(), 1);
}

#[test]
fn finished_battle_rejects_every_command() {
    let mut manager = battle(vec![
        unit(1, Faction::Player, (2, 2), ActorStats::new(30, 1, 1, 2, 1), 20),
        unit(2, Faction::Enemy, (3, 2), ActorStats::new(1, 2, 1, 2, 1), 10),
    ]);
    manager.select(Position::new(2, 2)).unwrap();
    manager.confirm_move(Position::new(2, 2)).unwrap();
    manager.attack(Position::new(3, 2)).unwrap();
    assert!(manager.is_over());

    for command in [
        Command::Select,
        Command::ConfirmMove,
        Command::Attack,
        Command::SkipAttack,
        Command::Proceed,
        Command::Cancel,
    ] {
        assert_eq!(manager.handle(command), Err(Rejection::BattleOver), "{command}");
    }
    assert_eq!(manager.phase(), Phase::End);

    assert!(manager.move_cursor(Direction::Down));
    assert_eq!(manager.selector(), Position::new(2, 3));
}

#[test]
fn selector_clamps_extreme_deltas() {
    let mut selector = Selector::new(Position::new(11, 0), GridDimensions::new(12, 8));
    selector.move_by(i32::MAX, i32::MIN);
    assert_eq!(selector.position(), Position::new(11, 0));
    selector.move_by(i32::MIN, i32::MAX);
    assert_eq!(selector.position(), Position::new(0, 7));
}
