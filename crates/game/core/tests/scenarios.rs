use std::cell::Cell;

use dungeon_core::interact::switch::check_switches;
use dungeon_core::{
    ActionError, BattleOracle, BattleOutcome, BlastOracle, BlastView, Command, CommandOutcome,
    Direction, DungeonBuilder, DungeonConfig, DungeonEngine, DungeonEnv, DungeonState, EnemyKind,
    EnemyState, Entity, EntityId, EntityKind, ExecuteError, Goal, GoalKind, ItemKind, ItemTag,
    MoveOutcome, MoveResolution, NoBlast, PlayerState, PortalColour, Position, PotionKind, Recipe,
    TransitionPhase,
};

// ============================================================================
// Test collaborators
// ============================================================================

/// Battle oracle with a fixed result that counts how often it was asked.
struct ScriptedBattle {
    outcome: Option<BattleOutcome>,
    calls: Cell<usize>,
}

impl ScriptedBattle {
    fn new(outcome: Option<BattleOutcome>) -> Self {
        Self {
            outcome,
            calls: Cell::new(0),
        }
    }
}

impl BattleOracle for ScriptedBattle {
    fn battle(&self, _player: &PlayerState, _enemy: &Entity) -> Option<BattleOutcome> {
        self.calls.set(self.calls.get() + 1);
        self.outcome
    }
}

/// Blast oracle destroying everything within one tile (diagonals included).
#[derive(Default)]
struct CountingBlast {
    calls: Cell<usize>,
}

impl BlastOracle for CountingBlast {
    fn detonate(&self, origin: Position, view: &mut BlastView<'_>) {
        self.calls.set(self.calls.get() + 1);

        let mut targets = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                let tile = Position::new(origin.x + dx, origin.y + dy);
                targets.extend(view.entities_at(tile).map(|entity| entity.id));
            }
        }
        for id in targets {
            view.destroy(id);
        }
    }
}

fn step(state: &mut DungeonState, direction: Direction) -> MoveOutcome {
    run(state, DungeonEnv::inert(), Command::Move(direction))
}

fn run_move(state: &mut DungeonState, env: DungeonEnv<'_>, direction: Direction) -> MoveOutcome {
    run(state, env, Command::Move(direction))
}

fn run(state: &mut DungeonState, env: DungeonEnv<'_>, command: Command) -> MoveOutcome {
    match DungeonEngine::new(state).execute(env, &command) {
        Ok(CommandOutcome::Move(outcome)) => outcome,
        other => panic!("expected a move outcome, got {other:?}"),
    }
}

fn execute(state: &mut DungeonState, command: Command) -> Result<CommandOutcome, ExecuteError> {
    DungeonEngine::new(state).execute(DungeonEnv::inert(), &command)
}

const RED: EntityKind = EntityKind::Portal {
    colour: PortalColour::Red,
};

// ============================================================================
// Boulders and switches
// ============================================================================

#[test]
fn blocked_boulder_pushes_leave_state_unchanged() {
    let blockers = [
        EntityKind::Wall,
        EntityKind::Boulder,
        RED,
        EntityKind::Door {
            key_id: 1,
            is_open: false,
        },
    ];

    for blocker in blockers {
        let mut state = DungeonBuilder::new(Position::ORIGIN)
            .entity(Position::new(1, 0), EntityKind::Boulder)
            .entity(Position::new(2, 0), blocker)
            .build()
            .expect("dungeon should build");
        let before = state.clone();

        let outcome = step(&mut state, Direction::Right);

        assert_eq!(outcome.resolution, MoveResolution::Blocked, "{blocker:?}");
        assert_eq!(state, before, "{blocker:?}");
    }
}

#[test]
fn last_of_three_switches_completes_boulders_goal() {
    let mut state = DungeonBuilder::new(Position::new(1, 0))
        .goal(Goal::leaf(GoalKind::Boulders))
        .entity(Position::new(3, 0), EntityKind::FloorSwitch { is_on: false })
        .entity(Position::new(3, 2), EntityKind::FloorSwitch { is_on: false })
        .entity(Position::new(3, 4), EntityKind::FloorSwitch { is_on: false })
        .entity(Position::new(2, 0), EntityKind::Boulder)
        .entity(Position::new(2, 2), EntityKind::Boulder)
        .entity(Position::new(2, 4), EntityKind::Boulder)
        .build()
        .expect("dungeon should build");

    let route = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Down,
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Down,
    ];
    for direction in route {
        let outcome = step(&mut state, direction);
        assert_ne!(outcome.resolution, MoveResolution::Blocked);
        assert!(!state.is_complete());
        check_switches(&state).expect("switch invariant should hold");
    }
    assert_eq!(state.switches.len(), 2);

    let outcome = step(&mut state, Direction::Right);

    assert_eq!(outcome.resolution, MoveResolution::WithSideEffect);
    assert_eq!(state.switches.len(), 3);
    assert!(state.is_complete());
    assert_eq!(state.remaining_goals(), "");
}

#[test]
fn boulders_goal_stays_finished_after_push_off() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .goal(Goal::leaf(GoalKind::Boulders))
        .entity(Position::new(1, 0), EntityKind::FloorSwitch { is_on: false })
        .entity(Position::new(1, 0), EntityKind::Boulder)
        .build()
        .expect("dungeon should build");
    assert!(state.is_complete());

    step(&mut state, Direction::Right);

    assert!(!state.switches.is_triggered(EntityId(1)));
    assert!(state.finished_goals().contains(&GoalKind::Boulders));
    assert!(state.is_complete());
    assert_eq!(state.remaining_goals(), "");
    check_switches(&state).expect("switch invariant should hold");
}

#[test]
fn exit_opens_after_boulder_leaves_the_finished_switch() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .goal(Goal::and([
            Goal::leaf(GoalKind::Exit),
            Goal::leaf(GoalKind::Boulders),
        ]))
        .entity(Position::new(1, 0), EntityKind::Boulder)
        .entity(Position::new(2, 0), EntityKind::FloorSwitch { is_on: false })
        .entity(Position::new(2, 1), EntityKind::Exit { is_open: false })
        .build()
        .expect("dungeon should build");

    step(&mut state, Direction::Right);
    assert!(state.switches.is_triggered(EntityId(2)));

    // Second push rolls the boulder past the switch.
    step(&mut state, Direction::Right);
    assert!(!state.switches.is_triggered(EntityId(2)));
    assert_eq!(state.remaining_goals(), ":exit");

    let outcome = step(&mut state, Direction::Down);

    assert_eq!(outcome.position, Position::new(2, 1));
    assert!(state.exit_reached);
    assert!(state.is_complete());
    assert_eq!(
        state.registry.get(EntityId(3)).map(|exit| exit.kind),
        Some(EntityKind::Exit { is_open: true })
    );
}

#[test]
fn switch_cascade_detonates_adjacent_bomb() {
    let blast = CountingBlast::default();
    let battle = ScriptedBattle::new(None);
    let env = DungeonEnv::new(&battle, &blast);

    let mut state = DungeonBuilder::new(Position::new(0, 1))
        .entity(Position::new(1, 1), EntityKind::Boulder)
        .entity(Position::new(2, 1), EntityKind::FloorSwitch { is_on: false })
        .entity(Position::new(2, 0), EntityKind::PlacedBomb)
        .entity(Position::new(3, 0), EntityKind::Wall)
        .entity(Position::new(5, 5), EntityKind::Wall)
        .build()
        .expect("dungeon should build");

    let outcome = run_move(&mut state, env, Direction::Right);

    assert_eq!(blast.calls.get(), 1);
    assert_eq!(outcome.resolution, MoveResolution::WithSideEffect);
    // Boulder survives; switch, wall and bomb are gone.
    assert!(state.registry.contains(EntityId(1)));
    assert!(!state.registry.contains(EntityId(2)));
    assert!(!state.registry.contains(EntityId(3)));
    assert!(!state.registry.contains(EntityId(4)));
    assert!(state.registry.contains(EntityId(5)));
    assert!(outcome.destroyed.contains(&EntityId(3)));
    assert!(state.switches.is_empty());
    check_switches(&state).expect("switch invariant should hold");
}

#[test]
fn bomb_placed_beside_active_switch_explodes_immediately() {
    let blast = CountingBlast::default();
    let battle = ScriptedBattle::new(None);
    let env = DungeonEnv::new(&battle, &blast);

    let mut state = DungeonBuilder::new(Position::new(0, 1))
        .entity(Position::new(0, 2), EntityKind::FloorSwitch { is_on: false })
        .entity(Position::new(0, 2), EntityKind::Boulder)
        .entity(Position::new(1, 1), EntityKind::Item(ItemKind::Treasure))
        .holding(ItemKind::Bomb)
        .build()
        .expect("dungeon should build");
    let bomb = state.player.inventory.items()[0].id;

    let outcome = DungeonEngine::new(&mut state)
        .execute(env, &Command::PlaceBomb(bomb))
        .expect("placing a held bomb should succeed");

    let CommandOutcome::PlaceBomb(placed) = outcome else {
        panic!("expected a place bomb outcome");
    };
    assert_eq!(blast.calls.get(), 1);
    assert!(placed.destroyed.contains(&bomb));
    assert!(placed.destroyed.contains(&EntityId(3)));
    assert!(state.registry.contains(EntityId(2)));
}

// ============================================================================
// Items, doors and goals
// ============================================================================

#[test]
fn treasure_goal_is_monotone() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .goal(Goal::leaf(GoalKind::Treasure))
        .entity(Position::new(1, 0), EntityKind::Item(ItemKind::Treasure))
        .entity(Position::new(2, 0), EntityKind::Item(ItemKind::SunStone))
        .build()
        .expect("dungeon should build");

    let mut remaining = state.goal_context().treasure_remaining;
    assert_eq!(remaining, 2);

    for direction in [Direction::Right, Direction::Right, Direction::Left, Direction::Left] {
        step(&mut state, direction);
        let now = state.goal_context().treasure_remaining;
        assert!(now <= remaining);
        remaining = now;
    }

    assert_eq!(remaining, 0);
    assert!(state.is_complete());
    assert!(state.player.has_sun_stone());
}

#[test]
fn door_opens_with_matching_key() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .entity(Position::new(1, 0), EntityKind::Item(ItemKind::Key { key_id: 3 }))
        .entity(
            Position::new(2, 0),
            EntityKind::Door {
                key_id: 3,
                is_open: false,
            },
        )
        .build()
        .expect("dungeon should build");

    step(&mut state, Direction::Right);
    assert_eq!(state.player.inventory.key(), Some((EntityId(1), 3)));

    let outcome = step(&mut state, Direction::Right);

    assert_eq!(outcome.resolution, MoveResolution::WithSideEffect);
    assert_eq!(state.player.position(), Position::new(2, 0));
    assert!(state.player.inventory.key().is_none());
    let door = state.registry.get(EntityId(2)).expect("door should remain");
    assert_eq!(door.type_tag(), "door_open");
}

#[test]
fn wrong_key_is_blocked_and_kept() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .entity(
            Position::new(1, 0),
            EntityKind::Door {
                key_id: 3,
                is_open: false,
            },
        )
        .holding(ItemKind::Key { key_id: 2 })
        .build()
        .expect("dungeon should build");

    let outcome = step(&mut state, Direction::Right);

    assert!(outcome.is_blocked());
    assert_eq!(state.player.inventory.len(), 1);
    assert_eq!(state.tick.0, 0);
}

#[test]
fn exit_waits_for_the_rest_of_the_goal() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .goal(Goal::and([
            Goal::leaf(GoalKind::Exit),
            Goal::leaf(GoalKind::Treasure),
        ]))
        .entity(Position::new(1, 0), EntityKind::Exit { is_open: false })
        .entity(Position::new(0, 1), EntityKind::Item(ItemKind::Treasure))
        .build()
        .expect("dungeon should build");

    let outcome = step(&mut state, Direction::Right);
    assert_eq!(outcome.resolution, MoveResolution::Plain);
    assert!(!state.exit_reached);
    assert_eq!(state.remaining_goals(), ":exit AND :treasure");

    for direction in [Direction::Left, Direction::Down, Direction::Up] {
        step(&mut state, direction);
    }
    assert_eq!(state.remaining_goals(), ":exit");

    let outcome = step(&mut state, Direction::Right);
    assert_eq!(outcome.resolution, MoveResolution::WithSideEffect);
    assert!(state.is_complete());
}

// ============================================================================
// Portals
// ============================================================================

#[test]
fn portal_chain_resolves_to_last_adjacent_portal() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .entity(Position::new(1, 0), RED)
        .entity(Position::new(5, 5), RED)
        .entity(Position::new(6, 5), RED)
        .build()
        .expect("dungeon should build");

    let outcome = step(&mut state, Direction::Right);

    assert_eq!(outcome.resolution, MoveResolution::Teleported { via: EntityId(3) });
    assert_eq!(state.player.position(), Position::new(7, 5));
}

#[test]
fn paired_portals_resolve_to_each_other() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .entity(Position::new(1, 0), RED)
        .entity(Position::new(5, 5), RED)
        .build()
        .expect("dungeon should build");

    step(&mut state, Direction::Right);
    assert_eq!(state.player.position(), Position::new(6, 5));

    let outcome = step(&mut state, Direction::Left);
    assert_eq!(outcome.resolution, MoveResolution::Teleported { via: EntityId(1) });
    assert_eq!(state.player.position(), Position::ORIGIN);
}

#[test]
fn portal_row_terminates() {
    // Every portal sits beside another: the walk must stop on the visited set.
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .entity(Position::new(1, 0), RED)
        .entity(Position::new(2, 0), RED)
        .entity(Position::new(3, 0), RED)
        .build()
        .expect("dungeon should build");

    let outcome = step(&mut state, Direction::Right);

    assert_eq!(outcome.resolution, MoveResolution::Teleported { via: EntityId(3) });
    assert_eq!(state.player.position(), Position::new(4, 0));
}

#[test]
fn blocked_portal_landing_blocks_the_move() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .entity(Position::new(1, 0), RED)
        .entity(Position::new(5, 5), RED)
        .entity(Position::new(6, 5), EntityKind::Boulder)
        .build()
        .expect("dungeon should build");
    let before = state.clone();

    let outcome = step(&mut state, Direction::Right);

    assert!(outcome.is_blocked());
    assert_eq!(state, before);
}

// ============================================================================
// Potions
// ============================================================================

#[test]
fn queued_potions_activate_in_order() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .config(DungeonConfig::with_potion_durations(2, 3))
        .entity(
            Position::new(8, 8),
            EntityKind::Enemy(EnemyState::new(EnemyKind::Spider)),
        )
        .holding(ItemKind::InvincibilityPotion)
        .holding(ItemKind::InvisibilityPotion)
        .build()
        .expect("dungeon should build");
    let first = EntityId(2);
    let second = EntityId(3);

    execute(&mut state, Command::ConsumePotion(first)).expect("first potion should be drunk");
    execute(&mut state, Command::ConsumePotion(second)).expect("second potion should be drunk");
    assert_eq!(state.broadcaster.published(), 2);

    let active = |state: &DungeonState| state.player.active_potion().map(|effect| effect.potion);

    step(&mut state, Direction::Right);
    assert_eq!(active(&state), Some(first));

    step(&mut state, Direction::Right);
    assert_eq!(active(&state), Some(second));
    assert!(state.player.potions.is_active(PotionKind::Invisibility));
    assert_eq!(state.player.active_potion().map(|effect| effect.remaining), Some(3));

    // Two consumptions plus one notification per tick.
    assert_eq!(state.broadcaster.published(), 4);
    let spider = state
        .registry
        .get(EntityId(1))
        .and_then(|entity| entity.kind.enemy())
        .copied()
        .expect("spider should still be registered");
    assert_eq!(spider.updates, 5);
    assert_eq!(spider.observed_potion.map(|effect| effect.potion), Some(second));

    for _ in 0..3 {
        step(&mut state, Direction::Right);
    }
    assert!(state.player.active_potion().is_none());
}

#[test]
fn blocked_move_is_not_a_potion_tick() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .entity(Position::new(1, 0), EntityKind::Wall)
        .holding(ItemKind::InvincibilityPotion)
        .build()
        .expect("dungeon should build");

    execute(&mut state, Command::ConsumePotion(EntityId(2))).expect("potion should be drunk");
    let remaining = state.player.active_potion().map(|effect| effect.remaining);

    step(&mut state, Direction::Right);

    assert_eq!(state.player.active_potion().map(|effect| effect.remaining), remaining);
    assert_eq!(state.broadcaster.published(), 1);
}

// ============================================================================
// Combat
// ============================================================================

#[test]
fn defeated_enemies_are_removed_and_unsubscribed() {
    let battle = ScriptedBattle::new(Some(BattleOutcome {
        enemy_defeated: true,
        player_damage: 12,
    }));
    let env = DungeonEnv::new(&battle, &NoBlast);

    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .goal(Goal::leaf(GoalKind::Enemies))
        .entity(
            Position::new(1, 0),
            EntityKind::Enemy(EnemyState::new(EnemyKind::ZombieToast)),
        )
        .entity(
            Position::new(1, 0),
            EntityKind::Enemy(EnemyState::new(EnemyKind::Mercenary).allied()),
        )
        .build()
        .expect("dungeon should build");

    let outcome = run_move(&mut state, env, Direction::Right);

    assert_eq!(battle.calls.get(), 1);
    assert_eq!(outcome.battles.len(), 1);
    assert_eq!(outcome.battles[0].enemy, EntityId(1));
    assert_eq!(state.player.health, DungeonConfig::DEFAULT_PLAYER_HEALTH - 12);
    assert!(!state.broadcaster.is_subscribed(EntityId(1)));
    assert!(state.broadcaster.is_subscribed(EntityId(2)));
    assert!(state.player.encounters.is_empty());
    assert!(state.is_complete());
}

#[test]
fn declined_battle_keeps_the_enemy() {
    let battle = ScriptedBattle::new(None);
    let env = DungeonEnv::new(&battle, &NoBlast);

    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .entity(
            Position::new(1, 0),
            EntityKind::Enemy(EnemyState::new(EnemyKind::Assassin)),
        )
        .build()
        .expect("dungeon should build");

    let outcome = run_move(&mut state, env, Direction::Right);

    assert_eq!(battle.calls.get(), 1);
    assert!(outcome.battles.is_empty());
    assert!(state.registry.contains(EntityId(1)));
    assert_eq!(state.player.health, DungeonConfig::DEFAULT_PLAYER_HEALTH);
}

// ============================================================================
// Spawners and crafting through the engine
// ============================================================================

#[test]
fn destroying_spawner_with_only_a_bow_is_invalid() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .entity(Position::new(1, 0), EntityKind::ZombieToastSpawner)
        .holding(ItemKind::Bow)
        .build()
        .expect("dungeon should build");
    let before = state.clone();

    let error = execute(&mut state, Command::DestroySpawner(EntityId(1)))
        .expect_err("a bow cannot destroy a spawner");

    assert_eq!(error.phase(), TransitionPhase::PreValidate);
    assert!(matches!(error.action_error(), ActionError::InvalidAction { .. }));
    assert!(state.registry.contains(EntityId(1)));
    assert_eq!(state, before);
}

#[test]
fn destroying_unknown_spawner_is_no_such_entity() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .holding(ItemKind::Sword)
        .build()
        .expect("dungeon should build");

    let error = execute(&mut state, Command::DestroySpawner(EntityId(77)))
        .expect_err("unknown spawner");

    assert_eq!(error.action_error(), &ActionError::NoSuchEntity(EntityId(77)));
}

#[test]
fn spawner_fills_neighbours_then_stops() {
    let mut state = DungeonBuilder::new(Position::new(9, 9))
        .goal(Goal::leaf(GoalKind::Enemies))
        .entity(Position::new(5, 5), EntityKind::ZombieToastSpawner)
        .build()
        .expect("dungeon should build");
    let mut engine = DungeonEngine::new(&mut state);

    let mut spawned = Vec::new();
    for _ in 0..4 {
        spawned.push(engine.spawn(EntityId(1)).expect("spawn should succeed"));
    }
    let exhausted = engine.spawn(EntityId(1)).expect("spawn should succeed");

    assert!(spawned.iter().all(Option::is_some));
    assert_eq!(exhausted, None);

    let tiles: Vec<Position> = spawned
        .iter()
        .flatten()
        .filter_map(|id| state.registry.get(*id).map(|entity| entity.position()))
        .collect();
    assert_eq!(
        tiles,
        vec![
            Position::new(5, 4),
            Position::new(4, 5),
            Position::new(6, 5),
            Position::new(5, 6),
        ]
    );
    assert_eq!(state.goal_context().enemies_remaining, 4);
}

#[test]
fn sword_destroys_spawner_through_engine() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .goal(Goal::leaf(GoalKind::Enemies))
        .entity(Position::new(0, 1), EntityKind::ZombieToastSpawner)
        .holding(ItemKind::Sword)
        .build()
        .expect("dungeon should build");

    let outcome = execute(&mut state, Command::DestroySpawner(EntityId(1)))
        .expect("adjacent spawner with a sword");

    assert_eq!(outcome, CommandOutcome::DestroySpawner);
    assert!(state.is_complete());
}

#[test]
fn failed_craft_leaves_inventory_untouched() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .holding(ItemKind::Wood)
        .holding(ItemKind::Arrow)
        .build()
        .expect("dungeon should build");
    let before = state.clone();

    let error = execute(&mut state, Command::Craft(Recipe::Bow)).expect_err("two arrows short");

    assert_eq!(
        error.action_error(),
        &ActionError::InsufficientResources { recipe: Recipe::Bow }
    );
    assert_eq!(state, before);
}

#[test]
fn crafted_items_get_fresh_ids() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .entity(Position::new(4, 4), EntityKind::Wall)
        .holding(ItemKind::Wood)
        .holding(ItemKind::Wood)
        .holding(ItemKind::SunStone)
        .build()
        .expect("dungeon should build");

    let outcome = execute(&mut state, Command::Craft(Recipe::Shield)).expect("shield craftable");

    assert_eq!(outcome, CommandOutcome::Craft(EntityId(5)));
    assert!(state.player.inventory.contains(ItemTag::Shield));
    assert!(state.player.has_sun_stone());
}

#[test]
fn older_player_is_removed_by_portal() {
    let mut state = DungeonBuilder::new(Position::new(9, 9))
        .entity(Position::ORIGIN, EntityKind::OlderPlayer)
        .entity(Position::new(1, 0), RED)
        .build()
        .expect("dungeon should build");

    let outcome = DungeonEngine::new(&mut state)
        .move_older_player(EntityId(1), Direction::Right)
        .expect("older player exists");

    assert_eq!(outcome, dungeon_core::OlderPlayerOutcome::Departed);
    assert!(!state.registry.contains(EntityId(1)));
}

// ============================================================================
// Snapshots
// ============================================================================

#[cfg(feature = "serde")]
#[test]
fn snapshot_round_trips_through_ron() {
    let mut state = DungeonBuilder::new(Position::ORIGIN)
        .goal(Goal::or([
            Goal::leaf(GoalKind::Exit),
            Goal::leaf(GoalKind::Boulders),
        ]))
        .entity(Position::new(1, 0), EntityKind::Boulder)
        .entity(Position::new(2, 0), EntityKind::FloorSwitch { is_on: false })
        .entity(
            Position::new(3, 3),
            EntityKind::Enemy(EnemyState::new(EnemyKind::Hydra)),
        )
        .holding(ItemKind::InvisibilityPotion)
        .build()
        .expect("dungeon should build");
    execute(&mut state, Command::ConsumePotion(EntityId(4))).expect("potion should be drunk");
    step(&mut state, Direction::Right);

    let encoded = ron::to_string(&state).expect("state should serialize");
    let decoded: DungeonState = ron::from_str(&encoded).expect("state should deserialize");

    assert_eq!(decoded, state);
    assert_eq!(
        decoded.registry.entities_at(Position::new(2, 0)).count(),
        2,
        "position index is rebuilt on load"
    );
}

#[cfg(feature = "serde")]
#[test]
fn snapshot_with_duplicate_ids_fails_to_load() {
    let entities = vec![
        Entity::new(EntityId(1), Position::ORIGIN, EntityKind::Wall),
        Entity::new(EntityId(2), Position::new(1, 0), EntityKind::Boulder),
        Entity::new(EntityId(1), Position::new(2, 0), EntityKind::Wall),
    ];
    let encoded = ron::to_string(&entities).expect("entities should serialize");

    let decoded = ron::from_str::<dungeon_core::EntityRegistry>(&encoded);

    let error = decoded.expect_err("duplicate ids should be rejected");
    assert!(error.to_string().contains("already registered"));
}
