//! Play a scripted sequence of commands against a scenario
//!
//! Each step is resolved through the dungeon engine exactly as a client would
//! submit it. Rejected steps are reported and leave the dungeon unchanged.

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use console::style;

use dungeon_content::{ScenarioLoader, SquareBlast, StatBattle};
use dungeon_core::{
    Command, CommandOutcome, Direction, DungeonEngine, DungeonEnv, EntityId, ExecuteError,
    GameError, MoveResolution, Recipe,
};

use crate::utils;

/// Play a scripted sequence of commands against a scenario
#[derive(Parser)]
pub struct Play {
    /// Scenario RON file to build the dungeon from
    #[arg(value_name = "SCENARIO")]
    scenario: PathBuf,

    /// Steps to run in order, e.g. `right up bomb:7 craft:bow spawn:3 echo:12:left`
    #[arg(value_name = "STEP")]
    steps: Vec<Step>,

    /// Dungeon config TOML (falls back to $DUNGEON_CONFIG, then defaults)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Blast radius of detonating bombs
    #[arg(long, value_name = "TILES", default_value_t = 1)]
    blast_radius: i32,

    /// Write the final dungeon as a RON snapshot
    #[arg(short, long, value_name = "FILE")]
    save: Option<PathBuf>,
}

/// One scripted step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Player(Command),
    Spawn(EntityId),
    Echo(EntityId, Direction),
}

impl FromStr for Step {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.split(':');
        let head = parts.next().unwrap_or_default().to_ascii_lowercase();
        let mut arg = || {
            parts
                .next()
                .ok_or_else(|| format!("step `{raw}` is missing an argument"))
        };
        let id = |value: &str| {
            value
                .parse::<u32>()
                .map(EntityId)
                .map_err(|_| format!("`{value}` is not an entity id"))
        };
        let direction = |value: &str| {
            value
                .parse::<Direction>()
                .map_err(|_| format!("`{value}` is not a direction"))
        };

        let step = match head.as_str() {
            "u" => Step::Player(Command::Move(Direction::Up)),
            "d" => Step::Player(Command::Move(Direction::Down)),
            "l" => Step::Player(Command::Move(Direction::Left)),
            "r" => Step::Player(Command::Move(Direction::Right)),
            "bomb" => Step::Player(Command::PlaceBomb(id(arg()?)?)),
            "potion" => Step::Player(Command::ConsumePotion(id(arg()?)?)),
            "craft" => {
                let value = arg()?;
                let recipe = value
                    .parse::<Recipe>()
                    .map_err(|_| format!("`{value}` is not a recipe"))?;
                Step::Player(Command::Craft(recipe))
            }
            "destroy" => Step::Player(Command::DestroySpawner(id(arg()?)?)),
            "spawn" => Step::Spawn(id(arg()?)?),
            "echo" => {
                let older = id(arg()?)?;
                Step::Echo(older, direction(arg()?)?)
            }
            other => Step::Player(Command::Move(direction(other)?)),
        };

        match parts.next() {
            Some(extra) => Err(format!("unexpected `{extra}` in step `{raw}`")),
            None => Ok(step),
        }
    }
}

impl Play {
    pub fn execute(self) -> Result<()> {
        let config = utils::resolve_config(self.config.as_deref())?;
        let mut state = ScenarioLoader::load_state(&self.scenario, config)?;

        println!(
            "{} {}",
            style("Scenario:").bold().cyan(),
            self.scenario.display()
        );
        println!(
            "{} {}",
            style("Goal:").bold().cyan(),
            state.remaining_goals()
        );
        println!();

        let battle = StatBattle::default();
        let blast = SquareBlast::new(self.blast_radius);
        let mut engine = DungeonEngine::new(&mut state);

        for (index, step) in self.steps.iter().enumerate() {
            let label = format!("[{:>3}]", index + 1);
            let report = match *step {
                Step::Player(command) => engine
                    .execute(DungeonEnv::new(&battle, &blast), &command)
                    .map(|outcome| describe(&outcome)),
                Step::Spawn(spawner) => engine.spawn(spawner).map(|spawned| match spawned {
                    Some(id) => format!("spawned zombie toast {id}"),
                    None => "no free tile".to_string(),
                }),
                Step::Echo(older, direction) => engine
                    .move_older_player(older, direction)
                    .map(|outcome| format!("older player {older} {outcome:?}")),
            };

            match report {
                Ok(line) => println!("{} {:?}: {}", style(label).dim(), step, line),
                Err(error) => print_rejection(&label, step, &error),
            }

            let current = engine.state();
            if !current.player.is_alive() {
                println!("{}", style("The player has fallen.").bold().red());
                break;
            }
            if current.is_complete() {
                println!("{}", style("Dungeon complete!").bold().green());
                break;
            }
        }

        println!();
        utils::print_summary(&state);

        if let Some(path) = &self.save {
            utils::save_snapshot(path, &state)?;
            println!(
                "{} {}",
                style("Snapshot written:").bold().cyan(),
                path.display()
            );
        }

        Ok(())
    }
}

fn describe(outcome: &CommandOutcome) -> String {
    match outcome {
        CommandOutcome::Move(moved) => {
            let mut line = match moved.resolution {
                MoveResolution::Blocked => format!("blocked at {}", moved.position),
                MoveResolution::Plain => format!("moved to {}", moved.position),
                MoveResolution::WithSideEffect => format!("moved to {} (side effect)", moved.position),
                MoveResolution::Teleported { via } => {
                    format!("teleported through {via} to {}", moved.position)
                }
            };
            if !moved.collected.is_empty() {
                line.push_str(&format!(", collected {:?}", moved.collected));
            }
            if !moved.destroyed.is_empty() {
                line.push_str(&format!(", destroyed {:?}", moved.destroyed));
            }
            for report in &moved.battles {
                line.push_str(&format!(
                    ", fought {} (defeated: {}, damage: {})",
                    report.enemy, report.outcome.enemy_defeated, report.outcome.player_damage
                ));
            }
            line
        }
        CommandOutcome::PlaceBomb(placed) if placed.destroyed.is_empty() => {
            format!("bomb {} placed", placed.bomb)
        }
        CommandOutcome::PlaceBomb(placed) => {
            format!("bomb {} detonated, destroyed {:?}", placed.bomb, placed.destroyed)
        }
        CommandOutcome::ConsumePotion(Some(effect)) => {
            format!("{} active for {} ticks", effect.kind, effect.remaining)
        }
        CommandOutcome::ConsumePotion(None) => "potion queued".to_string(),
        CommandOutcome::Craft(id) => format!("crafted {id}"),
        CommandOutcome::DestroySpawner => "spawner destroyed".to_string(),
    }
}

fn print_rejection(label: &str, step: &Step, error: &ExecuteError) {
    println!(
        "{} {:?}: {} [{}] {}",
        style(label).dim(),
        step,
        style("rejected").yellow(),
        error.error_code(),
        error
    );
}
