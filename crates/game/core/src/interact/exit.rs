//! Exit tiles.

use tracing::debug;

use crate::state::{DungeonState, EntityId, EntityKind, Position};

/// The exit on `position`, if any.
pub fn exit_at(state: &DungeonState, position: Position) -> Option<EntityId> {
    state
        .registry
        .find_at(position, |kind| matches!(kind, EntityKind::Exit { .. }))
        .map(|entity| entity.id)
}

/// Whether the goal tree lets the exit open right now.
pub fn openable(state: &DungeonState) -> bool {
    state.goal.exit_openable(&state.goal_context())
}

/// Opens the exit under the player and latches `exit_reached` when the goal
/// tree allows it. Returns true if this call opened the exit.
pub(crate) fn reach(state: &mut DungeonState, exit: EntityId) -> bool {
    if !openable(state) {
        return false;
    }

    let newly_opened = match state.registry.kind_mut(exit) {
        Some(EntityKind::Exit { is_open }) => !std::mem::replace(is_open, true),
        _ => return false,
    };
    state.exit_reached = true;
    if newly_opened {
        debug!(%exit, "exit opened");
    }
    newly_opened
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::{Goal, GoalKind};
    use crate::state::{DungeonBuilder, ItemKind};

    #[test]
    fn opens_when_siblings_are_done() {
        let mut state = DungeonBuilder::new(Position::ORIGIN)
            .goal(Goal::and([
                Goal::leaf(GoalKind::Exit),
                Goal::leaf(GoalKind::Treasure),
            ]))
            .entity(Position::new(1, 0), EntityKind::Exit { is_open: false })
            .build()
            .unwrap();

        assert!(reach(&mut state, EntityId(1)));
        assert!(state.exit_reached);
        assert!(state.is_complete());
    }

    #[test]
    fn stays_shut_while_treasure_remains() {
        let mut state = DungeonBuilder::new(Position::ORIGIN)
            .goal(Goal::and([
                Goal::leaf(GoalKind::Exit),
                Goal::leaf(GoalKind::Treasure),
            ]))
            .entity(Position::new(1, 0), EntityKind::Exit { is_open: false })
            .entity(Position::new(2, 0), EntityKind::Item(ItemKind::Treasure))
            .build()
            .unwrap();

        assert!(!reach(&mut state, EntityId(1)));
        assert!(!state.exit_reached);
        assert_eq!(
            state.registry.get(EntityId(1)).unwrap().kind,
            EntityKind::Exit { is_open: false }
        );
    }
}
