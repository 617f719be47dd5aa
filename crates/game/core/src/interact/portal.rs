//! Portal chain resolution.

use std::collections::BTreeSet;

use crate::state::{Direction, Entity, EntityId, EntityKind, EntityRegistry, PortalColour, Position};

/// Where stepping into a portal takes the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortalTraversal {
    /// No other portal shares the colour; the tile behaves as a plain floor.
    Unpaired,
    /// The tile beyond the resolved portal cannot be landed on.
    Blocked { exit: EntityId },
    Clear { exit: EntityId, landing: Position },
}

/// Resolves the portal the player comes out of when entering `entry` while
/// travelling in `direction`, following adjacent same-colour portals.
pub fn resolve_exit<'a>(
    registry: &'a EntityRegistry,
    entry: &Entity,
    direction: Direction,
) -> Option<&'a Entity> {
    let colour = portal_colour(entry)?;
    let mut visited = BTreeSet::from([entry.id]);

    let mut current = registry
        .filter(|kind| same_colour(kind, colour))
        .find(|portal| !visited.contains(&portal.id))?;
    visited.insert(current.id);

    while let Some(next) = registry
        .entities_at(current.position().step(direction))
        .find(|portal| same_colour(&portal.kind, colour) && !visited.contains(&portal.id))
    {
        visited.insert(next.id);
        current = next;
    }

    Some(current)
}

/// Plans a traversal through `entry`.
pub fn traverse(registry: &EntityRegistry, entry: &Entity, direction: Direction) -> PortalTraversal {
    let Some(exit) = resolve_exit(registry, entry, direction) else {
        return PortalTraversal::Unpaired;
    };

    let landing = exit.position().step(direction);
    if landing == exit.position() || registry.any_at(landing, EntityKind::blocks_landing) {
        PortalTraversal::Blocked { exit: exit.id }
    } else {
        PortalTraversal::Clear {
            exit: exit.id,
            landing,
        }
    }
}

fn portal_colour(entity: &Entity) -> Option<PortalColour> {
    match entity.kind {
        EntityKind::Portal { colour } => Some(colour),
        _ => None,
    }
}

fn same_colour(kind: &EntityKind, colour: PortalColour) -> bool {
    matches!(kind, EntityKind::Portal { colour: other } if *other == colour)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DungeonBuilder, DungeonState};

    const RED: EntityKind = EntityKind::Portal {
        colour: PortalColour::Red,
    };

    fn entry(state: &DungeonState, id: u32) -> Entity {
        *state.registry.get(EntityId(id)).unwrap()
    }

    #[test]
    fn pair_resolves_both_ways() {
        let state = DungeonBuilder::new(Position::ORIGIN)
            .entity(Position::new(1, 0), RED)
            .entity(Position::new(5, 5), RED)
            .build()
            .unwrap();

        let forward = traverse(&state.registry, &entry(&state, 1), Direction::Right);
        let back = traverse(&state.registry, &entry(&state, 2), Direction::Left);

        assert_eq!(
            forward,
            PortalTraversal::Clear {
                exit: EntityId(2),
                landing: Position::new(6, 5)
            }
        );
        assert_eq!(
            back,
            PortalTraversal::Clear {
                exit: EntityId(1),
                landing: Position::ORIGIN
            }
        );
    }

    #[test]
    fn adjacent_portals_chain() {
        let state = DungeonBuilder::new(Position::ORIGIN)
            .entity(Position::new(1, 0), RED)
            .entity(Position::new(5, 5), RED)
            .entity(Position::new(6, 5), RED)
            .build()
            .unwrap();

        let exit = resolve_exit(&state.registry, &entry(&state, 1), Direction::Right).unwrap();
        assert_eq!(exit.id, EntityId(3));
    }

    #[test]
    fn chain_stops_at_visited_portals() {
        // The tile beyond the partner is the entry itself.
        let state = DungeonBuilder::new(Position::ORIGIN)
            .entity(Position::new(3, 0), RED)
            .entity(Position::new(2, 0), RED)
            .build()
            .unwrap();

        assert_eq!(
            traverse(&state.registry, &entry(&state, 1), Direction::Right),
            PortalTraversal::Clear {
                exit: EntityId(2),
                landing: Position::new(3, 0)
            }
        );
    }

    #[test]
    fn colours_do_not_mix() {
        let state = DungeonBuilder::new(Position::ORIGIN)
            .entity(Position::new(1, 0), RED)
            .entity(
                Position::new(5, 5),
                EntityKind::Portal {
                    colour: PortalColour::Blue,
                },
            )
            .build()
            .unwrap();

        assert_eq!(
            traverse(&state.registry, &entry(&state, 1), Direction::Right),
            PortalTraversal::Unpaired
        );
    }

    #[test]
    fn walled_landing_blocks() {
        let state = DungeonBuilder::new(Position::ORIGIN)
            .entity(Position::new(1, 0), RED)
            .entity(Position::new(5, 5), RED)
            .entity(Position::new(6, 5), EntityKind::Wall)
            .build()
            .unwrap();

        assert_eq!(
            traverse(&state.registry, &entry(&state, 1), Direction::Right),
            PortalTraversal::Blocked { exit: EntityId(2) }
        );
    }
}
