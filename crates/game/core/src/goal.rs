//! Composite goal tree.
//!
//! A dungeon holds exactly one root [`Goal`]. Completion is never stored: it
//! is recomputed from the root against a [`GoalContext`] snapshot of the
//! dungeon whenever it is asked for. Leaves are monotone: once a leaf has
//! been finished it is carried in [`GoalContext::latched`] and stays
//! finished even if the live counts regress.
//!
//! # Semantics
//!
//! - `And` is finished iff every child is finished (short-circuited AND)
//! - `Or` is finished iff any child is finished (short-circuited OR)
//! - An empty `And` is finished, an empty `Or` is not

use std::collections::BTreeSet;

/// Leaf conditions.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GoalKind {
    /// The player reached an open exit.
    Exit,
    /// No treasure is left lying on the map.
    Treasure,
    /// Every floor switch is weighted by a boulder.
    Boulders,
    /// Every hostile enemy is defeated and every spawner destroyed.
    Enemies,
}

/// Read-only facts the goal tree is evaluated against.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GoalContext {
    /// Leaves that finished during an earlier command.
    pub latched: BTreeSet<GoalKind>,
    pub exit_reached: bool,
    pub treasure_remaining: usize,
    pub switches_total: usize,
    pub switches_triggered: usize,
    pub enemies_remaining: usize,
    pub spawners_remaining: usize,
}

impl GoalKind {
    pub fn is_finished(self, ctx: &GoalContext) -> bool {
        ctx.latched.contains(&self) || self.holds(ctx)
    }

    /// Live evaluation, ignoring latched leaves.
    fn holds(self, ctx: &GoalContext) -> bool {
        match self {
            GoalKind::Exit => ctx.exit_reached,
            GoalKind::Treasure => ctx.treasure_remaining == 0,
            GoalKind::Boulders => ctx.switches_triggered == ctx.switches_total,
            GoalKind::Enemies => ctx.enemies_remaining == 0 && ctx.spawners_remaining == 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Goal {
    Leaf(GoalKind),
    And(Vec<Goal>),
    Or(Vec<Goal>),
}

impl Goal {
    pub fn leaf(kind: GoalKind) -> Self {
        Self::Leaf(kind)
    }

    pub fn and(children: impl IntoIterator<Item = Goal>) -> Self {
        Self::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = Goal>) -> Self {
        Self::Or(children.into_iter().collect())
    }

    pub fn is_finished(&self, ctx: &GoalContext) -> bool {
        self.evaluate(&|kind| kind.is_finished(ctx))
    }

    /// Whether reaching the exit would complete the tree right now.
    ///
    /// Every exit leaf is treated as satisfied: inside an `And` the other
    /// members must already hold, inside an `Or` the exit alone suffices,
    /// and a lone exit goal is always openable.
    pub fn exit_openable(&self, ctx: &GoalContext) -> bool {
        self.evaluate(&|kind| kind == GoalKind::Exit || kind.is_finished(ctx))
    }

    /// Every leaf kind that appears in the tree.
    pub fn leaves(&self) -> BTreeSet<GoalKind> {
        let mut leaves = BTreeSet::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves(&self, leaves: &mut BTreeSet<GoalKind>) {
        match self {
            Goal::Leaf(kind) => {
                leaves.insert(*kind);
            }
            Goal::And(children) | Goal::Or(children) => {
                for child in children {
                    child.collect_leaves(leaves);
                }
            }
        }
    }

    pub fn contains(&self, kind: GoalKind) -> bool {
        match self {
            Goal::Leaf(leaf) => *leaf == kind,
            Goal::And(children) | Goal::Or(children) => {
                children.iter().any(|child| child.contains(kind))
            }
        }
    }

    /// Describes the unfinished part of the tree, e.g. `:exit AND :treasure`.
    /// Empty when the tree is finished.
    pub fn remaining(&self, ctx: &GoalContext) -> String {
        if self.is_finished(ctx) {
            return String::new();
        }
        match self {
            Goal::Leaf(kind) => format!(":{kind}"),
            Goal::And(children) => Self::join(children, ctx, " AND "),
            Goal::Or(children) => Self::join(children, ctx, " OR "),
        }
    }

    fn evaluate(&self, leaf: &dyn Fn(GoalKind) -> bool) -> bool {
        match self {
            Goal::Leaf(kind) => leaf(*kind),
            Goal::And(children) => children.iter().all(|child| child.evaluate(leaf)),
            Goal::Or(children) => children.iter().any(|child| child.evaluate(leaf)),
        }
    }

    fn join(children: &[Goal], ctx: &GoalContext, separator: &str) -> String {
        children
            .iter()
            .filter(|child| !child.is_finished(ctx))
            .map(|child| match child {
                Goal::Leaf(_) => child.remaining(ctx),
                Goal::And(_) | Goal::Or(_) => format!("({})", child.remaining(ctx)),
            })
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl Default for Goal {
    fn default() -> Self {
        Self::Leaf(GoalKind::Exit)
    }
}
