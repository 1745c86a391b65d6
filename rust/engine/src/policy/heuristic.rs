// rust/engine/src/policy/heuristic.rs
#![forbid(unsafe_code)]

use serde::Serialize;

use crate::engine::{tile, Action, ActionPlan, TileGrid, GROUND_ROW};
use crate::policy::base::{Decision, Policy, Reason};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
pub enum RuleId {
    PipeHazard,
    HazardOverhead,
    ObstacleAhead,
    NarrowGap,
    WideGapRunUp,
    LargeEnemyAhead,
    Advance,
}

impl RuleId {
    pub const ALL: [RuleId; 7] = [
        RuleId::PipeHazard,
        RuleId::HazardOverhead,
        RuleId::ObstacleAhead,
        RuleId::NarrowGap,
        RuleId::WideGapRunUp,
        RuleId::LargeEnemyAhead,
        RuleId::Advance,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RuleId::PipeHazard => "pipe_hazard",
            RuleId::HazardOverhead => "hazard_overhead",
            RuleId::ObstacleAhead => "obstacle_ahead",
            RuleId::NarrowGap => "narrow_gap",
            RuleId::WideGapRunUp => "wide_gap_run_up",
            RuleId::LargeEnemyAhead => "large_enemy_ahead",
            RuleId::Advance => "advance",
        }
    }
}

/// Grid cell addressed relative to the player anchor (top-left cell of the sprite).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cell {
    /// `dr` rows down and `dc` columns right of the anchor.
    Rel { dr: isize, dc: isize },
    /// Bottom row of the game area, `dc` columns right of the anchor.
    Ground { dc: isize },
}

impl Cell {
    #[inline]
    fn lookup(self, grid: &TileGrid, (row, col): (isize, isize)) -> Option<u8> {
        match self {
            Cell::Rel { dr, dc } => grid.get(row + dr, col + dc),
            Cell::Ground { dc } => grid.get(GROUND_ROW, col + dc),
        }
    }
}

/// Predicate on one looked-up cell. A cell outside the grid satisfies none of them.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Test {
    Is(u8),
    Empty,
    Occupied,
}

impl Test {
    #[inline]
    fn accepts(self, value: Option<u8>) -> bool {
        match (self, value) {
            (_, None) => false,
            (Test::Is(code), Some(v)) => v == code,
            (Test::Empty, Some(v)) => v == tile::EMPTY,
            (Test::Occupied, Some(v)) => v != tile::EMPTY,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Check {
    pub cell: Cell,
    pub test: Test,
}

impl Check {
    pub const fn new(cell: Cell, test: Test) -> Self {
        Self { cell, test }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Condition {
    /// Every check holds.
    All(&'static [Check]),
    /// A hazard tile anywhere in column `anchor + dc`, from the top row down to (but not
    /// including) the row directly above the anchor.
    HazardAbove { dc: isize },
    Always,
}

impl Condition {
    pub fn holds(&self, grid: &TileGrid, anchor: (isize, isize)) -> bool {
        match self {
            Condition::All(checks) => checks
                .iter()
                .all(|chk| chk.test.accepts(chk.cell.lookup(grid, anchor))),
            Condition::HazardAbove { dc } => {
                let (row, col) = anchor;
                (0..row - 1).any(|r| grid.get(r, col + dc) == Some(tile::HAZARD))
            }
            Condition::Always => true,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rule {
    pub id: RuleId,
    pub when: Condition,
    pub action: Action,
    pub hold: u32,
}

const fn rel(dr: isize, dc: isize) -> Cell {
    Cell::Rel { dr, dc }
}

const fn ground(dc: isize) -> Cell {
    Cell::Ground { dc }
}

// Mario is two tiles wide, so "directly ahead" is two columns right of the anchor and the
// feet row is one below it.
const PIPE_HAZARD: [Check; 2] = [
    Check::new(rel(1, 2), Test::Is(tile::PIPE_TOP)),
    Check::new(rel(1, 7), Test::Is(tile::HAZARD)),
];

const OBSTACLE_AHEAD: [Check; 1] = [Check::new(rel(1, 2), Test::Occupied)];

const NARROW_GAP: [Check; 3] = [
    Check::new(rel(2, 1), Test::Is(tile::LEDGE)),
    Check::new(ground(4), Test::Empty),
    Check::new(ground(6), Test::Occupied),
];

const WIDE_GAP: [Check; 3] = [
    Check::new(rel(2, 1), Test::Is(tile::LEDGE)),
    Check::new(ground(7), Test::Empty),
    Check::new(ground(9), Test::Empty),
];

const LARGE_ENEMY_AHEAD: [Check; 1] = [Check::new(rel(-1, 3), Test::Is(tile::LARGE_ENEMY))];

/**
 * The shipped rule table, highest priority first. The first matching rule wins.
 *
 * - Back off before a pipe when a hazard waits just past it, otherwise the jump lands on it.
 * - Retreat long from a hazard dropping in from above.
 * - Jump anything in front of the feet.
 * - Jump a narrow gap from a standstill; take a run-up for a wide one.
 * - Back off from a large enemy.
 * - Otherwise keep walking right.
 */
pub const STANDARD_RULES: [Rule; 7] = [
    Rule {
        id: RuleId::PipeHazard,
        when: Condition::All(&PIPE_HAZARD),
        action: Action::Left,
        hold: 10,
    },
    Rule {
        id: RuleId::HazardOverhead,
        when: Condition::HazardAbove { dc: 1 },
        action: Action::Left,
        hold: 60,
    },
    Rule {
        id: RuleId::ObstacleAhead,
        when: Condition::All(&OBSTACLE_AHEAD),
        action: Action::A,
        hold: 15,
    },
    Rule {
        id: RuleId::NarrowGap,
        when: Condition::All(&NARROW_GAP),
        action: Action::A,
        hold: 20,
    },
    Rule {
        id: RuleId::WideGapRunUp,
        when: Condition::All(&WIDE_GAP),
        action: Action::Right,
        hold: 30,
    },
    Rule {
        id: RuleId::LargeEnemyAhead,
        when: Condition::All(&LARGE_ENEMY_AHEAD),
        action: Action::Left,
        hold: 40,
    },
    Rule {
        id: RuleId::Advance,
        when: Condition::Always,
        action: Action::Right,
        hold: 0,
    },
];

fn first_match<'a>(rules: &'a [Rule], grid: &TileGrid) -> Option<&'a Rule> {
    let (row, col) = grid.find_player()?;
    let anchor = (row as isize, col as isize);
    rules.iter().find(|rule| rule.when.holds(grid, anchor))
}

fn decision_for(rule: Option<&Rule>) -> Decision {
    match rule {
        Some(rule) => Decision {
            plan: ActionPlan::single(rule.action, rule.hold),
            reason: Reason::Rule(rule.id),
        },
        None => Decision::noop(),
    }
}

/// Standard rule table as a plain function: empty plan if no player is visible.
pub fn decide(grid: &TileGrid) -> ActionPlan {
    decision_for(first_match(&STANDARD_RULES, grid)).plan
}

/// Ordered rule table. Always ends in an unconditional rule, so a visible player always
/// gets exactly one action.
#[derive(Clone, Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleTable {
    pub fn standard() -> Self {
        Self {
            rules: STANDARD_RULES.to_vec(),
        }
    }

    pub fn new(rules: Vec<Rule>) -> Result<Self, String> {
        match rules.last() {
            None => Err("rule table must not be empty".to_string()),
            Some(last) if last.when != Condition::Always => Err(format!(
                "last rule ({}) must be unconditional",
                last.id.name()
            )),
            Some(_) => Ok(Self { rules }),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Highest-priority rule that fires for this grid; `None` when no player is visible.
    pub fn evaluate(&self, grid: &TileGrid) -> Option<RuleId> {
        first_match(&self.rules, grid).map(|r| r.id)
    }

    /// Every rule whose condition holds, in priority order. Diagnostics only.
    pub fn matching(&self, grid: &TileGrid) -> Vec<RuleId> {
        let Some((row, col)) = grid.find_player() else {
            return Vec::new();
        };
        let anchor = (row as isize, col as isize);
        self.rules
            .iter()
            .filter(|r| r.when.holds(grid, anchor))
            .map(|r| r.id)
            .collect()
    }

    pub fn decide(&self, grid: &TileGrid) -> Decision {
        decision_for(first_match(&self.rules, grid))
    }
}

#[derive(Clone, Debug, Default)]
pub struct RulePolicy {
    table: RuleTable,
}

impl RulePolicy {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }
}

impl Policy for RulePolicy {
    fn decide(&mut self, grid: &TileGrid) -> Decision {
        self.table.decide(grid)
    }

    fn name(&self) -> &str {
        "rules"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tests_reject_out_of_grid_cells() {
        for t in [Test::Is(tile::EMPTY), Test::Empty, Test::Occupied] {
            assert!(!t.accepts(None));
        }
        assert!(Test::Empty.accepts(Some(tile::EMPTY)));
        assert!(Test::Occupied.accepts(Some(tile::PIPE_TOP)));
        assert!(!Test::Occupied.accepts(Some(tile::EMPTY)));
    }

    #[test]
    fn hazard_scan_stops_short_of_the_row_above_the_anchor() {
        let mut g = TileGrid::default();
        g.set(10, 5, tile::HAZARD);
        let cond = Condition::HazardAbove { dc: 1 };
        // anchor (11, 4): scanned rows are 0..10, row 10 excluded
        assert!(!cond.holds(&g, (11, 4)));
        // anchor (12, 4): row 10 is now included
        assert!(cond.holds(&g, (12, 4)));
        // top rows scan nothing
        assert!(!cond.holds(&g, (0, 4)));
        assert!(!cond.holds(&g, (1, 4)));
    }

    #[test]
    fn table_must_end_unconditionally() {
        assert!(RuleTable::new(Vec::new()).is_err());
        assert!(RuleTable::new(STANDARD_RULES[..3].to_vec()).is_err());
        assert!(RuleTable::new(STANDARD_RULES.to_vec()).is_ok());
    }

    #[test]
    fn standard_table_is_in_priority_order() {
        let ids: Vec<RuleId> = STANDARD_RULES.iter().map(|r| r.id).collect();
        assert_eq!(ids, RuleId::ALL.to_vec());
    }
}
