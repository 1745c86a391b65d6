// rust/engine/tests/rule_table_contracts.rs
#![forbid(unsafe_code)]

/**
 * Rule-table contract tests.
 *
 * Purpose:
 * - Pin the observable behavior of the standard rule table: which action and hold each
 *   tactical pattern produces, and which pattern wins when several are present.
 *
 * How the tests work:
 * - Every fixture starts from a flat level: two rows of ground at the bottom and a 2x2
 *   player standing on it with its anchor at (12, 4). Patterns are painted on top.
 * - Assertions go through the public API only (`decide`, `RuleTable`, `Policy`).
 */
use mario_engine::{
    decide, tile, Action, ActionPlan, Policy, RandomPolicy, Reason, RuleId, RulePolicy,
    RuleTable, TileGrid, COLS, ROWS,
};

const ANCHOR: (usize, usize) = (12, 4);

fn flat_level() -> TileGrid {
    let mut g = TileGrid::empty(ROWS, COLS);
    for r in [14, 15] {
        for c in 0..COLS {
            g.set(r, c, tile::LEDGE);
        }
    }
    place_player(&mut g, ANCHOR);
    g
}

fn place_player(g: &mut TileGrid, (r, c): (usize, usize)) {
    for (dr, dc) in [(0, 0), (0, 1), (1, 0), (1, 1)] {
        g.set(r + dr, c + dc, tile::PLAYER);
    }
}

fn dig(g: &mut TileGrid, cols: std::ops::RangeInclusive<usize>) {
    for c in cols {
        g.set(14, c, tile::EMPTY);
        g.set(15, c, tile::EMPTY);
    }
}

fn at(dr: isize, dc: isize) -> (usize, usize) {
    (
        (ANCHOR.0 as isize + dr) as usize,
        (ANCHOR.1 as isize + dc) as usize,
    )
}

fn paint(g: &mut TileGrid, dr: isize, dc: isize, code: u8) {
    let (r, c) = at(dr, dc);
    g.set(r, c, code);
}

fn only(action: Action, hold: u32) -> ActionPlan {
    ActionPlan::single(action, hold)
}

#[test]
fn missing_player_yields_empty_plan() {
    let mut g = flat_level();
    for r in 0..ROWS {
        for c in 0..COLS {
            if g.get(r as isize, c as isize) == Some(tile::PLAYER) {
                g.set(r, c, tile::EMPTY);
            }
        }
    }

    let plan = decide(&g);
    assert!(plan.is_empty());
    let (actions, delays) = plan.into_parts();
    assert!(actions.is_empty() && delays.is_empty());

    let d = RulePolicy::default().decide(&g);
    assert_eq!(d.reason, Reason::NoPlayer);
    assert_eq!(RuleTable::standard().evaluate(&g), None);
}

#[test]
fn open_ground_advances_right_at_base_cadence() {
    let g = flat_level();
    assert_eq!(decide(&g), only(Action::Right, 0));
    assert_eq!(RuleTable::standard().evaluate(&g), Some(RuleId::Advance));
}

#[test]
fn pipe_with_hazard_behind_it_backs_off() {
    let mut g = flat_level();
    paint(&mut g, 1, 2, tile::PIPE_TOP);
    paint(&mut g, 1, 7, tile::HAZARD);
    assert_eq!(decide(&g), only(Action::Left, 10));
}

#[test]
fn pipe_without_hazard_is_jumped() {
    let mut g = flat_level();
    paint(&mut g, 1, 2, tile::PIPE_TOP);
    assert_eq!(decide(&g), only(Action::A, 15));
    assert_eq!(RuleTable::standard().evaluate(&g), Some(RuleId::ObstacleAhead));
}

#[test]
fn hazard_above_in_next_column_retreats_long() {
    let mut g = flat_level();
    paint(&mut g, -7, 1, tile::HAZARD);
    assert_eq!(decide(&g), only(Action::Left, 60));
}

#[test]
fn hazard_directly_above_the_head_row_is_not_scanned() {
    let mut g = flat_level();
    paint(&mut g, -1, 1, tile::HAZARD);
    assert_eq!(decide(&g), only(Action::Right, 0));
}

#[test]
fn obstacle_ahead_of_the_feet_is_jumped() {
    let mut g = flat_level();
    paint(&mut g, 1, 2, tile::LEDGE);
    assert_eq!(decide(&g), only(Action::A, 15));
}

#[test]
fn narrow_gap_is_jumped_from_a_standstill() {
    let mut g = flat_level();
    // ground missing at +4 and +5, back at +6
    dig(&mut g, 8..=9);
    assert_eq!(decide(&g), only(Action::A, 20));
    assert_eq!(RuleTable::standard().evaluate(&g), Some(RuleId::NarrowGap));
}

#[test]
fn wide_gap_gets_a_run_up_instead_of_a_jump() {
    let mut g = flat_level();
    // ground missing from +4 through +9
    dig(&mut g, 8..=13);
    assert_eq!(decide(&g), only(Action::Right, 30));
    assert_eq!(RuleTable::standard().evaluate(&g), Some(RuleId::WideGapRunUp));
}

#[test]
fn gap_rules_need_ledge_under_the_player() {
    let mut g = flat_level();
    dig(&mut g, 8..=13);
    paint(&mut g, 2, 1, tile::PIPE_TOP);
    assert_eq!(decide(&g), only(Action::Right, 0));
}

#[test]
fn large_enemy_ahead_backs_off() {
    let mut g = flat_level();
    paint(&mut g, -1, 3, tile::LARGE_ENEMY);
    assert_eq!(decide(&g), only(Action::Left, 40));
}

#[test]
fn overhead_hazard_beats_obstacle_ahead() {
    let mut g = flat_level();
    paint(&mut g, -7, 1, tile::HAZARD);
    paint(&mut g, 1, 2, tile::LEDGE);

    let table = RuleTable::standard();
    assert_eq!(
        table.matching(&g),
        vec![RuleId::HazardOverhead, RuleId::ObstacleAhead, RuleId::Advance]
    );
    assert_eq!(decide(&g), only(Action::Left, 60));
}

#[test]
fn pipe_hazard_beats_overhead_hazard() {
    let mut g = flat_level();
    paint(&mut g, 1, 2, tile::PIPE_TOP);
    paint(&mut g, 1, 7, tile::HAZARD);
    paint(&mut g, -7, 1, tile::HAZARD);
    assert_eq!(decide(&g), only(Action::Left, 10));
}

#[test]
fn obstacle_ahead_beats_gap_and_enemy_rules() {
    let mut g = flat_level();
    dig(&mut g, 8..=9);
    paint(&mut g, -1, 3, tile::LARGE_ENEMY);
    paint(&mut g, 1, 2, tile::HAZARD);
    assert_eq!(decide(&g), only(Action::A, 15));
}

#[test]
fn player_at_the_edges_never_panics_and_advances() {
    let mut g = TileGrid::empty(ROWS, COLS);
    g.set(0, COLS - 1, tile::PLAYER);
    assert_eq!(decide(&g), only(Action::Right, 0));

    let mut g = TileGrid::empty(ROWS, COLS);
    g.set(ROWS - 1, 0, tile::PLAYER);
    assert_eq!(decide(&g), only(Action::Right, 0));
}

#[test]
fn first_player_cell_in_row_major_order_is_the_anchor() {
    let mut g = flat_level();
    // stray player tile further down-left must not move the anchor
    g.set(13, 0, tile::PLAYER);
    paint(&mut g, 1, 2, tile::LEDGE);
    assert_eq!(decide(&g), only(Action::A, 15));
}

#[test]
fn policies_do_not_mutate_the_grid() {
    let g = flat_level();
    let before = g.clone();
    let _ = RulePolicy::default().decide(&g);
    let _ = RandomPolicy::new(7).decide(&g);
    assert_eq!(before, g);
}

#[test]
fn rule_policy_is_deterministic() {
    let mut g = flat_level();
    dig(&mut g, 8..=13);
    let mut p = RulePolicy::default();
    let d1 = p.decide(&g);
    let d2 = p.decide(&g);
    assert_eq!(d1, d2);
    assert_eq!(d1.reason, Reason::Rule(RuleId::WideGapRunUp));
}

#[test]
fn random_policy_is_seed_deterministic_and_single_action() {
    let g = flat_level();
    let mut p1 = RandomPolicy::new(42);
    let mut p2 = RandomPolicy::new(42);
    for _ in 0..16 {
        let d1 = p1.decide(&g);
        assert_eq!(d1, p2.decide(&g));
        assert_eq!(d1.plan.len(), 1);
        assert_eq!(d1.plan.delays(), vec![0]);
        assert_eq!(d1.reason, Reason::Random);
    }
}

#[test]
fn random_policy_idles_without_player() {
    let g = TileGrid::empty(ROWS, COLS);
    let d = RandomPolicy::new(1).decide(&g);
    assert!(d.plan.is_empty());
    assert_eq!(d.reason, Reason::NoPlayer);
}
