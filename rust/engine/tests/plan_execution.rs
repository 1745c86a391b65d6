// rust/engine/tests/plan_execution.rs
#![forbid(unsafe_code)]

/**
 * Plan execution against a recording input sink.
 *
 * Checks the exact press / tick / release sequence produced by `execute_plan` for the
 * hold modes, the zero-hold floor and the idle cycle of an empty plan.
 */
use mario_engine::engine::{execute_plan, ExecConfig, InputSink};
use mario_engine::{decide, tile, Action, ActionPlan, HoldMode, Signal, TileGrid, COLS, ROWS};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Event {
    Input(Signal),
    Ticks(u32),
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
}

impl InputSink for Recorder {
    fn send_input(&mut self, signal: Signal) {
        self.events.push(Event::Input(signal));
    }

    fn tick(&mut self) {
        match self.events.last_mut() {
            Some(Event::Ticks(n)) => *n += 1,
            _ => self.events.push(Event::Ticks(1)),
        }
    }
}

fn run(plan: &ActionPlan, cfg: ExecConfig) -> (Vec<Event>, mario_engine::engine::ExecReport) {
    let mut rec = Recorder::default();
    let report = execute_plan(&mut rec, plan, &cfg);
    (rec.events, report)
}

#[test]
fn single_action_press_hold_release() {
    let (events, report) = run(&ActionPlan::single(Action::A, 15), ExecConfig::default());
    assert_eq!(
        events,
        vec![
            Event::Input(Action::A.press()),
            Event::Ticks(15),
            Event::Input(Action::A.release()),
        ]
    );
    assert_eq!((report.presses, report.releases, report.ticks), (1, 1, 15));
}

#[test]
fn zero_hold_uses_the_act_freq_floor() {
    let cfg = ExecConfig {
        act_freq: 7,
        ..ExecConfig::default()
    };
    let (events, _) = run(&ActionPlan::single(Action::Right, 0), cfg);
    assert_eq!(events[1], Event::Ticks(7));
}

#[test]
fn empty_plan_idles_without_inputs() {
    let (events, report) = run(&ActionPlan::noop(), ExecConfig::default());
    assert_eq!(events, vec![Event::Ticks(5)]);
    assert_eq!((report.presses, report.releases, report.ticks), (0, 0, 5));
}

fn jump_then_run() -> ActionPlan {
    let mut plan = ActionPlan::single(Action::A, 30);
    plan.push(Action::Right, 0);
    plan
}

#[test]
fn plan_max_holds_every_press_for_the_largest_hold_and_releases_last() {
    let (events, report) = run(&jump_then_run(), ExecConfig::default());
    assert_eq!(
        events,
        vec![
            Event::Input(Signal::Press(Action::A)),
            Event::Ticks(30),
            Event::Input(Signal::Press(Action::Right)),
            Event::Ticks(30),
            Event::Input(Signal::Release(Action::A)),
            Event::Input(Signal::Release(Action::Right)),
        ]
    );
    assert_eq!(report.ticks, 60);
}

#[test]
fn per_action_holds_each_press_for_its_own_hold() {
    let cfg = ExecConfig {
        hold_mode: HoldMode::PerAction,
        ..ExecConfig::default()
    };
    let (events, report) = run(&jump_then_run(), cfg);
    assert_eq!(events[1], Event::Ticks(30));
    assert_eq!(events[3], Event::Ticks(5));
    assert_eq!(report.ticks, 35);
}

#[test]
fn decided_plan_round_trips_through_execution() {
    let mut g = TileGrid::empty(ROWS, COLS);
    g.set(5, 5, tile::PLAYER);
    g.set(6, 7, tile::LEDGE);
    let plan = decide(&g);
    let (events, _) = run(&plan, ExecConfig::default());
    assert_eq!(
        events,
        vec![
            Event::Input(Action::A.press()),
            Event::Ticks(15),
            Event::Input(Action::A.release()),
        ]
    );
}
