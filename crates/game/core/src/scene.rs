//! Scene lifecycle seam between the rules and whatever drives them.
//!
//! A host calls [`Scene::update`] once per frame and [`Scene::render`] when
//! it wants a picture. Rendering itself lives outside this crate; renderers
//! receive a read-only [`Frame`] and draw it however they like.

use crate::events::{Event, EventBus};
use crate::grid::Grid;
use crate::input::{InputHandler, InputSource, TickInput};
use crate::phase::{BattleOutcome, Phase, PhaseManager, TurnState};
use crate::state::{Actor, Position, Roster};

/// Read-only view of the battle handed to renderers each frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub grid: &'a Grid,
    pub roster: &'a Roster,
    pub selector: Position,
    pub phase: Phase,
    pub turn: TurnState,
    pub active: Option<&'a Actor>,
    pub outcome: Option<BattleOutcome>,
}

pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>);
}

/// Capabilities every scene offers its host.
pub trait Scene {
    /// Advances one frame. Input is sampled exactly once per call.
    fn update(&mut self, delta_ms: u32, input: &dyn InputSource);

    fn render(&self, renderer: &mut dyn Renderer);

    /// Host viewport changed. Scenes that do not care may ignore it.
    fn resize(&mut self, _cols: u32, _rows: u32) {}
}

/// The grid battle as a scene: input handler in front of a phase manager,
/// with every queued event forwarded to the scene's bus.
#[derive(Debug)]
pub struct BattleScene {
    manager: PhaseManager,
    input: InputHandler,
    bus: EventBus,
    elapsed_ms: u64,
    frames: u64,
}

impl BattleScene {
    pub fn new(manager: PhaseManager) -> Self {
        Self {
            manager,
            input: InputHandler::new(),
            bus: EventBus::new(),
            elapsed_ms: 0,
            frames: 0,
        }
    }

    pub fn manager(&self) -> &PhaseManager {
        &self.manager
    }

    pub fn bus_mut(&mut self) -> &mut EventBus {
        &mut self.bus
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            grid: self.manager.grid(),
            roster: self.manager.roster(),
            selector: self.manager.selector(),
            phase: self.manager.phase(),
            turn: self.manager.turn(),
            active: self.manager.active_unit(),
            outcome: self.manager.outcome(),
        }
    }

    /// Applies an already-sampled tick of input and publishes the results.
    pub fn dispatch(&mut self, input: TickInput) {
        for direction in input.directions() {
            self.manager.move_cursor(direction);
        }
        if let Some(command) = input.action
            && let Ok(transition) = self.manager.handle(command)
            && transition.is_change()
        {
            tracing::trace!(%command, from = %transition.from, to = %transition.to, "dispatched");
        }
        self.flush_events();
    }

    fn flush_events(&mut self) {
        for event in self.manager.drain_events() {
            if let Event::ActionRejected { command, rejection } = &event {
                tracing::trace!(%command, "rejected: {rejection}");
            }
            self.bus.publish(&event);
        }
    }
}

impl Scene for BattleScene {
    fn update(&mut self, delta_ms: u32, input: &dyn InputSource) {
        self.elapsed_ms += u64::from(delta_ms);
        self.frames += 1;

        let tick = self.input.poll(input, self.manager.phase());
        self.dispatch(tick);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw(&self.frame());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::events::Topic;
    use crate::grid::GridDimensions;
    use crate::input::Key;
    use crate::state::{Faction, UnitClass, UnitId};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn scene() -> BattleScene {
        let roster = Roster::from_actors(vec![
            Actor::from_class(UnitId(1), "Ike", UnitClass::Lord, Faction::Player, Position::new(1, 1)),
            Actor::from_class(UnitId(2), "Bandit", UnitClass::Brigand, Faction::Enemy, Position::new(8, 5)),
        ])
        .unwrap();
        let grid = Grid::plain(GridDimensions::new(12, 8));
        BattleScene::new(PhaseManager::new(grid, roster, &GameConfig::default()))
    }

    struct Recorder(Vec<Phase>);

    impl Renderer for Recorder {
        fn draw(&mut self, frame: &Frame<'_>) {
            self.0.push(frame.phase);
        }
    }

    #[test]
    fn update_samples_once_and_publishes_events() {
        let mut scene = scene();
        let phases = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&phases);
        scene.bus_mut().subscribe(Topic::Phase, move |event| {
            if let Event::PhaseChanged { to, .. } = event {
                sink.borrow_mut().push(*to);
            }
        });

        let confirm = |key: Key| key == Key::Confirm;
        scene.update(16, &confirm);
        scene.update(16, &confirm);

        assert_eq!(*phases.borrow(), vec![Phase::Move]);
        assert_eq!(scene.frames(), 2);
        assert_eq!(scene.elapsed_ms(), 32);
    }

    #[test]
    fn render_hands_frame_to_renderer() {
        let scene = scene();
        let mut recorder = Recorder(Vec::new());
        scene.render(&mut recorder);
        assert_eq!(recorder.0, vec![Phase::Select]);
    }
}
