//! Terminal battle loop: keyboard in, `ratatui` frames out.
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use anyhow::Result;
use crossterm::event::{self as term, Event as TermEvent};
use tactics_core::{BattleScene, PhaseManager, Scene, Topic};
use tokio::time::{self, Duration, MissedTickBehavior};

use crate::config::ClientConfig;
use crate::input::{KeyAction, KeyboardState};
use crate::messages::MessageLog;
use crate::render::TuiRenderer;
use crate::terminal::{self, TerminalGuard};

pub struct App {
    config: ClientConfig,
    scene: BattleScene,
    log: Rc<RefCell<MessageLog>>,
}

impl App {
    pub fn new(config: ClientConfig, manager: PhaseManager) -> Self {
        let mut scene = BattleScene::new(manager);
        let log = Rc::new(RefCell::new(MessageLog::default()));

        let sink = Rc::clone(&log);
        scene.bus_mut().subscribe_multiple(
            &[Topic::Phase, Topic::Combat, Topic::Turn, Topic::Rejection],
            move |event| sink.borrow_mut().record(event),
        );

        Self { config, scene, log }
    }

    pub fn scene(&self) -> &BattleScene {
        &self.scene
    }

    /// Runs until the player quits.
    pub async fn run(mut self) -> Result<()> {
        tracing::info!(tick_ms = self.config.tick.as_millis() as u64, "battle loop starting");

        let tui = terminal::init()?;
        let _guard = TerminalGuard;
        let mut renderer = TuiRenderer::new(tui, Rc::clone(&self.log));
        let mut keyboard = KeyboardState::new();

        let mut ticker = time::interval(self.config.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = Instant::now();
        let mut dirty = true;

        loop {
            ticker.tick().await;

            while term::poll(Duration::ZERO)? {
                match term::read()? {
                    TermEvent::Key(key) => {
                        if keyboard.handle_key(key) == KeyAction::Quit {
                            tracing::info!(frames = self.scene.frames(), "player quit");
                            return Ok(());
                        }
                        dirty = true;
                    }
                    TermEvent::Resize(cols, rows) => {
                        self.scene.resize(cols.into(), rows.into());
                        dirty = true;
                    }
                    _ => {}
                }
            }

            let now = Instant::now();
            let delta = u32::try_from((now - last).as_millis()).unwrap_or(u32::MAX);
            last = now;

            self.scene.update(delta, &keyboard);
            keyboard.end_frame();

            if dirty {
                self.scene.render(&mut renderer);
                dirty = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tactics_content::ContentFactory;
    use tactics_core::{GameConfig, InputSource, Key};

    struct Pressed(&'static [Key]);

    impl InputSource for Pressed {
        fn is_down(&self, key: Key) -> bool {
            self.0.contains(&key)
        }
    }

    #[test]
    fn bus_feeds_the_message_log() {
        let manager = ContentFactory::sample(&GameConfig::default()).unwrap();
        let mut app = App::new(ClientConfig::default(), manager);

        // Each of the three player units: select, stay put, skip, proceed.
        for _ in 0..12 {
            app.scene.update(16, &Pressed(&[Key::Confirm]));
            app.scene.update(16, &Pressed(&[]));
        }

        let turn = app.scene().manager().turn();
        assert_eq!(turn.number, 2);
        assert_eq!(turn.active, tactics_core::Faction::Enemy);
        let log = app.log.borrow();
        assert_eq!(log.lines().last(), Some("Turn 2: Enemy phase"));
    }
}
