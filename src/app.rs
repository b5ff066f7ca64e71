use color_eyre::Result;
use rand::rngs::ThreadRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::time::Instant;

use space_ace::clock::MonotonicClock;
use space_ace::config::GameConfig;
use space_ace::entities::{GameState, Outcome};
use space_ace::game::{Game, GameEvent};
use space_ace::input::{InputAction, InputManager};
use space_ace::renderer::{GameRenderer, RenderView};

/// The main application which holds the state and logic of the application.
pub struct App {
    running: bool,
    game: Game<MonotonicClock, ThreadRng>,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(reports_key_release: bool) -> Self {
        Self {
            running: true,
            game: Game::new(GameConfig::default(), MonotonicClock::new(), rand::rng()),
            input_manager: InputManager::new(reports_key_release),
            renderer: GameRenderer::new(),
        }
    }

    /// Run the application's main loop.
    ///
    /// Ticks on a fixed schedule. Between ticks the loop waits on input
    /// rather than sleeping, and a late tick pushes the schedule back
    /// instead of bursting to catch up.
    pub fn run(mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        let interval = self.game.config().tick_interval();
        log::info!("Game started, ticking every {}ms", interval.as_millis());

        let mut next_tick = Instant::now();
        while self.running {
            let timeout = next_tick.saturating_duration_since(Instant::now());
            self.input_manager
                .poll_events(timeout, self.game.state())?;
            self.input_manager.expire_stale(Instant::now());

            let actions = self.input_manager.take_actions();
            self.process_actions(&actions);
            if !self.running {
                break;
            }

            let now = Instant::now();
            if now < next_tick {
                continue;
            }
            next_tick = (next_tick + interval).max(now);

            self.game.tick();
            self.report_events();
            self.draw(terminal)?;
        }
        log::info!("Quit with score {}", self.game.score());
        Ok(())
    }

    fn draw(&self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        let game = &self.game;
        terminal.draw(|frame| {
            let view = RenderView {
                game_state: game.state(),
                outcome: game.outcome(),
                player: game.player(),
                enemies: game.enemies(),
                bullets: game.bullets(),
                stars: game.stars(),
                score: game.score(),
                lives: game.lives(),
                level: game.level(),
                canvas_width: game.config().canvas_width,
                canvas_height: game.config().canvas_height,
                area: frame.area(),
            };
            self.renderer.render(frame, &view);
        })?;
        Ok(())
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Restart => {
                    if self.game.state() == GameState::GameOver {
                        self.game.restart();
                        // The new ship keeps moving if a key is still down
                        self.game.steer(self.input_manager.current_steer());
                    }
                }
                InputAction::Steer(steer) => {
                    self.game.steer(*steer);
                }
                InputAction::Fire => {
                    self.game.fire();
                }
            }
        }
    }

    /// Logs what happened during the last tick
    fn report_events(&mut self) {
        for event in self.game.drain_events() {
            match event {
                GameEvent::EnemySpawned { enemy } => {
                    log::debug!("Enemy {:?} spawned", enemy);
                }
                GameEvent::EnemyDestroyed { enemy, bullet } => {
                    log::debug!("Enemy {:?} destroyed by bullet {:?}", enemy, bullet);
                }
                GameEvent::EnemyEscaped { enemy } => {
                    log::info!("Enemy {:?} escaped, lives left: {}", enemy, self.game.lives());
                }
                GameEvent::PlayerHit { enemy } => {
                    log::info!("Player hit by enemy {:?}, lives left: {}", enemy, self.game.lives());
                }
                GameEvent::LevelUp { level } => {
                    log::info!("Level up: {}", level);
                }
                GameEvent::GameOver { outcome, score } => match outcome {
                    Outcome::Won => log::info!("Player won with score {}", score),
                    Outcome::Lost => log::info!("Game over with score {}", score),
                },
                GameEvent::Restarted => {
                    log::info!("Game restarted");
                }
            }
        }
    }
}
