//! The per-tick simulation and its state machine.
//!
//! Each active tick runs spawn, update, collide, then the win and level
//! checks, always in that order. Ticks keep arriving while paused or after
//! the game ends; they just do nothing until the state changes.

use rand::Rng;

use crate::clock::Clock;
use crate::collision::{resolve_bullet_hits, resolve_player_hits};
use crate::config::GameConfig;
use crate::entities::{
    Bullet, Enemy, GameState, Outcome, Player, SpriteId, SpriteIds, Star, Tint, star_field,
};
use crate::spawner::Spawner;

/// Something that happened during a tick, for the front-end to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    EnemySpawned { enemy: SpriteId },
    EnemyDestroyed { enemy: SpriteId, bullet: SpriteId },
    EnemyEscaped { enemy: SpriteId },
    PlayerHit { enemy: SpriteId },
    LevelUp { level: u32 },
    GameOver { outcome: Outcome, score: u32 },
    Restarted,
}

/// Horizontal steering requested by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    Left,
    Right,
    Idle,
}

pub struct Game<C: Clock, R: Rng> {
    config: GameConfig,
    clock: C,
    rng: R,
    sprite_ids: SpriteIds,
    state: GameState,
    outcome: Option<Outcome>,
    player: Player,
    bullets: Vec<Bullet>,
    enemies: Vec<Enemy>,
    stars: Vec<Star>,
    score: u32,
    lives: u32,
    level: u32,
    spawner: Spawner,
    events: Vec<GameEvent>,
}

impl<C: Clock, R: Rng> Game<C, R> {
    pub fn new(config: GameConfig, clock: C, mut rng: R) -> Self {
        let mut sprite_ids = SpriteIds::new();
        let player = Player::new(&config, sprite_ids.next());
        let stars = star_field(&config, &mut rng, || sprite_ids.next());
        let lives = config.initial_lives;

        Self {
            config,
            clock,
            rng,
            sprite_ids,
            state: GameState::Running,
            outcome: None,
            player,
            bullets: Vec::new(),
            enemies: Vec::new(),
            stars,
            score: 0,
            lives,
            level: 1,
            spawner: Spawner::new(),
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Set once the game is over
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Takes the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Sets the ship's held velocity
    pub fn steer(&mut self, steer: Steer) {
        let speed = self.config.player_speed;
        let vx = match steer {
            Steer::Left => -speed,
            Steer::Right => speed,
            Steer::Idle => 0.0,
        };
        self.player.set_velocity(vx);
    }

    /// Launches a bullet from the ship. Ignored once the game is over.
    pub fn fire(&mut self) {
        if self.state == GameState::GameOver {
            return;
        }
        let bullet = self.player.fire(&self.config, self.sprite_ids.next());
        self.bullets.push(bullet);
    }

    pub fn pause(&mut self) {
        if self.state == GameState::Running {
            self.state = GameState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == GameState::Paused {
            self.state = GameState::Running;
        }
    }

    /// Puts an enemy into play directly, bypassing the spawner
    pub fn insert_enemy(&mut self, x: f32, y: f32, speed: f32, seed: u32) -> SpriteId {
        let id = self.sprite_ids.next();
        let tint = Tint::ENEMY_PALETTE[seed as usize % 4];
        self.enemies.push(Enemy::new(
            x,
            y,
            self.config.enemy_size,
            speed,
            seed,
            self.clock.now(),
            tint,
            id,
        ));
        self.events.push(GameEvent::EnemySpawned { enemy: id });
        id
    }

    /// Advances the simulation by one step
    pub fn tick(&mut self) {
        if self.state != GameState::Running {
            return;
        }

        self.spawn_enemy_if_due();
        self.update_entities();
        if self.state == GameState::Running {
            self.handle_collisions();
        }
        self.check_win();
        self.update_level();
    }

    /// Resets everything to a fresh game
    pub fn restart(&mut self) {
        self.destroy_active();
        self.player = Player::new(&self.config, self.sprite_ids.next());
        let sprite_ids = &mut self.sprite_ids;
        self.stars = star_field(&self.config, &mut self.rng, || sprite_ids.next());
        self.score = 0;
        self.lives = self.config.initial_lives;
        self.level = 1;
        self.spawner.reset();
        self.outcome = None;
        self.state = GameState::Running;
        self.events.push(GameEvent::Restarted);
    }

    fn spawn_enemy_if_due(&mut self) {
        let now = self.clock.now();
        let sprite_ids = &mut self.sprite_ids;
        if let Some(enemy) = self.spawner.try_spawn(
            now,
            self.level,
            self.enemies.len(),
            &self.config,
            &mut self.rng,
            || sprite_ids.next(),
        ) {
            self.events.push(GameEvent::EnemySpawned {
                enemy: enemy.sprite.id,
            });
            self.enemies.push(enemy);
        }
    }

    fn update_entities(&mut self) {
        for star in &mut self.stars {
            star.update(&self.config, &mut self.rng);
        }

        self.player.update(self.config.canvas_width);

        for bullet in &mut self.bullets {
            bullet.update();
            if bullet.is_off_screen() {
                bullet.destroy();
            }
        }
        self.bullets.retain(Bullet::is_alive);

        let now = self.clock.now();
        let mut escaped = Vec::new();
        for enemy in &mut self.enemies {
            enemy.update(now, self.config.enemy_hor_speed);
            if enemy.is_off_screen(self.config.canvas_height) && enemy.destroy() {
                escaped.push(enemy.sprite.id);
            }
        }
        self.enemies.retain(Enemy::is_alive);

        for enemy in escaped {
            self.events.push(GameEvent::EnemyEscaped { enemy });
            self.lose_life();
        }
    }

    fn handle_collisions(&mut self) {
        for kill in resolve_bullet_hits(&mut self.bullets, &mut self.enemies) {
            self.score += self.config.points_per_kill;
            self.events.push(GameEvent::EnemyDestroyed {
                enemy: kill.enemy,
                bullet: kill.bullet,
            });
        }
        self.bullets.retain(Bullet::is_alive);
        self.enemies.retain(Enemy::is_alive);

        for enemy in resolve_player_hits(&self.player, &mut self.enemies) {
            self.events.push(GameEvent::PlayerHit { enemy });
            self.lose_life();
        }
        self.enemies.retain(Enemy::is_alive);
    }

    fn lose_life(&mut self) {
        if self.state == GameState::GameOver {
            return;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.end_game(Outcome::Lost);
        }
    }

    /// Reaching the win score wins even if the last life went this tick
    fn check_win(&mut self) {
        if self.score >= self.config.win_score && self.outcome != Some(Outcome::Won) {
            self.end_game(Outcome::Won);
        }
    }

    fn update_level(&mut self) {
        let level = self.config.level_for_score(self.score);
        if level != self.level {
            self.level = level;
            self.events.push(GameEvent::LevelUp { level });
        }
    }

    fn end_game(&mut self, outcome: Outcome) {
        self.destroy_active();
        self.state = GameState::GameOver;
        self.outcome = Some(outcome);
        self.events.push(GameEvent::GameOver {
            outcome,
            score: self.score,
        });
    }

    /// Clears bullets and enemies; stars and the HUD values stay
    fn destroy_active(&mut self) {
        for bullet in &mut self.bullets {
            bullet.destroy();
        }
        for enemy in &mut self.enemies {
            enemy.destroy();
        }
        self.bullets.clear();
        self.enemies.clear();
    }
}
