#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Running,
    /// Freezes the simulation while the loop keeps ticking
    Paused,
    /// Terminal until restart
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn banner(&self) -> &'static str {
        match self {
            Outcome::Won => "YOU WIN!",
            Outcome::Lost => "GAME OVER",
        }
    }
}
