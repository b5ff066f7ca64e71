use crate::entities::{Bullet, Enemy, GameState, Outcome, Player, Star, Tint};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, Paragraph,
        canvas::{Canvas, Circle, Context, Line as CanvasLine, Points, Rectangle},
    },
};

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub outcome: Option<Outcome>,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub stars: &'a [Star],
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    /// World size the entity coordinates live in
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub area: Rect,
}

impl RenderView<'_> {
    /// World y grows down, canvas y grows up
    fn flip(&self, y: f32) -> f64 {
        f64::from(self.canvas_height - y)
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Default)]
pub struct GameRenderer {}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Draws the field, then the overlay for the current state
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        match view.game_state {
            GameState::Running => {}
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let field_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::LEFT | Borders::RIGHT)
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .background_color(Color::Black)
            .marker(Marker::Braille)
            .x_bounds([0.0, f64::from(view.canvas_width)])
            .y_bounds([0.0, f64::from(view.canvas_height)])
            .paint(|ctx| {
                self.paint_stars(ctx, view);
                ctx.layer();
                self.paint_enemies(ctx, view);
                self.paint_bullets(ctx, view);
                self.paint_player(ctx, view);
            });
        frame.render_widget(canvas, field_area);

        self.render_hud(frame, view);

        let controls = Line::from(vec![Span::styled(
            "[←/→: Move] [Space: Fire] [R: Restart after game over] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x,
            y: area.y + area.height.saturating_sub(1),
            width: area.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn paint_stars(&self, ctx: &mut Context, view: &RenderView) {
        for size in 1..=3u8 {
            let coords: Vec<(f64, f64)> = view
                .stars
                .iter()
                .filter(|s| s.sprite.is_visible() && s.size.clamp(1, 3) == size)
                .flat_map(|s| star_dots(s.size).iter().map(move |(dx, dy)| (s.x + dx, s.y + dy)))
                .map(|(x, y)| (f64::from(x), view.flip(y)))
                .collect();
            ctx.draw(&Points {
                coords: &coords,
                color: star_color(size),
            });
        }
    }

    fn paint_enemies(&self, ctx: &mut Context, view: &RenderView) {
        for enemy in view.enemies.iter().filter(|e| e.is_alive()) {
            ctx.draw(&Circle {
                x: f64::from(enemy.x),
                y: view.flip(enemy.y),
                radius: f64::from(enemy.size / 2.0),
                color: tint_color(enemy.tint),
            });
        }
    }

    fn paint_bullets(&self, ctx: &mut Context, view: &RenderView) {
        for bullet in view.bullets.iter().filter(|b| b.is_alive()) {
            let bounds = bullet.bounds();
            ctx.draw(&Rectangle {
                x: f64::from(bounds.left),
                y: view.flip(bounds.bottom),
                width: f64::from(bounds.width()),
                height: f64::from(bounds.height()),
                color: Color::Yellow,
            });
        }
    }

    /// Triangle pointing up, like the ship's nose
    fn paint_player(&self, ctx: &mut Context, view: &RenderView) {
        let player = view.player;
        if !player.sprite.is_visible() {
            return;
        }
        let bounds = player.bounds();
        let color = tint_color(player.tint);
        let left = (f64::from(bounds.left), view.flip(bounds.bottom));
        let right = (f64::from(bounds.right), view.flip(bounds.bottom));
        let nose = (f64::from(player.x), view.flip(bounds.top));
        for (from, to) in [(left, nose), (nose, right), (right, left)] {
            ctx.draw(&CanvasLine {
                x1: from.0,
                y1: from.1,
                x2: to.0,
                y2: to.1,
                color,
            });
        }
    }

    /// Score on the left, level centered, lives on the right
    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let hud_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };

        let score = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(score), hud_area);

        let level = Line::from(vec![
            Span::styled("Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.level),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(level).centered(), hud_area);

        let lives_style = if view.lives > 1 {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        };
        let lives = Line::from(vec![
            Span::styled("Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("{}", view.lives), lives_style),
        ]);
        frame.render_widget(Paragraph::new(lives).right_aligned(), hud_area);
    }

    /// Renders the pause panel over the frozen field
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
        ];
        let panel = centered_panel(view.area, 30, 4);
        frame.render_widget(Clear, panel);
        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            panel,
        );
    }

    /// Dimmed panel with the result; the HUD stays visible above it
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let outcome = view.outcome.unwrap_or(Outcome::Lost);
        let banner = match outcome {
            Outcome::Won => Line::from(outcome.banner()).centered().green().bold(),
            Outcome::Lost => Line::from(outcome.banner()).centered().red().bold(),
        };

        let game_over_text = vec![
            Line::from(""),
            banner,
            Line::from(""),
            Line::from(format!("Final Score: {}", view.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("Press 'r' to restart").centered().white(),
        ];

        let panel = centered_panel(view.area, 36, 8);
        frame.render_widget(Clear, panel);
        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::White)),
                )
                .style(Style::default().bg(Color::Black).add_modifier(Modifier::DIM))
                .alignment(Alignment::Center),
            panel,
        );
    }
}

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::LightBlue => Color::LightBlue,
        Tint::Red => Color::Red,
        Tint::Orange => Color::Rgb(255, 165, 0),
        Tint::Magenta => Color::Magenta,
        Tint::Cyan => Color::Cyan,
    }
}

/// Larger stars are brighter
fn star_color(size: u8) -> Color {
    match size {
        0 | 1 => Color::DarkGray,
        2 => Color::Gray,
        _ => Color::White,
    }
}

/// Dot offsets making up a star of the given size, in world units
fn star_dots(size: u8) -> &'static [(f32, f32)] {
    match size {
        0 | 1 => &[(0.0, 0.0)],
        2 => &[(0.0, 0.0), (6.0, 0.0)],
        _ => &[(0.0, 0.0), (6.0, 0.0), (0.0, 6.0), (6.0, 6.0)],
    }
}

/// Rect of at most `width` x `height` centered in `area`
fn centered_panel(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entities::SpriteId;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn buffer_text(buffer: &Buffer) -> String {
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>()
    }

    fn draw(game_state: GameState, outcome: Option<Outcome>) -> String {
        let config = GameConfig::default();
        let player = Player::new(&config, SpriteId(0));
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).expect("test terminal");
        terminal
            .draw(|frame| {
                let view = RenderView {
                    game_state,
                    outcome,
                    player: &player,
                    enemies: &[],
                    bullets: &[],
                    stars: &[],
                    score: 1200,
                    lives: 2,
                    level: 2,
                    canvas_width: config.canvas_width,
                    canvas_height: config.canvas_height,
                    area: frame.area(),
                };
                GameRenderer::new().render(frame, &view);
            })
            .expect("draw");
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_hud_shows_score_level_lives() {
        let text = draw(GameState::Running, None);
        assert!(text.contains("Score: 1200"));
        assert!(text.contains("Level: 2"));
        assert!(text.contains("Lives: 2"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn test_game_over_overlay() {
        let text = draw(GameState::GameOver, Some(Outcome::Lost));
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Press 'r' to restart"));
        assert!(text.contains("Score: 1200"));
    }

    #[test]
    fn test_win_overlay() {
        let text = draw(GameState::GameOver, Some(Outcome::Won));
        assert!(text.contains("YOU WIN!"));
    }

    #[test]
    fn test_paused_overlay() {
        let text = draw(GameState::Paused, None);
        assert!(text.contains("PAUSED"));
    }

    #[test]
    fn test_star_sizes_look_different() {
        assert_ne!(star_color(1), star_color(2));
        assert_ne!(star_color(2), star_color(3));
        assert_eq!(star_dots(1).len(), 1);
        assert_eq!(star_dots(2).len(), 2);
        assert_eq!(star_dots(3).len(), 4);
    }

    fn draw_stars(stars: &[Star]) -> Buffer {
        let config = GameConfig::default();
        let player = Player::new(&config, SpriteId(0));
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).expect("test terminal");
        terminal
            .draw(|frame| {
                let view = RenderView {
                    game_state: GameState::Running,
                    outcome: None,
                    player: &player,
                    enemies: &[],
                    bullets: &[],
                    stars,
                    score: 0,
                    lives: 3,
                    level: 1,
                    canvas_width: config.canvas_width,
                    canvas_height: config.canvas_height,
                    area: frame.area(),
                };
                GameRenderer::new().render(frame, &view);
            })
            .expect("draw");
        terminal.backend().buffer().clone()
    }

    fn cells_with_color(buffer: &Buffer, color: Color) -> usize {
        buffer.content().iter().filter(|cell| cell.fg == color).count()
    }

    #[test]
    fn test_each_star_size_is_drawn_in_its_color() {
        let empty = draw_stars(&[]);
        for (size, y) in [(1u8, 100.0), (2, 300.0), (3, 500.0)] {
            let star = Star::new(200.0, y, 1.0, size, SpriteId(1));
            let drawn = draw_stars(&[star]);
            let color = star_color(size);
            assert_eq!(
                cells_with_color(&drawn, color),
                cells_with_color(&empty, color) + 1,
                "star of size {size}"
            );
        }
    }

    #[test]
    fn test_centered_panel_fits_small_area() {
        let area = Rect::new(0, 0, 20, 5);
        assert_eq!(centered_panel(area, 36, 8), Rect::new(0, 0, 20, 5));
        assert_eq!(centered_panel(Rect::new(0, 0, 60, 30), 36, 8), Rect::new(12, 11, 36, 8));
    }
}
