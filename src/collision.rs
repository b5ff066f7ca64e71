//! Bounding-box collision passes.
//!
//! Both passes only mark entities as destroyed; callers compact their
//! collections afterwards. Destroyed entities are skipped, so nothing is hit
//! twice within a pass.

use crate::entities::{Bullet, Enemy, Player, SpriteId};

/// A bullet and the enemy it took down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub bullet: SpriteId,
    pub enemy: SpriteId,
}

/// Each bullet destroys at most the first live enemy it overlaps.
pub fn resolve_bullet_hits(bullets: &mut [Bullet], enemies: &mut [Enemy]) -> Vec<Kill> {
    let mut kills = Vec::new();

    for bullet in bullets.iter_mut().filter(|b| b.is_alive()) {
        let bullet_bounds = bullet.bounds();
        if let Some(enemy) = enemies
            .iter_mut()
            .filter(|e| e.is_alive())
            .find(|e| bullet_bounds.overlaps(&e.bounds()))
        {
            bullet.destroy();
            enemy.destroy();
            kills.push(Kill {
                bullet: bullet.sprite.id,
                enemy: enemy.sprite.id,
            });
        }
    }

    kills
}

/// Destroys every live enemy touching the player, returning them in order.
pub fn resolve_player_hits(player: &Player, enemies: &mut [Enemy]) -> Vec<SpriteId> {
    let player_bounds = player.bounds();
    enemies
        .iter_mut()
        .filter(|e| e.is_alive() && player_bounds.overlaps(&e.bounds()))
        .map(|enemy| {
            enemy.destroy();
            enemy.sprite.id
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entities::Tint;
    use std::time::Duration;

    fn enemy(id: u64, x: f32, y: f32) -> Enemy {
        Enemy::new(x, y, 36.0, 2.0, 0, Duration::ZERO, Tint::Red, SpriteId(id))
    }

    fn bullet(id: u64, x: f32, y: f32) -> Bullet {
        Bullet::new(x, y, &GameConfig::default(), SpriteId(id))
    }

    #[test]
    fn test_bullet_hits_enemy() {
        let mut bullets = vec![bullet(1, 300.0, 10.0)];
        let mut enemies = vec![enemy(2, 300.0, 0.0)];
        let kills = resolve_bullet_hits(&mut bullets, &mut enemies);
        assert_eq!(
            kills,
            vec![Kill {
                bullet: SpriteId(1),
                enemy: SpriteId(2)
            }]
        );
        assert!(!bullets[0].is_alive());
        assert!(!enemies[0].is_alive());
    }

    #[test]
    fn test_bullet_misses_distant_enemy() {
        let mut bullets = vec![bullet(1, 100.0, 400.0)];
        let mut enemies = vec![enemy(2, 300.0, 0.0)];
        assert!(resolve_bullet_hits(&mut bullets, &mut enemies).is_empty());
        assert!(bullets[0].is_alive());
        assert!(enemies[0].is_alive());
    }

    #[test]
    fn test_bullet_kills_only_one_enemy() {
        let mut bullets = vec![bullet(1, 300.0, 10.0)];
        let mut enemies = vec![enemy(2, 300.0, 0.0), enemy(3, 302.0, 2.0)];
        let kills = resolve_bullet_hits(&mut bullets, &mut enemies);
        assert_eq!(kills.len(), 1);
        assert_eq!(kills[0].enemy, SpriteId(2));
        assert!(enemies[1].is_alive());
    }

    #[test]
    fn test_enemy_cannot_be_killed_twice() {
        let mut bullets = vec![bullet(1, 300.0, 10.0), bullet(2, 301.0, 12.0)];
        let mut enemies = vec![enemy(3, 300.0, 0.0)];
        let kills = resolve_bullet_hits(&mut bullets, &mut enemies);
        assert_eq!(kills.len(), 1);
        assert!(!bullets[0].is_alive());
        // Second bullet found nothing left to hit
        assert!(bullets[1].is_alive());
    }

    #[test]
    fn test_destroyed_entities_are_skipped() {
        let mut bullets = vec![bullet(1, 300.0, 10.0)];
        let mut enemies = vec![enemy(2, 300.0, 0.0)];
        enemies[0].destroy();
        assert!(resolve_bullet_hits(&mut bullets, &mut enemies).is_empty());
        assert!(bullets[0].is_alive());
    }

    #[test]
    fn test_enemy_hits_player() {
        let player = Player::new(&GameConfig::default(), SpriteId(0));
        let mut enemies = vec![enemy(1, 300.0, 720.0), enemy(2, 100.0, 720.0)];
        let hits = resolve_player_hits(&player, &mut enemies);
        assert_eq!(hits, vec![SpriteId(1)]);
        assert!(!enemies[0].is_alive());
        assert!(enemies[1].is_alive());
    }

    #[test]
    fn test_enemy_touching_player_edge_hits() {
        let player = Player::new(&GameConfig::default(), SpriteId(0));
        // Enemy's right edge sits exactly on the player's left edge (275)
        let mut enemies = vec![enemy(1, 257.0, 740.0)];
        assert_eq!(resolve_player_hits(&player, &mut enemies), vec![SpriteId(1)]);
    }
}
