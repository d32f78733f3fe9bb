use super::adversary::Adversary;
use super::boss::Boss;
use super::bounds::Bounds;
use super::player::Player;
use super::projectile::Projectile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Adversary,
    Boss,
    Projectile,
}

/// Shared movement contract for everything that lives in the arena.
///
/// `dt` is measured in ticks: `1.0` is one full fixed step, `0.0` must leave
/// the entity where it is.
pub trait Body {
    fn advance(&mut self, dt: f32);

    fn bounds(&self) -> Bounds;

    fn kind(&self) -> EntityKind;
}

/// Borrowed, kind-tagged view of one entity owned by the arena.
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Adversary(&'a Adversary),
    Boss(&'a Boss),
    Projectile(&'a Projectile),
}

impl EntityRef<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityRef::Player(_) => EntityKind::Player,
            EntityRef::Adversary(_) => EntityKind::Adversary,
            EntityRef::Boss(_) => EntityKind::Boss,
            EntityRef::Projectile(_) => EntityKind::Projectile,
        }
    }

    pub fn bounds(&self) -> Bounds {
        match self {
            EntityRef::Player(player) => player.bounds(),
            EntityRef::Adversary(adversary) => adversary.bounds(),
            EntityRef::Boss(boss) => boss.bounds(),
            EntityRef::Projectile(projectile) => projectile.bounds(),
        }
    }
}
