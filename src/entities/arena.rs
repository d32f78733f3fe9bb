use super::adversary::Adversary;
use super::body::{EntityKind, EntityRef};
use super::boss::Boss;
use super::player::Player;
use super::projectile::Projectile;

/// Sole owner of every live entity.
///
/// Each entity lives in exactly one typed collection; [`EntityArena::iter`]
/// is the combined view used for rendering.
#[derive(Debug, Clone)]
pub struct EntityArena {
    pub player: Player,
    pub adversaries: Vec<Adversary>,
    /// Only present in conquest mode, once enough kills are in
    pub boss: Option<Boss>,
    /// In firing order, oldest first
    pub projectiles: Vec<Projectile>,
}

impl EntityArena {
    pub fn new(player: Player, adversaries: Vec<Adversary>) -> Self {
        Self {
            player,
            adversaries,
            boss: None,
            projectiles: Vec::new(),
        }
    }

    /// Every live entity: the player, adversaries, the boss, then projectiles.
    pub fn iter(&self) -> impl Iterator<Item = EntityRef<'_>> {
        std::iter::once(EntityRef::Player(&self.player))
            .chain(self.adversaries.iter().map(EntityRef::Adversary))
            .chain(self.boss.iter().map(EntityRef::Boss))
            .chain(self.projectiles.iter().map(EntityRef::Projectile))
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Player => 1,
            EntityKind::Adversary => self.adversaries.len(),
            EntityKind::Boss => usize::from(self.boss.is_some()),
            EntityKind::Projectile => self.projectiles.len(),
        }
    }
}
