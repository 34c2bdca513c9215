//! Entity registry: insertion-ordered human and zombie positions.
//!
//! Entities have no identity beyond position and list order. Duplicates
//! are allowed. Lists are only ever replaced whole, never patched in place.

use crate::types::{EntityKind, Position};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRegistry {
    humans:  Vec<Position>,
    zombies: Vec<Position>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entities(humans: Vec<Position>, zombies: Vec<Position>) -> Self {
        Self { humans, zombies }
    }

    pub fn add_human(&mut self, pos: Position) {
        self.humans.push(pos);
    }

    pub fn add_zombie(&mut self, pos: Position) {
        self.zombies.push(pos);
    }

    pub fn add(&mut self, kind: EntityKind, pos: Position) {
        self.list_mut(kind).push(pos);
    }

    /// Humans in the order they were added (or last replaced).
    pub fn humans(&self) -> impl Iterator<Item = Position> + '_ {
        self.humans.iter().copied()
    }

    pub fn zombies(&self) -> impl Iterator<Item = Position> + '_ {
        self.zombies.iter().copied()
    }

    pub fn num_humans(&self)  -> usize { self.humans.len()  }
    pub fn num_zombies(&self) -> usize { self.zombies.len() }

    pub fn positions(&self, kind: EntityKind) -> &[Position] {
        match kind {
            EntityKind::Human  => &self.humans,
            EntityKind::Zombie => &self.zombies,
        }
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.positions(kind).len()
    }

    /// Swap in a fully built replacement list.
    ///
    /// Panics if the replacement changes the population size: moves never
    /// create or remove entities.
    pub fn replace(&mut self, kind: EntityKind, positions: Vec<Position>) {
        let list = self.list_mut(kind);
        assert_eq!(
            list.len(),
            positions.len(),
            "{} list replacement must preserve length",
            kind.name()
        );
        *list = positions;
    }

    pub fn clear(&mut self) {
        self.humans.clear();
        self.zombies.clear();
    }

    fn list_mut(&mut self, kind: EntityKind) -> &mut Vec<Position> {
        match kind {
            EntityKind::Human  => &mut self.humans,
            EntityKind::Zombie => &mut self.zombies,
        }
    }
}
