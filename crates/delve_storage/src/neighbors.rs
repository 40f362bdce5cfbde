//! Directional exits of a location.

use delve_foundation::Direction;

/// Up to ten optional exits, one per [`Direction`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Neighbors<T> {
    /// Exit to the north.
    pub north: Option<T>,
    /// Exit to the northeast.
    pub northeast: Option<T>,
    /// Exit to the east.
    pub east: Option<T>,
    /// Exit to the southeast.
    pub southeast: Option<T>,
    /// Exit to the south.
    pub south: Option<T>,
    /// Exit to the southwest.
    pub southwest: Option<T>,
    /// Exit to the west.
    pub west: Option<T>,
    /// Exit to the northwest.
    pub northwest: Option<T>,
    /// Exit upwards.
    pub up: Option<T>,
    /// Exit downwards.
    pub down: Option<T>,
}

impl<T> Default for Neighbors<T> {
    fn default() -> Self {
        Self {
            north: None,
            northeast: None,
            east: None,
            southeast: None,
            south: None,
            southwest: None,
            west: None,
            northwest: None,
            up: None,
            down: None,
        }
    }
}

impl<T: Copy> Neighbors<T> {
    /// Creates an empty set of exits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, direction: Direction) -> &mut Option<T> {
        match direction {
            Direction::North => &mut self.north,
            Direction::Northeast => &mut self.northeast,
            Direction::East => &mut self.east,
            Direction::Southeast => &mut self.southeast,
            Direction::South => &mut self.south,
            Direction::Southwest => &mut self.southwest,
            Direction::West => &mut self.west,
            Direction::Northwest => &mut self.northwest,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        }
    }

    /// Returns the exit in the given direction.
    #[must_use]
    pub fn get(&self, direction: Direction) -> Option<T> {
        match direction {
            Direction::North => self.north,
            Direction::Northeast => self.northeast,
            Direction::East => self.east,
            Direction::Southeast => self.southeast,
            Direction::South => self.south,
            Direction::Southwest => self.southwest,
            Direction::West => self.west,
            Direction::Northwest => self.northwest,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    /// Sets or clears the exit in the given direction.
    pub fn set(&mut self, direction: Direction, target: Option<T>) {
        *self.slot_mut(direction) = target;
    }

    /// Builder method to set an exit.
    #[must_use]
    pub fn with(mut self, direction: Direction, target: T) -> Self {
        self.set(direction, Some(target));
        self
    }

    /// Iterates over the non-null exits in compass order.
    pub fn iter(&self) -> impl Iterator<Item = (Direction, T)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.get(d).map(|target| (d, target)))
    }

    /// Returns the number of non-null exits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Returns true if there are no exits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maps every non-null exit through a fallible function.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn try_map<U: Copy, E>(
        &self,
        mut f: impl FnMut(Direction, T) -> Result<U, E>,
    ) -> Result<Neighbors<U>, E> {
        let mut mapped = Neighbors::new();
        for (direction, target) in self.iter() {
            mapped.set(direction, Some(f(direction, target)?));
        }
        Ok(mapped)
    }
}
