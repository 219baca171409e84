//! Configuration of a [`Bimap`] before it is created.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::{Bimap, Compare, Natural};

/// Builds a [`Bimap`] with custom comparators, a fixed priority seed, or preallocated room.
///
///```
/// use bitreap::{Builder, Reversed, Natural};
///
/// let mut map = Builder::new()
///     .left_order(Reversed(Natural))
///     .seed(1488228)
///     .capacity(16)
///     .build();
/// map.insert(1, "one");
/// map.insert(2, "two");
/// assert_eq!(map.iter_left().map(|(l, _)| *l).collect::<Vec<_>>(), vec![2, 1]);
///```
#[derive(Clone, Debug)]
pub struct Builder<CL = Natural, CR = Natural> {
    left: CL,
    right: CR,
    seed: Option<u64>,
    capacity: usize,
}

impl Builder {
    /// Natural order on both sides, priorities seeded from entropy, no preallocation.
    pub fn new() -> Builder {
        Builder {
            left: Natural,
            right: Natural,
            seed: None,
            capacity: 0,
        }
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}

impl<CL, CR> Builder<CL, CR> {
    /// Sets the comparator of the left keys.
    pub fn left_order<C>(self, cmp: C) -> Builder<C, CR> {
        Builder {
            left: cmp,
            right: self.right,
            seed: self.seed,
            capacity: self.capacity,
        }
    }

    /// Sets the comparator of the right keys.
    pub fn right_order<C>(self, cmp: C) -> Builder<CL, C> {
        Builder {
            left: self.left,
            right: cmp,
            seed: self.seed,
            capacity: self.capacity,
        }
    }

    /// Draws the node priorities from a generator seeded with `seed`.
    /// Two maps built with the same seed, and given the same operations,
    /// end up with identically shaped trees.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preallocates room for `capacity` pairs.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build<L, R>(self) -> Bimap<L, R, CL, CR>
    where
        CL: Compare<L>,
        CR: Compare<R>,
    {
        let rng = match self.seed {
            Some(seed) => {
                log::debug!("seeding bimap priorities with {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Bimap::from_parts(self.left, self.right, rng, self.capacity)
    }
}

#[test]
fn seeded_maps_have_the_same_shape() {
    let mut a = Builder::new().seed(7).build();
    let mut b = Builder::new().seed(7).build();
    for i in 0..100 {
        a.insert(i, (i * 13) % 101);
        b.insert(i, (i * 13) % 101);
    }
    assert_eq!(a.arena_links(), b.arena_links());
}

#[test]
fn builder_keeps_comparators() {
    let map: Bimap<i32, i32, _, _> = Builder::new()
        .right_order(crate::Reversed(Natural))
        .build();
    assert!(map.right_comparator().less(&2, &1));
    assert!(map.left_comparator().less(&1, &2));
}
