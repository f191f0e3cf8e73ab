//! Number draw pool: without-replacement draws over `1..=N`.
//!
//! The pool holds the full per-round draw state. Invariants kept by every
//! operation: `available` and `called` partition `1..=total_numbers`,
//! `history` lists the called numbers oldest-first, and `current` equals
//! the most recent history entry (or none before the first draw).

use std::collections::BTreeSet;

use tb_core::rng::DrawRng;

/// Mutable draw state for one round.
#[derive(Debug, Clone)]
pub struct DrawPool {
    total_numbers: u16,
    available: Vec<u16>,
    called: BTreeSet<u16>,
    history: Vec<u16>,
    current: Option<u16>,
}

impl DrawPool {
    /// A full pool over `1..=total_numbers`. `0` gives an always-empty pool.
    pub fn new(total_numbers: u16) -> Self {
        let mut pool = Self {
            total_numbers,
            available: Vec::new(),
            called: BTreeSet::new(),
            history: Vec::new(),
            current: None,
        };
        pool.reset();
        pool
    }

    /// Back to a full pool: nothing called, empty history, no current number.
    pub fn reset(&mut self) {
        self.available = (1..=self.total_numbers).collect();
        self.called.clear();
        self.history.clear();
        self.current = None;
    }

    /// Draw one number uniformly from the available set and move it to the
    /// called set; `None` (without side effects) once the pool is exhausted.
    pub fn draw_next(&mut self, rng: &mut DrawRng) -> Option<u16> {
        let ix = rng.choose_index(self.available.len())?;
        let n = self.available.swap_remove(ix);
        self.called.insert(n);
        self.history.push(n);
        self.current = Some(n);
        debug_assert_eq!(self.history.len(), self.called.len());
        Some(n)
    }

    #[inline]
    pub fn total_numbers(&self) -> u16 {
        self.total_numbers
    }

    #[inline]
    pub fn available_count(&self) -> usize {
        self.available.len()
    }

    /// The most recently drawn number.
    #[inline]
    pub fn current(&self) -> Option<u16> {
        self.current
    }

    /// Called numbers in ascending order.
    #[inline]
    pub fn called(&self) -> &BTreeSet<u16> {
        &self.called
    }

    /// Draw history, oldest first.
    #[inline]
    pub fn history(&self) -> &[u16] {
        &self.history
    }

    /// The most recent `k` draws, newest first (shorter when fewer exist).
    pub fn last_k(&self, k: usize) -> Vec<u16> {
        self.history.iter().rev().take(k).copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_cover_the_universe_exactly_once() {
        let mut pool = DrawPool::new(90);
        let mut rng = DrawRng::from_seed_u64(42);
        let mut seen = BTreeSet::new();
        for _ in 0..90 {
            let n = pool.draw_next(&mut rng).unwrap();
            assert!((1..=90).contains(&n));
            assert!(seen.insert(n), "number {n} drawn twice");
        }
        assert_eq!(pool.available_count(), 0);
        assert_eq!(pool.draw_next(&mut rng), None);
        assert_eq!(seen.len(), 90);
    }

    #[test]
    fn last_k_is_newest_first() {
        let mut pool = DrawPool::new(20);
        let mut rng = DrawRng::from_seed_u64(7);
        let a = pool.draw_next(&mut rng).unwrap();
        let b = pool.draw_next(&mut rng).unwrap();
        let c = pool.draw_next(&mut rng).unwrap();
        assert_eq!(pool.last_k(2), vec![c, b]);
        assert_eq!(pool.last_k(10), vec![c, b, a]);
        assert_eq!(pool.history(), &[a, b, c]);
        assert_eq!(pool.current(), Some(c));
    }

    #[test]
    fn reset_restores_the_full_pool() {
        let mut pool = DrawPool::new(15);
        let mut rng = DrawRng::from_seed_u64(3);
        for _ in 0..5 {
            pool.draw_next(&mut rng);
        }
        assert_eq!(pool.available_count(), 10);
        pool.reset();
        assert_eq!(pool.available_count(), 15);
        assert!(pool.called().is_empty());
        assert_eq!(pool.current(), None);
        assert!(pool.last_k(5).is_empty());
    }

    #[test]
    fn same_seed_gives_the_same_sequence() {
        let mut p1 = DrawPool::new(90);
        let mut p2 = DrawPool::new(90);
        let mut r1 = DrawRng::from_seed_u64(0xA5A5);
        let mut r2 = DrawRng::from_seed_u64(0xA5A5);
        let s1: Vec<u16> = (0..30).filter_map(|_| p1.draw_next(&mut r1)).collect();
        let s2: Vec<u16> = (0..30).filter_map(|_| p2.draw_next(&mut r2)).collect();
        assert_eq!(s1, s2);
        assert_eq!(s1.len(), 30);
    }

    #[test]
    fn zero_sized_pool_never_draws() {
        let mut pool = DrawPool::new(0);
        let mut rng = DrawRng::from_seed_u64(1);
        assert_eq!(pool.draw_next(&mut rng), None);
        assert_eq!(pool.available_count(), 0);
    }
}
