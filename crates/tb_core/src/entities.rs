//! Prize-domain entities: priority levels, categories, the registry, winners.

use crate::errors::CoreError;
use crate::tokens::{CategoryId, WinnerId};
use alloc::collections::BTreeSet;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tie-break ordinal for allocation corrections. Never a weight: two
/// categories with equal rounding state are adjusted in this order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PriorityLevel {
    Ultimate,
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    /// Total order used by the allocator: Ultimate=0 … Low=3.
    pub const fn sort_rank(self) -> u8 {
        match self {
            PriorityLevel::Ultimate => 0,
            PriorityLevel::High => 1,
            PriorityLevel::Medium => 2,
            PriorityLevel::Low => 3,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PriorityLevel::Ultimate => "ultimate",
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
            PriorityLevel::Low => "low",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityLevel {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ultimate" => Ok(PriorityLevel::Ultimate),
            "high" => Ok(PriorityLevel::High),
            "medium" => Ok(PriorityLevel::Medium),
            "low" => Ok(PriorityLevel::Low),
            _ => Err(CoreError::InvalidPriority),
        }
    }
}

/// One configured prize category. Immutable for the duration of a session.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrizeCategory {
    pub id: CategoryId,
    pub name: String,
    pub description: String,
    pub enabled: bool,
    pub priority: PriorityLevel,
    /// Whole-percent share of the pool. Direct percentage; weights are not
    /// renormalized over the enabled subset.
    pub weight_pct: u32,
    /// Display position and secondary allocation tie-break.
    pub display_order: u32,
}

impl PrizeCategory {
    /// Participates in allocation: enabled with a positive weight.
    pub fn is_funded(&self) -> bool {
        self.enabled && self.weight_pct > 0
    }
}

/// Validated, ordered category configuration. Ids are unique.
///
/// Serializes for digests/artifacts; construction always goes through
/// `new` (or `standard`) so the uniqueness check cannot be bypassed.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PrizeRegistry {
    categories: Vec<PrizeCategory>,
}

impl PrizeRegistry {
    /// Construct from configured categories, rejecting duplicate ids.
    /// An empty registry is allowed (allocation yields an empty mapping).
    pub fn new(categories: Vec<PrizeCategory>) -> Result<Self, CoreError> {
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for c in &categories {
            if !seen.insert(c.id.as_str()) {
                return Err(CoreError::DuplicateCategory);
            }
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[PrizeCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn get(&self, id: &CategoryId) -> Option<&PrizeCategory> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Enabled categories sorted ascending by `display_order`; the sort is
    /// stable, so equal orders keep configured order.
    pub fn enabled_in_display_order(&self) -> Vec<&PrizeCategory> {
        let mut v: Vec<&PrizeCategory> =
            self.categories.iter().filter(|c| c.enabled).collect();
        v.sort_by_key(|c| c.display_order);
        v
    }

    /// The built-in eleven-category configuration (weights sum to 100).
    pub fn standard() -> Self {
        let categories = STANDARD_CATEGORIES
            .iter()
            .map(|&(id, name, description, priority, weight_pct, display_order)| PrizeCategory {
                id: CategoryId::from_static(id),
                name: name.to_string(),
                description: description.to_string(),
                enabled: true,
                priority,
                weight_pct,
                display_order,
            })
            .collect();
        Self { categories }
    }
}

type SeedRow = (&'static str, &'static str, &'static str, PriorityLevel, u32, u32);

const STANDARD_CATEGORIES: [SeedRow; 11] = [
    ("full-house", "Full House 1", "The first player to mark all numbers on their ticket.", PriorityLevel::Ultimate, 30, 10),
    ("full-house-2", "Full House 2", "The second player to mark all numbers on their ticket.", PriorityLevel::High, 15, 11),
    ("first-line", "First Line", "The first player to mark all numbers in the first row.", PriorityLevel::Medium, 7, 2),
    ("second-line", "Second Line", "The first player to mark all numbers in the second row.", PriorityLevel::Medium, 7, 3),
    ("third-line", "Third Line", "The first player to mark all numbers in the third row.", PriorityLevel::Medium, 7, 4),
    ("fourth-line", "Fourth Line", "The first player to mark all numbers in the fourth row.", PriorityLevel::Medium, 7, 5),
    ("fifth-line", "Fifth Line", "The first player to mark all numbers in the fifth row.", PriorityLevel::Medium, 7, 6),
    ("sixth-line", "Sixth Line", "The first player to mark all numbers in the sixth row.", PriorityLevel::Medium, 7, 7),
    ("four-corners", "Four Corners", "The first player to mark the four corner numbers.", PriorityLevel::Medium, 8, 8),
    ("early-seven", "Early Seven", "The first player to mark any seven numbers.", PriorityLevel::Low, 3, 1),
    ("pairs", "Three Pairs", "The first player to strike three pairs.", PriorityLevel::Low, 2, 9),
];

/// A declared winner. Free text; the prize label need not match a registry id.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Winner {
    pub id: WinnerId,
    pub prize: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_round_trip_and_rank() {
        for p in [
            PriorityLevel::Ultimate,
            PriorityLevel::High,
            PriorityLevel::Medium,
            PriorityLevel::Low,
        ] {
            assert_eq!(p.as_str().parse::<PriorityLevel>().unwrap(), p);
        }
        assert!("urgent".parse::<PriorityLevel>().is_err());
        assert!(PriorityLevel::Ultimate.sort_rank() < PriorityLevel::High.sort_rank());
        assert!(PriorityLevel::High.sort_rank() < PriorityLevel::Medium.sort_rank());
        assert!(PriorityLevel::Medium.sort_rank() < PriorityLevel::Low.sort_rank());
    }

    #[test]
    fn standard_registry_shape() {
        let reg = PrizeRegistry::standard();
        assert_eq!(reg.len(), 11);
        let total: u32 = reg.categories().iter().map(|c| c.weight_pct).sum();
        assert_eq!(total, 100);
        assert!(reg.categories().iter().all(|c| c.enabled));
    }

    #[test]
    fn display_order_sorts_enabled_subset() {
        let reg = PrizeRegistry::standard();
        let ordered = reg.enabled_in_display_order();
        assert_eq!(ordered.first().map(|c| c.id.as_str()), Some("early-seven"));
        assert_eq!(ordered.last().map(|c| c.id.as_str()), Some("full-house-2"));
        assert!(ordered.windows(2).all(|w| w[0].display_order <= w[1].display_order));
    }

    #[test]
    fn duplicate_ids_rejected() {
        let mut cats = PrizeRegistry::standard().categories().to_vec();
        let mut dup = cats[0].clone();
        dup.name = "Copy".to_string();
        cats.push(dup);
        assert_eq!(PrizeRegistry::new(cats), Err(CoreError::DuplicateCategory));
    }

    #[test]
    fn lookup_by_id() {
        let reg = PrizeRegistry::standard();
        let id: CategoryId = "four-corners".parse().unwrap();
        assert_eq!(reg.get(&id).map(|c| c.weight_pct), Some(8));
    }
}
