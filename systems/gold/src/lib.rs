#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure gold distribution planner.
//!
//! Splits a fixed budget into a random number of piles of random size. The
//! planner never touches the world; placing the planned piles onto free cells
//! is the world's job.

use nuggets_core::GoldConfig;
use rand::Rng;

/// Reasons a gold configuration cannot be planned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GoldConfigError {
    /// The configuration allows zero piles.
    #[error("gold must be split into at least one pile")]
    NoPiles,
    /// The minimum pile count exceeds the maximum.
    #[error("minimum pile count {min} exceeds maximum {max}")]
    InvertedBounds {
        /// Configured minimum pile count.
        min: u32,
        /// Configured maximum pile count.
        max: u32,
    },
    /// The budget cannot give every pile at least one unit.
    #[error("gold total {total} cannot cover {max_piles} piles of at least one unit")]
    BudgetTooSmall {
        /// Configured gold budget.
        total: u32,
        /// Configured maximum pile count.
        max_piles: u32,
    },
}

/// Checks that every pile count in the configured range can be satisfied.
pub fn validate(config: &GoldConfig) -> Result<(), GoldConfigError> {
    if config.min_piles() == 0 {
        return Err(GoldConfigError::NoPiles);
    }
    if config.min_piles() > config.max_piles() {
        return Err(GoldConfigError::InvertedBounds {
            min: config.min_piles(),
            max: config.max_piles(),
        });
    }
    if config.total() < config.max_piles() {
        return Err(GoldConfigError::BudgetTooSmall {
            total: config.total(),
            max_piles: config.max_piles(),
        });
    }
    Ok(())
}

/// Splits the configured budget into pile amounts.
///
/// The pile count is drawn uniformly from `[min_piles, max_piles]`. One unit
/// per pile is reserved up front; every pile but the last then draws from
/// `[0, remaining)` and the last pile takes whatever remains, so the amounts
/// always sum to `total` and none is below one.
pub fn plan_piles<R>(config: &GoldConfig, rng: &mut R) -> Result<Vec<u32>, GoldConfigError>
where
    R: Rng + ?Sized,
{
    validate(config)?;

    let pile_count = rng.gen_range(config.min_piles()..=config.max_piles());
    let mut remaining = config.total() - pile_count;
    let mut piles = Vec::with_capacity(usize::try_from(pile_count).unwrap_or(0));

    for _ in 1..pile_count {
        let amount = if remaining == 0 {
            0
        } else {
            rng.gen_range(0..remaining)
        };
        remaining -= amount;
        piles.push(amount + 1);
    }
    piles.push(remaining + 1);

    Ok(piles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_piles() {
        assert_eq!(validate(&GoldConfig::new(10, 0, 3)), Err(GoldConfigError::NoPiles));
    }

    #[test]
    fn rejects_inverted_bounds() {
        assert_eq!(
            validate(&GoldConfig::new(100, 8, 4)),
            Err(GoldConfigError::InvertedBounds { min: 8, max: 4 })
        );
    }

    #[test]
    fn rejects_budget_below_pile_count() {
        assert_eq!(
            validate(&GoldConfig::new(5, 1, 6)),
            Err(GoldConfigError::BudgetTooSmall {
                total: 5,
                max_piles: 6
            })
        );
    }

    #[test]
    fn accepts_budget_equal_to_pile_count() {
        assert_eq!(validate(&GoldConfig::new(6, 1, 6)), Ok(()));
    }
}
