//! Multiplayer Elo arithmetic.
//!
//! A player's expected score is the sum of their pairwise win
//! probabilities against every opponent, divided by the number of pairings
//! in the field (`n(n-1)/2`). Deltas are scaled by `n - 1` so that a
//! two-player game reduces to the classic formula.

/// Rating given to a player the first time they are seen.
pub const DEFAULT_RATING: i32 = 1500;

/// Ratings below this use the largest K-factor.
pub const K_TIER_LOW: i32 = 2100;

/// Ratings from `K_TIER_LOW` below this use the middle K-factor.
pub const K_TIER_HIGH: i32 = 2400;

/// K-factor for the given rating.
///
/// ```
/// use outcome_engine::rating::elo::find_k;
///
/// assert_eq!(find_k(2099), 32);
/// assert_eq!(find_k(2100), 24);
/// assert_eq!(find_k(2400), 16);
/// ```
#[must_use]
pub fn find_k(rating: i32) -> i32 {
    if rating < K_TIER_LOW {
        32
    } else if rating < K_TIER_HIGH {
        24
    } else {
        16
    }
}

/// Probability that a player rated `rating` beats one rated `opponent`.
#[must_use]
pub fn pairwise_expectation(rating: i32, opponent: i32) -> f64 {
    1.0 / (1.0 + 10f64.powf(f64::from(opponent - rating) / 400.0))
}

/// Expected score of a player against a field of opponents.
///
/// Returns 0.0 for an empty field.
#[must_use]
pub fn expected_score(rating: i32, opponents: impl IntoIterator<Item = i32>) -> f64 {
    let mut field = 1usize;
    let mut sum = 0.0;
    for opponent in opponents {
        sum += pairwise_expectation(rating, opponent);
        field += 1;
    }
    if field < 2 {
        return 0.0;
    }
    let pairings = (field * (field - 1) / 2) as f64;
    sum / pairings
}

/// Rating change for one player.
///
/// `players` is the number of active players in the game. Rounds half away
/// from zero.
#[must_use]
pub fn rating_delta(k: i32, players: usize, actual: f64, expected: f64) -> i32 {
    let scale = players.saturating_sub(1) as f64;
    (f64::from(k) * scale * (actual - expected)).round() as i32
}
