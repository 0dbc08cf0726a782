//! Sell-on fee rule
//!
//! Costs are integer tenths of a million, so halving the profit
//! truncates. A player who has lost value sells at the current price;
//! otherwise half the profit plus one unit is forfeited.
//!
//! Arithmetic runs in `i64`, so no pair of `Cost` values can overflow.

use player_catalog::Cost;

/// Fee withheld when selling at `current` a player bought at `original`
pub fn sell_on_fee(current: Cost, original: Cost) -> i64 {
    if current < original {
        return 0;
    }

    let profit = i64::from(current) - i64::from(original);
    profit / 2 + 1
}

/// Amount recovered by selling at `current` a player bought at `original`
///
/// Only a negative `original` can push the result below `Cost::MIN`;
/// that case saturates.
pub fn selling_price(current: Cost, original: Cost) -> Cost {
    let price = i64::from(current) - sell_on_fee(current, original);
    Cost::try_from(price).unwrap_or(Cost::MIN)
}
