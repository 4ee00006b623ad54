use std::collections::BTreeSet;
use tixly::OrderNumber;

pub const TOP_ORDERS: usize = 10;

/// Union of `retained` and `found`, highest first, cut to `limit`.
pub fn select_top(
    retained: &[OrderNumber],
    found: &[OrderNumber],
    limit: usize,
) -> Vec<OrderNumber> {
    retained
        .iter()
        .chain(found)
        .copied()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .take(limit)
        .collect()
}
