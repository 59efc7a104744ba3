//! Free-transfer and hit accounting.
//!
//! Free transfers roll over up to a cap; transfers beyond the free
//! allowance cost a fixed points hit each. The ranking adjustment rewards
//! banking and penalizes spending flexibility so that a higher
//! free-transfer value favors conservative plans. It never reaches the
//! display score.

use crate::squad::SquadRules;

/// Accounting for one gameweek's transfers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransferCost {
    /// Free transfers available next gameweek.
    pub ft_after: u8,
    /// Transfers beyond the free allowance.
    pub hits: u32,
    /// Points deducted for those hits.
    pub hit_cost: u32,
    /// Ranking-only score adjustment.
    pub ranking_adjustment: f64,
}

/// Cost of making `transfers` moves with `free_transfers` available.
pub fn transfer_cost(
    transfers: usize,
    free_transfers: u8,
    rules: &SquadRules,
    ft_value: f64,
) -> TransferCost {
    let cap = rules.max_free_transfers;
    let free = free_transfers.min(cap) as usize;

    if transfers == 0 {
        return TransferCost {
            ft_after: (free_transfers.saturating_add(1)).min(cap),
            hits: 0,
            hit_cost: 0,
            ranking_adjustment: ft_value,
        };
    }

    if transfers <= free {
        return TransferCost {
            ft_after: ((free - transfers + 1) as u8).min(cap),
            hits: 0,
            hit_cost: 0,
            ranking_adjustment: -(transfers as f64) * ft_value,
        };
    }

    let hits = (transfers - free) as u32;
    TransferCost {
        ft_after: 1,
        hits,
        hit_cost: hits * rules.hit_cost,
        ranking_adjustment: -(free as f64) * ft_value - ft_value * hits as f64,
    }
}

/// Wildcard and free-hit weeks neither use nor bank a free transfer.
pub fn chip_cost(free_transfers: u8) -> TransferCost {
    TransferCost {
        ft_after: free_transfers,
        hits: 0,
        hit_cost: 0,
        ranking_adjustment: 0.0,
    }
}
