//! Daily mining economics.
//!
//! Fleet hashrate and power scale linearly with quantity. Revenue is
//! hashrate times network hashprice; cost assumes the grid supplies the
//! full load for 24 hours.

use tracing::debug;

use crate::types::{CalculationInput, CalculationResult, MinerSpec};

/// Hours of operation per day (100% uptime on grid fallback).
pub const HOURS_PER_DAY: f64 = 24.0;

const WATTS_PER_KW: f64 = 1000.0;

/// Compute the daily economics of `quantity` units of `spec`.
///
/// Total over all real inputs: performs no validation and cannot fail.
pub fn compute(spec: &MinerSpec, quantity: u32, grid_cost_per_kwh: f64, hashprice: f64) -> CalculationResult {
    let qty = f64::from(quantity);

    let total_hashrate_th = spec.hashrate_th_per_s * qty;
    let total_power_watts = spec.power_watts * qty;
    let daily_revenue = total_hashrate_th * hashprice;
    let daily_cost = (total_power_watts / WATTS_PER_KW) * HOURS_PER_DAY * grid_cost_per_kwh;
    let net_profit = daily_revenue - daily_cost;

    let result = CalculationResult {
        total_hashrate_th,
        total_power_watts,
        daily_revenue,
        daily_cost,
        net_profit,
    };
    debug!(quantity, %result, "Economics computed");
    result
}

impl CalculationInput {
    pub fn evaluate(&self) -> CalculationResult {
        compute(
            &self.miner,
            self.quantity,
            self.grid_cost_per_kwh,
            self.hashprice_per_th_per_day,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
