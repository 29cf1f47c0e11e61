//! Shared types for the calculator.
//!
//! Miner hardware, the boundary input record, and the engine's
//! input/result pair. Everything here is plain data; the arithmetic
//! lives in `engine::economics`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::catalog::MinerCatalog;
use crate::error::InputError;

// ---------------------------------------------------------------------------
// Miner hardware
// ---------------------------------------------------------------------------

/// Supported mining hardware models.
///
/// Serializes as the display name; deserializes through `FromStr`, so
/// config files accept the same spellings as the CLI and HTTP query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum MinerModel {
    #[default]
    #[serde(rename = "Antminer S21")]
    AntminerS21,
    #[serde(rename = "Whatsminer M60S")]
    WhatsminerM60S,
}

impl MinerModel {
    /// All known models, in selection-list order.
    pub const ALL: &'static [MinerModel] = &[MinerModel::AntminerS21, MinerModel::WhatsminerM60S];

    /// Display name as shown in the model selector.
    pub fn name(&self) -> &'static str {
        match self {
            MinerModel::AntminerS21 => "Antminer S21",
            MinerModel::WhatsminerM60S => "Whatsminer M60S",
        }
    }

    /// URL/CLI friendly identifier.
    pub fn slug(&self) -> &'static str {
        match self {
            MinerModel::AntminerS21 => "antminer-s21",
            MinerModel::WhatsminerM60S => "whatsminer-m60s",
        }
    }
}

impl fmt::Display for MinerModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parse a model from its display name (case-insensitive) or slug.
impl std::str::FromStr for MinerModel {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        MinerModel::ALL
            .iter()
            .copied()
            .find(|m| m.name().eq_ignore_ascii_case(needle) || m.slug().eq_ignore_ascii_case(needle))
            .ok_or_else(|| InputError::UnknownModel(s.to_string()))
    }
}

impl TryFrom<String> for MinerModel {
    type Error = InputError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Static performance figures for one unit of a miner model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinerSpec {
    /// Hashrate in TH/s (positive).
    pub hashrate_th_per_s: f64,
    /// Wall power draw in watts (positive).
    pub power_watts: f64,
}

impl MinerSpec {
    pub const fn new(hashrate_th_per_s: f64, power_watts: f64) -> Self {
        Self {
            hashrate_th_per_s,
            power_watts,
        }
    }

    /// Manufacturer figures for the supported models.
    pub const fn builtin(model: MinerModel) -> Self {
        match model {
            MinerModel::AntminerS21 => MinerSpec::new(200.0, 3500.0),
            MinerModel::WhatsminerM60S => MinerSpec::new(186.0, 3600.0),
        }
    }

    /// Energy efficiency in joules per terahash (W / TH/s).
    pub fn efficiency_j_per_th(&self) -> f64 {
        self.power_watts / self.hashrate_th_per_s
    }
}

// ---------------------------------------------------------------------------
// Boundary inputs
// ---------------------------------------------------------------------------

/// Everything the user can set on the calculator.
///
/// `solar_size_kw` and `btc_price_usd` are collected and echoed back but
/// are not used by any formula yet: the current model assumes the grid
/// covers 100% of the load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInputs {
    /// Rated solar capacity in kW.
    pub solar_size_kw: f64,
    pub miner_model: MinerModel,
    pub miner_qty: u32,
    /// Grid electricity price in $/kWh.
    pub grid_cost_per_kwh: f64,
    pub btc_price_usd: f64,
    /// Network hashprice in $/TH/day.
    pub hashprice_per_th_per_day: f64,
}

impl Default for SiteInputs {
    fn default() -> Self {
        Self {
            solar_size_kw: 10.0,
            miner_model: MinerModel::AntminerS21,
            miner_qty: 1,
            grid_cost_per_kwh: 0.12,
            btc_price_usd: 95_000.0,
            hashprice_per_th_per_day: 0.08,
        }
    }
}

impl SiteInputs {
    /// Reject inputs outside the ranges the calculator accepts.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.miner_qty < 1 {
            return Err(InputError::InvalidQuantity(i64::from(self.miner_qty)));
        }
        check_non_negative("solar_size_kw", self.solar_size_kw)?;
        check_non_negative("grid_cost_per_kwh", self.grid_cost_per_kwh)?;
        check_non_negative("btc_price_usd", self.btc_price_usd)?;
        check_non_negative("hashprice_per_th_per_day", self.hashprice_per_th_per_day)?;
        Ok(())
    }

    /// Resolve the selected model against `catalog` and build the engine input.
    pub fn calculation_input(&self, catalog: &MinerCatalog) -> CalculationInput {
        CalculationInput {
            miner: *catalog.spec(self.miner_model),
            quantity: self.miner_qty,
            grid_cost_per_kwh: self.grid_cost_per_kwh,
            hashprice_per_th_per_day: self.hashprice_per_th_per_day,
        }
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if value < 0.0 {
        return Err(InputError::NegativeValue { field, value });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Engine input / output
// ---------------------------------------------------------------------------

/// One evaluation's worth of engine input. Built fresh per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationInput {
    pub miner: MinerSpec,
    pub quantity: u32,
    pub grid_cost_per_kwh: f64,
    pub hashprice_per_th_per_day: f64,
}

/// Daily economics of a mining fleet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalculationResult {
    /// Fleet hashrate in TH/s.
    pub total_hashrate_th: f64,
    pub total_power_watts: f64,
    /// USD per day.
    pub daily_revenue: f64,
    /// USD per day of grid electricity.
    pub daily_cost: f64,
    pub net_profit: f64,
}

impl CalculationResult {
    /// Fleet power draw in kW.
    pub fn total_power_kw(&self) -> f64 {
        self.total_power_watts / 1000.0
    }

    /// Break-even counts as profitable.
    pub fn is_profitable(&self) -> bool {
        self.net_profit >= 0.0
    }
}

impl fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.0} TH/s @ {:.0} W | revenue ${:.2}/day | cost ${:.2}/day | net ${:.2}/day",
            self.total_hashrate_th,
            self.total_power_watts,
            self.daily_revenue,
            self.daily_cost,
            self.net_profit,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
