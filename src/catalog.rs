//! Miner catalog — immutable lookup from model to hardware spec.
//!
//! The catalog is owned by whoever drives an evaluation (the dashboard
//! state, the CLI) and handed to the engine by reference. Lookup is total
//! over `MinerModel`, so an unknown model can only ever fail at parse time.

use serde::Serialize;

use crate::types::{MinerModel, MinerSpec};

/// One row of the catalog, as exposed to the boundary.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub model: MinerModel,
    pub hashrate_th_per_s: f64,
    pub power_watts: f64,
    pub efficiency_j_per_th: f64,
}

/// One spec per `MinerModel` variant, indexed by position in `MinerModel::ALL`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinerCatalog {
    specs: [MinerSpec; 2],
}

fn slot(model: MinerModel) -> usize {
    match model {
        MinerModel::AntminerS21 => 0,
        MinerModel::WhatsminerM60S => 1,
    }
}

impl MinerCatalog {
    /// Catalog with manufacturer figures for every supported model.
    pub fn standard() -> Self {
        Self {
            specs: [
                MinerSpec::builtin(MinerModel::AntminerS21),
                MinerSpec::builtin(MinerModel::WhatsminerM60S),
            ],
        }
    }

    /// Copy of this catalog with `model` mapped to `spec` instead.
    pub fn with_spec(mut self, model: MinerModel, spec: MinerSpec) -> Self {
        self.specs[slot(model)] = spec;
        self
    }

    /// Spec for `model`.
    pub fn spec(&self, model: MinerModel) -> &MinerSpec {
        &self.specs[slot(model)]
    }

    /// All entries in `MinerModel::ALL` order.
    pub fn entries(&self) -> Vec<CatalogEntry> {
        MinerModel::ALL
            .iter()
            .map(|&model| {
                let spec = self.spec(model);
                CatalogEntry {
                    model,
                    hashrate_th_per_s: spec.hashrate_th_per_s,
                    power_watts: spec.power_watts,
                    efficiency_j_per_th: spec.efficiency_j_per_th(),
                }
            })
            .collect()
    }
}

impl Default for MinerCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
