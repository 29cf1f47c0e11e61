//! Worked scenarios evaluated through the public API.

use solarmine::catalog::MinerCatalog;
use solarmine::engine::{self, compute};
use solarmine::error::InputError;
use solarmine::types::{MinerModel, MinerSpec, SiteInputs};

const EPS: f64 = 1e-9;

#[test]
fn test_single_s21_at_defaults() {
    let catalog = MinerCatalog::standard();
    let report = engine::evaluate(&catalog, &SiteInputs::default()).unwrap();
    let r = report.result;

    assert_eq!(r.total_hashrate_th, 200.0);
    assert_eq!(r.total_power_watts, 3500.0);
    assert!((r.daily_revenue - 16.00).abs() < EPS);
    assert!((r.daily_cost - 10.08).abs() < EPS);
    assert!((r.net_profit - 5.92).abs() < EPS);
    assert!(report.profitable);
    assert!((report.efficiency_j_per_th - 17.5).abs() < EPS);
}

#[test]
fn test_two_m60s() {
    let inputs = SiteInputs {
        miner_model: "Whatsminer M60S".parse().unwrap(),
        miner_qty: 2,
        ..Default::default()
    };
    let report = engine::evaluate(&MinerCatalog::standard(), &inputs).unwrap();
    let r = report.result;

    assert_eq!(r.total_hashrate_th, 372.0);
    assert_eq!(r.total_power_watts, 7200.0);
    assert!((r.daily_revenue - 29.76).abs() < EPS);
    assert!((r.daily_cost - 20.736).abs() < EPS);
    assert!((r.net_profit - 9.024).abs() < EPS);
}

#[test]
fn test_zero_hashprice_flags_unprofitable() {
    let inputs = SiteInputs {
        hashprice_per_th_per_day: 0.0,
        ..Default::default()
    };
    let report = engine::evaluate(&MinerCatalog::standard(), &inputs).unwrap();
    assert_eq!(report.result.daily_revenue, 0.0);
    assert_eq!(report.result.net_profit, -report.result.daily_cost);
    assert!(!report.profitable);
    assert!(report.warning.is_some());
}

#[test]
fn test_free_power_means_all_revenue_is_profit() {
    for &model in MinerModel::ALL {
        let spec = MinerSpec::builtin(model);
        let r = compute(&spec, 10, 0.0, 0.08);
        assert_eq!(r.daily_cost, 0.0);
        assert_eq!(r.net_profit, r.daily_revenue);
    }
}

#[test]
fn test_break_even_grid_price_is_profitable() {
    // S21: revenue 16.00/day, 84 kWh/day -> break-even at 16/84 $/kWh.
    let spec = MinerSpec::builtin(MinerModel::AntminerS21);
    let hashprice = 0.08;
    let break_even = 200.0 * hashprice / 84.0;
    let below = compute(&spec, 1, break_even * 0.99, hashprice);
    let above = compute(&spec, 1, break_even * 1.01, hashprice);
    assert!(below.is_profitable());
    assert!(!above.is_profitable());
}

#[test]
fn test_unknown_model_fails_at_parse() {
    let err = "Bitmain S19".parse::<MinerModel>().unwrap_err();
    assert!(matches!(err, InputError::UnknownModel(_)));
}

#[test]
fn test_substituted_spec_flows_through() {
    let catalog = MinerCatalog::standard()
        .with_spec(MinerModel::WhatsminerM60S, MinerSpec::new(10.0, 500.0));
    let inputs = SiteInputs {
        miner_model: MinerModel::WhatsminerM60S,
        miner_qty: 4,
        ..Default::default()
    };
    let report = engine::evaluate(&catalog, &inputs).unwrap();
    assert_eq!(report.result.total_hashrate_th, 40.0);
    assert_eq!(report.result.total_power_watts, 2000.0);
    assert!((report.efficiency_j_per_th - 50.0).abs() < EPS);
}
