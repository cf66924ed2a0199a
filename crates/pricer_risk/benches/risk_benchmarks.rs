//! Criterion benchmarks for sensitivity table construction.
//!
//! Compares the worker pool against sequential evaluation on the sample
//! scenario grid (11 moves × 6 days).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pricer_core::types::{Date, OptionKind};
use pricer_models::ScenarioParameters;
use pricer_pricing::engines::{BinomialEngine, BinomialScheme, PricingEngine};
use pricer_pricing::{EngineSet, PricingPipeline};
use pricer_risk::grid::{days_axis, move_axis};
use pricer_risk::{ParallelConfig, TableBuilder};

fn sample_scenario() -> ScenarioParameters {
    ScenarioParameters::builder()
        .option_kind(OptionKind::Put)
        .spot_price(15.50)
        .strike_price(20.0)
        .volatility(0.5815)
        .risk_free_rate(0.0152)
        .dividend_rate(0.0135)
        .valuation_date(Date::from_ymd(2021, 10, 6).unwrap())
        .exercise_date(Date::from_ymd(2021, 11, 19).unwrap())
        .days_held(5)
        .spot_move_fraction(0.05)
        .build()
        .unwrap()
}

fn bench_axes(c: &mut Criterion) {
    c.bench_function("axes_200_days_100_pct", |b| {
        b.iter(|| {
            let days = days_axis(black_box(200)).unwrap();
            let moves = move_axis(black_box(1.0)).unwrap();
            days.len() * moves.len()
        });
    });
}

fn bench_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("sensitivity_table");
    group.sample_size(10);
    let scenario = sample_scenario();

    let engines = EngineSet::new(vec![
        PricingEngine::barone_adesi_whaley(),
        PricingEngine::bjerksund_stensland(),
        PricingEngine::Binomial(BinomialEngine::new(BinomialScheme::CoxRossRubinstein, 201)),
    ]);
    let pipeline = PricingPipeline::new(engines);

    let pooled = TableBuilder::new(pipeline.clone());
    let sequential =
        TableBuilder::new(pipeline).with_parallel_config(ParallelConfig::sequential());

    group.bench_function("pooled", |b| {
        b.iter(|| pooled.build(black_box(&scenario)).unwrap());
    });
    group.bench_function("sequential", |b| {
        b.iter(|| sequential.build(black_box(&scenario)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_axes, bench_table);
criterion_main!(benches);
