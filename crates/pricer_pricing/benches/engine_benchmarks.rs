//! Criterion benchmarks for the individual engines and a full evaluation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::{Date, OptionKind};
use pricer_models::{MarketModel, ScenarioParameters};
use pricer_pricing::engines::{BinomialEngine, BinomialScheme, FiniteDifferenceEngine};
use pricer_pricing::{EngineSet, PipelineConfig, Priceable, PricingPipeline};

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

fn bench_binomial_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("binomial_crr");
    let scenario = sample_scenario();
    let market = MarketModel::from_scenario(&scenario).unwrap();
    let option = market.american_option(OptionKind::Put, 20.0);

    for steps in [101, 401, 801] {
        let engine = BinomialEngine::new(BinomialScheme::CoxRossRubinstein, steps);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &engine, |b, engine| {
            b.iter(|| engine.price(black_box(&market), black_box(&option)).unwrap());
        });
    }

    group.finish();
}

fn bench_finite_difference(c: &mut Criterion) {
    let scenario = sample_scenario();
    let market = MarketModel::from_scenario(&scenario).unwrap();
    let option = market.american_option(OptionKind::Put, 20.0);
    let engine = FiniteDifferenceEngine::default();

    c.bench_function("finite_difference_default_grid", |b| {
        b.iter(|| engine.price(black_box(&market), black_box(&option)).unwrap());
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);
    let scenario = sample_scenario();

    let sequential = PricingPipeline::new(EngineSet::default());
    let parallel = PricingPipeline::new(EngineSet::default())
        .with_config(PipelineConfig { parallel_engines: true });

    group.bench_function("sequential", |b| {
        b.iter(|| sequential.evaluate(black_box(&scenario)).unwrap());
    });
    group.bench_function("parallel_engines", |b| {
        b.iter(|| parallel.evaluate(black_box(&scenario)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_binomial_steps, bench_finite_difference, bench_pipeline);
criterion_main!(benches);
