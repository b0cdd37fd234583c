use abonilo::chinese::{LunarDate, Month, solar_to_lunar};
use abonilo::{Date, Period, PeriodUnit};
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn conversion_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("lunar_conversion");
    group.bench_function("solar_to_lunar", |b| {
        b.iter(|| solar_to_lunar(black_box(2023), black_box(3), black_box(22)))
    });
    let lunar = LunarDate::new(2023, Month::Leap(2), 15);
    group.bench_function("lunar_to_solar", |b| b.iter(|| black_box(&lunar).to_date()));
    group.finish();
}

fn period_bench(c: &mut Criterion) {
    let lunar = LunarDate::new(2023, Month::Common(1), 30);
    let today = Date::from_gregorian(2023, 1, 1).expect("valid date");

    let mut group = c.benchmark_group("lunar_period");
    for unit in [PeriodUnit::Day, PeriodUnit::Month, PeriodUnit::Year] {
        let period = Period::new(1, unit);
        group.bench_function(format!("add_{unit}"), |b| {
            b.iter(|| black_box(&lunar).add_period(black_box(period)))
        });
    }
    group.bench_function("days_until", |b| {
        b.iter(|| black_box(&lunar).days_until(black_box(today)))
    });
    group.finish();
}

criterion_group!(benches, conversion_bench, period_bench);
criterion_main!(benches);
