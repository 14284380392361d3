use criterion::{Criterion, black_box, criterion_group, criterion_main};
use multical::{
    Calendar, GregorianDate, HebrewDate, Jdn, JulianDate, JulianDay, LunarDate, PersianDate,
    Reckoning, hebrew, persian,
};

const JDN: i64 = 2_460_333;

fn from_jdn_bench(c: &mut Criterion) {
    let jdn = Jdn::new(JDN);

    let mut group = c.benchmark_group("from_jdn");
    group.bench_function("gregorian", |b| {
        b.iter(|| GregorianDate::from_jdn(black_box(jdn)))
    });
    group.bench_function("julian", |b| b.iter(|| JulianDate::from_jdn(black_box(jdn))));
    group.bench_function("hebrew", |b| b.iter(|| HebrewDate::from_jdn(black_box(jdn))));
    group.bench_function("persian", |b| b.iter(|| PersianDate::from_jdn(black_box(jdn))));
    group.bench_function("lunar", |b| b.iter(|| LunarDate::from_jdn(black_box(jdn))));
    group.finish();
}

fn to_jdn_bench(c: &mut Criterion) {
    let jdn = Jdn::new(JDN);
    let (Ok(hebrew), Ok(persian), Ok(lunar)) = (
        HebrewDate::from_jdn(jdn),
        PersianDate::from_jdn(jdn),
        LunarDate::from_jdn(jdn),
    ) else {
        return;
    };

    let mut group = c.benchmark_group("to_jdn");
    group.bench_function("hebrew", |b| b.iter(|| black_box(hebrew).to_jdn()));
    group.bench_function("persian", |b| b.iter(|| black_box(persian).to_jdn()));
    group.bench_function("lunar", |b| b.iter(|| black_box(lunar).to_jdn()));
    group.finish();
}

fn year_tables_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("year_tables");
    group.bench_function("hebrew_year_start", |b| {
        b.iter(|| hebrew::YearStart::compute(black_box(5784)))
    });
    group.bench_function("persian_year_containing", |b| {
        b.iter(|| persian::year_containing(black_box(Jdn::new(JDN))))
    });
    group.finish();
}

fn julian_day_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("julian_day");
    group.bench_function("detect_and_civil", |b| {
        b.iter(|| {
            JulianDay::detect(black_box(2_460_333.051_562_5))
                .map(|jd| jd.to_civil(Reckoning::Historical))
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    from_jdn_bench,
    to_jdn_bench,
    year_tables_bench,
    julian_day_bench
);
criterion_main!(benches);
