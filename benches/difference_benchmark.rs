use chrono::Duration;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use daydiff::{count_day_by_day, difference, from_ymd, CalendarDate, HolidaySet, WeekdaySet};

const PAIRS: i64 = 2000;
const START_DAY_OFFSET: i64 = 6000;

/// 2000 ranges starting 6000 days before the anchor, each spanning `i % 30`
/// days, with Monday to Friday allowed.
fn inputs() -> (Vec<(CalendarDate, CalendarDate)>, WeekdaySet, HolidaySet) {
    let anchor = from_ymd(2024, 6, 1).unwrap();
    let pairs = (0..PAIRS)
        .map(|i| {
            let start = anchor - Duration::days(START_DAY_OFFSET - i);
            (start, start + Duration::days(i % 30))
        })
        .collect();
    let excluded = WeekdaySet::from_sunday_numbers(&[1, 2, 3, 4, 5])
        .unwrap()
        .complement();
    (pairs, excluded, HolidaySet::new())
}

fn closed_form(c: &mut Criterion) {
    let (pairs, weekdays, holidays) = inputs();
    c.bench_function("difference 2000 pairs", |b| {
        b.iter(|| {
            for (start, end) in pairs.iter() {
                black_box(difference(*start, *end, &weekdays, &holidays));
            }
        });
    });
}

fn day_by_day(c: &mut Criterion) {
    let (pairs, weekdays, holidays) = inputs();
    c.bench_function("count_day_by_day 2000 pairs", |b| {
        b.iter(|| {
            for (start, end) in pairs.iter() {
                black_box(count_day_by_day(*start, *end, &weekdays, &holidays));
            }
        });
    });
}

fn with_holidays(c: &mut Criterion) {
    let (pairs, weekdays, _) = inputs();
    let holidays = HolidaySet::parse(&["*-01-01", "*-07-04", "*-12-25", "2008-11-27"]).unwrap();
    c.bench_function("difference 2000 pairs with holidays", |b| {
        b.iter(|| {
            for (start, end) in pairs.iter() {
                black_box(difference(*start, *end, &weekdays, &holidays));
            }
        });
    });
}

criterion_group!(benches, closed_form, day_by_day, with_holidays);
criterion_main!(benches);
