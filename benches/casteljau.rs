use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use smallvec::smallvec;

use bezfig::{ControlPolygon, Point};

fn quintic() -> ControlPolygon {
    ControlPolygon(smallvec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 5.0),
        Point::new(3.0, 7.0),
        Point::new(6.0, 7.0),
        Point::new(8.0, 5.0),
        Point::new(9.0, 0.0),
    ])
}

fn eval(c: &mut Criterion) {
    let polygon = quintic();
    c.bench_function("eval degree 5", |b| {
        b.iter(|| black_box(&polygon).eval(black_box(0.37)))
    });
}

fn trace(c: &mut Criterion) {
    let polygon = quintic();
    c.bench_function("trace 3000 samples", |b| {
        b.iter(|| {
            black_box(&polygon)
                .sample(3000)
                .map(|(_, p)| p.x)
                .sum::<f64>()
        })
    });
}

criterion_group!(benches, eval, trace);
criterion_main!(benches);
