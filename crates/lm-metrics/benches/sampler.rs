use criterion::{Criterion, black_box, criterion_group, criterion_main};
use lm_metrics::rng::Pcg32;
use lm_metrics::sampler::AdaptiveSampler;

fn bench_rng(c: &mut Criterion) {
    let mut rng = Pcg32::new(42, 54);
    c.bench_function("pcg32_next_f32", |b| b.iter(|| black_box(rng.next_f32())));
}

fn bench_window(c: &mut Criterion) {
    c.bench_function("sampler_window_1000_ticks", |b| {
        let mut sampler = AdaptiveSampler::with_seed(5.0, 100, 200.0, 7);
        b.iter(|| {
            sampler.reset(0.0);
            for i in 0..1000_u32 {
                black_box(sampler.should_sample(0.005, f64::from(i) * 0.005));
            }
            black_box(sampler.average())
        });
    });
}

fn bench_plot(c: &mut Criterion) {
    let mut sampler = AdaptiveSampler::with_seed(5.0, 100, 200.0, 7);
    for i in 0..1000_u32 {
        sampler.should_sample(0.005, f64::from(i) * 0.005);
    }
    let avg = sampler.average();
    c.bench_function("sampler_ascii_plot_80", |b| {
        b.iter(|| black_box(sampler.ascii_plot(80, avg)));
    });
}

criterion_group!(benches, bench_rng, bench_window, bench_plot);
criterion_main!(benches);
