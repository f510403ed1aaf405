use criterion::{Criterion, black_box, criterion_group, criterion_main};
use planetoid_mesh::*;

fn bench_icosphere(c: &mut Criterion) {
    c.bench_function("icosphere_5", |bencher| {
        bencher.iter(|| icosphere(black_box(1.0), black_box(5)))
    });
}

fn bench_uv_sphere(c: &mut Criterion) {
    c.bench_function("uv_sphere_256x128", |bencher| {
        bencher.iter(|| uv_sphere(black_box(1.0), black_box(256), black_box(128)))
    });
}

fn bench_compute_normals(c: &mut Criterion) {
    let mut mesh = icosphere(1.0, 5).unwrap();
    c.bench_function("compute_normals_icosphere_5", |bencher| {
        bencher.iter(|| compute_normals(black_box(&mut mesh)))
    });
}

fn bench_expand_triangles(c: &mut Criterion) {
    let mesh = uv_sphere(1.0, 256, 128).unwrap();
    c.bench_function("expand_triangles_256x128", |bencher| {
        bencher.iter(|| expand_triangles(black_box(&mesh)))
    });
}

criterion_group!(
    benches,
    bench_icosphere,
    bench_uv_sphere,
    bench_compute_normals,
    bench_expand_triangles
);
criterion_main!(benches);
