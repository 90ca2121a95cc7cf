use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec3;
use std::f32::consts::PI;
use trophy_showcase::geometry::{fragment, solidify, FragmentOptions, FragmentProfile, SourceMesh};
use trophy_showcase::math::FragmentRng;
use trophy_showcase::scene::{assemble, AssemblyOptions, AssetBarrier};

/// Indexed UV sphere with roughly `2 * rings * segments` triangles
fn sphere_mesh(rings: u32, segments: u32) -> SourceMesh {
    let mut positions = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for r in 0..=rings {
        let phi = r as f32 / rings as f32 * PI;
        for s in 0..=segments {
            let theta = s as f32 / segments as f32 * 2.0 * PI;
            positions.push(Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin()));
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    SourceMesh::indexed(positions, indices)
}

/// Benchmark: fragmenting meshes of growing size with both profiles
fn bench_fragment_profiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("fragment");

    for rings in [16u32, 64, 128].iter() {
        let mesh = sphere_mesh(*rings, *rings * 2);
        let triangles = mesh.triangle_count();

        for profile in [FragmentProfile::Flat, FragmentProfile::Shatter] {
            let options = FragmentOptions {
                profile,
                ..FragmentOptions::default()
            };
            let id = BenchmarkId::new(format!("{:?}", profile).to_lowercase(), triangles);
            group.bench_with_input(id, &mesh, |b, mesh| {
                b.iter(|| {
                    let mut rng = FragmentRng::new(7);
                    black_box(fragment(mesh.clone(), &options, &mut rng))
                });
            });
        }
    }

    group.finish();
}

/// Benchmark: smooth-normal plinth expansion
fn bench_solidify(c: &mut Criterion) {
    let mesh = sphere_mesh(64, 128);
    c.bench_function("solidify_64x128", |b| {
        b.iter(|| black_box(solidify(mesh.clone())));
    });
}

/// Benchmark: full assembly (fragment, solidify, merge, normalize)
fn bench_assemble(c: &mut Criterion) {
    let body = sphere_mesh(64, 128);
    let plinth = sphere_mesh(8, 16);

    c.bench_function("assemble_trophy", |b| {
        b.iter(|| {
            let (mut barrier, body_tx, plinth_tx) = AssetBarrier::new();
            body_tx.send(Ok(vec![body.clone()])).ok();
            plinth_tx.send(Ok(vec![plinth.clone()])).ok();
            let settled = barrier.poll();
            let mut rng = FragmentRng::new(7);
            black_box(settled.and_then(|s| assemble(s, &AssemblyOptions::default(), &mut rng)))
        });
    });
}

criterion_group!(benches, bench_fragment_profiles, bench_solidify, bench_assemble);
criterion_main!(benches);
