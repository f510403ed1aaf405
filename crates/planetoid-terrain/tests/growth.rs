//! End-to-end growth runs over real tessellated meshes.

use planetoid_mesh::{Mesh, MeshBuffers, MeshSink, icosphere, sync_mesh, uv_sphere};
use planetoid_terrain::{GrowthParams, GrowthPhase, GrowthSchedule};

#[derive(Default)]
struct CountingSink {
    uploads: usize,
    last_vertex_floats: usize,
}

impl MeshSink for CountingSink {
    fn upload(&mut self, buffers: MeshBuffers<'_>) {
        self.uploads += 1;
        self.last_vertex_floats = buffers.positions.len();
    }
}

fn run_to_completion(mesh: &mut Mesh, params: GrowthParams, seed: u64) -> GrowthSchedule {
    let mut schedule = GrowthSchedule::new(params, seed).unwrap();
    let mut ticks = 0;
    while schedule.tick(mesh) != GrowthPhase::Settled {
        ticks += 1;
        assert!(ticks < 100_000, "growth never settled");
    }
    schedule
}

#[test]
fn no_vertex_below_floor_after_settling() {
    let mut mesh = icosphere(1.0, 3).unwrap();
    let params = GrowthParams {
        iterations: 1_500,
        decay: 1.0,
        ..GrowthParams::default()
    };

    let schedule = run_to_completion(&mut mesh, params, 42);
    let floor = schedule.deformer().floor_radius().unwrap();
    assert!((floor - 0.997).abs() < 1e-6);

    let (min, max) = mesh.radius_range().unwrap();
    assert!(min >= floor, "min radius {min} below floor {floor}");
    assert!(max > 1.0, "growth should push some vertices outward");
}

#[test]
fn same_seed_same_terrain() {
    let params = GrowthParams {
        iterations: 300,
        ..GrowthParams::default()
    };

    let mut a = uv_sphere(1.0, 24, 12).unwrap();
    let mut b = uv_sphere(1.0, 24, 12).unwrap();
    run_to_completion(&mut a, params, 7);
    run_to_completion(&mut b, params, 7);
    assert_eq!(a.vertices(), b.vertices());

    let mut c = uv_sphere(1.0, 24, 12).unwrap();
    run_to_completion(&mut c, params, 8);
    assert_ne!(a.vertices(), c.vertices());
}

#[test]
fn renderer_syncs_once_per_dirty_tick() {
    let mut mesh = icosphere(2.0, 2).unwrap();
    let params = GrowthParams {
        iterations: 20,
        ..GrowthParams::default()
    };
    let mut schedule = GrowthSchedule::new(params, 3).unwrap();
    let mut sink = CountingSink::default();

    assert!(sync_mesh(&mut mesh, &mut sink));
    let mut ticks = 0;
    loop {
        let phase = schedule.tick(&mut mesh);
        ticks += 1;
        assert!(mesh.is_dirty());
        assert!(sync_mesh(&mut mesh, &mut sink));
        assert!(!sync_mesh(&mut mesh, &mut sink), "second sync must be a no-op");
        if phase == GrowthPhase::Settled {
            break;
        }
    }

    assert_eq!(sink.uploads, ticks + 1);
    assert_eq!(sink.last_vertex_floats, mesh.vertex_count() * 3);

    // Settled schedules leave the mesh clean.
    schedule.tick(&mut mesh);
    assert!(!sync_mesh(&mut mesh, &mut sink));
}

#[test]
fn radius_scales_floor() {
    let mut mesh = icosphere(10.0, 2).unwrap();
    let params = GrowthParams {
        iterations: 0,
        ..GrowthParams::default()
    };
    let schedule = run_to_completion(&mut mesh, params, 1);
    assert!((schedule.deformer().floor_radius().unwrap() - 9.97).abs() < 1e-4);
}
