//! Headless growth run: config mapping, a recording sink and the tick loop.

use planetoid_config::{CarveSide, Config, GrowthConfig, RunConfig, ShapeKind, SphereConfig};
use planetoid_mesh::{Mesh, MeshBuffers, MeshError, MeshSink, Tessellation, sync_mesh, tessellate};
use planetoid_terrain::{
    CarveConvention, DeformParams, FloorParams, GrowthParams, GrowthPhase, GrowthSchedule,
    TerrainError,
};
use tracing::{debug, info};

/// Anything that can stop a run before the first tick.
#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error("mesh: {0}")]
    Mesh(#[from] MeshError),
    #[error("terrain: {0}")]
    Terrain(#[from] TerrainError),
}

/// Tessellation selected by the `sphere` section.
pub fn tessellation_for(sphere: &SphereConfig) -> Tessellation {
    match sphere.shape {
        ShapeKind::UvSphere => Tessellation::UvSphere {
            radius: sphere.radius,
            longitude_segments: sphere.longitude_segments,
            latitude_rings: sphere.latitude_rings,
        },
        ShapeKind::Icosphere => Tessellation::Icosphere {
            radius: sphere.radius,
            subdivisions: sphere.subdivisions,
        },
    }
}

/// Growth parameters from the `growth` section. Validation happens when the
/// schedule is built.
pub fn growth_params(growth: &GrowthConfig) -> GrowthParams {
    let convention = match growth.carve_side {
        CarveSide::OutwardBelow => CarveConvention::OutwardBelow,
        CarveSide::OutwardAbove => CarveConvention::OutwardAbove,
    };
    GrowthParams {
        iterations: growth.iterations,
        iterations_per_tick: growth.iterations_per_tick,
        initial_scale: growth.initial_scale,
        decay: growth.decay,
        min_scale: growth.min_scale,
        deform: DeformParams {
            step: growth.step,
            plane_epsilon: growth.plane_epsilon,
            offset_range: growth.offset_range,
            convention,
        },
        floor: FloorParams {
            ratio: growth.floor.ratio,
            jitter: growth.floor.jitter,
        },
    }
}

/// Stand-in for a GPU upload: records what it was handed.
#[derive(Debug, Default)]
pub struct HeadlessSink {
    pub uploads: usize,
    pub bytes_uploaded: usize,
    pub last_vertex_count: usize,
    pub last_index_count: usize,
}

impl MeshSink for HeadlessSink {
    fn upload(&mut self, buffers: MeshBuffers<'_>) {
        self.uploads += 1;
        self.bytes_uploaded += size_of_val(buffers.positions)
            + size_of_val(buffers.normals)
            + size_of_val(buffers.indices);
        self.last_vertex_count = buffers.positions.len() / 3;
        self.last_index_count = buffers.indices.len();
    }
}

/// What a finished run looked like.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub ticks: u32,
    pub phase: GrowthPhase,
    pub uploads: usize,
    pub radius_range: Option<(f32, f32)>,
}

/// Drive `schedule` until it settles or `run.max_ticks` elapses, syncing the
/// mesh into `sink` every `run.sync_interval_ticks` ticks and once at the end.
pub fn drive<S: MeshSink>(
    mesh: &mut Mesh,
    schedule: &mut GrowthSchedule,
    run: &RunConfig,
    sink: &mut S,
) -> RunSummary {
    let interval = run.sync_interval_ticks.max(1);
    let mut uploads = usize::from(sync_mesh(mesh, sink));
    let mut ticks = 0u32;
    let mut phase = schedule.phase();

    while phase != GrowthPhase::Settled && (run.max_ticks == 0 || ticks < run.max_ticks) {
        phase = schedule.tick(mesh);
        ticks += 1;
        if ticks % interval == 0 && sync_mesh(mesh, sink) {
            uploads += 1;
            debug!(ticks, scale = schedule.displacement_scale(), "mesh synced");
        }
    }
    if sync_mesh(mesh, sink) {
        uploads += 1;
    }

    RunSummary {
        ticks,
        phase,
        uploads,
        radius_range: mesh.radius_range(),
    }
}

/// Build the mesh and schedule from `config` and run them headless.
pub fn run(config: &Config) -> Result<(RunSummary, HeadlessSink), DemoError> {
    let tessellation = tessellation_for(&config.sphere);
    let mut mesh = tessellate(&tessellation)?;
    info!(
        vertices = mesh.vertex_count(),
        triangles = mesh.triangle_count(),
        shape = ?config.sphere.shape,
        "sphere tessellated"
    );

    let mut schedule = GrowthSchedule::new(growth_params(&config.growth), config.growth.seed)?;
    let mut sink = HeadlessSink::default();
    let summary = drive(&mut mesh, &mut schedule, &config.run, &mut sink);
    Ok((summary, sink))
}
