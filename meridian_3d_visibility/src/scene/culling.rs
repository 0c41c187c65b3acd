/// Culling pass: per-frame visibility on a dedicated worker thread.
///
/// One worker per `CullingPass` instance, alive for the pass's lifetime.
/// The handoff is a single-producer/single-consumer rendezvous over two
/// bounded(1) channels: `start_pass` moves the frame data (octree + camera)
/// to the worker, `wait` blocks until the worker hands it back with the
/// results. Moving ownership through the channel makes the aliasing
/// contract ("do not mutate the tree or frustum between start and wait")
/// a compile-time fact instead of a documentation promise.
///
/// Exactly one pass may be in flight at a time; `start_pass` while one is
/// running, or `wait` without a prior `start_pass`, is a caller bug and
/// asserts.

use std::thread::{self, JoinHandle};
use crossbeam::channel::{bounded, Receiver, Sender};
use crate::camera::{Camera, Frustum};
use crate::geometry::Obb;
use crate::scene::{NodeId, Octree, SceneObject};
use crate::{engine_info, engine_trace};

const LOG_SOURCE: &str = "meridian3d::CullingPass";

/// Everything one culling pass reads: the frame's octree and camera.
///
/// Ownership moves into the pass at `start_pass` and comes back out of
/// [`PassOutput`] at `wait`.
pub struct FrameInput {
    /// The scene's spatial index
    pub tree: Octree,
    /// The camera whose world frustum decides visibility
    pub camera: Camera,
}

/// Result of one culling pass, returned by [`CullingPass::wait`].
pub struct PassOutput {
    /// The octree, with per-object VISIBLE flags rewritten
    pub tree: Octree,
    /// The camera handed to `start_pass`, unchanged
    pub camera: Camera,
    /// Non-empty leaves whose cube survived the frustum walk, in the order
    /// the walk visited them (input for the draw batcher)
    pub visible_leaves: Vec<NodeId>,
    /// Number of objects flagged visible this pass
    pub visible_objects: usize,
}

/// Owns the culling worker thread and the rendezvous channels.
pub struct CullingPass {
    /// None only after Drop started tearing the worker down
    job_tx: Option<Sender<FrameInput>>,
    result_rx: Receiver<PassOutput>,
    worker: Option<JoinHandle<()>>,
    in_flight: bool,
}

impl CullingPass {
    /// Spawn the worker thread. It idles on the start signal until the
    /// first `start_pass`.
    pub fn new() -> Self {
        let (job_tx, job_rx) = bounded::<FrameInput>(1);
        let (result_tx, result_rx) = bounded::<PassOutput>(1);

        let worker = thread::Builder::new()
            .name("culling-pass".to_string())
            .spawn(move || worker_loop(job_rx, result_tx))
            .expect("failed to spawn culling worker thread");

        engine_info!(LOG_SOURCE, "culling worker started");

        Self {
            job_tx: Some(job_tx),
            result_rx,
            worker: Some(worker),
            in_flight: false,
        }
    }

    /// Hand this frame's data to the worker and release the start signal.
    ///
    /// Returns immediately; the render thread is free to do unrelated
    /// frame setup until `wait`.
    ///
    /// # Panics
    ///
    /// If a pass is already in flight (caller bug).
    pub fn start_pass(&mut self, input: FrameInput) {
        assert!(
            !self.in_flight,
            "start_pass called while a culling pass is in flight"
        );
        if let Some(job_tx) = &self.job_tx {
            job_tx
                .send(input)
                .expect("culling worker thread terminated unexpectedly");
            self.in_flight = true;
        }
    }

    /// Block until the in-flight pass completes and take back the frame
    /// data plus results.
    ///
    /// # Panics
    ///
    /// If no pass was started (caller bug).
    pub fn wait(&mut self) -> PassOutput {
        assert!(
            self.in_flight,
            "wait called without a matching start_pass"
        );
        let output = self
            .result_rx
            .recv()
            .expect("culling worker thread terminated unexpectedly");
        self.in_flight = false;
        output
    }

    /// Whether a pass is currently in flight.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }
}

impl Default for CullingPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CullingPass {
    fn drop(&mut self) {
        // Drain a forgotten in-flight pass so the worker is between jobs
        if self.in_flight {
            let _ = self.result_rx.recv();
        }
        // Closing the job channel is the stop request; the worker sees it
        // at the top of its loop and exits
        self.job_tx = None;
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
        engine_info!(LOG_SOURCE, "culling worker stopped");
    }
}

/// Worker body: block on the start signal, run exactly one pass, raise the
/// done signal, loop. A closed job channel is the shutdown request and is
/// only observed between passes; there is no mid-pass cancellation.
fn worker_loop(job_rx: Receiver<FrameInput>, result_tx: Sender<PassOutput>) {
    while let Ok(input) = job_rx.recv() {
        let output = run_pass(input);
        if result_tx.send(output).is_err() {
            break;
        }
    }
}

/// One full visibility pass over the frame data.
fn run_pass(input: FrameInput) -> PassOutput {
    let FrameInput { mut tree, camera } = input;
    let frustum = *camera.world_frustum();

    // Last frame's flags are stale for every object, including those in
    // subtrees the walk below will prune
    tree.for_each_object_mut(|object| object.set_visible(false));

    let visible_leaves = tree.leaves_in_frustum(&frustum);

    let mut visible_objects = 0;
    for &leaf in &visible_leaves {
        for object in tree.leaf_objects_mut(leaf) {
            if object_intersects(object, &frustum) {
                object.set_visible(true);
                visible_objects += 1;
            }
        }
    }

    engine_trace!(
        LOG_SOURCE,
        "pass complete: {} visible objects in {} leaves",
        visible_objects,
        visible_leaves.len()
    );

    PassOutput {
        tree,
        camera,
        visible_leaves,
        visible_objects,
    }
}

/// Per-object decision: any primitive whose world-space oriented box
/// SAT-intersects the frustum makes the object visible. Objects with no
/// renderable primitives never contribute draw work and stay invisible;
/// that is a skip, not an error.
fn object_intersects(object: &SceneObject, frustum: &Frustum) -> bool {
    let object_world = object.world_matrix();
    object.components().iter().any(|component| {
        let component_world = object_world * *component.transform();
        component
            .primitives()
            .iter()
            .any(|primitive| frustum.intersects_obb(&Obb::from_aabb(primitive.bounds(), &component_world)))
    })
}

#[cfg(test)]
#[path = "culling_tests.rs"]
mod tests;
