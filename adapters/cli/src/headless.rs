//! Rendering backend that drives the scene without a window.

use std::{
    thread,
    time::{Duration, Instant},
};

use anyhow::Result;
use starminer_rendering::{FrameRate, Presentation, RenderingBackend, Scene};
use tracing::info;

/// Presents frames by logging a summary instead of drawing them.
#[derive(Debug)]
pub(crate) struct HeadlessBackend {
    frame_rate: FrameRate,
    run_for: Duration,
    realtime: bool,
}

impl HeadlessBackend {
    /// Creates a backend that stops after `run_for` of simulated time.
    pub(crate) fn new(frame_rate: FrameRate, run_for: Duration) -> Self {
        Self {
            frame_rate,
            run_for,
            realtime: false,
        }
    }

    /// Paces frames against the wall clock and feeds measured deltas.
    pub(crate) fn with_realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }
}

impl RenderingBackend for HeadlessBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, &mut Scene) -> bool + 'static,
    {
        let Presentation {
            window_title,
            scene,
            ..
        } = presentation;
        let mut scene = scene;
        let frame = self.frame_rate.frame_duration();

        info!(
            title = %window_title,
            fps = self.frame_rate.frames_per_second(),
            seconds = self.run_for.as_secs_f64(),
            realtime = self.realtime,
            "headless run started"
        );

        let mut simulated = Duration::ZERO;
        let mut frames: u64 = 0;
        let mut last = Instant::now();
        while simulated < self.run_for {
            let dt = if self.realtime {
                thread::sleep(frame);
                let now = Instant::now();
                let elapsed = now.duration_since(last);
                last = now;
                elapsed
            } else {
                frame
            };

            simulated = simulated.saturating_add(dt);
            frames += 1;
            if !update_scene(dt, &mut scene) {
                break;
            }
        }

        info!(
            frames,
            simulated = simulated.as_secs_f64(),
            visible_nodes = scene.visible_nodes().count(),
            visible_particles = scene.visible_particles().count(),
            "headless run finished"
        );
        Ok(())
    }
}
