#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Star Miner adapters.
//!
//! The simulation hands renderers a [`Scene`] every frame. Everything in it
//! is already expressed in world units; backends apply the camera, cull what
//! lies outside the viewport and draw.

use anyhow::Result as AnyResult;
use glam::Vec2;
use starminer_core::{NodeId, Rgb, ShipState, WorldPoint};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the alpha channel replaced.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::from_rgb_u8(rgb.red(), rgb.green(), rgb.blue())
    }
}

/// Converts a world point into the vector type renderers work with.
#[must_use]
pub fn to_vec2(point: WorldPoint) -> Vec2 {
    Vec2::new(point.x(), point.y())
}

/// Visible world rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPresentation {
    /// Top-left corner in world units.
    pub origin: Vec2,
    /// Visible extent in world units.
    pub size: Vec2,
}

impl CameraPresentation {
    /// Creates a new camera rectangle.
    #[must_use]
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Translates a world position into screen space.
    #[must_use]
    pub fn world_to_screen(&self, position: Vec2) -> Vec2 {
        position - self.origin
    }

    /// Reports whether a circle overlaps the visible rectangle.
    #[must_use]
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let min = self.origin - Vec2::splat(radius);
        let max = self.origin + self.size + Vec2::splat(radius);
        center.x >= min.x && center.x <= max.x && center.y >= min.y && center.y <= max.y
    }
}

/// Spaceship as it should be drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipPresentation {
    /// Simulated position.
    pub position: Vec2,
    /// Facing angle in radians.
    pub heading: f32,
    /// Vertical bobbing added on top of the position.
    pub bob_offset: f32,
    /// Phase of the mining loop, used to toggle the mining beam.
    pub state: ShipState,
    /// Hull color.
    pub color: Color,
}

impl ShipPresentation {
    /// Position including the cosmetic bobbing.
    #[must_use]
    pub fn draw_position(&self) -> Vec2 {
        self.position + Vec2::new(0.0, self.bob_offset)
    }
}

/// Mining node as it should be drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodePresentation {
    /// Identifier allocated by the world.
    pub id: NodeId,
    /// Centre of the node.
    pub position: Vec2,
    /// Draw radius, shrinking as the node is mined.
    pub radius: f32,
    /// Whether the node is rare.
    pub rare: bool,
    /// Fill color.
    pub color: Color,
    /// Jitter applied while the node is being mined.
    pub wobble: Vec2,
}

/// Particle as it should be drawn this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticlePresentation {
    /// Centre of the particle.
    pub position: Vec2,
    /// Draw radius.
    pub radius: f32,
    /// Fill color, meant for additive blending.
    pub color: Color,
}

/// Floating label as it should be drawn this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatingTextPresentation {
    /// Anchor of the label.
    pub position: Vec2,
    /// Label contents.
    pub text: String,
    /// Text color with the remaining opacity folded into alpha.
    pub color: Color,
}

/// Values shown by the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPresentation {
    /// Balance rounded down for display.
    pub resources: f64,
    /// Purchased miner levels.
    pub miner_level: u32,
    /// Next miner price rounded down.
    pub miner_cost: f64,
    /// Purchased engine levels.
    pub engine_level: u32,
    /// Next engine price rounded down.
    pub engine_cost: f64,
    /// Background star scroll speed.
    pub star_speed: f32,
}

/// Declarative render snapshot produced by the simulation each frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Visible world rectangle.
    pub camera: CameraPresentation,
    /// Offset added to every draw call while the screen shakes.
    pub shake_offset: Vec2,
    /// Spaceship pose.
    pub ship: ShipPresentation,
    /// Live nodes in spawn order.
    pub nodes: Vec<NodePresentation>,
    /// Live particles in draw order.
    pub particles: Vec<ParticlePresentation>,
    /// Live floating labels in draw order.
    pub texts: Vec<FloatingTextPresentation>,
    /// Heads-up display values.
    pub hud: HudPresentation,
}

impl Scene {
    /// Nodes overlapping the camera rectangle.
    pub fn visible_nodes(&self) -> impl Iterator<Item = &NodePresentation> + '_ {
        self.nodes
            .iter()
            .filter(|node| self.camera.overlaps_circle(node.position, node.radius))
    }

    /// Particles overlapping the camera rectangle.
    pub fn visible_particles(&self) -> impl Iterator<Item = &ParticlePresentation> + '_ {
        self.particles
            .iter()
            .filter(|particle| self.camera.overlaps_circle(particle.position, particle.radius))
    }
}

/// Frame cadence requested from a backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRate {
    frames_per_second: u32,
}

impl FrameRate {
    /// Creates a frame rate, rejecting zero.
    pub fn new(frames_per_second: u32) -> Result<Self, RenderingError> {
        if frames_per_second == 0 {
            return Err(RenderingError::InvalidFrameRate { frames_per_second });
        }
        Ok(Self { frames_per_second })
    }

    /// Frames presented per second.
    #[must_use]
    pub const fn frames_per_second(&self) -> u32 {
        self.frames_per_second
    }

    /// Duration of a single frame.
    #[must_use]
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second
    }
}

/// Top-level description of what a backend should present.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title of the window or log prefix.
    pub window_title: String,
    /// Background color.
    pub clear_color: Color,
    /// Initial scene.
    pub scene: Scene,
}

impl Presentation {
    /// Creates a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Star Miner scenes.
pub trait RenderingBackend {
    /// Runs the backend until it decides to stop.
    ///
    /// `update_scene` receives the frame's elapsed time and refreshes the scene
    /// in place; it returns `false` once the host wants the loop to end.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) -> bool + 'static;
}

/// Errors raised while describing presentations.
#[derive(Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// A backend was asked to present zero frames per second.
    InvalidFrameRate {
        /// Rejected value.
        frames_per_second: u32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFrameRate { frames_per_second } => {
                write!(
                    f,
                    "frames_per_second must be positive (received {frames_per_second})"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> CameraPresentation {
        CameraPresentation::new(Vec2::new(100.0, 200.0), Vec2::new(300.0, 150.0))
    }

    #[test]
    fn frame_rate_rejects_zero_without_panicking() {
        let error = FrameRate::new(0).expect_err("zero fps must be rejected");
        assert_eq!(
            error,
            RenderingError::InvalidFrameRate {
                frames_per_second: 0
            }
        );
    }

    #[test]
    fn frame_duration_divides_one_second() {
        let rate = FrameRate::new(50).expect("valid rate");
        assert_eq!(rate.frame_duration(), Duration::from_millis(20));
    }

    #[test]
    fn culling_keeps_circles_touching_the_edge() {
        let camera = camera();
        assert!(camera.overlaps_circle(Vec2::new(250.0, 250.0), 1.0));
        assert!(camera.overlaps_circle(Vec2::new(95.0, 250.0), 10.0));
        assert!(!camera.overlaps_circle(Vec2::new(80.0, 250.0), 10.0));
        assert!(!camera.overlaps_circle(Vec2::new(250.0, 400.0), 5.0));
    }

    #[test]
    fn world_to_screen_subtracts_origin() {
        assert_eq!(
            camera().world_to_screen(Vec2::new(150.0, 260.0)),
            Vec2::new(50.0, 60.0)
        );
    }

    #[test]
    fn bobbing_offsets_draw_position_vertically() {
        let ship = ShipPresentation {
            position: Vec2::new(10.0, 20.0),
            heading: 0.0,
            bob_offset: -3.0,
            state: ShipState::Seeking,
            color: Color::from_rgb_u8(0xff, 0x00, 0x77),
        };
        assert_eq!(ship.draw_position(), Vec2::new(10.0, 17.0));
    }

    #[test]
    fn rgb_conversion_keeps_channels() {
        let color = Color::from(Rgb::from_rgb(0xff, 0x00, 0x00)).with_alpha(0.25);
        assert_eq!(color, Color::new(1.0, 0.0, 0.0, 0.25));
    }
}
