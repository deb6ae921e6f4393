//! Transient visual state: particles, floating texts and screen shake.

use starminer_core::{
    ParticleMotion, ParticleSpawn, Rgb, ShakePriority, ShakeRequest, WorldPoint, WorldVector,
};

/// Distance covered per tick by particles homing in on the spaceship.
const ATTRACTION_SPEED: f32 = 3.0;
/// Homing particles closer than this to the spaceship are picked up.
const PICKUP_DISTANCE: f32 = 10.0;
/// Upward drift of floating text per tick.
const TEXT_DRIFT: f32 = 0.5;
/// Number of ticks a floating text takes to fade out.
const TEXT_LIFETIME: f32 = 60.0;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Particle {
    pub(crate) position: WorldPoint,
    pub(crate) motion: ParticleMotion,
    pub(crate) lifetime: f32,
    pub(crate) size: f32,
    pub(crate) color: Rgb,
}

impl Particle {
    fn from_spawn(spawn: ParticleSpawn) -> Self {
        Self {
            position: spawn.position,
            motion: spawn.motion,
            lifetime: spawn.lifetime,
            size: spawn.size,
            color: spawn.color,
        }
    }

    /// Advances the particle by one tick and reports whether it is still alive.
    fn advance(&mut self, owner: WorldPoint) -> bool {
        let velocity = match self.motion {
            ParticleMotion::Ballistic { velocity } => velocity,
            ParticleMotion::SeekOwner => {
                let distance = self.position.distance(owner);
                if distance < PICKUP_DISTANCE {
                    self.lifetime = 0.0;
                    return false;
                }
                WorldVector::from_angle(self.position.angle_to(owner), ATTRACTION_SPEED)
            }
        };

        self.position = self.position.translated(velocity);
        self.lifetime -= 1.0;
        self.lifetime > 0.0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FloatingText {
    pub(crate) position: WorldPoint,
    pub(crate) text: String,
    pub(crate) color: Rgb,
    pub(crate) opacity: f32,
}

impl FloatingText {
    fn advance(&mut self) -> bool {
        self.position = WorldPoint::new(self.position.x(), self.position.y() - TEXT_DRIFT);
        self.opacity -= 1.0 / TEXT_LIFETIME;
        self.opacity > 0.0
    }
}

/// Non-stacking shake pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct ScreenShake {
    pub(crate) magnitude: f32,
    pub(crate) remaining: u32,
}

impl ScreenShake {
    pub(crate) fn is_active(&self) -> bool {
        self.remaining > 0
    }

    fn request(&mut self, request: ShakeRequest) {
        if request.priority == ShakePriority::Pulse && self.is_active() {
            return;
        }
        self.magnitude = request.magnitude;
        self.remaining = request.duration;
    }

    fn decay(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}

#[derive(Debug, Default)]
pub(crate) struct Effects {
    particles: Vec<Particle>,
    texts: Vec<FloatingText>,
    shake: ScreenShake,
}

impl Effects {
    pub(crate) fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub(crate) fn texts(&self) -> &[FloatingText] {
        &self.texts
    }

    pub(crate) fn shake(&self) -> ScreenShake {
        self.shake
    }

    pub(crate) fn clear(&mut self) {
        self.particles.clear();
        self.texts.clear();
        self.shake = ScreenShake::default();
    }

    pub(crate) fn spawn_particles(&mut self, spawns: Vec<ParticleSpawn>) {
        self.particles.reserve(spawns.len());
        self.particles
            .extend(spawns.into_iter().map(Particle::from_spawn));
    }

    pub(crate) fn show_text(&mut self, position: WorldPoint, text: String, color: Rgb) {
        self.texts.push(FloatingText {
            position,
            text,
            color,
            opacity: 1.0,
        });
    }

    pub(crate) fn request_shake(&mut self, request: ShakeRequest) {
        self.shake.request(request);
    }

    /// Moves particles and texts one tick forward, pruning the expired ones.
    pub(crate) fn advance(&mut self, owner: WorldPoint) {
        self.particles.retain_mut(|particle| particle.advance(owner));
        self.texts.retain_mut(FloatingText::advance);
    }

    pub(crate) fn decay_shake(&mut self) {
        self.shake.decay();
    }
}
