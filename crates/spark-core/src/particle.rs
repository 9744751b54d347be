use crate::constants::*;
use crate::draw::{GradientStop, Hsla, ParticleDraw, TrailDraw};
use crate::motion::MotionSignal;
use glam::Vec2;
use rand::Rng;
use smallvec::SmallVec;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub position: Vec2,
    pub opacity: f32,
}

/// Construction overrides. Anything left `None` is randomised the way a
/// freshly emitted particle would be.
#[derive(Clone, Debug, Default)]
pub struct ParticleOptions {
    pub velocity: Option<Vec2>,
    pub friction: Option<f32>,
    pub size: Option<f32>,
    pub opacity: Option<f32>,
    pub hue: Option<f32>,
    pub saturation: Option<f32>,
    pub lightness: Option<f32>,
    pub max_age: Option<u32>,
    pub attraction_strength: Option<f32>,
    pub repulsion_radius: Option<f32>,
    pub connection_radius: Option<f32>,
    pub energy: Option<f32>,
    pub pulse_speed: Option<f32>,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    pub friction: f32,

    pub max_size: f32,
    pub max_opacity: f32,
    pub hue: f32,
    pub saturation: f32,

    pub attraction_strength: f32,
    pub repulsion_radius: f32,
    pub connection_radius: f32,

    energy: f32,
    pulse_phase: f32,
    pulse_speed: f32,

    age: u32,
    max_age: u32,
    life: f32,

    // derived every step from life/energy/age
    size: f32,
    opacity: f32,
    lightness: f32,

    trail: SmallVec<[TrailPoint; TRAIL_LEN + 1]>,
}

impl Particle {
    pub fn new<R: Rng>(position: Vec2, options: ParticleOptions, rng: &mut R) -> Self {
        let velocity = options.velocity.unwrap_or_else(|| {
            Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * 2.0
        });
        let size = options.size.unwrap_or_else(|| rng.gen::<f32>() * 3.0 + 1.0);
        let opacity = options
            .opacity
            .unwrap_or_else(|| rng.gen::<f32>() * 0.8 + 0.2);
        let energy = options
            .energy
            .unwrap_or_else(|| rng.gen::<f32>() * 0.5 + 0.5)
            .clamp(0.0, 1.0);
        Self {
            position,
            velocity,
            friction: options.friction.unwrap_or(DEFAULT_FRICTION),
            max_size: size,
            max_opacity: opacity,
            hue: options.hue.unwrap_or(DEFAULT_HUE),
            saturation: options.saturation.unwrap_or(DEFAULT_SATURATION),
            attraction_strength: options.attraction_strength.unwrap_or(DEFAULT_ATTRACTION),
            repulsion_radius: options.repulsion_radius.unwrap_or(DEFAULT_REPULSION_RADIUS),
            connection_radius: options
                .connection_radius
                .unwrap_or(DEFAULT_CONNECTION_RADIUS),
            energy,
            pulse_phase: rng.gen::<f32>() * TAU,
            pulse_speed: options.pulse_speed.unwrap_or(DEFAULT_PULSE_SPEED),
            age: 0,
            max_age: options.max_age.unwrap_or(DEFAULT_MAX_AGE),
            life: 1.0,
            size,
            opacity,
            lightness: options.lightness.unwrap_or(DEFAULT_LIGHTNESS),
            trail: SmallVec::new(),
        }
    }

    /// Returns `false` once life has run out.
    pub fn step<'a, I>(&mut self, delta_ms: f32, signal: Option<&MotionSignal>, neighbors: I) -> bool
    where
        I: IntoIterator<Item = &'a Particle>,
    {
        self.age = self.age.saturating_add(1);
        self.life = life_at(self.age, self.max_age);

        self.advance_trail();

        if let Some(signal) = signal {
            if signal.movement_intensity > ACTIVE_INTENSITY {
                self.attract_to(signal);
            }
        }
        self.repel_from(neighbors);

        let dt_scale = if delta_ms.is_finite() && delta_ms > 0.0 {
            delta_ms / BASELINE_FRAME_MS
        } else {
            0.0
        };
        self.position += self.velocity * dt_scale;
        self.velocity *= self.friction;

        self.refresh_visuals();
        self.life > 0.0
    }

    /// Pull towards a moving pointer. The force grows as the distance
    /// shrinks (inverse distance) and is only guarded against `d == 0`.
    fn attract_to(&mut self, signal: &MotionSignal) {
        let offset = signal.position - self.position;
        let distance = offset.length();
        if distance > 0.0 && distance < ATTRACTION_RANGE {
            let force = (signal.movement_intensity * self.attraction_strength)
                / (distance * ATTRACTION_DISTANCE_SCALE);
            self.velocity += offset / distance * force;
            self.energy = (self.energy + signal.movement_intensity * ENERGY_GAIN).min(1.0);
        }
    }

    // A neighbour sitting exactly on this particle contributes nothing.
    fn repel_from<'a, I>(&mut self, neighbors: I)
    where
        I: IntoIterator<Item = &'a Particle>,
    {
        for other in neighbors {
            let offset = other.position - self.position;
            let distance = offset.length();
            if distance > 0.0 && distance < self.repulsion_radius {
                let force = (self.repulsion_radius - distance) * REPULSION_SCALE;
                self.velocity -= offset / distance * force;
            }
        }
    }

    fn advance_trail(&mut self) {
        self.trail.push(TrailPoint {
            position: self.position,
            opacity: self.opacity * 0.5,
        });
        while self.trail.len() > TRAIL_LEN {
            self.trail.remove(0);
        }
        for point in self.trail.iter_mut() {
            point.opacity *= TRAIL_FADE;
        }
    }

    fn refresh_visuals(&mut self) {
        let pulse = (self.age as f32 * self.pulse_speed + self.pulse_phase).sin() * 0.3 + 0.7;
        self.size = self.max_size * self.life * pulse * (0.5 + self.energy * 0.5);
        self.opacity = self.max_opacity * self.life * (0.3 + self.energy * 0.7);
        self.lightness = 30.0 + self.energy * 40.0;
    }

    pub fn distance_to(&self, other: &Particle) -> f32 {
        (other.position - self.position).length()
    }

    /// Links inside the dead zone would overlap the glows, so they are skipped.
    pub fn can_connect_to(&self, other: &Particle) -> bool {
        let distance = self.distance_to(other);
        distance > CONNECTION_DEAD_ZONE && distance < self.connection_radius
    }

    /// `(1 - d/r) * energy_a * energy_b`, zero at or beyond the radius.
    pub fn connection_strength(&self, other: &Particle) -> f32 {
        let distance = self.distance_to(other);
        if distance >= self.connection_radius {
            return 0.0;
        }
        (1.0 - distance / self.connection_radius) * self.energy * other.energy
    }

    pub fn draw(&self) -> Option<ParticleDraw> {
        if self.life <= 0.0 || self.opacity <= 0.0 || self.size <= 0.0 {
            return None;
        }
        let base = self.color();
        let trail = (self.trail.len() >= 2).then(|| TrailDraw {
            points: self.trail.iter().map(|p| p.position).collect(),
            color: base.with_alpha(self.opacity * 0.3),
            width: self.size * 0.5,
        });
        Some(ParticleDraw {
            position: self.position,
            glow_radius: self.size * 3.0,
            glow_stops: [
                GradientStop {
                    offset: 0.0,
                    color: base,
                },
                GradientStop {
                    offset: 0.3,
                    color: base.with_alpha(self.opacity * 0.8),
                },
                GradientStop {
                    offset: 1.0,
                    color: base.with_alpha(0.0),
                },
            ],
            core_radius: self.size,
            core_color: Hsla::new(
                self.hue,
                self.saturation,
                (self.lightness + 20.0).min(90.0),
                self.opacity,
            ),
            trail,
        })
    }

    pub fn color(&self) -> Hsla {
        Hsla::new(self.hue, self.saturation, self.lightness, 1.0)
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn max_age(&self) -> u32 {
        self.max_age
    }

    pub fn life(&self) -> f32 {
        self.life
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn lightness(&self) -> f32 {
        self.lightness
    }

    pub fn trail(&self) -> &[TrailPoint] {
        &self.trail
    }
}

#[inline]
fn life_at(age: u32, max_age: u32) -> f32 {
    if age >= max_age {
        return 0.0;
    }
    (1.0 - age as f32 / max_age as f32).max(0.0)
}
