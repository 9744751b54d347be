use crate::config::FieldSettings;
use crate::constants::*;
use crate::draw::{DrawList, Hsla, LinkDraw};
use crate::motion::MotionSignal;
use crate::particle::{Particle, ParticleOptions};
use crate::quality::QualityLevel;
use glam::Vec2;
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldStats {
    pub particle_count: usize,
    pub max_particles: usize,
    pub spawn_rate: f32,
    pub average_energy: f32,
}

/// One edge of the connectivity graph, by index into [`ParticleField::particles`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub a: usize,
    pub b: usize,
    pub strength: f32,
}

pub struct ParticleField {
    // insertion order doubles as age order for forced eviction
    particles: Vec<Particle>,
    spawn_accumulator: f32,
    settings: FieldSettings,
    quality_cap: usize,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(settings: FieldSettings, seed: u64) -> Self {
        let quality_cap = settings.max_particles;
        Self {
            particles: Vec::with_capacity(settings.max_particles),
            spawn_accumulator: 0.0,
            settings,
            quality_cap,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn, step and prune. `signal` may be stale or absent.
    pub fn update(&mut self, delta_ms: f32, signal: Option<&MotionSignal>) {
        self.spawn(signal);
        self.step_all(delta_ms, signal);

        let capacity = self.capacity();
        if self.particles.len() > capacity {
            let excess = self.particles.len() - capacity;
            self.particles.drain(..excess);
        }
    }

    fn spawn(&mut self, signal: Option<&MotionSignal>) {
        let signal = match signal {
            Some(s) if s.movement_intensity >= ACTIVE_INTENSITY => s,
            _ => {
                self.spawn_accumulator *= SPAWN_DECAY;
                return;
            }
        };

        self.spawn_accumulator += self.settings.spawn_rate
            * (1.0 + signal.movement_intensity * SPAWN_INTENSITY_GAIN);

        let capacity = self.capacity();
        while self.spawn_accumulator >= 1.0 && self.particles.len() < capacity {
            self.spawn_accumulator -= 1.0;
            let particle = self.emit(signal);
            self.particles.push(particle);
        }
    }

    fn emit(&mut self, signal: &MotionSignal) -> Particle {
        let intensity = signal.movement_intensity;
        let rng = &mut self.rng;

        // sqrt keeps the spawn points uniform over the disk area
        let angle = rng.gen::<f32>() * TAU;
        let distance = rng.gen::<f32>().sqrt() * self.settings.spawn_radius;
        let position = signal.position + Vec2::new(angle.cos(), angle.sin()) * distance;

        let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * SPAWN_JITTER;
        let options = ParticleOptions {
            velocity: Some(jitter + signal.velocity * SPAWN_VELOCITY_INHERIT),
            size: Some(rng.gen::<f32>() * 2.0 + 1.0 + intensity * 2.0),
            opacity: Some(0.3 + intensity * 0.5),
            energy: Some(intensity),
            max_age: Some(rng.gen_range(SPAWN_MIN_AGE..SPAWN_MAX_AGE)),
            ..Default::default()
        };
        Particle::new(position, options, rng)
    }

    // Particles earlier in the list are already stepped when later ones
    // read them as neighbours.
    fn step_all(&mut self, delta_ms: f32, signal: Option<&MotionSignal>) {
        let mut alive = Vec::with_capacity(self.particles.len());
        for i in 0..self.particles.len() {
            let (before, rest) = self.particles.split_at_mut(i);
            if let Some((current, after)) = rest.split_first_mut() {
                alive.push(current.step(delta_ms, signal, before.iter().chain(after.iter())));
            }
        }
        let mut alive = alive.into_iter();
        self.particles.retain(|_| alive.next().unwrap_or(false));
    }

    /// Every unordered pair close and energetic enough to be linked.
    pub fn connections(&self) -> Vec<Connection> {
        let mut out = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for (offset, b) in self.particles[i + 1..].iter().enumerate() {
                if !a.can_connect_to(b) {
                    continue;
                }
                let strength = a.connection_strength(b);
                if strength > MIN_LINK_STRENGTH {
                    out.push(Connection {
                        a: i,
                        b: i + 1 + offset,
                        strength,
                    });
                }
            }
        }
        out
    }

    pub fn links(&self) -> Vec<LinkDraw> {
        if !self.settings.show_connections {
            return Vec::new();
        }
        self.connections()
            .into_iter()
            .map(|c| {
                let (a, b) = (&self.particles[c.a], &self.particles[c.b]);
                LinkDraw {
                    a: a.position,
                    b: b.position,
                    color: Hsla::new(
                        (a.hue + b.hue) / 2.0,
                        LINK_SATURATION,
                        (a.lightness() + b.lightness()) / 2.0,
                        c.strength * self.settings.connection_opacity,
                    ),
                    width: c.strength * LINK_WIDTH_SCALE,
                }
            })
            .collect()
    }

    pub fn draw_list(&self) -> DrawList {
        DrawList {
            links: self.links(),
            particles: self.particles.iter().filter_map(Particle::draw).collect(),
        }
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.spawn_accumulator = 0.0;
    }

    /// Takes effect on the next update; live particles are not culled here.
    pub fn apply_quality(&mut self, level: QualityLevel) {
        self.quality_cap = level.max_particles();
        log::debug!(
            "[field] quality {} -> capacity {}",
            level.as_str(),
            self.capacity()
        );
    }

    pub fn apply_settings(&mut self, settings: FieldSettings) {
        self.settings = settings;
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn capacity(&self) -> usize {
        self.settings.max_particles.min(self.quality_cap)
    }

    /// Append a particle as-is; capacity is enforced on the next update.
    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn spawn_accumulator(&self) -> f32 {
        self.spawn_accumulator
    }

    pub fn stats(&self) -> FieldStats {
        let average_energy = if self.particles.is_empty() {
            0.0
        } else {
            self.particles.iter().map(Particle::energy).sum::<f32>() / self.particles.len() as f32
        };
        FieldStats {
            particle_count: self.particles.len(),
            max_particles: self.capacity(),
            spawn_rate: self.settings.spawn_rate,
            average_energy,
        }
    }
}
