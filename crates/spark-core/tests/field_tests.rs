// Integration tests for the particle collection.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spark_core::*;

fn signal(intensity: f32) -> MotionSignal {
    MotionSignal {
        position: Vec2::new(400.0, 300.0),
        velocity: Vec2::new(120.0, -40.0),
        acceleration: Vec2::ZERO,
        speed: 126.5,
        direction: -0.32,
        is_touch: false,
        timestamp: 0.0,
        movement_intensity: intensity,
    }
}

fn field_with(spawn_rate: f32, max_particles: usize) -> ParticleField {
    let settings = FieldSettings {
        spawn_rate,
        max_particles,
        ..Default::default()
    };
    ParticleField::new(settings, 42)
}

#[test]
fn one_particle_per_accumulator_crossing() {
    // intensity 1.0 and rate 0.5 add 1.5 per tick
    let mut field = field_with(0.5, 50);
    let s = signal(1.0);

    field.update(16.67, Some(&s));
    assert_eq!(field.len(), 1);
    assert!((field.spawn_accumulator() - 0.5).abs() < 1e-6);

    field.update(16.67, Some(&s));
    assert_eq!(field.len(), 3);
    assert!(field.spawn_accumulator().abs() < 1e-6);

    // Nobody dies before tick 60, so the count is exactly floor(1.5 * n).
    for tick in 3..=30 {
        field.update(16.67, Some(&s));
        assert_eq!(field.len(), (tick * 3) / 2, "tick {tick}");
    }
}

#[test]
fn count_never_exceeds_capacity() {
    let mut field = field_with(3.0, 50);
    let strong = signal(1.0);
    let weak = signal(0.3);
    for tick in 0..400 {
        let s = match tick % 7 {
            0 => None,
            1 | 2 => Some(&weak),
            _ => Some(&strong),
        };
        field.update(16.67, s);
        assert!(field.len() <= field.capacity(), "tick {tick}: {}", field.len());
    }
    assert!(field.len() > 0);
}

#[test]
fn quality_tier_bounds_the_field() {
    let mut field = field_with(3.0, 50);
    field.apply_quality(QualityLevel::Low);
    assert_eq!(field.capacity(), 20);

    let s = signal(1.0);
    for _ in 0..50 {
        field.update(16.67, Some(&s));
        assert!(field.len() <= 20);
    }
    assert_eq!(field.len(), 20);

    // The configured ceiling wins over a generous tier.
    field.apply_settings(FieldSettings {
        max_particles: 10,
        ..field.settings().clone()
    });
    field.apply_quality(QualityLevel::High);
    assert_eq!(field.capacity(), 10);
    field.update(16.67, Some(&s));
    assert_eq!(field.len(), 10);
}

#[test]
fn oldest_particles_go_first_when_over_capacity() {
    let mut field = field_with(0.0, 3);
    let mut rng = StdRng::seed_from_u64(1);
    for i in 0..5 {
        let options = ParticleOptions {
            velocity: Some(Vec2::ZERO),
            ..Default::default()
        };
        field.push(Particle::new(Vec2::new(i as f32 * 100.0, 0.0), options, &mut rng));
    }
    field.update(16.67, None);
    assert_eq!(field.len(), 3);
    let xs: Vec<f32> = field.particles().iter().map(|p| p.position.x.round()).collect();
    assert_eq!(xs, vec![200.0, 300.0, 400.0]);
}

#[test]
fn idle_pointer_decays_the_accumulator() {
    let mut field = field_with(0.4, 50);
    field.update(16.67, Some(&signal(1.0)));
    let before = field.spawn_accumulator();
    assert!(before > 0.0);

    field.update(16.67, None);
    assert!((field.spawn_accumulator() - before * 0.95).abs() < 1e-6);

    // Below the activity threshold counts as idle.
    field.update(16.67, Some(&signal(0.05)));
    assert!((field.spawn_accumulator() - before * 0.95 * 0.95).abs() < 1e-6);
}

#[test]
fn spawned_particles_land_inside_the_radius() {
    let mut field = field_with(2.0, 50);
    let s = signal(0.5);
    field.update(0.0, Some(&s));
    assert!(!field.is_empty());
    for p in field.particles() {
        assert!(p.position.distance(s.position) <= 120.0 + 1e-3);
        assert!((p.energy() - 0.5).abs() < 0.02);
        assert!((60..120).contains(&p.max_age()));
    }
}

#[test]
fn particles_expire_without_input() {
    let mut field = field_with(2.0, 50);
    field.update(16.67, Some(&signal(1.0)));
    assert!(!field.is_empty());
    for _ in 0..130 {
        field.update(16.67, None);
    }
    assert!(field.is_empty());
}

#[test]
fn links_follow_connections_and_settings() {
    let mut field = field_with(0.0, 50);
    let mut rng = StdRng::seed_from_u64(3);
    let make = |x: f32, energy: f32, rng: &mut StdRng| {
        let options = ParticleOptions {
            velocity: Some(Vec2::ZERO),
            energy: Some(energy),
            ..Default::default()
        };
        Particle::new(Vec2::new(x, 0.0), options, rng)
    };
    field.push(make(0.0, 0.8, &mut rng));
    field.push(make(40.0, 0.6, &mut rng));
    field.push(make(500.0, 1.0, &mut rng));

    let connections = field.connections();
    assert_eq!(connections.len(), 1);
    assert_eq!((connections[0].a, connections[0].b), (0, 1));
    assert!((connections[0].strength - 0.24).abs() < 1e-6);

    let links = field.links();
    assert_eq!(links.len(), 1);
    assert!((links[0].color.alpha - 0.24 * 0.4).abs() < 1e-6);
    assert!((links[0].width - 0.48).abs() < 1e-6);

    let list = field.draw_list();
    assert_eq!(list.links.len(), 1);
    assert_eq!(list.particles.len(), 3);

    field.apply_settings(FieldSettings {
        show_connections: false,
        ..field.settings().clone()
    });
    assert!(field.links().is_empty());
    assert_eq!(field.connections().len(), 1);
}

#[test]
fn clear_is_idempotent_and_stats_report() {
    let mut field = field_with(1.0, 50);
    let empty = field.stats();
    assert_eq!(empty.particle_count, 0);
    assert_eq!(empty.average_energy, 0.0);

    field.update(16.67, Some(&signal(0.8)));
    let stats = field.stats();
    assert!(stats.particle_count > 0);
    assert_eq!(stats.max_particles, 50);
    assert_eq!(stats.spawn_rate, 1.0);
    assert!(stats.average_energy > 0.0);

    field.clear();
    field.clear();
    assert!(field.is_empty());
    assert_eq!(field.spawn_accumulator(), 0.0);
}
