//! Drifting particle field behind the hero section.

use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Line, Points},
        Widget,
    },
};
use tokio::sync::watch;

use super::theme::hex_color;
use crate::state::{ParticleConfig, StyleVariables, Theme};

/// Particles closer than this (in unit coordinates) get a connecting line.
const LINK_DISTANCE: f64 = 0.15;
/// Base per-frame velocity before the theme's speed factor.
const DRIFT: f64 = 0.004;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
}

impl Particle {
    fn scatter<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.random_range(0.0..1.0),
            y: rng.random_range(0.0..1.0),
            vx: rng.random_range(-DRIFT..DRIFT),
            vy: rng.random_range(-DRIFT..DRIFT),
        }
    }

    /// Move one frame, bouncing off the unit square's edges.
    fn step(&mut self, speed: f64) {
        self.x += self.vx * speed;
        self.y += self.vy * speed;
        if !(0.0..=1.0).contains(&self.x) {
            self.vx = -self.vx;
            self.x = self.x.clamp(0.0, 1.0);
        }
        if !(0.0..=1.0).contains(&self.y) {
            self.vy = -self.vy;
            self.y = self.y.clamp(0.0, 1.0);
        }
    }
}

/// Long-lived drawing state. Follows the theme through watch receivers
/// instead of holding the coordinator.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    config: ParticleConfig,
    theme: watch::Receiver<Theme>,
    style: watch::Receiver<StyleVariables>,
}

impl ParticleField {
    pub fn new(theme: watch::Receiver<Theme>, style: watch::Receiver<StyleVariables>) -> Self {
        Self::with_rng(theme, style, &mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(
        mut theme: watch::Receiver<Theme>,
        style: watch::Receiver<StyleVariables>,
        rng: &mut R,
    ) -> Self {
        let config = theme.borrow_and_update().particle_config.clone();
        let particles = (0..config.count).map(|_| Particle::scatter(rng)).collect();
        Self {
            particles,
            config,
            theme,
            style,
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Current particle color as published by the theme.
    pub fn color(&self) -> Color {
        hex_color(&self.style.borrow().particle_color, Color::Gray)
    }

    /// Advance one animation frame.
    pub fn advance(&mut self) {
        self.sync_config();
        let speed = f64::from(self.config.speed);
        for particle in &mut self.particles {
            particle.step(speed);
        }
    }

    fn sync_config(&mut self) {
        if !self.theme.has_changed().unwrap_or(false) {
            return;
        }
        self.config = self.theme.borrow_and_update().particle_config.clone();
        let count = self.config.count as usize;
        if count < self.particles.len() {
            self.particles.truncate(count);
        } else {
            let mut rng = rand::rng();
            let missing = count - self.particles.len();
            self.particles
                .extend((0..missing).map(|_| Particle::scatter(&mut rng)));
        }
    }

    fn links(&self) -> Vec<Line> {
        if !self.config.connections {
            return Vec::new();
        }
        let color = self.color();
        let mut links = Vec::new();
        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                if (a.x - b.x).hypot(a.y - b.y) < LINK_DISTANCE {
                    links.push(Line::new(a.x, a.y, b.x, b.y, color));
                }
            }
        }
        links
    }
}

impl Widget for &ParticleField {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let color = self.color();
        let coords: Vec<(f64, f64)> = self.particles.iter().map(|p| (p.x, p.y)).collect();
        let links = self.links();

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, 1.0])
            .y_bounds([0.0, 1.0])
            .paint(|ctx| {
                for link in &links {
                    ctx.draw(link);
                }
                ctx.layer();
                ctx.draw(&Points {
                    coords: &coords,
                    color,
                });
            })
            .render(area, buf);
    }
}
