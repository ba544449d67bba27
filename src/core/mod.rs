use crate::{
    config,
    types::{Body, BodyId, BodySnapshot, Rgb, Shape, Vec2},
};

/// The simulation world: every body, the global gravity vector, and the
/// millisecond clock. All mutation happens synchronously inside `step`, or
/// through the explicit mutators the phase driver and UI call between steps.
pub struct World {
    bodies: Vec<Body>,
    gravity: Vec2,
    timestamp: f32,
    actor: Option<BodyId>,
}

impl World {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            gravity: Vec2::ZERO,
            timestamp: 0.0,
            actor: None,
        }
    }

    /// Adds a body and returns its id. The first body flagged as an
    /// attractor becomes the actor; the scene builds exactly one.
    pub fn add_body(&mut self, body: Body) -> BodyId {
        let id = self.bodies.len();
        if body.attractor && self.actor.is_none() {
            self.actor = Some(id);
        }
        self.bodies.push(body);
        id
    }

    pub fn actor(&self) -> Option<BodyId> {
        self.actor
    }

    pub fn body(&self, id: BodyId) -> &Body {
        &self.bodies[id]
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn set_gravity(&mut self, gravity: Vec2) {
        self.gravity = gravity;
    }

    pub fn timestamp(&self) -> f32 {
        self.timestamp
    }

    /// The clock value the phase driver keys off.
    pub fn scaled_clock(&self) -> f32 {
        self.timestamp * config::CLOCK_SCALE
    }

    pub fn apply_force(&mut self, id: BodyId, force: Vec2) {
        self.bodies[id].force += force;
    }

    pub fn set_mass(&mut self, id: BodyId, mass: f32) {
        self.bodies[id].mass = mass;
    }

    pub fn set_angular_velocity(&mut self, id: BodyId, angular_vel: f32) {
        self.bodies[id].angular_vel = angular_vel;
    }

    pub fn set_color(&mut self, id: BodyId, color: Rgb) {
        self.bodies[id].color = color;
    }

    /// Multiplies the body's shape by `factor`. Repeated calls compound;
    /// there is no absolute-size reset.
    pub fn scale_body(&mut self, id: BodyId, factor: f32) {
        match &mut self.bodies[id].shape {
            Shape::Circle { radius } => *radius *= factor,
            Shape::Polygon { radius, .. } => *radius *= factor,
            Shape::Rect { half_w, half_h } => {
                *half_w *= factor;
                *half_h *= factor;
            }
        }
    }

    /// Topmost non-static body under `point`, if any. Hit test uses the
    /// bounding radius, matching how bodies collide.
    pub fn pick_body(&self, point: Vec2) -> Option<BodyId> {
        self.bodies
            .iter()
            .enumerate()
            .rev()
            .find(|(_, b)| {
                !b.is_static
                    && (b.pos - point).length_sq()
                        <= b.shape.bounding_radius() * b.shape.bounding_radius()
            })
            .map(|(id, _)| id)
    }

    /// Mouse-drag spring: accelerates the body toward `target` and damps it
    /// so it settles instead of orbiting the cursor.
    pub fn drag_toward(&mut self, id: BodyId, target: Vec2) {
        let body = &mut self.bodies[id];
        if body.is_static {
            return;
        }
        let delta = target - body.pos;
        body.vel += delta * config::MOUSE_STIFFNESS;
        body.vel = body.vel * config::MOUSE_DAMPING;
    }

    /// Advances the world by one fixed step: actor attraction, gravity and
    /// accumulated forces, integration, then collision response.
    pub fn step(&mut self) {
        self.apply_attraction();
        self.integrate();
        self.resolve_collisions();
        self.timestamp += config::STEP_MS * config::TIME_SCALE;
    }

    /// The actor's pairwise behavior: every other dynamic body B feels
    /// `(actor.pos - B.pos) * coeff` and the actor feels the negation.
    fn apply_attraction(&mut self) {
        let Some(actor) = self.actor else { return };
        let actor_pos = self.bodies[actor].pos;
        let mut reaction = Vec2::ZERO;
        for (id, body) in self.bodies.iter_mut().enumerate() {
            if id == actor || body.is_static {
                continue;
            }
            let force = (actor_pos - body.pos) * config::ATTRACTION_COEFF;
            body.force += force;
            reaction -= force;
        }
        self.bodies[actor].force += reaction;
    }

    fn integrate(&mut self) {
        let dt = config::STEP_MS * config::TIME_SCALE;
        let dt_sq = dt * dt;
        for body in &mut self.bodies {
            if body.is_static {
                body.force = Vec2::ZERO;
                continue;
            }
            let accel = body.force * (1.0 / body.mass) + self.gravity * config::GRAVITY_SCALE;
            body.vel = (body.vel + accel * dt_sq) * (1.0 - body.friction_air);
            body.pos += body.vel;
            body.angle += body.angular_vel;
            body.force = Vec2::ZERO;
        }
    }

    fn resolve_collisions(&mut self) {
        for i in 0..self.bodies.len() {
            for j in (i + 1)..self.bodies.len() {
                let (left, right) = self.bodies.split_at_mut(j);
                let a = &mut left[i];
                let b = &mut right[0];
                match (a.is_static, b.is_static) {
                    (false, false) => collide_dynamic(a, b),
                    (true, false) => collide_wall(a, b),
                    (false, true) => collide_wall(b, a),
                    (true, true) => {}
                }
            }
        }
    }

    pub fn snapshot(&self, out: &mut Vec<BodySnapshot>) {
        out.clear();
        for body in &self.bodies {
            if !body.visible {
                continue;
            }
            out.push(BodySnapshot {
                shape: body.shape,
                pos: body.pos,
                angle: body.angle,
                mass: body.mass,
                color: body.color,
            });
        }
    }
}

/// Impulse response between two dynamic bodies, both treated as discs of
/// their bounding radius. Restitution is the larger of the pair and is
/// deliberately not clamped: the field carries cos-drawn values anywhere
/// in [-1, 1].
fn collide_dynamic(a: &mut Body, b: &mut Body) {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.shape.bounding_radius() + b.shape.bounding_radius();
    if dist <= 0.0 || dist >= min_dist {
        return;
    }
    let normal = delta * (1.0 / dist);
    let overlap = min_dist - dist;
    a.pos -= normal * (overlap * 0.5);
    b.pos += normal * (overlap * 0.5);

    let rel_vel = b.vel - a.vel;
    let rel_along = rel_vel.dot(normal);
    if rel_along >= 0.0 {
        return;
    }
    let inv_mass_a = 1.0 / a.mass;
    let inv_mass_b = 1.0 / b.mass;
    let inv_mass_sum = inv_mass_a + inv_mass_b;
    let restitution = a.restitution.max(b.restitution);
    let impulse_mag = -(1.0 + restitution) * rel_along / inv_mass_sum;
    let impulse = normal * impulse_mag;
    a.vel -= impulse * inv_mass_a;
    b.vel += impulse * inv_mass_b;

    // Contact friction: below the static threshold the surfaces stick and
    // all tangential slip is removed; above it a fraction bleeds off.
    let friction = a.friction.min(b.friction);
    if friction > 0.0 {
        let tangent = Vec2::new(-normal.y, normal.x);
        let rel_tangent = rel_vel.dot(tangent);
        let static_limit = a.friction_static.min(b.friction_static) * 0.1;
        let factor = if rel_tangent.abs() < static_limit {
            1.0
        } else {
            friction * 0.5
        };
        let tangential = tangent * (rel_tangent * factor);
        a.vel += tangential * (inv_mass_a / inv_mass_sum);
        b.vel -= tangential * (inv_mass_b / inv_mass_sum);
    }
}

/// Disc against a static rectangle: push the body out along the contact
/// normal and reflect the approaching velocity component.
fn collide_wall(wall: &Body, body: &mut Body) {
    let Shape::Rect { half_w, half_h } = wall.shape else {
        return;
    };
    let radius = body.shape.bounding_radius();
    let min = Vec2::new(wall.pos.x - half_w, wall.pos.y - half_h);
    let max = Vec2::new(wall.pos.x + half_w, wall.pos.y + half_h);
    let closest = Vec2::new(
        body.pos.x.clamp(min.x, max.x),
        body.pos.y.clamp(min.y, max.y),
    );
    let delta = body.pos - closest;
    let dist_sq = delta.length_sq();
    if dist_sq >= radius * radius {
        return;
    }

    let normal = if dist_sq > 0.0 {
        delta.normalize()
    } else {
        // Center inside the wall: eject along the axis of least penetration.
        let dx = (body.pos.x - wall.pos.x) / half_w;
        let dy = (body.pos.y - wall.pos.y) / half_h;
        if dx.abs() > dy.abs() {
            Vec2::new(dx.signum(), 0.0)
        } else {
            Vec2::new(0.0, dy.signum())
        }
    };
    let dist = dist_sq.sqrt();
    body.pos += normal * (radius - dist);

    let along = body.vel.dot(normal);
    if along < 0.0 {
        let restitution = wall.restitution.max(body.restitution);
        body.vel -= normal * ((1.0 + restitution) * along);
    }
}
