use rand::Rng;

use crate::{
    config,
    core::World,
    theme::Theme,
    types::{Body, BodyId, Rgb, Shape, Vec2},
};

/// Spawns a `columns x rows` grid of circle bodies. Cell pitch is the
/// largest possible diameter at this scale plus a fixed gap, offset from the
/// top-left corner, so successive fields overlap loosely rather than tile.
pub fn spawn_field<R: Rng>(
    world: &mut World,
    rng: &mut R,
    theme: &Theme,
    scale: f32,
    columns: u32,
    rows: u32,
) -> Vec<BodyId> {
    let pitch = 2.0 * config::FIELD_RADIUS_MAX * scale + config::FIELD_GAP;
    let mut ids = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows {
        for col in 0..columns {
            let pos = Vec2::new(
                config::FIELD_OFFSET + col as f32 * pitch,
                config::FIELD_OFFSET + row as f32 * pitch,
            );
            let radius =
                rng.gen_range(config::FIELD_RADIUS_MIN..=config::FIELD_RADIUS_MAX) * scale;
            let mut body = Body::new(Shape::Circle { radius }, pos);
            body.friction = config::FIELD_FRICTION;
            body.friction_air = config::FIELD_FRICTION_AIR;
            body.friction_static = config::FIELD_FRICTION_STATIC;
            body.mass = rng.gen_range(config::FIELD_MASS_MIN..=config::FIELD_MASS_MAX);
            // A cosine over a multi-radian draw: restitution lands anywhere
            // in [-1, 1], negative included.
            body.restitution = rng
                .gen_range(config::FIELD_RADIUS_MIN..=config::FIELD_RADIUS_MAX)
                .cos();
            body.color = theme.pick(rng);
            ids.push(world.add_body(body));
        }
    }
    ids
}

/// The one distinguished actor: a triangle with the pairwise attraction
/// behavior the world runs every step.
pub fn spawn_actor(world: &mut World, center: Vec2) -> BodyId {
    let mut body = Body::new(
        Shape::Polygon {
            sides: config::ACTOR_SIDES,
            radius: config::ACTOR_RADIUS,
        },
        center,
    );
    body.friction = config::ACTOR_FRICTION;
    body.restitution = config::ACTOR_RESTITUTION;
    body.mass = config::ACTOR_MASS;
    body.color = Rgb::new(0xaa, 0xaa, 0xaa);
    body.attractor = true;
    world.add_body(body)
}

/// Four invisible, fully elastic rectangles enclosing the play field.
/// Long axis is twice the viewport so bodies cannot slip past a corner.
pub fn spawn_walls(world: &mut World, width: f32, height: f32) {
    let half_t = config::WALL_THICKNESS / 2.0;
    // Half extents: a half-width equal to the full viewport makes the wall
    // twice the viewport long. Order: top, right, bottom, left.
    let sides = [
        (Vec2::new(width / 2.0, 0.0), width, half_t),
        (Vec2::new(width, height / 2.0), half_t, height),
        (Vec2::new(width / 2.0, height), width, half_t),
        (Vec2::new(0.0, height / 2.0), half_t, height),
    ];
    for (pos, half_w, half_h) in sides {
        let mut body = Body::new(Shape::Rect { half_w, half_h }, pos);
        body.is_static = true;
        body.restitution = config::WALL_RESTITUTION;
        body.visible = false;
        world.add_body(body);
    }
}
