use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length_sq(self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f32 {
        self.length_sq().sqrt()
    }

    pub fn normalize(self) -> Vec2 {
        let len = self.length();
        if len > 0.0 {
            Vec2::new(self.x / len, self.y / len)
        } else {
            Vec2::ZERO
        }
    }

    pub fn dot(self, other: Vec2) -> f32 {
        self.x * other.x + self.y * other.y
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f32 {
    type Output = Vec2;

    fn mul(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self * rhs.x, self * rhs.y)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// Index of a body inside the world. Bodies are never removed, so a plain
/// index stays valid for the life of the scene.
pub type BodyId = usize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    /// Regular polygon described by vertex count and circumradius.
    Polygon { sides: u32, radius: f32 },
    /// Axis-aligned rectangle, used only for the static boundary walls.
    Rect { half_w: f32, half_h: f32 },
}

impl Shape {
    /// Radius used for collision and hit tests. Polygons collide as their
    /// circumscribed circle.
    pub fn bounding_radius(self) -> f32 {
        match self {
            Shape::Circle { radius } => radius,
            Shape::Polygon { radius, .. } => radius,
            Shape::Rect { half_w, half_h } => half_w.max(half_h),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Body {
    pub shape: Shape,
    pub pos: Vec2,
    pub vel: Vec2,
    pub force: Vec2,
    pub angle: f32,
    pub angular_vel: f32,
    pub mass: f32,
    pub friction: f32,
    pub friction_air: f32,
    pub friction_static: f32,
    pub restitution: f32,
    pub color: Rgb,
    pub is_static: bool,
    pub visible: bool,
    /// Marks the one actor body whose pairwise attraction pulls the field.
    pub attractor: bool,
}

impl Body {
    pub fn new(shape: Shape, pos: Vec2) -> Self {
        Self {
            shape,
            pos,
            vel: Vec2::ZERO,
            force: Vec2::ZERO,
            angle: 0.0,
            angular_vel: 0.0,
            mass: 1.0,
            friction: 0.1,
            friction_air: 0.01,
            friction_static: 0.5,
            restitution: 0.0,
            color: Rgb::new(0xaa, 0xaa, 0xaa),
            is_static: false,
            visible: true,
            attractor: false,
        }
    }
}

/// Render-facing copy of a body, taken once per frame.
#[derive(Clone, Copy, Debug)]
pub struct BodySnapshot {
    pub shape: Shape,
    pub pos: Vec2,
    pub angle: f32,
    pub mass: f32,
    pub color: Rgb,
}
