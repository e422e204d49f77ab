use cgmath::{Vector2 as Vec2, Vector4 as Vec4};

use crate::vertex::ClipTriangle;

/// 裁剪空间中的一个半空间。
///
/// 每个平面由一个有符号距离 d(v) 描述：`inside` 判断 d 的符号，
/// 交点参数 t = d(v0) / (d(v0) - d(v1))。
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipPlane {
    /// w > 0，剔除相机背后的点
    Eye,
    /// sign · v[axis] <= w
    Side { axis: usize, sign: f32 },
    /// z >= 0
    Near,
}

/// 固定的裁剪顺序：w、右、左、上、下、近、远
pub const CLIP_PLANES: [ClipPlane; 7] = [
    ClipPlane::Eye,
    ClipPlane::Side { axis: 0, sign: 1.0 },
    ClipPlane::Side { axis: 0, sign: -1.0 },
    ClipPlane::Side { axis: 1, sign: 1.0 },
    ClipPlane::Side { axis: 1, sign: -1.0 },
    ClipPlane::Near,
    ClipPlane::Side { axis: 2, sign: 1.0 },
];

impl ClipPlane {
    fn distance(&self, v: &Vec4<f32>) -> f32 {
        match *self {
            ClipPlane::Eye => v.w,
            ClipPlane::Side { axis, sign } => v.w - sign * v[axis],
            ClipPlane::Near => v.z,
        }
    }

    pub fn inside(&self, v: &Vec4<f32>) -> bool {
        match self {
            // w == 0 时无法做透视除法
            ClipPlane::Eye => self.distance(v) > 0.0,
            _ => self.distance(v) >= 0.0,
        }
    }

    /// 边 v0→v1 与平面交点的参数 t ∈ [0, 1]
    pub fn intersect(&self, v0: &Vec4<f32>, v1: &Vec4<f32>) -> f32 {
        let d0 = self.distance(v0);
        let d1 = self.distance(v1);
        d0 / (d0 - d1)
    }
}

/// 单个平面的裁剪结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClipResult {
    Reject,
    Keep(ClipTriangle),
    Split(ClipTriangle, ClipTriangle),
}

fn lerp4(a: Vec4<f32>, b: Vec4<f32>, t: f32) -> Vec4<f32> {
    a + (b - a) * t
}

fn lerp2(a: Vec2<f32>, b: Vec2<f32>, t: f32) -> Vec2<f32> {
    a + (b - a) * t
}

/// Sutherland-Hodgman 单平面裁剪。
///
/// 两个顶点在内侧时得到四边形 (o0, o1, o2, o3)，拆成 (o0, o1, o2) 和 (o0, o2, o3)，保持绕序。
pub fn clip_against(plane: ClipPlane, triangle: &ClipTriangle) -> ClipResult {
    let cv = &triangle.positions;
    let inside = cv.map(|v| plane.inside(&v));
    let num_inside = inside.iter().filter(|&&b| b).count();

    match num_inside {
        0 => return ClipResult::Reject,
        3 => return ClipResult::Keep(*triangle),
        _ => {}
    }

    let mut positions: Vec<Vec4<f32>> = Vec::with_capacity(4);
    let mut uvs: Vec<Vec2<f32>> = Vec::with_capacity(4);
    for i in 0..3 {
        let next = (i + 1) % 3;
        if inside[i] {
            positions.push(cv[i]);
            if let Some(tc) = &triangle.uvs {
                uvs.push(tc[i]);
            }
        }
        if inside[i] != inside[next] {
            let t = plane.intersect(&cv[i], &cv[next]);
            positions.push(lerp4(cv[i], cv[next], t));
            if let Some(tc) = &triangle.uvs {
                uvs.push(lerp2(tc[i], tc[next], t));
            }
        }
    }

    let pick = |idx: [usize; 3]| ClipTriangle {
        positions: idx.map(|i| positions[i]),
        uvs: triangle.uvs.map(|_| idx.map(|i| uvs[i])),
    };

    if num_inside == 1 {
        ClipResult::Keep(pick([0, 1, 2]))
    } else {
        ClipResult::Split(pick([0, 1, 2]), pick([0, 2, 3]))
    }
}

pub trait Clipper {
    // 接收一个裁剪空间的三角形
    // 返回裁剪后剩下的零个、一个或多个三角形
    fn clip_triangle(&self, triangle: &ClipTriangle) -> Vec<ClipTriangle>;
}

/// 依次对 `CLIP_PLANES` 中的 7 个平面裁剪
pub struct FrustumClipper;

impl Clipper for FrustumClipper {
    fn clip_triangle(&self, triangle: &ClipTriangle) -> Vec<ClipTriangle> {
        let mut current = vec![*triangle];
        for plane in CLIP_PLANES {
            let mut next = Vec::with_capacity(current.len() + 1);
            for tri in &current {
                match clip_against(plane, tri) {
                    ClipResult::Reject => {}
                    ClipResult::Keep(t) => next.push(t),
                    ClipResult::Split(a, b) => {
                        next.push(a);
                        next.push(b);
                    }
                }
            }
            if next.is_empty() {
                return next;
            }
            current = next;
        }
        current
    }
}
