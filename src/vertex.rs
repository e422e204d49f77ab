use cgmath::{Vector2 as Vec2, Vector4 as Vec4};

use crate::renderer::light::LightIntensity;

/// 裁剪空间中的三角形（透视除法之前）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipTriangle {
    pub positions: [Vec4<f32>; 3],
    pub uvs: Option<[Vec2<f32>; 3]>,
}

impl ClipTriangle {
    pub fn new(positions: [Vec4<f32>; 3], uvs: Option<[Vec2<f32>; 3]>) -> Self {
        Self { positions, uvs }
    }
}

/// 光栅化阶段的屏幕空间点（像素坐标 + 深度）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterPoint {
    pub pos: Vec2<f32>,
    pub z: f32,
}

impl RasterPoint {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            z,
        }
    }
}

/// 可直接光栅化的三角形：屏幕顶点、纹理坐标、面光照、所属网格
#[derive(Debug, Clone, Copy)]
pub struct RasterTriangle {
    pub vertices: [RasterPoint; 3],
    pub uvs: Option<[Vec2<f32>; 3]>,
    pub intensity: LightIntensity,
    pub mesh: usize,
}
