use anyhow::Context;
use cgmath::{Matrix4 as Mat4, Vector2 as Vec2, Vector3 as Vec3, Vector4 as Vec4};
use log::{debug, warn};
use obj::Obj;
use std::path::Path;

use crate::framebuffer::Rgb;
use crate::texture::Texture;
use crate::transform::{rotate, scale, translate};

/// 三角面：顶点缓冲中的三个下标 + 可选纹理坐标
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub indices: [usize; 3],
    pub uvs: Option<[Vec2<f32>; 3]>,
}

impl Face {
    pub fn new(indices: [usize; 3]) -> Self {
        Self { indices, uvs: None }
    }

    pub fn with_uvs(indices: [usize; 3], uvs: [Vec2<f32>; 3]) -> Self {
        Self {
            indices,
            uvs: Some(uvs),
        }
    }
}

/// 静态模型数据；渲染期间只读
#[derive(Debug, Clone)]
pub struct Mesh {
    /// 模型空间齐次坐标，w = 1
    pub vertices: Vec<Vec4<f32>>,
    pub faces: Vec<Face>,
    pub position: Vec3<f32>,
    /// 欧拉角（弧度）
    pub rotation: Vec3<f32>,
    pub scale: Vec3<f32>,
    pub texture: Option<Texture>,
    pub color: Option<Rgb>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec4<f32>>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            faces,
            position: Vec3::new(0.0, 0.0, 0.0),
            rotation: Vec3::new(0.0, 0.0, 0.0),
            scale: Vec3::new(1.0, 1.0, 1.0),
            texture: None,
            color: None,
        }
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    /// translate · rotate · scale，每次从字段重新计算
    pub fn world_matrix(&self) -> Mat4<f32> {
        translate(self.position) * rotate(self.rotation) * scale(self.scale)
    }

    /// 以原点为中心的立方体，8 个共享顶点、12 个三角面，法线朝外
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let corner_index = |p: Vec3<f32>| {
            (p.x > 0.0) as usize | ((p.y > 0.0) as usize) << 1 | ((p.z > 0.0) as usize) << 2
        };
        let vertices = (0..8)
            .map(|i| {
                let pick = |bit: usize| if i & bit != 0 { half } else { -half };
                Vec4::new(pick(1), pick(2), pick(4), 1.0)
            })
            .collect();

        let axes = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let uv = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let mut faces = Vec::with_capacity(12);
        for axis in 0..3 {
            let u = axes[(axis + 1) % 3];
            let w = axes[(axis + 2) % 3];
            for sign in [1.0f32, -1.0] {
                let center = axes[axis] * (sign * half);
                // 从 +axis 方向看逆时针
                let quad = [
                    center - u * half - w * half,
                    center + u * half - w * half,
                    center + u * half + w * half,
                    center - u * half + w * half,
                ]
                .map(corner_index);
                // 法线取 (v2 - v0) × (v1 - v0)，-axis 面需要反向
                let tris = if sign > 0.0 {
                    [[0, 2, 1], [0, 3, 2]]
                } else {
                    [[0, 1, 2], [0, 2, 3]]
                };
                for t in tris {
                    faces.push(Face::with_uvs(t.map(|k| quad[k]), t.map(|k| uv[k])));
                }
            }
        }

        Self::new(vertices, faces)
    }
}

/// 读取 Wavefront OBJ；多边形按扇形拆成三角形
pub fn load_obj(path: &Path) -> anyhow::Result<Mesh> {
    let obj = Obj::load(path).with_context(|| format!("无法加载OBJ文件 {}", path.display()))?;
    let data = &obj.data;

    let vertices: Vec<Vec4<f32>> = data
        .position
        .iter()
        .map(|p| Vec4::new(p[0], p[1], p[2], 1.0))
        .collect();
    let texcoords: Vec<Vec2<f32>> = data.texture.iter().map(|t| Vec2::new(t[0], t[1])).collect();

    let mut faces = Vec::new();
    let mut skipped = 0;
    for object in &data.objects {
        for group in &object.groups {
            for poly in &group.polys {
                let corners = &poly.0;
                if corners.len() < 3 {
                    skipped += 1;
                    continue;
                }
                for i in 1..corners.len() - 1 {
                    let tri = [&corners[0], &corners[i], &corners[i + 1]];
                    let indices = tri.map(|c| c.0);
                    if indices.iter().any(|&idx| idx >= vertices.len()) {
                        skipped += 1;
                        continue;
                    }
                    // 三个角都带纹理坐标时才记录
                    let uvs = match tri.map(|c| c.1.and_then(|t| texcoords.get(t).copied())) {
                        [Some(a), Some(b), Some(c)] => Some([a, b, c]),
                        _ => None,
                    };
                    faces.push(Face { indices, uvs });
                }
            }
        }
    }

    if skipped > 0 {
        warn!("{}: 跳过 {} 个无效面", path.display(), skipped);
    }
    debug!(
        "{}: {} 个顶点, {} 个三角面",
        path.display(),
        vertices.len(),
        faces.len()
    );
    Ok(Mesh::new(vertices, faces))
}
