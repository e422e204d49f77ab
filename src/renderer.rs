pub mod clip;
pub mod fragment_shader;
pub mod light;
pub mod vertex_shader;

use cgmath::{Matrix4 as Mat4, Vector2 as Vec2};
use log::{debug, trace};
use serde::Deserialize;

use crate::camera::Camera;
use crate::framebuffer::{FrameBuffer, WHITE};
use crate::model::Mesh;
use crate::rasterizer;
use crate::transform;
use crate::vertex::{ClipTriangle, RasterPoint, RasterTriangle};

use self::clip::{Clipper, FrustumClipper};
use self::fragment_shader::{FlatShader, FragmentShader, PLACEHOLDER, TextureShader};
use self::light::{Light, LightIntensity};

/// 输出图像尺寸，覆盖整个帧缓冲
pub struct Viewport {
    pub w: usize,
    pub h: usize,
}

impl Viewport {
    /// NDC → 像素坐标
    pub fn matrix(&self) -> Mat4<f32> {
        transform::viewport(self.w as f32, self.h as f32)
    }
}

/// 光栅化方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    Flat,
    #[default]
    Textured,
    Depth,
}

/// 一帧的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces: usize,
    pub culled: usize,
    pub clipped_away: usize,
    pub triangles: usize,
}

pub struct Renderer {
    pub(crate) camera: Camera,
    pub(crate) framebuffer: FrameBuffer,
    pub(crate) viewport: Viewport,
    pub(crate) light: Light,
    pub mode: RenderMode,
    pub wireframe: bool,
}

impl Renderer {
    pub fn new(camera: Camera, w: usize, h: usize) -> Self {
        let framebuffer = FrameBuffer::new(w, h);
        Self {
            camera,
            framebuffer,
            viewport: Viewport { w, h },
            light: Light::default(),
            mode: RenderMode::default(),
            wireframe: false,
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn light_mut(&mut self) -> &mut Light {
        &mut self.light
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// 变换 → 背面剔除 → 光照 → 裁剪 → 投影，只产出待光栅化的三角形
    pub fn process(&self, meshes: &[Mesh]) -> (Vec<RasterTriangle>, FrameStats) {
        let camera_matrix = self.camera.view_proj_matrix();
        let viewport_matrix = self.viewport.matrix();
        let camera_pos = self.camera.position();
        let clipper = FrustumClipper;

        let mut stats = FrameStats::default();
        let mut out = Vec::new();
        for (mesh_index, mesh) in meshes.iter().enumerate() {
            //管线阶段 1: 顶点变换
            let frame = vertex_shader::transform_mesh(mesh, &camera_matrix);

            for face in &mesh.faces {
                stats.faces += 1;

                //管线阶段 2: 背面剔除
                let world = frame.face_world(face);
                let normal = vertex_shader::face_normal(&world);
                if vertex_shader::is_backface(normal, world[0], camera_pos) {
                    stats.culled += 1;
                    continue;
                }

                //管线阶段 3: 面光照（质心处计算一次）
                let centroid = vertex_shader::centroid(&world);
                let intensity = self.light.intensity(normal, centroid, camera_pos);

                //管线阶段 4: 裁剪
                let clip_triangle = ClipTriangle::new(frame.face_clip(face), face.uvs);
                let clipped = clipper.clip_triangle(&clip_triangle);
                if clipped.is_empty() {
                    stats.clipped_away += 1;
                    continue;
                }

                //管线阶段 5: 透视除法 + 视口变换
                for tri in &clipped {
                    out.push(Self::viewport_transform(
                        &viewport_matrix,
                        tri,
                        intensity,
                        mesh_index,
                    ));
                }
            }
        }
        stats.triangles = out.len();
        (out, stats)
    }

    //视口变换
    fn viewport_transform(
        viewport_matrix: &Mat4<f32>,
        clip_triangle: &ClipTriangle,
        intensity: LightIntensity,
        mesh: usize,
    ) -> RasterTriangle {
        let vertices = clip_triangle.positions.map(|clip| {
            let ndc = clip / clip.w;
            let screen = *viewport_matrix * ndc;
            RasterPoint::new(screen.x, screen.y, screen.z)
        });

        RasterTriangle {
            vertices,
            uvs: clip_triangle.uvs,
            intensity,
            mesh,
        }
    }

    /// 渲染一帧：重新分配缓冲，按当前模式光栅化所有三角形
    pub fn render_frame(&mut self, meshes: &[Mesh]) -> &FrameBuffer {
        self.framebuffer = FrameBuffer::new(self.viewport.w, self.viewport.h);
        let (triangles, stats) = self.process(meshes);
        debug!(
            "faces={} culled={} clipped_away={} triangles={}",
            stats.faces, stats.culled, stats.clipped_away, stats.triangles
        );

        match self.mode {
            RenderMode::Depth => {
                for tri in &triangles {
                    rasterizer::fill_depth(&mut self.framebuffer, tri);
                }
                self.framebuffer.visualize_depth();
            }
            RenderMode::Flat | RenderMode::Textured => {
                for tri in &triangles {
                    let mesh = &meshes[tri.mesh];
                    let shader = shader_for(self.mode, &self.light, mesh, tri);
                    rasterizer::fill_triangle(&mut self.framebuffer, tri, &*shader);
                }
            }
        }

        if self.wireframe {
            self.draw_wireframe(&triangles, WHITE);
        }
        &self.framebuffer
    }

    fn draw_wireframe(&mut self, triangles: &[RasterTriangle], color: crate::framebuffer::Rgb) {
        use crate::renderer_debug::RendererDebugUtils;
        for tri in triangles {
            let points: [Vec2<f32>; 3] = tri.vertices.map(|p| p.pos);
            self.draw_triangle_outline(&points, color);
        }
    }
}

/// 根据渲染模式和网格材质选出像素着色器
fn shader_for<'a>(
    mode: RenderMode,
    light: &'a Light,
    mesh: &'a Mesh,
    tri: &RasterTriangle,
) -> Box<dyn FragmentShader + 'a> {
    match mode {
        RenderMode::Textured => {
            if mesh.texture.is_some() && tri.uvs.is_none() {
                trace!("mesh {} 的面缺少纹理坐标，使用纯色", tri.mesh);
            }
            Box::new(TextureShader {
                light,
                texture: mesh.texture.as_ref(),
                fallback: light.color(tri.intensity, mesh.color.unwrap_or(PLACEHOLDER)),
            })
        }
        _ => Box::new(FlatShader {
            color: light.color(tri.intensity, mesh.color.unwrap_or(WHITE)),
        }),
    }
}
