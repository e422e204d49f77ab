use cgmath::Vector2 as Vec2;
use std::cmp::Ordering;

use crate::framebuffer::FrameBuffer;
use crate::renderer::fragment_shader::{FragmentData, FragmentShader};
use crate::vertex::RasterTriangle;

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

fn lerp_uv(a: Option<Vec2<f32>>, b: Option<Vec2<f32>>, t: f32) -> Option<Vec2<f32>> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a + (b - a) * t),
        _ => None,
    }
}

/// 扫描线插值的一端；长度为 0 时只取起点
#[derive(Clone, Copy)]
struct Sample {
    x: f32,
    z: f32,
    uv: Option<Vec2<f32>>,
}

/// 从 `from` 到 `to` 的三角形边，按整数行等分插值。
///
/// 行坐标保留为 f32（已取整），远离屏幕的顶点不会让步数溢出。
struct Edge {
    from: Sample,
    to: Sample,
    y_start: f32,
    steps: f32,
}

impl Edge {
    fn new(from: (f32, Sample), to: (f32, Sample)) -> Self {
        Self {
            from: from.1,
            to: to.1,
            y_start: from.0,
            steps: to.0 - from.0,
        }
    }

    fn at(&self, y: i32) -> Sample {
        let t = if self.steps == 0.0 {
            0.0
        } else {
            (y as f32 - self.y_start) / self.steps
        };
        Sample {
            x: lerp(self.from.x, self.to.x, t),
            z: lerp(self.from.z, self.to.z, t),
            uv: lerp_uv(self.from.uv, self.to.uv, t),
        }
    }
}

/// `[lo, hi]` 与 `[0, max]` 的交集，转成整数像素范围
fn pixel_range(lo: f32, hi: f32, max: i32) -> std::ops::RangeInclusive<i32> {
    let lo = lo.max(0.0);
    let hi = hi.min(max as f32);
    (lo as i32)..=(hi as i32)
}

/// 扫描线遍历三角形覆盖的像素，对每个像素回调 (x, y, depth, uv)。
///
/// 只访问 [0, width) × [0, height) 范围内的像素，插值仍按完整扫描线计算。
fn scan_triangle(
    triangle: &RasterTriangle,
    width: usize,
    height: usize,
    mut plot: impl FnMut(i32, i32, f32, Option<Vec2<f32>>),
) {
    if width == 0 || height == 0 {
        return;
    }
    let pts = &triangle.vertices;
    let mut order = [0usize, 1, 2];
    order.sort_by(|&a, &b| {
        pts[a]
            .pos
            .y
            .partial_cmp(&pts[b].pos.y)
            .unwrap_or(Ordering::Equal)
    });

    // 顶点坐标向零取整
    let [v0, v1, v2] = order.map(|i| {
        let p = &pts[i];
        let sample = Sample {
            x: p.pos.x.trunc(),
            z: p.z,
            uv: triangle.uvs.map(|uv| uv[i]),
        };
        (p.pos.y.trunc(), sample)
    });
    let (y0, y1, y2) = (v0.0, v1.0, v2.0);

    let e01 = Edge::new(v0, v1);
    let e02 = Edge::new(v0, v2);
    let e12 = Edge::new(v1, v2);

    let max_x = width as i32 - 1;
    for y in pixel_range(y0, y2, height as i32 - 1) {
        // 上半部分用 01 边，下半部分用 12 边，02 边贯穿全程
        let a = if (y as f32) < y1 { e01.at(y) } else { e12.at(y) };
        let b = e02.at(y);
        let (mut left, mut right) = (a, b);
        let (mut x3, mut x4) = (left.x.trunc(), right.x.trunc());
        if x3 > x4 {
            std::mem::swap(&mut left, &mut right);
            std::mem::swap(&mut x3, &mut x4);
        }

        let steps = x4 - x3;
        for x in pixel_range(x3, x4, max_x) {
            let t = if steps == 0.0 {
                0.0
            } else {
                (x as f32 - x3) / steps
            };
            plot(
                x,
                y,
                lerp(left.z, right.z, t),
                lerp_uv(left.uv, right.uv, t),
            );
        }
    }
}

/// 深度测试通过的像素写入颜色和深度
pub fn fill_triangle(fb: &mut FrameBuffer, triangle: &RasterTriangle, shader: &dyn FragmentShader) {
    let (width, height) = (fb.width, fb.height);
    let intensity = triangle.intensity;
    scan_triangle(triangle, width, height, |x, y, z, uv| {
        fb.put_pixel_with(x, y, z, || shader.shade(FragmentData { uv, intensity }));
    });
}

/// 只写深度缓冲
pub fn fill_depth(fb: &mut FrameBuffer, triangle: &RasterTriangle) {
    let (width, height) = (fb.width, fb.height);
    scan_triangle(triangle, width, height, |x, y, z, _| {
        fb.put_depth(x, y, z);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framebuffer::{FAR_DEPTH, Rgb};
    use crate::renderer::fragment_shader::{FlatShader, PLACEHOLDER, TextureShader};
    use crate::renderer::light::{Light, LightIntensity};
    use crate::texture::Texture;
    use crate::vertex::RasterPoint;

    fn triangle(points: [(f32, f32, f32); 3]) -> RasterTriangle {
        RasterTriangle {
            vertices: points.map(|(x, y, z)| RasterPoint::new(x, y, z)),
            uvs: None,
            intensity: LightIntensity::default(),
            mesh: 0,
        }
    }

    fn covered(fb: &FrameBuffer) -> usize {
        fb.depth.iter().filter(|&&d| d < FAR_DEPTH).count()
    }

    fn flat(color: Rgb) -> FlatShader {
        FlatShader { color }
    }

    #[test]
    fn flat_top_triangle_fills_staircase() {
        let mut fb = FrameBuffer::new(8, 8);
        let tri = triangle([(0.0, 0.0, 0.5), (4.0, 0.0, 0.5), (0.0, 4.0, 0.5)]);
        fill_triangle(&mut fb, &tri, &flat([255, 0, 0]));
        // 每行 5, 4, 3, 2, 1 个像素
        assert_eq!(covered(&fb), 15);
        assert_eq!(fb.get_pixel(4, 0), [255, 0, 0]);
        assert_eq!(fb.get_pixel(0, 4), [255, 0, 0]);
        assert_eq!(fb.get_pixel(1, 4), [0, 0, 0]);
    }

    #[test]
    fn flat_bottom_triangle_does_not_divide_by_zero() {
        let mut fb = FrameBuffer::new(8, 8);
        let tri = triangle([(2.0, 0.0, 0.5), (0.0, 2.0, 0.5), (4.0, 2.0, 0.5)]);
        fill_triangle(&mut fb, &tri, &flat([1, 1, 1]));
        assert_eq!(covered(&fb), 1 + 3 + 5);
        assert!(fb.depth.iter().all(|d| d.is_finite()));
    }

    #[test]
    fn degenerate_triangle_draws_a_line_or_point() {
        let mut fb = FrameBuffer::new(4, 4);
        let tri = triangle([(1.0, 1.0, 0.5), (1.0, 1.0, 0.5), (1.0, 1.0, 0.5)]);
        fill_triangle(&mut fb, &tri, &flat([1, 1, 1]));
        assert_eq!(covered(&fb), 1);
    }

    #[test]
    fn depth_is_interpolated_linearly() {
        let mut fb = FrameBuffer::new(8, 8);
        let tri = triangle([(0.0, 0.0, 0.0), (4.0, 0.0, 0.8), (0.0, 4.0, 0.4)]);
        fill_depth(&mut fb, &tri);
        assert!((fb.get_depth(0, 0) - 0.0).abs() < 1e-6);
        assert!((fb.get_depth(4, 0) - 0.8).abs() < 1e-6);
        assert!((fb.get_depth(2, 0) - 0.4).abs() < 1e-6);
        assert!((fb.get_depth(0, 4) - 0.4).abs() < 1e-6);
        assert!(fb.data.iter().all(|&c| c == [0, 0, 0]));
    }

    #[test]
    fn second_pass_changes_nothing() {
        let mut fb = FrameBuffer::new(16, 16);
        let tri = triangle([(1.5, 2.0, 0.3), (12.2, 5.7, 0.6), (4.0, 14.9, 0.2)]);
        fill_triangle(&mut fb, &tri, &flat([10, 20, 30]));
        let (color, depth) = (fb.data.clone(), fb.depth.clone());
        fill_triangle(&mut fb, &tri, &flat([99, 99, 99]));
        assert_eq!(fb.data, color);
        assert_eq!(fb.depth, depth);
    }

    #[test]
    fn submission_order_does_not_matter() {
        let near = triangle([(0.0, 0.0, 0.2), (15.0, 3.0, 0.2), (3.0, 15.0, 0.2)]);
        let far = triangle([(2.0, 1.0, 0.7), (14.0, 14.0, 0.7), (1.0, 12.0, 0.7)]);
        let (red, blue) = (flat([255, 0, 0]), flat([0, 0, 255]));

        let mut a = FrameBuffer::new(16, 16);
        fill_triangle(&mut a, &near, &red);
        fill_triangle(&mut a, &far, &blue);

        let mut b = FrameBuffer::new(16, 16);
        fill_triangle(&mut b, &far, &blue);
        fill_triangle(&mut b, &near, &red);

        assert_eq!(a.data, b.data);
        assert_eq!(a.depth, b.depth);
    }

    #[test]
    fn offscreen_pixels_are_skipped() {
        let mut fb = FrameBuffer::new(4, 4);
        let tri = triangle([(-10.0, -10.0, 0.5), (20.0, -5.0, 0.5), (-5.0, 20.0, 0.5)]);
        fill_triangle(&mut fb, &tri, &flat([7, 7, 7]));
        assert!(covered(&fb) > 0);
        assert_eq!(fb.data.len(), 16);
    }

    /// 记录调用次数的着色器，内部可变状态不要求线程安全
    struct CountingShader {
        calls: std::cell::Cell<usize>,
    }

    impl FragmentShader for CountingShader {
        fn shade(&self, _data: FragmentData) -> Rgb {
            self.calls.set(self.calls.get() + 1);
            [1, 1, 1]
        }
    }

    #[test]
    fn shader_runs_once_per_written_pixel() {
        let mut fb = FrameBuffer::new(8, 8);
        let tri = triangle([(0.0, 0.0, 0.5), (4.0, 0.0, 0.5), (0.0, 4.0, 0.5)]);
        let shader = CountingShader {
            calls: std::cell::Cell::new(0),
        };
        fill_triangle(&mut fb, &tri, &shader);
        assert_eq!(shader.calls.get(), 15);
        // 深度测试失败的像素不再着色
        fill_triangle(&mut fb, &tri, &shader);
        assert_eq!(shader.calls.get(), 15);
    }

    #[test]
    fn far_away_vertices_are_clamped_to_the_buffer() {
        let mut fb = FrameBuffer::new(4, 4);
        let tri = triangle([(-1e10, 0.0, 0.5), (1e10, 0.0, 0.5), (0.0, 2.0, 0.5)]);
        fill_triangle(&mut fb, &tri, &flat([3, 3, 3]));
        // 第 0、1 行铺满，第 2 行只剩顶点
        assert_eq!(covered(&fb), 4 + 4 + 1);
        assert_eq!(fb.get_pixel(3, 1), [3, 3, 3]);
        assert!((fb.get_depth(2, 0) - 0.5).abs() < 1e-6);

        let mut fb = FrameBuffer::new(4, 4);
        let huge = triangle([(-f32::MAX, -f32::MAX, 0.5), (f32::MAX, 0.0, 0.5), (0.0, f32::MAX, 0.5)]);
        fill_depth(&mut fb, &huge);
        assert!(fb.depth.iter().all(|d| !d.is_nan()));
    }

    #[test]
    fn textured_fill_samples_interpolated_uv() {
        let light = Light::default();
        let tex = Texture::from_rgb(2, 2, vec![[100, 0, 0], [0, 100, 0], [0, 0, 100], [50, 50, 50]])
            .unwrap();
        let shader = TextureShader {
            light: &light,
            texture: Some(&tex),
            fallback: PLACEHOLDER,
        };
        let mut tri = triangle([(0.0, 0.0, 0.5), (6.0, 0.0, 0.5), (0.0, 6.0, 0.5)]);
        tri.uvs = Some([Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)]);
        tri.intensity = LightIntensity {
            ambient: 1.0,
            diffuse: 0.0,
            specular: 0.0,
        };

        let mut fb = FrameBuffer::new(8, 8);
        fill_triangle(&mut fb, &tri, &shader);
        assert_eq!(fb.get_pixel(0, 0), [100, 0, 0]);
        assert_eq!(fb.get_pixel(6, 0), [0, 100, 0]);
        assert_eq!(fb.get_pixel(0, 6), [0, 0, 100]);
    }
}
