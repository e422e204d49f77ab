use cgmath::Vector2 as Vec2;

use crate::framebuffer::Rgb;
use crate::renderer::Renderer;

pub trait RendererDebugUtils {
    // 线框叠加用的画线函数，不参与深度测试
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb);
    fn draw_triangle_outline(&mut self, vertices: &[Vec2<f32>; 3], color: Rgb);
}

impl RendererDebugUtils for Renderer {
    //布雷森汉姆算法 画线段
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgb) {
        let mut x0 = x0;
        let mut y0 = y0;

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            // 越界的点由 set_color 跳过
            self.framebuffer.set_color(x0, y0, color);

            if x0 == x1 && y0 == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn draw_triangle_outline(&mut self, vertices: &[Vec2<f32>; 3], color: Rgb) {
        for i in 0..3 {
            let a = vertices[i];
            let b = vertices[(i + 1) % 3];
            self.draw_line(a.x as i32, a.y as i32, b.x as i32, b.y as i32, color);
        }
    }
}
