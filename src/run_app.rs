use cgmath::{InnerSpace, Vector3 as Vec3};
use log::info;
use minifb::{Key, Window, WindowOptions};
use std::{path::Path, time::Instant};

use scanline_renderer::Look;

use crate::sandbox::{build_scene, parse_json};

/// 每帧相机绕注视点转过的角度（弧度）
const ORBIT_STEP: f32 = 0.01;

/// 窗口模式：相机绕注视点水平环绕，Esc 退出
pub fn run_app(path: &Path) -> anyhow::Result<()> {
    let mut scene = build_scene(parse_json(path)?)?;
    let (width, height) = (scene.window.width, scene.window.height);

    let mut window = Window::new(&scene.window.title, width, height, WindowOptions::default())?;
    window.set_target_fps(scene.window.fps);

    let start = scene.renderer.camera().position() - scene.focus;
    let radius = Vec3::new(start.x, 0.0, start.z).magnitude();
    let mut angle = start.x.atan2(start.z);
    let up = Vec3::unit_y();

    let mut frames = 0u32;
    let mut last_report = Instant::now();
    while window.is_open() && !window.is_key_down(Key::Escape) {
        //相机环绕
        if radius > 0.0 {
            let eye = scene.focus + Vec3::new(radius * angle.sin(), start.y, radius * angle.cos());
            scene
                .renderer
                .camera_mut()
                .orient(eye, Look::At(scene.focus), up);
            angle += ORBIT_STEP;
        }

        let frame = scene.renderer.render_frame(&scene.meshes);
        window.update_with_buffer(&frame.to_argb(), width, height)?;

        frames += 1;
        let elapsed = last_report.elapsed().as_secs_f32();
        if elapsed >= 1.0 {
            info!("FPS: {:.1}", frames as f32 / elapsed);
            frames = 0;
            last_report = Instant::now();
        }
    }
    Ok(())
}
