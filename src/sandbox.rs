use anyhow::Context;
use cgmath::Vector3 as Vec3;
use log::{info, warn};
use serde_json::from_reader;
use std::{fs::File, path::Path};

use scanline_renderer::{
    Camera, Look, Mesh, Renderer, Texture,
    json_struct::{CameraConfig, JsonConfig, ModelConfig, WindowConfig},
    load_obj,
};

/// 从 json 场景文件构建出的全部运行时状态
pub struct Scene {
    pub renderer: Renderer,
    pub meshes: Vec<Mesh>,
    pub window: WindowConfig,
    pub output: String,
    /// 相机环绕时的注视点
    pub focus: Vec3<f32>,
}

pub fn parse_json(path: &Path) -> anyhow::Result<JsonConfig> {
    let file =
        File::open(path).with_context(|| format!("无法打开场景文件 {}", path.display()))?;
    let config: JsonConfig =
        from_reader(file).with_context(|| format!("场景文件格式错误 {}", path.display()))?;
    info!("成功读取场景 {}，共 {} 个模型", path.display(), config.models.len());
    Ok(config)
}

pub fn set_camera(config: &CameraConfig, aspect: f32) -> (Camera, Vec3<f32>) {
    let mut camera = Camera::new(config.fov.to_radians(), aspect, config.near, config.far);
    let eye: Vec3<f32> = config.position.into();
    let (look, focus) = match (config.target, config.forward) {
        (Some(target), _) => (Look::At(target.into()), target.into()),
        (None, Some(forward)) => {
            let forward: Vec3<f32> = forward.into();
            (Look::Along(forward), eye + forward)
        }
        (None, None) => (Look::Along(Vec3::unit_z()), eye + Vec3::unit_z()),
    };
    camera.orient(eye, look, config.up.into());
    (camera, focus)
}

pub fn load_model(config: &ModelConfig) -> anyhow::Result<Mesh> {
    let mut mesh = load_obj(Path::new(&config.path))?;
    if let Some(tex_path) = &config.tex_path {
        // 贴图读不到时退回纯色
        match Texture::from_file(Path::new(tex_path)) {
            Ok(texture) => mesh = mesh.with_texture(texture),
            Err(err) => warn!("贴图 {} 读取失败，使用纯色: {:#}", tex_path, err),
        }
    } else if let Some([width, height]) = config.noise_texture {
        mesh = mesh.with_texture(Texture::random(width, height));
    }
    if let Some(color) = config.color {
        mesh = mesh.with_color(color);
    }
    mesh.position = config.position.into();
    mesh.rotation = config.rotation.into();
    mesh.scale = config.scale.into();
    Ok(mesh)
}

pub fn build_scene(config: JsonConfig) -> anyhow::Result<Scene> {
    let JsonConfig {
        window,
        camera,
        light,
        render,
        models,
    } = config;

    let aspect = window.width as f32 / window.height as f32;
    let (camera, focus) = set_camera(&camera, aspect);

    let mut renderer = Renderer::new(camera, window.width, window.height);
    renderer.mode = render.mode;
    renderer.wireframe = render.wireframe;
    let l = renderer.light_mut();
    l.set_light(light.color, light.direction);
    l.set_coefficients(
        light.ambient,
        light.diffuse,
        light.specular,
        light.specular_exponent,
    );

    let meshes = models
        .iter()
        .map(load_model)
        .collect::<anyhow::Result<Vec<_>>>()?;
    info!("初始化完成，渲染模式 {:?}", render.mode);

    Ok(Scene {
        renderer,
        meshes,
        window,
        output: render.output,
        focus,
    })
}

/// 渲染单帧并保存为图片
pub fn run_json(path: &Path) -> anyhow::Result<()> {
    let mut scene = build_scene(parse_json(path)?)?;
    let frame = scene.renderer.render_frame(&scene.meshes);
    frame
        .save_to_image(Path::new(&scene.output))
        .with_context(|| format!("无法保存图片 {}", scene.output))?;
    info!("已渲染完成，输出到 {}", scene.output);
    Ok(())
}
