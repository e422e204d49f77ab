mod run_app;
mod sandbox;

use anyhow::bail;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        bail!("参数不足！使用方式: scanline-renderer <json路径> [image|window]");
    }
    let path = Path::new(&args[1]);

    match args.get(2).map(String::as_str).unwrap_or("image") {
        "image" => sandbox::run_json(path),
        "window" => run_app::run_app(path),
        other => bail!("未知的运行方式 {other}，可选 image 或 window"),
    }
}
