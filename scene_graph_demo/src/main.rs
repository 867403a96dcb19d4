//! Scene graph demo
//!
//! Opens a window and runs one of the demo scenes through the render loop.
//! Frames go to a logging renderer, so the output is on the console.
//!
//! Usage: scene_graph_demo [solar|tracking]
//! Log level: SCENEGRAPH_LOG=trace|debug|info|warn|error (default info)

mod app;
mod assets;
mod renderer;
mod scenes;

use std::time::Duration;
use winit::event_loop::{ControlFlow, EventLoop};
use scene_graph_engine::scenegraph::Engine;
use scene_graph_engine::scenegraph::log::LogSeverity;
use scene_graph_engine::scenegraph::render::{RenderLoop, RenderLoopConfig, SceneContext};
use scene_graph_engine::engine_info;

use app::App;
use assets::{DemoMeshFactory, ThreadFontLoader};
use renderer::LoggingRenderer;
use scenes::DemoScene;

fn severity_from_env() -> LogSeverity {
    match std::env::var("SCENEGRAPH_LOG").as_deref() {
        Ok("trace") => LogSeverity::Trace,
        Ok("debug") => LogSeverity::Debug,
        Ok("warn") => LogSeverity::Warn,
        Ok("error") => LogSeverity::Error,
        _ => LogSeverity::Info,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Engine::set_min_severity(severity_from_env());

    let scene = DemoScene::from_arg(std::env::args().nth(1).as_deref());
    engine_info!("demo::main", "Starting {:?}", scene);

    let config = RenderLoopConfig {
        camera: scene.camera(),
        ..RenderLoopConfig::default()
    };
    let mut context = SceneContext::new(&config);
    let mut meshes = DemoMeshFactory::new();
    let mut fonts = ThreadFontLoader::new(Duration::from_millis(500));
    scene.build(&mut context, &mut meshes, &mut fonts)?;

    let render_loop = RenderLoop::new(context, LoggingRenderer::new(120));

    // Every tick requests the next redraw, so the loop can wait between frames
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(scene.title(), render_loop);
    event_loop.run_app(&mut app)?;
    Ok(())
}
