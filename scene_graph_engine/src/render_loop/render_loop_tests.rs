use std::f32::consts::FRAC_PI_2;
use glam::Vec3;
use super::*;
use crate::animation::{DependentRule, Spin};
use crate::renderer::mock_renderer::{MockAssetLoader, MockHost, MockRenderer};
use crate::resource::ResourceHandle;
use crate::scene::{Axis, Light, NodeDesc};
use crate::render_loop::RenderLoopConfig;

fn new_loop() -> RenderLoop<MockRenderer> {
    RenderLoop::new(SceneContext::default(), MockRenderer::new())
}

// ============================================================================
// Tests: Lifecycle
// ============================================================================

#[test]
fn test_new_loop_is_idle() {
    let render_loop = new_loop();
    assert_eq!(render_loop.state(), LoopState::Idle);
    assert_eq!(render_loop.tick_count(), 0);
    assert!(!render_loop.tick_pending());
}

#[test]
fn test_start_resizes_before_first_tick() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(1600, 900);

    render_loop.start(&mut host).unwrap();

    assert!(render_loop.is_running());
    assert_eq!(render_loop.renderer().resizes.len(), 1);
    assert!(render_loop.renderer().frames.is_empty());
    assert_eq!(render_loop.context().viewport.camera().aspect(), 1600.0 / 900.0);
    assert_eq!(host.tick_requests, 1);
    assert!(render_loop.tick_pending());

    render_loop.tick(&mut host, 0.0).unwrap();
    assert_eq!(render_loop.renderer().last_frame().unwrap().aspect, 1600.0 / 900.0);
}

#[test]
fn test_start_with_zero_size_keeps_configured_aspect() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(800, 0);

    render_loop.start(&mut host).unwrap();

    assert!(render_loop.is_running());
    assert!(render_loop.renderer().resizes.is_empty());
    assert_eq!(render_loop.context().viewport.camera().aspect(), 1.0);
}

#[test]
fn test_start_twice_is_invalid_state() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(800, 600);
    render_loop.start(&mut host).unwrap();

    assert!(matches!(render_loop.start(&mut host), Err(Error::InvalidState(_))));
    assert!(render_loop.is_running());
}

#[test]
fn test_restart_after_stop_is_invalid_state() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(800, 600);
    render_loop.start(&mut host).unwrap();
    render_loop.stop();

    assert!(matches!(render_loop.start(&mut host), Err(Error::InvalidState(_))));
    assert_eq!(render_loop.state(), LoopState::Stopped);
}

#[test]
fn test_stop_from_idle() {
    let mut render_loop = new_loop();
    render_loop.stop();
    render_loop.stop();
    assert_eq!(render_loop.state(), LoopState::Stopped);
}

// ============================================================================
// Tests: Ticks
// ============================================================================

#[test]
fn test_tick_before_start_is_skipped() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(800, 600);

    assert_eq!(render_loop.tick(&mut host, 16.0).unwrap(), TickOutcome::Skipped);
    assert_eq!(render_loop.tick_count(), 0);
    assert_eq!(host.tick_requests, 0);
}

#[test]
fn test_each_tick_rearms() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(800, 600);
    render_loop.start(&mut host).unwrap();

    for frame in 0..5 {
        let outcome = render_loop.tick(&mut host, frame as f64 * 16.0).unwrap();
        assert!(matches!(outcome, TickOutcome::Rendered(_)));
    }

    assert_eq!(render_loop.tick_count(), 5);
    assert_eq!(render_loop.renderer().frames.len(), 5);
    // One request from start plus one per tick
    assert_eq!(host.tick_requests, 6);
}

#[test]
fn test_stop_between_ticks_ends_processing() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(800, 600);
    render_loop.start(&mut host).unwrap();
    render_loop.tick(&mut host, 0.0).unwrap();

    // A tick was already requested when stop() lands
    assert!(render_loop.tick_pending());
    render_loop.stop();

    assert_eq!(render_loop.tick(&mut host, 16.0).unwrap(), TickOutcome::Skipped);
    assert_eq!(render_loop.tick(&mut host, 32.0).unwrap(), TickOutcome::Skipped);
    assert_eq!(render_loop.tick_count(), 1);
    assert_eq!(render_loop.renderer().frames.len(), 1);
    assert!(!render_loop.tick_pending());
    assert_eq!(host.tick_requests, 2);
}

#[test]
fn test_render_failure_still_rearms() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(800, 600);
    render_loop.start(&mut host).unwrap();
    render_loop.renderer_mut().fail_next_submit = true;

    assert!(render_loop.tick(&mut host, 0.0).is_err());
    assert!(render_loop.is_running());
    assert!(render_loop.tick_pending());
    assert_eq!(host.tick_requests, 2);

    assert!(render_loop.tick(&mut host, 16.0).is_ok());
    assert_eq!(render_loop.renderer().frames.len(), 1);
}

#[test]
fn test_frames_are_submitted_clean() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(800, 600);
    {
        let context = render_loop.context_mut();
        let root = context.graph.root();
        let pivot = context.graph.add_node(root, NodeDesc::pivot("pivot")).unwrap();
        context.graph.add_node(pivot, NodeDesc::new().with_position(Vec3::X)).unwrap();
        context.animation.add_binding("pivot", Spin::new(Axis::Y, 1.0));
    }
    render_loop.start(&mut host).unwrap();

    render_loop.tick(&mut host, 500.0).unwrap();

    assert_eq!(render_loop.renderer().last_frame().unwrap().dirty_nodes, 0);
}

#[test]
fn test_timestamp_drives_animation() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(800, 600);
    let (pivot, sphere, light) = {
        let graph = &mut render_loop.context_mut().graph;
        let root = graph.root();
        let pivot = graph.add_node(root, NodeDesc::pivot("smallSpherePivot")).unwrap();
        let sphere = graph
            .add_node(pivot, NodeDesc::new().with_position(Vec3::new(5.0, 0.0, 0.0)))
            .unwrap();
        let light = graph
            .add_node(root, NodeDesc::new().with_light(Light::directional(0xffffff, 1.0)))
            .unwrap();
        (pivot, sphere, light)
    };
    {
        let animation = &mut render_loop.context_mut().animation;
        animation.add_binding(pivot, Spin::new(Axis::Y, FRAC_PI_2));
        animation.add_dependent_binding(light, sphere, DependentRule::LightTarget);
    }
    render_loop.start(&mut host).unwrap();

    let outcome = render_loop.tick(&mut host, 1000.0).unwrap();

    match outcome {
        TickOutcome::Rendered(report) => assert_eq!(report.time_seconds, 1.0),
        TickOutcome::Skipped => panic!("tick was skipped"),
    }
    let frame = render_loop.renderer().last_frame().unwrap();
    let expected = Vec3::new(0.0, 0.0, -5.0);
    assert!(frame.world_positions[&sphere].abs_diff_eq(expected, 1e-5));
    assert!(frame.light_targets[&light].abs_diff_eq(expected, 1e-5));
}

// ============================================================================
// Tests: Resize
// ============================================================================

#[test]
fn test_resize_updates_aspect_seen_by_renderer() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(800, 600);
    render_loop.start(&mut host).unwrap();
    render_loop.tick(&mut host, 0.0).unwrap();

    render_loop.on_resize(1000, 500).unwrap();
    render_loop.tick(&mut host, 16.0).unwrap();

    assert_eq!(render_loop.renderer().resizes.len(), 2);
    assert_eq!(render_loop.renderer().last_frame().unwrap().aspect, 2.0);
}

#[test]
fn test_zero_height_resize_keeps_rendering() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(800, 400);
    render_loop.start(&mut host).unwrap();

    let result = render_loop.on_resize(800, 0);
    assert_eq!(result, Err(Error::InvalidViewport { width: 800, height: 0 }));

    render_loop.tick(&mut host, 0.0).unwrap();
    assert_eq!(render_loop.renderer().last_frame().unwrap().aspect, 2.0);
    assert_eq!(render_loop.renderer().resizes.len(), 1);
}

// ============================================================================
// Tests: Assets
// ============================================================================

#[test]
fn test_asset_attach_happens_before_recompute() {
    let mut render_loop = new_loop();
    let mut host = MockHost::new(800, 600);
    let mut loader = MockAssetLoader::default();
    render_loop.context_mut().assets.load_and_attach(&mut loader, "font.json", |graph, font| {
        let root = graph.root();
        graph.add_node(
            root,
            NodeDesc::new()
                .with_name("text")
                .with_resource(font)
                .with_position(Vec3::new(-3.0, 0.0, 0.0)),
        )?;
        Ok(())
    });
    render_loop.start(&mut host).unwrap();

    render_loop.tick(&mut host, 0.0).unwrap();
    assert!(render_loop.context().graph.find_by_name("text").is_none());

    loader.complete_next(ResourceHandle::new(1));
    render_loop.tick(&mut host, 16.0).unwrap();

    let text = render_loop.context().graph.find_by_name("text").unwrap();
    let frame = render_loop.renderer().last_frame().unwrap();
    assert_eq!(frame.world_positions[&text], Vec3::new(-3.0, 0.0, 0.0));
    assert_eq!(frame.dirty_nodes, 0);
    assert!(render_loop.context().assets.is_empty());
}

// ============================================================================
// Tests: Context
// ============================================================================

#[test]
fn test_config_time_scale() {
    let config = RenderLoopConfig { time_scale: 1.0, ..RenderLoopConfig::default() };
    let render_loop = RenderLoop::new(SceneContext::new(&config), MockRenderer::new());
    assert_eq!(render_loop.context().animation.time_scale(), 1.0);
}

#[test]
fn test_into_parts_returns_scene() {
    let mut render_loop = new_loop();
    let root = render_loop.context().graph.root();
    render_loop.context_mut().graph.add_node(root, NodeDesc::pivot("kept")).unwrap();

    let (context, renderer) = render_loop.into_parts();

    assert!(context.graph.find_by_name("kept").is_some());
    assert!(renderer.frames.is_empty());
}
