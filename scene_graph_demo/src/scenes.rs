//! Demo scenes.
//!
//! `solar` is a three-level pivot hierarchy (sun, earth orbit, moon orbit).
//! `tracking` is a ground with a ring of tori, an orbiting small sphere and
//! a shadow-casting light kept aimed at it, plus a text label attached once
//! its font finishes loading.

use glam::Vec3;
use scene_graph_engine::scenegraph::Result;
use scene_graph_engine::scenegraph::animation::{DependentRule, Spin};
use scene_graph_engine::scenegraph::camera::CameraConfig;
use scene_graph_engine::scenegraph::render::SceneContext;
use scene_graph_engine::scenegraph::resource::{AssetLoader, MeshFactory, MeshKind};
use scene_graph_engine::scenegraph::scene::{Axis, Light, NodeDesc, NodeFlags, SceneGraph, Transform};
use crate::assets::DemoMeshFactory;

const FONT_URI: &str = "fonts/droid/droid_serif_bold.typeface.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoScene {
    SolarSystem,
    LightTracking,
}

impl DemoScene {
    /// Scene selected by the first command line argument (default: tracking)
    pub fn from_arg(arg: Option<&str>) -> Self {
        match arg {
            Some("solar") => DemoScene::SolarSystem,
            _ => DemoScene::LightTracking,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            DemoScene::SolarSystem => "Scene graph - solar system",
            DemoScene::LightTracking => "Scene graph - light tracking",
        }
    }

    pub fn camera(&self) -> CameraConfig {
        match self {
            DemoScene::SolarSystem => CameraConfig::default(),
            DemoScene::LightTracking => CameraConfig {
                far: 100.0,
                position: Vec3::new(7.0, 7.0, 0.0),
                ..CameraConfig::default()
            },
        }
    }

    pub fn build(
        &self,
        context: &mut SceneContext,
        meshes: &mut DemoMeshFactory,
        fonts: &mut dyn AssetLoader,
    ) -> Result<()> {
        match self {
            DemoScene::SolarSystem => build_solar_system(context, meshes),
            DemoScene::LightTracking => build_light_tracking(context, meshes, fonts),
        }
    }
}

fn build_solar_system(context: &mut SceneContext, meshes: &mut DemoMeshFactory) -> Result<()> {
    let graph = &mut context.graph;
    let root = graph.root();
    let sphere = meshes.build(&MeshKind::Sphere {
        radius: 1.0,
        width_segments: 6,
        height_segments: 6,
    })?;

    graph.add_node(root, NodeDesc::new()
        .with_name("light")
        .with_position(Vec3::new(-1.0, 2.0, 4.0))
        .with_light(Light::directional(0xffffff, 1.0)))?;

    let solar_system = graph.add_node(root, NodeDesc::pivot("solarSystem"))?;
    graph.add_node(solar_system, NodeDesc::new()
        .with_name("sun")
        .with_transform(Transform::new().with_uniform_scale(3.0))
        .with_geometry(sphere))?;

    let earth_orbit = graph.add_node(solar_system, NodeDesc::pivot("earthOrbit")
        .with_position(Vec3::new(10.0, 0.0, 0.0)))?;
    graph.add_node(earth_orbit, NodeDesc::new().with_name("earth").with_geometry(sphere))?;

    let moon_orbit = graph.add_node(earth_orbit, NodeDesc::pivot("moonOrbit")
        .with_position(Vec3::new(2.0, 0.0, 0.0)))?;
    graph.add_node(moon_orbit, NodeDesc::new()
        .with_name("moon")
        .with_transform(Transform::new().with_uniform_scale(0.5))
        .with_geometry(sphere))?;

    let animation = &mut context.animation;
    animation.add_binding("solarSystem", Spin::new(Axis::Y, 0.5));
    animation.add_binding("earthOrbit", Spin::new(Axis::Y, 2.0));
    animation.add_binding("moonOrbit", Spin::new(Axis::Y, 5.0));
    Ok(())
}

fn build_light_tracking(
    context: &mut SceneContext,
    meshes: &mut DemoMeshFactory,
    fonts: &mut dyn AssetLoader,
) -> Result<()> {
    let graph = &mut context.graph;
    let root = graph.root();

    add_lights(graph)?;

    let ground = meshes.build(&MeshKind::Plane { width: 10.0, height: 10.0 })?;
    graph.add_node(root, NodeDesc::new()
        .with_name("ground")
        .with_transform(Transform::new().with_rotation(Vec3::new((-90f32).to_radians(), 0.0, 0.0)))
        .with_geometry(ground)
        .with_flags(NodeFlags::VISIBLE | NodeFlags::RECEIVE_SHADOW))?;

    let knot = meshes.build(&MeshKind::TorusKnot {
        radius: 1.0,
        tube: 0.3,
        tubular_segments: 128,
        radial_segments: 64,
        p: 2,
        q: 3,
    })?;
    graph.add_node(root, NodeDesc::new()
        .with_name("torusKnot")
        .with_position(Vec3::new(0.0, 1.6, 0.0))
        .with_geometry(knot)
        .with_shadows())?;

    let torus = meshes.build(&MeshKind::Torus {
        radius: 0.4,
        tube: 0.1,
        radial_segments: 32,
        tubular_segments: 32,
    })?;
    for i in 0..8 {
        let angle = (45.0 * i as f32).to_radians();
        let pivot = graph.add_node(root, NodeDesc::pivot("torusPivot")
            .with_transform(Transform::new().with_rotation(Vec3::new(0.0, angle, 0.0))))?;
        graph.add_node(pivot, NodeDesc::new()
            .with_position(Vec3::new(3.0, 0.5, 0.0))
            .with_geometry(torus)
            .with_shadows())?;
    }

    let small_sphere = meshes.build(&MeshKind::Sphere {
        radius: 0.3,
        width_segments: 32,
        height_segments: 32,
    })?;
    let pivot = graph.add_node(root, NodeDesc::pivot("smallSpherePivot"))?;
    graph.add_node(pivot, NodeDesc::new()
        .with_name("smallSphere")
        .with_position(Vec3::new(3.0, 0.5, 0.0))
        .with_geometry(small_sphere)
        .with_shadows())?;

    let animation = &mut context.animation;
    animation.add_binding("smallSpherePivot", Spin::degrees_per_second(Axis::Y, 50.0));
    animation.add_dependent_binding("directionalLight", "smallSphere", DependentRule::LightTarget);

    let mut text_meshes = meshes.clone();
    context.assets.load_and_attach(fonts, FONT_URI, move |graph, font| {
        let geometry = text_meshes.build(&MeshKind::Text {
            text: "Hello scene graph!".to_string(),
            font,
            size: 0.5,
            depth: 0.1,
        })?;
        let root = graph.root();
        graph.add_node(root, NodeDesc::new()
            .with_name("text")
            .with_position(Vec3::new(-2.0, 3.0, 0.0))
            .with_geometry(geometry)
            .with_resource(font))?;
        Ok(())
    });
    Ok(())
}

/// Dim fill light from above and the shadow-casting light that tracks the sphere
fn add_lights(graph: &mut SceneGraph) -> Result<()> {
    let root = graph.root();
    graph.add_node(root, NodeDesc::new()
        .with_name("auxLight")
        .with_position(Vec3::new(0.0, 5.0, 0.0))
        .with_light(Light::directional(0xffffff, 0.5)))?;
    graph.add_node(root, NodeDesc::new()
        .with_name("directionalLight")
        .with_position(Vec3::new(-1.0, 2.0, 4.0))
        .with_light(Light::directional(0xffffff, 0.5).with_cast_shadow(true)))?;
    Ok(())
}
