//! Integration tests for the application context
//!
//! Covers boot, project round-trips, scene installation, and the
//! read-only renderer seams.

use std::path::PathBuf;
use std::sync::Arc;

use diorama_assets::{Material, Mesh};
use diorama_runtime::*;
use diorama_scene::{Camera, Light, MeshRenderer, RectCollider, Scene};
use glam::Vec3;

fn project_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("diorama_runtime_tests").join(name);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_init_registers_builtin_kinds() {
    let app = AppContext::init(RuntimeConfig::default()).unwrap();

    assert_eq!(app.components().len(), 4);
    assert!(app.components().contains_tag("MeshRenderer"));
    assert!(app.components().contains_tag("Camera"));
    assert!(app.components().contains_tag("RectCollider"));
    assert!(app.components().contains_tag("Spinner"));

    assert_eq!(app.resources().len(), 3);
    assert!(app.resources().contains_tag("Mesh"));
    assert!(app.resources().contains_tag("Material"));
    assert!(app.resources().contains_tag("Shader"));

    assert_eq!(app.frame(), 0);
    assert!(app.scene().is_empty());
    app.shutdown();
}

#[test]
fn test_tick_advances_the_frame_counter() {
    let mut app = AppContext::init(RuntimeConfig::default()).unwrap();
    app.tick(0.016);
    app.tick(0.016);
    app.tick(0.016);
    assert_eq!(app.frame(), 3);
    assert!(app.trigger_events().is_empty());
    app.shutdown();
}

#[test]
fn test_config_paths_join_the_project_dir() {
    let config = RuntimeConfig::new("/tmp/demo")
        .with_manifest_file("assets.json")
        .with_scene_file("level.json");
    assert_eq!(config.manifest_path(), PathBuf::from("/tmp/demo/assets.json"));
    assert_eq!(config.scene_path(), PathBuf::from("/tmp/demo/level.json"));
}

#[test]
fn test_save_and_load_project_round_trip() {
    let dir = project_dir("round_trip");
    let mut app = AppContext::init(RuntimeConfig::new(&dir)).unwrap();

    let (mesh_guid, mesh) = app.store().create(Mesh::quad(1.0));
    let (material_guid, material) = app
        .store()
        .create(Material::new("red").with_base_color([1.0, 0.0, 0.0, 1.0]));
    let scene = app.scene_mut();
    let ball = scene.create_object("Ball");
    ball.set_position(Vec3::new(1.0, 2.0, 0.0));
    ball.add(
        MeshRenderer::new()
            .with_mesh(mesh_guid, mesh)
            .with_material(material_guid, material),
    )
    .unwrap();
    ball.add(RectCollider::new(1.0, 1.0)).unwrap();
    let cam = scene.create_object("Cam");
    cam.add(Camera::perspective(60.0, 0.1, 100.0)).unwrap();
    let cam = cam.guid();
    scene.set_active_camera(Some(cam)).unwrap();
    scene.add_light(Light::new([0.0, 4.0, 0.0])).unwrap();

    let saved = app.scene().to_document().unwrap();
    app.save_project().unwrap();

    let mut other = AppContext::init(RuntimeConfig::new(&dir)).unwrap();
    let stats = other.load_project().unwrap();
    assert_eq!(stats.loaded, 2);
    assert_eq!(stats.skipped, 0);
    assert_eq!(other.scene().len(), 2);
    assert_eq!(other.scene().active_camera(), Some(cam));
    assert_eq!(other.store().tag_of(mesh_guid), Some("Mesh"));
    assert_eq!(other.triggers().len(), 1);
    assert_eq!(other.scene().to_document().unwrap(), saved);

    app.shutdown();
    other.shutdown();
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_load_project_failure_leaves_live_state() {
    let dir = project_dir("missing_project");
    let mut app = AppContext::init(RuntimeConfig::new(&dir)).unwrap();
    app.scene_mut().create_object("Keep");

    let err = app.load_project().unwrap_err();
    assert!(matches!(err, RuntimeError::Asset(_)));
    assert_eq!(app.scene().len(), 1);
    assert!(app.scene().find_by_name("Keep").is_some());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_missing_scene_file_aborts_after_the_manifest() {
    let dir = project_dir("half_project");
    let mut app = AppContext::init(RuntimeConfig::new(&dir)).unwrap();
    app.store().create(Mesh::quad(1.0));
    app.save_project().unwrap();
    std::fs::remove_file(dir.join("scene.json")).unwrap();

    let mut other = AppContext::init(RuntimeConfig::new(&dir)).unwrap();
    other.scene_mut().create_object("Keep");
    let err = other.load_project().unwrap_err();
    assert!(matches!(err, RuntimeError::Scene(_)));
    // The manifest landed before the failure; the scene stayed
    assert_eq!(other.store().len(), 1);
    assert_eq!(other.scene().len(), 1);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_set_scene_rebuilds_triggers() {
    let mut app = AppContext::init(RuntimeConfig::default()).unwrap();
    let mut scene = Scene::new();
    scene
        .create_object("A")
        .add(RectCollider::new(1.0, 1.0))
        .unwrap();
    scene
        .create_object("B")
        .add(RectCollider::new(1.0, 1.0))
        .unwrap();
    scene.create_object("C");

    app.set_scene(scene);
    assert_eq!(app.triggers().len(), 2);
    assert_eq!(app.scene().len(), 3);
}

#[test]
fn test_visit_renderables_skips_meshless_renderers() {
    let mut app = AppContext::init(RuntimeConfig::default()).unwrap();
    let (guid, mesh) = app.store().create(Mesh::quad(2.0));
    let scene = app.scene_mut();
    let drawn = scene.create_object("Drawn");
    drawn.set_position(Vec3::new(3.0, 0.0, 0.0));
    drawn
        .add(MeshRenderer::new().with_mesh(guid, mesh.clone()))
        .unwrap();
    scene.create_object("Empty").add(MeshRenderer::new()).unwrap();
    scene.create_object("Plain");

    let mut visited = Vec::new();
    app.visit_renderables(|matrix, visited_mesh, material| {
        assert!(Arc::ptr_eq(visited_mesh, &mesh));
        assert!(material.is_none());
        visited.push(matrix.transform_point3(Vec3::ZERO));
    });
    assert_eq!(visited, vec![Vec3::new(3.0, 0.0, 0.0)]);
}

#[test]
fn test_camera_matrices_follow_the_active_camera() {
    let mut app = AppContext::init(RuntimeConfig::default()).unwrap();
    assert!(app.camera_matrices(16.0 / 9.0).is_none());

    let scene = app.scene_mut();
    let cam = scene.create_object("Cam");
    cam.set_position(Vec3::new(0.0, 0.0, 5.0));
    cam.add(Camera::perspective(60.0, 0.1, 100.0)).unwrap();
    let cam = cam.guid();
    scene.set_active_camera(Some(cam)).unwrap();

    let (view, projection) = app.camera_matrices(16.0 / 9.0).unwrap();
    // The view matrix carries the camera position to the origin
    let eye = view.transform_point3(Vec3::new(0.0, 0.0, 5.0));
    assert!(eye.length() < 1e-5);
    assert!(projection.to_cols_array()[0] > 0.0);
}

#[test]
fn test_lights_surface_reads_the_scene() {
    let mut app = AppContext::init(RuntimeConfig::default()).unwrap();
    app.scene_mut()
        .add_light(Light::new([0.0, 2.0, 0.0]).with_range(6.0))
        .unwrap();
    assert_eq!(app.lights().len(), 1);
    assert_eq!(app.lights()[0].range, 6.0);
}
