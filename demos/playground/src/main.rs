//! Playground: a complete editor session in the terminal
//!
//! Builds a small project, saves it, reloads it, plays it for a few
//! frames while a ball leaves a trigger zone, and reverts on exit.
//!
//! Run with RUST_LOG=info to see the session narrated.
//!
//! Usage: cargo run -p playground

use diorama_assets::{Material, Mesh};
use diorama_runtime::{AppContext, RuntimeConfig};
use diorama_scene::{Camera, Light, MeshRenderer, RectCollider, Spinner};
use glam::Vec3;

fn main() {
    env_logger::init();

    let project_dir = std::env::temp_dir().join("diorama_playground");
    let mut app =
        AppContext::init(RuntimeConfig::new(&project_dir)).expect("Failed to boot the runtime");

    // Shared resources first; the scene references them by guid
    let (mesh_guid, mesh) = app.store().create(Mesh::quad(1.0));
    let (material_guid, material) = app
        .store()
        .create(Material::new("red").with_base_color([1.0, 0.1, 0.1, 1.0]));

    let scene = app.scene_mut();
    let ball = scene.create_object("Ball");
    ball.add(
        MeshRenderer::new()
            .with_mesh(mesh_guid, mesh)
            .with_material(material_guid, material),
    )
    .expect("Failed to attach renderer");
    ball.add(Spinner::new(45.0)).expect("Failed to attach spinner");
    ball.add(RectCollider::new(1.0, 1.0))
        .expect("Failed to attach collider");
    let ball = ball.guid();

    scene
        .create_object("Trigger1")
        .add(RectCollider::new(2.0, 2.0))
        .expect("Failed to attach zone collider");

    let camera = scene.create_object("Camera");
    camera.set_position(Vec3::new(0.0, 3.0, 8.0));
    camera.look_at(Vec3::ZERO);
    camera
        .add(Camera::perspective(60.0, 0.1, 100.0))
        .expect("Failed to attach camera");
    let camera = camera.guid();
    scene
        .set_active_camera(Some(camera))
        .expect("Failed to set active camera");
    scene
        .add_light(Light::new([2.0, 4.0, 2.0]).with_range(12.0))
        .expect("Failed to add light");

    app.save_project().expect("Failed to save project");
    let stats = app.load_project().expect("Failed to reload project");
    log::info!(
        "Reloaded: {} resources loaded, {} already present",
        stats.loaded,
        stats.skipped
    );

    app.enter_play().expect("Failed to enter play mode");
    for frame in 0..6u32 {
        if frame == 3 {
            // Carry the ball out of the zone to force an Exit
            if let Some(object) = app.scene_mut().find_mut(ball) {
                object.set_position(Vec3::new(10.0, 0.0, 0.0));
            }
        }
        app.tick(1.0 / 60.0);
        for event in app.take_trigger_events() {
            log::info!(
                "Frame {}: {:?} between {} and {}",
                app.frame(),
                event.kind,
                event.owner_a,
                event.owner_b
            );
        }
    }

    if let Some(rect) = app.triggers().rect_by_owner(ball) {
        let id = rect.id;
        if app.triggers_mut().take_hit_entered(id) {
            log::info!("Ball entered a zone this session");
        }
    }

    let mut draws = 0;
    app.visit_renderables(|_, _, _| draws += 1);
    log::info!("Renderables this frame: {}", draws);

    app.exit_play().expect("Failed to exit play mode");
    if let Some(object) = app.scene().find(ball) {
        log::info!("Ball position after revert: {}", object.transform().position);
    }

    app.shutdown();
}
