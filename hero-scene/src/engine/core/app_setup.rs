use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::engine::assets::hero_manifest::HeroManifest;
use crate::engine::camera::hero_camera::{activate_hero_camera, spawn_hero_camera};
use crate::engine::core::app_state::{HeroState, log_render_loop_start};
use crate::engine::core::config::HeroConfig;
use crate::engine::core::host::default_host;
use crate::engine::core::window_config::{attach_canvas, create_window_config};
use crate::engine::intro::overlay::default_overlay;
use crate::engine::intro::player::{IntroFinished, IntroPlayer, advance_intro, start_intro};
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::model_loader::{
    ModelLoadOutcome, ModelLoadTracker, poll_model_loads, request_model_loads,
};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::scene::hero_models::{SpawnedModels, spawn_loaded_models};
use crate::engine::scene::lighting::spawn_lighting;
use crate::engine::viewport::resize::{
    ViewportResized, apply_throttled_resize, configure_render_surface, init_viewport,
};
use crate::rpc::web_rpc::WebRpcPlugin;

pub fn create_app() -> App {
    let config = HeroConfig::default();
    let canvas = attach_canvas(&config);

    let mut app = App::new();
    app.add_plugins(create_default_plugins(canvas.as_ref().ok().cloned()))
        .add_plugins(FrameTimeDiagnosticsPlugin::default());

    // Logging is only available once the default plugins are in.
    if let Err(err) = &canvas {
        error!("Canvas not attached ({err}), falling back to a generated canvas");
    }

    app.insert_resource(config)
        .insert_resource(default_host())
        .insert_resource(default_overlay())
        .add_plugins(HeroScenePlugin);

    app
}

/// Everything the hero scene needs on top of Bevy's default plugins.
pub struct HeroScenePlugin;

impl Plugin for HeroScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            SceneControllerPlugin,
            ModelLoadingPlugin,
            ViewportSourcePlugin,
            WebRpcPlugin,
        ));
    }
}

/// Scene lifecycle: viewport, camera, lights, model placement, resize and intro.
///
/// Expects `Host` and `Overlay` resources to be inserted by the caller. Model
/// load outcomes arrive as `ModelLoadOutcome` events.
pub struct SceneControllerPlugin;

impl Plugin for SceneControllerPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<HeroState>()
            .init_resource::<HeroConfig>()
            .init_resource::<LoadingProgress>()
            .init_resource::<ManifestLoader>()
            .init_resource::<ModelLoadTracker>()
            .init_resource::<SpawnedModels>()
            .init_resource::<IntroPlayer>()
            .add_event::<ModelLoadOutcome>()
            .add_event::<ViewportResized>()
            .add_event::<IntroFinished>();

        app.add_systems(
            Startup,
            (
                init_viewport,
                spawn_hero_camera,
                configure_render_surface,
                start_loading,
                spawn_lighting,
            )
                .chain(),
        )
        .add_systems(
            OnEnter(HeroState::Running),
            (log_render_loop_start, activate_hero_camera, start_intro).chain(),
        )
        .add_systems(Update, (spawn_loaded_models, apply_throttled_resize))
        .add_systems(
            Update,
            advance_intro.run_if(in_state(HeroState::Running)),
        );
    }
}

/// Manifest asset and glTF loads through the asset server.
pub struct ModelLoadingPlugin;

impl Plugin for ModelLoadingPlugin {
    fn build(&self, app: &mut App) {
        // Registers HeroManifest as a loadable asset type from JSON files.
        app.add_plugins(JsonAssetPlugin::<HeroManifest>::new(&["json"]))
            .add_systems(
                Update,
                (load_manifest_system, request_model_loads, poll_model_loads)
                    .chain()
                    .before(spawn_loaded_models),
            );
    }
}

/// Turns platform resize notifications into `ViewportResized` events.
pub struct ViewportSourcePlugin;

impl Plugin for ViewportSourcePlugin {
    fn build(&self, app: &mut App) {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use crate::engine::viewport::resize::forward_window_resizes;
            app.add_systems(
                Update,
                forward_window_resizes.before(apply_throttled_resize),
            );
        }

        #[cfg(target_arch = "wasm32")]
        {
            use crate::engine::viewport::resize::{drain_resize_queue, setup_resize_listener};
            app.add_systems(Startup, setup_resize_listener).add_systems(
                Update,
                drain_resize_queue.before(apply_throttled_resize),
            );
        }
    }
}

fn create_default_plugins(canvas_selector: Option<String>) -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config(canvas_selector)),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use bevy::ecs::system::RunSystemOnce;
    use bevy::state::app::StatesPlugin;
    use bevy::time::TimeUpdateStrategy;
    use constants::intro::MV_TITLE_SELECTOR;
    use constants::models::BUILTIN_MODELS;

    use super::*;
    use crate::engine::camera::hero_camera::HeroCamera;
    use crate::engine::core::host::{FixedHost, Host, ViewportSignal};
    use crate::engine::intro::overlay::{Overlay, RecordingOverlay, StyleState};
    use crate::engine::intro::player::IntroPhase;
    use crate::engine::scene::hero_models::HeroModel;
    use crate::engine::viewport::state::{DeviceClass, ViewportState};

    fn headless_app(width: f32, height: f32, dpr: f32, config: HeroConfig) -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(config)
            .insert_resource(Host::new(FixedHost::new(width, height, dpr)))
            .insert_resource(Overlay::new(RecordingOverlay::new()))
            .add_plugins(SceneControllerPlugin);
        app.update();
        app
    }

    fn resolve(app: &mut App, index: usize) {
        let spec = app
            .world()
            .resource::<ModelLoadTracker>()
            .get(index)
            .expect("model in tracker")
            .spec
            .clone();
        app.world_mut().send_event(ModelLoadOutcome::loaded(&spec));
    }

    fn state(app: &App) -> HeroState {
        *app.world().resource::<State<HeroState>>().get()
    }

    fn models(app: &mut App) -> Vec<(HeroModel, Transform)> {
        let mut query = app.world_mut().query::<(&HeroModel, &Transform)>();
        let mut found: Vec<_> = query
            .iter(app.world())
            .map(|(model, transform)| (model.clone(), *transform))
            .collect();
        found.sort_by_key(|(model, _)| model.index);
        found
    }

    fn camera_active(app: &mut App) -> bool {
        let mut query = app
            .world_mut()
            .query_filtered::<&Camera, With<HeroCamera>>();
        query.single(app.world()).expect("hero camera").is_active
    }

    fn camera_aspect(app: &mut App) -> f32 {
        let mut query = app
            .world_mut()
            .query_filtered::<&Projection, With<HeroCamera>>();
        match query.single(app.world()).expect("hero camera") {
            Projection::Perspective(perspective) => perspective.aspect_ratio,
            _ => panic!("hero camera is not perspective"),
        }
    }

    #[test]
    fn startup_builds_idle_scene() {
        let mut app = headless_app(1024.0, 768.0, 3.0, HeroConfig::builtin_models());

        assert_eq!(state(&app), HeroState::Loading);
        assert_eq!(*app.world().resource::<DeviceClass>(), DeviceClass::Desktop);
        assert_eq!(app.world().resource::<ViewportState>().device_pixel_ratio, 2.0);
        assert_eq!(app.world().resource::<ModelLoadTracker>().pending_count(), 6);
        assert!(app.world().resource::<LoadingProgress>().manifest_resolved);
        assert!(!camera_active(&mut app));
        assert!((camera_aspect(&mut app) - 1024.0 / 768.0).abs() < 1e-6);

        let mut lights = app.world_mut().query::<&DirectionalLight>();
        assert_eq!(lights.iter(app.world()).count(), 5);
    }

    #[test]
    fn desktop_places_all_six_models() {
        let mut app = headless_app(1024.0, 768.0, 1.0, HeroConfig::builtin_models());
        for index in 0..6 {
            resolve(&mut app, index);
        }
        app.update();
        app.update();

        assert_eq!(state(&app), HeroState::Running);
        let placed = models(&mut app);
        assert_eq!(placed.len(), 6);
        for ((model, transform), builtin) in placed.iter().zip(BUILTIN_MODELS.iter()) {
            assert_eq!(model.id, builtin.id);
            assert_eq!(transform.translation, Vec3::from(builtin.desktop.position));
            assert_eq!(transform.scale, Vec3::from(builtin.desktop.scale));
        }
    }

    #[test]
    fn mobile_first_model_starts_render_loop() {
        let mut app = headless_app(400.0, 800.0, 2.0, HeroConfig::builtin_models());
        assert_eq!(*app.world().resource::<DeviceClass>(), DeviceClass::Mobile);

        resolve(&mut app, 0);
        app.update();
        app.update();

        assert_eq!(state(&app), HeroState::Running);
        assert!(camera_active(&mut app));
        let placed = models(&mut app);
        assert_eq!(placed.len(), 1);
        let (model, transform) = &placed[0];
        assert_eq!(model.id, "ice");
        assert_eq!(transform.scale, Vec3::splat(0.4));
        assert_eq!(transform.translation, Vec3::new(1.3, 2.0, 1.0));
    }

    #[test]
    fn any_first_load_starts_the_loop() {
        let mut app = headless_app(1024.0, 768.0, 1.0, HeroConfig::builtin_models());
        resolve(&mut app, 3);
        app.update();
        app.update();

        assert_eq!(state(&app), HeroState::Running);
        let tracker = app.world().resource::<ModelLoadTracker>();
        assert_eq!(tracker.loaded_count(), 1);
        assert_eq!(tracker.pending_count(), 5);
        assert_eq!(models(&mut app)[0].0.id, "ice_macha");
    }

    #[test]
    fn failed_loads_stay_out_of_the_scene() {
        let mut app = headless_app(1024.0, 768.0, 1.0, HeroConfig::builtin_models());
        let spec = app.world().resource::<ModelLoadTracker>().get(1).unwrap().spec.clone();
        app.world_mut()
            .send_event(ModelLoadOutcome::failed(&spec, "404 Not Found"));
        app.update();
        app.update();

        assert_eq!(state(&app), HeroState::Loading);
        assert!(models(&mut app).is_empty());
        assert_eq!(app.world().resource::<ModelLoadTracker>().failed_count(), 1);
    }

    #[test]
    fn repeated_completion_is_not_inserted_twice() {
        let mut app = headless_app(1024.0, 768.0, 1.0, HeroConfig::builtin_models());
        resolve(&mut app, 2);
        resolve(&mut app, 2);
        app.update();
        resolve(&mut app, 2);
        app.update();

        assert_eq!(models(&mut app).len(), 1);
        assert_eq!(app.world().resource::<SpawnedModels>().len(), 1);
    }

    #[test]
    fn intro_plays_once_to_the_end() {
        let overlay = RecordingOverlay::new()
            .with_elements(MV_TITLE_SELECTOR, 1, StyleState::new(0.0, 40.0));
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(200)))
            .insert_resource(HeroConfig::builtin_models())
            .insert_resource(Host::new(FixedHost::new(1024.0, 768.0, 1.0)))
            .insert_resource(Overlay::new(overlay.clone()))
            .add_plugins(SceneControllerPlugin);
        app.update();

        resolve(&mut app, 0);
        app.update();
        app.update();
        assert_eq!(app.world().resource::<IntroPlayer>().phase(), IntroPhase::Playing);

        // Later loads and a second start request leave playback alone.
        resolve(&mut app, 1);
        app.update();
        app.world_mut()
            .run_system_once(start_intro)
            .expect("start_intro runs");

        for _ in 0..30 {
            app.update();
        }

        let player = app.world().resource::<IntroPlayer>();
        assert_eq!(player.starts(), 1);
        assert_eq!(player.phase(), IntroPhase::Finished);
        assert_eq!(
            overlay.style(MV_TITLE_SELECTOR, 0),
            Some(StyleState::new(1.0, 0.0))
        );
    }

    #[test]
    fn resize_applies_latest_event() {
        let config = HeroConfig {
            resize_interval: Duration::ZERO,
            ..HeroConfig::builtin_models()
        };
        let mut app = headless_app(1024.0, 768.0, 1.0, config);

        for (width, height) in [(900.0, 700.0), (640.0, 480.0), (500.0, 1000.0)] {
            app.world_mut()
                .send_event(ViewportResized(ViewportSignal::new(width, height, 3.0)));
        }
        app.update();

        let viewport = *app.world().resource::<ViewportState>();
        assert_eq!((viewport.width, viewport.height), (500.0, 1000.0));
        assert_eq!(viewport.device_pixel_ratio, 2.0);
        assert!((camera_aspect(&mut app) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn resize_burst_collapses_into_one_update() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin))
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(20)))
            .insert_resource(HeroConfig::builtin_models())
            .insert_resource(Host::new(FixedHost::new(1024.0, 768.0, 1.0)))
            .insert_resource(Overlay::new(RecordingOverlay::new()))
            .add_plugins(SceneControllerPlugin);
        app.update();

        let mut seen_widths = Vec::new();
        for width in [800.0, 700.0, 600.0] {
            app.world_mut()
                .send_event(ViewportResized(ViewportSignal::new(width, 400.0, 1.0)));
            app.update();
            seen_widths.push(app.world().resource::<ViewportState>().width);
        }
        for _ in 0..10 {
            app.update();
            seen_widths.push(app.world().resource::<ViewportState>().width);
        }

        assert!(!seen_widths.contains(&800.0));
        assert!(!seen_widths.contains(&700.0));
        assert_eq!(seen_widths.last(), Some(&600.0));
        assert!((camera_aspect(&mut app) - 1.5).abs() < 1e-6);
    }
}
