use bevy::prelude::*;
use bevy::time::Real;
use bevy::window::PrimaryWindow;

use crate::engine::camera::hero_camera::{HeroCamera, update_camera_aspect};
use crate::engine::core::config::HeroConfig;
use crate::engine::core::host::{Host, ViewportSignal};
use crate::engine::viewport::state::ViewportState;
use crate::engine::viewport::throttle::ResizeThrottle;

/// Raw resize observed by the host, before throttling.
#[derive(Event, Debug, Clone, Copy)]
pub struct ViewportResized(pub ViewportSignal);

/// Read the host viewport and settle the device class once, at startup.
pub fn init_viewport(mut commands: Commands, host: Res<Host>, config: Res<HeroConfig>) {
    let viewport = ViewportState::from_signal(host.viewport(), config.max_device_pixel_ratio);
    let class = host.device_class(config.breakpoint);

    info!(
        "Viewport {}x{} @{}x, {} layout",
        viewport.width,
        viewport.height,
        viewport.device_pixel_ratio,
        class.as_str()
    );

    commands.insert_resource(viewport);
    commands.insert_resource(class);
    commands.insert_resource(ResizeThrottle::new(config.resize_interval));
}

/// Size the render surface and apply the capped pixel ratio.
pub fn apply_viewport_to_window(window: &mut Window, viewport: &ViewportState) {
    window
        .resolution
        .set_scale_factor_override(Some(viewport.device_pixel_ratio));
    window.resolution.set(viewport.width, viewport.height);
}

pub fn configure_render_surface(
    viewport: Res<ViewportState>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    for mut window in &mut windows {
        apply_viewport_to_window(&mut window, &viewport);
    }
}

/// Feed resize events through the throttle and apply the settled viewport.
pub fn apply_throttled_resize(
    mut events: EventReader<ViewportResized>,
    mut throttle: ResMut<ResizeThrottle>,
    time: Res<Time<Real>>,
    config: Res<HeroConfig>,
    mut viewport: ResMut<ViewportState>,
    mut cameras: Query<&mut Projection, With<HeroCamera>>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    let now = time.elapsed();
    for event in events.read() {
        throttle.push(event.0, now);
    }

    let Some(signal) = throttle.poll(now) else {
        return;
    };

    *viewport = ViewportState::from_signal(signal, config.max_device_pixel_ratio);
    for mut projection in &mut cameras {
        update_camera_aspect(&mut projection, &viewport);
    }
    for mut window in &mut windows {
        apply_viewport_to_window(&mut window, &viewport);
    }
    debug!(
        "Viewport resized to {}x{} @{}x",
        viewport.width, viewport.height, viewport.device_pixel_ratio
    );
}

/// Native builds follow the Bevy window.
#[cfg(not(target_arch = "wasm32"))]
pub fn forward_window_resizes(
    mut resized: EventReader<bevy::window::WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut out: EventWriter<ViewportResized>,
) {
    let Some(last) = resized.read().last() else {
        return;
    };
    let scale = windows
        .get(last.window)
        .map(|window| window.scale_factor())
        .unwrap_or(1.0);
    out.write(ViewportResized(ViewportSignal::new(last.width, last.height, scale)));
}

/// Browser `resize` events pushed from the JS callback.
#[cfg(target_arch = "wasm32")]
#[derive(Resource)]
pub struct ResizeQueue(std::sync::Arc<std::sync::Mutex<Vec<ViewportSignal>>>);

#[cfg(target_arch = "wasm32")]
pub fn setup_resize_listener(mut commands: Commands) {
    use crate::engine::core::host::{BrowserHost, HostSignals};
    use std::sync::{Arc, Mutex};
    use wasm_bindgen::prelude::*;

    let queue: Arc<Mutex<Vec<ViewportSignal>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = queue.clone();

    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if let Ok(mut queue) = queue_clone.lock() {
            queue.push(BrowserHost.viewport());
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    match web_sys::window() {
        Some(window) => {
            if let Err(e) =
                window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register resize listener: {:?}", e);
            }
        }
        None => error!("{}", crate::error::HeroError::MissingWindow),
    }

    // Listener lives as long as the page.
    closure.forget();
    commands.insert_resource(ResizeQueue(queue));
}

#[cfg(target_arch = "wasm32")]
pub fn drain_resize_queue(queue: Option<Res<ResizeQueue>>, mut out: EventWriter<ViewportResized>) {
    let Some(queue) = queue else {
        return;
    };
    let signals = match queue.0.lock() {
        Ok(mut pending) => std::mem::take(&mut *pending),
        Err(_) => Vec::new(),
    };
    for signal in signals {
        out.write(ViewportResized(signal));
    }
}
