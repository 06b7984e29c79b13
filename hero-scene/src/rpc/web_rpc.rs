use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::engine::core::app_state::HeroState;
use crate::engine::intro::player::IntroFinished;
use crate::engine::loading::model_loader::{LoadResult, ModelLoadOutcome, ModelLoadTracker};
use crate::engine::viewport::state::{DeviceClass, ViewportState};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: serde_json::Value,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<serde_json::Value>,
    pub error: Option<RpcError>,
    pub id: Option<serde_json::Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: serde_json::Value,
}

/// JSON-RPC 2.0 error object.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<serde_json::Value>,
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn invalid_request(message: &str) -> Self {
        Self {
            code: -32600,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}

/// Outgoing message queues, flushed to the page once per frame.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the page without expecting a response.
    pub fn send_notification(&mut self, method: &str, params: serde_json::Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }

    pub fn pending_notifications(&self) -> &[RpcNotification] {
        &self.outgoing_notifications
    }
}

/// Plugin establishing the page messaging layer.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(OnEnter(HeroState::Running), notify_scene_running)
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_scene_events,
                    send_outgoing_messages,
                )
                    .chain(),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            // Unframed pages echo our own responses and notifications back.
            if is_rpc_request(&message_str) {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    match window() {
        Some(window) => {
            if let Err(e) =
                window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
            {
                error!("Failed to register message listener: {:?}", e);
            }
        }
        None => error!("{}", crate::error::HeroError::MissingWindow),
    }

    // Listener lives as long as the page.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping the message queue filled by the JS callback.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Raw RPC message received from the page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// A JSON-RPC request carries a method and an id, and never a result or error.
pub fn is_rpc_request(message: &str) -> bool {
    let Ok(serde_json::Value::Object(fields)) = serde_json::from_str::<serde_json::Value>(message)
    else {
        return false;
    };
    fields.get("jsonrpc").is_some()
        && fields.get("method").is_some_and(serde_json::Value::is_string)
        && fields.contains_key("id")
        && !fields.contains_key("result")
        && !fields.contains_key("error")
}

/// Read-only scene state a request handler may answer from.
pub struct RpcContext<'a> {
    pub tracker: Option<&'a ModelLoadTracker>,
    pub viewport: Option<&'a ViewportState>,
    pub device_class: Option<DeviceClass>,
    pub fps: Option<f64>,
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    tracker: Option<Res<ModelLoadTracker>>,
    viewport: Option<Res<ViewportState>>,
    device_class: Option<Res<DeviceClass>>,
    diagnostics: Option<Res<DiagnosticsStore>>,
) {
    for event in events.read() {
        if !is_rpc_request(&event.content) {
            continue;
        }
        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Ignoring malformed RPC message: {}", parse_error);
                continue;
            }
        };

        let context = RpcContext {
            tracker: tracker.as_deref(),
            viewport: viewport.as_deref(),
            device_class: device_class.as_deref().copied(),
            fps: diagnostics
                .as_deref()
                .and_then(|d| d.get(&FrameTimeDiagnosticsPlugin::FPS))
                .and_then(|fps| fps.smoothed()),
        };

        if let Some(response) = handle_rpc_request(&request, &context) {
            rpc_interface.queue_response(response);
        }
    }
}

/// Handle one request; notifications (no id) get no response.
pub fn handle_rpc_request(request: &RpcRequest, context: &RpcContext) -> Option<RpcResponse> {
    let id = request.id.clone()?;

    if request.jsonrpc != "2.0" {
        return Some(create_error_response(
            id,
            RpcError::invalid_request("Expected jsonrpc 2.0"),
        ));
    }

    let result = match request.method.as_str() {
        "get_load_report" => handle_get_load_report(context),
        "get_viewport" => handle_get_viewport(context),
        "get_fps" => Ok(serde_json::json!({ "fps": context.fps.unwrap_or(0.0) as f32 })),
        _ => {
            warn!("Unknown RPC method: {}", request.method);
            return Some(create_error_response(
                id,
                RpcError {
                    code: -32601,
                    message: "Method not found".to_string(),
                    data: Some(serde_json::json!({ "method": request.method })),
                },
            ));
        }
    };

    match result {
        Ok(result_value) => Some(RpcResponse {
            jsonrpc: "2.0".to_string(),
            result: Some(result_value),
            error: None,
            id: Some(id),
        }),
        Err(error) => Some(create_error_response(id, error)),
    }
}

fn handle_get_load_report(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    let Some(tracker) = context.tracker else {
        return Ok(serde_json::json!({ "resolved": false, "models": [] }));
    };

    let models = serde_json::to_value(tracker.report())
        .map_err(|e| RpcError::internal_error(&e.to_string()))?;
    Ok(serde_json::json!({
        "resolved": true,
        "loaded": tracker.loaded_count(),
        "failed": tracker.failed_count(),
        "pending": tracker.pending_count(),
        "models": models,
    }))
}

fn handle_get_viewport(context: &RpcContext) -> Result<serde_json::Value, RpcError> {
    let viewport = context
        .viewport
        .ok_or_else(|| RpcError::internal_error("Viewport not initialised"))?;

    Ok(serde_json::json!({
        "width": viewport.width,
        "height": viewport.height,
        "device_pixel_ratio": viewport.device_pixel_ratio,
        "device_class": context.device_class.map(|c| c.as_str()),
    }))
}

fn create_error_response(id: serde_json::Value, error: RpcError) -> RpcResponse {
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result: None,
        error: Some(error),
        id: Some(id),
    }
}

/// Forward load outcomes and intro completion to the page.
fn notify_scene_events(
    mut outcomes: EventReader<ModelLoadOutcome>,
    mut intro: EventReader<IntroFinished>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for outcome in outcomes.read() {
        match &outcome.result {
            LoadResult::Loaded => rpc_interface.send_notification(
                "model_loaded",
                serde_json::json!({ "index": outcome.index, "id": outcome.id }),
            ),
            LoadResult::Failed(reason) => rpc_interface.send_notification(
                "model_failed",
                serde_json::json!({ "index": outcome.index, "id": outcome.id, "reason": reason }),
            ),
        }
    }

    for finished in intro.read() {
        rpc_interface.send_notification(
            "intro_finished",
            serde_json::json!({ "duration": finished.duration }),
        );
    }
}

fn notify_scene_running(mut rpc_interface: ResMut<WebRpcInterface>) {
    rpc_interface.send_notification("scene_running", serde_json::json!({}));
}

/// Send queued notifications and responses to the page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to the parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        match serde_json::to_string(message) {
            Ok(json) => debug!("RPC out: {}", json),
            Err(e) => error!("Failed to serialize message: {}", e),
        }
    }
}
