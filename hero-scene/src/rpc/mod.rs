//! JSON-RPC 2.0 messaging between the hero scene and the hosting page.
//!
//! The scene listens for `message` events on the window and posts replies and
//! notifications to `window.parent` (the page itself when not framed).
//!
//! ## Message Flow
//!
//! ```text
//! Page script                               Hero scene (wasm)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │ <───────────────── Response (with ID) ─┤
//!        │ <────────── Notification (no ID) ──────┤
//! ```
//!
//! ## Requests
//!
//! - `get_load_report`: status of every model (`pending`, `loaded`, `failed` with reason)
//! - `get_viewport`: current viewport size, capped pixel ratio and device class
//! - `get_fps`: smoothed frame rate
//!
//! ## Notifications
//!
//! - `model_loaded` / `model_failed`: one per model load outcome
//! - `scene_running`: the first model is in the scene and rendering started
//! - `intro_finished`: the intro timeline completed
//!
//! ```typescript
//! window.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "get_load_report",
//!   params: {},
//!   id: 1
//! }), "*");
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error

/// Request handling, notification queueing and the wasm message listener.
pub mod web_rpc;
