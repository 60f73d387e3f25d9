use serde::{Deserialize, Serialize};

/// A discrete request a driver (UI handler, script, external caller) sends
/// to the view controller.
///
/// Drivers never touch object state; they only produce actions. Transition
/// indices are signed so that bad driver input is reported, not wrapped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Fly to a transition and highlight its objects.
    Activate { index: i64 },
    /// Toggle the explicit hover flag on a transition's objects.
    Hover { index: i64, enable: bool },
    /// Pointer moved to a pixel position on the surface.
    PointerMove { x: f32, y: f32 },
    /// Pointer left the surface.
    PointerLeave,
    /// A camera drag started; pointer hover is suppressed until it ends.
    GestureStart,
    /// Camera drag by a pixel delta.
    GestureDrag { dx: f32, dy: f32 },
    /// The camera drag was released.
    GestureEnd,
    /// Run one or more frame ticks.
    Tick {
        #[serde(default = "one_frame")]
        frames: u32,
    },
    /// Jump to the transition that best matches the hovered object.
    BestTransition,
    /// The render surface changed size.
    Resize { width: u32, height: u32 },
}

fn one_frame() -> u32 {
    1
}
