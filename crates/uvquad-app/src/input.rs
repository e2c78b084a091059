// ---------------------------------------------------------------------------
// Key — windowing-library-independent key representation
// ---------------------------------------------------------------------------

/// A keyboard key, independent of any windowing library.
///
/// `main.rs` maps `winit::keyboard::PhysicalKey` → `Key`; everything else
/// in the input pipeline works purely with this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    T,
    V,
    Q,
    Escape,
}

// ---------------------------------------------------------------------------
// InputAction — what the app does in response to input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum InputAction {
    ToggleTopology,
    ToggleView,
    Quit,
    /// Report the UV under the cursor. Pixel coordinates, origin top-left.
    InspectPixel { x: u32, y: u32 },
}

pub fn on_key(key: Key) -> InputAction {
    match key {
        Key::T => InputAction::ToggleTopology,
        Key::V => InputAction::ToggleView,
        Key::Q | Key::Escape => InputAction::Quit,
    }
}

/// Turn a cursor position in physical pixels into an inspection of the pixel
/// underneath it. Returns `None` when the cursor is outside the surface.
pub fn on_mouse_click(cursor: (f64, f64), width: u32, height: u32) -> Option<InputAction> {
    let (cx, cy) = cursor;
    if cx < 0.0 || cy < 0.0 {
        return None;
    }
    let (x, y) = (cx.floor() as u32, cy.floor() as u32);
    (x < width && y < height).then_some(InputAction::InspectPixel { x, y })
}
