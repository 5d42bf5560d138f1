// Input handling system
//
// Keyboard events are translated to game actions and folded into a small
// per-player state that the simulation samples once per tick.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `config`: Key binding table and raw event translation
// - `player`: Held directions and the queued jump
//
// ## Usage Example
//
// ```rust
// use hackstep::engine::input::{InputBindings, PlayerInput};
//
// let bindings = InputBindings::default();
// let mut input = PlayerInput::new();
//
// // In your event loop
// if let Some(event) = bindings.translate(key.physical_key, key.state, key.repeat) {
//     if event.pressed {
//         input.press(event.action);
//     } else {
//         input.release(event.action);
//     }
// }
//
// // Once per tick
// let horizontal = input.horizontal();
// ```

pub mod action;
pub mod config;
pub mod player;

// Re-export commonly used types
pub use action::{default_bindings, Action};
pub use config::{InputBindings, InputEvent};
pub use player::PlayerInput;
