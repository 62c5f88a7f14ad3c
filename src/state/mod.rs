pub mod gesture;
pub mod pointers;

pub use gesture::{GestureController, GestureMode, PointerInput, PointerPhase};
