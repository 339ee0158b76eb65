pub mod pointer;

pub use pointer::{PressState, handle_pointer_input};
