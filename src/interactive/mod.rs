//! Interactive viewer: controller, frame loop and the windowed app

pub mod app;
pub mod controller;
pub mod frame_loop;

pub use app::run_viewer;
pub use controller::{
    ButtonId, InteractionState, ViewerConfig, ViewerController, ViewerEvent,
};
pub use frame_loop::{CancellationToken, FrameLoop};
