//! A woodworking workbench built with Rust and the Bevy game engine.
//!
//! Pick a solid, grab a handle, and push a face or turn the piece.

use kerf::core;

fn main() {
    core::platform::init_panic_handling();
    let cli_args = core::platform::get_cli_args();
    match core::run_app(cli_args) {
        Ok(()) => {}
        Err(error) => core::platform::handle_error(error),
    }
}
