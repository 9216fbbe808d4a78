//! The orrery demo in a window.
//!
//! - **W/A/S/D**: move the camera on its boom
//! - **X / Y / Z**: rotate the pivot (hold **Shift** to reverse)
//! - **I/J/K/L**, **U/O**: move the light
//! - **F**: wireframe on (**Shift+F** off)
//! - **R**: reset the pivot, camera and light
//! - **H** / **Shift+H**: hide / show the help text in the title bar
//!
//! Bindings, window size and the assets directory come from
//! `assets/orrery.json`; pass another path as the first argument to use a
//! different file.
//!
//! Run with: `cargo run -p orrery --example solar`

use orrery::prelude::*;

fn main() {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/assets/orrery.json").to_owned());

    let result = DemoConfig::load_or_default(&path).and_then(|config| App::new(config).run());
    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
