//! The orrery demo without a window.
//!
//! Assembles the scene against a [`CommandRecorder`], runs a fixed number of
//! frames with a scripted key sequence, and logs where things ended up.
//!
//! Run with: `RUST_LOG=info cargo run -p orrery --example headless --no-default-features`

use orrery::prelude::*;

const FRAMES: u32 = 240;
const DELTA: f32 = 1.0 / 60.0;

fn main() -> orrery::Result<()> {
    env_logger::init();

    let config = DemoConfig::default();
    let mut input = config.input();
    let mut recorder = CommandRecorder::new();
    let mut textures = TextureLoader::new();
    let mut world = World::create(&mut recorder, &mut textures, &SceneAssets::builtin())?;

    for frame in 0..FRAMES {
        // Orbit for the first second, then hold W for half a second.
        match frame {
            0 => input.press_key("x"),
            60 => {
                input.release_key("x");
                input.press_key("w");
            }
            90 => input.release_key("w"),
            _ => {}
        }

        textures.poll(&mut recorder);
        world.update(DELTA, &input);
        world.draw_frame(&mut recorder, 16.0 / 9.0, config.clear_color());
    }

    log::info!(
        "Ran {} frames, {} draws in the last one",
        recorder.frame_count(),
        recorder.last_frame_draws().len()
    );
    for name in ["camera", "light", "cube", "sphere0"] {
        if let Some(position) = world.find(name).and_then(|id| world.world_translation(id)) {
            log::info!("{name:>8} at {position}");
        }
    }
    Ok(())
}
