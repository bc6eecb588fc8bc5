//! mapdrag main entry point.
//!
//! Drag a map sprite with the mouse, optionally clamped so it never scrolls
//! past the window, built on:
//! - **raylib** for windowing, input and drawing
//! - **bevy_ecs** for entity-component-system architecture
//!
//! # Commands
//!
//! - `mapdrag run` (default) opens the window, spawns the scene and runs the
//!   frame loop: poll the pointer, grab/release, fit colliders, follow the
//!   pointer, render.
//! - `mapdrag fit-colliders <SCENE>` fits every map's box collider to its
//!   sprite bounds and writes the scene back, without opening a window.
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- run --scene assets/scene.json
//! RUST_LOG=debug cargo run -- fit-colliders assets/scene.json
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use bevy_ecs::prelude::*;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mapdrag::fitcolliders::fit_scene_file;
use mapdrag::game;
use mapdrag::resources::gameconfig::GameConfig;
use mapdrag::scene::SceneData;
use mapdrag::systems::drag::{drag_follow_system, drag_pointer_system};
use mapdrag::systems::input::update_pointer_state;
use mapdrag::systems::render::render_system;
use mapdrag::systems::validation::DragSetupError;

/// Drag a 2D map with the mouse, clamped to the viewport.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the window and drag maps around (default).
    Run {
        /// Scene file to spawn, overrides `[scene] path` from the config.
        #[arg(long, value_name = "PATH")]
        scene: Option<PathBuf>,

        /// Let maps scroll past the viewport edges.
        #[arg(long)]
        no_restrict: bool,
    },
    /// Fit every map's box collider to its sprite bounds and write the scene.
    FitColliders {
        /// Scene file to read.
        scene: PathBuf,

        /// Where to write the result (default: overwrite the input).
        #[arg(long, short, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Only write back the maps with these names (repeatable).
        #[arg(long, value_name = "NAME")]
        only: Vec<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::FitColliders {
            scene,
            output,
            only,
        }) => {
            let output = output.unwrap_or_else(|| scene.clone());
            match fit_scene_file(&scene, &output, &only) {
                Ok(report) => {
                    println!(
                        "{}: {} collider(s) updated, {} unchanged",
                        output.display(),
                        report.updated.len(),
                        report.unchanged.len()
                    );
                    if !report.not_found.is_empty() {
                        std::process::exit(2);
                    }
                }
                Err(e) => {
                    log::error!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        Some(Command::Run { scene, no_restrict }) => {
            let config = load_config(cli.config, scene, no_restrict);
            if let Err(e) = run(config) {
                log::error!("{}", e);
                std::process::exit(1);
            }
        }
        None => {
            let config = load_config(cli.config, None, false);
            if let Err(e) = run(config) {
                log::error!("{}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Config file values, then command-line overrides. A missing config file
/// is created with the defaults.
fn load_config(path: PathBuf, scene: Option<PathBuf>, no_restrict: bool) -> GameConfig {
    let mut config = GameConfig::with_path(path);
    if let Err(e) = config.load_or_create() {
        log::warn!("{}; using defaults", e);
    }
    if let Some(scene) = scene {
        config.scene_path = scene;
    }
    if no_restrict {
        config.restrict_to_screen = false;
    }
    config
}

fn run(config: GameConfig) -> Result<(), DragSetupError> {
    let scene =
        SceneData::load_from_file(&config.scene_path).map_err(|e| DragSetupError::Scene {
            path: config.scene_path.display().to_string(),
            reason: e.to_string(),
        })?;

    // --------------- Raylib window & assets ---------------
    let (window_width, window_height) = config.window_size();
    let (mut rl, thread) = raylib::init()
        .size(window_width as i32, window_height as i32)
        .resizable()
        .title("mapdrag")
        .build();
    rl.set_target_fps(config.target_fps);
    // Disable ESC to exit
    rl.set_exit_key(None);

    // --------------- ECS world + resources ---------------
    let mut world = game::init_world(&config);
    game::load_scene(&mut world, &scene)?;
    let textures = game::load_scene_textures(&mut rl, &thread, &scene);
    world.insert_resource(textures);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    let mut update = game::build_update_schedule();
    update.add_systems(update_pointer_state.before(drag_pointer_system));
    update.add_systems(render_system.after(drag_follow_system));
    update
        .initialize(&mut world)
        .expect("Failed to initialize schedule");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let (w, h) = {
            let rl = world.non_send_resource::<raylib::RaylibHandle>();
            (rl.get_screen_width(), rl.get_screen_height())
        };
        game::resize_screen(&mut world, w, h);

        update.run(&mut world);

        world.clear_trackers(); // Clear changed components for next frame
    }
    Ok(())
}
