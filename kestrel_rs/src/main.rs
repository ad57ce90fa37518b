//! Demo game of kestrel engine: actors seek their targets,
//! then the game switches to the next level.

use std::error::Error;

use log::LevelFilter;
use ultraviolet::Vec2;

use kestrel_core::actor::ActorBuilder;
use kestrel_core::components::GraphicsComponent;
use kestrel_core::config::Config;
use kestrel_core::ecs::World;
use kestrel_core::error::Result;
use kestrel_core::scene::Scene;
use kestrel_core::systems::{GraphicsSystem, MotionSystem};
use kestrel_core::{DeltaTime, Engine};

use render::LogRenderContext;
use search::{SearchComponent, SearchSystem};

mod logger;
mod render;
mod search;

const APP_NAME: &str = env!("CARGO_CRATE_NAME", "binary must be compiled by Cargo");
const APP_VERSION_STR: &str = env!("CARGO_PKG_VERSION", "binary must be compiled by Cargo");

const FRAME: DeltaTime = DeltaTime::from_millis(16);
const FRAMES_PER_LEVEL: u32 = 120;

/// Level where seekers run to the corners of the screen.
fn seek_level(world: &mut World) -> Result<()> {
    world.register_component::<SearchComponent>()?;
    world.add_system(MotionSystem::new())?;
    world.add_system(SearchSystem::new())?;
    world.add_system(GraphicsSystem::new(LogRenderContext::new()))?;

    let corners = [
        Vec2::new(0.0, 0.0),
        Vec2::new(640.0, 0.0),
        Vec2::new(0.0, 480.0),
        Vec2::new(640.0, 480.0),
    ];
    for (index, corner) in corners.into_iter().enumerate() {
        ActorBuilder::new(Vec2::new(320.0, 240.0))
            .named(format!("seeker {}", index))
            .graphics(GraphicsComponent::rect(Vec2::new(8.0, 8.0)))
            .with(SearchComponent::new(corner, 250.0))
            .spawn(world)?;
    }
    Ok(())
}

/// Level with a single actor drifting and spinning.
fn drift_level(world: &mut World) -> Result<()> {
    world.add_system(MotionSystem::new())?;
    world.add_system(GraphicsSystem::new(LogRenderContext::new()))?;

    ActorBuilder::new(Vec2::new(100.0, 100.0))
        .named("drifter")
        .velocity(Vec2::new(30.0, 10.0))
        .angular_velocity(1.5)
        .on_draw(|ctx, args| ctx.draw_text(args.transform.pos, "drifter", args.opacity))
        .spawn(world)?;
    Ok(())
}

fn run_level(engine: &mut Engine, name: &str) -> Result<()> {
    engine.goto(name)?;
    for _ in 0..FRAMES_PER_LEVEL {
        engine.step(FRAME)?;
    }
    if let Some(scene) = engine.director().active() {
        let world = scene.world();
        if let Some(system) = world.system::<SearchSystem>() {
            log::info!("{} seekers have arrived", system.arrived());
        }
        if let Some(system) = world.system::<GraphicsSystem<LogRenderContext>>() {
            log::info!("{} draw calls in scene `{}`", system.context().calls(), name);
        }
    }
    Ok(())
}

/// Entry point of kestrel demo game
fn main() -> std::result::Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let _handle = logger::init(LevelFilter::Info)?;
    log::info!("logger initialized successfully");

    let version = APP_VERSION_STR.parse()?;
    let config = Config::new(APP_NAME.to_string(), version, cfg!(debug_assertions));

    let mut engine = Engine::new(config);
    engine.add_scene(Scene::new("seek", seek_level))?;
    engine.add_scene(Scene::new("drift", drift_level))?;

    run_level(&mut engine, "seek")?;
    run_level(&mut engine, "drift")?;
    engine.shutdown();
    Ok(())
}
