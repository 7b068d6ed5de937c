//! Drops a handful of balls into a box and lets them bounce until their
//! fuses run out. Run with `RUST_LOG=debug` to see the timeline and removals.

use framekit_api_core::Vec2;
use framekit_orchestrator::{Engine, EngineConfig};
use framekit_scene_core::{
    AssetHandle, Bouncing, DrawTransform, FadeEffect, FadeOut, FrameContext, Friction, Gravity,
    GravityDirection, Placement, RenderSink, SceneGraph, SceneNode, Sprite, Timebomb,
};

#[derive(Default)]
struct Tally {
    sprites: usize,
}

impl RenderSink for Tally {
    fn draw_sprite(&mut self, _: AssetHandle, _: u32, _: &DrawTransform) {
        self.sprites += 1;
    }
}

fn ball(ctx: &mut FrameContext) -> SceneNode {
    let x = ctx.random_range(40.0, 280.0);
    let mut node = SceneNode::visual(
        Vec2::new(x, 20.0),
        Sprite::new(AssetHandle(1), Vec2::new(16.0, 16.0)).centered(),
    )
    .with_behaviour(Gravity::new(GravityDirection::Down, 300.0))
    .with_behaviour(Friction::new(0.1))
    .with_behaviour(Bouncing::new())
    .with_behaviour(Timebomb::new(2.5))
    .with_behaviour(FadeOut::new(0.5, FadeEffect::ZoomAndFade));
    let angle = ctx.random_range(0.0, core::f32::consts::PI);
    node.object.move_at(120.0, angle);
    node
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = EngineConfig::from_json(
        r#"{ "screen_size": { "x": 320.0, "y": 240.0 }, "rng_seed": 7, "fps_logging": true }"#,
    )?;
    let mut engine = Engine::new(cfg).with_scene("box", SceneGraph::new())?;

    for i in 0..5 {
        engine.register_timed_action(
            0.4 * i as f32,
            |scene: &mut SceneGraph, ctx: &mut FrameContext| {
                let node = ball(ctx);
                scene.spawn_child(ctx, None, node, Placement::Front);
            },
            Some("drop ball"),
        );
    }

    let dt = 1.0 / 60.0;
    let mut tally = Tally::default();
    for _ in 0..300 {
        let report = engine.update(dt)?;
        engine.draw(dt, &mut tally)?;
        if report.frame % 60 == 0 {
            println!("{}", serde_json::to_string(&report)?);
        }
    }

    println!(
        "drew {} sprites; {} nodes left in scene",
        tally.sprites,
        engine.scene()?.len()
    );
    Ok(())
}
