//! Headless sky-to-PNG render command

use anyhow::{bail, Context, Result};
use nimbus_player::ConfigOverrides;
use nimbus_render::{DrawBatch, FlatPipeline, HeadlessContext};
use nimbus_sim::{palette, SkySim};
use std::path::PathBuf;

pub struct RenderArgs {
    pub overrides: ConfigOverrides,
    pub output: PathBuf,
    pub seconds: f32,
    pub fps: f32,
}

/// Number of fixed steps needed to cover `seconds` at `fps`
pub fn step_count(seconds: f32, fps: f32) -> u32 {
    (seconds.max(0.0) * fps).round() as u32
}

/// Reject timing flags that would make the step loop empty or unbounded
pub fn check_timing(seconds: f32, fps: f32) -> Result<()> {
    if !fps.is_finite() || fps <= 0.0 {
        bail!("--fps must be a positive number, got {fps}");
    }
    if !seconds.is_finite() || seconds < 0.0 {
        bail!("--seconds must be a finite, non-negative number, got {seconds}");
    }
    Ok(())
}

pub fn run(args: RenderArgs) -> Result<()> {
    check_timing(args.seconds, args.fps)?;
    let config = args.overrides.resolve()?;
    let (width, height) = (config.width, config.height);

    // Steps longer than max_dt are clamped by the simulation
    if 1.0 / args.fps > config.max_dt {
        log::warn!(
            "[render] Step 1/{} s exceeds max_dt {}, simulated time will run short",
            args.fps,
            config.max_dt
        );
    }

    let mut sim = SkySim::new(config);
    let dt = 1.0 / args.fps;
    let steps = step_count(args.seconds, args.fps);
    for _ in 0..steps {
        sim.step(dt);
    }

    let stats = sim.stats();
    println!(
        "Simulated {:.1}s in {} steps: {} live puffs ({} spawned, {} culled)",
        sim.elapsed(),
        steps,
        stats.live,
        stats.spawned,
        stats.culled
    );

    let mut batch = DrawBatch::new();
    batch.extend_from_commands(&sim.draw_commands());

    let ctx = pollster::block_on(HeadlessContext::new(width, height))
        .context("Failed to create headless render context")?;
    let pipeline = FlatPipeline::new(&ctx.device, ctx.format);
    ctx.render_batch(&pipeline, &batch, palette::CLEAR);

    pollster::block_on(ctx.save_png(&args.output))
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Saved {}x{} frame to {}", width, height, args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_count_rounds() {
        assert_eq!(step_count(10.0, 60.0), 600);
        assert_eq!(step_count(0.5, 30.0), 15);
        assert_eq!(step_count(-1.0, 60.0), 0);
    }

    #[test]
    fn non_finite_timing_is_rejected() {
        assert!(check_timing(20.0, 60.0).is_ok());
        assert!(check_timing(0.0, 30.0).is_ok());

        let err = check_timing(f32::INFINITY, 60.0).unwrap_err();
        assert!(err.to_string().contains("--seconds"));
        assert!(check_timing(f32::NAN, 60.0).is_err());
        assert!(check_timing(-2.0, 60.0).is_err());

        let err = check_timing(10.0, f32::INFINITY).unwrap_err();
        assert!(err.to_string().contains("--fps"));
        assert!(check_timing(10.0, f32::NAN).is_err());
        assert!(check_timing(10.0, 0.0).is_err());
    }
}
