//! Headless driver for the grid engine
//!
//! Run with: cargo run --features cli --bin grid-cli
//!
//! Environment:
//! - GRID_CONFIG: JSON options, same keys as the browser (e.g. `{"spacing": 15}`)
//! - GRID_VIEWPORT: `WIDTHxHEIGHT`, default 1280x720
//! - GRID_MARGIN: top margin in pixels, default 0
//! - GRID_FRAMES: stop after this many frames (0 or unset runs until Ctrl-C)

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use grid_effect::core::{FrameStats, GridConfig, GridEngine, RecordingSurface, Viewport};
    use grid_effect::time::now_millis;
    use std::time::Duration;
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,grid_effect=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::var("GRID_CONFIG") {
        Ok(json) => GridConfig::from_json(&json)?,
        Err(_) => GridConfig::page_default(),
    };
    let viewport = std::env::var("GRID_VIEWPORT")
        .ok()
        .and_then(|v| parse_viewport(&v))
        .unwrap_or(Viewport::new(1280, 720));
    let margin: u32 = std::env::var("GRID_MARGIN")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let max_frames: u64 = std::env::var("GRID_FRAMES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    info!(?viewport, margin, max_frames, ?config, "Starting headless grid");

    let mut engine = GridEngine::new(config, viewport, margin, now_millis());
    let mut surface = RecordingSurface::new();
    let mut frame_interval = tokio::time::interval(Duration::from_millis(16));
    let mut stats_interval = tokio::time::interval(Duration::from_secs(5));

    let mut frames = 0u64;
    let mut frames_last_interval = 0u64;
    let mut last = FrameStats::default();

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                let now = now_millis();
                let (x, y) = pointer_path(viewport, now);
                engine.pointer_moved(x, y);
                last = engine.render(&mut surface, now);
                frames += 1;
                frames_last_interval += 1;
                if max_frames > 0 && frames >= max_frames {
                    break;
                }
            }
            _ = stats_interval.tick() => {
                info!(
                    frames,
                    fps = format!("{:.1}", frames_last_interval as f64 / 5.0),
                    points = last.drawn,
                    highlighted = last.highlighted,
                    color_index = last.color_index,
                    "stats"
                );
                frames_last_interval = 0;
            }
            _ = tokio::signal::ctrl_c() => {
                warn!("Interrupted");
                break;
            }
        }
    }

    engine.release();
    info!(
        frames,
        highlighted = last.highlighted,
        color_index = last.color_index,
        "Headless grid finished"
    );
    Ok(())
}

/// `1280x720` -> viewport
#[cfg(not(target_arch = "wasm32"))]
fn parse_viewport(value: &str) -> Option<grid_effect::core::Viewport> {
    let (w, h) = value.trim().split_once(['x', 'X'])?;
    Some(grid_effect::core::Viewport::new(
        w.trim().parse().ok()?,
        h.trim().parse().ok()?,
    ))
}

/// Lissajous sweep over the viewport, one loop every ~12 seconds
#[cfg(not(target_arch = "wasm32"))]
fn pointer_path(viewport: grid_effect::core::Viewport, now: f64) -> (f64, f64) {
    let t = now / 12_000.0 * std::f64::consts::TAU;
    let half_w = viewport.width as f64 / 2.0;
    let half_h = viewport.height as f64 / 2.0;
    (half_w + half_w * (3.0 * t).sin(), half_h + half_h * (2.0 * t).cos())
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use grid_effect::core::Viewport;

    #[test]
    fn viewport_parsing() {
        assert_eq!(parse_viewport("800x600"), Some(Viewport::new(800, 600)));
        assert_eq!(parse_viewport(" 10 X 20 "), Some(Viewport::new(10, 20)));
        assert_eq!(parse_viewport("800"), None);
        assert_eq!(parse_viewport("axb"), None);
    }

    #[test]
    fn pointer_path_stays_in_viewport() {
        let viewport = Viewport::new(640, 480);
        for i in 0..500 {
            let (x, y) = pointer_path(viewport, i as f64 * 97.0);
            assert!((0.0..=640.0).contains(&x));
            assert!((0.0..=480.0).contains(&y));
        }
    }
}
