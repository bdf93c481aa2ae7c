// Crate-level lints: same numeric allowances as the library
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)] // main() walks the whole session

//! Scripted ride simulator for the workout overlay.
//!
//! Drives the widget tree through a full session (warmup, workout, cooldown,
//! pause, the settings menus and the summary) at a fixed frame time, drawing
//! into a headless `SimulatorDisplay`.
//!
//! # Usage
//!
//! ```text
//! hud-sim [SNAPSHOT_DIR]
//! ```
//!
//! When `SNAPSHOT_DIR` is given, a PNG snapshot is written every time the
//! display state changes. Environment:
//!
//! - `HUD_VIEWPORT=WxH`: physical display size (default 1280x960)
//! - `HUD_ROTATED=1`: display mounted rotated by 90 degrees
//! - `HUD_STYLE=panel`: panel-style readouts instead of classic
//! - `RUST_LOG`: tracing filter (default `info`)

use core::fmt::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettings, OutputSettingsBuilder, SimulatorDisplay};
use heapless::String;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use ar_workout_hud::assets::AssetCatalog;
use ar_workout_hud::colors::{BLACK, BLUE, LIGHT_GRAY, WHITE};
use ar_workout_hud::config::{BLINK_FRAMES, DisplayConfig, FRAME_TIME};
use ar_workout_hud::message::{DisplayState, FlagKey, FloatKey, Message, TextKey, WorkoutStage};
use ar_workout_hud::overlays::{BannerPosition, BannerView, ButtonLegendView, LegendButton};
use ar_workout_hud::printer::Printer;
use ar_workout_hud::profiling::{EventLog, FrameMetrics};
use ar_workout_hud::views::{HudStyle, workout_hud};
use ar_workout_hud::widgets::Widget;

// =============================================================================
// Session Script
// =============================================================================

/// One stretch of the scripted ride.
struct Phase {
    state: DisplayState,
    stage: WorkoutStage,
    frames: u32,
    /// Flag held for the whole phase (selected menu, highlighted button, ...)
    flag: Option<FlagKey>,
    banner: Option<&'static str>,
}

const fn phase(state: DisplayState, stage: WorkoutStage, frames: u32) -> Phase {
    Phase {
        state,
        stage,
        frames,
        flag: None,
        banner: None,
    }
}

const fn with_flag(mut phase: Phase, flag: FlagKey) -> Phase {
    phase.flag = Some(flag);
    phase
}

const fn with_banner(mut phase: Phase, banner: &'static str) -> Phase {
    phase.banner = Some(banner);
    phase
}

const SESSION: [Phase; 12] = [
    with_banner(phase(DisplayState::Main, WorkoutStage::Warmup, 60), "Warmup"),
    phase(DisplayState::Info, WorkoutStage::Warmup, 30),
    with_banner(phase(DisplayState::Main, WorkoutStage::Workout, 60), "Intervals"),
    phase(DisplayState::HeartRate, WorkoutStage::Workout, 30),
    with_flag(phase(DisplayState::Pause, WorkoutStage::Workout, 30), FlagKey::ResumeButtonActive),
    with_flag(phase(DisplayState::MenuBrightness, WorkoutStage::Workout, 30), FlagKey::BrightnessSelected),
    with_flag(phase(DisplayState::MenuVolume, WorkoutStage::Workout, 30), FlagKey::VolumeSelected),
    with_flag(phase(DisplayState::MenuSpeed, WorkoutStage::Workout, 30), FlagKey::SpeedSelected),
    with_flag(phase(DisplayState::Pause, WorkoutStage::Workout, 20), FlagKey::ResumeButtonActive),
    with_banner(phase(DisplayState::Main, WorkoutStage::Cooldown, 60), "Cooldown"),
    with_flag(phase(DisplayState::Summary, WorkoutStage::Cooldown, 45), FlagKey::Badge1),
    phase(DisplayState::Off, WorkoutStage::Cooldown, 5),
];

/// Synthetic ride values for `frame`, `progress` through the current phase.
fn ride_message(phase: &Phase, frame: u64, progress: f32, style: HudStyle) -> Message {
    let seconds = frame as f32 * FRAME_TIME.as_secs_f32();
    let miles = seconds * 0.006;
    let pace_secs = 450 + (frame % 40) as u32;

    let mut text: String<16> = String::new();
    let mut message = Message::new()
        .with_display_state(phase.state)
        .with_workout_stage(phase.stage)
        .with_float(FloatKey::StageProgress, progress)
        .with_float(FloatKey::BrightnessProgress, 0.5 + 0.4 * progress)
        .with_float(FloatKey::VolumeProgress, 0.3 + 0.5 * progress)
        .with_flag(FlagKey::MultiProgress, style == HudStyle::Panel)
        .with_flag(FlagKey::Flash, (frame / u64::from(BLINK_FRAMES)) % 2 == 1);
    message.set_total_racers(24);

    let mut put = |message: &mut Message, key: TextKey, args: core::fmt::Arguments<'_>| {
        text.clear();
        text.write_fmt(args).ok();
        message.write_text(key, &text);
    };
    put(&mut message, TextKey::Rank, format_args!("{}/24", 12 - (frame / 60).min(8)));
    put(&mut message, TextKey::EnergyKj, format_args!("{}", (seconds * 0.9) as u32));
    put(&mut message, TextKey::Calories, format_args!("{}", (seconds * 1.1) as u32));
    put(&mut message, TextKey::DistanceMiles, format_args!("{miles:.2}"));
    put(&mut message, TextKey::SpeedPace, format_args!("{}:{:02}", pace_secs / 60, pace_secs % 60));
    put(&mut message, TextKey::HeartRate, format_args!("{}", 118 + (frame % 30)));
    put(&mut message, TextKey::Clock, format_args!("{:02}:{:02}", (seconds as u32) / 60, (seconds as u32) % 60));

    if let Some(flag) = phase.flag {
        message.write_flag(flag, true);
    }
    message
}

/// Legend buttons that do something in `state`.
fn legend_for(legend: &mut ButtonLegendView, state: DisplayState) {
    let navigable = matches!(
        state,
        DisplayState::Pause | DisplayState::MenuBrightness | DisplayState::MenuVolume | DisplayState::MenuSpeed
    );
    let confirmable = state != DisplayState::Off;
    legend.set_button_enabled(LegendButton::Up.index(), navigable);
    legend.set_button_enabled(LegendButton::Ok.index(), confirmable);
    legend.set_button_enabled(LegendButton::Down.index(), navigable);
}

fn write_snapshot(
    dir: &Path,
    frame: u64,
    state: DisplayState,
    display: &SimulatorDisplay<Rgb565>,
    output_settings: &OutputSettings,
) {
    let path: PathBuf = dir.join(format!("{frame:05}_{state:?}.png"));
    match display.to_rgb_output_image(output_settings).save_png(&path) {
        Ok(()) => debug!(path = %path.display(), "snapshot written"),
        Err(err) => warn!(path = %path.display(), %err, "snapshot failed"),
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = DisplayConfig::from_env();
    let style = match std::env::var("HUD_STYLE").as_deref() {
        Ok("panel") => HudStyle::Panel,
        _ => HudStyle::Classic,
    };
    let snapshot_dir = std::env::args().nth(1).map(PathBuf::from);
    if let Some(dir) = &snapshot_dir
        && let Err(err) = std::fs::create_dir_all(dir)
    {
        error!(dir = %dir.display(), %err, "cannot create snapshot directory");
        return ExitCode::FAILURE;
    }
    info!(?config, ?style, "starting simulator");

    // ==========================================================================
    // Startup
    // ==========================================================================

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(config.viewport);
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut printer = Printer::new(config.rotated);
    printer.load_fonts();

    let assets = AssetCatalog::default_skin();
    let mut hud = workout_hud(style, WorkoutStage::Warmup);
    if let Err(err) = hud.load_textures(&assets) {
        error!(%err, "texture load failed");
        return ExitCode::FAILURE;
    }
    hud.build_vertices();

    let mut legend = ButtonLegendView::new(WHITE, BLUE, LIGHT_GRAY, 12.0);
    let mut metrics = FrameMetrics::new();
    let mut events = EventLog::new();
    events.push(0, "session started");

    // ==========================================================================
    // Frame Loop
    // ==========================================================================

    let mut frame = 0u64;
    let mut last_state = None;
    for phase in &SESSION {
        let banner = phase
            .banner
            .map(|line| BannerView::new([line], BannerPosition::Top, 8.0, 0.6, WHITE));
        legend_for(&mut legend, phase.state);

        for i in 0..phase.frames {
            let frame_start = Instant::now();
            let progress = i as f32 / phase.frames as f32;
            let message = ride_message(phase, frame, progress, style);

            hud.update(&message);
            let update_time = frame_start.elapsed();

            display.clear(BLACK).ok();
            if let Err(err) = hud.render(&mut display, &printer) {
                warn!(%err, frame, "frame render failed");
            }
            if let Some(banner) = &banner
                && let Err(err) = banner.render(&mut display, &printer)
            {
                warn!(%err, "banner render failed");
            }
            if let Err(err) = legend.render(&mut display, &printer) {
                warn!(%err, "legend render failed");
            }
            let render_time = frame_start.elapsed() - update_time;

            if last_state != Some(phase.state) {
                let mut line: String<48> = String::new();
                write!(line, "state -> {:?}", phase.state).ok();
                events.push(frame, &line);
                if let Some(dir) = &snapshot_dir {
                    write_snapshot(dir, frame, phase.state, &display, &output_settings);
                }
                last_state = Some(phase.state);
            }

            metrics.record_frame(frame_start.elapsed(), update_time, render_time);
            frame += 1;

            if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
                thread::sleep(remaining);
            }
        }
    }

    hud.delete();
    printer.delete();

    // ==========================================================================
    // Report
    // ==========================================================================

    info!(
        frames = metrics.total_frames,
        avg_us = metrics.frame_time_avg_us(),
        min_us = metrics.frame_time_min_us,
        max_us = metrics.frame_time_max_us,
        uptime = metrics.uptime_string().as_str(),
        "session finished"
    );
    for (at, event) in events.iter() {
        info!(frame = at, event, "event");
    }
    ExitCode::SUCCESS
}
