use std::path::PathBuf;
use std::time::Duration;

use signpose::engine::AvatarEngine;
use signpose::error::SignposeError;
use signpose::options::{Options, RigPreset};
use signpose::pose::{PoseTable, PoseTableConfig};
use signpose::sequencer::Dispatch;
use signpose::skeleton::SkeletonDesc;
use web_time::Instant;

/// Simulated display refresh.
const FRAME: Duration = Duration::from_micros(16_667);

/// Upper bound on simulated frames, so a broken table can't spin forever.
const MAX_FRAMES: u32 = 60 * 600;

#[derive(Default)]
struct Args {
    text: Vec<String>,
    rig: Option<RigPreset>,
    options: Option<PathBuf>,
    poses: Option<PathBuf>,
    skeleton: Option<PathBuf>,
    realtime: bool,
    reset: bool,
}

fn usage() -> ! {
    log::error!(
        "Usage: signpose [--rig hand|mixamo] [--options FILE] [--poses FILE] \
         [--skeleton FILE] [--realtime] [--reset] <text...>"
    );
    std::process::exit(1);
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--rig" => {
                args.rig = match iter.next().as_deref() {
                    Some("hand") => Some(RigPreset::HandModel),
                    Some("mixamo") => Some(RigPreset::Mixamo),
                    _ => usage(),
                };
            }
            "--options" => args.options = Some(iter.next().unwrap_or_else(|| usage()).into()),
            "--poses" => args.poses = Some(iter.next().unwrap_or_else(|| usage()).into()),
            "--skeleton" => {
                args.skeleton = Some(iter.next().unwrap_or_else(|| usage()).into());
            }
            "--realtime" => args.realtime = true,
            "--reset" => args.reset = true,
            "-h" | "--help" => usage(),
            _ => args.text.push(arg),
        }
    }
    if args.text.is_empty() {
        usage();
    }
    args
}

fn build_engine(args: &Args) -> Result<AvatarEngine, SignposeError> {
    let mut options = match &args.options {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    if let Some(preset) = args.rig {
        options.rig.preset = preset;
    }
    let table = match &args.poses {
        Some(path) => PoseTable::from_config(PoseTableConfig::load(path)?),
        None => PoseTable::default(),
    };

    let Some(path) = &args.skeleton else {
        return AvatarEngine::with_preset_rig(options, table);
    };
    let naming = options.rig.naming();
    let mut engine = AvatarEngine::new(options, table);
    match SkeletonDesc::load(path).and_then(SkeletonDesc::into_registry) {
        Ok(registry) => engine.attach_rig(registry, naming),
        Err(e) => engine.fail_load(&e),
    }
    Ok(engine)
}

/// Tick until the engine goes idle, logging each pose as it starts.
fn run(engine: &mut AvatarEngine, realtime: bool) -> u32 {
    let mut frames = 0;
    let mut last_label: Option<String> = None;
    let mut last_frame = Instant::now();
    while engine.is_busy() && frames < MAX_FRAMES {
        let dt = if realtime {
            std::thread::sleep(FRAME.saturating_sub(last_frame.elapsed()));
            let now = Instant::now();
            let dt = now.duration_since(last_frame);
            last_frame = now;
            dt
        } else {
            FRAME
        };
        engine.tick(dt);
        frames += 1;

        let label = engine.current_label().map(str::to_owned);
        if label.is_some() && label != last_label {
            log::info!("frame {frames}: {}", label.as_deref().unwrap_or_default());
        }
        last_label = label;
    }
    frames
}

fn main() {
    env_logger::init();

    let args = parse_args();
    let mut engine = match build_engine(&args) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let text = args.text.join(" ");
    match engine.play_sequence(&text) {
        Dispatch::Accepted => {}
        Dispatch::Rejected | Dispatch::Ignored => {
            log::warn!("nothing to perform for {text:?}");
            return;
        }
    }
    let frames = run(&mut engine, args.realtime);
    log::info!(
        "performed {text:?} in {frames} frames ({:.2}s)",
        (FRAME * frames).as_secs_f32()
    );

    if args.reset && engine.reset() == Dispatch::Accepted {
        let frames = run(&mut engine, args.realtime);
        log::info!("reset in {frames} frames");
    }

    let registry = engine.registry();
    for (id, bone) in registry.iter() {
        log::debug!("{:>3} {:<28} {:?}", id.index(), bone.name, bone.rotation);
    }
}
