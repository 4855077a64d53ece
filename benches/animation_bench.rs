use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, Criterion,
};
use glam::Vec3;
use signpose::animation::interpolate_rotation;
use signpose::engine::AvatarEngine;
use signpose::options::{Options, RigPreset};
use signpose::pose::{FingerCurl, PoseComposer, PoseTable};
use signpose::skeleton::{RigNaming, SkeletonDesc};
use signpose::util::easing::EasingFunction;
use std::time::Duration;

fn easing_benchmark(c: &mut Criterion) {
    let f = EasingFunction::SineInOut;
    c.bench_function("sine_in_out_easing", |b| {
        b.iter(|| black_box(f.evaluate(black_box(0.5))))
    });
}

fn rotation_interpolation_benchmark(c: &mut Criterion) {
    let start = Vec3::new(3.0, -0.2, 1.4);
    let target = Vec3::new(-3.0, 0.9, -1.4);
    c.bench_function("shortest_arc_rotation", |b| {
        b.iter(|| {
            black_box(interpolate_rotation(
                black_box(start),
                black_box(target),
                black_box(0.5),
                EasingFunction::DEFAULT,
            ))
        })
    });
}

fn pose_tick_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("pose_tick");

    for (name, naming) in [
        ("hand_model", RigNaming::hand_model()),
        ("mixamo", RigNaming::mixamo("mixamorigRight")),
    ] {
        let mut registry =
            SkeletonDesc::from_naming(&naming).into_registry().unwrap();
        let targets = naming.expand_curl(&FingerCurl::uniform(1.0));
        let mut pose = PoseComposer::apply(
            &targets,
            &registry,
            &naming,
            Duration::from_secs(3600),
            EasingFunction::DEFAULT,
        );

        let id = format!("{name}_{}_bones", pose.task_count());
        group.bench_function(id, |b| {
            b.iter(|| {
                black_box(
                    pose.advance(Duration::from_micros(1), &mut registry),
                )
            })
        });
    }
    group.finish();
}

fn sentence_benchmark(c: &mut Criterion) {
    let mut options = Options::default();
    options.rig.preset = RigPreset::Mixamo;
    c.bench_function("perform_sentence_60hz", |b| {
        b.iter_batched(
            || {
                AvatarEngine::with_preset_rig(
                    options.clone(),
                    PoseTable::default(),
                )
                .unwrap()
            },
            |mut engine| {
                let _ = engine.play_sequence("hi my name is ada");
                while engine.is_busy() {
                    engine.tick(Duration::from_micros(16_667));
                }
                black_box(engine.registry().len())
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    easing_benchmark,
    rotation_interpolation_benchmark,
    pose_tick_benchmark,
    sentence_benchmark
);
criterion_main!(benches);
