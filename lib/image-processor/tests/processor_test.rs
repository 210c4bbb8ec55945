use anyhow::Result;
use filter_recipe::{BlendSpec, ComposeMethod, FilterRecipe, operator::find_template};
use image_processor::{
    CommandRunner, ImCommand, ImageProcessor, ProcessError, ProcessorConfig, WallTimer,
};
use rand::{SeedableRng, rngs::StdRng};
use std::{
    cell::RefCell,
    collections::VecDeque,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use tempfile::tempdir;

/// Pretends to be `convert`: charges a fixed duration per call and writes
/// the image file named by the last argument.
#[derive(Default)]
struct StubRunner {
    durations: RefCell<VecDeque<Duration>>,
    fail_at: Option<usize>,
    calls: RefCell<Vec<ImCommand>>,
}

impl StubRunner {
    fn with_durations(durations: &[u64]) -> Self {
        Self {
            durations: RefCell::new(durations.iter().map(|ms| Duration::from_millis(*ms)).collect()),
            ..Default::default()
        }
    }

    fn failing_at(call: usize) -> Self {
        Self {
            fail_at: Some(call),
            ..Default::default()
        }
    }
}

impl CommandRunner for StubRunner {
    fn run(&self, cmd: &ImCommand, timer: &mut WallTimer) -> i32 {
        let index = self.calls.borrow().len();
        self.calls.borrow_mut().push(cmd.clone());
        timer.add(self.durations.borrow_mut().pop_front().unwrap_or_default());

        if self.fail_at == Some(index) {
            return 1;
        }

        if let Some(out) = cmd.last_arg().filter(|a| a.ends_with(".jpg") || a.ends_with(".png")) {
            fs::write(out, b"stub").unwrap();
        }
        0
    }
}

fn negate_recipe() -> FilterRecipe {
    let mut rng = StdRng::seed_from_u64(0);
    FilterRecipe::new(vec![find_template("-negate").unwrap().sample(&mut rng)])
}

fn source(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"640x640 source").unwrap();
    path
}

fn processor<R: CommandRunner>(dir: &Path, runner: R) -> ImageProcessor<R> {
    let config = ProcessorConfig::default().with_output_dir(dir.to_path_buf());
    ImageProcessor::new(config, runner).unwrap()
}

#[test]
fn two_sources_produce_two_outputs_and_average_time() -> Result<()> {
    let dir = tempdir()?;
    let sources = [
        source(dir.path(), "orig-cat.jpg.jpg"),
        source(dir.path(), "orig-dog.png.jpg"),
    ];
    // fx + composite per source
    let runner = StubRunner::with_durations(&[400, 600, 1000, 1000]);
    let p = processor(dir.path(), &runner);
    let recipe = negate_recipe();
    let blend = BlendSpec::new(ComposeMethod::Blend, "50");

    let mut timer = WallTimer::new();
    let mut per_image = vec![];
    for image in &sources {
        let before = timer.elapsed();
        let out = p.process(image, &recipe, &blend, 3, &mut timer)?;
        per_image.push(timer.elapsed() - before);
        assert!(out.exists());
    }

    assert!(dir.path().join("img-3-orig-cat.jpg").exists());
    assert!(dir.path().join("img-3-orig-dog.jpg").exists());

    let sum: Duration = per_image.iter().sum();
    assert_eq!(sum, Duration::from_secs(3));
    assert_eq!(timer.average_secs(sources.len()), 1.5);

    let calls = runner.calls.borrow();
    assert_eq!(calls.len(), 4);
    assert_eq!(
        calls[0].args()[1..],
        ["-negate".to_string(), dir.path().join("fx-3-orig-cat.png").display().to_string()]
    );
    let composite = calls[1].to_string();
    assert!(composite.contains(
        "-compose Blend -define compose:args=50 -composite -auto-level -resize 640x640 -normalize -quality 75"
    ));
    Ok(())
}

#[test]
fn effect_layer_removed_after_success() -> Result<()> {
    let dir = tempdir()?;
    let image = source(dir.path(), "orig-cat.jpg.jpg");
    let p = processor(dir.path(), StubRunner::default());

    let out = p.process(
        &image,
        &negate_recipe(),
        &BlendSpec::new(ComposeMethod::Dissolve, "20"),
        0,
        &mut WallTimer::new(),
    )?;

    assert_eq!(out, dir.path().join("img-0-orig-cat.jpg"));
    assert!(!p.effect_layer_path(0, &image).exists());
    Ok(())
}

#[test]
fn effect_layer_failure_is_returned() {
    let dir = tempdir().unwrap();
    let image = source(dir.path(), "cat.jpg");
    let p = processor(dir.path(), StubRunner::failing_at(0));

    let err = p
        .process(
            &image,
            &negate_recipe(),
            &BlendSpec::new(ComposeMethod::Blend, "10"),
            1,
            &mut WallTimer::new(),
        )
        .unwrap_err();

    assert!(matches!(err, ProcessError::EffectLayer { code: 1, .. }));
    assert_eq!(p.runner().calls.borrow().len(), 1);
    assert!(!p.output_path(1, &image).exists());
}

#[test]
fn composite_failure_is_returned() {
    let dir = tempdir().unwrap();
    let image = source(dir.path(), "cat.jpg");
    let p = processor(dir.path(), StubRunner::failing_at(1));

    let err = p
        .process(
            &image,
            &negate_recipe(),
            &BlendSpec::new(ComposeMethod::Blend, "10"),
            2,
            &mut WallTimer::new(),
        )
        .unwrap_err();

    assert!(matches!(err, ProcessError::Composite { code: 1, .. }));
    assert_eq!(p.runner().calls.borrow().len(), 2);
}

#[test]
fn normalize_writes_square_thumbnail() -> Result<()> {
    let dir = tempdir()?;
    let input = source(dir.path(), "holiday pic.png");
    let out_dir = dir.path().join("output");
    fs::create_dir(&out_dir)?;
    let p = processor(&out_dir, StubRunner::default());

    let out = p.normalize(&input, &mut WallTimer::new())?;
    assert_eq!(out, out_dir.join("orig-holiday_pic.png.jpg"));
    assert!(out.exists());

    let calls = p.runner().calls.borrow();
    let line = calls[0].to_string();
    assert!(line.contains("-thumbnail 640x640^ -gravity center -extent 640x640 -quality 98"));
    assert_eq!(calls[0].args()[0], input.display().to_string());
    Ok(())
}

#[test]
fn normalize_failure_is_returned() {
    let dir = tempdir().unwrap();
    let p = processor(dir.path(), StubRunner::failing_at(0));

    let err = p
        .normalize(Path::new("missing.jpg"), &mut WallTimer::new())
        .unwrap_err();
    assert!(matches!(err, ProcessError::Normalize { code: 1, .. }));
}

#[test]
fn tool_check_uses_version_flag() {
    let dir = tempdir().unwrap();
    let p = processor(dir.path(), StubRunner::default());
    assert!(p.tool_available());
    assert_eq!(p.runner().calls.borrow()[0].to_string(), "convert -version");

    let p = processor(dir.path(), StubRunner::failing_at(0));
    assert!(!p.tool_available());
}
