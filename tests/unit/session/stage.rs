use super::*;
use crate::{
    assets::store::PreparedImage, config::scene::SceneVariant, raster::cpu::CpuSurfaceFactory,
};

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<(SoundAction, String)>,
}

impl Recorder {
    fn count(&self, action: SoundAction, clip: &str) -> usize {
        self.calls
            .iter()
            .filter(|(a, c)| *a == action && c == clip)
            .count()
    }
}

impl SoundTrigger for Recorder {
    fn play(&mut self, clip: &str) -> FxResult<()> {
        self.calls.push((SoundAction::Play, clip.to_owned()));
        Ok(())
    }

    fn stop(&mut self, clip: &str) -> FxResult<()> {
        self.calls.push((SoundAction::Stop, clip.to_owned()));
        Ok(())
    }
}

fn layout() -> StageLayout {
    StageLayout {
        pichkari: Rect::new(20.0, 100.0, 60.0, 140.0),
        gujiya: Rect::new(80.0, 60.0, 140.0, 100.0),
        gujiya_rotation_deg: -8.0,
        gulal: Rect::new(150.0, 100.0, 190.0, 140.0),
    }
}

fn config() -> SceneConfig {
    SceneConfig {
        seed: Some(7),
        ..SceneConfig::default()
    }
}

fn stage_with(config: SceneConfig, with_gujiya: bool) -> Stage<CpuSurfaceFactory, Recorder> {
    let mut sprites = SpriteStore::new(".");
    if with_gujiya {
        sprites.insert_image("assets/gujiya.png", PreparedImage::solid(40, 20, [200, 120, 40, 255]));
    }
    let viewport = Viewport::new(200.0, 150.0, 1.0).unwrap();
    Stage::new(config, viewport, layout(), sprites, CpuSurfaceFactory, Recorder::default()).unwrap()
}

fn run_until_idle(stage: &mut Stage<CpuSurfaceFactory, Recorder>, dt: f64, max_ticks: usize) {
    for _ in 0..max_ticks {
        stage.tick(dt).unwrap();
        if !stage.is_busy() {
            return;
        }
    }
    panic!("interaction did not finish within {max_ticks} ticks");
}

#[test]
fn idle_stage_wants_no_frames() {
    let mut stage = stage_with(config(), true);
    assert!(!stage.tick(1.0 / 60.0).unwrap());
    assert!(stage.active().is_none());
}

#[test]
fn gujiya_plays_each_bite_and_releases_the_gate() {
    let mut stage = stage_with(config(), true);
    assert!(stage.tap(AssetKind::Gujiya).unwrap());
    assert_eq!(stage.active_kind(), Some(AssetKind::Gujiya));
    assert!(!stage.tap(AssetKind::Pichkari).unwrap());
    assert!(matches!(stage.active(), Some(Interaction::Gujiya(_))));

    run_until_idle(&mut stage, 0.05, 200);
    let clip = "assets/nom nom.mp3";
    assert_eq!(stage.sound().count(SoundAction::Play, clip), 5);
    assert_eq!(stage.sound().count(SoundAction::Stop, clip), 5);
    assert!(stage.tap(AssetKind::Gulal).unwrap());
}

#[test]
fn gujiya_without_image_aborts_immediately() {
    let mut stage = stage_with(config(), false);
    assert!(!stage.tap(AssetKind::Gujiya).unwrap());
    assert!(!stage.is_busy());
    assert!(stage.sound().calls.is_empty());
}

#[test]
fn pichkari_splashes_and_sprays_on_every_thrust() {
    let mut cfg = config();
    cfg.shots.spray_count = 4;
    let mut stage = stage_with(cfg, true);
    assert!(stage.tap(AssetKind::Pichkari).unwrap());

    let mut max_particles = 0;
    for _ in 0..400 {
        stage.tick(1.0 / 60.0).unwrap();
        max_particles = max_particles.max(stage.spray().len());
        if !stage.is_busy() {
            break;
        }
    }
    assert!(!stage.is_busy());
    assert_eq!(stage.splashes().spawned(), 6);
    assert_eq!(stage.sound().count(SoundAction::Play, "assets/powder air.mp3"), 3);
    assert!(max_particles >= 4);
}

#[test]
fn gulal_cloud_holds_the_gate_until_torn_down() {
    let mut stage = stage_with(config(), true);
    assert!(stage.tap(AssetKind::Gulal).unwrap());
    assert!(stage.tick(0.05).unwrap());
    assert!(stage.is_busy());
    run_until_idle(&mut stage, 0.05, 100);
    assert!(stage.active().is_none());
}

#[test]
fn shake_raises_an_ambient_cloud_only_when_idle() {
    let mut stage = stage_with(config(), true);
    assert!(!stage.on_motion(MotionSample::new(0.0, 0.0, 0.0, 1000.0)).unwrap());
    assert!(stage.on_motion(MotionSample::new(10.0, 0.0, 0.0, 1100.0)).unwrap());
    assert_eq!(stage.ambient_clouds().len(), 1);
    assert!(!stage.is_busy());

    assert!(stage.tap(AssetKind::Gulal).unwrap());
    assert!(!stage.on_motion(MotionSample::new(0.0, 0.0, 0.0, 2600.0)).unwrap());
    assert_eq!(stage.ambient_clouds().len(), 1);
}

#[test]
fn cancel_frees_the_gate() {
    let mut stage = stage_with(config(), true);
    assert!(stage.tap(AssetKind::Gujiya).unwrap());
    stage.cancel();
    assert!(!stage.is_busy());
    assert!(stage.active().is_none());
}

#[test]
fn flat_variant_sprays_palette_bursts() {
    let cfg = SceneConfig {
        variant: SceneVariant::Flat,
        ..config()
    };
    let mut stage = stage_with(cfg, true);
    stage.spray_at(Point::new(100.0, 75.0), 0.0, None).unwrap();
    assert_eq!(stage.spray().len(), 60);
    assert!(stage.tick(1.0 / 60.0).unwrap());
    assert_eq!(stage.spray().steps(), 1);
}

#[test]
fn gujiya_inserted_under_unnormalized_name_is_ready() {
    let mut sprites = SpriteStore::new(".");
    sprites.insert_image("./assets//gujiya.png", PreparedImage::solid(40, 20, [200, 120, 40, 255]));
    let viewport = Viewport::new(200.0, 150.0, 1.0).unwrap();
    let mut stage = Stage::new(
        config(),
        viewport,
        layout(),
        sprites,
        CpuSurfaceFactory,
        Recorder::default(),
    )
    .unwrap();
    assert!(stage.tap(AssetKind::Gujiya).unwrap());
}
