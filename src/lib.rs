//! giftfx is the micro-animation engine behind an interactive gift box scene.
//!
//! It covers the pieces of the scene that do real numeric work:
//!
//! - [`ParticleSimulator`]: per-frame spray and burst particles on a [`RasterSurface`]
//! - [`MaskSession`]: bite erosion of a raster image, fitted under rotation
//! - [`CloudChoreographer`]: staggered sprite clouds covering the viewport
//! - [`ShotOverlay`]: recoil/thrust shot sequence with splash cues
//! - [`Stage`]: one-at-a-time interaction routing, shake detection and sound cues
//!
//! Everything runs off an explicit clock (`advance(dt)` / `tick(dt)`), so hosts
//! and tests drive frames themselves. Randomized components take a seed.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod audio;
mod cloud;
mod config;
mod foundation;
mod geometry;
mod mask;
mod particles;
mod raster;
mod session;
mod shot;

pub use crate::foundation::core::{
    Point, Rect, Rgba8Premul, Size, Transform2D, Vec2, Viewport, device_size,
};
pub use crate::foundation::error::{FxError, FxResult};
pub use crate::foundation::math::{deg_to_rad, direction_from_rotation};

pub use crate::animation::anim::{Lerp, PropertyTrack, Tween};
pub use crate::animation::ease::Ease;
pub use crate::animation::timeline::{Position, Timeline, TimelineState};

pub use crate::assets::decode::decode_image;
pub use crate::assets::store::{PreparedImage, SpriteHandle, SpriteStore, normalize_rel_path};

pub use crate::audio::trigger::{SilentSound, SoundAction, SoundTrigger, fire_and_forget};

pub use crate::geometry::bounds::{get_draw_rect, solve_unrotated_bounds};

pub use crate::raster::composite::{EraseShape, PremulRgba8, unpremultiply_rgba8};
pub use crate::raster::cpu::{CpuSurface, CpuSurfaceFactory};
pub use crate::raster::surface::{RasterSurface, SurfaceFactory};

pub use crate::particles::particle::{Particle, ParticleLook};
pub use crate::particles::profile::{FlatRadius, ParticleProfile, RangeF64};
pub use crate::particles::simulator::{LoopState, ParticleSimulator};

pub use crate::mask::bite::{Bite, BitePlan, BiteRadius, BiteSpec, ErosionStyle};
pub use crate::mask::frame::draw_frame;
pub use crate::mask::session::{MaskEvent, MaskOutcome, MaskSession, MaskState};

pub use crate::cloud::choreographer::{CloudChoreographer, CloudInvocation, CloudSpriteState};
pub use crate::cloud::config::{CloudConfig, StaggeredPhase};

pub use crate::shot::nozzle::{Nozzle, nozzle_point};
pub use crate::shot::overlay::{ShotEvent, ShotOverlay, SplashBurst};
pub use crate::shot::plan::{AimedShot, Shot, ShotPlan, ShotTiming, SplashSpec};
pub use crate::shot::splash::{SplashLayer, SplashSpawner, SplashState};

pub use crate::config::scene::{AssetManifest, SceneConfig, SceneVariant};

pub use crate::session::gate::{AssetKind, InteractionGate, SessionTicket};
pub use crate::session::shake::{MotionSample, ShakeConfig, ShakeDetector};
pub use crate::session::stage::{Interaction, Stage, StageLayout};
