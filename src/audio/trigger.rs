use crate::foundation::error::FxResult;

/// Host audio output. Playback is best effort.
pub trait SoundTrigger {
    fn play(&mut self, clip: &str) -> FxResult<()>;
    fn stop(&mut self, clip: &str) -> FxResult<()>;
}

/// What to do with a clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundAction {
    Play,
    Stop,
}

/// Run `action` on `clip`, logging and swallowing any failure.
pub fn fire_and_forget<T: SoundTrigger + ?Sized>(sound: &mut T, action: SoundAction, clip: &str) {
    let res = match action {
        SoundAction::Play => sound.play(clip),
        SoundAction::Stop => sound.stop(clip),
    };
    if let Err(err) = res {
        tracing::debug!(clip, ?action, %err, "sound trigger failed");
    }
}

/// Output that plays nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentSound;

impl SoundTrigger for SilentSound {
    fn play(&mut self, _clip: &str) -> FxResult<()> {
        Ok(())
    }

    fn stop(&mut self, _clip: &str) -> FxResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/audio/trigger.rs"]
mod tests;
