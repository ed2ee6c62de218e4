use bevy::prelude::*;

/// Per-frame ordering of the viewer's own systems. Rendering and orbit camera
/// damping run after these in the engine's later schedules.
#[derive(Debug, Hash, PartialEq, Eq, Clone, SystemSet)]
pub enum FrameSet {
    /// buttons and keyboard produce selection requests
    UserInput,
    /// selection requests update visibility, transition targets and the panel
    Selection,
    /// layer spin
    Animate,
    /// eased camera transition
    Camera,
}

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FrameSet::UserInput,
                FrameSet::Selection,
                FrameSet::Animate,
                FrameSet::Camera,
            )
                .chain(),
        );
    }
}
