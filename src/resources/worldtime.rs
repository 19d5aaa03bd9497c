use bevy_ecs::prelude::Resource;

/// Simulation clock shared by the frame-driven systems.
///
/// `frame_delta` is the number of frames the current tick represents; frame
/// timers advance by exactly that much.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    pub elapsed: f32,
    pub delta: f32,
    pub frame_count: u64,
    pub frame_delta: u32,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            frame_count: 0,
            frame_delta: 0,
        }
    }
}
