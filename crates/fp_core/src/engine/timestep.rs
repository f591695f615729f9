/// timestep.rs
/// Frame timing for the variable-step simulation.
///
/// The host drives `Match::tick(dt_ms, ..)` once per rendered frame. Rates
/// in the engine are expressed per millisecond so the step size can vary,
/// but a single step is clamped so a stalled frame can't tunnel the ball
/// through a goal line.

/// Nominal frame duration (ms) at 60 fps
pub const FRAME_DT_MS: f32 = 1000.0 / 60.0;

/// Longest step the simulation will integrate in one tick (ms)
pub const MAX_DT_MS: f32 = 100.0;

/// Clamp a host-supplied frame time into the supported range.
pub fn clamp_dt(dt_ms: f32) -> f32 {
    if dt_ms.is_finite() {
        dt_ms.clamp(0.0, MAX_DT_MS)
    } else {
        0.0
    }
}

const _: () = assert!(FRAME_DT_MS < MAX_DT_MS);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rate() {
        let frames_per_second = (1000.0 / FRAME_DT_MS).round() as u32;
        assert_eq!(frames_per_second, 60);
    }

    #[test]
    fn test_clamp_dt() {
        assert_eq!(clamp_dt(-5.0), 0.0);
        assert_eq!(clamp_dt(16.0), 16.0);
        assert_eq!(clamp_dt(2500.0), MAX_DT_MS);
        assert_eq!(clamp_dt(f32::NAN), 0.0);
    }
}
