use std::f32::consts::PI;

/// Resting heart rate of the prompt's heart
pub const DEFAULT_BPM: f32 = 72.0;

/// Heartbeat animation state
#[derive(Debug, Clone)]
pub struct HeartPulse {
    time: f32,
    bpm: f32,
}

impl HeartPulse {
    pub fn new(bpm: f32) -> Self {
        Self {
            time: 0.0,
            bpm: if bpm.is_finite() && bpm > 0.0 { bpm } else { DEFAULT_BPM },
        }
    }

    /// Update animation state
    pub fn update(&mut self, dt: f32) {
        let period = 60.0 / self.bpm;
        self.time = (self.time + dt.max(0.0)) % period;
    }

    /// Current beat strength in `0.0..=1.0`
    pub fn value(&self) -> f32 {
        heartbeat(self.time, self.bpm)
    }

    /// Quicken the beat, e.g. after each dodge
    pub fn excite(&mut self, extra_bpm: f32) {
        self.bpm = (self.bpm + extra_bpm).clamp(DEFAULT_BPM, 160.0);
    }
}

impl Default for HeartPulse {
    fn default() -> Self {
        Self::new(DEFAULT_BPM)
    }
}

/// Heartbeat curve: a strong beat, a weaker echo, then rest
pub fn heartbeat(time: f32, bpm: f32) -> f32 {
    let period = 60.0 / bpm;
    let t = (time % period) / period;

    if t < 0.12 {
        (t / 0.12 * PI).sin()
    } else if (0.2..0.3).contains(&t) {
        ((t - 0.2) / 0.1 * PI).sin() * 0.6
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heartbeat_range() {
        for step in 0..200 {
            let value = heartbeat(step as f32 * 0.01, DEFAULT_BPM);
            assert!((0.0..=1.0).contains(&value));
        }
    }

    #[test]
    fn test_heartbeat_rests_between_beats() {
        let period = 60.0 / DEFAULT_BPM;
        assert!(heartbeat(period * 0.06, DEFAULT_BPM) > 0.9);
        assert_eq!(heartbeat(period * 0.6, DEFAULT_BPM), 0.0);
    }

    #[test]
    fn test_pulse_wraps_and_excites() {
        let mut pulse = HeartPulse::default();
        for _ in 0..100 {
            pulse.update(0.033);
        }
        assert!(pulse.value() >= 0.0 && pulse.value() <= 1.0);

        pulse.excite(1000.0);
        assert_eq!(pulse.bpm, 160.0);
    }

    #[test]
    fn test_invalid_bpm_uses_default() {
        assert_eq!(HeartPulse::new(0.0).bpm, DEFAULT_BPM);
        assert_eq!(HeartPulse::new(f32::NAN).bpm, DEFAULT_BPM);
    }
}
