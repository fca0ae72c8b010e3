//! Looping frame cycle driven by a fixed per-frame duration.

/// Cycles `frame` through `0..frame_count` every `frame_duration` seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameCycle {
    /// Seconds per frame.
    pub frame_duration: f32,
    pub frame_count: u32,
    /// Current frame index.
    pub frame: u32,
    /// Time accumulated in current frame.
    pub timer: f32,
    /// Whether the cycle is advancing.
    pub playing: bool,
}

impl FrameCycle {
    pub fn new(frame_count: u32, fps: f32) -> Self {
        Self {
            frame_duration: 1.0 / fps,
            frame_count: frame_count.max(1),
            frame: 0,
            timer: 0.0,
            playing: true,
        }
    }

    /// Advance by dt seconds. Returns true if the frame changed.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.playing || self.frame_count <= 1 {
            return false;
        }

        self.timer += dt;
        let mut changed = false;
        while self.timer >= self.frame_duration {
            self.timer -= self.frame_duration;
            self.frame = (self.frame + 1) % self.frame_count;
            changed = true;
        }
        changed
    }

    /// Hold on a specific frame.
    pub fn hold(&mut self, frame: u32) {
        self.playing = false;
        self.frame = frame.min(self.frame_count - 1);
        self.timer = 0.0;
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Back to frame 0, playing.
    pub fn reset(&mut self) {
        self.frame = 0;
        self.timer = 0.0;
        self.playing = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_through_frames_and_loops() {
        let mut cycle = FrameCycle::new(4, 10.0);
        assert!(cycle.tick(0.15));
        assert_eq!(cycle.frame, 1);
        cycle.tick(0.3);
        assert_eq!(cycle.frame, 0);
    }

    #[test]
    fn two_frame_cycle_alternates() {
        let mut cycle = FrameCycle::new(2, 5.0);
        let mut seen = Vec::new();
        for _ in 0..4 {
            cycle.tick(0.2);
            seen.push(cycle.frame);
        }
        assert_eq!(seen, vec![1, 0, 1, 0]);
    }

    #[test]
    fn held_cycle_does_not_advance() {
        let mut cycle = FrameCycle::new(2, 10.0);
        cycle.hold(1);
        assert!(!cycle.tick(1.0));
        assert_eq!(cycle.frame, 1);
        cycle.reset();
        assert_eq!(cycle.frame, 0);
        assert!(cycle.playing);
    }
}
