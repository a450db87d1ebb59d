//! Smoothed master gain.

/*
Master Gain
===========

Every click voice is summed into one buffer and the sum is scaled by a
single master gain. Two things matter here:

  headroom    A main click and a poly click can land on the same sample.
              Two peaks of 0.9 sum to 1.8, so the master level is mapped
              onto [0, CEILING] with CEILING = 0.4 to keep the sum below
              full scale.

  smoothing   Volume changes arrive between blocks. Jumping straight to the
              new gain puts a step in the waveform, which is heard as a
              click of its own (the wrong kind). A one-pole smoother glides
              toward the target instead:

                  gain += (target - gain) × coeff
                  coeff = 1 - e^(-1 / (τ × sample_rate))

              After τ seconds the gain has covered ~63% of the distance;
              after 5τ it is effectively there.

Changing the level never retriggers or restarts voices; it only moves the
target.
*/

pub const CEILING: f32 = 0.4;
pub const SMOOTHING_TIME: f32 = 0.010;

pub struct MasterGain {
    current: f32,
    target: f32,
    coeff: f32,
}

impl MasterGain {
    /// `level` is the master volume as 0.0-1.0; it starts settled.
    pub fn new(sample_rate: f32, level: f32) -> Self {
        let target = Self::level_to_gain(level);
        Self {
            current: target,
            target,
            coeff: 1.0 - (-1.0 / (SMOOTHING_TIME * sample_rate)).exp(),
        }
    }

    #[inline]
    fn level_to_gain(level: f32) -> f32 {
        level.clamp(0.0, 1.0) * CEILING
    }

    pub fn set_level(&mut self, level: f32) {
        self.target = Self::level_to_gain(level);
    }

    pub fn gain(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Scale the buffer in place, advancing the smoother per sample.
    pub fn process(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            self.current += (self.target - self.current) * self.coeff;
            *sample *= self.current;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_maps_onto_ceiling() {
        let gain = MasterGain::new(48_000.0, 0.7);
        assert!((gain.gain() - 0.28).abs() < 1e-6);

        let loud = MasterGain::new(48_000.0, 3.0);
        assert_eq!(loud.gain(), CEILING);
    }

    #[test]
    fn change_glides_instead_of_jumping() {
        let mut gain = MasterGain::new(48_000.0, 1.0);
        gain.set_level(0.0);

        let mut buffer = vec![1.0f32; 4];
        gain.process(&mut buffer);
        assert!(buffer[0] > 0.35, "first sample {}", buffer[0]);
        assert!(buffer.windows(2).all(|w| w[1] < w[0]));

        let mut settle = vec![1.0f32; 4_800];
        gain.process(&mut settle);
        assert!(settle[4_799] < 1e-4);
    }
}
