/// Which beats of the measure are accented, one flag per beat
///
/// The length always tracks the meter's beats per measure. An unset pattern
/// means "downbeat only".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentPattern(Vec<bool>);

impl AccentPattern {
    /// Only the first beat accented
    pub fn downbeat_only(beats: usize) -> Self {
        let mut flags = vec![false; beats.max(1)];
        flags[0] = true;
        Self(flags)
    }

    /// Copy `flags`, fitted to `beats`. An empty slice counts as unset.
    pub fn from_flags(flags: &[bool], beats: usize) -> Self {
        let mut pattern = Self(flags.to_vec());
        pattern.resize(beats);
        pattern
    }

    /// Truncate or extend with unaccented beats, keeping existing flags by position
    pub fn resize(&mut self, beats: usize) {
        let beats = beats.max(1);
        if self.0.is_empty() {
            *self = Self::downbeat_only(beats);
        } else {
            self.0.resize(beats, false);
        }
    }

    /// Missing entries read as unset: beat 0 accented, everything else not
    pub fn is_accented(&self, beat: usize) -> bool {
        self.0.get(beat).copied().unwrap_or(beat == 0)
    }

    pub fn toggle(&mut self, beat: usize) {
        if let Some(flag) = self.0.get_mut(beat) {
            *flag = !*flag;
        }
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for AccentPattern {
    fn default() -> Self {
        Self::downbeat_only(4)
    }
}
