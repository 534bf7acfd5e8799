use crate::foundation::color::Rgba8;
use crate::foundation::ids::IdAllocator;
use crate::foundation::math::EPSILON;

/// Length given to clips dropped onto the timeline from the asset panel.
pub const DROP_CLIP_DURATION: f64 = 10.0;

/// Media type of a clip or track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Video footage.
    #[default]
    Video,
    /// Still image.
    Image,
    /// Audio.
    Audio,
    /// Text overlay.
    Text,
    /// Effect segment.
    Effect,
}

impl MediaKind {
    fn track_color(self) -> Rgba8 {
        match self {
            Self::Video => Rgba8::rgb(0x22, 0xc5, 0x5e),
            Self::Audio => Rgba8::rgb(0xa8, 0x55, 0xf7),
            Self::Text => Rgba8::rgb(0xea, 0xb3, 0x08),
            Self::Image | Self::Effect => Rgba8::rgb(0x64, 0x74, 0x8b),
        }
    }
}

/// A segment on a track, in seconds.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Clip {
    /// Stable id.
    pub id: String,
    /// Owning track.
    pub track_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Media type.
    #[serde(default)]
    pub kind: MediaKind,
    /// Start time, `>= 0`.
    pub start: f64,
    /// Duration, `> 0`.
    pub duration: f64,
}

impl Clip {
    /// End time.
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    /// `start < t < end`.
    pub fn straddles(&self, t: f64) -> bool {
        self.start < t && t < self.end()
    }
}

/// An ordered lane of clips. Index 0 is the top row.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Track {
    /// Stable id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Media type.
    #[serde(default)]
    pub kind: MediaKind,
    /// Lane color.
    #[serde(default)]
    pub color: Rgba8,
    /// Locked tracks reject every clip mutation.
    #[serde(default)]
    pub is_locked: bool,
    /// Hidden tracks are skipped during playback.
    #[serde(default)]
    pub is_hidden: bool,
    /// At most one track is the main track.
    #[serde(default)]
    pub is_main: bool,
}

/// Tracks, clips and the playhead.
///
/// Clip order is insertion order and doubles as snap priority. Mutations on clips whose
/// track is locked are rejected and reported through the return value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    tracks: Vec<Track>,
    clips: Vec<Clip>,
    #[serde(default)]
    playhead: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    selected: Option<String>,
    #[serde(default)]
    ids: IdAllocator,
}

impl Timeline {
    /// Empty timeline.
    pub fn new() -> Self {
        Self {
            ids: IdAllocator::new(),
            ..Self::default()
        }
    }

    /// Tracks from top to bottom.
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Clips in insertion order.
    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    /// Clip by id.
    pub fn clip(&self, id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == id)
    }

    fn clip_mut(&mut self, id: &str) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == id)
    }

    /// Track by id.
    pub fn track(&self, id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == id)
    }

    fn track_mut(&mut self, id: &str) -> Option<&mut Track> {
        self.tracks.iter_mut().find(|t| t.id == id)
    }

    /// Row index of a track.
    pub fn track_index(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    /// Playhead time in seconds.
    pub fn playhead(&self) -> f64 {
        self.playhead
    }

    /// Move the playhead; negative or non-finite times land on `0`.
    pub fn set_playhead(&mut self, t: f64) {
        self.playhead = if t.is_finite() { t.max(0.0) } else { 0.0 };
    }

    /// Selected clip id.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Select a clip; unknown ids clear the selection.
    pub fn select(&mut self, id: Option<&str>) {
        self.selected = id.filter(|id| self.clip(id).is_some()).map(str::to_owned);
    }

    /// Whether the track is locked. Unknown tracks count as locked.
    pub fn is_track_locked(&self, track_id: &str) -> bool {
        self.track(track_id).is_none_or(|t| t.is_locked)
    }

    /// Whether a clip may be mutated (it exists and its track is unlocked).
    pub fn is_clip_editable(&self, clip_id: &str) -> bool {
        self.clip(clip_id)
            .is_some_and(|c| !self.is_track_locked(&c.track_id))
    }

    /// Append a track named `Track N`.
    pub fn add_track(&mut self, kind: MediaKind) -> String {
        let id = self.ids.next("track");
        self.tracks.push(Track {
            id: id.clone(),
            name: format!("Track {}", self.tracks.len() + 1),
            kind,
            color: kind.track_color(),
            is_locked: false,
            is_hidden: false,
            is_main: false,
        });
        id
    }

    /// Delete a track together with its clips. Keeping at least one track is up to the
    /// host.
    pub fn remove_track(&mut self, id: &str) -> bool {
        let Some(idx) = self.track_index(id) else {
            tracing::warn!(id, "remove_track: unknown track");
            return false;
        };
        self.tracks.remove(idx);
        self.clips.retain(|c| c.track_id != id);
        self.drop_stale_selection();
        true
    }

    /// Reorder: take the track at `from` and insert it at `to` (clamped to the end).
    pub fn move_track(&mut self, from: usize, to: usize) -> bool {
        if from >= self.tracks.len() {
            return false;
        }
        let t = self.tracks.remove(from);
        let to = to.min(self.tracks.len());
        self.tracks.insert(to, t);
        true
    }

    /// Copy a track and its clips right below the source. Copies are unlocked, visible
    /// and never main.
    #[tracing::instrument(skip(self))]
    pub fn duplicate_track(&mut self, id: &str) -> Option<String> {
        let idx = self.track_index(id)?;
        let new_id = self.ids.next("track");
        let source = &self.tracks[idx];
        let copy = Track {
            id: new_id.clone(),
            name: format!("{} (copy)", source.name),
            kind: source.kind,
            color: source.color,
            is_locked: false,
            is_hidden: false,
            is_main: false,
        };
        self.tracks.insert(idx + 1, copy);
        let copies: Vec<Clip> = self
            .clips
            .iter()
            .filter(|c| c.track_id == id)
            .cloned()
            .collect();
        for mut c in copies {
            c.id = self.ids.next("clip");
            c.track_id = new_id.clone();
            self.clips.push(c);
        }
        Some(new_id)
    }

    /// Toggle the main flag; turning it on clears it everywhere else.
    pub fn toggle_main_track(&mut self, id: &str) -> Option<bool> {
        self.track(id)?;
        for t in &mut self.tracks {
            if t.id == id {
                t.is_main = !t.is_main;
            } else {
                t.is_main = false;
            }
        }
        self.track(id).map(|t| t.is_main)
    }

    /// Flip the lock flag, returning the new state.
    pub fn toggle_track_lock(&mut self, id: &str) -> Option<bool> {
        let t = self.track_mut(id)?;
        t.is_locked = !t.is_locked;
        Some(t.is_locked)
    }

    /// Flip the hidden flag, returning the new state.
    pub fn toggle_track_hidden(&mut self, id: &str) -> Option<bool> {
        let t = self.track_mut(id)?;
        t.is_hidden = !t.is_hidden;
        Some(t.is_hidden)
    }

    /// Insert a clip from a drop at `time` on the track at row `track_index`.
    pub fn add_clip_at(
        &mut self,
        kind: MediaKind,
        track_index: usize,
        time: f64,
        name: &str,
    ) -> Option<String> {
        let track = self.tracks.get(track_index)?;
        if track.is_locked {
            tracing::warn!(track = %track.id, "drop on locked track ignored");
            return None;
        }
        let track_id = track.id.clone();
        let id = self.ids.next("clip");
        self.clips.push(Clip {
            id: id.clone(),
            track_id,
            name: name.to_owned(),
            kind,
            start: if time.is_finite() { time.max(0.0) } else { 0.0 },
            duration: DROP_CLIP_DURATION,
        });
        Some(id)
    }

    /// Insert a fully specified clip (documents, tests). The id is taken as given.
    pub fn push_clip(&mut self, clip: Clip) {
        self.ids.observe(&clip.id);
        self.clips.push(clip);
    }

    /// Insert a fully specified track. The id is taken as given.
    pub fn push_track(&mut self, track: Track) {
        self.ids.observe(&track.id);
        self.tracks.push(track);
    }

    /// Delete one clip.
    pub fn remove_clip(&mut self, id: &str) -> Option<Clip> {
        if !self.is_clip_editable(id) {
            tracing::warn!(id, "remove_clip: unknown clip or locked track");
            return None;
        }
        let idx = self.clips.iter().position(|c| c.id == id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Some(self.clips.remove(idx))
    }

    /// Delete one clip; with `auto_ripple` later clips on the same track shift left to
    /// close the gap.
    #[tracing::instrument(skip(self))]
    pub fn ripple_delete_clip(&mut self, id: &str, auto_ripple: bool) -> Option<Clip> {
        let removed = self.remove_clip(id)?;
        if auto_ripple {
            for c in &mut self.clips {
                if c.track_id == removed.track_id && c.start >= removed.end() {
                    c.start = (c.start - removed.duration).max(0.0);
                }
            }
        }
        Some(removed)
    }

    /// Copy a clip to start right where it ends.
    pub fn duplicate_clip(&mut self, id: &str) -> Option<String> {
        if !self.is_clip_editable(id) {
            return None;
        }
        let mut copy = self.clip(id)?.clone();
        copy.id = self.ids.next("clip");
        copy.start = copy.end();
        let new_id = copy.id.clone();
        self.clips.push(copy);
        Some(new_id)
    }

    /// Split a clip at `at`, returning the id of the new right-hand part.
    ///
    /// No-op unless `start < at < end`. Durations of the two parts add up to the original.
    #[tracing::instrument(skip(self))]
    pub fn split_clip(&mut self, id: &str, at: f64) -> Option<String> {
        if !self.is_clip_editable(id) {
            tracing::warn!(id, "split_clip: unknown clip or locked track");
            return None;
        }
        let clip = self.clip(id)?;
        if !clip.straddles(at) {
            return None;
        }
        let mut right = Clip {
            id: String::new(),
            track_id: clip.track_id.clone(),
            name: format!("{} (2)", clip.name),
            kind: clip.kind,
            start: at,
            duration: clip.end() - at,
        };
        right.id = self.ids.next("clip");
        let new_id = right.id.clone();
        if let Some(left) = self.clip_mut(id) {
            left.duration = at - left.start;
        }
        self.clips.push(right);
        Some(new_id)
    }

    /// Split the selected clip at the playhead.
    pub fn split_selected_at_playhead(&mut self) -> Option<String> {
        let id = self.selected.clone()?;
        self.split_clip(&id, self.playhead)
    }

    /// Ripple cut-left at `t` on every unlocked track.
    ///
    /// Clips ending at or before `t` are removed, clips straddling `t` keep only their
    /// part after `t`. With `auto_ripple` every clip left on an unlocked track is shifted
    /// left by `t`. Negative times are clamped to `0` and non-finite times are ignored.
    /// Returns how many clips were removed or trimmed.
    #[tracing::instrument(skip(self))]
    pub fn cut_and_delete_left(&mut self, t: f64, auto_ripple: bool) -> usize {
        if !t.is_finite() {
            tracing::warn!(t, "cut_and_delete_left: non-finite time ignored");
            return 0;
        }
        let t = t.max(0.0);
        let auto_ripple = auto_ripple && t > 0.0;
        let locked = self.locked_track_ids();
        let before = self.clips.len();
        self.clips
            .retain(|c| locked.contains(&c.track_id) || c.end() > t);
        let mut changed = before - self.clips.len();
        for c in &mut self.clips {
            if locked.contains(&c.track_id) {
                continue;
            }
            if c.straddles(t) {
                c.duration = c.end() - t;
                c.start = t;
                changed += 1;
            }
            if auto_ripple {
                c.start = (c.start - t).max(0.0);
            }
        }
        self.drop_stale_selection();
        changed
    }

    /// Ripple cut-right at `t` on every unlocked track: clips starting at or after `t` are
    /// removed, clips straddling `t` end at `t`. Negative times are clamped to `0` and
    /// non-finite times are ignored. Returns how many clips changed.
    #[tracing::instrument(skip(self))]
    pub fn cut_and_delete_right(&mut self, t: f64) -> usize {
        if !t.is_finite() {
            tracing::warn!(t, "cut_and_delete_right: non-finite time ignored");
            return 0;
        }
        let t = t.max(0.0);
        let locked = self.locked_track_ids();
        let before = self.clips.len();
        self.clips
            .retain(|c| locked.contains(&c.track_id) || c.start < t);
        let mut changed = before - self.clips.len();
        for c in &mut self.clips {
            if !locked.contains(&c.track_id) && c.straddles(t) {
                c.duration = t - c.start;
                changed += 1;
            }
        }
        self.drop_stale_selection();
        changed
    }

    /// Reassign a clip to another track. Both tracks must be unlocked.
    pub fn move_clip_to_track(&mut self, clip_id: &str, track_id: &str) -> bool {
        if !self.is_clip_editable(clip_id) || self.is_track_locked(track_id) {
            tracing::warn!(clip_id, track_id, "move_clip_to_track rejected");
            return false;
        }
        match self.clip_mut(clip_id) {
            Some(c) => {
                c.track_id = track_id.to_owned();
                true
            }
            None => false,
        }
    }

    /// Overwrite a clip's placement without lock checks; callers check first.
    pub(crate) fn place_clip(&mut self, id: &str, start: f64, duration: f64, track_id: &str) {
        if let Some(c) = self.clip_mut(id) {
            c.start = start;
            c.duration = duration;
            if c.track_id != track_id {
                c.track_id = track_id.to_owned();
            }
        }
    }

    /// Latest clip end, `0` for an empty timeline.
    pub fn max_clip_end(&self) -> f64 {
        self.clips.iter().map(Clip::end).fold(0.0, f64::max)
    }

    /// Clips playing at `t` on visible tracks, topmost track first.
    pub fn clips_at(&self, t: f64) -> Vec<&Clip> {
        let mut out: Vec<(usize, &Clip)> = self
            .clips
            .iter()
            .filter(|c| c.start <= t && t < c.end())
            .filter_map(|c| {
                let idx = self.track_index(&c.track_id)?;
                (!self.tracks[idx].is_hidden).then_some((idx, c))
            })
            .collect();
        out.sort_by_key(|(idx, _)| *idx);
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Describe every broken clip invariant; empty when the timeline is sound.
    pub fn violations(&self, min_duration: f64) -> Vec<String> {
        let mut out = Vec::new();
        for c in &self.clips {
            if !c.start.is_finite() || c.start < 0.0 {
                out.push(format!("{}: negative start {}", c.id, c.start));
            }
            let too_short = c.duration <= 0.0 || c.duration + EPSILON < min_duration;
            if !c.duration.is_finite() || too_short {
                out.push(format!("{}: duration {} below floor", c.id, c.duration));
            }
            if self.track(&c.track_id).is_none() {
                out.push(format!("{}: unknown track {}", c.id, c.track_id));
            }
        }
        if self.tracks.iter().filter(|t| t.is_main).count() > 1 {
            out.push("more than one main track".to_owned());
        }
        out
    }

    pub(crate) fn observe_ids(&mut self) {
        for t in &self.tracks {
            self.ids.observe(&t.id);
        }
        for c in &self.clips {
            self.ids.observe(&c.id);
        }
    }

    fn locked_track_ids(&self) -> Vec<String> {
        self.tracks
            .iter()
            .filter(|t| t.is_locked)
            .map(|t| t.id.clone())
            .collect()
    }

    fn drop_stale_selection(&mut self) {
        if self.selected.as_deref().is_some_and(|s| self.clip(s).is_none()) {
            self.selected = None;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/model.rs"]
mod tests;
