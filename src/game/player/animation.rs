// Sprite animation playback

use crate::core::Rect;

/// One cell of the sprite sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpriteCell {
    pub row: u32,
    pub col: u32,
}

impl SpriteCell {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

/// A playback sequence: an explicit list of sheet cells at a fixed rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClip {
    /// Cells shown in order
    pub frames: &'static [SpriteCell],
    /// Playback rate in frames per second
    pub fps: f32,
    /// Whether playback wraps to the first frame
    pub looping: bool,
}

impl AnimationClip {
    pub const fn new(frames: &'static [SpriteCell], fps: f32, looping: bool) -> Self {
        Self {
            frames,
            fps,
            looping,
        }
    }

    /// Create a looping clip
    pub const fn looping(frames: &'static [SpriteCell], fps: f32) -> Self {
        Self::new(frames, fps, true)
    }

    /// Create a one-shot clip (plays once, then holds the last frame)
    pub const fn one_shot(frames: &'static [SpriteCell], fps: f32) -> Self {
        Self::new(frames, fps, false)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Duration of a single frame in seconds
    pub fn frame_duration(&self) -> f32 {
        1.0 / self.fps
    }

    /// Get the total duration of one animation cycle
    pub fn total_duration(&self) -> f32 {
        self.frame_count() as f32 * self.frame_duration()
    }
}

/// Playback cursor over a single clip
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    clip: AnimationClip,
    /// Current frame index
    current_frame: usize,
    /// Time elapsed in current frame
    frame_timer: f32,
    /// Whether the cursor advances on update
    playing: bool,
    /// A one-shot clip ran past its last frame
    finished: bool,
}

impl AnimationPlayer {
    /// Start playing a clip from its first frame
    pub fn new(clip: AnimationClip) -> Self {
        Self {
            clip,
            current_frame: 0,
            frame_timer: 0.0,
            playing: true,
            finished: false,
        }
    }

    /// Replace the clip and rewind, even if it is the same clip
    pub fn play_from_start(&mut self, clip: AnimationClip) {
        *self = Self::new(clip);
    }

    /// Resume the current animation
    pub fn resume(&mut self) {
        self.playing = true;
    }

    /// Stop and rewind to the first frame
    pub fn stop(&mut self) {
        self.playing = false;
        self.current_frame = 0;
        self.frame_timer = 0.0;
    }

    /// Advance the cursor by `dt` seconds.
    ///
    /// Returns true on the update where a one-shot clip finishes.
    pub fn update(&mut self, dt: f32) -> bool {
        if !self.playing || self.finished {
            return false;
        }

        let frame_count = self.clip.frame_count();
        if frame_count == 0 {
            self.current_frame = 0;
            self.playing = false;
            return false;
        }

        let frame_duration = self.clip.frame_duration();
        self.frame_timer += dt;

        while self.frame_timer >= frame_duration {
            self.frame_timer -= frame_duration;
            self.current_frame += 1;

            if self.current_frame >= frame_count {
                if self.clip.looping {
                    self.current_frame = 0;
                } else {
                    // Stay on last frame
                    self.current_frame = frame_count - 1;
                    self.playing = false;
                    self.finished = true;
                    return true;
                }
            }
        }

        false
    }

    pub fn clip(&self) -> &AnimationClip {
        &self.clip
    }

    /// Get the current frame index
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Check if the animation is playing
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Check if a one-shot clip has run to its end
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Sheet cell for the current frame
    pub fn current_cell(&self) -> SpriteCell {
        let last = self.clip.frame_count().saturating_sub(1);
        self.clip
            .frames
            .get(self.current_frame.min(last))
            .copied()
            .unwrap_or(SpriteCell::new(0, 0))
    }
}

/// Sprite sheet layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSheet {
    /// Width of each frame in pixels
    pub frame_width: u32,
    /// Height of each frame in pixels
    pub frame_height: u32,
    /// Number of columns in the sprite sheet
    pub columns: u32,
    /// Number of rows in the sprite sheet
    pub rows: u32,
}

impl SpriteSheet {
    pub const fn new(frame_width: u32, frame_height: u32, columns: u32, rows: u32) -> Self {
        Self {
            frame_width,
            frame_height,
            columns,
            rows,
        }
    }

    /// The player sheet: 32x32 frames on an 8x9 grid (256x288 pixels)
    pub const fn standard_player() -> Self {
        Self::new(32, 32, 8, 9)
    }

    /// Full sheet size in pixels
    pub fn sheet_size(&self) -> (u32, u32) {
        (
            self.frame_width * self.columns,
            self.frame_height * self.rows,
        )
    }

    /// Source rectangle of a cell in sheet pixels
    pub fn source_rect(&self, cell: SpriteCell) -> Rect {
        Rect::new(
            (cell.col * self.frame_width) as f32,
            (cell.row * self.frame_height) as f32,
            self.frame_width as f32,
            self.frame_height as f32,
        )
    }
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self::standard_player()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const FOUR: [SpriteCell; 4] = [
        SpriteCell::new(0, 0),
        SpriteCell::new(0, 1),
        SpriteCell::new(0, 2),
        SpriteCell::new(0, 3),
    ];
    const THREE: [SpriteCell; 3] = [
        SpriteCell::new(2, 5),
        SpriteCell::new(2, 6),
        SpriteCell::new(2, 7),
    ];

    #[test]
    fn test_animation_clip_creation() {
        let clip = AnimationClip::looping(&FOUR, 8.0);
        assert_eq!(clip.frame_count(), 4);
        assert_eq!(clip.frame_duration(), 0.125); // 1/8
        assert!(clip.looping);
    }

    #[test]
    fn test_animation_clip_duration() {
        let clip = AnimationClip::one_shot(&FOUR, 10.0);
        assert_relative_eq!(clip.total_duration(), 0.4);
    }

    #[test]
    fn test_animation_player_update() {
        let mut player = AnimationPlayer::new(AnimationClip::looping(&FOUR, 10.0)); // 0.1s per frame

        player.update(0.15); // 1.5 frames worth
        assert_eq!(player.current_frame(), 1);

        player.update(0.1);
        assert_eq!(player.current_frame(), 2);
        assert_eq!(player.current_cell(), SpriteCell::new(0, 2));
    }

    #[test]
    fn test_animation_looping() {
        let mut player = AnimationPlayer::new(AnimationClip::looping(&THREE, 10.0));

        // Advance through all frames
        player.update(0.35); // 3.5 frames
        assert_eq!(player.current_frame(), 0); // Should loop back
        assert!(player.is_playing());
        assert!(!player.is_finished());
    }

    #[test]
    fn test_animation_one_shot() {
        let mut player = AnimationPlayer::new(AnimationClip::one_shot(&THREE, 10.0));

        // Advance past all frames
        assert!(player.update(0.5));
        assert_eq!(player.current_frame(), 2); // Last frame
        assert!(!player.is_playing());
        assert!(player.is_finished());
        assert_eq!(player.current_cell(), SpriteCell::new(2, 7));

        // Finishing is reported once
        assert!(!player.update(0.5));
    }

    #[test]
    fn test_stopped_player_does_not_advance() {
        let mut player = AnimationPlayer::new(AnimationClip::looping(&FOUR, 10.0));
        player.stop();
        player.update(1.0);
        assert_eq!(player.current_frame(), 0);

        player.resume();
        player.update(0.1);
        assert_eq!(player.current_frame(), 1);
    }

    #[test]
    fn test_empty_clip_stops() {
        let mut player = AnimationPlayer::new(AnimationClip::looping(&[], 10.0));
        assert!(!player.update(1.0));
        assert!(!player.is_playing());
        assert_eq!(player.current_cell(), SpriteCell::new(0, 0));
    }

    #[test]
    fn test_sprite_sheet_source_rect() {
        let sheet = SpriteSheet::standard_player();
        assert_eq!(sheet.sheet_size(), (256, 288));
        assert_eq!(
            sheet.source_rect(SpriteCell::new(5, 3)),
            Rect::new(96.0, 160.0, 32.0, 32.0)
        );
    }
}
