// Per-axis collision resolution against static platforms
//
// Each axis is resolved independently: x first at the old y, then y at the
// committed x. A platform that fully encloses the tentative position is
// still resolved axis by axis, so some overlapping-platform layouts let the
// player slip through a corner. That behavior is kept as-is.

use crate::core::{math::clamp, overlaps, Rect};

use super::body::PlayerBody;

/// What the vertical pass ran into this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerticalContact {
    /// Resolved a downward overlap (standing on a platform)
    pub landed: bool,
    /// Resolved an upward overlap (bumped a ceiling)
    pub hit_ceiling: bool,
}

/// Move the body along x and push it out of any platform it enters.
///
/// The tentative x is clamped to `[0, max_x]`, then every platform is
/// checked in list order against the corrected rectangle. Returns whether
/// any platform blocked the motion.
pub fn resolve_horizontal(body: &mut PlayerBody, platforms: &[Rect], max_x: f32) -> bool {
    let y = body.position.y;
    let mut x = clamp(body.position.x + body.velocity.x, 0.0, max_x);
    let mut rect = body.rect_at(x, y);
    let mut blocked = false;

    for platform in platforms {
        if !overlaps(&rect, platform) {
            continue;
        }

        if body.velocity.x > 0.0 {
            x = platform.x - body.width();
            blocked = true;
        } else if body.velocity.x < 0.0 {
            x = platform.right();
            blocked = true;
        }
        rect = body.rect_at(x, y);
    }

    body.position.x = x;
    blocked
}

/// Move the body along y, push it out of platforms and update `grounded`.
///
/// A downward hit snaps the feet to the platform top and zeroes the
/// vertical velocity; an upward hit snaps the head to the platform bottom
/// and zeroes it too, without grounding. Once the velocity is zeroed the
/// rest of the scan leaves later overlaps alone. Resting on the floor bound
/// (`y >= floor`) also counts as grounded.
pub fn resolve_vertical(body: &mut PlayerBody, platforms: &[Rect], floor: f32) -> VerticalContact {
    let x = body.position.x;
    let mut y = clamp(body.position.y + body.velocity.y, 0.0, floor);
    let mut rect = body.rect_at(x, y);
    let mut contact = VerticalContact::default();

    for platform in platforms {
        if !overlaps(&rect, platform) {
            continue;
        }

        if body.velocity.y > 0.0 {
            y = platform.y - body.height();
            body.velocity.y = 0.0;
            contact.landed = true;
        } else if body.velocity.y < 0.0 {
            y = platform.bottom();
            body.velocity.y = 0.0;
            contact.hit_ceiling = true;
        }
        rect = body.rect_at(x, y);
    }

    body.position.y = y;
    body.grounded = contact.landed || y >= floor;
    if body.grounded && body.velocity.y > 0.0 {
        body.velocity.y = 0.0;
    }

    contact
}
