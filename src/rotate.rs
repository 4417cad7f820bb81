//! Lossless rotation by multiples of 90 degrees
//!
//! Rotation is clockwise: one quarter turn maps row 0 onto the last column.
//! Each channel of a channel-last buffer is permuted independently.

use log::debug;

use crate::dispatch::map_each;
use crate::error::{Error, Result};
use crate::models::{Buffer, Plane, PlaneView};

/// Rotate one plane clockwise by `quarter_turns % 4` quarter turns
pub fn rotate_plane(plane: PlaneView<'_>, quarter_turns: usize) -> Plane {
    let (w, h) = (plane.width(), plane.height());
    match quarter_turns % 4 {
        0 => plane.to_plane(),
        // new[y][x] = old[h - 1 - x][y]
        1 => Plane::from_fn(h, w, |x, y| plane.at(y, h - 1 - x)),
        2 => Plane::from_fn(w, h, |x, y| plane.at(w - 1 - x, h - 1 - y)),
        // new[y][x] = old[x][w - 1 - y]
        _ => Plane::from_fn(h, w, |x, y| plane.at(w - 1 - y, x)),
    }
}

/// Rotate a `height x width x channels` buffer clockwise.
///
/// `quarter_turns` must be 1, 2, 3 or 4. Odd counts swap height and width;
/// the channel count is always preserved.
pub fn rotate(image: &Buffer, quarter_turns: u32) -> Result<Buffer> {
    if !(1..=4).contains(&quarter_turns) {
        return Err(Error::InvalidArgument(format!(
            "quarter turns must be between 1 and 4, got {quarter_turns}"
        )));
    }
    if image.rank() != 3 {
        return Err(Error::InvalidArgument(format!(
            "image must be 3 dimensional, got shape {:?}",
            image.shape()
        )));
    }
    debug!("rotate: image {:?}, {} quarter turn(s)", image.shape(), quarter_turns);

    map_each(image, |view| rotate_plane(view, quarter_turns as usize))
}
