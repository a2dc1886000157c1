use crate::{
    assets::store::PreparedImage,
    foundation::{core::Rect, error::FxResult},
    mask::bite::{Bite, ErosionStyle},
    raster::{composite::EraseShape, surface::RasterSurface},
};

/// Redraw the base image into `draw_rect`, then erase every bite in order.
///
/// Bites are not kept as surface state: each call replays the full list.
pub fn draw_frame<S: RasterSurface>(
    surface: &mut S,
    image: &PreparedImage,
    bites: &[Bite],
    draw_rect: Rect,
    erosion: ErosionStyle,
) -> FxResult<()> {
    surface.clear();
    surface.draw_image(image, draw_rect, 1.0)?;
    for bite in bites.iter().filter(|b| b.radius > 0.0) {
        surface.erase(&erase_shape(bite, draw_rect, erosion))?;
    }
    surface.finish_frame()
}

fn erase_shape(bite: &Bite, draw_rect: Rect, erosion: ErosionStyle) -> EraseShape {
    match erosion {
        ErosionStyle::Wedge { sweep_rad } if !bite.whole => {
            // Open the slice away from the image centre, towards the edge being eaten.
            let out = bite.center - draw_rect.center();
            let facing = if out.hypot2() > 0.0 { out.y.atan2(out.x) } else { 0.0 };
            EraseShape::Wedge {
                center: bite.center,
                radius: bite.radius,
                start_rad: facing - sweep_rad * 0.5,
                sweep_rad,
            }
        }
        _ => EraseShape::Circle {
            center: bite.center,
            radius: bite.radius,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/mask/frame.rs"]
mod tests;
