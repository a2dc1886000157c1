use crate::{
    assets::store::PreparedImage,
    foundation::core::{Point, Rect, Rgba8Premul, Size},
    foundation::error::FxResult,
    raster::composite::EraseShape,
};

/// 2D drawing surface sized in device pixels and addressed in CSS pixels.
///
/// Calls take effect in order: an [`RasterSurface::erase`] only removes what was
/// drawn before it.
pub trait RasterSurface {
    /// Reallocate for a CSS size at `dpr` device pixels per CSS pixel.
    fn resize(&mut self, css: Size, dpr: f64) -> FxResult<()>;

    /// Current size in CSS pixels.
    fn css_size(&self) -> Size;

    /// Current backing size in device pixels.
    fn pixel_size(&self) -> (u32, u32);

    /// Drop everything drawn so far (fully transparent surface).
    fn clear(&mut self);

    /// Draw `image` stretched into `dest` at `alpha` opacity.
    fn draw_image(&mut self, image: &PreparedImage, dest: Rect, alpha: f64) -> FxResult<()>;

    /// Like [`RasterSurface::draw_image`], turned `rotation_deg` clockwise about
    /// the centre of `dest`. Surfaces without transforms draw it unrotated.
    fn draw_image_rotated(
        &mut self,
        image: &PreparedImage,
        dest: Rect,
        rotation_deg: f64,
        alpha: f64,
    ) -> FxResult<()> {
        let _ = rotation_deg;
        self.draw_image(image, dest, alpha)
    }

    /// Fill a circle with a flat colour at `alpha` opacity.
    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: Rgba8Premul,
        alpha: f64,
    ) -> FxResult<()>;

    /// Make the pixels under `shape` fully transparent, regardless of colour.
    fn erase(&mut self, shape: &EraseShape) -> FxResult<()>;

    /// Make every pending draw visible in the backing pixels.
    fn finish_frame(&mut self) -> FxResult<()>;

    /// Row-major premultiplied RGBA8 bytes, pending draws excluded.
    fn pixels(&self) -> &[u8];
}

/// Creates surfaces for invocations that own one (bite overlays).
pub trait SurfaceFactory {
    /// Surface type produced.
    type Surface: RasterSurface;

    /// Acquire a surface; an error means no drawing context is available.
    fn create(&mut self, css: Size, dpr: f64) -> FxResult<Self::Surface>;
}
