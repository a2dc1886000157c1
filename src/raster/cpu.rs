use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::store::PreparedImage,
    foundation::core::{Point, Rect, Rgba8Premul, Size, device_size},
    foundation::error::{FxError, FxResult},
    raster::composite::{self, EraseShape},
    raster::surface::{RasterSurface, SurfaceFactory},
};

/// CPU raster surface: draws through `vello_cpu`, erases with byte loops.
pub struct CpuSurface {
    css: Size,
    dpr: f64,
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
    pending: Option<vello_cpu::RenderContext>,
    image_cache: HashMap<ImageKey, CachedPaint>,
}

/// Paint built from a prepared image. Holding `source` pins the allocation the
/// key's address points at.
#[derive(Clone)]
struct CachedPaint {
    source: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ImageKey {
    ptr: usize,
    width: u32,
    height: u32,
}

impl ImageKey {
    fn of(image: &PreparedImage) -> Self {
        Self {
            ptr: Arc::as_ptr(&image.rgba8_premul) as usize,
            width: image.width,
            height: image.height,
        }
    }
}

impl std::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("css", &self.css)
            .field("dpr", &self.dpr)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

impl CpuSurface {
    pub fn new(css: Size, dpr: f64) -> FxResult<Self> {
        let (width, height) = checked_device_size(css, dpr)?;
        Ok(Self {
            css,
            dpr,
            width,
            height,
            pixmap: vello_cpu::Pixmap::new(width, height),
            pending: None,
            image_cache: HashMap::new(),
        })
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    /// Premultiplied pixel at device coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return None;
        }
        let i = (y as usize * usize::from(self.width) + x as usize) * 4;
        let d = self.pixels();
        Some([d[i], d[i + 1], d[i + 2], d[i + 3]])
    }

    /// True when no pixel has any coverage.
    pub fn is_fully_transparent(&self) -> bool {
        self.pixels().chunks_exact(4).all(|px| px[3] == 0)
    }

    fn device_affine(&self) -> kurbo::Affine {
        kurbo::Affine::scale(self.dpr)
    }

    fn context(&mut self) -> &mut vello_cpu::RenderContext {
        let (w, h) = (self.width, self.height);
        self.pending
            .get_or_insert_with(|| vello_cpu::RenderContext::new(w, h))
    }

    fn flush_pending(&mut self) -> FxResult<()> {
        let Some(mut ctx) = self.pending.take() else {
            return Ok(());
        };
        ctx.flush();
        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.render_to_pixmap(&mut layer);
        composite::over_in_place(
            self.pixmap.data_as_u8_slice_mut(),
            layer.data_as_u8_slice(),
            1.0,
        )
    }

    fn image_paint_for(&mut self, image: &PreparedImage) -> FxResult<vello_cpu::Image> {
        let key = ImageKey::of(image);
        if let Some(cached) = self.image_cache.get(&key)
            && Arc::ptr_eq(&cached.source, &image.rgba8_premul)
        {
            return Ok(cached.paint.clone());
        }
        let pixmap = image_premul_bytes_to_pixmap(
            image.rgba8_premul.as_slice(),
            image.width,
            image.height,
        )?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache.insert(
            key,
            CachedPaint {
                source: Arc::clone(&image.rgba8_premul),
                paint: paint.clone(),
            },
        );
        Ok(paint)
    }
}

impl RasterSurface for CpuSurface {
    fn resize(&mut self, css: Size, dpr: f64) -> FxResult<()> {
        let (width, height) = checked_device_size(css, dpr)?;
        self.css = css;
        self.dpr = dpr;
        self.pending = None;
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.pixmap = vello_cpu::Pixmap::new(width, height);
        } else {
            clear_pixmap_to_transparent(&mut self.pixmap);
        }
        Ok(())
    }

    fn css_size(&self) -> Size {
        self.css
    }

    fn pixel_size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn clear(&mut self) {
        self.pending = None;
        clear_pixmap_to_transparent(&mut self.pixmap);
    }

    fn draw_image(&mut self, image: &PreparedImage, dest: Rect, alpha: f64) -> FxResult<()> {
        self.draw_image_rotated(image, dest, 0.0, alpha)
    }

    fn draw_image_rotated(
        &mut self,
        image: &PreparedImage,
        dest: Rect,
        rotation_deg: f64,
        alpha: f64,
    ) -> FxResult<()> {
        if image.width == 0 || image.height == 0 || dest.width() <= 0.0 || dest.height() <= 0.0 {
            return Ok(());
        }
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return Ok(());
        }
        let paint = self.image_paint_for(image)?;
        let (iw, ih) = (f64::from(image.width), f64::from(image.height));
        let center = dest.center();
        let transform = self.device_affine()
            * kurbo::Affine::translate(center.to_vec2())
            * kurbo::Affine::rotate(rotation_deg.to_radians())
            * kurbo::Affine::translate((-dest.width() * 0.5, -dest.height() * 0.5))
            * kurbo::Affine::scale_non_uniform(dest.width() / iw, dest.height() / ih);

        let ctx = self.context();
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(paint);
        if alpha < 1.0 {
            ctx.push_opacity_layer(alpha as f32);
        }
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        if alpha < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: Rgba8Premul,
        alpha: f64,
    ) -> FxResult<()> {
        let alpha = alpha.clamp(0.0, 1.0);
        if radius <= 0.0 || !radius.is_finite() || alpha <= 0.0 || color.a == 0 {
            return Ok(());
        }
        let [r, g, b, a] = unpremultiply_color(color);
        let transform = affine_to_cpu(self.device_affine());
        let path = {
            use kurbo::Shape as _;
            bezpath_to_cpu(&kurbo::Circle::new(center, radius).to_path(0.1))
        };

        let ctx = self.context();
        ctx.set_transform(transform);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        if alpha < 1.0 {
            ctx.push_opacity_layer(alpha as f32);
        }
        ctx.fill_path(&path);
        if alpha < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn erase(&mut self, shape: &EraseShape) -> FxResult<()> {
        self.flush_pending()?;
        let device_shape = shape.scaled(self.dpr);
        let (w, h) = self.pixel_size();
        composite::erase_in_place(self.pixmap.data_as_u8_slice_mut(), w, h, &device_shape)
    }

    fn finish_frame(&mut self) -> FxResult<()> {
        self.flush_pending()
    }

    fn pixels(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }
}

/// Factory producing [`CpuSurface`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuSurfaceFactory;

impl SurfaceFactory for CpuSurfaceFactory {
    type Surface = CpuSurface;

    fn create(&mut self, css: Size, dpr: f64) -> FxResult<CpuSurface> {
        CpuSurface::new(css, dpr)
    }
}

fn checked_device_size(css: Size, dpr: f64) -> FxResult<(u16, u16)> {
    if !dpr.is_finite() || dpr <= 0.0 {
        return Err(FxError::resource("surface device pixel ratio must be > 0"));
    }
    let (w, h) = device_size(css, dpr);
    if w == 0 || h == 0 {
        return Err(FxError::resource("surface has zero device size"));
    }
    let w: u16 = w
        .try_into()
        .map_err(|_| FxError::resource("surface width exceeds u16"))?;
    let h: u16 = h
        .try_into()
        .map_err(|_| FxError::resource("surface height exceeds u16"))?;
    Ok((w, h))
}

fn clear_pixmap_to_transparent(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn unpremultiply_color(c: Rgba8Premul) -> [u8; 4] {
    let a = u16::from(c.a);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |v: u8| -> u8 { ((u16::from(v) * 255 + a / 2) / a).min(255) as u8 };
    [un(c.r), un(c.g), un(c.b), c.a]
}

fn affine_to_cpu(a: kurbo::Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> FxResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| FxError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| FxError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(FxError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::<vello_cpu::peniko::color::PremulRgba8>::with_capacity(
        (width as usize) * (height as usize),
    );
    for px in rgba8_premul.chunks_exact(4) {
        may_have_opacities |= px[3] != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8::from_u8_array([
            px[0], px[1], px[2], px[3],
        ]));
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/cpu.rs"]
mod tests;
