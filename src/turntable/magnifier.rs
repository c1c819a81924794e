// SPDX-License-Identifier: MPL-2.0
//! Circular magnifier over the turntable image.
//!
//! The lens is rendered on the CPU from the decoded frame: a square of
//! `diameter` pixels sampled at `zoom` times the displayed scale, centered on
//! the pointer, with everything outside the circle left transparent.
//! Parts of the lens that would fall outside the viewport are cut away, so
//! the remaining piece always sits exactly under the pointer.

use image_rs::{imageops, ImageBuffer, Rgba, RgbaImage};
use iced::{Point, Rectangle, Size};
use std::ops::Deref;

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MagnifierSettings {
    pub diameter: f32,
    pub zoom: f32,
}

impl Default for MagnifierSettings {
    fn default() -> Self {
        Self {
            diameter: 150.0,
            zoom: 2.0,
        }
    }
}

/// A rendered lens ready to be placed over the image.
#[derive(Debug, Clone)]
pub struct Lens {
    /// Top-left corner of the visible part, in viewport coordinates.
    /// Never negative.
    pub origin: Point,
    /// Visible part of the lens, clipped to the viewport.
    pub pixels: RgbaImage,
}

#[derive(Debug, Clone, Default)]
pub struct Magnifier {
    enabled: bool,
    pointer: Option<Point>,
    settings: MagnifierSettings,
}

impl Magnifier {
    #[must_use]
    pub fn new(enabled: bool, settings: MagnifierSettings) -> Self {
        Self {
            enabled,
            pointer: None,
            settings,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    #[must_use]
    pub fn settings(&self) -> MagnifierSettings {
        self.settings
    }

    pub fn pointer_moved(&mut self, position: Point) {
        self.pointer = Some(position);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    #[must_use]
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.enabled && self.pointer.is_some()
    }

    /// Renders the lens for `frame` shown with `ContentFit::Contain` inside
    /// a viewport of `viewport` size. Returns `None` when hidden or when the
    /// pointer is outside the displayed image.
    #[must_use]
    pub fn lens<C>(&self, frame: &ImageBuffer<Rgba<u8>, C>, viewport: Size) -> Option<Lens>
    where
        C: Deref<Target = [u8]>,
    {
        if !self.enabled {
            return None;
        }
        let pointer = self.pointer?;
        let image_rect = contain_rect(viewport, frame.dimensions())?;
        if !image_rect.contains(pointer) {
            return None;
        }

        let scale = image_rect.width / frame.width() as f32;
        let source_x = (pointer.x - image_rect.x) / scale;
        let source_y = (pointer.y - image_rect.y) / scale;

        let diameter = self.settings.diameter.max(1.0).round() as u32;
        let pixels = render_lens(
            frame,
            (source_x, source_y),
            diameter,
            self.settings.zoom.max(f32::EPSILON) * scale,
        );

        let radius = diameter as f32 / 2.0;
        clip_to_viewport(
            pixels,
            Point::new(pointer.x - radius, pointer.y - radius),
            viewport,
        )
    }
}

/// Cuts the parts of a lens placed at `origin` that fall outside `viewport`.
fn clip_to_viewport(pixels: RgbaImage, origin: Point, viewport: Size) -> Option<Lens> {
    let (width, height) = pixels.dimensions();
    let left = (-origin.x).max(0.0).ceil();
    let top = (-origin.y).max(0.0).ceil();
    let visible = Point::new(origin.x + left, origin.y + top);

    let visible_width = (viewport.width - visible.x).floor().min(width as f32 - left);
    let visible_height = (viewport.height - visible.y).floor().min(height as f32 - top);
    if visible_width < 1.0 || visible_height < 1.0 {
        return None;
    }

    let (left, top) = (left as u32, top as u32);
    let (visible_width, visible_height) = (visible_width as u32, visible_height as u32);
    let pixels = if (left, top, visible_width, visible_height) == (0, 0, width, height) {
        pixels
    } else {
        imageops::crop_imm(&pixels, left, top, visible_width, visible_height).to_image()
    };

    Some(Lens {
        origin: visible,
        pixels,
    })
}

/// Area covered by an image of `image` size scaled to fit inside `viewport`,
/// centered. `None` for degenerate sizes.
#[must_use]
pub fn contain_rect(viewport: Size, image: (u32, u32)) -> Option<Rectangle> {
    let (width, height) = image;
    if width == 0 || height == 0 || viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }
    let scale = (viewport.width / width as f32).min(viewport.height / height as f32);
    let size = Size::new(width as f32 * scale, height as f32 * scale);
    Some(Rectangle::new(
        Point::new(
            (viewport.width - size.width) / 2.0,
            (viewport.height - size.height) / 2.0,
        ),
        size,
    ))
}

/// Samples a `diameter` square around `center` (frame pixels), magnified by
/// `factor` output pixels per source pixel, masked to a circle.
fn render_lens<C>(
    frame: &ImageBuffer<Rgba<u8>, C>,
    center: (f32, f32),
    diameter: u32,
    factor: f32,
) -> RgbaImage
where
    C: Deref<Target = [u8]>,
{
    let radius = diameter as f32 / 2.0;
    RgbaImage::from_fn(diameter, diameter, |x, y| {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        if dx * dx + dy * dy > radius * radius {
            return TRANSPARENT;
        }

        let sx = (center.0 + dx / factor).floor();
        let sy = (center.1 + dy / factor).floor();
        if sx < 0.0 || sy < 0.0 || sx >= frame.width() as f32 || sy >= frame.height() as f32 {
            return TRANSPARENT;
        }
        *frame.get_pixel(sx as u32, sy as u32)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 100x100 frame whose red channel encodes x and green encodes y.
    fn gradient() -> RgbaImage {
        RgbaImage::from_fn(100, 100, |x, y| Rgba([x as u8, y as u8, 0, 255]))
    }

    fn enabled() -> Magnifier {
        Magnifier::new(
            true,
            MagnifierSettings {
                diameter: 20.0,
                zoom: 2.0,
            },
        )
    }

    #[test]
    fn hidden_when_disabled_or_pointer_absent() {
        let mut magnifier = Magnifier::new(false, MagnifierSettings::default());
        magnifier.pointer_moved(Point::new(50.0, 50.0));
        assert!(!magnifier.is_visible());
        assert!(magnifier.lens(&gradient(), Size::new(100.0, 100.0)).is_none());

        magnifier.toggle();
        assert!(magnifier.is_visible());
        magnifier.pointer_left();
        assert!(!magnifier.is_visible());
    }

    #[test]
    fn contain_rect_letterboxes_wide_viewport() {
        let rect = contain_rect(Size::new(400.0, 100.0), (100, 100)).expect("valid sizes");
        assert_eq!(rect, Rectangle::new(Point::new(150.0, 0.0), Size::new(100.0, 100.0)));
        assert!(contain_rect(Size::new(0.0, 10.0), (10, 10)).is_none());
    }

    #[test]
    fn lens_is_centered_on_pointer_and_magnified() {
        let mut magnifier = enabled();
        magnifier.pointer_moved(Point::new(50.0, 40.0));

        let lens = magnifier
            .lens(&gradient(), Size::new(100.0, 100.0))
            .expect("pointer is over the image");
        assert_eq!(lens.origin, Point::new(40.0, 30.0));
        assert_eq!(lens.pixels.dimensions(), (20, 20));

        // Center pixel samples the pointer location.
        let center = lens.pixels.get_pixel(10, 10);
        assert_eq!(center.0[0], 50);
        assert_eq!(center.0[1], 40);

        // 2x zoom: ten output pixels span five source pixels.
        let right = lens.pixels.get_pixel(19, 10);
        assert_eq!(right.0[0], 54);
    }

    #[test]
    fn corners_outside_circle_are_transparent() {
        let mut magnifier = enabled();
        magnifier.pointer_moved(Point::new(50.0, 50.0));
        let lens = magnifier
            .lens(&gradient(), Size::new(100.0, 100.0))
            .expect("visible");
        assert_eq!(*lens.pixels.get_pixel(0, 0), TRANSPARENT);
        assert_eq!(lens.pixels.get_pixel(10, 10).0[3], 255);
    }

    #[test]
    fn samples_beyond_frame_edge_are_transparent() {
        let mut magnifier = enabled();
        // Image spans x 50..150 inside the letterboxed viewport.
        magnifier.pointer_moved(Point::new(51.0, 50.0));
        let lens = magnifier
            .lens(&gradient(), Size::new(200.0, 100.0))
            .expect("visible");
        assert_eq!(lens.origin, Point::new(41.0, 40.0));
        assert_eq!(*lens.pixels.get_pixel(2, 10), TRANSPARENT);
    }

    #[test]
    fn lens_near_top_left_is_clipped_but_stays_on_pointer() {
        let mut magnifier = enabled();
        magnifier.pointer_moved(Point::new(5.0, 3.0));

        let lens = magnifier
            .lens(&gradient(), Size::new(100.0, 100.0))
            .expect("pointer is over the image");
        assert_eq!(lens.origin, Point::new(0.0, 0.0));
        assert_eq!(lens.pixels.dimensions(), (15, 13));

        // The lens center lands on the pointer and samples what lies under it.
        let center = lens.pixels.get_pixel(5, 3);
        assert_eq!(center.0[0], 5);
        assert_eq!(center.0[1], 3);
    }

    #[test]
    fn lens_near_bottom_right_is_clipped_to_viewport() {
        let mut magnifier = enabled();
        magnifier.pointer_moved(Point::new(95.0, 98.0));

        let lens = magnifier
            .lens(&gradient(), Size::new(100.0, 100.0))
            .expect("pointer is over the image");
        assert_eq!(lens.origin, Point::new(85.0, 88.0));
        assert_eq!(lens.pixels.dimensions(), (15, 12));

        let center = lens.pixels.get_pixel(10, 10);
        assert_eq!(center.0[0], 95);
        assert_eq!(center.0[1], 98);
    }

    #[test]
    fn pointer_in_letterbox_hides_lens() {
        let mut magnifier = enabled();
        magnifier.pointer_moved(Point::new(10.0, 50.0));
        assert!(magnifier
            .lens(&gradient(), Size::new(400.0, 100.0))
            .is_none());
    }
}
