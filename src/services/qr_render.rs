//! QR code rendering
//!
//! Black modules on a white background. `margin` is the quiet zone in
//! modules; the module scale is chosen so the image is at least `size`
//! pixels wide.

use std::fmt::Write as _;
use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, GrayImage, ImageBuffer, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode};

use crate::errors::Result;

/// Module matrix plus the layout derived from `size` and `margin`.
struct Layout {
    colors: Vec<Color>,
    width: u32,
    margin: u32,
    scale: u32,
}

impl Layout {
    fn new(data: &str, size: u32, margin: u32) -> Result<Self> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)?;
        let width = code.width() as u32;
        let total = width + 2 * margin;
        Ok(Self {
            colors: code.to_colors(),
            width,
            margin,
            scale: size.div_ceil(total).max(1),
        })
    }

    /// Side length in modules, including the quiet zone.
    fn total_modules(&self) -> u32 {
        self.width + 2 * self.margin
    }

    fn pixels(&self) -> u32 {
        self.total_modules() * self.scale
    }

    /// `(mx, my)` in quiet-zone-inclusive module coordinates.
    fn is_dark(&self, mx: u32, my: u32) -> bool {
        let (m, w) = (self.margin, self.width);
        if mx < m || my < m || mx >= m + w || my >= m + w {
            return false;
        }
        let index = ((my - m) * w + (mx - m)) as usize;
        self.colors.get(index) == Some(&Color::Dark)
    }
}

/// Render `data` as a PNG.
pub fn render_png(data: &str, size: u32, margin: u32) -> Result<Vec<u8>> {
    let layout = Layout::new(data, size, margin)?;
    let px = layout.pixels();
    let scale = layout.scale;

    let img: GrayImage = ImageBuffer::from_fn(px, px, |x, y| {
        if layout.is_dark(x / scale, y / scale) {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });

    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageLuma8(img).write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}

/// Render `data` as a standalone SVG document.
pub fn render_svg(data: &str, size: u32, margin: u32) -> Result<String> {
    let layout = Layout::new(data, size, margin)?;
    let total = layout.total_modules();
    let px = layout.pixels();

    let mut path = String::new();
    for my in 0..total {
        for mx in 0..total {
            if layout.is_dark(mx, my) {
                // write! 到 String 不会失败
                let _ = write!(path, "M{mx},{my}h1v1h-1z");
            }
        }
    }

    Ok(format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8"?>"#,
            r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{px}" height="{px}" "#,
            r#"viewBox="0 0 {total} {total}" shape-rendering="crispEdges">"#,
            r##"<rect width="{total}" height="{total}" fill="#ffffff"/>"##,
            r##"<path fill="#000000" d="{path}"/>"##,
            "</svg>"
        ),
        px = px,
        total = total,
        path = path
    ))
}

/// `data:image/png;base64,...` for inline `<img>` display.
pub fn png_data_url(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}
