use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;

use super::error::SignalError;
use super::trace;

/// Colors and geometry for a rendered snapshot.
#[derive(Clone, Debug)]
pub struct SnapshotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub grid: RGBColor,
    pub line: RGBColor,
    pub stroke_width: u32,
}

impl Default for SnapshotStyle {
    fn default() -> Self {
        Self {
            width: 800,
            height: 300,
            background: RGBColor(10, 10, 15),
            grid: RGBColor(0, 60, 40),
            line: RGBColor(0, 230, 118),
            stroke_width: 2,
        }
    }
}

/// Renders the current window contents to PNG bytes: background, grid
/// lines at the fixed pitch, then the trace polyline.
pub fn render_frame_png(
    points: &[f32],
    capacity: usize,
    style: &SnapshotStyle,
) -> Result<Vec<u8>, SignalError> {
    if capacity == 0 {
        return Err(SignalError::Snapshot("window capacity is zero".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root =
            BitMapBackend::with_buffer(&mut buffer, (style.width, style.height)).into_drawing_area();
        root.fill(&style.background)?;
        for y in trace::grid_offsets(style.height as f32) {
            root.draw(&PathElement::new(
                vec![(0, y as i32), (style.width as i32, y as i32)],
                &style.grid,
            ))?;
        }
        for x in trace::grid_offsets(style.width as f32) {
            root.draw(&PathElement::new(
                vec![(x as i32, 0), (x as i32, style.height as i32)],
                &style.grid,
            ))?;
        }
        if points.len() > 1 {
            let polyline: Vec<(i32, i32)> =
                trace::trace_points(points, capacity, style.width as f32, style.height as f32)
                    .into_iter()
                    .map(|(x, y)| (x as i32, y as i32))
                    .collect();
            root.draw(&PathElement::new(
                polyline,
                ShapeStyle::from(&style.line).stroke_width(style.stroke_width),
            ))?;
        }
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, SignalError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| SignalError::Snapshot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
