//! Image-processing collaborator: turns an image file into the outline
//! contours the engine draws from, plus an edge-map preview for the GUI.

use anyhow::Context;
use image::imageops::FilterType;
use image::GrayImage;

use crate::engine::geometry::{resized_size, Contour, ImageSize, Point};

/// Longer side of the working image, in pixels. Larger sources are shrunk to
/// this before edge detection so stroke counts stay manageable.
pub const WORKING_MAX_SIDE: u32 = 600;

const CANNY_LOW: f32 = 100.0;
const CANNY_HIGH: f32 = 200.0;

/// Result of tracing one source image. `size` is the working (resized) size;
/// all contour points are in its coordinate space.
#[derive(Debug)]
pub struct TracedImage {
    pub size: ImageSize,
    pub contours: Vec<Contour>,
    /// Canny edge map at the working size, for the GUI preview.
    pub edges: GrayImage,
}

/// Load `path`, shrink it to the working size, run Canny edge detection and
/// extract the edge contours.
///
/// Decode failures surface as errors; they never degrade into an empty
/// contour list.
pub fn trace_image(path: &str) -> anyhow::Result<TracedImage> {
    let image = image::open(path).with_context(|| format!("failed to load image {path:?}"))?;
    let gray = image.to_luma8();

    let size = resized_size(ImageSize::new(gray.width(), gray.height()), WORKING_MAX_SIDE);
    let resized = image::imageops::resize(&gray, size.width, size.height, FilterType::Triangle);

    let edges = imageproc::edges::canny(&resized, CANNY_LOW, CANNY_HIGH);
    let contours = extract_contours(&edges);
    tracing::info!(
        path,
        width = size.width,
        height = size.height,
        contours = contours.len(),
        "image traced"
    );

    Ok(TracedImage {
        size,
        contours,
        edges,
    })
}

/// Border-following contour extraction over a binary edge map.
fn extract_contours(edges: &GrayImage) -> Vec<Contour> {
    imageproc::contours::find_contours::<i32>(edges)
        .into_iter()
        .map(|contour| {
            contour
                .points
                .into_iter()
                .map(|p| Point::new(p.x, p.y))
                .collect()
        })
        .collect()
}
