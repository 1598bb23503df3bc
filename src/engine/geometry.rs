use serde::{Deserialize, Serialize};

/// An integer pixel position. Image-space points originate at the image's
/// top-left corner, screen-space points at the display's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One traced outline, ordered along the edge. May be open or closed.
pub type Contour = Vec<Point>;

/// Pixel dimensions of a source image. Both sides must be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// The calibrated drawing rectangle, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Zone {
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }
}

/// The two calibration corners describe a rectangle with non-positive width
/// or height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalibrationError {
    pub width: i32,
    pub height: i32,
}

impl std::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "incorrect calibration: drawing zone is {}x{} px",
            self.width, self.height
        )
    }
}

impl std::error::Error for CalibrationError {}

/// Scale `size` so its longer side becomes `max_side` and the shorter side
/// keeps the aspect ratio, truncated to whole pixels.
pub fn resized_size(size: ImageSize, max_side: u32) -> ImageSize {
    let (w, h) = (size.width as f64, size.height as f64);
    if size.width > size.height {
        ImageSize::new(max_side, ((max_side as f64) * (h / w)) as u32)
    } else {
        ImageSize::new(((max_side as f64) * (w / h)) as u32, max_side)
    }
}

/// Maps image-space points into a calibrated zone while preserving the image
/// aspect ratio as closely as the zone allows.
///
/// The fit is computed once at construction: the image is shrunk (never
/// enlarged) along each overflowing axis in turn, width first, then height.
/// When both axes overflow the zone the result depends on that order rather
/// than on a single joint scale factor; this matches the established
/// behavior and is kept deliberately.
#[derive(Debug, Clone, Copy)]
pub struct ZoneMapper {
    image_size: ImageSize,
    target_width: i32,
    target_height: i32,
    top_left: Point,
}

impl ZoneMapper {
    pub fn new(image_size: ImageSize, zone: Zone) -> Result<Self, CalibrationError> {
        let drawing_width = zone.bottom_right.x - zone.top_left.x;
        let drawing_height = zone.bottom_right.y - zone.top_left.y;
        if drawing_width <= 0 || drawing_height <= 0 {
            return Err(CalibrationError {
                width: drawing_width,
                height: drawing_height,
            });
        }

        let image_aspect = image_size.width as f64 / image_size.height as f64;
        let mut target_width = image_size.width as i32;
        let mut target_height = image_size.height as i32;

        let margin_w = drawing_width - target_width;
        if margin_w < 0 {
            target_width = image_size.width as i32 + margin_w;
            target_height = (target_width as f64 / image_aspect) as i32;
        }
        let margin_h = drawing_height - target_height;
        if margin_h < 0 {
            target_height += margin_h;
            target_width = (target_height as f64 * image_aspect) as i32;
        }

        Ok(Self {
            image_size,
            target_width,
            target_height,
            top_left: zone.top_left,
        })
    }

    /// Fitted size of the image inside the zone.
    pub fn target_size(&self) -> (i32, i32) {
        (self.target_width, self.target_height)
    }

    pub fn map(&self, point: Point) -> Point {
        let x = self.top_left.x
            + (self.target_width as f64 * point.x as f64 / self.image_size.width as f64) as i32;
        let y = self.top_left.y
            + (self.target_height as f64 * point.y as f64 / self.image_size.height as f64) as i32;
        Point::new(x, y)
    }
}

/// One-shot form of [`ZoneMapper::map`].
pub fn map_point(
    point: Point,
    image_size: ImageSize,
    zone: Zone,
) -> Result<Point, CalibrationError> {
    Ok(ZoneMapper::new(image_size, zone)?.map(point))
}

/// Batch form of [`map_point`]; the zone is validated once.
pub fn map_points(
    points: &[Point],
    image_size: ImageSize,
    zone: Zone,
) -> Result<Vec<Point>, CalibrationError> {
    let mapper = ZoneMapper::new(image_size, zone)?;
    Ok(points.iter().map(|&p| mapper.map(p)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(left: i32, top: i32, right: i32, bottom: i32) -> Zone {
        Zone::new(Point::new(left, top), Point::new(right, bottom))
    }

    #[test]
    fn resized_size_pins_longer_side_to_max() {
        assert_eq!(
            resized_size(ImageSize::new(1200, 300), 600),
            ImageSize::new(600, 150)
        );
        assert_eq!(
            resized_size(ImageSize::new(300, 1200), 600),
            ImageSize::new(150, 600)
        );
        assert_eq!(
            resized_size(ImageSize::new(640, 640), 600),
            ImageSize::new(600, 600)
        );
    }

    #[test]
    fn resized_size_keeps_aspect_within_truncation() {
        let size = ImageSize::new(1023, 311);
        let out = resized_size(size, 600);
        assert_eq!(out.width, 600);
        let expected = 600.0 * 311.0 / 1023.0;
        assert!((out.height as f64 - expected).abs() <= 1.0);
    }

    #[test]
    fn degenerate_zones_are_rejected() {
        let size = ImageSize::new(100, 100);
        let p = Point::new(0, 0);
        assert!(map_point(p, size, zone(100, 0, 100, 100)).is_err());
        assert!(map_point(p, size, zone(0, 100, 100, 100)).is_err());
        assert!(map_point(p, size, zone(50, 50, 10, 90)).is_err());
    }

    #[test]
    fn identity_zone_maps_points_unchanged() {
        let size = ImageSize::new(100, 100);
        let z = zone(0, 0, 100, 100);
        assert_eq!(map_point(Point::new(50, 50), size, z), Ok(Point::new(50, 50)));
        assert_eq!(map_point(Point::new(0, 0), size, z), Ok(Point::new(0, 0)));
    }

    #[test]
    fn wide_image_shrinks_to_zone_width_and_rescales_height() {
        let size = ImageSize::new(200, 100);
        let z = zone(0, 0, 100, 100);
        let mapper = ZoneMapper::new(size, z).expect("valid zone");
        assert_eq!(mapper.target_size(), (100, 50));
        assert_eq!(mapper.map(Point::new(200, 100)), Point::new(100, 50));
    }

    #[test]
    fn zone_offset_translates_output() {
        let size = ImageSize::new(100, 100);
        let z = zone(474, 285, 574, 385);
        assert_eq!(
            map_point(Point::new(50, 50), size, z),
            Ok(Point::new(524, 335))
        );
    }

    #[test]
    fn mapping_is_monotone_along_each_axis() {
        let size = ImageSize::new(640, 480);
        let z = zone(10, 20, 310, 170);
        let mapper = ZoneMapper::new(size, z).expect("valid zone");
        let mut last = mapper.map(Point::new(0, 0));
        for i in 1..=64 {
            let next = mapper.map(Point::new(i * 10, i * 7));
            assert!(next.x >= last.x);
            assert!(next.y >= last.y);
            last = next;
        }
    }

    #[test]
    fn batch_mapping_matches_single_point_mapping() {
        let size = ImageSize::new(320, 200);
        let z = zone(5, 5, 205, 105);
        let points = vec![Point::new(0, 0), Point::new(160, 100), Point::new(319, 199)];
        let batch = map_points(&points, size, z).expect("valid zone");
        for (p, mapped) in points.iter().zip(&batch) {
            assert_eq!(map_point(*p, size, z).expect("valid zone"), *mapped);
        }
    }
}
