use crate::engine::geometry::{CalibrationError, Contour, ImageSize, Point, Zone, ZoneMapper};

pub const DEFAULT_PRECISION: u32 = 10;

/// Parse the precision entry. Anything that is not a positive integer falls
/// back to [`DEFAULT_PRECISION`].
pub fn parse_precision(text: &str) -> u32 {
    match text.trim().parse::<i64>() {
        Ok(value) if value > 0 => value as u32,
        _ => DEFAULT_PRECISION,
    }
}

/// Screen-space points for one contour. The first point is a pen-up move
/// target, the remaining points are pen-down drag targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn pen_up(&self) -> Point {
        self.points[0]
    }

    pub fn pen_down(&self) -> &[Point] {
        &self.points[1..]
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

/// A stroke plus where it came from, for progress reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStroke {
    pub stroke: Stroke,
    /// Index of the source contour in the input list.
    pub contour_index: usize,
    /// Total number of contours in the input list, surviving or not.
    pub contour_total: usize,
}

/// Down-sample `contours` into an ordered stroke sequence inside `zone`.
///
/// Contours of length `<= 3 * precision` are noise and emit nothing. A
/// surviving contour becomes one stroke: its first point, then every
/// `precision`-th point after it. Trailing points past the last full step are
/// dropped; the outline is approximated, not traced exactly.
///
/// The iterator is lazy and recomputes from scratch on every call; it holds
/// no state shared with other invocations.
pub fn generate<'a>(
    contours: &'a [Contour],
    image_size: ImageSize,
    zone: Zone,
    precision: u32,
) -> Result<impl Iterator<Item = PlannedStroke> + 'a, CalibrationError> {
    let mapper = ZoneMapper::new(image_size, zone)?;
    let precision = precision.max(1) as usize;
    let total = contours.len();

    Ok(contours.iter().enumerate().filter_map(move |(index, contour)| {
        if contour.len() <= 3 * precision {
            return None;
        }

        let mut points = Vec::with_capacity(contour.len() / precision + 1);
        points.push(mapper.map(contour[0]));
        let mut i = precision;
        while i < contour.len() {
            points.push(mapper.map(contour[i]));
            i += precision;
        }

        Some(PlannedStroke {
            stroke: Stroke { points },
            contour_index: index,
            contour_total: total,
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_setup() -> (ImageSize, Zone) {
        (
            ImageSize::new(200, 200),
            Zone::new(Point::new(0, 0), Point::new(200, 200)),
        )
    }

    fn line_contour(len: usize) -> Contour {
        (0..len).map(|i| Point::new(i as i32, 0)).collect()
    }

    #[test]
    fn precision_parsing_falls_back_to_default() {
        assert_eq!(parse_precision("10"), 10);
        assert_eq!(parse_precision(" 3 "), 3);
        assert_eq!(parse_precision("0"), DEFAULT_PRECISION);
        assert_eq!(parse_precision("-4"), DEFAULT_PRECISION);
        assert_eq!(parse_precision("fast"), DEFAULT_PRECISION);
        assert_eq!(parse_precision(""), DEFAULT_PRECISION);
    }

    #[test]
    fn contours_at_the_length_threshold_are_filtered() {
        let (size, zone) = identity_setup();
        let contours = vec![line_contour(30)];
        let strokes: Vec<_> = generate(&contours, size, zone, 10)
            .expect("valid zone")
            .collect();
        assert!(strokes.is_empty());

        let contours = vec![line_contour(31)];
        let strokes: Vec<_> = generate(&contours, size, zone, 10)
            .expect("valid zone")
            .collect();
        assert_eq!(strokes.len(), 1);
    }

    #[test]
    fn sampling_takes_first_point_and_every_precision_step() {
        let (size, zone) = identity_setup();
        let contours = vec![line_contour(101)];
        let strokes: Vec<_> = generate(&contours, size, zone, 10)
            .expect("valid zone")
            .collect();
        assert_eq!(strokes.len(), 1);

        let stroke = &strokes[0].stroke;
        assert_eq!(stroke.len(), 11);
        assert_eq!(stroke.pen_up(), Point::new(0, 0));
        let xs: Vec<i32> = stroke.pen_down().iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![10, 20, 30, 40, 50, 60, 70, 80, 90, 100]);
    }

    #[test]
    fn trailing_partial_segment_is_dropped() {
        let (size, zone) = identity_setup();
        // 107 points: indices 100..107 lie past the last full step of 10.
        let contours = vec![line_contour(107)];
        let strokes: Vec<_> = generate(&contours, size, zone, 10)
            .expect("valid zone")
            .collect();
        let last = strokes[0].stroke.pen_down().last().copied().expect("drags");
        assert_eq!(last, Point::new(100, 0));
    }

    #[test]
    fn strokes_keep_contour_order_and_report_totals() {
        let (size, zone) = identity_setup();
        let contours = vec![line_contour(5), line_contour(50), line_contour(80)];
        let strokes: Vec<_> = generate(&contours, size, zone, 10)
            .expect("valid zone")
            .collect();
        assert_eq!(strokes.len(), 2);
        assert_eq!(strokes[0].contour_index, 1);
        assert_eq!(strokes[1].contour_index, 2);
        assert!(strokes.iter().all(|s| s.contour_total == 3));
    }

    #[test]
    fn generate_rejects_invalid_zones_before_iterating() {
        let size = ImageSize::new(100, 100);
        let zone = Zone::new(Point::new(50, 50), Point::new(50, 150));
        assert!(generate(&[line_contour(100)], size, zone, 10).is_err());
    }

    #[test]
    fn empty_contour_list_yields_no_strokes() {
        let (size, zone) = identity_setup();
        let strokes: Vec<_> = generate(&[], size, zone, 10)
            .expect("valid zone")
            .collect();
        assert!(strokes.is_empty());
    }
}
