use crate::geometry::{LngLat, Point};

pub const LOADING_MESSAGE: &str = "Loading Well Data...";
pub const POPUP_TITLE: &str = "Well Location";
pub const CONFIG_ERROR_TITLE: &str = "Configuration Error";
pub const CONFIG_ERROR_MESSAGE: &str = "The Mapbox Access Token is missing.";

#[derive(Debug, Clone, PartialEq)]
pub enum StatusLine {
    Loading,
    Error(String),
    Ready,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerSpec {
    pub index: usize,
    pub position: LngLat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupSpec {
    pub index: usize,
    pub anchor: LngLat,
    pub longitude: String,
    pub latitude: String,
}

impl PopupSpec {
    pub fn for_point(index: usize, point: &Point) -> Self {
        Self {
            index,
            anchor: point.coordinates,
            longitude: format_coordinate(point.lng()),
            latitude: format_coordinate(point.lat()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewFrame {
    pub status: StatusLine,
    pub markers: Vec<MarkerSpec>,
    pub popup: Option<PopupSpec>,
}

/// Everything the shell needs to draw one state of the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    ConfigError,
    Map(ViewFrame),
}

/// Four decimal places, with negative zero printed as `0.0000`.
///
/// Exact halfway values round away from zero, matching `Number.toFixed(4)`.
pub fn format_coordinate(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    if is_fifth_decimal_tie(value) {
        let rounded = (value * 1e4).round() / 1e4;
        return format!("{rounded:.4}");
    }
    format!("{value:.4}")
}

/// A binary float sits exactly halfway between two 4-decimal values only
/// when it is an odd multiple of 1/32.
fn is_fifth_decimal_tie(value: f64) -> bool {
    let scaled = value * 32.0;
    scaled.is_finite() && scaled.fract() == 0.0 && scaled.abs() % 2.0 == 1.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_four_decimals() {
        assert_eq!(format_coordinate(-116.57654321), "-116.5765");
        assert_eq!(format_coordinate(53.9333), "53.9333");
        assert_eq!(format_coordinate(53.93339), "53.9334");
        assert_eq!(format_coordinate(12.0), "12.0000");
        assert_eq!(format_coordinate(-0.0), "0.0000");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(format_coordinate(1.03125), "1.0313");
        assert_eq!(format_coordinate(-113.15625), "-113.1563");
        assert_eq!(format_coordinate(53.90625), "53.9063");
        assert_eq!(format_coordinate(0.03125), "0.0313");
        assert_eq!(format_coordinate(-0.03125), "-0.0313");
        assert_eq!(format_coordinate(0.5), "0.5000");
        assert_eq!(format_coordinate(-2.0625), "-2.0625");
    }

    #[test]
    fn popup_uses_point_coordinates() {
        let popup = PopupSpec::for_point(3, &Point::new(-110.123456, 49.5));
        assert_eq!(popup.index, 3);
        assert_eq!(popup.anchor, LngLat::new(-110.123456, 49.5));
        assert_eq!(popup.longitude, "-110.1235");
        assert_eq!(popup.latitude, "49.5000");
    }
}
