//! Static map URLs used to preview a case.
//!
//! The URLs are display-only. They are rendered from an explicit
//! [`MapView`] record by a pure function.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Corners;

const STATIC_MAPS_ENDPOINT: &str = "http://maps.googleapis.com/maps/api/staticmap";

/// Everything a map preview shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    /// Last-known position, marked `L`.
    pub last_known: Coord<f64>,
    /// Find position, marked `F` on the find preview.
    pub find: Coord<f64>,
    /// Bounding box outline.
    pub corners: Corners,
}

/// Preview URLs for a case.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MapUrls {
    /// Box outline with the last-known marker.
    pub overview: String,
    /// Overview plus the find marker.
    pub with_find: String,
}

/// Render the preview URLs for `view`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use mapscore_core::{CaseGrid, GridConfig, MapView, render_map_urls};
///
/// # fn main() -> Result<(), mapscore_core::GridError> {
/// let last = Coord { x: -120.0, y: 38.5 };
/// let grid = CaseGrid::build(last, GridConfig::default())?;
/// let view = MapView { last_known: last, find: last, corners: grid.bounds().corners() };
/// let urls = render_map_urls(&view);
/// assert!(urls.overview.contains("&center=38.5,-120"));
/// assert!(urls.with_find.starts_with(&urls.overview));
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn render_map_urls(view: &MapView) -> MapUrls {
    let c = &view.corners;
    let last = lat_lon(view.last_known);
    let overview = format!(
        "{STATIC_MAPS_ENDPOINT}?size=500x500&maptype=hybrid&sensor=false\
         &center={last}\
         &path=color:0x0000ff|weight:5|{ul}|{ur}|{lr}|{ll}|{ul}\
         &markers=color:red%7Clabel:L%7c{last}",
        ul = lat_lon(c.upper_left),
        ur = lat_lon(c.upper_right),
        lr = lat_lon(c.lower_right),
        ll = lat_lon(c.lower_left),
    );
    let with_find = format!(
        "{overview}&markers=color:yellow%7Clabel:F%7c{find}",
        find = lat_lon(view.find)
    );
    MapUrls {
        overview,
        with_find,
    }
}

fn lat_lon(position: Coord<f64>) -> String {
    format!("{},{}", position.y, position.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoundingBox;
    use rstest::rstest;

    #[rstest]
    fn outlines_box_clockwise_from_upper_left() {
        let corners = BoundingBox {
            top: 2.0,
            bottom: 1.0,
            left: 10.0,
            right: 11.0,
        }
        .corners();
        let view = MapView {
            last_known: Coord { x: 10.5, y: 1.5 },
            find: Coord { x: 10.25, y: 1.75 },
            corners,
        };

        let urls = render_map_urls(&view);

        assert!(
            urls.overview
                .contains("&path=color:0x0000ff|weight:5|2,10|2,11|1,11|1,10|2,10&"),
            "{}",
            urls.overview
        );
        assert!(urls.overview.ends_with("label:L%7c1.5,10.5"));
        assert!(urls.with_find.ends_with("label:F%7c1.75,10.25"));
        assert!(!urls.overview.contains("label:F"));
    }
}
