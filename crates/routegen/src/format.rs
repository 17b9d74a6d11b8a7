//! Conversion to the external reporting record shape.

use serde::Serialize;

use crate::geo::GeoPoint;

/// One route point as consumed by the reporting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathPoint {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
}

/// Maps a route into report records, stamping every point with `label`.
pub fn format_route(route: &[GeoPoint], label: &str) -> Vec<PathPoint> {
    route
        .iter()
        .map(|point| PathPoint {
            lat: point.lat,
            lng: point.lng,
            name: label.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_route_preserves_order_and_label() {
        let route = [GeoPoint::new(30.0, 121.0), GeoPoint::new(30.001, 121.001)];
        let records = format_route(&route, "Fengxian Campus");

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].lat, 30.0);
        assert_eq!(records[1].lng, 121.001);
        assert!(records.iter().all(|r| r.name == "Fengxian Campus"));
    }

    #[test]
    fn test_record_json_shape() {
        let records = format_route(&[GeoPoint::new(30.5, 121.5)], "Track");
        let json = serde_json::to_string(&records).unwrap();

        assert_eq!(json, r#"[{"lat":30.5,"lng":121.5,"name":"Track"}]"#);
    }
}
