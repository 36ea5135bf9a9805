use serde::{Deserialize, Serialize};

/// A named point of interest, optionally pinned to projected coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proj_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proj_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Marker {
    /// Creates a marker at a geographic position
    pub fn new(name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            name: name.into(),
            lat,
            lon,
            elevation: None,
            proj_x: None,
            proj_y: None,
            comment: None,
        }
    }
}

/// Identity of a route: the explicit id when one was assigned, otherwise
/// the legacy `(name, marker count)` pair.
///
/// The fallback is weak — two routes sharing a name and a marker count
/// compare equal. Kept for compatibility with existing route documents;
/// assign ids to routes that must stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteIdentity {
    Id(String),
    NameAndCount(String, usize),
}

/// An ordered sequence of markers forming a path.
///
/// Marker insertion order is significant: it defines the path order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub visible: bool,
    pub route_markers: Vec<Marker>,
}

impl Route {
    /// Creates an empty visible route
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            color: None,
            visible: true,
            route_markers: Vec::new(),
        }
    }

    /// Appends a marker to the end of the path
    pub fn push_marker(&mut self, marker: Marker) {
        self.route_markers.push(marker);
    }

    /// The value route equality is based on
    pub fn identity(&self) -> RouteIdentity {
        match &self.id {
            Some(id) => RouteIdentity::Id(id.clone()),
            None => RouteIdentity::NameAndCount(self.name.clone(), self.route_markers.len()),
        }
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

/// One recorded position of a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<f64>,
}

/// A recorded path, produced by an external GPX reader and stored here in
/// point order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub points: Vec<TrackPoint>,
}

impl Track {
    /// Creates an empty track
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            points: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_identity_prefers_explicit_id() {
        let mut a = Route::new("loop");
        a.id = Some("route-1".to_string());
        let mut b = Route::new("loop");
        b.id = Some("route-2".to_string());

        assert_ne!(a, b);
        assert_eq!(a.identity(), RouteIdentity::Id("route-1".to_string()));
    }

    #[test]
    fn test_route_identity_fallback_collides() {
        // same name, same marker count: the legacy rule cannot tell these apart
        let mut a = Route::new("summit");
        a.push_marker(Marker::new("start", 45.0, 6.0));
        let mut b = Route::new("summit");
        b.push_marker(Marker::new("other start", 46.0, 7.0));

        assert_eq!(a, b);

        b.push_marker(Marker::new("end", 46.1, 7.1));
        assert_ne!(a, b);
    }

    #[test]
    fn test_marker_order_is_path_order() {
        let mut route = Route::new("ridge");
        route.push_marker(Marker::new("a", 45.0, 6.0));
        route.push_marker(Marker::new("b", 45.1, 6.1));
        route.push_marker(Marker::new("c", 45.2, 6.2));

        let names: Vec<&str> = route.route_markers.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_track_keeps_point_order() {
        let mut track = Track::new("morning run");
        track.points.push(TrackPoint {
            lat: 45.0,
            lon: 6.0,
            elevation: Some(1200.0),
        });
        track.points.push(TrackPoint {
            lat: 45.01,
            lon: 6.01,
            elevation: None,
        });

        assert_eq!(track.points[0].elevation, Some(1200.0));
        assert_eq!(track.points[1].lat, 45.01);
    }

    #[test]
    fn test_marker_document_shape() {
        let mut marker = Marker::new("refuge", 45.9, 6.9);
        marker.elevation = Some(2700.0);

        let json = serde_json::to_value(&marker).unwrap();
        assert_eq!(json["name"], "refuge");
        assert_eq!(json["elevation"], 2700.0);
        assert!(json.get("proj_x").is_none());
        assert!(json.get("comment").is_none());
    }
}
