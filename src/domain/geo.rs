/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Moves this point a fraction of the remaining distance toward `target`,
    /// per axis independently. With a factor below 1 this converges
    /// exponentially and never overshoots.
    pub fn step_toward(self, target: LatLng, factor: f64) -> LatLng {
        LatLng {
            lat: self.lat + (target.lat - self.lat) * factor,
            lng: self.lng + (target.lng - self.lng) * factor,
        }
    }

    /// Euclidean distance in degree space. Good enough at city scale, which is
    /// all the delivery map cares about.
    pub fn distance_to(self, other: LatLng) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_toward_moves_fraction_per_axis() {
        let current = LatLng::new(0.0, 0.0);
        let target = LatLng::new(10.0, 10.0);
        let stepped = current.step_toward(target, 0.05);
        assert_eq!(stepped, LatLng::new(0.5, 0.5));
    }

    #[test]
    fn test_step_toward_never_overshoots() {
        let mut current = LatLng::new(0.0, 0.0);
        let target = LatLng::new(1.0, -1.0);
        for _ in 0..500 {
            let next = current.step_toward(target, 0.05);
            assert!(next.lat <= target.lat);
            assert!(next.lng >= target.lng);
            current = next;
        }
        assert!(current.distance_to(target) < 1e-6);
    }
}
