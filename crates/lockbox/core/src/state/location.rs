use core::fmt;

/// Fixed-point coordinates: degrees × 10^7.
pub const COORDINATE_SCALE: f64 = 10_000_000.0;

/// Mean Earth radius (IUGG) used for great-circle distances.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A GPS position stored as signed degrees × 10^7.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// -900_000_000 ..= 900_000_000
    pub latitude: i32,
    /// -1_800_000_000 ..= 1_800_000_000
    pub longitude: i32,
}

impl Location {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(latitude: i32, longitude: i32) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude_degrees(&self) -> f64 {
        f64::from(self.latitude) / COORDINATE_SCALE
    }

    pub fn longitude_degrees(&self) -> f64 {
        f64::from(self.longitude) / COORDINATE_SCALE
    }

    /// Great-circle distance in metres (haversine).
    pub fn distance_m(&self, other: &Location) -> f64 {
        let lat1 = self.latitude_degrees().to_radians();
        let lat2 = other.latitude_degrees().to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (other.longitude_degrees() - self.longitude_degrees()).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().min(1.0).asin()
    }

    /// Whether `other` lies within `radius_m` metres of this location.
    pub fn within(&self, other: &Location, radius_m: f64) -> bool {
        self.distance_m(other) <= radius_m
    }
}

impl fmt::Display for Location {
    /// Formats in the console input grammar: `±DD.DDDDDDD, ±DDD.DDDDDDD`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fixed(f, self.latitude, 2)?;
        f.write_str(", ")?;
        write_fixed(f, self.longitude, 3)
    }
}

fn write_fixed(f: &mut fmt::Formatter<'_>, value: i32, int_digits: usize) -> fmt::Result {
    let sign = if value < 0 { '-' } else { '+' };
    let magnitude = value.unsigned_abs();
    write!(
        f,
        "{sign}{:0width$}.{:07}",
        magnitude / 10_000_000,
        magnitude % 10_000_000,
        width = int_digits
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_in_input_grammar() {
        let location = Location::new(121_234_567, -109_876_543);
        assert_eq!(location.to_string(), "+12.1234567, -010.9876543");
    }

    #[test]
    fn distance_is_zero_for_same_point() {
        let here = Location::new(515_007_000, -1_246_000);
        assert_eq!(here.distance_m(&here), 0.0);
        assert!(here.within(&here, 0.0));
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = Location::new(0, 0);
        let b = Location::new(10_000_000, 0);
        let d = a.distance_m(&b);
        assert!((d - 111_195.0).abs() < 10.0, "distance was {d}");
    }

    #[test]
    fn within_respects_radius() {
        let gate = Location::new(515_007_000, -1_246_000);
        // ~11 m north
        let near = Location::new(515_008_000, -1_246_000);
        assert!(gate.within(&near, 25.0));
        assert!(!gate.within(&near, 5.0));
    }
}
