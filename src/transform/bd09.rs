//! GCJ-02 / BD-09 vendor transform.
//!
//! A small polar perturbation: radius and angle of the (lon, lat) vector
//! are nudged by fixed sine/cosine terms, then a constant bias is added.
//! Both directions are closed-form; the decrypt direction undoes the bias
//! and applies the perturbation with opposite sign, which is again an
//! approximation rather than an exact inverse.

use std::f64::consts::PI;

use crate::models::GeoPoint;

/// GCJ-02 -> BD-09.
pub fn encrypt(point: GeoPoint) -> GeoPoint {
    let x = point.lon;
    let y = point.lat;
    let z = (x * x + y * y).sqrt() + 0.00002 * (y * PI).sin();
    let theta = y.atan2(x) + 0.000003 * (x * PI).cos();
    GeoPoint {
        lat: z * theta.sin() + 0.006,
        lon: z * theta.cos() + 0.0065,
    }
}

/// BD-09 -> GCJ-02.
pub fn decrypt(point: GeoPoint) -> GeoPoint {
    let x = point.lon - 0.0065;
    let y = point.lat - 0.006;
    let z = (x * x + y * y).sqrt() - 0.00002 * (y * PI).sin();
    let theta = y.atan2(x) - 0.000003 * (x * PI).cos();
    GeoPoint {
        lat: z * theta.sin(),
        lon: z * theta.cos(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_encrypt_applies_bias() {
        let point = GeoPoint::new(39.9042, 116.4074);
        let vendor = encrypt(point);
        // The constant bias dominates: roughly +0.006 lat / +0.0065 lon.
        assert_abs_diff_eq!(vendor.lat, point.lat + 0.006, epsilon = 1e-3);
        assert_abs_diff_eq!(vendor.lon, point.lon + 0.0065, epsilon = 1e-3);
    }

    #[test]
    fn test_round_trip_within_bound() {
        let point = GeoPoint::new(31.2304, 121.4737);
        let round_trip = decrypt(encrypt(point));
        assert_abs_diff_eq!(round_trip.lat, point.lat, epsilon = 1e-6);
        assert_abs_diff_eq!(round_trip.lon, point.lon, epsilon = 1e-6);
    }

    #[test]
    fn test_directions_differ() {
        let point = GeoPoint::new(22.5431, 114.0579);
        assert_ne!(encrypt(point), point);
        assert_ne!(decrypt(point), point);
        assert_ne!(encrypt(point), decrypt(point));
    }
}
