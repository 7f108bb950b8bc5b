/// Camera offset seen by a sprite on one axis.
///
/// `divisor` encodes parallax strength:
/// - `d > 0`: `floor(camera / d)`, the layer moves slower than the camera
/// - `d < 0`: `camera * -d`, the layer moves faster than the camera
/// - `d == 0` and `camera_align`: `camera`, locked to the camera
/// - `d == 0` otherwise: `0`, fixed in screen space (HUD)
///
/// The caller decides the sign it is applied with: horizontal offsets are
/// subtracted from the sprite position, vertical offsets are added.
#[inline]
pub fn resolve_depth_offset(camera: i32, divisor: i32, camera_align: bool) -> i32 {
    if divisor > 0 {
        camera.div_euclid(divisor)
    } else if divisor < 0 {
        camera.saturating_mul(divisor.saturating_neg())
    } else if camera_align {
        camera
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_divisor_floors() {
        assert_eq!(resolve_depth_offset(100, 2, false), 50);
        assert_eq!(resolve_depth_offset(101, 2, true), 50);
        assert_eq!(resolve_depth_offset(-101, 2, false), -51);
    }

    #[test]
    fn negative_divisor_multiplies() {
        assert_eq!(resolve_depth_offset(100, -3, false), 300);
        assert_eq!(resolve_depth_offset(-5, -2, true), -10);
    }

    #[test]
    fn zero_divisor_depends_on_alignment() {
        assert_eq!(resolve_depth_offset(100, 0, true), 100);
        assert_eq!(resolve_depth_offset(100, 0, false), 0);
    }
}
