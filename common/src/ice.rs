//! 氷の格子判定
//!
//! 六方晶氷（ice Ih）の単位格子 a = b = 4.4 Å, c = 7.2 Å, γ = 120° に
//! 3方向（001, 010, 100）のいずれかで一致するかを判定する。

/// 格子定数1つ分の基準値と許容差
#[derive(Debug, Clone, Copy)]
struct Reference {
    value: f64,
    tolerance: f64,
}

const SHORT_EDGE: Reference = Reference { value: 4.4, tolerance: 0.2 };
const LONG_EDGE: Reference = Reference { value: 7.2, tolerance: 0.6 };
const RIGHT_ANGLE: Reference = Reference { value: 90.0, tolerance: 2.0 };
const HEX_ANGLE: Reference = Reference { value: 120.0, tolerance: 9.0 };

/// [a, b, c, alpha, beta, gamma] の並び
const ORIENTATIONS: [[Reference; 6]; 3] = [
    // 001
    [SHORT_EDGE, SHORT_EDGE, LONG_EDGE, RIGHT_ANGLE, RIGHT_ANGLE, HEX_ANGLE],
    // 010
    [SHORT_EDGE, LONG_EDGE, SHORT_EDGE, RIGHT_ANGLE, HEX_ANGLE, RIGHT_ANGLE],
    // 100
    [LONG_EDGE, SHORT_EDGE, SHORT_EDGE, HEX_ANGLE, RIGHT_ANGLE, RIGHT_ANGLE],
];

/// 格子定数が氷に近いか
pub fn is_ice_like(cell: &[f64; 6]) -> bool {
    ORIENTATIONS.iter().any(|orientation| {
        orientation
            .iter()
            .zip(cell.iter())
            .all(|(reference, value)| (value - reference.value).abs() < reference.tolerance)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_ice_orientations() {
        assert!(is_ice_like(&[4.4, 4.4, 7.2, 90.0, 90.0, 120.0]));
        assert!(is_ice_like(&[4.4, 7.2, 4.4, 90.0, 120.0, 90.0]));
        assert!(is_ice_like(&[7.2, 4.4, 4.4, 120.0, 90.0, 90.0]));
    }

    #[test]
    fn test_within_tolerance() {
        assert!(is_ice_like(&[4.55, 4.25, 7.7, 91.5, 88.6, 112.0]));
        assert!(is_ice_like(&[4.3, 6.7, 4.5, 89.0, 128.5, 91.9]));
    }

    #[test]
    fn test_outside_tolerance() {
        assert!(!is_ice_like(&[50.0, 50.0, 50.0, 90.0, 90.0, 90.0]));
        // a だけが許容差の外
        assert!(!is_ice_like(&[4.65, 4.4, 7.2, 90.0, 90.0, 120.0]));
        // gamma が 90°
        assert!(!is_ice_like(&[4.4, 4.4, 7.2, 90.0, 90.0, 90.0]));
    }

    #[test]
    fn test_orientation_parameters_do_not_mix() {
        // 001 の辺長と 100 の角度の組み合わせ
        assert!(!is_ice_like(&[4.4, 4.4, 7.2, 120.0, 90.0, 90.0]));
    }

    #[test]
    fn test_lysozyme_is_not_ice() {
        assert!(!is_ice_like(&[78.9, 78.9, 37.1, 90.0, 90.0, 90.0]));
    }
}
