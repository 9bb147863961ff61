use super::*;

#[test]
fn mul_div255_rounds() {
    assert_eq!(mul_div255_u8(255, 255), 255);
    assert_eq!(mul_div255_u8(255, 0), 0);
    assert_eq!(mul_div255_u8(255, 128), 128);
    assert_eq!(mul_div255_u16(100, 51), 20);
}

#[test]
fn premul_opaque_is_identity() {
    assert_eq!(premul_rgba8(81, 181, 237, 255), [81, 181, 237, 255]);
    assert_eq!(premul_rgba8(81, 181, 237, 0), [0, 0, 0, 0]);
}

#[test]
fn unpremul_restores_straight_color() {
    let p = premul_rgba8(200, 100, 0, 128);
    let s = unpremul_rgba8(p, [0, 0, 0]);
    assert_eq!(s[3], 128);
    assert!(s[0].abs_diff(200) <= 1);
    assert!(s[1].abs_diff(100) <= 1);
    assert_eq!(s[2], 0);
}

#[test]
fn unpremul_transparent_uses_fallback() {
    assert_eq!(unpremul_rgba8([0, 0, 0, 0], [32, 32, 32]), [32, 32, 32, 0]);
}
