use std::cmp::Ordering;

use crate::point::*;

#[test]
fn test_total_cmp_is_lexicographic() {
    let a = Point::<3>::new(1.0, 5.0, 9.0);
    let b = Point::<3>::new(2.0, 0.0, 0.0);
    let c = Point::<3>::new(1.0, 5.0, -1.0);

    assert_eq!(total_cmp(&a, &b), Ordering::Less);
    assert_eq!(total_cmp(&b, &a), Ordering::Greater);
    assert_eq!(total_cmp(&c, &a), Ordering::Less);
    assert_eq!(total_cmp(&a, &a), Ordering::Equal);
}

#[test]
fn test_cmp_along_uses_dimension_first() {
    let a = Point::<2>::new(0.0, 3.0);
    let b = Point::<2>::new(9.0, 1.0);

    assert_eq!(cmp_along(&a, &b, 0), Ordering::Less);
    assert_eq!(cmp_along(&a, &b, 1), Ordering::Greater);
}

#[test]
fn test_cmp_along_breaks_ties_with_total_order() {
    let a = Point::<2>::new(1.0, 2.0);
    let b = Point::<2>::new(0.0, 2.0);

    // Equal along dimension 1, so the whole-point order decides
    assert_eq!(cmp_along(&a, &b, 1), Ordering::Greater);
    assert_eq!(cmp_along(&b, &a, 1), Ordering::Less);
}

#[test]
fn test_distance_squared() {
    let a = Point::<3>::new(1.0, 2.0, 3.0);
    let b = Point::<3>::new(4.0, 6.0, 3.0);

    assert_eq!(distance_squared(&a, &b), 25.0);
    assert_eq!(distance_squared(&a, &a), 0.0);
}

#[test]
fn test_vector_arithmetic_and_dot() {
    let p = Point::<3>::new(1.0, 1.0, 1.0);
    let v = Vector::<3>::new(1.0, 2.0, 3.0);

    assert_eq!(p + v * 2.0, Point::<3>::new(3.0, 5.0, 7.0));
    assert_eq!(v.dot(&Vector::<3>::new(1.0, 0.0, -1.0)), -2.0);
}

#[test]
fn test_is_finite() {
    assert!(is_finite(&Point::<2>::new(1.0, -1.0)));
    assert!(!is_finite(&Point::<2>::new(f64::NAN, 0.0)));
    assert!(!is_finite(&Point::<2>::new(0.0, f64::INFINITY)));
}
