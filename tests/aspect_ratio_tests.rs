// Aspect ratio table tests

use proptest::prelude::*;
use stability_relay::models::AspectRatio;

#[test]
fn test_all_known_buckets() {
    let expected = [
        ("1:1", 1024, 1024),
        ("16:9", 1024, 576),
        ("9:16", 576, 1024),
        ("4:3", 1024, 768),
    ];

    for (label, width, height) in expected {
        let resolved = AspectRatio::resolve(Some(label));
        assert_eq!(resolved.label, label);
        assert_eq!((resolved.width, resolved.height), (width, height));
    }

    assert_eq!(AspectRatio::known_labels().count(), expected.len());
}

#[test]
fn test_missing_ratio_defaults_to_square() {
    let resolved = AspectRatio::resolve(None);
    assert_eq!(resolved.label, "1:1");
    assert_eq!((resolved.width, resolved.height), (1024, 1024));
}

proptest! {
    #[test]
    fn resolve_is_total(input in ".*") {
        let resolved = AspectRatio::resolve(Some(&input));
        prop_assert!(AspectRatio::known_labels().any(|l| l == resolved.label));
        prop_assert_eq!(resolved, AspectRatio::resolve(Some(resolved.label)));
        prop_assert!(resolved.width > 0 && resolved.height > 0);
    }
}
