#![cfg(feature = "serde")]

use tupelo::{Tuple, Tuple0, Tuple3};

#[test]
fn typed_tuples_serialize_as_sequences() {
    let t = Tuple::new((1u8, String::from("two"), 3.5f64));
    assert_eq!(serde_json::to_string(&t).unwrap(), r#"[1,"two",3.5]"#);
    assert_eq!(serde_json::to_string(&Tuple0::default()).unwrap(), "[]");
}

#[test]
fn typed_tuples_deserialize_from_sequences() {
    let t: Tuple3<u8, String, f64> = serde_json::from_str(r#"[1,"two",3.5]"#).unwrap();
    assert_eq!(t, Tuple::new((1u8, String::from("two"), 3.5f64)));

    let empty: Tuple0 = serde_json::from_str("[]").unwrap();
    assert!(empty.is_empty());
}

#[test]
fn deserialization_checks_depth_and_types() {
    assert!(serde_json::from_str::<Tuple3<u8, String, f64>>(r#"[1,"two"]"#).is_err());
    assert!(serde_json::from_str::<Tuple3<u8, String, f64>>(r#"[1,"two",3.5,4]"#).is_err());
    assert!(serde_json::from_str::<Tuple3<u8, String, f64>>(r#"[1,2,3.5]"#).is_err());
}

#[test]
fn round_trip_preserves_structure() {
    let t = Tuple::new((String::from("a"), vec![1i64, 2], Some(false)));
    let json = serde_json::to_string(&t).unwrap();
    let back: Tuple<(String, Vec<i64>, Option<bool>)> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, t);
    assert_eq!(back.rotate_left::<tupelo::unary::types::_1>().depth(), 3);
}
