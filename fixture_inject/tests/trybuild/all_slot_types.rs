use std::sync::Arc;

use fixture_inject::{Injectable, SlotType, Value};

trait Clock {
    fn now(&self) -> u64;
}

#[derive(Default, Injectable)]
struct Everything {
    flag: bool,
    letter: char,
    byte: i8,
    short: i16,
    int: i32,
    long: i64,
    float: f32,
    double: f64,
    maybe_flag: Option<bool>,
    maybe_letter: Option<char>,
    maybe_byte: Option<i8>,
    maybe_short: Option<i16>,
    maybe_int: Option<i32>,
    maybe_long: Option<i64>,
    maybe_float: Option<f32>,
    maybe_double: Option<f64>,
    text: String,
    maybe_text: Option<String>,
    shared: Option<Arc<Vec<u8>>>,
    clock: Option<Arc<dyn Clock>>,
    anything: Option<Value>,
    r#type: Option<String>,
}

fn main() {
    let subject = Everything::default();
    let descriptor = subject.descriptor();
    assert_eq!(descriptor.type_name(), "Everything");
    assert_eq!(descriptor.members().len(), 22);
    assert!(descriptor.member("type").is_some());
    assert_eq!(
        descriptor.member("text").map(|member| *member.slot_type()),
        Some(SlotType::Text)
    );
    let nullable = |name: &str| descriptor.member(name).map(|member| member.is_nullable());
    assert_eq!(nullable("text"), Some(false));
    assert_eq!(nullable("maybe_text"), Some(true));
    assert_eq!(nullable("int"), Some(false));
    assert_eq!(nullable("shared"), Some(true));
}
