/// Pick `true_value` only for `Some(true)`
pub fn bool_value_of<'a>(value: Option<bool>, true_value: &'a str, false_value: &'a str) -> &'a str {
    if value == Some(true) {
        true_value
    } else {
        false_value
    }
}

pub fn int_value(value: Option<i32>) -> i32 {
    value.unwrap_or(0)
}
