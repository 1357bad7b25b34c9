use super::*;

#[test]
fn test_truncate_id() {
    assert_eq!(truncate_id("short", REPORT_ID_WIDTH), "short");
    assert_eq!(
        truncate_id("ABCDEFGHIJKLMNOPQRSTUVWXYZ", REPORT_ID_WIDTH),
        "ABCDEFGHIJKLMNOPQRST"
    );
    assert_eq!(truncate_id("ßßßß", 2), "ßß");
    assert_eq!(truncate_id("", 3), "");
}

#[test]
fn test_number_formatting() {
    assert_eq!(format_f64_6(0.1234564), "0.123456");
    assert_eq!(format_f64_6(-2.0), "-2.000000");
    assert_eq!(format_percent(58.9318), "58.93%");
}
