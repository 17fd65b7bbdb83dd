mod common;
use common::*;

#[test]
fn test_input_echo() {
    assert_eq!(
        exec_with_input("10 INPUT 1:PRINT 1*2:END", "21\n"),
        "42\n"
    );
}

#[test]
fn test_input_at_end_of_stream() {
    assert_eq!(exec_with_input("10 INPUT 1:PRINT 1:END", ""), "0\n");
}

#[test]
fn test_get_and_put_copy_bytes() {
    let program = "10 GET 1:GET 2:GET 3:PUT 1:PUT 2:PRINT 3:END";
    assert_eq!(exec_with_input(program, "ok"), "ok256\n");
}

#[test]
fn test_put_string() {
    assert_eq!(exec(r#"10 PUT "Hi":PUT 10:END"#), "H\n");
}

#[test]
fn test_print_without_newline() {
    assert_eq!(exec(r#"10 PRINT "A";:PRINT "B":END"#), "AB\n");
}
