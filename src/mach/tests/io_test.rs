use super::*;

#[test]
fn test_input() {
    let mut r = Runtime::load("10 INPUT 100\n20 PRINT 100\n30 END").unwrap();
    assert_eq!(run_with_input(&mut r, "42\n"), "42\n");
}

#[test]
fn test_input_not_a_number() {
    let mut r = Runtime::load("10 INPUT 100:INPUT 101\n20 PRINT 100:PRINT 101:END").unwrap();
    assert_eq!(run_with_input(&mut r, "hello\n"), "0\n0\n");
}

#[test]
fn test_input_replaces_value() {
    let mut r = Runtime::load("10 LET 100=200:INPUT 100\n20 PRINT 100:PRINT 200:END").unwrap();
    assert_eq!(run_with_input(&mut r, " -7 apples"), "-7\n200\n");
}

#[test]
fn test_get_and_end_of_input() {
    let mut r = Runtime::load("10 GET 100:GET 101:GET 102\n20 PRINT 100:PRINT 101:PRINT 102:END")
        .unwrap();
    assert_eq!(run_with_input(&mut r, "AB"), "65\n66\n256\n");
}

#[test]
fn test_put() {
    let mut r = Runtime::load("10 PUT 72:PUT 105:PUT \"!\":PUT 10\n20 END").unwrap();
    assert_eq!(run(&mut r), "Hi!\n");
}

#[test]
fn test_print_without_newline() {
    let mut r = Runtime::load("10 PRINT 1;:PRINT \"A\";:PRINT 2\n20 END").unwrap();
    assert_eq!(run(&mut r), "1A2\n");
}

#[test]
fn test_waiting_repeats_event() {
    let mut r = Runtime::load("10 GET 1\n20 END").unwrap();
    assert!(matches!(r.execute(10), Event::Get));
    assert!(matches!(r.execute(10), Event::Get));
    assert!(!r.enter_line(Some("1")));
    assert!(r.enter_char(Some(b'x')));
    assert!(matches!(r.execute(10), Event::Stopped));
    assert_eq!(r.cells().resolve(1).unwrap(), crate::mach::Val::Integer(120));
}
