use super::*;

#[test]
fn test_lines_run_in_number_order() {
    let mut r = Runtime::load("30 END\n10 PRINT 1\n20 PRINT 2").unwrap();
    assert_eq!(run(&mut r), "1\n2\n");
    assert!(r.is_halted());
    assert_eq!(r.cursor(), Some(20));
}

#[test]
fn test_end_stops_mid_line() {
    let mut r = Runtime::load("10 PRINT 1:END:PRINT 2\n20 PRINT 3").unwrap();
    assert_eq!(run(&mut r), "1\n");
}

#[test]
fn test_missing_next_line() {
    let mut r = Runtime::load("5 PRINT 1").unwrap();
    assert_eq!(run(&mut r), "1\n?UNDEFINED LINE IN 5; NO LINE AFTER 5\n");
    assert!(r.is_halted());
}

#[test]
fn test_renumbering_a_line_changes_the_order() {
    let mut r = Runtime::load("10 LET 30=15\n20 PRINT 2:END\n30 PRINT 3").unwrap();
    assert_eq!(run(&mut r), "3\n2\n");
}

#[test]
fn test_line_renumbers_itself_to_loop() {
    let program = "5 LET 500=1\n\
                   10 PRINT 500:LET 500=500+1:LET 10=10+5+5\n\
                   45 END";
    let mut r = Runtime::load(program).unwrap();
    assert_eq!(run(&mut r), "1\n2\n3\n4\n");
    assert_eq!(r.cursor(), Some(40));
}

#[test]
fn test_duplicate_numbers_run_first_declared() {
    let mut r = Runtime::load("10 PRINT \"A\"\n10 PRINT \"B\"\n20 END").unwrap();
    assert_eq!(run(&mut r), "A\n");
}

#[test]
fn test_string_line_number() {
    let mut r = Runtime::load("10 PRINT 1\n\"X\" END").unwrap();
    assert_eq!(run(&mut r), "?TYPE MISMATCH; LINE NUMBER \"X\"\n");
}

#[test]
fn test_runtime_error_has_line_number() {
    let mut r = Runtime::load("10 PRINT 1/0\n20 END").unwrap();
    assert_eq!(run(&mut r), "?DIVISION BY ZERO IN 10\n");
}

#[test]
fn test_interrupt() {
    let mut r = Runtime::load("10 PRINT 1\n20 END").unwrap();
    r.interrupt();
    assert_eq!(run(&mut r), "?BREAK\n");
}

#[test]
fn test_cycles_bound_each_call() {
    let mut r = Runtime::load("10 REM\n20 REM\n30 END").unwrap();
    assert!(matches!(r.execute(1), Event::Running));
    assert!(matches!(r.execute(5000), Event::Stopped));
}

#[test]
fn test_let_copies_value() {
    let mut r = Runtime::load("10 LET 1=5\n20 LET 1=1+1\n30 PRINT 5:PRINT 1\n40 END").unwrap();
    assert_eq!(run(&mut r), "5\n10\n");
    assert_eq!(r.cells().get(1), crate::mach::Cell::Value(crate::mach::Val::Integer(10)));
}
