use crate::mach::{Event, Runtime};

mod dispatch_test;
mod io_test;

fn run(runtime: &mut Runtime) -> String {
    run_with_input(runtime, "")
}

fn run_with_input(runtime: &mut Runtime, input: &str) -> String {
    let mut s = String::new();
    let mut lines = input.lines();
    let mut bytes = input.bytes();
    let mut prev_running = false;
    loop {
        let event = runtime.execute(5000);
        match &event {
            Event::Stopped => break,
            Event::Error(error) => {
                s.push_str(&format!("?{}\n", error));
                break;
            }
            Event::Running => {
                if prev_running {
                    s.push_str("\nExecution cycles exceeded.\n");
                    break;
                }
            }
            Event::Print(ps) => s.push_str(ps),
            Event::Put(b) => s.push(char::from(*b)),
            Event::Input => {
                runtime.enter_line(lines.next());
            }
            Event::Get => {
                runtime.enter_char(bytes.next());
            }
        }
        prev_running = matches!(event, Event::Running);
    }
    s
}
