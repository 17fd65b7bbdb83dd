use forter::run;

pub fn exec(source: &str) -> String {
    exec_with_input(source, "")
}

pub fn exec_with_input(source: &str, input: &str) -> String {
    let mut out = Vec::new();
    let result = run(source, input.as_bytes(), &mut out);
    let mut s = String::from_utf8_lossy(&out).to_string();
    if let Err(error) = result {
        s.push_str(&format!("?{}\n", error));
    }
    s
}
