//! Display and output utilities for CLI commands

/// Format duration in human-readable form
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        format!("{} us", duration.as_micros())
    } else if secs < 1.0 {
        format!("{:.1} ms", secs * 1000.0)
    } else {
        format!("{:.2} s", secs)
    }
}

pub fn print_success(message: &str) {
    println!("[OK] {}", message);
}

pub fn print_error(message: &str) {
    eprintln!("[ERROR] {}", message);
}

pub fn print_info(message: &str) {
    println!("[INFO] {}", message);
}

pub fn print_header(title: &str) {
    println!("\n=== {} ===", title);
}
