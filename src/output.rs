use owo_colors::OwoColorize;

/// Small wrapper around stdout/stderr printing to provide consistent,
/// tagged user-facing messages. Colors are enabled only when output is a TTY.
fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

const TAG: &str = "[doc-index]";

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", TAG.cyan().bold(), msg);
    } else {
        println!("{} {}", TAG, msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {} {}", TAG.cyan().bold(), "warn:".yellow().bold(), msg);
    } else {
        eprintln!("{} warn: {}", TAG, msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {} {}", TAG.cyan().bold(), "error:".red().bold(), msg);
    } else {
        eprintln!("{} error: {}", TAG, msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {} {}", TAG.cyan().bold(), "ok:".green().bold(), msg);
    } else {
        println!("{} ok: {}", TAG, msg);
    }
}
