// src/banner.rs

/// Prints the application startup banner to stderr.
pub fn print_banner() {
    let banner = r#"
  _ __ ___  ___ _   _ _ __ ___   ___        ___  ___ _ __ ___  ___ _ __
 | '__/ _ \/ __| | | | '_ ` _ \ / _ \_____/ __|/ __| '__/ _ \/ _ \ '_ \
 | | |  __/\__ \ |_| | | | | | |  __/_____\__ \ (__| | |  __/  __/ | | |
 |_|  \___||___/\__,_|_| |_| |_|\___|     |___/\___|_|  \___|\___|_| |_|

    Resume Screening Dashboard
"#;
    eprintln!("{}", banner);
}
