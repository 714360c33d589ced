use time::format_description;
use time::OffsetDateTime;

/// Emit `var` for the binaries: the caller's override, else `now` in `fmt`.
fn stamp(var: &str, now: OffsetDateTime, fmt: &str) {
    println!("cargo:rerun-if-env-changed={var}");
    let value = std::env::var(var).unwrap_or_else(|_| {
        format_description::parse(fmt)
            .ok()
            .and_then(|f| now.format(&f).ok())
            .unwrap_or_else(|| "unknown".to_string())
    });
    println!("cargo:rustc-env={var}={value}");
}

fn main() {
    let now = OffsetDateTime::now_utc();
    stamp("SCIDATA_BUILD_DATE", now, "[year]-[month]-[day]");
    stamp("SCIDATA_BUILD_TIME", now, "[hour]:[minute]:[second] UTC");
}
