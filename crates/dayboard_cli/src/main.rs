//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `dayboard_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe to validate core crate wiring independently from the
    // mobile FFI runtime setup.
    println!("dayboard_core ping={}", dayboard_core::ping());
    println!("dayboard_core version={}", dayboard_core::core_version());
    println!("roster size={}", dayboard_core::sample_roster().len());
    println!("clock 125s={}", dayboard_core::format_clock(125));
}
