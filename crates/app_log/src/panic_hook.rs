//! Panic hook for crash reporting

use backtrace::Backtrace;
use chrono::Local;
use std::panic::PanicHookInfo;

/// Initialize the panic hook for crash reporting
pub fn init_panic_hook() {
    std::panic::set_hook(Box::new(panic_handler));
    tracing::debug!("Panic hook initialized");
}

fn panic_handler(info: &PanicHookInfo) {
    let backtrace = Backtrace::new();
    let thread = std::thread::current();
    let thread_name = thread.name().unwrap_or("<unnamed>");

    let report = crash_report(
        &Local::now().to_rfc3339(),
        thread_name,
        &format!("{:?}", info.location()),
        payload_message(info),
        &format!("{:?}", backtrace),
    );

    // stderr is always available
    eprintln!("{}", report);

    // May be lost if the log writer thread is already gone
    tracing::error!("{}", report);

    let dump_filename = format!(
        "photo_sweep_crash_{}.txt",
        Local::now().format("%Y%m%d_%H%M%S")
    );
    let dump_path = std::env::temp_dir().join(&dump_filename);

    if let Err(e) = std::fs::write(&dump_path, &report) {
        eprintln!("Failed to write crash dump: {}", e);
    }

    #[cfg(windows)]
    show_error_dialog(&dump_path, info);
}

#[cfg(windows)]
fn show_error_dialog(dump_path: &std::path::Path, info: &PanicHookInfo) {
    use windows::core::HSTRING;
    use windows::Win32::UI::WindowsAndMessaging::{MessageBoxW, MB_ICONERROR, MB_OK};

    let msg = format!(
        "An unexpected error occurred.\n\n\
         Log file: {}\n\n\
         Error: {:?}",
        dump_path.display(),
        payload_message(info)
    );

    unsafe {
        MessageBoxW(
            None,
            &HSTRING::from(msg),
            &HSTRING::from("PhotoSweep - Fatal Error"),
            MB_ICONERROR | MB_OK,
        );
    }
}

/// Panic payloads are either `&str` or `String`
fn payload_message<'a>(info: &'a PanicHookInfo) -> &'a str {
    let payload = info.payload();
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<unknown>")
}

fn crash_report(timestamp: &str, thread: &str, location: &str, payload: &str, trace: &str) -> String {
    format!(
        "=== PhotoSweep CRITICAL PANIC ===\n\
         Timestamp: {}\n\
         Thread: {}\n\
         Location: {}\n\
         Payload: {}\n\n\
         Stack Trace:\n{}",
        timestamp, thread, location, payload, trace
    )
}
