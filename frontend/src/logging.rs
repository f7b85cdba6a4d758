use std::io::{self, Write};
use tracing::{level_filters::LevelFilter, Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::JsValue;
use web_sys::console;

/// Buffers one formatted event and hands it to the console method for its level.
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buffer);
        let message = JsValue::from_str(line.trim_end());
        match self.level {
            Level::ERROR => console::error_1(&message),
            Level::WARN => console::warn_1(&message),
            Level::INFO => console::info_1(&message),
            Level::DEBUG => console::debug_1(&message),
            _ => console::log_1(&message),
        }
    }
}

#[derive(Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { level: Level::INFO, buffer: Vec::new() }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter { level: *meta.level(), buffer: Vec::new() }
    }
}

pub fn init(level: LevelFilter) {
    // The browser has no wall clock for the default timer.
    let installed = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(level)
        .with_target(false)
        .without_time()
        .try_init();
    if let Err(e) = installed {
        console::warn_1(&format!("logging already initialised: {e}").into());
    }
}
