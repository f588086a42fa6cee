use std::io::{self, Write};

use flexi_logger::{DeferredNow, Record, style};

/// `LEVEL [module] message`, level colored when the terminal allows it.
pub fn cli_format(w: &mut dyn Write, _now: &mut DeferredNow, record: &Record) -> io::Result<()> {
    let level = record.level();
    write!(
        w,
        "{} [{}] {}",
        style(level).paint(level.to_string()),
        record.module_path().unwrap_or("<unnamed>"),
        record.args()
    )
}
